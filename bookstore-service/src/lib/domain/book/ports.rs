use async_trait::async_trait;

use crate::domain::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookId;
use crate::domain::book::models::CreateBookCommand;
use crate::domain::book::models::NewBook;
use crate::domain::book::models::Pagination;
use crate::domain::book::models::UpdateBookCommand;

/// Port for book domain service operations.
#[async_trait]
pub trait BookServicePort: Send + Sync + 'static {
    /// Add a new book.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_book(&self, command: CreateBookCommand) -> Result<Book, BookError>;

    /// Retrieve a book by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Book does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_book(&self, id: BookId) -> Result<Book, BookError>;

    /// List books ordered by identifier.
    async fn list_books(&self, pagination: Pagination) -> Result<Vec<Book>, BookError>;

    /// Update the provided fields of an existing book.
    ///
    /// # Errors
    /// * `NotFound` - Book does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_book(&self, id: BookId, command: UpdateBookCommand)
        -> Result<Book, BookError>;

    /// Delete an existing book.
    ///
    /// # Errors
    /// * `NotFound` - Book does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_book(&self, id: BookId) -> Result<(), BookError>;
}

/// Persistence operations for books.
#[async_trait]
pub trait BookRepository: Send + Sync + 'static {
    /// Insert a book and return it with its assigned identifier.
    async fn create(&self, book: NewBook) -> Result<Book, BookError>;

    /// Retrieve book by identifier (None if not found).
    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, BookError>;

    /// Retrieve a page of books ordered by identifier.
    async fn list(&self, pagination: Pagination) -> Result<Vec<Book>, BookError>;

    /// Overwrite the stored fields of `book`.
    ///
    /// # Errors
    /// * `NotFound` - Book does not exist
    async fn update(&self, book: Book) -> Result<Book, BookError>;

    /// Remove book from storage.
    ///
    /// # Errors
    /// * `NotFound` - Book does not exist
    async fn delete(&self, id: BookId) -> Result<(), BookError>;
}
