use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookId;
use crate::domain::book::models::CreateBookCommand;
use crate::domain::book::models::NewBook;
use crate::domain::book::models::Pagination;
use crate::domain::book::models::UpdateBookCommand;
use crate::domain::book::ports::BookRepository;
use crate::domain::book::ports::BookServicePort;

/// Domain service implementation for book operations.
pub struct BookService<BR>
where
    BR: BookRepository,
{
    repository: Arc<BR>,
}

impl<BR> BookService<BR>
where
    BR: BookRepository,
{
    pub fn new(repository: Arc<BR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<BR> BookServicePort for BookService<BR>
where
    BR: BookRepository,
{
    async fn create_book(&self, command: CreateBookCommand) -> Result<Book, BookError> {
        let book = NewBook {
            title: command.title,
            author: command.author,
            description: command.description,
            created_at: Utc::now(),
        };

        let created = self.repository.create(book).await?;
        tracing::info!(book_id = %created.id, title = %created.title, "Book created");

        Ok(created)
    }

    async fn get_book(&self, id: BookId) -> Result<Book, BookError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(BookError::NotFound(id.to_string()))
    }

    async fn list_books(&self, pagination: Pagination) -> Result<Vec<Book>, BookError> {
        self.repository.list(pagination).await
    }

    async fn update_book(
        &self,
        id: BookId,
        command: UpdateBookCommand,
    ) -> Result<Book, BookError> {
        let mut book = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(BookError::NotFound(id.to_string()))?;

        book.apply(command);

        self.repository.update(book).await
    }

    async fn delete_book(&self, id: BookId) -> Result<(), BookError> {
        self.repository.delete(id).await?;
        tracing::info!(book_id = %id, "Book deleted");

        Ok(())
    }
}
