use thiserror::Error;

/// Error for BookId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BookIdError {
    #[error("Invalid book ID: {0}")]
    InvalidFormat(String),
}

/// Error for BookTitle validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BookTitleError {
    #[error("Book title cannot be empty")]
    Empty,

    #[error("Book title too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for all book-related operations
#[derive(Debug, Clone, Error)]
pub enum BookError {
    #[error("Invalid book ID: {0}")]
    InvalidBookId(#[from] BookIdError),

    #[error("Invalid book title: {0}")]
    InvalidTitle(#[from] BookTitleError),

    #[error("Book not found")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
