use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::book::errors::BookIdError;
use crate::domain::book::errors::BookTitleError;

/// Book record.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: BookId,
    pub title: BookTitle,
    pub author: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Book {
    /// Apply the fields present in `command`, leaving the others untouched.
    pub fn apply(&mut self, command: UpdateBookCommand) {
        if let Some(title) = command.title {
            self.title = title;
        }
        if let Some(author) = command.author {
            self.author = author;
        }
        if let Some(description) = command.description {
            self.description = description;
        }
    }
}

/// Book identifier, assigned by storage on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookId(pub i64);

impl BookId {
    /// Parse a book ID from a path segment.
    ///
    /// # Errors
    /// * `InvalidFormat` - Not an integer
    pub fn from_string(s: &str) -> Result<Self, BookIdError> {
        s.parse::<i64>()
            .map(BookId)
            .map_err(|_| BookIdError::InvalidFormat(s.to_string()))
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Book title value type. Non-blank, at most 200 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookTitle(String);

impl BookTitle {
    const MAX_LENGTH: usize = 200;

    pub fn new(title: String) -> Result<Self, BookTitleError> {
        if title.trim().is_empty() {
            return Err(BookTitleError::Empty);
        }

        let length = title.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(BookTitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(title))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to add a book.
#[derive(Debug, Clone)]
pub struct CreateBookCommand {
    pub title: BookTitle,
    pub author: String,
    pub description: String,
}

/// Book fields ready to be inserted, before storage assigns an id.
#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: BookTitle,
    pub author: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Partial update. Only provided fields change.
#[derive(Debug, Clone, Default)]
pub struct UpdateBookCommand {
    pub title: Option<BookTitle>,
    pub author: Option<String>,
    pub description: Option<String>,
}

/// Offset pagination for book listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub skip: u32,
    pub limit: u32,
}

impl Pagination {
    pub const DEFAULT_LIMIT: u32 = 10;
    pub const MAX_LIMIT: u32 = 100;

    pub fn new(skip: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            skip: skip.unwrap_or(0),
            limit: limit
                .unwrap_or(Self::DEFAULT_LIMIT)
                .min(Self::MAX_LIMIT),
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> Book {
        Book {
            id: BookId(1),
            title: BookTitle::new("Dune".to_string()).unwrap(),
            author: "Frank Herbert".to_string(),
            description: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_apply_partial_update() {
        let mut book = book();
        book.apply(UpdateBookCommand {
            description: Some("Spice".to_string()),
            ..Default::default()
        });

        assert_eq!(book.title.as_str(), "Dune");
        assert_eq!(book.author, "Frank Herbert");
        assert_eq!(book.description, "Spice");
    }

    #[test]
    fn test_apply_empty_update_is_noop() {
        let mut updated = book();
        let original = updated.clone();
        updated.apply(UpdateBookCommand::default());

        assert_eq!(updated, original);
    }

    #[test]
    fn test_book_title_validation() {
        assert_eq!(BookTitle::new("   ".to_string()), Err(BookTitleError::Empty));
        assert!(matches!(
            BookTitle::new("x".repeat(201)),
            Err(BookTitleError::TooLong { max: 200, .. })
        ));
    }

    #[test]
    fn test_book_id_from_string() {
        assert_eq!(BookId::from_string("42"), Ok(BookId(42)));
        assert_eq!(BookId::from_string("0"), Ok(BookId(0)));
        assert_eq!(BookId::from_string("-3"), Ok(BookId(-3)));
        assert!(BookId::from_string("abc").is_err());
        assert!(BookId::from_string("1.5").is_err());
    }

    #[test]
    fn test_pagination_defaults_and_cap() {
        assert_eq!(Pagination::default(), Pagination { skip: 0, limit: 10 });
        assert_eq!(Pagination::new(Some(5), Some(1000)).limit, 100);
    }
}
