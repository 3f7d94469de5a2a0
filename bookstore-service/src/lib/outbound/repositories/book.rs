use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::SqlitePool;

use crate::domain::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookId;
use crate::domain::book::models::BookTitle;
use crate::domain::book::models::NewBook;
use crate::domain::book::models::Pagination;
use crate::domain::book::ports::BookRepository;

pub struct SqliteBookRepository {
    pool: SqlitePool,
}

impl SqliteBookRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct BookRow {
    id: i64,
    title: String,
    author: String,
    description: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<BookRow> for Book {
    type Error = BookError;

    fn try_from(row: BookRow) -> Result<Self, Self::Error> {
        Ok(Book {
            id: BookId(row.id),
            title: BookTitle::new(row.title)?,
            author: row.author,
            description: row.description,
            created_at: row.created_at,
        })
    }
}

fn database_error(e: sqlx::Error) -> BookError {
    BookError::DatabaseError(e.to_string())
}

#[async_trait]
impl BookRepository for SqliteBookRepository {
    async fn create(&self, book: NewBook) -> Result<Book, BookError> {
        let result = sqlx::query(
            r#"
            INSERT INTO books (title, author, description, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(book.title.as_str())
        .bind(&book.author)
        .bind(&book.description)
        .bind(book.created_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(Book {
            id: BookId(result.last_insert_rowid()),
            title: book.title,
            author: book.author,
            description: book.description,
            created_at: book.created_at,
        })
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, BookError> {
        let row = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT id, title, author, description, created_at
            FROM books
            WHERE id = ?
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Book::try_from).transpose()
    }

    async fn list(&self, pagination: Pagination) -> Result<Vec<Book>, BookError> {
        let rows = sqlx::query_as::<_, BookRow>(
            r#"
            SELECT id, title, author, description, created_at
            FROM books
            ORDER BY id
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(i64::from(pagination.limit))
        .bind(i64::from(pagination.skip))
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(Book::try_from).collect()
    }

    async fn update(&self, book: Book) -> Result<Book, BookError> {
        let result = sqlx::query(
            r#"
            UPDATE books
            SET title = ?, author = ?, description = ?
            WHERE id = ?
            "#,
        )
        .bind(book.title.as_str())
        .bind(&book.author)
        .bind(&book.description)
        .bind(book.id.0)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(BookError::NotFound(book.id.to_string()));
        }

        Ok(book)
    }

    async fn delete(&self, id: BookId) -> Result<(), BookError> {
        let result = sqlx::query(
            r#"
            DELETE FROM books
            WHERE id = ?
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(BookError::NotFound(id.to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use sqlx::sqlite::SqlitePoolOptions;

    use super::*;

    async fn repository() -> SqliteBookRepository {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");
        SqliteBookRepository::new(pool)
    }

    fn new_book(title: &str) -> NewBook {
        NewBook {
            title: BookTitle::new(title.to_string()).unwrap(),
            author: "Ursula K. Le Guin".to_string(),
            description: String::new(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let repository = repository().await;

        let first = repository.create(new_book("A Wizard of Earthsea")).await.unwrap();
        let second = repository.create(new_book("The Tombs of Atuan")).await.unwrap();

        assert!(second.id.0 > first.id.0);
        let found = repository.find_by_id(first.id).await.unwrap().unwrap();
        assert_eq!(found.title, first.title);
    }

    #[tokio::test]
    async fn test_list_paginates_in_id_order() {
        let repository = repository().await;
        for title in ["One", "Two", "Three"] {
            repository.create(new_book(title)).await.unwrap();
        }

        let page = repository
            .list(Pagination::new(Some(1), Some(1)))
            .await
            .unwrap();

        assert_eq!(page.len(), 1);
        assert_eq!(page[0].title.as_str(), "Two");
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let repository = repository().await;
        let mut book = repository.create(new_book("Draft")).await.unwrap();

        book.description = "Revised".to_string();
        repository.update(book.clone()).await.unwrap();
        let found = repository.find_by_id(book.id).await.unwrap().unwrap();
        assert_eq!(found.description, "Revised");

        repository.delete(book.id).await.unwrap();
        assert!(repository.find_by_id(book.id).await.unwrap().is_none());
        assert!(matches!(
            repository.delete(book.id).await,
            Err(BookError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_missing_book() {
        let repository = repository().await;
        let missing = Book {
            id: BookId(99),
            title: BookTitle::new("Ghost".to_string()).unwrap(),
            author: String::new(),
            description: String::new(),
            created_at: Utc::now(),
        };

        assert!(matches!(
            repository.update(missing).await,
            Err(BookError::NotFound(_))
        ));
    }
}
