use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::book::errors::BookError;
use crate::domain::book::models::BookTitle;
use crate::domain::book::models::CreateBookCommand;
use crate::domain::book::ports::BookServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::BookData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn create_book(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    query: Result<Query<CreateBookRequest>, QueryRejection>,
) -> Result<ApiSuccess<BookMutationResponseData>, ApiError> {
    let Query(request) = query?;
    let command = request.try_into_command()?;

    let book = state.book_service.create_book(command).await?;
    tracing::info!(book_id = %book.id, username = %auth_user.username, "Book added");

    Ok(ApiSuccess::new(
        StatusCode::CREATED,
        BookMutationResponseData {
            message: "Book added successfully".to_string(),
            book: (&book).into(),
        },
    ))
}

/// Book fields, taken from the query string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateBookRequest {
    title: String,
    author: String,
    description: String,
}

impl CreateBookRequest {
    fn try_into_command(self) -> Result<CreateBookCommand, BookError> {
        Ok(CreateBookCommand {
            title: BookTitle::new(self.title)?,
            author: self.author,
            description: self.description,
        })
    }
}

/// Response for create and update: a message plus the stored book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookMutationResponseData {
    pub message: String,
    pub book: BookData,
}
