use axum::extract::rejection::QueryRejection;
use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::create_book::BookMutationResponseData;
use crate::domain::book::errors::BookError;
use crate::domain::book::models::BookId;
use crate::domain::book::models::BookTitle;
use crate::domain::book::models::UpdateBookCommand;
use crate::domain::book::ports::BookServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Partial update: absent query parameters leave the stored value unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    pub description: Option<String>,
}

impl UpdateBookRequest {
    fn try_into_command(self) -> Result<UpdateBookCommand, BookError> {
        let title = self.title.map(BookTitle::new).transpose()?;

        Ok(UpdateBookCommand {
            title,
            author: self.author,
            description: self.description,
        })
    }
}

pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    query: Result<Query<UpdateBookRequest>, QueryRejection>,
) -> Result<ApiSuccess<BookMutationResponseData>, ApiError> {
    let book_id = BookId::from_string(&id).map_err(BookError::from)?;
    let Query(request) = query?;
    let command = request.try_into_command()?;

    state
        .book_service
        .update_book(book_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref book| {
            ApiSuccess::new(
                StatusCode::OK,
                BookMutationResponseData {
                    message: "Book updated successfully".to_string(),
                    book: book.into(),
                },
            )
        })
}
