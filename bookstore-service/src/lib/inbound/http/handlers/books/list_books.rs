use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use crate::domain::book::models::Pagination;
use crate::domain::book::ports::BookServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::BookData;
use crate::inbound::http::router::AppState;

pub async fn list_books(
    State(state): State<AppState>,
    query: Result<Query<ListBooksQuery>, QueryRejection>,
) -> Result<ApiSuccess<Vec<BookData>>, ApiError> {
    let Query(params) = query?;

    state
        .book_service
        .list_books(Pagination::new(params.skip, params.limit))
        .await
        .map_err(ApiError::from)
        .map(|books| ApiSuccess::new(StatusCode::OK, books.iter().map(BookData::from).collect()))
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListBooksQuery {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}
