use axum::http::StatusCode;

use super::ApiSuccess;
use super::MessageResponseData;

pub async fn root() -> ApiSuccess<MessageResponseData> {
    tracing::info!("Root endpoint accessed");
    ApiSuccess::new(
        StatusCode::OK,
        MessageResponseData::new("Welcome to BookStore API"),
    )
}
