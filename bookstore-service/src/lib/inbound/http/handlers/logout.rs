use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::MessageResponseData;
use crate::inbound::http::middleware::bearer_token;
use crate::inbound::http::router::AppState;

/// Revokes the presented token until its own expiry.
///
/// Only that token is revoked; other sessions of the same user stay valid.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<ApiSuccess<MessageResponseData>, ApiError> {
    let token = bearer_token(&headers)
        .ok_or_else(|| ApiError::Unauthorized("No valid token provided".to_string()))?;

    let claims = state.authenticator.logout(token).await.map_err(|e| {
        tracing::warn!(error = %e, "Logout rejected");
        ApiError::Unauthorized("Invalid token".to_string())
    })?;

    tracing::info!(
        username = claims.subject().unwrap_or_default(),
        "User logged out"
    );

    Ok(ApiSuccess::new(
        StatusCode::OK,
        MessageResponseData::new("Logged out successfully"),
    ))
}
