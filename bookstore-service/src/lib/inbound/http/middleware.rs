use auth::AuthenticationError;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type carrying the subject the Auth Gate accepted.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub username: String,
}

/// Auth Gate for protected routes.
///
/// Rejects revoked tokens first, then tokens that fail validation, and
/// otherwise exposes the token subject to the handler as [`AuthenticatedUser`].
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers())
        .map(str::to_owned)
        .ok_or_else(|| ApiError::Unauthorized("Not authenticated".to_string()))?;

    let username = state
        .authenticator
        .authorize(&token)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Token rejected");
            match e {
                AuthenticationError::TokenRevoked => ApiError::Unauthorized(
                    "Token has been revoked. Please log in again.".to_string(),
                ),
                _ => ApiError::Unauthorized("Invalid authentication credentials.".to_string()),
            }
        })?;

    req.extensions_mut()
        .insert(AuthenticatedUser { username });

    Ok(next.run(req).await)
}

/// Token from an `Authorization: Bearer <token>` header, if well formed.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
