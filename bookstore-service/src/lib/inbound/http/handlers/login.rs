use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub async fn login(
    State(state): State<AppState>,
    query: Result<Query<LoginRequest>, QueryRejection>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let Query(request) = query?;

    let username = Username::new(request.username)
        .map_err(|_| ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    let user = state
        .user_service
        .get_user_by_username(&username)
        .await
        .map_err(|e| match e {
            UserError::NotFoundByUsername(_) => {
                ApiError::Unauthorized(INVALID_CREDENTIALS.to_string())
            }
            _ => ApiError::from(e),
        })?;

    let session = state
        .authenticator
        .login(user.username.as_str(), &request.password, &user.password_hash)
        .await
        .map_err(|e| match e {
            auth::AuthenticationError::InvalidCredentials => {
                tracing::warn!(username = %user.username, "Login rejected");
                ApiError::Unauthorized(INVALID_CREDENTIALS.to_string())
            }
            other => ApiError::InternalServerError(format!("Login failed: {}", other)),
        })?;

    tracing::info!(username = %user.username, "User logged in");

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            access_token: session.access_token,
            token_type: session.token_type.to_string(),
        },
    ))
}

/// Login parameters, taken from the query string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub access_token: String,
    pub token_type: String,
}
