//! Signup and login JSON endpoints.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use crate::error::{ApiMessage, AppError, Result};
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Body of `POST /signup` and `POST /login`.
///
/// Both fields are optional here so a missing one becomes a 400 with a
/// message instead of a bare deserialization failure.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    fn into_parts(self) -> Result<(String, String)> {
        match (self.username, self.password) {
            (Some(username), Some(password)) if !password.is_empty() => Ok((username, password)),
            _ => Err(AppError::BadRequest(
                "Username and password are required".to_string(),
            )),
        }
    }
}

/// Successful login response.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

fn credentials(body: std::result::Result<Json<Credentials>, JsonRejection>) -> Result<Credentials> {
    body.map(|Json(c)| c).map_err(|e| {
        tracing::debug!(error = %e, "Rejected credentials body");
        AppError::BadRequest("Request body must be a JSON object".to_string())
    })
}

/// Register a new user.
///
/// Returns 201 on success and 400 if the user exists or a field is invalid.
pub async fn signup(
    State(state): State<AppState>,
    body: std::result::Result<Json<Credentials>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiMessage>)> {
    let (username, password) = credentials(body)?.into_parts()?;

    AuthService::new(state.users(), state.tokens())
        .signup(&username, &password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiMessage::new("User created successfully")),
    ))
}

/// Exchange a username and password for a bearer token.
pub async fn login(
    State(state): State<AppState>,
    body: std::result::Result<Json<Credentials>, JsonRejection>,
) -> Result<Json<TokenResponse>> {
    let (username, password) = credentials(body)?.into_parts()?;

    let token = AuthService::new(state.users(), state.tokens())
        .login(&username, &password)
        .await?;

    tracing::info!(username = %username, "User logged in");
    Ok(Json(TokenResponse { token }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_are_bad_requests() {
        let missing_password = Credentials {
            username: Some("alice".to_string()),
            password: None,
        };
        let empty_password = Credentials {
            username: Some("alice".to_string()),
            password: Some(String::new()),
        };

        assert!(matches!(
            missing_password.into_parts(),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            empty_password.into_parts(),
            Err(AppError::BadRequest(_))
        ));
    }
}
