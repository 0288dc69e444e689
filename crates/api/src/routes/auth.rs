//! Authentication route handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::middleware::{CurrentUser, RequireAuth};
use crate::response::ApiResponse;
use crate::routes::extract::ApiJson;
use crate::state::AppState;

/// Login request body. Both fields are checked for presence before the
/// credential verifier runs.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Authenticated user as exposed over the API.
#[derive(Debug, Serialize)]
pub struct UserView {
    pub username: String,
}

/// Successful login payload.
#[derive(Debug, Serialize)]
pub struct LoginData {
    pub token: String,
    pub user: UserView,
}

/// Token validation payload.
#[derive(Debug, Serialize)]
pub struct ValidateData {
    pub valid: bool,
    pub user: CurrentUser,
}

/// `POST /api/auth/login` - verify credentials and issue a token.
pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginData>>, ApiError> {
    let (Some(username), Some(password)) = (
        body.username.filter(|u| !u.is_empty()),
        body.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(ApiError::BadRequest(
            "Username and password are required".to_string(),
        ));
    };

    let login = state.auth().login(&username, &password)?;

    Ok(Json(ApiResponse::with_data(LoginData {
        token: login.token,
        user: UserView {
            username: login.username,
        },
    })))
}

/// `GET /api/auth/validate` - report whether the presented token is valid.
///
/// Reaching the handler at all means the guard accepted the token.
pub async fn validate(RequireAuth(user): RequireAuth) -> Json<ApiResponse<ValidateData>> {
    Json(ApiResponse::with_data(ValidateData { valid: true, user }))
}
