use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::PasswordService;
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: u64,
}

/// POST /admin/login - exchange the admin password for a bearer token
pub async fn login(
    State(state): State<AppState>,
    input: Result<Json<LoginInput>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(input) = input?;

    let hash = state.admin_password_hash().to_owned();
    let valid = tokio::task::spawn_blocking(move || {
        PasswordService::verify_password(&input.password, &hash)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    if !valid {
        tracing::warn!("rejected admin login");
        return Err(AppError::Unauthorized("Invalid password".to_string()));
    }

    let jwt = state.jwt_service();
    let token = jwt.create_admin_token()?;
    tracing::info!("admin logged in");

    Ok(Json(LoginResponse {
        token,
        expires_in: jwt.expires_in_secs(),
    }))
}
