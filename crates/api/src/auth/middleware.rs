use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::error::AppError;
use crate::state::AppState;

pub struct AuthMiddleware;

impl AuthMiddleware {
    /// Reject the request unless it carries a valid admin bearer token.
    pub async fn require_admin(
        State(state): State<AppState>,
        mut request: Request,
        next: Next,
    ) -> Result<Response, AppError> {
        let auth_header = request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|header| header.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Unauthorized("Invalid authorization header format".to_string())
        })?;

        let claims = state.jwt_service().verify_token(token)?;
        if !claims.is_admin() {
            return Err(AppError::Unauthorized("Admin role required".to_string()));
        }

        request.extensions_mut().insert(claims);

        Ok(next.run(request).await)
    }
}
