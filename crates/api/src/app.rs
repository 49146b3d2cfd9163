use std::time::Duration;

use axum::{
    extract::{DefaultBodyLimit, State},
    middleware,
    routing::{get, patch, post, put},
    Router,
};
use tower_http::{
    cors::CorsLayer, services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer,
};

use crate::auth::AuthMiddleware;
use crate::error::AppError;
use crate::routes::{admin, complexes, login, terrains};
use crate::state::AppState;

/// Build the Axum router: public endpoints, bearer-protected admin endpoints
/// and static serving of uploaded photos.
pub fn build_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/complexes", get(admin::list_all))
        .route(
            "/complexes/:id",
            put(admin::update_complex).delete(admin::delete_complex),
        )
        .route("/complexes/:id/valider", patch(admin::validate_complex))
        .route(
            "/terrains/:id",
            put(admin::update_terrain).delete(admin::delete_terrain),
        )
        // Everything above needs a token; login below must stay reachable.
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            AuthMiddleware::require_admin,
        ))
        .route("/login", post(login::login));

    let uploads = ServeDir::new(state.upload_dir().as_path());
    let body_limit = state.upload_max_bytes();

    Router::new()
        .route("/health", get(health))
        .route(
            "/complexes",
            get(complexes::list_public).post(complexes::create),
        )
        .route("/terrains/:id/occupation", post(terrains::toggle_occupation))
        .nest("/admin", admin_routes)
        .nest_service("/uploads", uploads)
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(CorsLayer::permissive())
}

/// Liveness + quick DB probe.
async fn health(State(state): State<AppState>) -> Result<&'static str, AppError> {
    infra::db::ping(&state.db).await?;
    Ok("ok")
}
