use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use infra::repos::ComplexFilter;
use serde::Serialize;

use crate::error::AppError;
use crate::routes::form::ComplexForm;
use crate::services::{
    catalog::{self, ComplexWithTerrains},
    uploads,
};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: i64,
}

/// GET /complexes - validated complexes with their courts
pub async fn list_public(
    State(state): State<AppState>,
) -> Result<Json<Vec<ComplexWithTerrains>>, AppError> {
    let complexes = catalog::list_with_terrains(&state, ComplexFilter::validated_only()).await?;
    Ok(Json(complexes))
}

/// POST /complexes - public submission, starts unvalidated
pub async fn create(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<CreatedResponse>, AppError> {
    let mut multipart = multipart?;
    let form = ComplexForm::read(&mut multipart).await?;

    let photo = match &form.photo {
        Some(upload) => Some(uploads::store_photo(state.upload_dir(), upload).await?),
        None => None,
    };

    let court_count = form.court_count;
    match state
        .complexes()
        .create_with_terrains(form.into_new_complex(photo.clone()))
        .await
    {
        Ok(id) => {
            tracing::info!(complex_id = id, court_count, "complex submitted");
            Ok(Json(CreatedResponse { id }))
        }
        Err(e) => {
            if let Some(name) = photo {
                uploads::discard_photo(state.upload_dir(), &name).await;
            }
            Err(e.into())
        }
    }
}
