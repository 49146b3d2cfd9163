use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::{JsonRejection, PathRejection},
        Multipart, Path, State,
    },
    Json,
};
use infra::repos::ComplexFilter;
use serde::Deserialize;

use crate::error::AppError;
use crate::routes::{form::ComplexForm, SuccessResponse};
use crate::services::{
    catalog::{self, ComplexWithTerrains},
    uploads,
};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateTerrainInput {
    #[serde(alias = "numero")]
    pub number: u32,
}

fn complex_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("complex {id}"))
}

fn terrain_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("terrain {id}"))
}

/// GET /admin/complexes - every complex, validated or not
pub async fn list_all(
    State(state): State<AppState>,
) -> Result<Json<Vec<ComplexWithTerrains>>, AppError> {
    let complexes = catalog::list_with_terrains(&state, ComplexFilter::default()).await?;
    Ok(Json(complexes))
}

/// PATCH /admin/complexes/:id/valider
pub async fn validate_complex(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<SuccessResponse>, AppError> {
    let Path(id) = id?;

    if !state.complexes().validate(id).await? {
        return Err(complex_not_found(id));
    }

    tracing::info!(complex_id = id, "complex validated");
    Ok(Json(SuccessResponse::ok()))
}

/// PUT /admin/complexes/:id - replace editable fields, photo only when a new file is sent
pub async fn update_complex(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<SuccessResponse>, AppError> {
    let Path(id) = id?;
    let mut multipart = multipart?;
    let form = ComplexForm::read(&mut multipart).await?;

    // Looked up before writing the new file so a failure here leaves nothing behind.
    let previous_photo = match &form.photo {
        Some(_) => state.complexes().get(id).await?.and_then(|c| c.photo),
        None => None,
    };

    let photo = match &form.photo {
        Some(upload) => Some(uploads::store_photo(state.upload_dir(), upload).await?),
        None => None,
    };

    let updated = state
        .complexes()
        .update(id, form.into_update(photo.clone()))
        .await;

    match updated {
        Ok(true) => {
            if let Some(old) = previous_photo {
                uploads::discard_photo(state.upload_dir(), &old).await;
            }
            tracing::info!(complex_id = id, new_photo = photo.is_some(), "complex updated");
            Ok(Json(SuccessResponse::ok()))
        }
        outcome => {
            if let Some(name) = photo {
                uploads::discard_photo(state.upload_dir(), &name).await;
            }
            match outcome {
                Err(e) => Err(e.into()),
                Ok(_) => Err(complex_not_found(id)),
            }
        }
    }
}

/// DELETE /admin/complexes/:id - removes the courts first, then the complex
pub async fn delete_complex(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<SuccessResponse>, AppError> {
    let Path(id) = id?;

    if !state.complexes().delete(id).await? {
        return Err(complex_not_found(id));
    }

    tracing::info!(complex_id = id, "complex deleted");
    Ok(Json(SuccessResponse::ok()))
}

/// PUT /admin/terrains/:id - renumber a court
pub async fn update_terrain(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    input: Result<Json<UpdateTerrainInput>, JsonRejection>,
) -> Result<Json<SuccessResponse>, AppError> {
    let Path(id) = id?;
    let Json(input) = input?;
    if input.number == 0 {
        return Err(AppError::BadRequest("number must be positive".to_string()));
    }

    if !state.terrains().update_number(id, input.number).await? {
        return Err(terrain_not_found(id));
    }

    Ok(Json(SuccessResponse::ok()))
}

/// DELETE /admin/terrains/:id
pub async fn delete_terrain(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<SuccessResponse>, AppError> {
    let Path(id) = id?;

    if !state.terrains().delete(id).await? {
        return Err(terrain_not_found(id));
    }

    tracing::info!(terrain_id = id, "terrain deleted");
    Ok(Json(SuccessResponse::ok()))
}
