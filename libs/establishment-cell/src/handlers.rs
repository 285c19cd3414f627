// libs/establishment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;

use crate::models::{
    CreateSettingsRequest, GenerateTemplateRequest, SettingsError, UpdateSettingsRequest,
};
use crate::services::settings::SettingsService;
use crate::services::template::generate_validated_template;

#[derive(Clone)]
pub struct EstablishmentState {
    pub settings_service: Arc<SettingsService>,
}

fn map_settings_error(error: SettingsError) -> AppError {
    match error {
        SettingsError::NotFound => {
            AppError::NotFound("Settings not found for establishment".to_string())
        }
        SettingsError::AlreadyExists => {
            AppError::Conflict("Settings already exist for this establishment".to_string())
        }
        SettingsError::ValidationError(message) => AppError::ValidationError(message),
        SettingsError::StorageError(message) => AppError::Internal(message),
    }
}

#[axum::debug_handler]
pub async fn create_settings(
    State(state): State<EstablishmentState>,
    Path(establishment_id): Path<Uuid>,
    Json(request): Json<CreateSettingsRequest>,
) -> Result<Json<Value>, AppError> {
    let settings = state
        .settings_service
        .create_settings(establishment_id, request)
        .await
        .map_err(map_settings_error)?;

    Ok(Json(json!({
        "success": true,
        "settings": settings
    })))
}

#[axum::debug_handler]
pub async fn get_settings(
    State(state): State<EstablishmentState>,
    Path(establishment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let settings = state
        .settings_service
        .get_settings(establishment_id)
        .await
        .map_err(map_settings_error)?;

    Ok(Json(json!({
        "success": true,
        "settings": settings
    })))
}

#[axum::debug_handler]
pub async fn update_settings(
    State(state): State<EstablishmentState>,
    Path(establishment_id): Path<Uuid>,
    Json(request): Json<UpdateSettingsRequest>,
) -> Result<Json<Value>, AppError> {
    let settings = state
        .settings_service
        .update_settings(establishment_id, request)
        .await
        .map_err(map_settings_error)?;

    Ok(Json(json!({
        "success": true,
        "settings": settings
    })))
}

/// Template generation is pure and needs no stored state; the handler only
/// validates the subcategory against the catalog.
#[axum::debug_handler]
pub async fn generate_template(
    State(_state): State<EstablishmentState>,
    Json(request): Json<GenerateTemplateRequest>,
) -> Result<Json<Value>, AppError> {
    let template = generate_validated_template(request.business_type, &request.subcategory)
        .map_err(map_settings_error)?;

    Ok(Json(json!({
        "success": true,
        "template": template,
        "business_type": request.business_type,
        "subcategory": request.subcategory
    })))
}
