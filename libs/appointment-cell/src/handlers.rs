// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::error::AppError;

use crate::models::{
    AppointmentStatus, CreateAppointmentRequest, SchedulingError, UpdateAppointmentRequest,
};
use crate::services::booking::AppointmentBookingService;

#[derive(Clone)]
pub struct AppointmentState {
    pub booking_service: Arc<AppointmentBookingService>,
}

#[derive(Debug, Deserialize)]
pub struct ListQueryParams {
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQueryParams {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub status: Option<AppointmentStatus>,
}

fn map_scheduling_error(error: SchedulingError) -> AppError {
    match error {
        SchedulingError::NotFound(resource) => {
            AppError::NotFound(format!("{} not found", resource))
        }
        SchedulingError::Validation(message) => AppError::ValidationError(message),
        SchedulingError::Conflict(message) => AppError::Conflict(message),
        SchedulingError::InvalidStatusTransition { .. } => {
            AppError::UnprocessableEntity(error.to_string())
        }
        SchedulingError::DuplicateSlot => {
            AppError::Conflict("Time slot is not available".to_string())
        }
        SchedulingError::Storage(message) => AppError::Internal(message),
    }
}

#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<AppointmentState>,
    Json(request): Json<CreateAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let appointment = state
        .booking_service
        .book_appointment(request)
        .await
        .map_err(map_scheduling_error)?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment
    })))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<AppointmentState>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let appointment = state
        .booking_service
        .get_appointment(appointment_id)
        .await
        .map_err(map_scheduling_error)?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment
    })))
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<AppointmentState>,
    Query(params): Query<ListQueryParams>,
) -> Result<Json<Value>, AppError> {
    let page = state
        .booking_service
        .list_appointments(params.page.unwrap_or(1), params.limit.unwrap_or(20))
        .await
        .map_err(map_scheduling_error)?;

    Ok(Json(json!({
        "success": true,
        "appointments": page.items,
        "total": page.total,
        "page": page.page,
        "limit": page.limit
    })))
}

#[axum::debug_handler]
pub async fn get_client_appointments(
    State(state): State<AppointmentState>,
    Path(client_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let appointments = state
        .booking_service
        .list_by_client(client_id)
        .await
        .map_err(map_scheduling_error)?;

    Ok(Json(json!({
        "success": true,
        "appointments": appointments
    })))
}

#[axum::debug_handler]
pub async fn get_employee_appointments(
    State(state): State<AppointmentState>,
    Path(employee_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let appointments = state
        .booking_service
        .list_by_employee(employee_id)
        .await
        .map_err(map_scheduling_error)?;

    Ok(Json(json!({
        "success": true,
        "appointments": appointments
    })))
}

#[axum::debug_handler]
pub async fn search_establishment_appointments(
    State(state): State<AppointmentState>,
    Path(establishment_id): Path<Uuid>,
    Query(params): Query<SearchQueryParams>,
) -> Result<Json<Value>, AppError> {
    let appointments = state
        .booking_service
        .search_appointments(establishment_id, params.from, params.to, params.status)
        .await
        .map_err(map_scheduling_error)?;

    Ok(Json(json!({
        "success": true,
        "appointments": appointments
    })))
}

#[axum::debug_handler]
pub async fn update_appointment(
    State(state): State<AppointmentState>,
    Path(appointment_id): Path<Uuid>,
    Json(request): Json<UpdateAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let appointment = state
        .booking_service
        .update_appointment(appointment_id, request)
        .await
        .map_err(map_scheduling_error)?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment
    })))
}

#[axum::debug_handler]
pub async fn confirm_appointment(
    State(state): State<AppointmentState>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let appointment = state
        .booking_service
        .confirm_appointment(appointment_id)
        .await
        .map_err(map_scheduling_error)?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment
    })))
}

#[axum::debug_handler]
pub async fn start_appointment(
    State(state): State<AppointmentState>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let appointment = state
        .booking_service
        .start_appointment(appointment_id)
        .await
        .map_err(map_scheduling_error)?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment
    })))
}

#[axum::debug_handler]
pub async fn complete_appointment(
    State(state): State<AppointmentState>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let appointment = state
        .booking_service
        .complete_appointment(appointment_id)
        .await
        .map_err(map_scheduling_error)?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment
    })))
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<AppointmentState>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let appointment = state
        .booking_service
        .cancel_appointment(appointment_id)
        .await
        .map_err(map_scheduling_error)?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment
    })))
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(state): State<AppointmentState>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    state
        .booking_service
        .delete_appointment(appointment_id)
        .await
        .map_err(map_scheduling_error)?;

    Ok(Json(json!({
        "success": true,
        "message": "Appointment deleted"
    })))
}
