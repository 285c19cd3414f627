// libs/appointment-cell/src/router.rs
use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::handlers::{self, AppointmentState};

pub fn appointment_routes(state: AppointmentState) -> Router {
    Router::new()
        .route("/", post(handlers::book_appointment))
        .route("/", get(handlers::list_appointments))
        .route("/{appointment_id}", get(handlers::get_appointment))
        .route("/{appointment_id}", patch(handlers::update_appointment))
        .route("/{appointment_id}", delete(handlers::delete_appointment))
        .route("/{appointment_id}/confirm", post(handlers::confirm_appointment))
        .route("/{appointment_id}/start", post(handlers::start_appointment))
        .route("/{appointment_id}/complete", post(handlers::complete_appointment))
        .route("/{appointment_id}/cancel", post(handlers::cancel_appointment))
        .route(
            "/establishments/{establishment_id}",
            get(handlers::search_establishment_appointments),
        )
        .route("/clients/{client_id}", get(handlers::get_client_appointments))
        .route("/employees/{employee_id}", get(handlers::get_employee_appointments))
        .with_state(state)
}
