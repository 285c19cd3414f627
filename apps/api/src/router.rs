use std::sync::Arc;

use axum::{routing::get, Router};

use appointment_cell::router::appointment_routes;
use appointment_cell::{
    AppointmentBookingService, AppointmentState, InMemoryAppointmentRepository,
    InMemoryServiceRepository, InMemoryUserRepository, LogNotificationService,
};
use establishment_cell::router::establishment_routes;
use establishment_cell::{
    EstablishmentState, InMemoryEstablishmentSettingsRepository, SchedulingPolicyService,
    SettingsService,
};

/// Wire every cell over the in-memory stores and nest their routers.
pub fn create_router() -> Router {
    let settings_repository = Arc::new(InMemoryEstablishmentSettingsRepository::new());

    let establishment_state = EstablishmentState {
        settings_service: Arc::new(SettingsService::new(settings_repository.clone())),
    };

    let booking_service = AppointmentBookingService::new(
        Arc::new(InMemoryAppointmentRepository::new()),
        Arc::new(InMemoryServiceRepository::new()),
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(LogNotificationService::new()),
        Arc::new(SchedulingPolicyService::new(settings_repository)),
    );
    let appointment_state = AppointmentState {
        booking_service: Arc::new(booking_service),
    };

    Router::new()
        .route("/", get(|| async { "Agendly API is running!" }))
        .nest("/appointments", appointment_routes(appointment_state))
        .nest("/establishments", establishment_routes(establishment_state))
}
