// libs/appointment-cell/src/lib.rs
pub mod handlers;
pub mod memory;
pub mod models;
pub mod ports;
pub mod router;
pub mod services;

pub use handlers::AppointmentState;
pub use memory::{
    InMemoryAppointmentRepository, InMemoryServiceRepository, InMemoryUserRepository,
    LogNotificationService,
};
pub use models::{
    Appointment, AppointmentStatus, CreateAppointmentRequest, SchedulingError, Service,
    UpdateAppointmentRequest, User, UserRole,
};
pub use ports::{
    AppointmentRepository, NotificationService, ServiceRepository, UserRepository,
};
pub use router::appointment_routes;
pub use services::{
    AppointmentBookingService, AppointmentLifecycleService, ConflictDetectionService,
};
