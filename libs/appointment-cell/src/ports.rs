// libs/appointment-cell/src/ports.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{Appointment, AppointmentStatus, SchedulingError, Service, User};

/// Appointment persistence port. `create` is the exclusion boundary: an
/// implementation must reject an insert whose interval overlaps a
/// slot-blocking appointment for the same employee with `DuplicateSlot`.
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    async fn create(&self, appointment: Appointment) -> Result<Appointment, SchedulingError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Appointment>, SchedulingError>;

    async fn find_by_client(&self, client_id: Uuid) -> Result<Vec<Appointment>, SchedulingError>;

    async fn find_by_employee(
        &self,
        employee_id: Uuid,
    ) -> Result<Vec<Appointment>, SchedulingError>;

    async fn find_by_establishment(
        &self,
        establishment_id: Uuid,
    ) -> Result<Vec<Appointment>, SchedulingError>;

    async fn find_by_date_range(
        &self,
        establishment_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, SchedulingError>;

    async fn find_by_status(
        &self,
        establishment_id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Vec<Appointment>, SchedulingError>;

    /// Slot-blocking appointments of the employee whose interval overlaps
    /// `[scheduled_at, scheduled_at + duration_minutes)`. No ordering
    /// guarantee.
    async fn find_conflicts(
        &self,
        employee_id: Uuid,
        scheduled_at: DateTime<Utc>,
        duration_minutes: i64,
    ) -> Result<Vec<Appointment>, SchedulingError>;

    async fn update(&self, appointment: Appointment) -> Result<Appointment, SchedulingError>;

    async fn delete(&self, id: Uuid) -> Result<(), SchedulingError>;

    /// One-based page over all appointments; returns the page plus the
    /// total count.
    async fn list(
        &self,
        page: usize,
        limit: usize,
    ) -> Result<(Vec<Appointment>, usize), SchedulingError>;
}

#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Service>, SchedulingError>;

    async fn find_by_establishment(
        &self,
        establishment_id: Uuid,
    ) -> Result<Vec<Service>, SchedulingError>;

    async fn find_active_by_establishment(
        &self,
        establishment_id: Uuid,
    ) -> Result<Vec<Service>, SchedulingError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, SchedulingError>;
}

/// Outbound notification collaborator. Delivery failures must never fail
/// the booking; callers log and move on.
#[async_trait]
pub trait NotificationService: Send + Sync {
    async fn send_appointment_confirmation(
        &self,
        appointment: &Appointment,
        client_email: &str,
    ) -> Result<(), SchedulingError>;
}
