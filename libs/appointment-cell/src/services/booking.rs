// libs/appointment-cell/src/services/booking.rs
use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use establishment_cell::SchedulingPolicyService;

use crate::models::{
    Appointment, AppointmentPage, AppointmentStatus, CreateAppointmentRequest, SchedulingError,
    UpdateAppointmentRequest, User,
};
use crate::ports::{
    AppointmentRepository, NotificationService, ServiceRepository, UserRepository,
};
use crate::services::conflict::ConflictDetectionService;
use crate::services::lifecycle::AppointmentLifecycleService;

/// Booking orchestration: validation, policy resolution, conflict checking
/// and persistence for the appointment lifecycle.
///
/// Two exclusion layers guard against double booking: a per-employee async
/// lock serializes bookings within this process, and the repository's
/// `create` re-checks the slot under its own write guard.
pub struct AppointmentBookingService {
    appointment_repository: Arc<dyn AppointmentRepository>,
    service_repository: Arc<dyn ServiceRepository>,
    user_repository: Arc<dyn UserRepository>,
    notification_service: Arc<dyn NotificationService>,
    conflict_service: ConflictDetectionService,
    lifecycle_service: AppointmentLifecycleService,
    policy_service: Arc<SchedulingPolicyService>,
    employee_locks: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
}

impl AppointmentBookingService {
    pub fn new(
        appointment_repository: Arc<dyn AppointmentRepository>,
        service_repository: Arc<dyn ServiceRepository>,
        user_repository: Arc<dyn UserRepository>,
        notification_service: Arc<dyn NotificationService>,
        policy_service: Arc<SchedulingPolicyService>,
    ) -> Self {
        let conflict_service = ConflictDetectionService::new(appointment_repository.clone());
        Self {
            appointment_repository,
            service_repository,
            user_repository,
            notification_service,
            conflict_service,
            lifecycle_service: AppointmentLifecycleService::new(),
            policy_service,
            employee_locks: Mutex::new(HashMap::new()),
        }
    }

    async fn employee_lock(&self, employee_id: Uuid) -> Arc<Mutex<()>> {
        let mut locks = self.employee_locks.lock().await;
        locks.entry(employee_id).or_default().clone()
    }

    pub async fn book_appointment(
        &self,
        request: CreateAppointmentRequest,
    ) -> Result<Appointment, SchedulingError> {
        info!(
            client_id = %request.client_id,
            employee_id = %request.employee_id,
            scheduled_at = %request.scheduled_at,
            "Booking appointment"
        );

        // Step 1: the service must exist, belong to the establishment and be active.
        let service = self
            .service_repository
            .find_by_id(request.service_id)
            .await?
            .ok_or(SchedulingError::NotFound("Service"))?;

        if service.establishment_id != request.establishment_id {
            return Err(SchedulingError::Validation(
                "Service does not belong to this establishment".to_string(),
            ));
        }
        if !service.is_active {
            return Err(SchedulingError::Validation(
                "Service is not active".to_string(),
            ));
        }

        // Step 2: the employee must exist, hold the employee role and work here.
        let employee = self
            .user_repository
            .find_by_id(request.employee_id)
            .await?
            .filter(User::is_employee)
            .ok_or(SchedulingError::NotFound("Employee"))?;

        if employee.establishment_id != Some(request.establishment_id) {
            return Err(SchedulingError::Validation(
                "Employee does not work at this establishment".to_string(),
            ));
        }

        // Step 3: the client must exist and actually be a client.
        let client = self
            .user_repository
            .find_by_id(request.client_id)
            .await?
            .filter(User::is_client)
            .ok_or(SchedulingError::NotFound("Client"))?;

        // Step 4: no booking in the past.
        if request.scheduled_at <= Utc::now() {
            return Err(SchedulingError::Validation(
                "Appointment must be scheduled for a future date".to_string(),
            ));
        }

        // Step 5: buffer comes from the establishment's scheduling policy.
        let policy = self
            .policy_service
            .resolve_policy(request.establishment_id)
            .await
            .map_err(|e| SchedulingError::Storage(e.to_string()))?;
        let buffer_minutes = policy.buffer_time_between_appointments;

        // Step 6: conflict check and insert, serialized per employee.
        let lock = self.employee_lock(request.employee_id).await;
        let _guard = lock.lock().await;

        let conflicts = self
            .conflict_service
            .check_slot(
                request.employee_id,
                request.scheduled_at,
                service.duration_minutes,
                buffer_minutes,
                None,
            )
            .await?;
        if !conflicts.is_empty() {
            return Err(SchedulingError::Conflict(
                "Time slot is not available".to_string(),
            ));
        }

        let appointment = Appointment::create(
            request.client_id,
            request.service_id,
            request.establishment_id,
            request.employee_id,
            request.scheduled_at,
            service.duration_minutes,
            request.notes,
        );

        let saved = self
            .appointment_repository
            .create(appointment)
            .await
            .map_err(|e| match e {
                // Lost the race against a concurrent writer.
                SchedulingError::DuplicateSlot => {
                    SchedulingError::Conflict("Time slot is not available".to_string())
                }
                other => other,
            })?;
        drop(_guard);

        info!(appointment_id = %saved.id, "Appointment booked");

        // Step 7: notification is best effort.
        if let Err(e) = self
            .notification_service
            .send_appointment_confirmation(&saved, &client.email)
            .await
        {
            warn!(
                appointment_id = %saved.id,
                error = %e,
                "Failed to send appointment confirmation"
            );
        }

        Ok(saved)
    }

    pub async fn get_appointment(&self, id: Uuid) -> Result<Appointment, SchedulingError> {
        self.appointment_repository
            .find_by_id(id)
            .await?
            .ok_or(SchedulingError::NotFound("Appointment"))
    }

    pub async fn list_appointments(
        &self,
        page: usize,
        limit: usize,
    ) -> Result<AppointmentPage, SchedulingError> {
        let page = page.max(1);
        let limit = limit.clamp(1, 100);
        let (items, total) = self.appointment_repository.list(page, limit).await?;
        Ok(AppointmentPage { items, total, page, limit })
    }

    pub async fn list_by_client(
        &self,
        client_id: Uuid,
    ) -> Result<Vec<Appointment>, SchedulingError> {
        self.appointment_repository.find_by_client(client_id).await
    }

    pub async fn list_by_employee(
        &self,
        employee_id: Uuid,
    ) -> Result<Vec<Appointment>, SchedulingError> {
        self.appointment_repository.find_by_employee(employee_id).await
    }

    /// Establishment-scoped search. A full date window narrows by period
    /// and a bare status filter uses the status index; every supplied bound
    /// is honored, so half-open windows filter too. Results come back in
    /// chronological order.
    pub async fn search_appointments(
        &self,
        establishment_id: Uuid,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        status: Option<AppointmentStatus>,
    ) -> Result<Vec<Appointment>, SchedulingError> {
        let mut results = match (from, to, status) {
            (Some(from), Some(to), _) => {
                self.appointment_repository
                    .find_by_date_range(establishment_id, from, to)
                    .await?
            }
            (None, None, Some(status)) => {
                self.appointment_repository
                    .find_by_status(establishment_id, status)
                    .await?
            }
            _ => {
                self.appointment_repository
                    .find_by_establishment(establishment_id)
                    .await?
            }
        };

        if let Some(from) = from {
            results.retain(|a| a.scheduled_at >= from);
        }
        if let Some(to) = to {
            results.retain(|a| a.scheduled_at <= to);
        }
        if let Some(status) = status {
            results.retain(|a| a.status == status);
        }
        results.sort_by_key(|a| a.scheduled_at);
        Ok(results)
    }

    /// Reschedule and/or edit notes. A new time re-runs the conflict check
    /// with the appointment excluded from its own conflict set.
    pub async fn update_appointment(
        &self,
        id: Uuid,
        request: UpdateAppointmentRequest,
    ) -> Result<Appointment, SchedulingError> {
        let current = self.get_appointment(id).await?;
        let mut updated = current.clone();

        if let Some(new_time) = request.scheduled_at {
            let policy = self
                .policy_service
                .resolve_policy(current.establishment_id)
                .await
                .map_err(|e| SchedulingError::Storage(e.to_string()))?;

            let lock = self.employee_lock(current.employee_id).await;
            let _guard = lock.lock().await;

            let conflicts = self
                .conflict_service
                .check_slot(
                    current.employee_id,
                    new_time,
                    current.duration_minutes,
                    policy.buffer_time_between_appointments,
                    Some(current.id),
                )
                .await?;
            if !conflicts.is_empty() {
                return Err(SchedulingError::Conflict(
                    "Time slot is not available".to_string(),
                ));
            }

            updated = updated.reschedule(new_time)?;
            if let Some(notes) = request.notes {
                updated = updated.with_notes(Some(notes));
            }
            return self.appointment_repository.update(updated).await;
        }

        if let Some(notes) = request.notes {
            debug!(appointment_id = %id, "Updating appointment notes");
            updated = updated.with_notes(Some(notes));
            return self.appointment_repository.update(updated).await;
        }

        Ok(current)
    }

    pub async fn confirm_appointment(&self, id: Uuid) -> Result<Appointment, SchedulingError> {
        let appointment = self.get_appointment(id).await?;
        let confirmed = appointment.confirm()?;
        self.appointment_repository.update(confirmed).await
    }

    pub async fn start_appointment(&self, id: Uuid) -> Result<Appointment, SchedulingError> {
        let appointment = self.get_appointment(id).await?;
        let started = appointment.start()?;
        self.appointment_repository.update(started).await
    }

    pub async fn complete_appointment(&self, id: Uuid) -> Result<Appointment, SchedulingError> {
        let appointment = self.get_appointment(id).await?;
        let completed = appointment.complete()?;
        self.appointment_repository.update(completed).await
    }

    pub async fn cancel_appointment(&self, id: Uuid) -> Result<Appointment, SchedulingError> {
        let appointment = self.get_appointment(id).await?;
        let cancelled = appointment.cancel()?;
        let saved = self.appointment_repository.update(cancelled).await?;
        info!(appointment_id = %id, "Appointment cancelled");
        Ok(saved)
    }

    pub async fn delete_appointment(&self, id: Uuid) -> Result<(), SchedulingError> {
        let appointment = self.get_appointment(id).await?;
        if !self.lifecycle_service.can_delete(appointment.status) {
            return Err(SchedulingError::Validation(
                "Cannot delete appointments that are in progress or completed".to_string(),
            ));
        }
        self.appointment_repository.delete(id).await
    }
}
