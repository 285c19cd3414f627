// libs/appointment-cell/src/memory.rs
use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tracing::info;
use uuid::Uuid;

use crate::models::{Appointment, AppointmentStatus, SchedulingError, Service, User};
use crate::ports::{
    AppointmentRepository, NotificationService, ServiceRepository, UserRepository,
};

fn overlaps(
    appointment: &Appointment,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> bool {
    appointment.scheduled_at < end && appointment.scheduled_end_time() > start
}

// ==============================================================================
// APPOINTMENTS
// ==============================================================================

#[derive(Default)]
pub struct InMemoryAppointmentRepository {
    appointments: RwLock<HashMap<Uuid, Appointment>>,
}

impl InMemoryAppointmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock_poisoned() -> SchedulingError {
        SchedulingError::Storage("appointment store lock poisoned".to_string())
    }
}

#[async_trait]
impl AppointmentRepository for InMemoryAppointmentRepository {
    /// The overlap re-check and insert happen under one write guard, so two
    /// racing bookings for the same employee cannot both commit.
    async fn create(&self, appointment: Appointment) -> Result<Appointment, SchedulingError> {
        let mut appointments = self.appointments.write().map_err(|_| Self::lock_poisoned())?;

        let start = appointment.scheduled_at;
        let end = appointment.scheduled_end_time();
        let taken = appointments.values().any(|existing| {
            existing.employee_id == appointment.employee_id
                && existing.status.blocks_slot()
                && overlaps(existing, start, end)
        });
        if taken {
            return Err(SchedulingError::DuplicateSlot);
        }

        appointments.insert(appointment.id, appointment.clone());
        Ok(appointment)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Appointment>, SchedulingError> {
        let appointments = self.appointments.read().map_err(|_| Self::lock_poisoned())?;
        Ok(appointments.get(&id).cloned())
    }

    async fn find_by_client(&self, client_id: Uuid) -> Result<Vec<Appointment>, SchedulingError> {
        let appointments = self.appointments.read().map_err(|_| Self::lock_poisoned())?;
        Ok(appointments
            .values()
            .filter(|a| a.client_id == client_id)
            .cloned()
            .collect())
    }

    async fn find_by_employee(
        &self,
        employee_id: Uuid,
    ) -> Result<Vec<Appointment>, SchedulingError> {
        let appointments = self.appointments.read().map_err(|_| Self::lock_poisoned())?;
        Ok(appointments
            .values()
            .filter(|a| a.employee_id == employee_id)
            .cloned()
            .collect())
    }

    async fn find_by_establishment(
        &self,
        establishment_id: Uuid,
    ) -> Result<Vec<Appointment>, SchedulingError> {
        let appointments = self.appointments.read().map_err(|_| Self::lock_poisoned())?;
        Ok(appointments
            .values()
            .filter(|a| a.establishment_id == establishment_id)
            .cloned()
            .collect())
    }

    async fn find_by_date_range(
        &self,
        establishment_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, SchedulingError> {
        let appointments = self.appointments.read().map_err(|_| Self::lock_poisoned())?;
        Ok(appointments
            .values()
            .filter(|a| {
                a.establishment_id == establishment_id
                    && a.scheduled_at >= from
                    && a.scheduled_at <= to
            })
            .cloned()
            .collect())
    }

    async fn find_by_status(
        &self,
        establishment_id: Uuid,
        status: AppointmentStatus,
    ) -> Result<Vec<Appointment>, SchedulingError> {
        let appointments = self.appointments.read().map_err(|_| Self::lock_poisoned())?;
        Ok(appointments
            .values()
            .filter(|a| a.establishment_id == establishment_id && a.status == status)
            .cloned()
            .collect())
    }

    async fn find_conflicts(
        &self,
        employee_id: Uuid,
        scheduled_at: DateTime<Utc>,
        duration_minutes: i64,
    ) -> Result<Vec<Appointment>, SchedulingError> {
        // Degenerate probe windows cannot conflict with anything.
        let end = match scheduled_at.checked_add_signed(Duration::minutes(duration_minutes)) {
            Some(end) if end > scheduled_at => end,
            _ => return Ok(Vec::new()),
        };

        let appointments = self.appointments.read().map_err(|_| Self::lock_poisoned())?;
        Ok(appointments
            .values()
            .filter(|a| {
                a.employee_id == employee_id
                    && a.status.blocks_slot()
                    && overlaps(a, scheduled_at, end)
            })
            .cloned()
            .collect())
    }

    async fn update(&self, appointment: Appointment) -> Result<Appointment, SchedulingError> {
        let mut appointments = self.appointments.write().map_err(|_| Self::lock_poisoned())?;
        if !appointments.contains_key(&appointment.id) {
            return Err(SchedulingError::NotFound("Appointment"));
        }
        appointments.insert(appointment.id, appointment.clone());
        Ok(appointment)
    }

    async fn delete(&self, id: Uuid) -> Result<(), SchedulingError> {
        let mut appointments = self.appointments.write().map_err(|_| Self::lock_poisoned())?;
        appointments
            .remove(&id)
            .map(|_| ())
            .ok_or(SchedulingError::NotFound("Appointment"))
    }

    async fn list(
        &self,
        page: usize,
        limit: usize,
    ) -> Result<(Vec<Appointment>, usize), SchedulingError> {
        let appointments = self.appointments.read().map_err(|_| Self::lock_poisoned())?;
        let mut all: Vec<Appointment> = appointments.values().cloned().collect();
        all.sort_by_key(|a| a.scheduled_at);

        let total = all.len();
        // Offset arithmetic saturates so absurd page numbers yield an empty
        // page instead of overflowing.
        let offset = page.max(1).saturating_sub(1).saturating_mul(limit);
        let items = all.into_iter().skip(offset).take(limit).collect();
        Ok((items, total))
    }
}

// ==============================================================================
// SERVICES
// ==============================================================================

#[derive(Default)]
pub struct InMemoryServiceRepository {
    services: RwLock<HashMap<Uuid, Service>>,
}

impl InMemoryServiceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, service: Service) {
        if let Ok(mut services) = self.services.write() {
            services.insert(service.id, service);
        }
    }
}

#[async_trait]
impl ServiceRepository for InMemoryServiceRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Service>, SchedulingError> {
        let services = self
            .services
            .read()
            .map_err(|_| SchedulingError::Storage("service store lock poisoned".to_string()))?;
        Ok(services.get(&id).cloned())
    }

    async fn find_by_establishment(
        &self,
        establishment_id: Uuid,
    ) -> Result<Vec<Service>, SchedulingError> {
        let services = self
            .services
            .read()
            .map_err(|_| SchedulingError::Storage("service store lock poisoned".to_string()))?;
        Ok(services
            .values()
            .filter(|s| s.establishment_id == establishment_id)
            .cloned()
            .collect())
    }

    async fn find_active_by_establishment(
        &self,
        establishment_id: Uuid,
    ) -> Result<Vec<Service>, SchedulingError> {
        let services = self
            .services
            .read()
            .map_err(|_| SchedulingError::Storage("service store lock poisoned".to_string()))?;
        Ok(services
            .values()
            .filter(|s| s.establishment_id == establishment_id && s.is_active)
            .cloned()
            .collect())
    }
}

// ==============================================================================
// USERS
// ==============================================================================

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, user: User) {
        if let Ok(mut users) = self.users.write() {
            users.insert(user.id, user);
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, SchedulingError> {
        let users = self
            .users
            .read()
            .map_err(|_| SchedulingError::Storage("user store lock poisoned".to_string()))?;
        Ok(users.get(&id).cloned())
    }
}

// ==============================================================================
// NOTIFICATIONS
// ==============================================================================

/// Tracing-only delivery; stands in for a real mail/SMS integration.
#[derive(Default)]
pub struct LogNotificationService;

impl LogNotificationService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationService for LogNotificationService {
    async fn send_appointment_confirmation(
        &self,
        appointment: &Appointment,
        client_email: &str,
    ) -> Result<(), SchedulingError> {
        info!(
            appointment_id = %appointment.id,
            client_email = %client_email,
            scheduled_at = %appointment.scheduled_at,
            "Appointment confirmation notification"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn appointment_at(employee_id: Uuid, start: DateTime<Utc>, minutes: i64) -> Appointment {
        Appointment::create(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            employee_id,
            start,
            minutes,
            None,
        )
    }

    #[tokio::test]
    async fn create_rejects_overlapping_slot_for_same_employee() {
        let repository = InMemoryAppointmentRepository::new();
        let employee_id = Uuid::new_v4();
        let start = Utc::now() + Duration::days(1);

        repository
            .create(appointment_at(employee_id, start, 30))
            .await
            .unwrap();

        // 10:15 against an existing 10:00-10:30.
        let result = repository
            .create(appointment_at(employee_id, start + Duration::minutes(15), 30))
            .await;

        assert_matches!(result, Err(SchedulingError::DuplicateSlot));
    }

    #[tokio::test]
    async fn adjacent_slots_do_not_conflict() {
        let repository = InMemoryAppointmentRepository::new();
        let employee_id = Uuid::new_v4();
        let start = Utc::now() + Duration::days(1);

        repository
            .create(appointment_at(employee_id, start, 30))
            .await
            .unwrap();

        // Back-to-back booking starting exactly at the previous end.
        let result = repository
            .create(appointment_at(employee_id, start + Duration::minutes(30), 30))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn cancelled_appointments_free_their_slot() {
        let repository = InMemoryAppointmentRepository::new();
        let employee_id = Uuid::new_v4();
        let start = Utc::now() + Duration::days(1);

        let first = repository
            .create(appointment_at(employee_id, start, 30))
            .await
            .unwrap();
        repository.update(first.cancel().unwrap()).await.unwrap();

        let result = repository.create(appointment_at(employee_id, start, 30)).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn other_employees_are_unaffected() {
        let repository = InMemoryAppointmentRepository::new();
        let start = Utc::now() + Duration::days(1);

        repository
            .create(appointment_at(Uuid::new_v4(), start, 30))
            .await
            .unwrap();

        let conflicts = repository
            .find_conflicts(Uuid::new_v4(), start, 30)
            .await
            .unwrap();
        assert!(conflicts.is_empty());
    }

    #[tokio::test]
    async fn degenerate_probe_window_yields_no_conflicts() {
        let repository = InMemoryAppointmentRepository::new();
        let employee_id = Uuid::new_v4();
        let start = Utc::now() + Duration::days(1);

        repository
            .create(appointment_at(employee_id, start, 30))
            .await
            .unwrap();

        let conflicts = repository.find_conflicts(employee_id, start, 0).await.unwrap();
        assert!(conflicts.is_empty());
    }

    #[tokio::test]
    async fn list_pages_in_chronological_order() {
        let repository = InMemoryAppointmentRepository::new();
        let base = Utc::now() + Duration::days(1);
        for offset in 0..5 {
            repository
                .create(appointment_at(Uuid::new_v4(), base + Duration::hours(offset), 30))
                .await
                .unwrap();
        }

        let (first_page, total) = repository.list(1, 2).await.unwrap();
        assert_eq!(total, 5);
        assert_eq!(first_page.len(), 2);
        assert_eq!(first_page[0].scheduled_at, base);

        let (last_page, _) = repository.list(3, 2).await.unwrap();
        assert_eq!(last_page.len(), 1);
    }

    #[tokio::test]
    async fn list_tolerates_extreme_page_numbers() {
        let repository = InMemoryAppointmentRepository::new();
        repository
            .create(appointment_at(Uuid::new_v4(), Utc::now() + Duration::days(1), 30))
            .await
            .unwrap();

        let (items, total) = repository.list(usize::MAX, 20).await.unwrap();
        assert!(items.is_empty());
        assert_eq!(total, 1);

        // Page zero is treated as the first page.
        let (items, _) = repository.list(0, 20).await.unwrap();
        assert_eq!(items.len(), 1);
    }
}
