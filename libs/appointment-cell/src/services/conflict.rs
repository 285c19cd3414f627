// libs/appointment-cell/src/services/conflict.rs
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::models::{Appointment, SchedulingError};
use crate::ports::AppointmentRepository;

/// Two half-open intervals `[start, end)` overlap iff each starts before the
/// other ends. Strict inequalities keep exactly-adjacent bookings legal.
pub fn intervals_overlap(
    start_a: DateTime<Utc>,
    end_a: DateTime<Utc>,
    start_b: DateTime<Utc>,
    end_b: DateTime<Utc>,
) -> bool {
    start_a < end_b && start_b < end_a
}

pub struct ConflictDetectionService {
    appointment_repository: Arc<dyn AppointmentRepository>,
}

impl ConflictDetectionService {
    pub fn new(appointment_repository: Arc<dyn AppointmentRepository>) -> Self {
        Self { appointment_repository }
    }

    /// Raw conflict query, buffer-agnostic.
    pub async fn find_conflicts(
        &self,
        employee_id: Uuid,
        scheduled_at: DateTime<Utc>,
        duration_minutes: i64,
    ) -> Result<Vec<Appointment>, SchedulingError> {
        self.appointment_repository
            .find_conflicts(employee_id, scheduled_at, duration_minutes)
            .await
    }

    /// Conflict check with the probe window padded by `buffer_minutes` on
    /// both sides. The buffer is policy; the stored appointments keep their
    /// true intervals. `exclude_appointment_id` drops the appointment being
    /// rescheduled from its own conflict set.
    pub async fn check_slot(
        &self,
        employee_id: Uuid,
        scheduled_at: DateTime<Utc>,
        duration_minutes: i64,
        buffer_minutes: i64,
        exclude_appointment_id: Option<Uuid>,
    ) -> Result<Vec<Appointment>, SchedulingError> {
        let buffer = buffer_minutes.max(0);
        let padded_start = match scheduled_at.checked_sub_signed(Duration::minutes(buffer)) {
            Some(start) => start,
            None => return Ok(Vec::new()),
        };
        let padded_duration = duration_minutes + 2 * buffer;

        let mut conflicts = self
            .appointment_repository
            .find_conflicts(employee_id, padded_start, padded_duration)
            .await?;

        if let Some(excluded) = exclude_appointment_id {
            conflicts.retain(|a| a.id != excluded);
        }

        if !conflicts.is_empty() {
            debug!(
                employee_id = %employee_id,
                scheduled_at = %scheduled_at,
                conflicts = conflicts.len(),
                "Slot check found conflicts"
            );
        }

        Ok(conflicts)
    }
}
