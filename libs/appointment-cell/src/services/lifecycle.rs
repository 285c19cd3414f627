// libs/appointment-cell/src/services/lifecycle.rs
use crate::models::{AppointmentStatus, SchedulingError};

/// Appointment status state machine, independent of any stored state.
pub struct AppointmentLifecycleService;

impl AppointmentLifecycleService {
    pub fn new() -> Self {
        Self
    }

    /// All statuses reachable in one step from `current`.
    pub fn valid_transitions(&self, current: AppointmentStatus) -> Vec<AppointmentStatus> {
        match current {
            AppointmentStatus::Scheduled => {
                vec![AppointmentStatus::Confirmed, AppointmentStatus::Cancelled]
            }
            AppointmentStatus::Confirmed => {
                vec![AppointmentStatus::InProgress, AppointmentStatus::Cancelled]
            }
            AppointmentStatus::InProgress => {
                vec![AppointmentStatus::Completed, AppointmentStatus::Cancelled]
            }
            AppointmentStatus::Completed | AppointmentStatus::Cancelled => vec![],
        }
    }

    pub fn validate_status_transition(
        &self,
        current: AppointmentStatus,
        next: AppointmentStatus,
    ) -> Result<(), SchedulingError> {
        if self.valid_transitions(current).contains(&next) {
            Ok(())
        } else {
            Err(SchedulingError::Validation(format!(
                "Invalid status transition from {} to {}",
                current, next
            )))
        }
    }

    /// Deletion is allowed for bookings that never ran: scheduled, confirmed
    /// or cancelled. In-progress and completed appointments are records of
    /// work done and must be kept.
    pub fn can_delete(&self, status: AppointmentStatus) -> bool {
        matches!(
            status,
            AppointmentStatus::Scheduled
                | AppointmentStatus::Confirmed
                | AppointmentStatus::Cancelled
        )
    }
}

impl Default for AppointmentLifecycleService {
    fn default() -> Self {
        Self::new()
    }
}
