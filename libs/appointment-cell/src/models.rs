// libs/appointment-cell/src/models.rs
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ==============================================================================
// APPOINTMENT STATUS
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    /// Terminal states admit no further transition.
    pub fn is_terminal(&self) -> bool {
        matches!(self, AppointmentStatus::Completed | AppointmentStatus::Cancelled)
    }

    /// Whether an appointment in this status still occupies its time slot.
    pub fn blocks_slot(&self) -> bool {
        !self.is_terminal()
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "scheduled"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::InProgress => write!(f, "in_progress"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

// ==============================================================================
// APPOINTMENT ENTITY
// ==============================================================================

/// A booked time slot. Immutable; every transition produces a new value with
/// the same identity and a bumped `updated_at`.
///
/// `duration_minutes` is denormalized from the service at creation time so
/// the occupied interval is computable from the appointment row alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub client_id: Uuid,
    pub service_id: Uuid,
    pub establishment_id: Uuid,
    pub employee_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i64,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    pub fn create(
        client_id: Uuid,
        service_id: Uuid,
        establishment_id: Uuid,
        employee_id: Uuid,
        scheduled_at: DateTime<Utc>,
        duration_minutes: i64,
        notes: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            client_id,
            service_id,
            establishment_id,
            employee_id,
            scheduled_at,
            duration_minutes,
            status: AppointmentStatus::Scheduled,
            notes,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn scheduled_end_time(&self) -> DateTime<Utc> {
        self.scheduled_at + Duration::minutes(self.duration_minutes)
    }

    pub fn confirm(&self) -> Result<Self, SchedulingError> {
        if self.status != AppointmentStatus::Scheduled {
            return Err(SchedulingError::InvalidStatusTransition {
                from: self.status,
                operation: "confirm",
            });
        }
        Ok(self.with_status(AppointmentStatus::Confirmed))
    }

    pub fn start(&self) -> Result<Self, SchedulingError> {
        if self.status != AppointmentStatus::Confirmed {
            return Err(SchedulingError::InvalidStatusTransition {
                from: self.status,
                operation: "start",
            });
        }
        Ok(self.with_status(AppointmentStatus::InProgress))
    }

    pub fn complete(&self) -> Result<Self, SchedulingError> {
        if self.status != AppointmentStatus::InProgress {
            return Err(SchedulingError::InvalidStatusTransition {
                from: self.status,
                operation: "complete",
            });
        }
        Ok(self.with_status(AppointmentStatus::Completed))
    }

    pub fn cancel(&self) -> Result<Self, SchedulingError> {
        if self.status.is_terminal() {
            return Err(SchedulingError::InvalidStatusTransition {
                from: self.status,
                operation: "cancel",
            });
        }
        Ok(self.with_status(AppointmentStatus::Cancelled))
    }

    /// Move to a new time. The caller is responsible for conflict checking;
    /// the entity only enforces the status and future-date guards.
    pub fn reschedule(&self, new_time: DateTime<Utc>) -> Result<Self, SchedulingError> {
        if self.status.is_terminal() {
            return Err(SchedulingError::InvalidStatusTransition {
                from: self.status,
                operation: "reschedule",
            });
        }
        if new_time <= Utc::now() {
            return Err(SchedulingError::Validation(
                "Appointment must be scheduled for a future date".to_string(),
            ));
        }
        Ok(Self {
            scheduled_at: new_time,
            updated_at: Utc::now(),
            ..self.clone()
        })
    }

    pub fn with_notes(&self, notes: Option<String>) -> Self {
        Self {
            notes,
            updated_at: Utc::now(),
            ..self.clone()
        }
    }

    fn with_status(&self, status: AppointmentStatus) -> Self {
        Self {
            status,
            updated_at: Utc::now(),
            ..self.clone()
        }
    }
}

// ==============================================================================
// SERVICE ENTITY
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub duration_minutes: i64,
    pub price: f64,
    pub establishment_id: Uuid,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Service {
    pub fn create(
        name: String,
        description: String,
        duration_minutes: i64,
        price: f64,
        establishment_id: Uuid,
    ) -> Result<Self, SchedulingError> {
        if duration_minutes <= 0 {
            return Err(SchedulingError::Validation(
                "Service duration must be positive".to_string(),
            ));
        }
        if price <= 0.0 {
            return Err(SchedulingError::Validation(
                "Service price must be positive".to_string(),
            ));
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            description,
            duration_minutes,
            price,
            establishment_id,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn update_price(&self, new_price: f64) -> Result<Self, SchedulingError> {
        if new_price <= 0.0 {
            return Err(SchedulingError::Validation(
                "Service price must be positive".to_string(),
            ));
        }
        Ok(Self {
            price: new_price,
            updated_at: Utc::now(),
            ..self.clone()
        })
    }

    pub fn deactivate(&self) -> Self {
        Self {
            is_active: false,
            updated_at: Utc::now(),
            ..self.clone()
        }
    }
}

// ==============================================================================
// USER ENTITY
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Client,
    Employee,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub phone: String,
    pub role: UserRole,
    pub establishment_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Employees and admins belong to an establishment; clients do not.
    pub fn create(
        email: String,
        name: String,
        phone: String,
        role: UserRole,
        establishment_id: Option<Uuid>,
    ) -> Result<Self, SchedulingError> {
        match role {
            UserRole::Client => {
                if establishment_id.is_some() {
                    return Err(SchedulingError::Validation(
                        "Clients cannot belong to an establishment".to_string(),
                    ));
                }
            }
            UserRole::Employee | UserRole::Admin => {
                if establishment_id.is_none() {
                    return Err(SchedulingError::Validation(
                        "Employees and admins must belong to an establishment".to_string(),
                    ));
                }
            }
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            email,
            name,
            phone,
            role,
            establishment_id,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn is_client(&self) -> bool {
        self.role == UserRole::Client
    }

    pub fn is_employee(&self) -> bool {
        self.role == UserRole::Employee
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAppointmentRequest {
    pub client_id: Uuid,
    pub service_id: Uuid,
    pub establishment_id: Uuid,
    pub employee_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAppointmentRequest {
    pub scheduled_at: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Paged listing result.
#[derive(Debug, Clone, Serialize)]
pub struct AppointmentPage {
    pub items: Vec<Appointment>,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum SchedulingError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Cannot {operation} appointment in status {from}")]
    InvalidStatusTransition {
        from: AppointmentStatus,
        operation: &'static str,
    },

    #[error("Time slot was taken by a concurrent booking")]
    DuplicateSlot,

    #[error("Storage error: {0}")]
    Storage(String),
}
