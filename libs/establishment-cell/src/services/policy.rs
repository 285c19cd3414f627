// libs/establishment-cell/src/services/policy.rs
use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::models::{AppointmentSettings, SettingsError};
use crate::ports::EstablishmentSettingsRepository;

/// Resolves the scheduling policy in effect for an establishment.
///
/// Establishments without a stored settings record get the platform
/// defaults, so bookings never fail on missing configuration.
pub struct SchedulingPolicyService {
    repository: Arc<dyn EstablishmentSettingsRepository>,
}

impl SchedulingPolicyService {
    pub fn new(repository: Arc<dyn EstablishmentSettingsRepository>) -> Self {
        Self { repository }
    }

    pub async fn resolve_policy(
        &self,
        establishment_id: Uuid,
    ) -> Result<AppointmentSettings, SettingsError> {
        match self
            .repository
            .find_by_establishment_id(establishment_id)
            .await?
        {
            Some(settings) => Ok(settings.appointment_settings),
            None => {
                debug!(
                    establishment_id = %establishment_id,
                    "No stored settings, using default scheduling policy"
                );
                Ok(AppointmentSettings::default())
            }
        }
    }
}
