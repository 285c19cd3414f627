// libs/establishment-cell/src/services/settings.rs
use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{
    CreateSettingsRequest, EstablishmentSettings, SettingsError, UpdateSettingsRequest,
};
use crate::ports::EstablishmentSettingsRepository;

/// Establishment settings management: one settings record per establishment,
/// created with defaults and updated by one-level-deep merges.
pub struct SettingsService {
    repository: Arc<dyn EstablishmentSettingsRepository>,
}

impl SettingsService {
    pub fn new(repository: Arc<dyn EstablishmentSettingsRepository>) -> Self {
        Self { repository }
    }

    /// Create settings for an establishment. Fails with `AlreadyExists` when
    /// a record is already present; any field omitted from the request takes
    /// its default.
    pub async fn create_settings(
        &self,
        establishment_id: Uuid,
        request: CreateSettingsRequest,
    ) -> Result<EstablishmentSettings, SettingsError> {
        info!(
            establishment_id = %establishment_id,
            "Creating establishment settings"
        );

        if self
            .repository
            .find_by_establishment_id(establishment_id)
            .await?
            .is_some()
        {
            return Err(SettingsError::AlreadyExists);
        }

        let settings = EstablishmentSettings::create(establishment_id, request);
        self.repository.create(settings.clone()).await?;

        info!(
            settings_id = %settings.id,
            establishment_id = %establishment_id,
            "Establishment settings created"
        );

        Ok(settings)
    }

    pub async fn get_settings(
        &self,
        establishment_id: Uuid,
    ) -> Result<EstablishmentSettings, SettingsError> {
        self.repository
            .find_by_establishment_id(establishment_id)
            .await?
            .ok_or(SettingsError::NotFound)
    }

    /// Apply a partial update. Patched sub-objects merge one level deep;
    /// working hours, when supplied, replace the stored list wholesale.
    pub async fn update_settings(
        &self,
        establishment_id: Uuid,
        request: UpdateSettingsRequest,
    ) -> Result<EstablishmentSettings, SettingsError> {
        let current = self
            .repository
            .find_by_establishment_id(establishment_id)
            .await?
            .ok_or(SettingsError::NotFound)?;

        let mut updated = current.clone();

        if let Some(working_hours) = request.working_hours {
            debug!(
                establishment_id = %establishment_id,
                entries = working_hours.len(),
                "Replacing working hours"
            );
            updated = updated.update_working_hours(working_hours);
        }

        if let Some(patch) = request.appointment_settings {
            updated = updated
                .update_appointment_settings(updated.appointment_settings.merged(&patch));
        }

        if let Some(patch) = request.payment_settings {
            updated = updated.update_payment_settings(updated.payment_settings.merged(&patch));
        }

        if let Some(patch) = request.notification_settings {
            updated =
                updated.update_notification_settings(updated.notification_settings.merged(&patch));
        }

        self.repository.update(updated.clone()).await?;

        info!(
            establishment_id = %establishment_id,
            "Establishment settings updated"
        );

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryEstablishmentSettingsRepository;
    use crate::models::AppointmentSettingsPatch;
    use assert_matches::assert_matches;

    fn service() -> SettingsService {
        SettingsService::new(Arc::new(InMemoryEstablishmentSettingsRepository::new()))
    }

    #[tokio::test]
    async fn create_applies_defaults_when_request_is_empty() {
        let service = service();
        let establishment_id = Uuid::new_v4();

        let settings = service
            .create_settings(establishment_id, CreateSettingsRequest::default())
            .await
            .unwrap();

        assert_eq!(settings.appointment_settings.default_duration, 60);
        assert_eq!(settings.appointment_settings.cancellation_hours, 24);
        assert_eq!(settings.appointment_settings.buffer_time_between_appointments, 0);
        assert_eq!(settings.payment_settings.accepted_payment_methods, vec!["cash"]);
        assert_eq!(settings.notification_settings.reminder_hours_before, vec![24, 2]);
    }

    #[tokio::test]
    async fn create_rejects_second_record_for_same_establishment() {
        let service = service();
        let establishment_id = Uuid::new_v4();

        service
            .create_settings(establishment_id, CreateSettingsRequest::default())
            .await
            .unwrap();

        let result = service
            .create_settings(establishment_id, CreateSettingsRequest::default())
            .await;

        assert_matches!(result, Err(SettingsError::AlreadyExists));
    }

    #[tokio::test]
    async fn update_merges_one_level_and_preserves_untouched_fields() {
        let service = service();
        let establishment_id = Uuid::new_v4();

        service
            .create_settings(establishment_id, CreateSettingsRequest::default())
            .await
            .unwrap();

        let updated = service
            .update_settings(
                establishment_id,
                UpdateSettingsRequest {
                    appointment_settings: Some(AppointmentSettingsPatch {
                        buffer_time_between_appointments: Some(15),
                        ..Default::default()
                    }),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.appointment_settings.buffer_time_between_appointments, 15);
        // Untouched fields keep their previous values.
        assert_eq!(updated.appointment_settings.default_duration, 60);
        assert_eq!(updated.appointment_settings.cancellation_hours, 24);
        assert!(updated.updated_at >= updated.created_at);
    }

    #[tokio::test]
    async fn update_unknown_establishment_is_not_found() {
        let service = service();

        let result = service
            .update_settings(Uuid::new_v4(), UpdateSettingsRequest::default())
            .await;

        assert_matches!(result, Err(SettingsError::NotFound));
    }
}
