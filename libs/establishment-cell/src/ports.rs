// libs/establishment-cell/src/ports.rs
use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{EstablishmentSettings, SettingsError};

/// Repository contract for per-establishment settings. At most one record
/// exists per establishment.
#[async_trait]
pub trait EstablishmentSettingsRepository: Send + Sync {
    async fn find_by_establishment_id(
        &self,
        establishment_id: Uuid,
    ) -> Result<Option<EstablishmentSettings>, SettingsError>;

    async fn create(
        &self,
        settings: EstablishmentSettings,
    ) -> Result<EstablishmentSettings, SettingsError>;

    async fn update(
        &self,
        settings: EstablishmentSettings,
    ) -> Result<EstablishmentSettings, SettingsError>;
}
