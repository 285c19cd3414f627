// libs/establishment-cell/src/memory.rs
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{EstablishmentSettings, SettingsError};
use crate::ports::EstablishmentSettingsRepository;

/// In-memory settings store keyed by establishment id.
#[derive(Default)]
pub struct InMemoryEstablishmentSettingsRepository {
    settings: RwLock<HashMap<Uuid, EstablishmentSettings>>,
}

impl InMemoryEstablishmentSettingsRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EstablishmentSettingsRepository for InMemoryEstablishmentSettingsRepository {
    async fn find_by_establishment_id(
        &self,
        establishment_id: Uuid,
    ) -> Result<Option<EstablishmentSettings>, SettingsError> {
        Ok(self.settings.read().await.get(&establishment_id).cloned())
    }

    async fn create(
        &self,
        settings: EstablishmentSettings,
    ) -> Result<EstablishmentSettings, SettingsError> {
        let mut store = self.settings.write().await;
        if store.contains_key(&settings.establishment_id) {
            return Err(SettingsError::AlreadyExists);
        }
        store.insert(settings.establishment_id, settings.clone());
        Ok(settings)
    }

    async fn update(
        &self,
        settings: EstablishmentSettings,
    ) -> Result<EstablishmentSettings, SettingsError> {
        let mut store = self.settings.write().await;
        if !store.contains_key(&settings.establishment_id) {
            return Err(SettingsError::NotFound);
        }
        store.insert(settings.establishment_id, settings.clone());
        Ok(settings)
    }
}
