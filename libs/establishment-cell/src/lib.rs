// libs/establishment-cell/src/lib.rs
pub mod handlers;
pub mod memory;
pub mod models;
pub mod ports;
pub mod router;
pub mod services;

pub use handlers::EstablishmentState;
pub use memory::InMemoryEstablishmentSettingsRepository;
pub use models::{
    AppointmentSettings, BusinessCategoryType, EstablishmentSettings, SettingsError,
    SettingsTemplate,
};
pub use ports::EstablishmentSettingsRepository;
pub use router::establishment_routes;
pub use services::{SchedulingPolicyService, SettingsService};
