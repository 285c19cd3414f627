// libs/establishment-cell/src/services/mod.rs
pub mod policy;
pub mod settings;
pub mod template;

pub use policy::SchedulingPolicyService;
pub use settings::SettingsService;
pub use template::{generate_settings_template, generate_validated_template};
