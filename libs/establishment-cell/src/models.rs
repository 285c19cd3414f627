// libs/establishment-cell/src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ==============================================================================
// WORKING HOURS
// ==============================================================================

/// One entry per weekday, 0 = Sunday through 6 = Saturday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkingHours {
    pub day_of_week: u8,
    pub is_open: bool,
    pub open_time: String,
    pub close_time: String,
    pub break_start: Option<String>,
    pub break_end: Option<String>,
}

impl WorkingHours {
    pub fn closed(day_of_week: u8) -> Self {
        Self {
            day_of_week,
            is_open: false,
            open_time: "00:00".to_string(),
            close_time: "00:00".to_string(),
            break_start: None,
            break_end: None,
        }
    }

    pub fn open(day_of_week: u8, open_time: &str, close_time: &str) -> Self {
        Self {
            day_of_week,
            is_open: true,
            open_time: open_time.to_string(),
            close_time: close_time.to_string(),
            break_start: None,
            break_end: None,
        }
    }
}

// ==============================================================================
// SETTINGS SUB-OBJECTS
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentSettings {
    pub default_duration: i64,
    pub advance_booking_days: i64,
    pub requires_confirmation: bool,
    pub allows_cancellation: bool,
    pub cancellation_hours: i64,
    pub max_participants_per_slot: i64,
    pub buffer_time_between_appointments: i64,
}

impl Default for AppointmentSettings {
    fn default() -> Self {
        Self {
            default_duration: 60,
            advance_booking_days: 30,
            requires_confirmation: true,
            allows_cancellation: true,
            cancellation_hours: 24,
            max_participants_per_slot: 1,
            buffer_time_between_appointments: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentSettings {
    pub allows_online_payment: bool,
    pub requires_payment_upfront: bool,
    pub accepted_payment_methods: Vec<String>,
    pub cancellation_fee_percentage: i64,
}

impl Default for PaymentSettings {
    fn default() -> Self {
        Self {
            allows_online_payment: false,
            requires_payment_upfront: false,
            accepted_payment_methods: vec!["cash".to_string()],
            cancellation_fee_percentage: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationSettings {
    pub email_notifications: bool,
    pub sms_notifications: bool,
    pub whatsapp_notifications: bool,
    pub reminder_hours_before: Vec<i64>,
    pub notify_on_booking: bool,
    pub notify_on_cancellation: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email_notifications: true,
            sms_notifications: false,
            whatsapp_notifications: false,
            reminder_hours_before: vec![24, 2],
            notify_on_booking: true,
            notify_on_cancellation: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomFieldType {
    Text,
    Number,
    Boolean,
    Select,
    Date,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomField {
    pub id: Uuid,
    pub name: String,
    pub field_type: CustomFieldType,
    pub required: bool,
    pub options: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct IntegrationSettings {
    pub google_calendar: bool,
    pub whatsapp_business: bool,
    pub mercado_pago: bool,
    pub stripe: bool,
    #[serde(default)]
    pub custom_integrations: serde_json::Map<String, serde_json::Value>,
}

// ==============================================================================
// PARTIAL-UPDATE PATCHES
// ==============================================================================
// Each patch merges exactly one level deep: supplied fields overwrite the
// existing value, then the whole sub-object replaces the previous one.

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppointmentSettingsPatch {
    pub default_duration: Option<i64>,
    pub advance_booking_days: Option<i64>,
    pub requires_confirmation: Option<bool>,
    pub allows_cancellation: Option<bool>,
    pub cancellation_hours: Option<i64>,
    pub max_participants_per_slot: Option<i64>,
    pub buffer_time_between_appointments: Option<i64>,
}

impl AppointmentSettings {
    pub fn merged(&self, patch: &AppointmentSettingsPatch) -> Self {
        Self {
            default_duration: patch.default_duration.unwrap_or(self.default_duration),
            advance_booking_days: patch.advance_booking_days.unwrap_or(self.advance_booking_days),
            requires_confirmation: patch.requires_confirmation.unwrap_or(self.requires_confirmation),
            allows_cancellation: patch.allows_cancellation.unwrap_or(self.allows_cancellation),
            cancellation_hours: patch.cancellation_hours.unwrap_or(self.cancellation_hours),
            max_participants_per_slot: patch
                .max_participants_per_slot
                .unwrap_or(self.max_participants_per_slot),
            buffer_time_between_appointments: patch
                .buffer_time_between_appointments
                .unwrap_or(self.buffer_time_between_appointments),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentSettingsPatch {
    pub allows_online_payment: Option<bool>,
    pub requires_payment_upfront: Option<bool>,
    pub accepted_payment_methods: Option<Vec<String>>,
    pub cancellation_fee_percentage: Option<i64>,
}

impl PaymentSettings {
    pub fn merged(&self, patch: &PaymentSettingsPatch) -> Self {
        Self {
            allows_online_payment: patch.allows_online_payment.unwrap_or(self.allows_online_payment),
            requires_payment_upfront: patch
                .requires_payment_upfront
                .unwrap_or(self.requires_payment_upfront),
            accepted_payment_methods: patch
                .accepted_payment_methods
                .clone()
                .unwrap_or_else(|| self.accepted_payment_methods.clone()),
            cancellation_fee_percentage: patch
                .cancellation_fee_percentage
                .unwrap_or(self.cancellation_fee_percentage),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationSettingsPatch {
    pub email_notifications: Option<bool>,
    pub sms_notifications: Option<bool>,
    pub whatsapp_notifications: Option<bool>,
    pub reminder_hours_before: Option<Vec<i64>>,
    pub notify_on_booking: Option<bool>,
    pub notify_on_cancellation: Option<bool>,
}

impl NotificationSettings {
    pub fn merged(&self, patch: &NotificationSettingsPatch) -> Self {
        Self {
            email_notifications: patch.email_notifications.unwrap_or(self.email_notifications),
            sms_notifications: patch.sms_notifications.unwrap_or(self.sms_notifications),
            whatsapp_notifications: patch
                .whatsapp_notifications
                .unwrap_or(self.whatsapp_notifications),
            reminder_hours_before: patch
                .reminder_hours_before
                .clone()
                .unwrap_or_else(|| self.reminder_hours_before.clone()),
            notify_on_booking: patch.notify_on_booking.unwrap_or(self.notify_on_booking),
            notify_on_cancellation: patch
                .notify_on_cancellation
                .unwrap_or(self.notify_on_cancellation),
        }
    }
}

// ==============================================================================
// ESTABLISHMENT SETTINGS ENTITY
// ==============================================================================

/// Per-establishment scheduling configuration. Immutable; every update
/// produces a new instance with `updated_at` bumped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstablishmentSettings {
    pub id: Uuid,
    pub establishment_id: Uuid,
    pub working_hours: Vec<WorkingHours>,
    pub appointment_settings: AppointmentSettings,
    pub payment_settings: PaymentSettings,
    pub notification_settings: NotificationSettings,
    pub custom_fields: Vec<CustomField>,
    pub integrations: IntegrationSettings,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EstablishmentSettings {
    pub fn create(establishment_id: Uuid, request: CreateSettingsRequest) -> Self {
        let now = Utc::now();
        let defaults = AppointmentSettings::default();

        Self {
            id: Uuid::new_v4(),
            establishment_id,
            working_hours: request.working_hours.unwrap_or_default(),
            appointment_settings: defaults.merged(&request.appointment_settings.unwrap_or_default()),
            payment_settings: PaymentSettings::default()
                .merged(&request.payment_settings.unwrap_or_default()),
            notification_settings: NotificationSettings::default()
                .merged(&request.notification_settings.unwrap_or_default()),
            custom_fields: request.custom_fields.unwrap_or_default(),
            integrations: request.integrations.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn update_working_hours(&self, working_hours: Vec<WorkingHours>) -> Self {
        Self {
            working_hours,
            updated_at: Utc::now(),
            ..self.clone()
        }
    }

    pub fn update_appointment_settings(&self, settings: AppointmentSettings) -> Self {
        Self {
            appointment_settings: settings,
            updated_at: Utc::now(),
            ..self.clone()
        }
    }

    pub fn update_payment_settings(&self, settings: PaymentSettings) -> Self {
        Self {
            payment_settings: settings,
            updated_at: Utc::now(),
            ..self.clone()
        }
    }

    pub fn update_notification_settings(&self, settings: NotificationSettings) -> Self {
        Self {
            notification_settings: settings,
            updated_at: Utc::now(),
            ..self.clone()
        }
    }

    pub fn update_integrations(&self, integrations: IntegrationSettings) -> Self {
        Self {
            integrations,
            updated_at: Utc::now(),
            ..self.clone()
        }
    }
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateSettingsRequest {
    pub working_hours: Option<Vec<WorkingHours>>,
    pub appointment_settings: Option<AppointmentSettingsPatch>,
    pub payment_settings: Option<PaymentSettingsPatch>,
    pub notification_settings: Option<NotificationSettingsPatch>,
    pub custom_fields: Option<Vec<CustomField>>,
    pub integrations: Option<IntegrationSettings>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSettingsRequest {
    pub working_hours: Option<Vec<WorkingHours>>,
    pub appointment_settings: Option<AppointmentSettingsPatch>,
    pub payment_settings: Option<PaymentSettingsPatch>,
    pub notification_settings: Option<NotificationSettingsPatch>,
}

// ==============================================================================
// BUSINESS CATEGORIES AND SETTINGS TEMPLATES
// ==============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BusinessCategoryType {
    BeautyAesthetics,
    HealthWellness,
    ProfessionalServices,
    EducationTraining,
    Other,
}

impl fmt::Display for BusinessCategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusinessCategoryType::BeautyAesthetics => write!(f, "BEAUTY_AESTHETICS"),
            BusinessCategoryType::HealthWellness => write!(f, "HEALTH_WELLNESS"),
            BusinessCategoryType::ProfessionalServices => write!(f, "PROFESSIONAL_SERVICES"),
            BusinessCategoryType::EducationTraining => write!(f, "EDUCATION_TRAINING"),
            BusinessCategoryType::Other => write!(f, "OTHER"),
        }
    }
}

impl BusinessCategoryType {
    /// Known subcategories per vertical, mirroring the seeded catalog.
    pub fn subcategories(&self) -> &'static [&'static str] {
        match self {
            BusinessCategoryType::BeautyAesthetics => &[
                "Barbearia",
                "Salão de Beleza",
                "Estética Facial",
                "Manicure/Pedicure",
                "Depilação",
                "Massagem",
                "Sobrancelha",
                "Cílios",
            ],
            BusinessCategoryType::HealthWellness => &[
                "Consultório Médico",
                "Clínica Odontológica",
                "Fisioterapia",
                "Psicologia",
                "Nutrição",
                "Acupuntura",
                "Quiropraxia",
                "Terapia Ocupacional",
            ],
            BusinessCategoryType::ProfessionalServices => &[
                "Advocacia",
                "Contabilidade",
                "Consultoria Empresarial",
                "Arquitetura",
                "Engenharia",
                "Design",
                "Marketing",
                "Recursos Humanos",
            ],
            BusinessCategoryType::EducationTraining => &[
                "Aulas Particulares",
                "Cursos Técnicos",
                "Idiomas",
                "Música",
                "Esportes",
                "Informática",
                "Culinária",
                "Artesanato",
            ],
            BusinessCategoryType::Other => &[
                "Manutenção",
                "Limpeza",
                "Jardinagem",
                "Pet Shop",
                "Fotografia",
                "Eventos",
                "Transporte",
                "Delivery",
            ],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateTemplateRequest {
    pub business_type: BusinessCategoryType,
    pub subcategory: String,
}

/// Fully populated settings preset for one (business type, subcategory) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsTemplate {
    pub working_hours: Vec<WorkingHours>,
    pub appointment_settings: AppointmentSettings,
    pub payment_settings: PaymentSettings,
    pub notification_settings: NotificationSettings,
    pub recommended_services: Vec<String>,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    #[error("Settings not found for establishment")]
    NotFound,

    #[error("Settings already exist for this establishment")]
    AlreadyExists,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}
