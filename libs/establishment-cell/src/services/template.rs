// libs/establishment-cell/src/services/template.rs
use crate::models::{
    AppointmentSettings, BusinessCategoryType, NotificationSettings, PaymentSettings,
    SettingsError, SettingsTemplate, WorkingHours,
};

/// Generate a fully populated settings template for a business vertical.
///
/// This is a pure lookup over the closed set of (type, subcategory) pairs;
/// unknown subcategories within a known vertical fall back to that
/// vertical's generic preset.
pub fn generate_settings_template(
    business_type: BusinessCategoryType,
    subcategory: &str,
) -> SettingsTemplate {
    match business_type {
        BusinessCategoryType::BeautyAesthetics => beauty_template(subcategory),
        BusinessCategoryType::HealthWellness => health_template(subcategory),
        BusinessCategoryType::ProfessionalServices => professional_template(),
        BusinessCategoryType::EducationTraining => education_template(),
        BusinessCategoryType::Other => generic_template(),
    }
}

/// Template generation with subcategory membership validation against the
/// seeded catalog.
pub fn generate_validated_template(
    business_type: BusinessCategoryType,
    subcategory: &str,
) -> Result<SettingsTemplate, SettingsError> {
    if !business_type.subcategories().contains(&subcategory) {
        return Err(SettingsError::ValidationError(format!(
            "Invalid subcategory '{}' for category {}",
            subcategory, business_type
        )));
    }
    Ok(generate_settings_template(business_type, subcategory))
}

fn beauty_template(subcategory: &str) -> SettingsTemplate {
    let working_hours = standard_working_hours(9, 18);

    let (appointment_settings, recommended_services) = match subcategory {
        "Salão de Beleza" => (
            AppointmentSettings {
                default_duration: 90,
                advance_booking_days: 30,
                requires_confirmation: true,
                allows_cancellation: true,
                cancellation_hours: 24,
                max_participants_per_slot: 1,
                buffer_time_between_appointments: 15,
            },
            vec![
                "Corte e Escova".to_string(),
                "Coloração".to_string(),
                "Tratamento Capilar".to_string(),
                "Penteado".to_string(),
            ],
        ),
        "Barbearia" => (
            AppointmentSettings {
                default_duration: 45,
                advance_booking_days: 14,
                requires_confirmation: false,
                allows_cancellation: true,
                cancellation_hours: 2,
                max_participants_per_slot: 1,
                buffer_time_between_appointments: 10,
            },
            vec![
                "Corte Masculino".to_string(),
                "Barba".to_string(),
                "Bigode".to_string(),
                "Sobrancelha".to_string(),
            ],
        ),
        _ => (
            AppointmentSettings::default(),
            vec!["Serviço de Beleza".to_string()],
        ),
    };

    SettingsTemplate {
        working_hours,
        appointment_settings,
        payment_settings: PaymentSettings {
            allows_online_payment: true,
            requires_payment_upfront: false,
            accepted_payment_methods: payment_methods(&["cash", "card", "pix"]),
            cancellation_fee_percentage: 0,
        },
        notification_settings: NotificationSettings {
            email_notifications: true,
            sms_notifications: true,
            whatsapp_notifications: true,
            reminder_hours_before: vec![24, 2],
            notify_on_booking: true,
            notify_on_cancellation: true,
        },
        recommended_services,
    }
}

fn health_template(subcategory: &str) -> SettingsTemplate {
    let working_hours = standard_working_hours(8, 17);

    let (appointment_settings, recommended_services) = match subcategory {
        "Consultório Médico" => (
            AppointmentSettings {
                default_duration: 30,
                advance_booking_days: 60,
                requires_confirmation: true,
                allows_cancellation: true,
                cancellation_hours: 24,
                max_participants_per_slot: 1,
                buffer_time_between_appointments: 10,
            },
            vec![
                "Consulta Médica".to_string(),
                "Exame Clínico".to_string(),
                "Retorno".to_string(),
            ],
        ),
        "Clínica Odontológica" => (
            AppointmentSettings {
                default_duration: 60,
                advance_booking_days: 30,
                requires_confirmation: true,
                allows_cancellation: true,
                cancellation_hours: 48,
                max_participants_per_slot: 1,
                buffer_time_between_appointments: 15,
            },
            vec![
                "Consulta Odontológica".to_string(),
                "Limpeza".to_string(),
                "Tratamento".to_string(),
                "Emergência".to_string(),
            ],
        ),
        _ => (AppointmentSettings::default(), vec!["Consulta".to_string()]),
    };

    SettingsTemplate {
        working_hours,
        appointment_settings,
        payment_settings: PaymentSettings {
            allows_online_payment: true,
            requires_payment_upfront: true,
            accepted_payment_methods: payment_methods(&["cash", "card", "pix"]),
            cancellation_fee_percentage: 50,
        },
        notification_settings: NotificationSettings {
            email_notifications: true,
            sms_notifications: true,
            whatsapp_notifications: false,
            reminder_hours_before: vec![48, 24],
            notify_on_booking: true,
            notify_on_cancellation: true,
        },
        recommended_services,
    }
}

fn professional_template() -> SettingsTemplate {
    SettingsTemplate {
        working_hours: standard_working_hours(9, 17),
        appointment_settings: AppointmentSettings {
            default_duration: 60,
            advance_booking_days: 30,
            requires_confirmation: true,
            allows_cancellation: true,
            cancellation_hours: 24,
            max_participants_per_slot: 1,
            buffer_time_between_appointments: 15,
        },
        payment_settings: PaymentSettings {
            allows_online_payment: true,
            requires_payment_upfront: true,
            accepted_payment_methods: payment_methods(&["cash", "card", "pix"]),
            cancellation_fee_percentage: 25,
        },
        notification_settings: NotificationSettings {
            email_notifications: true,
            sms_notifications: false,
            whatsapp_notifications: true,
            reminder_hours_before: vec![24],
            notify_on_booking: true,
            notify_on_cancellation: true,
        },
        recommended_services: vec![
            "Consultoria".to_string(),
            "Atendimento Profissional".to_string(),
        ],
    }
}

fn education_template() -> SettingsTemplate {
    SettingsTemplate {
        working_hours: standard_working_hours(8, 18),
        appointment_settings: AppointmentSettings {
            default_duration: 120,
            advance_booking_days: 60,
            requires_confirmation: true,
            allows_cancellation: true,
            cancellation_hours: 48,
            max_participants_per_slot: 10,
            buffer_time_between_appointments: 30,
        },
        payment_settings: PaymentSettings {
            allows_online_payment: true,
            requires_payment_upfront: true,
            accepted_payment_methods: payment_methods(&["cash", "card", "pix"]),
            cancellation_fee_percentage: 30,
        },
        notification_settings: NotificationSettings {
            email_notifications: true,
            sms_notifications: true,
            whatsapp_notifications: true,
            reminder_hours_before: vec![48, 24],
            notify_on_booking: true,
            notify_on_cancellation: true,
        },
        recommended_services: vec![
            "Aula Individual".to_string(),
            "Curso".to_string(),
            "Workshop".to_string(),
            "Treinamento".to_string(),
        ],
    }
}

fn generic_template() -> SettingsTemplate {
    SettingsTemplate {
        working_hours: standard_working_hours(9, 17),
        appointment_settings: AppointmentSettings::default(),
        payment_settings: PaymentSettings::default(),
        notification_settings: NotificationSettings {
            email_notifications: true,
            sms_notifications: false,
            whatsapp_notifications: false,
            reminder_hours_before: vec![24],
            notify_on_booking: true,
            notify_on_cancellation: true,
        },
        recommended_services: vec!["Serviço Padrão".to_string()],
    }
}

/// Weekday schedule with the given opening window; Sunday (0) and
/// Saturday (6) closed.
fn standard_working_hours(start_hour: u8, end_hour: u8) -> Vec<WorkingHours> {
    (0..7u8)
        .map(|day_of_week| {
            let is_weekend = day_of_week == 0 || day_of_week == 6;
            if is_weekend {
                WorkingHours::closed(day_of_week)
            } else {
                WorkingHours::open(
                    day_of_week,
                    &format!("{:02}:00", start_hour),
                    &format!("{:02}:00", end_hour),
                )
            }
        })
        .collect()
}

fn payment_methods(methods: &[&str]) -> Vec<String> {
    methods.iter().map(|m| m.to_string()).collect()
}
