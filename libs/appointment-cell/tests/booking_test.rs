// libs/appointment-cell/tests/booking_test.rs
//
// End-to-end booking flows over the in-memory store.

use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use uuid::Uuid;

use appointment_cell::{
    Appointment, AppointmentBookingService, AppointmentStatus, CreateAppointmentRequest,
    InMemoryAppointmentRepository, InMemoryServiceRepository, InMemoryUserRepository,
    LogNotificationService, SchedulingError, Service, UpdateAppointmentRequest, User, UserRole,
};
use establishment_cell::{
    InMemoryEstablishmentSettingsRepository, SchedulingPolicyService, SettingsService,
};
use establishment_cell::models::{
    AppointmentSettingsPatch, CreateSettingsRequest,
};

struct TestEnv {
    booking: AppointmentBookingService,
    settings: SettingsService,
    services: Arc<InMemoryServiceRepository>,
    establishment_id: Uuid,
    client_id: Uuid,
    employee_id: Uuid,
    service_id: Uuid,
}

fn build_env() -> TestEnv {
    let appointments = Arc::new(InMemoryAppointmentRepository::new());
    let services = Arc::new(InMemoryServiceRepository::new());
    let users = Arc::new(InMemoryUserRepository::new());
    let settings_repository = Arc::new(InMemoryEstablishmentSettingsRepository::new());

    let establishment_id = Uuid::new_v4();

    let service = Service::create(
        "Corte Masculino".to_string(),
        "Corte com máquina e tesoura".to_string(),
        30,
        50.0,
        establishment_id,
    )
    .unwrap();
    let service_id = service.id;
    services.insert(service);

    let employee = User::create(
        "barber@example.com".to_string(),
        "João".to_string(),
        "+55 11 98888-0001".to_string(),
        UserRole::Employee,
        Some(establishment_id),
    )
    .unwrap();
    let employee_id = employee.id;
    users.insert(employee);

    let client = User::create(
        "client@example.com".to_string(),
        "Maria".to_string(),
        "+55 11 98888-0002".to_string(),
        UserRole::Client,
        None,
    )
    .unwrap();
    let client_id = client.id;
    users.insert(client);

    let booking = AppointmentBookingService::new(
        appointments,
        services.clone(),
        users,
        Arc::new(LogNotificationService::new()),
        Arc::new(SchedulingPolicyService::new(settings_repository.clone())),
    );

    TestEnv {
        booking,
        settings: SettingsService::new(settings_repository),
        services,
        establishment_id,
        client_id,
        employee_id,
        service_id,
    }
}

impl TestEnv {
    fn request_at(&self, scheduled_at: chrono::DateTime<Utc>) -> CreateAppointmentRequest {
        CreateAppointmentRequest {
            client_id: self.client_id,
            service_id: self.service_id,
            establishment_id: self.establishment_id,
            employee_id: self.employee_id,
            scheduled_at,
            notes: None,
        }
    }

    async fn book_at(&self, scheduled_at: chrono::DateTime<Utc>) -> Result<Appointment, SchedulingError> {
        self.booking.book_appointment(self.request_at(scheduled_at)).await
    }
}

#[tokio::test]
async fn overlapping_booking_is_rejected() {
    let env = build_env();
    let start = Utc::now() + Duration::days(1);

    env.book_at(start).await.unwrap();

    // 10:15 against an existing 10:00-10:30 with a 30-minute service.
    let result = env.book_at(start + Duration::minutes(15)).await;
    assert_matches!(
        result,
        Err(SchedulingError::Conflict(message)) if message == "Time slot is not available"
    );
}

#[tokio::test]
async fn adjacent_booking_is_accepted_at_zero_buffer() {
    let env = build_env();
    let start = Utc::now() + Duration::days(1);

    env.book_at(start).await.unwrap();

    let result = env.book_at(start + Duration::minutes(30)).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn buffer_policy_blocks_adjacent_booking() {
    let env = build_env();
    env.settings
        .create_settings(
            env.establishment_id,
            CreateSettingsRequest {
                appointment_settings: Some(AppointmentSettingsPatch {
                    buffer_time_between_appointments: Some(10),
                    ..Default::default()
                }),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let start = Utc::now() + Duration::days(1);
    env.book_at(start).await.unwrap();

    let result = env.book_at(start + Duration::minutes(30)).await;
    assert_matches!(result, Err(SchedulingError::Conflict(_)));
}

#[tokio::test]
async fn cancelled_slot_can_be_rebooked() {
    let env = build_env();
    let start = Utc::now() + Duration::days(1);

    let first = env.book_at(start).await.unwrap();
    env.booking.cancel_appointment(first.id).await.unwrap();

    let second = env.book_at(start).await.unwrap();
    assert_eq!(second.status, AppointmentStatus::Scheduled);
    assert_ne!(second.id, first.id);
}

#[tokio::test]
async fn booking_in_the_past_is_rejected() {
    let env = build_env();
    let result = env.book_at(Utc::now() - Duration::hours(1)).await;
    assert_matches!(
        result,
        Err(SchedulingError::Validation(message))
            if message == "Appointment must be scheduled for a future date"
    );
}

#[tokio::test]
async fn service_from_another_establishment_is_rejected() {
    let env = build_env();
    let start = Utc::now() + Duration::days(1);

    let mut request = env.request_at(start);
    request.establishment_id = Uuid::new_v4();

    let result = env.booking.book_appointment(request).await;
    assert_matches!(
        result,
        Err(SchedulingError::Validation(message))
            if message == "Service does not belong to this establishment"
    );
}

#[tokio::test]
async fn deactivated_service_cannot_be_booked() {
    use appointment_cell::ServiceRepository;

    let env = build_env();
    let service = env
        .services
        .find_by_id(env.service_id)
        .await
        .unwrap()
        .unwrap();
    env.services.insert(service.deactivate());

    let result = env.book_at(Utc::now() + Duration::days(1)).await;
    assert_matches!(
        result,
        Err(SchedulingError::Validation(message)) if message == "Service is not active"
    );
}

#[tokio::test]
async fn unknown_service_and_users_are_not_found() {
    let env = build_env();
    let start = Utc::now() + Duration::days(1);

    let mut request = env.request_at(start);
    request.service_id = Uuid::new_v4();
    assert_matches!(
        env.booking.book_appointment(request).await,
        Err(SchedulingError::NotFound("Service"))
    );

    let mut request = env.request_at(start);
    request.employee_id = Uuid::new_v4();
    assert_matches!(
        env.booking.book_appointment(request).await,
        Err(SchedulingError::NotFound("Employee"))
    );

    let mut request = env.request_at(start);
    request.client_id = Uuid::new_v4();
    assert_matches!(
        env.booking.book_appointment(request).await,
        Err(SchedulingError::NotFound("Client"))
    );
}

#[tokio::test]
async fn client_booked_as_employee_is_rejected() {
    let env = build_env();
    let start = Utc::now() + Duration::days(1);

    // The client id does not hold the employee role.
    let mut request = env.request_at(start);
    request.employee_id = env.client_id;

    let result = env.booking.book_appointment(request).await;
    assert_matches!(result, Err(SchedulingError::NotFound("Employee")));
}

#[tokio::test]
async fn booked_appointment_round_trips_through_the_store() {
    let env = build_env();
    let start = Utc::now() + Duration::days(1);

    let mut request = env.request_at(start);
    request.notes = Some("Cliente prefere corte mais curto nas laterais".to_string());

    let booked = env.booking.book_appointment(request).await.unwrap();
    let reloaded = env.booking.get_appointment(booked.id).await.unwrap();

    // Field-for-field equality, not just identity.
    assert_eq!(reloaded, booked);
}

#[tokio::test]
async fn lifecycle_flows_through_the_store() {
    let env = build_env();
    let start = Utc::now() + Duration::days(1);

    let booked = env.book_at(start).await.unwrap();
    let confirmed = env.booking.confirm_appointment(booked.id).await.unwrap();
    assert_eq!(confirmed.status, AppointmentStatus::Confirmed);

    let started = env.booking.start_appointment(booked.id).await.unwrap();
    assert_eq!(started.status, AppointmentStatus::InProgress);

    let completed = env.booking.complete_appointment(booked.id).await.unwrap();
    assert_eq!(completed.status, AppointmentStatus::Completed);

    // The stored row reflects the terminal status.
    let fetched = env.booking.get_appointment(booked.id).await.unwrap();
    assert_eq!(fetched.status, AppointmentStatus::Completed);
}

#[tokio::test]
async fn completing_a_scheduled_appointment_fails_without_mutation() {
    let env = build_env();
    let start = Utc::now() + Duration::days(1);

    let booked = env.book_at(start).await.unwrap();
    let result = env.booking.complete_appointment(booked.id).await;
    assert_matches!(result, Err(SchedulingError::InvalidStatusTransition { .. }));

    let fetched = env.booking.get_appointment(booked.id).await.unwrap();
    assert_eq!(fetched.status, AppointmentStatus::Scheduled);
}

#[tokio::test]
async fn reschedule_excludes_itself_from_conflicts() {
    let env = build_env();
    let start = Utc::now() + Duration::days(1);

    let booked = env.book_at(start).await.unwrap();

    // Shift by 15 minutes into its own old window.
    let updated = env
        .booking
        .update_appointment(
            booked.id,
            UpdateAppointmentRequest {
                scheduled_at: Some(start + Duration::minutes(15)),
                notes: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.scheduled_at, start + Duration::minutes(15));
}

#[tokio::test]
async fn delete_is_rejected_for_completed_appointments() {
    let env = build_env();
    let start = Utc::now() + Duration::days(1);

    let booked = env.book_at(start).await.unwrap();
    env.booking.confirm_appointment(booked.id).await.unwrap();
    env.booking.start_appointment(booked.id).await.unwrap();
    env.booking.complete_appointment(booked.id).await.unwrap();

    let result = env.booking.delete_appointment(booked.id).await;
    assert_matches!(
        result,
        Err(SchedulingError::Validation(message))
            if message == "Cannot delete appointments that are in progress or completed"
    );
}

#[tokio::test]
async fn search_filters_by_period_and_status() {
    let env = build_env();
    let day_one = Utc::now() + Duration::days(1);
    let day_three = Utc::now() + Duration::days(3);

    let early = env.book_at(day_one).await.unwrap();
    let late = env.book_at(day_three).await.unwrap();
    env.booking.confirm_appointment(late.id).await.unwrap();

    // Period narrows to the first booking.
    let in_window = env
        .booking
        .search_appointments(
            env.establishment_id,
            Some(day_one - Duration::hours(1)),
            Some(day_one + Duration::hours(1)),
            None,
        )
        .await
        .unwrap();
    assert_eq!(in_window.len(), 1);
    assert_eq!(in_window[0].id, early.id);

    // Status alone finds the confirmed one.
    let confirmed = env
        .booking
        .search_appointments(
            env.establishment_id,
            None,
            None,
            Some(AppointmentStatus::Confirmed),
        )
        .await
        .unwrap();
    assert_eq!(confirmed.len(), 1);
    assert_eq!(confirmed[0].id, late.id);

    // A lone lower bound still filters.
    let from_only = env
        .booking
        .search_appointments(
            env.establishment_id,
            Some(day_three - Duration::hours(1)),
            None,
            None,
        )
        .await
        .unwrap();
    assert_eq!(from_only.len(), 1);
    assert_eq!(from_only[0].id, late.id);

    // A lone upper bound too.
    let to_only = env
        .booking
        .search_appointments(
            env.establishment_id,
            None,
            Some(day_one + Duration::hours(1)),
            None,
        )
        .await
        .unwrap();
    assert_eq!(to_only.len(), 1);
    assert_eq!(to_only[0].id, early.id);
}

#[tokio::test]
async fn concurrent_bookings_for_the_same_slot_admit_exactly_one() {
    let env = Arc::new(build_env());
    let start = Utc::now() + Duration::days(1);

    let mut handles = Vec::new();
    for _ in 0..8 {
        let env = env.clone();
        handles.push(tokio::spawn(async move { env.book_at(start).await }));
    }

    let mut accepted = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            accepted += 1;
        }
    }
    assert_eq!(accepted, 1);
}
