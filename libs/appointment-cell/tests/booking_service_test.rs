// Booking flow against a mocked Supabase.

use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use appointment_cell::models::{
    AppointmentError, AppointmentStatus, BookAppointmentRequest, UpdateStatusRequest,
};
use appointment_cell::services::booking::BookingService;
use shared_utils::test_utils::TestConfig;

fn service_against(mock_server: &MockServer) -> BookingService {
    let config = TestConfig::with_mock_server(&mock_server.uri()).to_app_config();
    BookingService::new(&config)
}

fn appointment_row(id: &str, patient_id: &str, doctor_id: &str, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "patient_id": patient_id,
        "doctor_id": doctor_id,
        "appointment_time": "2026-08-03T09:30:00Z",
        "status": status,
        "notes": null,
        "created_at": "2026-08-01T00:00:00Z"
    })
}

#[tokio::test]
async fn booking_inserts_a_pending_appointment_at_the_slot_time() {
    let mock_server = MockServer::start().await;
    let patient_id = Uuid::new_v4().to_string();
    let doctor_id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path("/rest/v1/appointments"))
        .and(body_partial_json(json!({
            "status": "pending",
            "appointment_time": "2026-08-03T09:30:00+00:00"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            appointment_row(
                &Uuid::new_v4().to_string(),
                &patient_id,
                &doctor_id.to_string(),
                "pending"
            )
        ])))
        .mount(&mock_server)
        .await;

    let service = service_against(&mock_server);
    let request = BookAppointmentRequest {
        doctor_id,
        date: "2026-08-03".parse().unwrap(),
        slot: "09:30".to_string(),
        notes: None,
    };

    let appointment = service
        .book_appointment(&patient_id, request, "token")
        .await
        .unwrap();

    assert_eq!(appointment.status, AppointmentStatus::Pending);
}

#[tokio::test]
async fn unparseable_slot_is_rejected_before_any_request() {
    let mock_server = MockServer::start().await;
    let service = service_against(&mock_server);

    let request = BookAppointmentRequest {
        doctor_id: Uuid::new_v4(),
        date: "2026-08-03".parse().unwrap(),
        slot: "half past nine".to_string(),
        notes: None,
    };

    let result = service
        .book_appointment(&Uuid::new_v4().to_string(), request, "token")
        .await;

    assert!(matches!(result, Err(AppointmentError::Validation(_))));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn illegal_transition_is_refused() {
    let mock_server = MockServer::start().await;
    let appointment_id = Uuid::new_v4().to_string();

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            appointment_row(
                &appointment_id,
                &Uuid::new_v4().to_string(),
                &Uuid::new_v4().to_string(),
                "cancelled"
            )
        ])))
        .mount(&mock_server)
        .await;

    let service = service_against(&mock_server);
    let result = service
        .update_status(
            &appointment_id,
            UpdateStatusRequest {
                status: AppointmentStatus::Confirmed,
            },
            "token",
        )
        .await;

    assert!(matches!(
        result,
        Err(AppointmentError::IllegalTransition { .. })
    ));
}

#[tokio::test]
async fn confirming_a_pending_appointment_patches_the_row() {
    let mock_server = MockServer::start().await;
    let appointment_id = Uuid::new_v4().to_string();
    let patient_id = Uuid::new_v4().to_string();
    let doctor_id = Uuid::new_v4().to_string();

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            appointment_row(&appointment_id, &patient_id, &doctor_id, "pending")
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/appointments"))
        .and(body_partial_json(json!({ "status": "confirmed" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            appointment_row(&appointment_id, &patient_id, &doctor_id, "confirmed")
        ])))
        .mount(&mock_server)
        .await;

    let service = service_against(&mock_server);
    let appointment = service
        .update_status(
            &appointment_id,
            UpdateStatusRequest {
                status: AppointmentStatus::Confirmed,
            },
            "token",
        )
        .await
        .unwrap();

    assert_eq!(appointment.status, AppointmentStatus::Confirmed);
}

#[tokio::test]
async fn listing_decodes_rows_in_time_order() {
    let mock_server = MockServer::start().await;
    let patient_id = Uuid::new_v4().to_string();

    Mock::given(method("GET"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            appointment_row(
                &Uuid::new_v4().to_string(),
                &patient_id,
                &Uuid::new_v4().to_string(),
                "pending"
            ),
            appointment_row(
                &Uuid::new_v4().to_string(),
                &patient_id,
                &Uuid::new_v4().to_string(),
                "confirmed"
            ),
        ])))
        .mount(&mock_server)
        .await;

    let service = service_against(&mock_server);
    let appointments = service.list_for_patient(&patient_id, "token").await.unwrap();

    assert_eq!(appointments.len(), 2);
}
