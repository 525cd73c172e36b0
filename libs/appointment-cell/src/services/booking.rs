use chrono::{NaiveTime, Utc};
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, info};

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{
    Appointment, AppointmentError, AppointmentStatus, BookAppointmentRequest, UpdateStatusRequest,
};

pub struct BookingService {
    supabase: SupabaseClient,
}

impl BookingService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    /// Book a slot: compose the timestamp from date + "HH:MM" slot and
    /// insert a pending appointment. Slot legality against the doctor's
    /// schedule is the caller's concern; the slot string itself must parse.
    pub async fn book_appointment(
        &self,
        patient_id: &str,
        request: BookAppointmentRequest,
        auth_token: &str,
    ) -> Result<Appointment, AppointmentError> {
        let slot_time = NaiveTime::parse_from_str(&request.slot, "%H:%M")
            .map_err(|_| AppointmentError::Validation(format!("Invalid slot: {}", request.slot)))?;

        let appointment_time = request.date.and_time(slot_time).and_utc();

        info!(
            "Booking appointment for patient {} with doctor {} at {}",
            patient_id, request.doctor_id, appointment_time
        );

        let appointment_data = json!({
            "patient_id": patient_id,
            "doctor_id": request.doctor_id,
            "appointment_time": appointment_time.to_rfc3339(),
            "status": AppointmentStatus::Pending.as_str(),
            "notes": request.notes,
            "created_at": Utc::now().to_rfc3339()
        });

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Prefer",
            reqwest::header::HeaderValue::from_static("return=representation"),
        );

        let result: Vec<Value> = self
            .supabase
            .request_with_headers(
                Method::POST,
                "/rest/v1/appointments",
                Some(auth_token),
                Some(appointment_data),
                Some(headers),
            )
            .await
            .map_err(|e| AppointmentError::Database(e.to_string()))?;

        let row = result
            .into_iter()
            .next()
            .ok_or_else(|| AppointmentError::Database("Insert returned no row".to_string()))?;

        serde_json::from_value(row).map_err(|e| AppointmentError::Database(e.to_string()))
    }

    pub async fn list_for_patient(
        &self,
        patient_id: &str,
        auth_token: &str,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        self.list_by_column("patient_id", patient_id, auth_token).await
    }

    pub async fn list_for_doctor(
        &self,
        doctor_id: &str,
        auth_token: &str,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        self.list_by_column("doctor_id", doctor_id, auth_token).await
    }

    async fn list_by_column(
        &self,
        column: &str,
        id: &str,
        auth_token: &str,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        let path = format!(
            "/rest/v1/appointments?{}=eq.{}&order=appointment_time.asc",
            column, id
        );
        debug!("Listing appointments: {}", path);

        let result: Vec<Value> = self
            .supabase
            .request(Method::GET, &path, Some(auth_token), None)
            .await
            .map_err(|e| AppointmentError::Database(e.to_string()))?;

        result
            .into_iter()
            .map(|row| serde_json::from_value(row).map_err(|e| AppointmentError::Database(e.to_string())))
            .collect()
    }

    /// Move an appointment along the pending → confirmed → completed /
    /// cancelled lifecycle.
    pub async fn update_status(
        &self,
        appointment_id: &str,
        request: UpdateStatusRequest,
        auth_token: &str,
    ) -> Result<Appointment, AppointmentError> {
        let current = self.get_appointment(appointment_id, auth_token).await?;

        if !current.status.can_transition_to(request.status) {
            return Err(AppointmentError::IllegalTransition {
                from: current.status.as_str().to_string(),
                to: request.status.as_str().to_string(),
            });
        }

        let path = format!("/rest/v1/appointments?id=eq.{}", appointment_id);
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Prefer",
            reqwest::header::HeaderValue::from_static("return=representation"),
        );

        let result: Vec<Value> = self
            .supabase
            .request_with_headers(
                Method::PATCH,
                &path,
                Some(auth_token),
                Some(json!({ "status": request.status.as_str() })),
                Some(headers),
            )
            .await
            .map_err(|e| AppointmentError::Database(e.to_string()))?;

        let row = result.into_iter().next().ok_or(AppointmentError::NotFound)?;
        serde_json::from_value(row).map_err(|e| AppointmentError::Database(e.to_string()))
    }

    async fn get_appointment(
        &self,
        appointment_id: &str,
        auth_token: &str,
    ) -> Result<Appointment, AppointmentError> {
        let path = format!("/rest/v1/appointments?id=eq.{}", appointment_id);

        let result: Vec<Value> = self
            .supabase
            .request(Method::GET, &path, Some(auth_token), None)
            .await
            .map_err(|e| AppointmentError::Database(e.to_string()))?;

        let row = result.into_iter().next().ok_or(AppointmentError::NotFound)?;
        serde_json::from_value(row).map_err(|e| AppointmentError::Database(e.to_string()))
    }
}
