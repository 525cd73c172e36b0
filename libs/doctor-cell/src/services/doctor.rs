use anyhow::Result;
use chrono::{NaiveDate, Utc};
use reqwest::Method;
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{
    AvailableSlotsResponse, Doctor, DoctorError, DoctorSearchFilters, UpdateDoctorRequest,
};
use crate::services::schedule;

/// Columns the public listing selects, including the joined profile.
const DOCTOR_SELECT: &str = "select=*,profiles(full_name,avatar_url)";

pub struct DoctorService {
    supabase: SupabaseClient,
}

impl DoctorService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    /// Public doctor discovery: approved doctors only, optionally narrowed to
    /// one specialty. Callers that feed the map additionally require clinic
    /// coordinates to be present.
    pub async fn search_doctors(&self, filters: DoctorSearchFilters) -> Result<Vec<Doctor>> {
        let mut path = format!("/rest/v1/doctors?{}&status=eq.approved", DOCTOR_SELECT);

        if let Some(ref specialty) = filters.specialty {
            path.push_str(&format!("&specialty=eq.{}", specialty));
        }
        if filters.with_location_only {
            path.push_str("&location_lat=not.is.null&location_lng=not.is.null");
        }

        debug!("Searching doctors: {}", path);

        let result: Vec<Value> = self.supabase.request(Method::GET, &path, None, None).await?;

        let doctors: Vec<Doctor> = result
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<Doctor>, _>>()?;

        Ok(doctors)
    }

    pub async fn get_doctor(&self, doctor_id: &str) -> Result<Doctor, DoctorError> {
        let path = format!("/rest/v1/doctors?{}&id=eq.{}", DOCTOR_SELECT, doctor_id);

        let result: Vec<Value> = self
            .supabase
            .request(Method::GET, &path, None, None)
            .await
            .map_err(|e| DoctorError::Database(e.to_string()))?;

        let row = result.into_iter().next().ok_or(DoctorError::NotFound)?;
        serde_json::from_value(row).map_err(|e| DoctorError::Database(e.to_string()))
    }

    /// Update a doctor's own profile row, including the weekly schedule. The
    /// schedule is validated before it is written; reads stay lenient.
    pub async fn update_doctor(
        &self,
        doctor_id: &str,
        request: UpdateDoctorRequest,
        auth_token: &str,
    ) -> Result<Doctor, DoctorError> {
        debug!("Updating doctor profile: {}", doctor_id);

        if let Some(ref availability) = request.availability {
            schedule::validate_schedule(availability).map_err(DoctorError::InvalidSchedule)?;
        }

        let mut update_data = serde_json::Map::new();

        if let Some(specialty) = request.specialty {
            update_data.insert("specialty".to_string(), json!(specialty));
        }
        if let Some(bio) = request.bio {
            update_data.insert("bio".to_string(), json!(bio));
        }
        if let Some(phone) = request.phone {
            update_data.insert("phone".to_string(), json!(phone));
        }
        if let Some(image_url) = request.image_url {
            update_data.insert("image_url".to_string(), json!(image_url));
        }
        if let Some(lat) = request.location_lat {
            update_data.insert("location_lat".to_string(), json!(lat));
        }
        if let Some(lng) = request.location_lng {
            update_data.insert("location_lng".to_string(), json!(lng));
        }
        if let Some(availability) = request.availability {
            update_data.insert("availability".to_string(), json!(availability));
        }

        update_data.insert("updated_at".to_string(), json!(Utc::now().to_rfc3339()));

        let path = format!("/rest/v1/doctors?id=eq.{}&{}", doctor_id, DOCTOR_SELECT);
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
                Some(Value::Object(update_data)),
                Some(headers),
            )
            .await
            .map_err(|e| DoctorError::Database(e.to_string()))?;

        let row = result.into_iter().next().ok_or(DoctorError::NotFound)?;
        serde_json::from_value(row).map_err(|e| DoctorError::Database(e.to_string()))
    }

    /// Bookable slots for one doctor on one date, computed from the stored
    /// weekly schedule. A doctor without a schedule is simply closed.
    pub async fn get_available_slots(
        &self,
        doctor_id: &str,
        date: NaiveDate,
    ) -> Result<AvailableSlotsResponse, DoctorError> {
        let doctor = self.get_doctor(doctor_id).await?;

        let slots = match doctor.availability {
            Some(ref schedule) => schedule::available_slots(schedule, date),
            None => Vec::new(),
        };

        debug!("Doctor {} has {} slots on {}", doctor_id, slots.len(), date);

        Ok(AvailableSlotsResponse {
            doctor_id: doctor.id,
            date,
            slots,
        })
    }

    /// Distinct specialties currently offered by approved doctors, for the
    /// filter dropdowns.
    pub async fn list_specialties(&self) -> Result<Vec<String>> {
        let path = "/rest/v1/doctors?select=specialty&status=eq.approved";
        let result: Vec<Value> = self.supabase.request(Method::GET, path, None, None).await?;

        let mut specialties: Vec<String> = result
            .into_iter()
            .filter_map(|row| {
                row.get("specialty")
                    .and_then(|v| v.as_str())
                    .map(String::from)
            })
            .collect();
        specialties.sort();
        specialties.dedup();

        Ok(specialties)
    }
}
