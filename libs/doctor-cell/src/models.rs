use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A doctor row as stored in Supabase, with the joined profile columns the
/// public listing selects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: Uuid,
    pub specialty: String,
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub image_url: Option<String>,
    pub status: String,
    pub location_lat: Option<f64>,
    pub location_lng: Option<f64>,
    pub availability: Option<WeeklySchedule>,
    #[serde(default)]
    pub profiles: Option<ProfileRef>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Doctor {
    pub fn full_name(&self) -> Option<&str> {
        self.profiles.as_ref().and_then(|p| p.full_name.as_deref())
    }
}

/// Columns pulled in from the joined `profiles` row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileRef {
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
}

/// Weekly availability, keyed by full weekday name ("Sunday".."Saturday").
/// Persisted as opaque JSONB on the doctor row; the slot generator only
/// reads it. Days absent from the map count as closed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklySchedule(pub HashMap<String, DaySchedule>);

impl WeeklySchedule {
    pub fn day(&self, name: &str) -> Option<&DaySchedule> {
        self.0.get(name)
    }
}

/// One day's opening window, local wall-clock "HH:MM". `start < end` must
/// hold when `enabled`; anything malformed degrades to a closed day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySchedule {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

/// A bookable start time, "HH:MM" 24-hour, naming a half-open 30-minute
/// interval. Derived, never persisted.
pub type TimeSlot = String;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDoctorRequest {
    pub specialty: Option<String>,
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub image_url: Option<String>,
    pub location_lat: Option<f64>,
    pub location_lng: Option<f64>,
    pub availability: Option<WeeklySchedule>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorSearchFilters {
    pub specialty: Option<String>,
    pub with_location_only: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableSlotsResponse {
    pub doctor_id: Uuid,
    pub date: NaiveDate,
    pub slots: Vec<TimeSlot>,
}

#[derive(Error, Debug)]
pub enum DoctorError {
    #[error("Doctor not found")]
    NotFound,

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("Database error: {0}")]
    Database(String),
}
