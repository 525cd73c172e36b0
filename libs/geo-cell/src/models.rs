use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// WGS84 coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Ordered driving path between two points. Ephemeral: recomputed whenever
/// the selected clinic or the user position changes.
pub type RoutePath = Vec<GeoPoint>;

/// The slice of a doctor row the locator works with. Rows missing either
/// coordinate stay listed elsewhere but are ineligible for matching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicPin {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub specialty: String,
    pub location_lat: Option<f64>,
    pub location_lng: Option<f64>,
}

impl ClinicPin {
    pub fn position(&self) -> Option<GeoPoint> {
        match (self.location_lat, self.location_lng) {
            (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearestClinicResponse {
    pub doctor: ClinicPin,
    pub distance_km: f64,
    pub route: RoutePath,
    pub user_position: GeoPoint,
}
