use crate::models::{ClinicPin, GeoPoint};

/// Mean Earth radius, kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points in kilometers, treating Earth
/// as a sphere of radius 6371 km.
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Anything with an optional position can be ranked by distance. Items
/// without a position are ineligible, not errors.
pub trait Locatable {
    fn position(&self) -> Option<GeoPoint>;
}

impl Locatable for ClinicPin {
    fn position(&self) -> Option<GeoPoint> {
        ClinicPin::position(self)
    }
}

/// Linear scan for the closest eligible candidate. Strict `<` comparison:
/// the first candidate encountered wins ties, so the result is stable in
/// input order. An empty eligible set yields `None`.
pub fn nearest<'a, T: Locatable>(user: GeoPoint, candidates: &'a [T]) -> Option<(&'a T, f64)> {
    let mut best: Option<(&T, f64)> = None;

    for candidate in candidates {
        let Some(position) = candidate.position() else {
            continue;
        };
        let dist = haversine_km(user, position);
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((candidate, dist)),
        }
    }

    best
}
