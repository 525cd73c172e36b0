use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use doctor_cell::models::DoctorSearchFilters;
use doctor_cell::services::doctor::DoctorService;
use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{ClinicPin, GeoPoint, NearestClinicResponse};
use crate::services::locator::{LocatorSession, LocatorState};
use crate::services::route::RouteService;

#[derive(Debug, Deserialize)]
pub struct NearestQuery {
    pub specialty: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Resolve the caller's position: both coordinates, or the configured
/// city-center fallback. Geolocation failures never surface as errors.
fn resolve_position(config: &AppConfig, lat: Option<f64>, lng: Option<f64>) -> GeoPoint {
    match (lat, lng) {
        (Some(lat), Some(lng)) => GeoPoint::new(lat, lng),
        _ => {
            debug!("No caller position, using configured fallback");
            GeoPoint::new(config.fallback_lat, config.fallback_lng)
        }
    }
}

#[axum::debug_handler]
pub async fn find_nearest_clinic(
    State(state): State<Arc<AppConfig>>,
    Query(query): Query<NearestQuery>,
) -> Result<Json<Value>, AppError> {
    let position = resolve_position(&state, query.lat, query.lng);

    let doctor_service = DoctorService::new(&state);
    let doctors = doctor_service
        .search_doctors(DoctorSearchFilters {
            specialty: Some(query.specialty.clone()),
            with_location_only: true,
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let candidates: Vec<ClinicPin> = doctors
        .into_iter()
        .map(|d| ClinicPin {
            id: d.id,
            full_name: d.full_name().map(String::from),
            specialty: d.specialty,
            location_lat: d.location_lat,
            location_lng: d.location_lng,
        })
        .collect();

    let mut session = LocatorSession::new();
    session.set_position(Some(position));
    session.set_filter(Some(query.specialty));
    let ticket = session.set_candidates(candidates);

    let Some(ticket) = ticket else {
        // No eligible clinic is a result, not a failure.
        return Ok(Json(json!({ "nearest": null })));
    };

    let route_service = RouteService::new(&state);
    let route = route_service.driving_route(ticket.start, ticket.end).await;
    session.apply_route(&ticket, route);

    match session.state() {
        LocatorState::Located {
            nearest,
            distance_km,
            route,
        } => {
            let response = NearestClinicResponse {
                doctor: nearest.clone(),
                distance_km: *distance_km,
                route: route.clone(),
                user_position: position,
            };
            Ok(Json(json!({ "nearest": response })))
        }
        _ => Ok(Json(json!({ "nearest": null }))),
    }
}
