use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use shared_config::AppConfig;

use crate::models::{GeoPoint, RoutePath};

/// Client for the public driving-directions service. One request per
/// selection change, no retries: any failure degrades to a straight
/// two-point path rather than surfacing an error.
pub struct RouteService {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
struct DirectionsRoute {
    geometry: RouteGeometry,
}

#[derive(Debug, Deserialize)]
struct RouteGeometry {
    /// GeoJSON order: (longitude, latitude).
    coordinates: Vec<[f64; 2]>,
}

impl RouteService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.routing_base_url.clone(),
        }
    }

    /// Fetch the driving geometry from `start` to `end`. The service speaks
    /// (lng,lat); the result is reordered to (lat,lng). Network errors,
    /// non-success statuses, malformed bodies, and empty route lists all
    /// fall back silently to `[start, end]`.
    pub async fn driving_route(&self, start: GeoPoint, end: GeoPoint) -> RoutePath {
        match self.try_driving_route(start, end).await {
            Ok(path) => path,
            Err(e) => {
                warn!("Route request failed, falling back to straight line: {}", e);
                vec![start, end]
            }
        }
    }

    async fn try_driving_route(&self, start: GeoPoint, end: GeoPoint) -> anyhow::Result<RoutePath> {
        let url = format!(
            "{}/route/v1/driving/{},{};{},{}?overview=full&geometries=geojson",
            self.base_url, start.lng, start.lat, end.lng, end.lat
        );
        debug!("Requesting route: {}", url);

        let response = self.client.get(&url).send().await?;
        let response = response.error_for_status()?;
        let body: DirectionsResponse = response.json().await?;

        // Only the first returned route is used.
        let route = body
            .routes
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("No routes in response"))?;

        let path: RoutePath = route
            .geometry
            .coordinates
            .into_iter()
            .map(|pair| GeoPoint::new(pair[1], pair[0]))
            .collect();

        if path.is_empty() {
            return Err(anyhow::anyhow!("Empty route geometry"));
        }

        Ok(path)
    }
}
