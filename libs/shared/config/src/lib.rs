use std::env;
use tracing::warn;

/// Fixed fallback position used when a caller has no usable geolocation:
/// Algiers city center.
pub const DEFAULT_FALLBACK_LAT: f64 = 36.752887;
pub const DEFAULT_FALLBACK_LNG: f64 = 3.042048;

const DEFAULT_ROUTING_BASE_URL: &str = "https://router.project-osrm.org";
const DEFAULT_CHAT_POLL_INTERVAL_SECS: u64 = 3;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub supabase_jwt_secret: String,
    pub routing_base_url: String,
    pub fallback_lat: f64,
    pub fallback_lng: f64,
    pub chat_poll_interval_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            supabase_url: env::var("SUPABASE_URL")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_URL not set, using empty value");
                    String::new()
                }),
            supabase_anon_key: env::var("SUPABASE_ANON_PUBLIC_KEY")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_ANON_PUBLIC_KEY not set, using empty value");
                    String::new()
                }),
            supabase_jwt_secret: env::var("SUPABASE_JWT_SECRET")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_JWT_SECRET not set, using empty value");
                    String::new()
                }),
            routing_base_url: env::var("ROUTING_BASE_URL")
                .unwrap_or_else(|_| {
                    warn!("ROUTING_BASE_URL not set, using default");
                    DEFAULT_ROUTING_BASE_URL.to_string()
                }),
            fallback_lat: env::var("FALLBACK_LAT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_FALLBACK_LAT),
            fallback_lng: env::var("FALLBACK_LNG")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_FALLBACK_LNG),
            chat_poll_interval_secs: env::var("CHAT_POLL_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CHAT_POLL_INTERVAL_SECS),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.supabase_url.is_empty()
            && !self.supabase_anon_key.is_empty()
            && !self.supabase_jwt_secret.is_empty()
    }
}
