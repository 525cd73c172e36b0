use anyhow::{anyhow, Result};
use chrono::Utc;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{Profile, UpdateProfileRequest};

pub struct ProfileService {
    supabase: SupabaseClient,
}

impl ProfileService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    pub async fn get_profile(&self, user_id: &str, auth_token: &str) -> Result<Profile> {
        debug!("Fetching profile for user: {}", user_id);

        let path = format!("/rest/v1/profiles?id=eq.{}", user_id);
        let result: Vec<Value> = self
            .supabase
            .request(Method::GET, &path, Some(auth_token), None)
            .await?;

        let row = result
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("Profile not found"))?;

        Ok(serde_json::from_value(row)?)
    }

    pub async fn update_profile(
        &self,
        user_id: &str,
        request: UpdateProfileRequest,
        auth_token: &str,
    ) -> Result<Profile> {
        debug!("Updating profile for user: {}", user_id);

        let mut update_data = serde_json::Map::new();

        if let Some(full_name) = request.full_name {
            update_data.insert("full_name".to_string(), json!(full_name));
        }
        if let Some(phone) = request.phone {
            update_data.insert("phone".to_string(), json!(phone));
        }
        if let Some(avatar_url) = request.avatar_url {
            update_data.insert("avatar_url".to_string(), json!(avatar_url));
        }

        update_data.insert("updated_at".to_string(), json!(Utc::now().to_rfc3339()));

        let path = format!("/rest/v1/profiles?id=eq.{}", user_id);
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
            .await?;

        let row = result
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("Failed to update profile"))?;

        Ok(serde_json::from_value(row)?)
    }
}
