use anyhow::{anyhow, Result};
use chrono::Utc;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{Conversation, Message, SendMessageRequest};

pub struct MessageService {
    supabase: SupabaseClient,
}

impl MessageService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    /// Both directions of one conversation, oldest first.
    pub async fn list_conversation(
        &self,
        user_id: &str,
        partner_id: &str,
        auth_token: &str,
    ) -> Result<Vec<Message>> {
        let path = format!(
            "/rest/v1/messages?or=(and(sender_id.eq.{user},receiver_id.eq.{partner}),and(sender_id.eq.{partner},receiver_id.eq.{user}))&order=created_at.asc",
            user = user_id,
            partner = partner_id,
        );
        debug!("Fetching conversation: {}", path);

        let result: Vec<Value> = self
            .supabase
            .request(Method::GET, &path, Some(auth_token), None)
            .await?;

        let messages: Vec<Message> = result
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<Message>, _>>()?;

        Ok(messages)
    }

    pub async fn send_message(
        &self,
        sender_id: &str,
        request: SendMessageRequest,
        auth_token: &str,
    ) -> Result<Message> {
        if request.content.trim().is_empty() {
            return Err(anyhow!("Message content cannot be empty"));
        }

        let message_data = json!({
            "sender_id": sender_id,
            "receiver_id": request.receiver_id,
            "content": request.content,
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
                "/rest/v1/messages",
                Some(auth_token),
                Some(message_data),
                Some(headers),
            )
            .await?;

        let row = result
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("Failed to send message"))?;

        Ok(serde_json::from_value(row)?)
    }

    /// Chat partners derived from the appointments table: everyone the user
    /// has a booking with, regardless of whether messages exist yet.
    pub async fn list_conversations(
        &self,
        user_id: &str,
        auth_token: &str,
    ) -> Result<Vec<Conversation>> {
        let path = format!(
            "/rest/v1/appointments?or=(patient_id.eq.{id},doctor_id.eq.{id})&select=patient_id,doctor_id",
            id = user_id,
        );

        let result: Vec<Value> = self
            .supabase
            .request(Method::GET, &path, Some(auth_token), None)
            .await?;

        let own_id = Uuid::parse_str(user_id)?;
        let mut partners: Vec<Uuid> = Vec::new();

        for row in result {
            for column in ["patient_id", "doctor_id"] {
                let Some(raw) = row.get(column).and_then(|v| v.as_str()) else {
                    continue;
                };
                let Ok(id) = Uuid::parse_str(raw) else {
                    continue;
                };
                if id != own_id && !partners.contains(&id) {
                    partners.push(id);
                }
            }
        }

        Ok(partners
            .into_iter()
            .map(|partner_id| Conversation { partner_id })
            .collect())
    }
}
