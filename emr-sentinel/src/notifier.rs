///! Slack webhook notifier
///!
///! Posts one message per call using Slack's form-encoded incoming webhook
///! convention. Delivery problems are logged and reported back, never raised.

use crate::config::{AttachmentConfig, Config};
use async_trait::async_trait;
use emr_sentinel_common::NotificationMessage;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

/// Result of a single delivery attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered,
    /// Webhook answered with something other than 200
    Rejected { status: u16, reason: String },
    /// Request never got a response
    Unreachable { error: String },
    /// Payload could not be encoded, nothing was sent
    Unencodable { error: String },
}

impl DeliveryOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryOutcome::Delivered)
    }
}

/// Destination for notification messages
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: &NotificationMessage) -> DeliveryOutcome;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackAttachment {
    pub color: String,
    pub title: String,
    pub image_url: String,
}

/// JSON document carried in the `payload` form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackPayload {
    pub channel: String,
    pub username: String,
    pub icon_emoji: String,
    pub text: String,
    pub attachments: Vec<SlackAttachment>,
}

pub struct SlackNotifier {
    client: reqwest::Client,
    webhook_url: String,
    channel: String,
    attachment: AttachmentConfig,
}

impl SlackNotifier {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook_url: config.webhook_url.clone(),
            channel: config.channel.clone(),
            attachment: config.attachment.clone(),
        }
    }

    pub fn payload(&self, message: &NotificationMessage) -> SlackPayload {
        SlackPayload {
            channel: self.channel.clone(),
            username: message.username.clone(),
            icon_emoji: message.icon.clone(),
            text: message.text.clone(),
            attachments: vec![SlackAttachment {
                color: self.attachment.color.clone(),
                title: self.attachment.title.clone(),
                image_url: self.attachment.image_url.clone(),
            }],
        }
    }

    fn headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );
        headers.insert(ACCEPT, HeaderValue::from_static("text/plain"));
        headers
    }

    async fn post(&self, body: String) -> DeliveryOutcome {
        let response = match self
            .client
            .post(&self.webhook_url)
            .headers(Self::headers())
            .body(body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Send message to Slack failed: {}", e);
                return DeliveryOutcome::Unreachable {
                    error: e.to_string(),
                };
            }
        };

        let status = response.status();
        if status == StatusCode::OK {
            tracing::info!("Successfully sent message to Slack");
            return DeliveryOutcome::Delivered;
        }

        let reason = status.canonical_reason().unwrap_or_default().to_string();
        let body = response.text().await.unwrap_or_default();
        tracing::error!(
            "Send message to Slack failed with status code '{}' and reason '{}': {}",
            status.as_u16(),
            reason,
            body
        );

        DeliveryOutcome::Rejected {
            status: status.as_u16(),
            reason,
        }
    }
}

#[async_trait]
impl Notifier for SlackNotifier {
    async fn send(&self, message: &NotificationMessage) -> DeliveryOutcome {
        let payload = self.payload(message);
        let body = match encode_form_body(&payload) {
            Ok(body) => body,
            Err(e) => {
                tracing::error!("Failed to serialize Slack payload: {}", e);
                return DeliveryOutcome::Unencodable {
                    error: e.to_string(),
                };
            }
        };

        self.post(body).await
    }
}

/// `payload=<url-encoded JSON>`
pub fn encode_form_body(payload: &SlackPayload) -> serde_json::Result<String> {
    let json = serde_json::to_string(payload)?;
    Ok(format!("payload={}", urlencoding::encode(&json)))
}
