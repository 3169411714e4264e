///! Sentinel configuration
///!
///! Loaded from an optional TOML file, then overridden from the command line
///! or environment. The webhook URL is a secret and has no default.

use emr_sentinel_common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CHANNEL: &str = "#emr-webhook";
pub const DEFAULT_ATTACHMENT_COLOR: &str = "#36a64f";
pub const DEFAULT_ATTACHMENT_TITLE: &str = "STATUS";
pub const DEFAULT_ATTACHMENT_IMAGE_URL: &str = "https://media.giphy.com/media/dBYpAuBWrV3cA/giphy.gif";

/// Decorative attachment block appended to every message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttachmentConfig {
    pub color: String,
    pub title: String,
    pub image_url: String,
}

impl Default for AttachmentConfig {
    fn default() -> Self {
        Self {
            color: DEFAULT_ATTACHMENT_COLOR.to_string(),
            title: DEFAULT_ATTACHMENT_TITLE.to_string(),
            image_url: DEFAULT_ATTACHMENT_IMAGE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Incoming webhook the notifications are posted to
    pub webhook_url: String,
    pub channel: String,
    /// AWS region override; the SDK default chain applies when unset
    pub region: Option<String>,
    /// Terminate every active cluster after notifying about it
    pub terminate_active_clusters: bool,
    pub attachment: AttachmentConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            channel: DEFAULT_CHANNEL.to_string(),
            region: None,
            terminate_active_clusters: false,
            attachment: AttachmentConfig::default(),
        }
    }
}

impl Config {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            ..Self::default()
        }
    }

    /// Load from a TOML file, or defaults when no file is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Reject configurations the sender cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.webhook_url.is_empty() {
            return Err(Error::InvalidConfig("webhook URL is not set".to_string()));
        }

        let url = url::Url::parse(&self.webhook_url)
            .map_err(|e| Error::InvalidConfig(format!("webhook URL is invalid: {}", e)))?;
        if url.scheme() != "https" && url.scheme() != "http" {
            return Err(Error::InvalidConfig(format!(
                "webhook URL must be http(s), got {}",
                url.scheme()
            )));
        }

        if self.channel.trim().is_empty() {
            return Err(Error::InvalidConfig("channel is empty".to_string()));
        }

        Ok(())
    }
}
