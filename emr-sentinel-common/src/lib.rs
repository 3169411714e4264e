//! Common types shared between the EMR sentinel checker and its collaborators

pub mod message;

pub use message::NotificationMessage;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of an EMR cluster, using the provider's wire names
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ClusterState {
    Starting,
    Bootstrapping,
    Running,
    Waiting,
    Terminating,
    Terminated,
    TerminatedWithErrors,
    Unknown(String),
}

impl ClusterState {
    /// States in which a cluster still costs money
    pub const ACTIVE: [ClusterState; 4] = [
        ClusterState::Starting,
        ClusterState::Bootstrapping,
        ClusterState::Running,
        ClusterState::Waiting,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ClusterState::Starting => "STARTING",
            ClusterState::Bootstrapping => "BOOTSTRAPPING",
            ClusterState::Running => "RUNNING",
            ClusterState::Waiting => "WAITING",
            ClusterState::Terminating => "TERMINATING",
            ClusterState::Terminated => "TERMINATED",
            ClusterState::TerminatedWithErrors => "TERMINATED_WITH_ERRORS",
            ClusterState::Unknown(ref s) => s,
        }
    }

    pub fn is_active(&self) -> bool {
        Self::ACTIVE.contains(self)
    }
}

impl From<&str> for ClusterState {
    fn from(s: &str) -> Self {
        match s {
            "STARTING" => ClusterState::Starting,
            "BOOTSTRAPPING" => ClusterState::Bootstrapping,
            "RUNNING" => ClusterState::Running,
            "WAITING" => ClusterState::Waiting,
            "TERMINATING" => ClusterState::Terminating,
            "TERMINATED" => ClusterState::Terminated,
            "TERMINATED_WITH_ERRORS" => ClusterState::TerminatedWithErrors,
            other => ClusterState::Unknown(other.to_string()),
        }
    }
}

impl From<String> for ClusterState {
    fn from(s: String) -> Self {
        ClusterState::from(s.as_str())
    }
}

impl From<ClusterState> for String {
    fn from(state: ClusterState) -> Self {
        state.as_str().to_string()
    }
}

impl fmt::Display for ClusterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entry returned by the cluster listing call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterSummary {
    pub id: String,
}

impl ClusterSummary {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Per-cluster metadata used to build one notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterDescription {
    pub id: String,
    pub name: String,
    pub state: ClusterState,
    pub keypair: String,
}

/// Sentinel error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Cluster provider error: {0}")]
    Provider(String),

    #[error("Cluster not found: {0}")]
    ClusterNotFound(String),

    #[error("Malformed description for cluster {id}: missing {field}")]
    MalformedDescription { id: String, field: &'static str },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
