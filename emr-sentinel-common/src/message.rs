///! Chat notification built from a cluster description

use crate::ClusterDescription;
use serde::{Deserialize, Serialize};

/// Key-pair marking clusters nobody owns
pub const GHOST_KEYPAIR: &str = "ghost";

pub const GHOST_ICON: &str = ":ghost:";
pub const ACTIVE_ICON: &str = ":money_with_wings:";

pub const NO_CLUSTERS_TEXT: &str = "No EMR cluster found with the state specified";
pub const NO_CLUSTERS_ICON: &str = ":sunglasses:";
pub const NO_CLUSTERS_USERNAME: &str = "yburhan";

/// One chat message: text plus the bot identity it is posted under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationMessage {
    pub text: String,
    pub icon: String,
    pub username: String,
}

impl NotificationMessage {
    /// Message reporting a cluster that was left running
    pub fn for_cluster(description: &ClusterDescription) -> Self {
        let text = format!(
            "Cluster `{}` was still active in state `{}` with keypair `{}`. ",
            description.name, description.state, description.keypair
        );

        let icon = if description.keypair == GHOST_KEYPAIR {
            GHOST_ICON
        } else {
            ACTIVE_ICON
        };

        Self {
            text,
            icon: icon.to_string(),
            username: format!("Active EMR Cluster Bot ({})", description.keypair),
        }
    }

    /// Sentinel sent when the listing came back empty
    pub fn no_clusters() -> Self {
        Self {
            text: NO_CLUSTERS_TEXT.to_string(),
            icon: NO_CLUSTERS_ICON.to_string(),
            username: NO_CLUSTERS_USERNAME.to_string(),
        }
    }
}
