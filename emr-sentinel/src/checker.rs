//! Active cluster checker
//!
//! One run lists the active clusters, notifies about each of them in the
//! order the provider returned them (or sends the "no clusters" sentinel),
//! and optionally terminates them afterwards.

use crate::config::Config;
use crate::notifier::{DeliveryOutcome, Notifier};
use crate::scanner::ClusterScanner;
use emr_sentinel_common::{NotificationMessage, Result};
use serde::{Deserialize, Serialize};

/// Summary of one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub active_clusters: usize,
    pub delivered: usize,
    pub failed: usize,
    pub terminated: Vec<String>,
}

pub struct ActiveClusterChecker {
    scanner: ClusterScanner,
    notifier: Box<dyn Notifier>,
    terminate_active_clusters: bool,
}

impl ActiveClusterChecker {
    pub fn new(config: &Config, scanner: ClusterScanner, notifier: Box<dyn Notifier>) -> Self {
        Self {
            scanner,
            notifier,
            terminate_active_clusters: config.terminate_active_clusters,
        }
    }

    /// Handle one scheduled invocation. The event is opaque and only logged.
    pub async fn run(&self, event: &serde_json::Value) -> Result<RunReport> {
        tracing::debug!("Invoked with event: {}", event);

        let clusters = self.scanner.list_active().await?;
        if clusters.is_empty() {
            tracing::info!("No active clusters...");
        } else {
            tracing::info!("Found {} active clusters...", clusters.len());
        }

        let mut report = RunReport {
            active_clusters: clusters.len(),
            ..RunReport::default()
        };

        if clusters.is_empty() {
            let outcome = self.notifier.send(&NotificationMessage::no_clusters()).await;
            report.record(&outcome);
            return Ok(report);
        }

        for cluster in &clusters {
            let description = self.scanner.describe(&cluster.id).await?;
            let message = NotificationMessage::for_cluster(&description);
            tracing::info!("Message: {}", message.text);

            let outcome = self.notifier.send(&message).await;
            report.record(&outcome);
        }

        if self.terminate_active_clusters {
            let ids: Vec<String> = clusters.into_iter().map(|c| c.id).collect();
            self.scanner.terminate(&ids).await?;
            tracing::info!("Terminated {} active clusters...", ids.len());
            report.terminated = ids;
        }

        Ok(report)
    }
}

impl RunReport {
    fn record(&mut self, outcome: &DeliveryOutcome) {
        if outcome.is_delivered() {
            self.delivered += 1;
        } else {
            self.failed += 1;
        }
    }
}
