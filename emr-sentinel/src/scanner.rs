//! Cluster scanning
//!
//! `ClusterApi` is the read/terminate surface of the cluster provider;
//! `ClusterScanner` narrows it to what a sentinel run needs.

use async_trait::async_trait;
use emr_sentinel_common::{ClusterDescription, ClusterState, ClusterSummary, Result};

/// Cluster management API of the cloud provider
#[async_trait]
pub trait ClusterApi: Send + Sync {
    /// List clusters whose state is one of `states`, in provider order
    async fn list_clusters(&self, states: &[ClusterState]) -> Result<Vec<ClusterSummary>>;

    /// Describe a single cluster
    async fn describe_cluster(&self, id: &str) -> Result<ClusterDescription>;

    /// Terminate the given clusters
    async fn terminate_clusters(&self, ids: &[String]) -> Result<()>;
}

pub struct ClusterScanner {
    api: Box<dyn ClusterApi>,
}

impl ClusterScanner {
    pub fn new(api: Box<dyn ClusterApi>) -> Self {
        Self { api }
    }

    /// Clusters in any active state; empty when none match
    pub async fn list_active(&self) -> Result<Vec<ClusterSummary>> {
        let clusters = self.api.list_clusters(&ClusterState::ACTIVE).await?;
        tracing::debug!("Provider returned {} active clusters", clusters.len());
        Ok(clusters)
    }

    pub async fn describe(&self, id: &str) -> Result<ClusterDescription> {
        self.api.describe_cluster(id).await
    }

    pub async fn terminate(&self, ids: &[String]) -> Result<()> {
        self.api.terminate_clusters(ids).await
    }
}
