//! Amazon EMR implementation of `ClusterApi`
//!
//! Credentials and region come from the ambient AWS environment; the
//! region can be pinned through configuration.

use crate::scanner::ClusterApi;
use async_trait::async_trait;
use aws_sdk_emr::error::DisplayErrorContext;
use aws_sdk_emr::types::{Cluster, ClusterState as EmrClusterState};
use emr_sentinel_common::{ClusterDescription, ClusterState, ClusterSummary, Error, Result};

pub struct EmrClusterApi {
    client: aws_sdk_emr::Client,
}

impl EmrClusterApi {
    /// Build a client from the default credential and region chain
    pub async fn from_env(region: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(aws_sdk_emr::config::Region::new(region.to_string()));
        }

        let sdk_config = loader.load().await;
        Self::with_client(aws_sdk_emr::Client::new(&sdk_config))
    }

    pub fn with_client(client: aws_sdk_emr::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ClusterApi for EmrClusterApi {
    async fn list_clusters(&self, states: &[ClusterState]) -> Result<Vec<ClusterSummary>> {
        let emr_states: Vec<EmrClusterState> = states.iter().map(to_emr_state).collect();
        let mut clusters = Vec::new();
        let mut marker: Option<String> = None;

        loop {
            let output = self
                .client
                .list_clusters()
                .set_cluster_states(Some(emr_states.clone()))
                .set_marker(marker.take())
                .send()
                .await
                .map_err(|e| provider_error("ListClusters", e))?;

            clusters.extend(
                output
                    .clusters()
                    .iter()
                    .filter_map(|cluster| cluster.id())
                    .map(ClusterSummary::new),
            );

            match output.marker() {
                Some(next) if !next.is_empty() => marker = Some(next.to_string()),
                _ => break,
            }
        }

        Ok(clusters)
    }

    async fn describe_cluster(&self, id: &str) -> Result<ClusterDescription> {
        let output = self
            .client
            .describe_cluster()
            .cluster_id(id)
            .send()
            .await
            .map_err(|e| {
                let invalid_id = e
                    .as_service_error()
                    .is_some_and(|err| err.is_invalid_request_exception());
                if invalid_id {
                    Error::ClusterNotFound(id.to_string())
                } else {
                    provider_error("DescribeCluster", e)
                }
            })?;

        let cluster = output.cluster().ok_or_else(|| Error::MalformedDescription {
            id: id.to_string(),
            field: "Cluster",
        })?;

        description_from_cluster(id, cluster)
    }

    async fn terminate_clusters(&self, ids: &[String]) -> Result<()> {
        self.client
            .terminate_job_flows()
            .set_job_flow_ids(Some(ids.to_vec()))
            .send()
            .await
            .map_err(|e| provider_error("TerminateJobFlows", e))?;

        Ok(())
    }
}

fn description_from_cluster(id: &str, cluster: &Cluster) -> Result<ClusterDescription> {
    let missing = |field| Error::MalformedDescription {
        id: id.to_string(),
        field,
    };

    let state = cluster
        .status()
        .and_then(|status| status.state())
        .map(from_emr_state)
        .ok_or_else(|| missing("Status.State"))?;
    let name = cluster.name().ok_or_else(|| missing("Name"))?;
    let keypair = cluster
        .ec2_instance_attributes()
        .and_then(|attributes| attributes.ec2_key_name())
        .ok_or_else(|| missing("Ec2InstanceAttributes.Ec2KeyName"))?;

    Ok(ClusterDescription {
        id: id.to_string(),
        name: name.to_string(),
        state,
        keypair: keypair.to_string(),
    })
}

fn to_emr_state(state: &ClusterState) -> EmrClusterState {
    EmrClusterState::from(state.as_str())
}

fn from_emr_state(state: &EmrClusterState) -> ClusterState {
    ClusterState::from(state.as_str())
}

fn provider_error<E: std::error::Error>(operation: &str, err: E) -> Error {
    Error::Provider(format!("{} failed: {}", operation, DisplayErrorContext(err)))
}
