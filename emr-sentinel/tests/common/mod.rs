//! Common test utilities: in-memory cluster provider, recording notifier and
//! a local webhook endpoint

#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use emr_sentinel::{ClusterApi, DeliveryOutcome, Notifier};
use emr_sentinel_common::{
    ClusterDescription, ClusterState, ClusterSummary, Error, NotificationMessage, Result,
};
use std::sync::{Arc, Mutex};

pub fn cluster(id: &str, name: &str, state: ClusterState, keypair: &str) -> ClusterDescription {
    ClusterDescription {
        id: id.to_string(),
        name: name.to_string(),
        state,
        keypair: keypair.to_string(),
    }
}

/// Cluster provider backed by a fixed list of clusters
#[derive(Clone, Default)]
pub struct FakeClusterApi {
    clusters: Vec<ClusterDescription>,
    pub fail_listing: bool,
    /// Ids that disappear between listing and describing
    pub vanished: Vec<String>,
    pub described: Arc<Mutex<Vec<String>>>,
    pub terminated: Arc<Mutex<Vec<String>>>,
}

impl FakeClusterApi {
    pub fn new(clusters: Vec<ClusterDescription>) -> Self {
        Self {
            clusters,
            ..Self::default()
        }
    }
}

#[async_trait]
impl ClusterApi for FakeClusterApi {
    async fn list_clusters(&self, states: &[ClusterState]) -> Result<Vec<ClusterSummary>> {
        if self.fail_listing {
            return Err(Error::Provider("ListClusters failed: throttled".to_string()));
        }

        Ok(self
            .clusters
            .iter()
            .filter(|c| states.contains(&c.state))
            .map(|c| ClusterSummary::new(c.id.clone()))
            .collect())
    }

    async fn describe_cluster(&self, id: &str) -> Result<ClusterDescription> {
        self.described.lock().unwrap().push(id.to_string());

        if self.vanished.iter().any(|v| v == id) {
            return Err(Error::ClusterNotFound(id.to_string()));
        }

        self.clusters
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| Error::ClusterNotFound(id.to_string()))
    }

    async fn terminate_clusters(&self, ids: &[String]) -> Result<()> {
        self.terminated.lock().unwrap().extend(ids.iter().cloned());
        Ok(())
    }
}

/// Notifier that keeps every message it is asked to send
#[derive(Clone)]
pub struct RecordingNotifier {
    pub sent: Arc<Mutex<Vec<NotificationMessage>>>,
    outcome: DeliveryOutcome,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::with_outcome(DeliveryOutcome::Delivered)
    }

    pub fn with_outcome(outcome: DeliveryOutcome) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            outcome,
        }
    }

    pub fn messages(&self) -> Vec<NotificationMessage> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, message: &NotificationMessage) -> DeliveryOutcome {
        self.sent.lock().unwrap().push(message.clone());
        self.outcome.clone()
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub content_type: Option<String>,
    pub accept: Option<String>,
    pub body: String,
}

/// Local HTTP endpoint standing in for the Slack webhook
pub struct WebhookStub {
    pub url: String,
    pub requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

type StubState = (Arc<Mutex<Vec<RecordedRequest>>>, StatusCode);

async fn record_request(
    State((requests, status)): State<StubState>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, &'static str) {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    };

    requests.lock().unwrap().push(RecordedRequest {
        content_type: header_value(header::CONTENT_TYPE),
        accept: header_value(header::ACCEPT),
        body,
    });

    (status, "ok")
}

pub async fn spawn_webhook_stub(status: u16) -> WebhookStub {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state: StubState = (requests.clone(), StatusCode::from_u16(status).unwrap());

    let app = Router::new()
        .route("/services/hook", post(record_request))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    WebhookStub {
        url: format!("http://{}/services/hook", addr),
        requests,
    }
}
