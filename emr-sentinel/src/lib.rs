//! EMR sentinel
//!
//! Reports Amazon EMR clusters left running in an active state to a Slack
//! channel. Meant to be invoked on a schedule; every invocation is
//! independent of the previous one.

pub mod checker;
pub mod config;
pub mod emr;
pub mod notifier;
pub mod scanner;

pub use checker::{ActiveClusterChecker, RunReport};
pub use config::Config;
pub use emr::EmrClusterApi;
pub use notifier::{DeliveryOutcome, Notifier, SlackNotifier};
pub use scanner::{ClusterApi, ClusterScanner};

use emr_sentinel_common::Result;

/// Entry point for one scheduled invocation against the real provider
pub async fn handle_invocation(config: &Config, event: &serde_json::Value) -> Result<RunReport> {
    config.validate()?;

    let api = EmrClusterApi::from_env(config.region.as_deref()).await;
    let checker = ActiveClusterChecker::new(
        config,
        ClusterScanner::new(Box::new(api)),
        Box::new(SlackNotifier::new(config)),
    );

    checker.run(event).await
}
