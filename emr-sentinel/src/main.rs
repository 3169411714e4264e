//! EMR sentinel binary
//!
//! Runs one check and exits. Scheduling is left to the caller (cron,
//! EventBridge, a Kubernetes CronJob, ...).

use anyhow::Context;
use clap::{Parser, ValueEnum};
use emr_sentinel::{handle_invocation, Config};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

/// Report EMR clusters left running to Slack
#[derive(Parser, Debug)]
#[command(name = "emr-sentinel", version)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, env = "EMR_SENTINEL_CONFIG")]
    config: Option<PathBuf>,

    /// Slack incoming webhook URL
    #[arg(long, env = "EMR_SENTINEL_WEBHOOK_URL", hide_env_values = true)]
    webhook_url: Option<String>,

    /// Slack channel to post to
    #[arg(long, env = "EMR_SENTINEL_CHANNEL")]
    channel: Option<String>,

    /// AWS region of the clusters
    #[arg(long, env = "EMR_SENTINEL_REGION")]
    region: Option<String>,

    /// Terminate every active cluster after reporting it; `--terminate=false`
    /// turns off termination enabled in the config file
    #[arg(
        long,
        env = "EMR_SENTINEL_TERMINATE",
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    terminate: Option<bool>,

    /// Trigger event as JSON; logged, otherwise ignored
    #[arg(long, default_value = "{}")]
    event: String,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

impl Args {
    fn into_config(self) -> anyhow::Result<Config> {
        let mut config = Config::load(self.config.as_deref())
            .context("Failed to load configuration file")?;

        if let Some(webhook_url) = self.webhook_url {
            config.webhook_url = webhook_url;
        }
        if let Some(channel) = self.channel {
            config.channel = channel;
        }
        if self.region.is_some() {
            config.region = self.region;
        }
        if let Some(terminate) = self.terminate {
            config.terminate_active_clusters = terminate;
        }

        Ok(config)
    }
}

fn init_logging(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());

    match format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_format);

    let event: serde_json::Value =
        serde_json::from_str(&args.event).context("Trigger event is not valid JSON")?;
    let config = args.into_config()?;

    let report = handle_invocation(&config, &event)
        .await
        .context("EMR sentinel run failed")?;

    tracing::info!(
        "Run finished: {} active clusters, {} notifications delivered, {} failed",
        report.active_clusters,
        report.delivered,
        report.failed
    );

    Ok(())
}
