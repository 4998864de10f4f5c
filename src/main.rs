use std::sync::Arc;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use moderator_bootstrap::client::{
    DryRunPublisher, ModeratorClient, ModeratorClientConfig, PublisherApi,
};
use moderator_bootstrap::config::ImportConfig;
use moderator_bootstrap::import::{CallOutcome, ImportOptions, Importer};

fn init_tracing(json_logs: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    if json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = ImportConfig::from_env().context("Failed to load configuration")?;

    init_tracing(config.json_logs);

    tracing::info!("Starting moderator-bootstrap v{}", env!("CARGO_PKG_VERSION"));

    let datasets = config
        .load_datasets()
        .context("Failed to load dataset table")?;

    let api: Arc<dyn PublisherApi> = if config.dry_run {
        tracing::info!("Dry run: payloads are logged, nothing is sent");
        Arc::new(DryRunPublisher::new())
    } else {
        if config.auth.is_empty() {
            tracing::warn!(
                "MODERATOR_AUTH is not set; requests will carry an empty authorization header"
            );
        }
        Arc::new(
            ModeratorClient::new(ModeratorClientConfig::from(&config))
                .context("Failed to create publisher API client")?,
        )
    };

    let importer = Importer::new(api, ImportOptions::from(&config));
    let report = importer.run(&datasets).await.context("Import aborted")?;

    for dataset in &report.datasets {
        let article = match &dataset.article {
            CallOutcome::Created => "created".to_string(),
            CallOutcome::Rejected { status } => format!("rejected ({})", status),
            CallOutcome::Failed { .. } => "failed".to_string(),
        };
        tracing::info!(
            "{}: article {}, {} comment(s) created, {} rejected, {} failed",
            dataset.name,
            article,
            dataset.comments_created,
            dataset.comments_rejected,
            dataset.comments_failed
        );
    }

    Ok(())
}
