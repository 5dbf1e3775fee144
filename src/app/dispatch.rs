use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::info;

use langolier::client::TwitterClient;
use langolier::{Config, RunOptions, RunOrchestrator, RunSummary, StatusId};

use crate::cli::Cli;

/// Run one purge as described by the command line.
///
/// 1. Loads and validates the config.
/// 2. Builds the signed API client (needed for deletes in both modes).
/// 3. Runs archive mode when `--archive` is given, API mode otherwise.
pub async fn dispatch(cli: Cli) -> Result<RunSummary> {
    let config = Config::load(cli.config.as_deref()).context("load configuration")?;

    if cli.force {
        info!("Using force.");
    }
    if let Some(skip) = cli.skip {
        info!("Skipping past ID {skip}.");
    }

    let policy = config.retention_policy()?;
    let client = TwitterClient::new(&config.api_base, config.credentials()?)
        .with_per_page(config.per_page);
    let options = RunOptions {
        force: cli.force,
        skip: cli.skip.map(StatusId::new),
        hard_cap: config.hard_cap,
    };
    let orchestrator = RunOrchestrator::new(&policy, &client, options, Utc::now().naive_utc());

    let summary = match cli.archive {
        Some(dir) => {
            let dir = shellexpand::tilde(&dir.to_string_lossy()).into_owned();
            orchestrator
                .run_archive_dir(Path::new(&dir))
                .await
                .with_context(|| format!("archive run over {dir}"))?
        }
        None => orchestrator
            .run_api(&client, &config.screen_name)
            .await
            .with_context(|| format!("API run for @{}", config.screen_name))?,
    };

    Ok(summary)
}
