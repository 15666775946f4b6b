//! Tileworld simulation entry point.
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tileworld_client::{RunSummary, SimConfig, Simulation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = SimConfig::from_env();
    setup_logging(config.log_to_file)?;

    let summary_path = config.summary_path.clone();
    let mut simulation = Simulation::builder(config)
        .build()
        .context("failed to build simulation")?;
    let summary = simulation.run();

    for agent in &summary.agents {
        tracing::info!(
            "{}: region {:?}, at {}, fuel {}, carried {}, deposits {}, rejections {}",
            agent.name,
            agent.region,
            agent.position,
            agent.fuel,
            agent.carried,
            agent.stats.deposits,
            agent.stats.rejections
        );
    }

    if let Some(path) = summary_path {
        write_summary(&path, &summary)?;
        tracing::info!("Summary written to {}", path.display());
    }

    Ok(())
}

fn write_summary(path: &Path, summary: &RunSummary) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), summary)?;
    Ok(())
}

/// Setup logging to stderr and, optionally, to a file in the cache directory
fn setup_logging(log_to_file: bool) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let file_layer = if log_to_file {
        let log_dir = log_dir();
        std::fs::create_dir_all(&log_dir)?;

        let file_appender = tracing_appender::rolling::never(&log_dir, "tileworld.log");
        let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

        // Leak the guard to keep file writer alive
        std::mem::forget(guard);

        Some(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking_file)
                .with_ansi(false),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    if log_to_file {
        tracing::info!("Log file: {}/tileworld.log", log_dir().display());
    }
    Ok(())
}

/// Platform-specific log directory
fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "tileworld")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/tileworld"))
        .join("logs")
}
