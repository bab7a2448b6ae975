mod cli;
mod host;
mod pattern;

use eaf_common::ConfigError;
use eaf_config::EafConfig;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::host::HostOptions;

/// Merge CLI overrides onto the loaded config. The merged values go through
/// the same checks as a config file.
fn host_options(args: &cli::Args, config: &EafConfig) -> Result<HostOptions, ConfigError> {
    let mut merged = config.clone();
    if let Some(width) = args.width {
        merged.buffer.default_width = width;
    }
    if let Some(height) = args.height {
        merged.buffer.default_height = height;
    }
    eaf_config::validation::validate(&merged)?;

    let options = HostOptions {
        url: args.url.clone(),
        size: merged.buffer.default_size(),
        background: merged.buffer.background(),
        kind: merged.buffer.kind,
        workers: args.workers,
        updates_per_worker: args.updates,
        max_tasks_per_drain: merged.dispatch.max_tasks_per_drain as usize,
        poll_interval: merged.dispatch.poll_interval(),
    };
    options.validate()?;
    Ok(options)
}

fn main() {
    let args = cli::parse();

    // Config first so its log level can seed the filter; errors are
    // reported once logging is up.
    let loaded = match args.config.as_deref() {
        Some(path) => eaf_config::load_from_path(path),
        None => eaf_config::load_config(),
    };
    let (config, load_error) = match loaded {
        Ok(config) => (config, None),
        Err(e) => (EafConfig::default(), Some(e)),
    };

    let log_directive = args
        .log_level
        .as_deref()
        .unwrap_or(config.logging.level.as_directive());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| LevelFilter::INFO.into()),
            ),
        )
        .init();

    tracing::info!("eaf-host v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &args.config {
        tracing::info!("Using config override: {}", path.display());
    }
    if let Some(e) = load_error {
        tracing::warn!("Config load failed, using defaults: {e}");
    }

    let options = match host_options(&args, &config) {
        Ok(options) => options,
        Err(e) => {
            tracing::error!("Invalid options: {e}");
            std::process::exit(2);
        }
    };
    tracing::info!(
        url = %options.url,
        size = %options.size,
        workers = options.workers,
        updates = options.updates_per_worker,
        "Running host"
    );

    match host::run(&options) {
        Ok(summary) => tracing::info!(
            requested = summary.requested,
            rendered = summary.rendered,
            updated_events = summary.updated_events,
            lagged_events = summary.lagged_events,
            snapshot = ?summary.snapshot_size,
            "Shutdown complete"
        ),
        Err(e) => {
            tracing::error!("Host failed: {e}");
            std::process::exit(1);
        }
    }
}
