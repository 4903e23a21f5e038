pub mod config;
pub mod driver;
pub mod errors;
pub mod geometry;
pub mod measure;
pub mod preview;

use crate::config::AppConfig;
use crate::driver::{run_loop, Host};
use crate::errors::RulerResult;

/// Entry point for the headless ruler host: reads pointer events from stdin
/// and writes one JSON frame per event to stdout.
pub fn run() -> RulerResult<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Fall back to the built-in defaults when no config file is usable.
    let config = match config::load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load config; using defaults");
            AppConfig::default()
        }
    };
    let setup = config.validate()?;

    let mut host = Host::new(setup);
    tracing::info!("ruler host ready, reading events from stdin");
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_loop(&mut host, stdin.lock(), stdout.lock())?;
    tracing::info!("ruler host exited");
    Ok(())
}
