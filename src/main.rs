//! Proofreader - select text, proofread it, replace it in place.
//!
//! Main entry point for the proofreader CLI.

mod app;
mod cli;
mod cmd_debug;
mod cmd_proofread;
mod cmd_settings;

use std::path::PathBuf;

use clap::Parser;
use tracing::debug;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use proofreader_config::ConfigLoader;
use proofreader_protocols::settings::load_settings;

use crate::app::App;
use crate::cli::{Cli, Commands};
use crate::cmd_debug::handle_debug_command;
use crate::cmd_proofread::handle_proofread_command;
use crate::cmd_settings::handle_settings_command;

/// Initialize tracing with console and file output.
///
/// Log files are written to ~/.proofreader/logs/ with daily rotation.
fn init_tracing(log_dir: PathBuf, debug_enabled: bool) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("proofreader")
        .filename_suffix("log")
        .max_log_files(14)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // The guard flushes the file writer on drop; keep it for the whole run.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let default_level = if debug_enabled { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = ConfigLoader::load_or_default(&cli.config)?;
    let app = App::build(&config);

    // Unreadable settings fall back to info level.
    let debug_enabled = load_settings(app.settings.as_ref())
        .await
        .map(|s| s.debug_enabled)
        .unwrap_or(false);
    init_tracing(ConfigLoader::data_dir().join("logs"), debug_enabled)?;
    debug!(config = %cli.config.display(), "configuration loaded");

    match cli.command {
        Commands::Proofread { text, select, tone } => {
            handle_proofread_command(&app, &text, select, tone).await
        }
        Commands::Settings { action } => {
            handle_settings_command(app.settings.as_ref(), action).await
        }
        Commands::Debug => handle_debug_command(&app).await,
    }
}
