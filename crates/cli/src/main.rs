//! Clinic CLI - book and manage clinic appointments from the terminal

mod commands;
mod logging;
mod session_file;
mod state_dir;

use anyhow::{Context as _, Result};
use clap::{Parser, ValueEnum};
use clinic_core::{ClientConfig, MemoryNavigator, NavigationGuard, Session};
use clinic_http::{ClientError, ClinicClient};
use commands::{Commands, Context};
use session_file::FileSessionStore;
use state_dir::StateDir;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{Level, debug, error};

#[derive(Parser)]
#[command(name = "clinic")]
#[command(about = "Book and manage clinic appointments")]
#[command(version)]
struct Cli {
    /// Set logging level
    #[arg(short = 'l', long, global = true, default_value = "warn")]
    log_level: LogLevel,

    /// Configuration file (defaults to config.toml in the config directory)
    #[arg(short = 'c', long, global = true, env = "CLINIC_CONFIG")]
    config: Option<PathBuf>,

    /// Backend origin, overrides the configuration
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Directory for configuration, session and logs
    #[arg(short = 'd', long, global = true, env = "CLINIC_STATE_DIR")]
    data_dir: Option<PathBuf>,

    /// Also write logs to cli.log in the data directory
    #[arg(long, global = true)]
    log_file: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let state_dir = cli
        .data_dir
        .clone()
        .map_or_else(StateDir::new, StateDir::with_override);

    let log_path = state_dir.log_path();
    logging::init_logging(cli.log_level.into(), cli.log_file.then_some(log_path.as_path()))?;

    let config = load_config(&cli, &state_dir)?;
    debug!(api = %config.api_base_url, "Using backend");

    let session = Session::new(FileSessionStore::new(
        state_dir.session_path(&config.session_key),
    ));
    let navigator = Arc::new(MemoryNavigator::new(NavigationGuard::new(session.clone())));
    let client = ClinicClient::builder()
        .config(&config)
        .session(session.clone())
        .navigator(navigator.clone())
        .build()?;

    let ctx = Context {
        client,
        session,
        navigator,
        json: cli.json,
    };

    if let Err(e) = cli.command.execute(&ctx).await {
        if e
            .downcast_ref::<ClientError>()
            .is_some_and(ClientError::is_unauthorized)
        {
            eprintln!("Not signed in or the session expired. Run `clinic login` first.");
        }
        error!("Command failed: {e:#}");
        std::process::exit(1);
    }

    Ok(())
}

fn load_config(cli: &Cli, state_dir: &StateDir) -> Result<ClientConfig> {
    let default_path = state_dir.config_path();
    let path = match &cli.config {
        Some(path) => Some(path.as_path()),
        None if default_path.exists() => Some(default_path.as_path()),
        None => None,
    };

    let mut config = ClientConfig::load(path).with_context(|| match path {
        Some(path) => format!("Failed to load configuration from {}", path.display()),
        None => "Failed to load configuration".to_string(),
    })?;
    if let Some(url) = &cli.api_url {
        config.api_base_url.clone_from(url);
    }
    Ok(config)
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(log_level: LogLevel) -> Self {
        match log_level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_book_parses_date_and_slot() {
        let cli = Cli::try_parse_from([
            "clinic",
            "appointments",
            "book",
            "2025-03-14",
            "afternoon",
            "--doctor",
            "Dr. A",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Appointments {
                command: commands::AppointmentCommands::Book {
                    slot: clinic_http::types::TimeSlot::Afternoon,
                    ..
                }
            }
        ));
    }

    #[test]
    fn test_api_url_overrides_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let state_dir = StateDir::with_override(dir.path());
        let cli = Cli::try_parse_from(["clinic", "--api-url", "http://clinic.test", "doctors"]).unwrap();

        let config = load_config(&cli, &state_dir).unwrap();
        assert_eq!(config.api_base_url, "http://clinic.test");
        assert_eq!(config.request_timeout_secs, 10);
    }
}
