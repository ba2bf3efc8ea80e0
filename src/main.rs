//! Mastermind CLI - per-service database scaffolding
//!
//! Usage: mastermind [OPTIONS] [COMMAND]
//!
//! Commands:
//!   init    Create the project config (.mastermindrc)
//!   wizard  Open the interactive menu (alias: start)
//!   list    List registered services

mod commands;
mod ui;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use mastermind::presentation::{Cli, Commands};
use mastermind::Settings;

const LOG_ENV: &str = "MASTERMIND_LOG";

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            ui::error::print_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<u8> {
    let project_root = match cli.project_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to resolve the current directory")?,
    };
    load_dotenv(&project_root);

    let mut settings = Settings::new(project_root).with_env_overrides();
    if cli.no_animation {
        settings = settings.without_pacing();
    }
    tracing::debug!(?settings, "resolved settings");

    match cli.command {
        None => {
            Cli::command().print_help()?;
            println!();
            Ok(0)
        }
        Some(Commands::Init { root_dir, force }) => {
            commands::init::cmd_init(settings, root_dir, force, cli.color)?;
            Ok(0)
        }
        Some(Commands::Wizard) => {
            let code = commands::wizard::cmd_wizard(settings, cli.color)?;
            Ok(u8::try_from(code).unwrap_or(1))
        }
        Some(Commands::List) => {
            commands::list::cmd_list(settings, cli.color)?;
            Ok(0)
        }
    }
}

fn load_dotenv(project_root: &std::path::Path) {
    let path: PathBuf = project_root.join(".env");
    match dotenvy::from_path(&path) {
        Ok(()) => tracing::debug!(path = %path.display(), "loaded environment file"),
        Err(err) if err.not_found() => {}
        Err(err) => tracing::warn!(path = %path.display(), error = %err, "ignoring unreadable .env"),
    }
}

/// Diagnostics go to stderr so they never mix with prompts on stdout.
fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        let level = match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        EnvFilter::new(format!("mastermind={level}"))
    });

    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_filter(filter),
        )
        .try_init();
    if let Err(err) = result {
        eprintln!("warning: diagnostics logging disabled: {err}");
    }
}
