//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--project-dir, --color, --verbose, --no-animation) are inherited by all subcommands
//! - Running without a subcommand prints help; `wizard` is the interactive mode

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// Mastermind - database scaffolding for multi-service projects
#[derive(Parser, Debug)]
#[command(name = "mastermind")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Run 'mastermind init' once, then 'mastermind wizard' to manage services.")]
pub struct Cli {
    /// Project directory holding .mastermindrc and docker-compose.yml
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Disable animations and the pause between wizard steps
    #[arg(long, global = true)]
    pub no_animation: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Create the project config (.mastermindrc)
    Init {
        /// Directory that will hold the service folders
        #[arg(long, value_name = "DIR")]
        root_dir: Option<String>,

        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Open the interactive menu
    #[command(visible_alias = "start")]
    Wizard,

    /// List registered services
    List,
}
