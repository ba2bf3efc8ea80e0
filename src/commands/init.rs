//! Init command - seed `.mastermindrc`

use anyhow::{Context, Result};

use mastermind::application::InitOutcome;
use mastermind::presentation::ColorWhen;
use mastermind::{Settings, Workspace};

use crate::ui::output::Reporter;

pub fn cmd_init(
    settings: Settings,
    root_dir: Option<String>,
    force: bool,
    color: Option<ColorWhen>,
) -> Result<()> {
    let reporter = Reporter::new(color, settings.pacing());
    let root_dir = root_dir.unwrap_or_else(|| settings.default_root_dir.clone());
    let workspace = Workspace::new(settings);
    let registry = workspace.registry();
    let path = registry.repository().path().display().to_string();

    let outcome = registry
        .init(&root_dir, force)
        .with_context(|| format!("Failed to initialize {}", path))?;

    match outcome {
        InitOutcome::Created => {
            reporter.success(format!("Created {} (rootDir: {})", path, root_dir));
            reporter.detail("Next: run `mastermind wizard` to create your first service");
        }
        InitOutcome::Overwritten => {
            reporter.success(format!("Overwrote {} (rootDir: {})", path, root_dir));
        }
        InitOutcome::AlreadyExists => {
            reporter.warn(format!("{} already exists. Use --force to overwrite.", path));
        }
    }
    Ok(())
}
