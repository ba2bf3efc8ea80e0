//! List command - registered services without prompting

use anyhow::Result;

use mastermind::presentation::ColorWhen;
use mastermind::{Settings, Workspace};

use crate::ui::output::Reporter;
use crate::ui::primitives::icon::Icon;

pub fn cmd_list(settings: Settings, color: Option<ColorWhen>) -> Result<()> {
    let reporter = Reporter::new(color, settings.pacing());
    let workspace = Workspace::new(settings);
    let registry = workspace.registry();

    let root_dir = registry.require_root_dir()?;
    let config = registry.load()?;
    if config.services.is_empty() {
        reporter.info(format!("No services registered (rootDir: {})", root_dir));
        return Ok(());
    }

    reporter.heading(&format!("Services in {}", root_dir));
    for (name, entry) in &config.services {
        reporter.step(
            Icon::Database,
            format!("{} ({}, {})", name, entry.database.display_name(), entry.orm),
        );
        reporter.detail(reporter.dim(&format!("migrations: {}", entry.migrations_dir)));
    }
    Ok(())
}
