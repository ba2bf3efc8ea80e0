//! Interactive wizard
//!
//! Drives the menu tree in [`state`] with prompts from [`menu`]. Each screen
//! runs to completion and yields an [`Action`]; the loop folds that into the
//! next screen until the user exits.

mod menu;
mod state;
mod tasks;

use std::path::Path;

use anyhow::{Context, Result};
use crossterm::cursor::Show;
use crossterm::ExecutableCommand;

use mastermind::presentation::ColorWhen;
use mastermind::{MastermindError, Settings, Workspace};

use crate::ui::error::print_error;
use crate::ui::output::Reporter;
use crate::ui::theme::MastermindTheme;

use menu::Prompter;
use state::{Action, Screen};

pub fn cmd_wizard(settings: Settings, color: Option<ColorWhen>) -> Result<i32> {
    let reporter = Reporter::new(color, settings.pacing());
    let workspace = Workspace::new(settings);

    ctrlc::set_handler(move || {
        // dialoguer hides the cursor while a menu is open
        let _ = std::io::stdout().execute(Show);
        std::process::exit(130);
    })
    .context("Failed to install the Ctrl+C handler")?;

    let prompts = Prompter::new(MastermindTheme::new(reporter.supports_unicode()));
    if !ensure_initialized(&workspace, &reporter, &prompts)? {
        return Ok(1);
    }

    reporter.banner();
    let session = Session {
        workspace,
        reporter,
        prompts,
    };
    session.run()?;
    Ok(0)
}

/// Make sure `.mastermindrc` has a `rootDir`, offering to create it when a
/// terminal is attached. `false` means the wizard cannot start.
fn ensure_initialized(workspace: &Workspace, reporter: &Reporter, prompts: &Prompter) -> Result<bool> {
    let registry = workspace.registry();
    match registry.require_root_dir() {
        Ok(_) => return Ok(true),
        Err(MastermindError::ConfigMissing { path }) => {
            reporter.warn(format!("No project configuration found at {}", path.display()));
        }
        Err(err) => return Err(err.into()),
    }

    if !reporter.is_interactive() {
        reporter.info("Run `mastermind init` to create it.");
        return Ok(false);
    }
    if !prompts.confirm("Initialize the project now?", true)? {
        reporter.info("Run `mastermind init` when you are ready.");
        return Ok(false);
    }

    let default_root = workspace.settings().default_root_dir.clone();
    let root_dir = prompts.text_with_default("Root directory for services", &default_root)?;
    registry.set_root_dir(&root_dir)?;
    reporter.success(format!("Initialized {}", registry.repository().path().display()));
    Ok(true)
}

pub(crate) struct Session {
    workspace: Workspace,
    reporter: Reporter,
    prompts: Prompter,
}

impl Session {
    fn run(&self) -> Result<()> {
        let mut screen = Screen::Main;
        while screen != Screen::Exit {
            let action = match self.show(&screen) {
                Ok(action) => action,
                Err(err) => self.recover(&screen, err)?,
            };
            screen = state::transition(&screen, action);
        }
        self.reporter.success("Goodbye!");
        Ok(())
    }

    fn show(&self, screen: &Screen) -> Result<Action> {
        match screen {
            Screen::Exit => Ok(Action::Exit),
            Screen::CreateService => self.create_service(),
            Screen::SelectService => self.select_service(),
            Screen::DeleteService => self.delete_service(),
            _ => {
                let items = state::items(screen);
                let Some(index) = self.prompts.menu(screen, &items)? else {
                    return Ok(Action::Back);
                };
                let choice = &items[index].choice;
                self.perform(screen, choice)?;
                Ok(state::action_for(choice))
            }
        }
    }

    /// Decide how the session continues after a failed screen.
    fn recover(&self, screen: &Screen, err: anyhow::Error) -> Result<Action> {
        if err.downcast_ref::<dialoguer::Error>().is_some() {
            return Err(err);
        }
        if let Some(known) = err.downcast_ref::<MastermindError>() {
            if known.is_fatal() {
                return Err(err);
            }
            if known.is_config_missing() {
                self.reporter.warn(known.to_string());
                self.reporter.pause();
                return Ok(Action::Home);
            }
        }

        print_error(&err);
        self.reporter.pause();
        Ok(if screen.is_flow() {
            Action::Back
        } else {
            Action::Stay
        })
    }

    fn project_root(&self) -> &Path {
        self.workspace.project_root()
    }
}
