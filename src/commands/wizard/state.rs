//! Wizard State Machine
//!
//! The menu tree as data: a [`Screen`] is where the user is, a [`Choice`] is
//! what they picked, and [`transition`] computes the next screen. Nothing in
//! here prompts or touches the file system.

use mastermind::application::OrmCommand;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Main,
    CreateService,
    SelectService,
    Service(String),
    Migrations(String),
    Seeders(String),
    Generate(String),
    Container(String),
    Database(String),
    Backups(String),
    Settings,
    DeleteService,
    Exit,
}

/// Menu entries; the non-navigation ones run a task and stay on the screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    Open(Screen),
    Back,
    Exit,
    Orm(OrmCommand),
    GenerateMigration,
    GenerateSeeder,
    GenerateModel,
    ContainerStatus,
    StartContainer,
    StopContainer,
    RefreshContainer,
    PurgeContainer,
    ExportDatabase,
    ImportDatabase,
    ResetDatabase,
    ScheduleBackup,
    ViewCronJobs,
    RemoveCronJob,
    RemoveAllCronJobs,
    ConfigureRetention,
    PurgeBackups,
    ViewConfig,
    ChangeRootDir,
    ResetConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Go(Screen),
    Back,
    Stay,
    Exit,
    /// Configuration went missing; fall back to the main menu
    Home,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    pub choice: Choice,
}

impl MenuItem {
    fn new(label: impl Into<String>, choice: Choice) -> Self {
        Self {
            label: label.into(),
            choice,
        }
    }
}

impl Screen {
    pub fn title(&self) -> String {
        match self {
            Screen::Main => "What would you like to do?".to_string(),
            Screen::CreateService => "Create a new service".to_string(),
            Screen::SelectService => "Select a service".to_string(),
            Screen::Service(s) => format!("Manage '{}'", s),
            Screen::Migrations(s) => format!("Migrations for '{}'", s),
            Screen::Seeders(s) => format!("Seeders for '{}'", s),
            Screen::Generate(s) => format!("Generate files for '{}'", s),
            Screen::Container(s) => format!("Container for '{}'", s),
            Screen::Database(s) => format!("Database for '{}'", s),
            Screen::Backups(s) => format!("Backups for '{}'", s),
            Screen::Settings => "Settings".to_string(),
            Screen::DeleteService => "Delete a service".to_string(),
            Screen::Exit => String::new(),
        }
    }

    /// Service the screen is about, if any
    pub fn service(&self) -> Option<&str> {
        match self {
            Screen::Service(s)
            | Screen::Migrations(s)
            | Screen::Seeders(s)
            | Screen::Generate(s)
            | Screen::Container(s)
            | Screen::Database(s)
            | Screen::Backups(s) => Some(s),
            _ => None,
        }
    }

    /// Screens that ask questions instead of showing a menu
    pub fn is_flow(&self) -> bool {
        matches!(
            self,
            Screen::CreateService | Screen::SelectService | Screen::DeleteService
        )
    }
}

/// Where "Back" leads from `screen`
pub fn parent(screen: &Screen) -> Screen {
    match screen {
        Screen::Main | Screen::Exit => Screen::Exit,
        Screen::CreateService | Screen::SelectService | Screen::Settings | Screen::DeleteService => {
            Screen::Main
        }
        Screen::Service(_) => Screen::SelectService,
        Screen::Migrations(s)
        | Screen::Seeders(s)
        | Screen::Generate(s)
        | Screen::Container(s)
        | Screen::Database(s)
        | Screen::Backups(s) => Screen::Service(s.clone()),
    }
}

pub fn transition(current: &Screen, action: Action) -> Screen {
    match action {
        Action::Go(next) => next,
        Action::Back => parent(current),
        Action::Stay => current.clone(),
        Action::Exit => Screen::Exit,
        Action::Home => Screen::Main,
    }
}

/// Navigation implied by a choice once its task (if any) has run
pub fn action_for(choice: &Choice) -> Action {
    match choice {
        Choice::Open(screen) => Action::Go(screen.clone()),
        Choice::Back => Action::Back,
        Choice::Exit => Action::Exit,
        _ => Action::Stay,
    }
}

/// Menu entries for `screen`; empty for flow screens and `Exit`
pub fn items(screen: &Screen) -> Vec<MenuItem> {
    let back = || MenuItem::new("Back", Choice::Back);

    match screen {
        Screen::Main => vec![
            MenuItem::new("Create a new service", Choice::Open(Screen::CreateService)),
            MenuItem::new("Manage existing services", Choice::Open(Screen::SelectService)),
            MenuItem::new("Settings", Choice::Open(Screen::Settings)),
            MenuItem::new("Delete a service", Choice::Open(Screen::DeleteService)),
            MenuItem::new("Exit", Choice::Exit),
        ],
        Screen::Service(s) => vec![
            MenuItem::new("Migrations", Choice::Open(Screen::Migrations(s.clone()))),
            MenuItem::new("Seeders", Choice::Open(Screen::Seeders(s.clone()))),
            MenuItem::new(
                "Generate migration / seeder / model",
                Choice::Open(Screen::Generate(s.clone())),
            ),
            MenuItem::new("Container", Choice::Open(Screen::Container(s.clone()))),
            MenuItem::new("Database", Choice::Open(Screen::Database(s.clone()))),
            MenuItem::new("Backups", Choice::Open(Screen::Backups(s.clone()))),
            back(),
        ],
        Screen::Migrations(_) => orm_items(&OrmCommand::MIGRATIONS, back()),
        Screen::Seeders(_) => orm_items(&OrmCommand::SEEDERS, back()),
        Screen::Generate(_) => vec![
            MenuItem::new("New migration", Choice::GenerateMigration),
            MenuItem::new("New seeder", Choice::GenerateSeeder),
            MenuItem::new("New model", Choice::GenerateModel),
            back(),
        ],
        Screen::Container(_) => vec![
            MenuItem::new("Show status", Choice::ContainerStatus),
            MenuItem::new("Start", Choice::StartContainer),
            MenuItem::new("Stop", Choice::StopContainer),
            MenuItem::new("Refresh (stop, remove, start)", Choice::RefreshContainer),
            MenuItem::new("Purge (remove container and volumes)", Choice::PurgeContainer),
            back(),
        ],
        Screen::Database(_) => vec![
            MenuItem::new("Export to a dump file", Choice::ExportDatabase),
            MenuItem::new("Import a .sql file", Choice::ImportDatabase),
            MenuItem::new("Reset (drop and recreate)", Choice::ResetDatabase),
            back(),
        ],
        Screen::Backups(_) => vec![
            MenuItem::new("Configure scheduled backups", Choice::ScheduleBackup),
            MenuItem::new("View cron jobs", Choice::ViewCronJobs),
            MenuItem::new("Remove a cron job", Choice::RemoveCronJob),
            MenuItem::new("Remove all cron jobs", Choice::RemoveAllCronJobs),
            MenuItem::new("Configure data purge", Choice::ConfigureRetention),
            MenuItem::new("Purge old backups now", Choice::PurgeBackups),
            back(),
        ],
        Screen::Settings => vec![
            MenuItem::new("View current config", Choice::ViewConfig),
            MenuItem::new("Change root directory", Choice::ChangeRootDir),
            MenuItem::new("Reset config", Choice::ResetConfig),
            back(),
        ],
        Screen::CreateService | Screen::SelectService | Screen::DeleteService | Screen::Exit => {
            Vec::new()
        }
    }
}

fn orm_items(commands: &[OrmCommand], back: MenuItem) -> Vec<MenuItem> {
    commands
        .iter()
        .map(|c| MenuItem::new(c.label(), Choice::Orm(*c)))
        .chain(std::iter::once(back))
        .collect()
}
