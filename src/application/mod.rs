//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `RegistryStore` - Load/merge/save of the project config
//! - `TopologyBuilder` - Load/merge/save of the compose file
//! - `PortAllocator` - Free host port selection
//! - `ServiceScaffolder` - Register a service and write its files
//! - `OrmFileGenerator` / `OrmRunner` - Migration, seeder and model tooling
//! - `ContainerManager` / `DatabaseOps` - Container and database lifecycle
//! - `BackupManager` - Scheduled backups, cron jobs and purge
//! - `ServiceRemover` - Service deletion

pub mod backup;
pub mod containers;
pub mod database;
pub mod delete_service;
pub mod generate;
pub mod layout;
pub mod orm;
pub mod port_allocation;
pub mod registry;
pub mod scaffold;
pub mod topology;

pub use backup::{parse_retention, BackupManager, BackupSchedule, PurgeReport};
pub use containers::{ContainerManager, StopOutcome};
pub use database::DatabaseOps;
pub use delete_service::{DeleteOptions, DeleteReport, ServiceRemover};
pub use generate::{GeneratedFile, OrmFileGenerator};
pub use layout::ServiceLayout;
pub use orm::{classify_line, LineKind, OrmCommand, OrmRunner};
pub use port_allocation::PortAllocator;
pub use registry::{InitOutcome, RegistryStore, ServicePaths};
pub use scaffold::{ScaffoldReport, ServiceScaffolder};
pub use topology::{RemoveReport, TopologyBuilder, UpsertReport};
