//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod cron;
mod database_kind;
mod environment;
mod orm;
mod service_name;

pub use cron::{BackupFrequency, CronExpression};
pub use database_kind::{DatabaseKind, EngineProfile};
pub use environment::Environment;
pub use orm::Orm;
pub use service_name::{sanitize, ServiceName};
