//! Terminal UI for the `mastermind` binary

pub mod error;
pub mod output;
pub mod primitives;
pub mod terminal;
pub mod theme;
