//! CLI argument types and command execution.

pub mod args;
pub mod run;

pub use args::SyncArgs;
