//! Shared utilities

pub mod config;
pub mod context;
pub mod diagnostic;
pub mod fs;

pub use config::Settings;
pub use context::GlobalContext;
pub use diagnostic::SettingsIssue;
