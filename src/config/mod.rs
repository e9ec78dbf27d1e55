//! Workspace configuration (`.ioblate.json`).
/// Config file loader
mod loader;
/// Script/markup file pattern matcher
mod matcher;
/// Configuration types and settings
mod types;

pub use loader::{
    CONFIG_FILE_NAME,
    load_settings,
};
pub use matcher::{
    FileKind,
    FileMatcher,
    MatcherError,
};
pub use types::{
    ConfigError,
    MarkupScan,
    Settings,
    ValidationError,
};
