//! Configuration module for Pocketwise
//!
//! Path resolution for the data directory and persisted user settings.

pub mod paths;
pub mod settings;

pub use paths::PocketPaths;
pub use settings::Settings;
