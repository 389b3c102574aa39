//! Configuration for the termtabs tab orchestration layer.
//!
//! This crate provides:
//!
//! - `Settings`: capture flags and locale, persisted as YAML
//! - `Profile` / `ProfileManager`: the favorite records tabs are opened from
//! - `SettingsWatcher`: hot reload of the settings file
//! - `ConfigError`: typed failures for settings I/O

pub mod error;
pub mod profile_types;
pub mod settings;
#[cfg(feature = "watcher")]
pub mod watcher;

pub use error::ConfigError;
pub use profile_types::{Profile, ProfileId, ProfileManager};
pub use settings::{Settings, SharedSettings};
#[cfg(feature = "watcher")]
pub use watcher::{SettingsReloadEvent, SettingsWatcher};
