//! Configuration system for the dropterm drop-down terminal.
//!
//! This crate provides the configuration store the preferences dialog reads
//! and writes. It includes:
//!
//! - The [`ConfigStore`] capability (typed get/set/unset with change notification)
//! - An in-memory store and a YAML-file store with atomic saves
//! - Schema defaults (unset paths revert to them)
//! - The preference key namespace, shortcut paths included
//! - Typed, validated accessors for general, scrolling, appearance and
//!   compatibility preferences

pub mod error;
pub mod keys;
pub mod persistence;
pub mod preferences;
pub mod schema;
pub mod store;
pub mod value;

// Re-export main types for convenience
pub use error::ConfigError;
pub use keys::key;
pub use persistence::YamlConfigStore;
pub use preferences::{EraseBinding, Preferences};
pub use schema::Schema;
pub use store::{ChangeListener, ConfigChange, ConfigStore, ListenerId, MemoryConfigStore};
pub use value::ConfigValue;
