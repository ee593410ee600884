//! Typed error variants for the dropterm-config crate.
//!
//! Provides structured error types for store I/O and preference validation.
//! File-level entry points (`YamlConfigStore::open`, `YamlConfigStore::save`)
//! return `anyhow::Result` and attach path context; the underlying
//! `ConfigError` can be recovered with `downcast_ref`.
//!
//! # Example
//!
//! ```rust,no_run
//! use dropterm_config::ConfigError;
//!
//! fn check_open_err(e: &anyhow::Error) {
//!     if let Some(cfg_err) = e.downcast_ref::<ConfigError>() {
//!         match cfg_err {
//!             ConfigError::Io(io) => eprintln!("I/O error: {io}"),
//!             ConfigError::Parse(p) => eprintln!("YAML parse error: {p}"),
//!             ConfigError::Validation(msg) => eprintln!("Validation: {msg}"),
//!         }
//!     }
//! }
//! ```

use thiserror::Error;

/// Errors that can occur when loading, saving or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An I/O error occurred reading or writing the preferences file.
    #[error("I/O error reading preferences: {0}")]
    Io(#[from] std::io::Error),

    /// The preferences file contained invalid YAML that could not be parsed.
    #[error("YAML parse error in preferences: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    /// A value failed semantic validation and was not written.
    ///
    /// The inner string names the preference and why it was refused.
    #[error("Preference validation error: {0}")]
    Validation(String),
}
