//! Preferences core of the dropterm drop-down terminal.
//!
//! The workspace is split into:
//! - `dropterm-config`: configuration store, schema defaults, typed preferences
//! - `dropterm-keybindings`: shortcut registry, guards and rebind coordinator
//! - this crate: the preferences dialog controller wiring both together

/// Application version (root crate version, for use by sub-crates).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod prefs;
pub mod showable;

pub use prefs::{KeyRow, PrefsDialog};
pub use showable::ShowableError;

pub use dropterm_config as config;
pub use dropterm_keybindings as keybindings;
