//! Keybinding registry and rebind core for dropterm.
//!
//! This crate owns the set of named shortcuts the preferences dialog edits
//! and the protocol for changing one of them safely.
//!
//! Features:
//! - Two-scope registry (Global hotkeys grabbed at the OS level, Local
//!   accelerators resolved by the terminal window)
//! - GTK-style accelerator names (`<Control><Alt>g`, `F12`, `disabled`)
//! - Conflict and typability guards
//! - Rebind with rollback when a global grab cannot be acquired

mod accelerator;
pub mod catalog;
mod chord;
mod conflict;
mod coordinator;
mod error;
mod guard;
mod platform;
mod registry;

pub use accelerator::{
    AcceleratorCodec, GtkAccelerator, ParseError, accelerator_label, accelerator_name,
    parse_accelerator,
};
pub use catalog::CatalogEntry;
pub use chord::{KeyChord, Modifiers};
pub use conflict::{Conflict, find_conflict, find_duplicates};
pub use coordinator::{RebindCoordinator, RebindOutcome};
pub use error::{BindingError, RebindState};
pub use guard::is_typable;
pub use platform::{GlobalHotkeys, LocalAccelerators};
pub use registry::{BindingEntry, BindingGroup, BindingRegistry, Scope};
