//! Typed errors for shortcut rebinding.

use std::fmt;
use thiserror::Error;

/// Lifecycle of a single rebind attempt.
///
/// `Proposed → Validated → Applying → Committed` on success,
/// `… → Applying → RolledBack` when the global grab fails, and
/// `Proposed → Rejected` when a guard refuses the chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebindState {
    Proposed,
    Validated,
    Applying,
    Committed,
    RolledBack,
    Rejected,
}

impl fmt::Display for RebindState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RebindState::Proposed => "proposed",
            RebindState::Validated => "validated",
            RebindState::Applying => "applying",
            RebindState::Committed => "committed",
            RebindState::RolledBack => "rolled back",
            RebindState::Rejected => "rejected",
        };
        f.write_str(name)
    }
}

/// Why a rebind did not take effect.
///
/// Every variant is recoverable: the registry, the configuration store and the
/// grab state are left exactly as they were before the attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindingError {
    /// The chord is already bound to another action.
    #[error("The shortcut \"{accelerator}\" is already in use by \"{conflicting_label}\"")]
    Duplicate {
        /// Label of the rejected chord.
        accelerator: String,
        /// Label of the action that already owns it.
        conflicting_label: String,
    },

    /// The chord is a bare letter or digit and would block typing.
    #[error("The shortcut \"{accelerator}\" would make it impossible to type that key")]
    Untypable { accelerator: String },

    /// The OS refused the global grab; the previous grab was restored.
    #[error("Unable to bind {accelerator} key")]
    Apply { accelerator: String },

    /// No entry is registered under this configuration path.
    #[error("Unknown keybinding '{0}'")]
    UnknownBinding(String),
}

impl BindingError {
    /// Final state of the attempt that produced this error.
    pub fn state(&self) -> RebindState {
        match self {
            BindingError::Apply { .. } => RebindState::RolledBack,
            BindingError::Duplicate { .. }
            | BindingError::Untypable { .. }
            | BindingError::UnknownBinding(_) => RebindState::Rejected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_of_each_error() {
        let apply = BindingError::Apply {
            accelerator: "F12".to_string(),
        };
        assert_eq!(apply.state(), RebindState::RolledBack);
        assert_eq!(
            BindingError::UnknownBinding("/x".to_string()).state(),
            RebindState::Rejected
        );
    }

    #[test]
    fn test_messages_name_the_key() {
        let dup = BindingError::Duplicate {
            accelerator: "Ctrl+Alt+G".to_string(),
            conflicting_label: "Toggle terminal visibility".to_string(),
        };
        let msg = dup.to_string();
        assert!(msg.contains("Ctrl+Alt+G"));
        assert!(msg.contains("Toggle terminal visibility"));

        let apply = BindingError::Apply {
            accelerator: "F12".to_string(),
        };
        assert_eq!(apply.to_string(), "Unable to bind F12 key");
    }
}
