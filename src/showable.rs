//! Errors ready to be shown to the user in a message dialog.

use dropterm_keybindings::BindingError;
use thiserror::Error;

/// Title used for shortcuts refused by the dialog's guards.
pub const KEYBINDING_ERROR_TITLE: &str = "Error setting keybinding.";

/// Title used when the OS refuses a global hotkey.
pub const APPLY_ERROR_TITLE: &str = "key binding error";

/// An error with a dialog title and a message body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{title}: {message}")]
pub struct ShowableError {
    pub title: String,
    pub message: String,
}

impl ShowableError {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

impl From<BindingError> for ShowableError {
    fn from(err: BindingError) -> Self {
        match err {
            BindingError::Duplicate {
                accelerator,
                conflicting_label,
            } => Self::new(
                KEYBINDING_ERROR_TITLE,
                format!(
                    "The shortcut \"{accelerator}\" is already in use by \"{conflicting_label}\"."
                ),
            ),
            BindingError::Untypable { accelerator } => Self::new(
                KEYBINDING_ERROR_TITLE,
                format!(
                    "The shortcut \"{accelerator}\" cannot be used because it will become \
                     impossible to type using this key.\n\n\
                     Please try with a key such as Control, Alt or Shift at the same time."
                ),
            ),
            err @ BindingError::Apply { .. } => Self::new(APPLY_ERROR_TITLE, err.to_string()),
            err @ BindingError::UnknownBinding(_) => {
                Self::new(KEYBINDING_ERROR_TITLE, err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_names_key_and_owner() {
        let err = ShowableError::from(BindingError::Duplicate {
            accelerator: "Ctrl+Alt+G".to_string(),
            conflicting_label: "Toggle terminal visibility".to_string(),
        });
        assert_eq!(err.title, KEYBINDING_ERROR_TITLE);
        assert_eq!(
            err.message,
            "The shortcut \"Ctrl+Alt+G\" is already in use by \"Toggle terminal visibility\"."
        );
    }

    #[test]
    fn test_untypable_suggests_modifiers() {
        let err = ShowableError::from(BindingError::Untypable {
            accelerator: "A".to_string(),
        });
        assert_eq!(err.title, KEYBINDING_ERROR_TITLE);
        assert!(err.message.starts_with("The shortcut \"A\" cannot be used"));
        assert!(err.message.contains("Control, Alt or Shift"));
    }

    #[test]
    fn test_apply_uses_binding_title() {
        let err = ShowableError::from(BindingError::Apply {
            accelerator: "F12".to_string(),
        });
        assert_eq!(err.title, "key binding error");
        assert_eq!(err.message, "Unable to bind F12 key");
        assert_eq!(err.to_string(), "key binding error: Unable to bind F12 key");
    }
}
