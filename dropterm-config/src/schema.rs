//! Default values for known preference paths.
//!
//! A store consults its schema whenever a path has no explicit value, so
//! unsetting a path reverts it to the default listed here.

use crate::keys::{general, keybindings, style};
use crate::value::ConfigValue;
use std::collections::BTreeMap;

/// Map of preference path to default value.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    defaults: BTreeMap<String, ConfigValue>,
}

impl Schema {
    /// An empty schema: every unset path reads as missing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the default for `path`.
    pub fn with(mut self, path: &str, value: impl Into<ConfigValue>) -> Self {
        self.defaults.insert(path.to_string(), value.into());
        self
    }

    pub fn default_for(&self, path: &str) -> Option<&ConfigValue> {
        self.defaults.get(path)
    }

    pub fn len(&self) -> usize {
        self.defaults.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty()
    }

    /// Application defaults shipped with dropterm.
    pub fn dropterm() -> Self {
        Self::new()
            // general
            .with(general::USE_LOGIN_SHELL, false)
            .with(general::USE_TRAYICON, true)
            .with(general::USE_POPUP, true)
            .with(general::WINDOW_ONTOP, true)
            .with(general::WINDOW_LOSEFOCUS, false)
            .with(general::WINDOW_TABBAR, true)
            .with(general::WINDOW_SIZE, 50)
            // scrolling
            .with(general::USE_SCROLLBAR, true)
            .with(general::HISTORY_SIZE, 1024)
            .with(general::SCROLL_OUTPUT, false)
            .with(general::SCROLL_KEYSTROKE, true)
            // compatibility
            .with(general::COMPAT_BACKSPACE, "ascii-delete")
            .with(general::COMPAT_DELETE, "delete-sequence")
            // appearance
            .with(general::USE_DEFAULT_FONT, true)
            .with(style::FONT_STYLE, "Monospace 10")
            .with(style::FONT_COLOR, "#ffffff")
            .with(style::BACKGROUND_COLOR, "#000000")
            .with(style::BACKGROUND_OPACITY, 100)
            // shortcuts
            .with(keybindings::SHOW_HIDE, "F12")
            .with(keybindings::NEW_TAB, "<Shift><Control>t")
            .with(keybindings::CLOSE_TAB, "<Shift><Control>w")
            .with(keybindings::PREVIOUS_TAB, "<Control>Page_Up")
            .with(keybindings::NEXT_TAB, "<Control>Page_Down")
            .with(keybindings::RENAME_TAB, "F2")
            .with(keybindings::CLIPBOARD_COPY, "<Shift><Control>c")
            .with(keybindings::CLIPBOARD_PASTE, "<Shift><Control>v")
            .with(keybindings::TOGGLE_FULLSCREEN, "F11")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_schema_has_no_defaults() {
        let schema = Schema::new();
        assert!(schema.is_empty());
        assert!(schema.default_for(general::WINDOW_SIZE).is_none());
    }

    #[test]
    fn test_with_replaces_existing_default() {
        let schema = Schema::new()
            .with(general::WINDOW_SIZE, 50)
            .with(general::WINDOW_SIZE, 70);
        assert_eq!(schema.len(), 1);
        assert_eq!(
            schema.default_for(general::WINDOW_SIZE),
            Some(&ConfigValue::Int(70))
        );
    }

    #[test]
    fn test_dropterm_defaults_cover_every_shortcut() {
        let schema = Schema::dropterm();
        for path in [
            keybindings::SHOW_HIDE,
            keybindings::NEW_TAB,
            keybindings::CLOSE_TAB,
            keybindings::PREVIOUS_TAB,
            keybindings::NEXT_TAB,
            keybindings::RENAME_TAB,
            keybindings::CLIPBOARD_COPY,
            keybindings::CLIPBOARD_PASTE,
            keybindings::TOGGLE_FULLSCREEN,
        ] {
            assert!(
                schema.default_for(path).and_then(ConfigValue::as_str).is_some(),
                "missing default for {path}"
            );
        }
    }
}
