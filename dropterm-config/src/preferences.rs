//! Typed preferences over a [`ConfigStore`].
//!
//! General, scrolling, appearance and compatibility settings edited by the
//! preferences dialog. Getters fall back to sensible values when the store has
//! neither an explicit value nor a schema default; setters validate before
//! writing and never write a rejected value.

use crate::error::ConfigError;
use crate::keys::{general, style};
use crate::store::ConfigStore;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// What the terminal sends for the Backspace or Delete key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EraseBinding {
    /// `ascii-delete`
    AsciiDelete,
    /// `delete-sequence`
    DeleteSequence,
    /// `ascii-backspace`
    AsciiBackspace,
}

impl EraseBinding {
    pub const ALL: [EraseBinding; 3] = [
        EraseBinding::AsciiDelete,
        EraseBinding::DeleteSequence,
        EraseBinding::AsciiBackspace,
    ];

    /// Value stored in the configuration.
    pub fn as_config_str(self) -> &'static str {
        match self {
            EraseBinding::AsciiDelete => "ascii-delete",
            EraseBinding::DeleteSequence => "delete-sequence",
            EraseBinding::AsciiBackspace => "ascii-backspace",
        }
    }

    pub fn from_config_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.as_config_str() == s)
    }

    /// Text shown in the compatibility combo boxes.
    pub fn label(self) -> &'static str {
        match self {
            EraseBinding::AsciiDelete => "ASCII DEL",
            EraseBinding::DeleteSequence => "Escape sequence",
            EraseBinding::AsciiBackspace => "Control-H",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.label() == label)
    }
}

/// Typed view of the dialog's non-shortcut preferences.
#[derive(Clone)]
pub struct Preferences {
    store: Arc<dyn ConfigStore>,
}

impl std::fmt::Debug for Preferences {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preferences").finish_non_exhaustive()
    }
}

/// Generates a bool getter/setter pair for one path.
macro_rules! bool_pref {
    ($(#[$meta:meta])* $get:ident, $set:ident, $path:expr, $default:expr) => {
        $(#[$meta])*
        pub fn $get(&self) -> bool {
            self.store.get_bool($path).unwrap_or($default)
        }

        pub fn $set(&self, value: bool) {
            self.store.set_bool($path, value);
        }
    };
}

impl Preferences {
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn ConfigStore> {
        &self.store
    }

    // ── General ────────────────────────────────────────────────────────────

    /// Shell to launch in new tabs; `None` means the user's login shell.
    pub fn default_shell(&self) -> Option<String> {
        self.store
            .get_string(general::DEFAULT_SHELL)
            .filter(|s| !s.is_empty())
    }

    pub fn set_default_shell(&self, shell: &str) {
        self.store.set_string(general::DEFAULT_SHELL, shell);
    }

    bool_pref!(use_login_shell, set_use_login_shell, general::USE_LOGIN_SHELL, false);
    bool_pref!(use_trayicon, set_use_trayicon, general::USE_TRAYICON, true);
    bool_pref!(
        /// Show a notification popup on startup.
        use_popup,
        set_use_popup,
        general::USE_POPUP,
        true
    );
    bool_pref!(window_ontop, set_window_ontop, general::WINDOW_ONTOP, true);
    bool_pref!(
        /// Hide the window when it loses focus.
        window_losefocus,
        set_window_losefocus,
        general::WINDOW_LOSEFOCUS,
        false
    );
    bool_pref!(window_tabbar, set_window_tabbar, general::WINDOW_TABBAR, true);

    /// Window height as a percentage of the screen.
    pub fn window_size(&self) -> i64 {
        self.store.get_int(general::WINDOW_SIZE).unwrap_or(50)
    }

    pub fn set_window_size(&self, percent: i64) -> Result<(), ConfigError> {
        check_range("window_size", percent, 0, 100)?;
        self.store.set_int(general::WINDOW_SIZE, percent);
        Ok(())
    }

    // ── Scrolling ──────────────────────────────────────────────────────────

    bool_pref!(use_scrollbar, set_use_scrollbar, general::USE_SCROLLBAR, true);
    bool_pref!(
        /// Scroll to the bottom when new output arrives.
        scroll_output,
        set_scroll_output,
        general::SCROLL_OUTPUT,
        false
    );
    bool_pref!(
        /// Scroll to the bottom on a keystroke.
        scroll_keystroke,
        set_scroll_keystroke,
        general::SCROLL_KEYSTROKE,
        true
    );

    /// Scrollback length in lines.
    pub fn history_size(&self) -> i64 {
        self.store.get_int(general::HISTORY_SIZE).unwrap_or(1024)
    }

    pub fn set_history_size(&self, lines: i64) -> Result<(), ConfigError> {
        if lines < 1 {
            return Err(ConfigError::Validation(format!(
                "history_size must be at least 1, got {lines}"
            )));
        }
        self.store.set_int(general::HISTORY_SIZE, lines);
        Ok(())
    }

    // ── Appearance ─────────────────────────────────────────────────────────

    bool_pref!(
        /// Use the desktop's monospace font instead of `font_style`.
        use_default_font,
        set_use_default_font,
        general::USE_DEFAULT_FONT,
        true
    );

    pub fn font_style(&self) -> Option<String> {
        self.store.get_string(style::FONT_STYLE)
    }

    pub fn set_font_style(&self, font: &str) {
        self.store.set_string(style::FONT_STYLE, font);
    }

    pub fn font_color(&self) -> Option<String> {
        self.store.get_string(style::FONT_COLOR)
    }

    pub fn set_font_color(&self, color: &str) -> Result<(), ConfigError> {
        validate_color("font_color", color)?;
        self.store.set_string(style::FONT_COLOR, color);
        Ok(())
    }

    pub fn background_color(&self) -> Option<String> {
        self.store.get_string(style::BACKGROUND_COLOR)
    }

    pub fn set_background_color(&self, color: &str) -> Result<(), ConfigError> {
        validate_color("background_color", color)?;
        self.store.set_string(style::BACKGROUND_COLOR, color);
        Ok(())
    }

    /// Background image, only reported when the file still exists.
    pub fn background_image(&self) -> Option<String> {
        self.store
            .get_string(style::BACKGROUND_IMAGE)
            .filter(|p| Path::new(p).is_file())
    }

    pub fn set_background_image(&self, path: &Path) -> Result<(), ConfigError> {
        if !path.is_file() {
            return Err(ConfigError::Validation(format!(
                "background_image {:?} is not a file",
                path
            )));
        }
        self.store.set_string(style::BACKGROUND_IMAGE, &path.to_string_lossy());
        Ok(())
    }

    pub fn clear_background_image(&self) {
        self.store.unset(style::BACKGROUND_IMAGE);
    }

    /// Background opacity in percent.
    pub fn background_opacity(&self) -> i64 {
        self.store.get_int(style::BACKGROUND_OPACITY).unwrap_or(100)
    }

    pub fn set_background_opacity(&self, percent: i64) -> Result<(), ConfigError> {
        check_range("background_opacity", percent, 0, 100)?;
        self.store.set_int(style::BACKGROUND_OPACITY, percent);
        Ok(())
    }

    // ── Compatibility ──────────────────────────────────────────────────────

    pub fn compat_backspace(&self) -> EraseBinding {
        self.erase_binding(general::COMPAT_BACKSPACE, EraseBinding::AsciiDelete)
    }

    pub fn set_compat_backspace(&self, binding: EraseBinding) {
        self.store.set_string(general::COMPAT_BACKSPACE, binding.as_config_str());
    }

    pub fn compat_delete(&self) -> EraseBinding {
        self.erase_binding(general::COMPAT_DELETE, EraseBinding::DeleteSequence)
    }

    pub fn set_compat_delete(&self, binding: EraseBinding) {
        self.store.set_string(general::COMPAT_DELETE, binding.as_config_str());
    }

    /// Revert both erase bindings to their defaults.
    pub fn reset_compat_defaults(&self) {
        self.store.unset(general::COMPAT_BACKSPACE);
        self.store.unset(general::COMPAT_DELETE);
    }

    fn erase_binding(&self, path: &str, fallback: EraseBinding) -> EraseBinding {
        match self.store.get_string(path) {
            Some(s) => EraseBinding::from_config_str(&s).unwrap_or_else(|| {
                log::warn!("Unknown erase binding '{}' at {}, using {:?}", s, path, fallback);
                fallback
            }),
            None => fallback,
        }
    }
}

fn check_range(name: &str, value: i64, min: i64, max: i64) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!(
            "{name} must be between {min} and {max}, got {value}"
        )))
    }
}

/// Accepts `#rrggbb` and the 16-bit-per-channel `#rrrrggggbbbb` form.
fn validate_color(name: &str, color: &str) -> Result<(), ConfigError> {
    let valid = color.strip_prefix('#').is_some_and(|hex| {
        matches!(hex.len(), 6 | 12) && hex.chars().all(|c| c.is_ascii_hexdigit())
    });
    if valid {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!(
            "{name} must be #rrggbb or #rrrrggggbbbb, got '{color}'"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;
    use crate::store::MemoryConfigStore;
    use tempfile::TempDir;

    fn prefs() -> (Preferences, Arc<MemoryConfigStore>) {
        let store = Arc::new(MemoryConfigStore::new(Schema::dropterm()));
        (Preferences::new(store.clone()), store)
    }

    #[test]
    fn test_defaults_come_from_schema() {
        let (prefs, _) = prefs();
        assert!(prefs.use_trayicon());
        assert!(!prefs.use_login_shell());
        assert_eq!(prefs.window_size(), 50);
        assert_eq!(prefs.history_size(), 1024);
        assert_eq!(prefs.default_shell(), None);
        assert_eq!(prefs.compat_backspace(), EraseBinding::AsciiDelete);
        assert_eq!(prefs.compat_delete(), EraseBinding::DeleteSequence);
    }

    #[test]
    fn test_bool_setters_write_store() {
        let (prefs, store) = prefs();
        prefs.set_window_losefocus(true);
        assert!(prefs.window_losefocus());
        assert_eq!(store.get_bool(general::WINDOW_LOSEFOCUS), Some(true));
    }

    #[test]
    fn test_window_size_out_of_range_is_rejected() {
        let (prefs, store) = prefs();
        assert!(matches!(
            prefs.set_window_size(150),
            Err(ConfigError::Validation(_))
        ));
        assert!(!store.is_set(general::WINDOW_SIZE));

        prefs.set_window_size(75).unwrap();
        assert_eq!(prefs.window_size(), 75);
    }

    #[test]
    fn test_history_size_must_be_positive() {
        let (prefs, _) = prefs();
        assert!(prefs.set_history_size(0).is_err());
        prefs.set_history_size(10_000).unwrap();
        assert_eq!(prefs.history_size(), 10_000);
    }

    #[test]
    fn test_color_validation() {
        let (prefs, store) = prefs();
        prefs.set_font_color("#00ff00").unwrap();
        prefs.set_background_color("#ffff00000000").unwrap();
        assert!(prefs.set_font_color("green").is_err());
        assert!(prefs.set_font_color("#12345").is_err());
        assert_eq!(store.get_string(style::FONT_COLOR), Some("#00ff00".to_string()));
    }

    #[test]
    fn test_background_image_requires_existing_file() {
        let (prefs, store) = prefs();
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let image = temp_dir.path().join("bg.png");

        assert!(prefs.set_background_image(&image).is_err());
        assert!(!store.is_set(style::BACKGROUND_IMAGE));

        std::fs::write(&image, b"png").expect("Failed to write image");
        prefs.set_background_image(&image).unwrap();
        assert_eq!(
            prefs.background_image(),
            Some(image.to_string_lossy().into_owned())
        );

        prefs.clear_background_image();
        assert_eq!(prefs.background_image(), None);
    }

    #[test]
    fn test_erase_bindings_round_trip_through_store() {
        let (prefs, store) = prefs();
        prefs.set_compat_backspace(EraseBinding::AsciiBackspace);
        assert_eq!(
            store.get_string(general::COMPAT_BACKSPACE),
            Some("ascii-backspace".to_string())
        );
        assert_eq!(prefs.compat_backspace(), EraseBinding::AsciiBackspace);
    }

    #[test]
    fn test_reset_compat_defaults() {
        let (prefs, _) = prefs();
        prefs.set_compat_backspace(EraseBinding::AsciiBackspace);
        prefs.set_compat_delete(EraseBinding::AsciiDelete);

        prefs.reset_compat_defaults();

        assert_eq!(prefs.compat_backspace(), EraseBinding::AsciiDelete);
        assert_eq!(prefs.compat_delete(), EraseBinding::DeleteSequence);
    }

    #[test]
    fn test_unknown_erase_binding_falls_back() {
        let (prefs, store) = prefs();
        store.set_string(general::COMPAT_DELETE, "bogus");
        assert_eq!(prefs.compat_delete(), EraseBinding::DeleteSequence);
    }

    #[test]
    fn test_erase_binding_labels() {
        for binding in EraseBinding::ALL {
            assert_eq!(EraseBinding::from_label(binding.label()), Some(binding));
        }
        assert_eq!(EraseBinding::from_label("Control-H"), Some(EraseBinding::AsciiBackspace));
    }
}
