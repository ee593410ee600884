//! Configuration key namespace.
//!
//! Every preference lives under [`ROOT`]. Paths are plain strings so they can
//! double as storage keys and as identifiers for keybinding entries.

/// Namespace root for all dropterm preferences.
pub const ROOT: &str = "/apps/dropterm";

/// Expands to a `&'static str` path under [`ROOT`].
macro_rules! path {
    ($suffix:literal) => {
        concat!("/apps/dropterm", $suffix)
    };
}

/// Build a full key from a suffix such as `"/general/window_size"`.
pub fn key(suffix: &str) -> String {
    format!("{ROOT}{suffix}")
}

/// General behaviour of the terminal window.
pub mod general {
    pub const DEFAULT_SHELL: &str = path!("/general/default_shell");
    pub const USE_LOGIN_SHELL: &str = path!("/general/use_login_shell");
    pub const USE_TRAYICON: &str = path!("/general/use_trayicon");
    pub const USE_POPUP: &str = path!("/general/use_popup");
    pub const WINDOW_ONTOP: &str = path!("/general/window_ontop");
    pub const WINDOW_LOSEFOCUS: &str = path!("/general/window_losefocus");
    pub const WINDOW_TABBAR: &str = path!("/general/window_tabbar");
    pub const WINDOW_SIZE: &str = path!("/general/window_size");

    // scrolling
    pub const USE_SCROLLBAR: &str = path!("/general/use_scrollbar");
    pub const HISTORY_SIZE: &str = path!("/general/history_size");
    pub const SCROLL_OUTPUT: &str = path!("/general/scroll_output");
    pub const SCROLL_KEYSTROKE: &str = path!("/general/scroll_keystroke");

    // compatibility
    pub const COMPAT_BACKSPACE: &str = path!("/general/compat_backspace");
    pub const COMPAT_DELETE: &str = path!("/general/compat_delete");

    pub const USE_DEFAULT_FONT: &str = path!("/general/use_default_font");
}

/// Fonts, colours and background.
pub mod style {
    pub const FONT_STYLE: &str = path!("/style/font/style");
    pub const FONT_COLOR: &str = path!("/style/font/color");
    pub const BACKGROUND_COLOR: &str = path!("/style/background/color");
    pub const BACKGROUND_IMAGE: &str = path!("/style/background/image");
    pub const BACKGROUND_OPACITY: &str = path!("/style/background/opacity");
}

/// Shortcut paths. Values are accelerator names or `"disabled"`.
pub mod keybindings {
    /// Stored value meaning "explicitly cleared by the user".
    pub const DISABLED: &str = "disabled";

    pub const SHOW_HIDE: &str = path!("/keybindings/global/show_hide");

    pub const NEW_TAB: &str = path!("/keybindings/local/new_tab");
    pub const CLOSE_TAB: &str = path!("/keybindings/local/close_tab");
    pub const PREVIOUS_TAB: &str = path!("/keybindings/local/previous_tab");
    pub const NEXT_TAB: &str = path!("/keybindings/local/next_tab");
    pub const RENAME_TAB: &str = path!("/keybindings/local/rename_tab");
    pub const CLIPBOARD_COPY: &str = path!("/keybindings/local/clipboard_copy");
    pub const CLIPBOARD_PASTE: &str = path!("/keybindings/local/clipboard_paste");
    pub const TOGGLE_FULLSCREEN: &str = path!("/keybindings/local/toggle_fullscreen");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_prefixes_root() {
        assert_eq!(key("/general/window_size"), general::WINDOW_SIZE);
    }

    #[test]
    fn test_keybinding_paths_are_scoped() {
        assert!(keybindings::SHOW_HIDE.starts_with("/apps/dropterm/keybindings/global/"));
        assert!(keybindings::NEW_TAB.starts_with("/apps/dropterm/keybindings/local/"));
    }
}
