//! The fixed catalog of recognised shortcut paths.

use dropterm_config::keys::keybindings;

/// A recognised shortcut: where it is stored and what it is called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub config_path: &'static str,
    pub label: &'static str,
}

const fn entry(config_path: &'static str, label: &'static str) -> CatalogEntry {
    CatalogEntry { config_path, label }
}

/// Shortcuts grabbed at the OS level, active while the terminal is hidden.
pub const GLOBAL_BINDINGS: &[CatalogEntry] =
    &[entry(keybindings::SHOW_HIDE, "Toggle terminal visibility")];

/// Shortcuts handled by the terminal window's accelerator table.
pub const LOCAL_BINDINGS: &[CatalogEntry] = &[
    entry(keybindings::NEW_TAB, "New tab"),
    entry(keybindings::CLOSE_TAB, "Close tab"),
    entry(keybindings::PREVIOUS_TAB, "Go to previous tab"),
    entry(keybindings::NEXT_TAB, "Go to next tab"),
    entry(keybindings::RENAME_TAB, "Rename current tab"),
    entry(keybindings::CLIPBOARD_COPY, "Copy text to clipboard"),
    entry(keybindings::CLIPBOARD_PASTE, "Paste text from clipboard"),
    entry(keybindings::TOGGLE_FULLSCREEN, "Toggle Fullscreen"),
];
