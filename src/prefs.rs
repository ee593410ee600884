//! Preferences dialog controller.
//!
//! [`PrefsDialog`] is what the preferences window talks to. It owns the typed
//! preferences and the rebind coordinator, turns key-capture callbacks into
//! rebind requests, and exposes the shortcut tree as a flat list of rows the
//! UI renders without holding any state of its own.

use crate::showable::ShowableError;
use anyhow::{Context, Result};
use dropterm_config::{ConfigStore, Preferences, YamlConfigStore};
use dropterm_keybindings::{
    AcceleratorCodec, GlobalHotkeys, GtkAccelerator, KeyChord, LocalAccelerators,
    RebindCoordinator, RebindOutcome,
};
use std::sync::Arc;

/// One row of the shortcut tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyRow {
    /// Scope heading ("Global hotkeys", "Local hotkeys").
    Header { title: &'static str },
    /// A shortcut the user can edit or clear.
    Binding {
        config_path: String,
        label: String,
        /// Human-readable chord, `"Disabled"` when unbound.
        accelerator: String,
    },
}

impl KeyRow {
    pub fn title(&self) -> &str {
        match self {
            KeyRow::Header { title } => title,
            KeyRow::Binding { label, .. } => label,
        }
    }

    pub fn config_path(&self) -> Option<&str> {
        match self {
            KeyRow::Header { .. } => None,
            KeyRow::Binding { config_path, .. } => Some(config_path),
        }
    }

    /// Only binding rows accept key capture.
    pub fn editable(&self) -> bool {
        matches!(self, KeyRow::Binding { .. })
    }
}

/// Controller behind the preferences window.
#[derive(Debug)]
pub struct PrefsDialog<H, L> {
    prefs: Preferences,
    keys: RebindCoordinator<H, L>,
}

impl<H: GlobalHotkeys, L: LocalAccelerators> PrefsDialog<H, L> {
    /// Create a dialog over `store` using GTK-style accelerator names.
    pub fn new(store: Arc<dyn ConfigStore>, hotkeys: H, local: L) -> Self {
        Self::with_codec(store, Box::new(GtkAccelerator), hotkeys, local)
    }

    pub fn with_codec(
        store: Arc<dyn ConfigStore>,
        codec: Box<dyn AcceleratorCodec>,
        hotkeys: H,
        local: L,
    ) -> Self {
        let keys = RebindCoordinator::new(store.clone(), codec, hotkeys, local);
        log::info!(
            "Preferences dialog ready with {} shortcuts",
            keys.registry().len()
        );
        Self {
            prefs: Preferences::new(store),
            keys,
        }
    }

    /// Open the dialog over the user's preferences file.
    pub fn open_default(hotkeys: H, local: L) -> Result<Self> {
        let store = YamlConfigStore::open_default().with_context(|| {
            format!(
                "Failed to open preferences at {}",
                YamlConfigStore::default_path().display()
            )
        })?;
        Ok(Self::new(Arc::new(store), hotkeys, local))
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    pub fn keybindings(&self) -> &RebindCoordinator<H, L> {
        &self.keys
    }

    pub fn keybindings_mut(&mut self) -> &mut RebindCoordinator<H, L> {
        &mut self.keys
    }

    /// A key was captured for the row at `config_path`.
    ///
    /// `keycode` and `mask` are the raw keyval and modifier state delivered by
    /// the key-capture cell.
    pub fn on_key_edited(
        &mut self,
        config_path: &str,
        keycode: u32,
        mask: u32,
    ) -> Result<RebindOutcome, ShowableError> {
        let chord = KeyChord::from_raw(keycode, mask);
        self.keys.propose(config_path, chord).map_err(|e| {
            log::warn!("Keybinding {} not changed: {}", config_path, e);
            ShowableError::from(e)
        })
    }

    /// The user cleared the row at `config_path` (Backspace in the key cell).
    pub fn on_key_cleared(&mut self, config_path: &str) -> Result<RebindOutcome, ShowableError> {
        self.keys.clear(config_path).map_err(ShowableError::from)
    }

    /// Shortcut tree flattened for rendering: each scope header followed by
    /// its entries in catalog order.
    pub fn key_rows(&self) -> Vec<KeyRow> {
        let codec = self.keys.codec();
        let mut rows = Vec::with_capacity(self.keys.registry().len() + 2);
        for group in self.keys.registry().groups() {
            rows.push(KeyRow::Header {
                title: group.title(),
            });
            rows.extend(group.entries().iter().map(|entry| KeyRow::Binding {
                config_path: entry.config_path().to_string(),
                label: entry.label().to_string(),
                accelerator: codec.label(entry.chord()),
            }));
        }
        rows
    }

    /// Re-read every shortcut from the store, e.g. when the dialog is shown
    /// again after the store changed underneath it.
    pub fn reinitialize(&mut self) {
        log::debug!("Reloading shortcut rows from the configuration store");
        self.keys.rebuild();
    }
}
