//! Two-scope registry of shortcut entries.
//!
//! The registry is a fixed two-level tree: one Global group and one Local
//! group, each holding entries in catalog order. It is the source of truth the
//! preferences UI renders; only the rebind coordinator mutates it.

use crate::accelerator::AcceleratorCodec;
use crate::catalog::{self, CatalogEntry};
use crate::chord::KeyChord;
use crate::conflict;
use dropterm_config::ConfigStore;
use std::collections::HashSet;
use std::fmt;

/// Where a shortcut is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Grabbed at the OS level, active even when the terminal is unfocused.
    Global,
    /// Resolved by the terminal window's own accelerator table.
    Local,
}

impl Scope {
    /// Group heading shown in the shortcut tree.
    pub fn title(self) -> &'static str {
        match self {
            Scope::Global => "Global hotkeys",
            Scope::Local => "Local hotkeys",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Global => write!(f, "global"),
            Scope::Local => write!(f, "local"),
        }
    }
}

/// One named shortcut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingEntry {
    config_path: String,
    label: String,
    chord: KeyChord,
    scope: Scope,
}

impl BindingEntry {
    /// Storage key; unique across the registry.
    pub fn config_path(&self) -> &str {
        &self.config_path
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn chord(&self) -> KeyChord {
        self.chord
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }
}

/// The entries of one scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingGroup {
    scope: Scope,
    entries: Vec<BindingEntry>,
}

impl BindingGroup {
    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn title(&self) -> &'static str {
        self.scope.title()
    }

    pub fn entries(&self) -> &[BindingEntry] {
        &self.entries
    }
}

/// Registry of shortcut entries, grouped by scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingRegistry {
    global: BindingGroup,
    local: BindingGroup,
}

impl BindingRegistry {
    /// Build the registry for the built-in catalog.
    pub fn build(store: &dyn ConfigStore, codec: &dyn AcceleratorCodec) -> Self {
        Self::from_catalog(
            catalog::GLOBAL_BINDINGS,
            catalog::LOCAL_BINDINGS,
            store,
            codec,
        )
    }

    /// Build a registry from explicit catalogs, reading each path's current
    /// value from `store`.
    ///
    /// Missing, empty, `"disabled"` and unparsable values become unbound.
    /// Unparsable values and duplicate paths are logged; a duplicate path keeps
    /// its first occurrence only.
    pub fn from_catalog(
        global: &[CatalogEntry],
        local: &[CatalogEntry],
        store: &dyn ConfigStore,
        codec: &dyn AcceleratorCodec,
    ) -> Self {
        log::info!(
            "Building binding registry from {} global and {} local paths",
            global.len(),
            local.len()
        );

        let mut seen = HashSet::new();
        let mut group = |scope: Scope, catalog: &[CatalogEntry]| BindingGroup {
            scope,
            entries: catalog
                .iter()
                .filter(|item| {
                    let fresh = seen.insert(item.config_path);
                    if !fresh {
                        log::warn!("Duplicate binding path '{}' ignored", item.config_path);
                    }
                    fresh
                })
                .map(|item| BindingEntry {
                    config_path: item.config_path.to_string(),
                    label: item.label.to_string(),
                    chord: read_chord(store, codec, item.config_path),
                    scope,
                })
                .collect(),
        };

        let registry = Self {
            global: group(Scope::Global, global),
            local: group(Scope::Local, local),
        };

        for dup in conflict::find_duplicates(&registry) {
            log::warn!(
                "Shortcut {} is bound to both '{}' and '{}'",
                codec.label(dup.chord),
                dup.first.label(),
                dup.second.label()
            );
        }

        log::info!(
            "Binding registry initialized with {} entries ({} bound)",
            registry.len(),
            registry.entries().filter(|e| !e.chord.is_unbound()).count()
        );
        registry
    }

    pub fn group(&self, scope: Scope) -> &BindingGroup {
        match scope {
            Scope::Global => &self.global,
            Scope::Local => &self.local,
        }
    }

    /// Both groups, Global first.
    pub fn groups(&self) -> [&BindingGroup; 2] {
        [&self.global, &self.local]
    }

    /// All entries: Global group in catalog order, then Local group.
    pub fn entries(&self) -> impl Iterator<Item = &BindingEntry> {
        self.global.entries.iter().chain(self.local.entries.iter())
    }

    pub fn get(&self, config_path: &str) -> Option<&BindingEntry> {
        self.entries().find(|e| e.config_path == config_path)
    }

    pub fn len(&self) -> usize {
        self.global.entries.len() + self.local.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replace the chord of `config_path`, returning the previous one.
    pub(crate) fn set_chord(&mut self, config_path: &str, chord: KeyChord) -> Option<KeyChord> {
        self.global
            .entries
            .iter_mut()
            .chain(self.local.entries.iter_mut())
            .find(|e| e.config_path == config_path)
            .map(|e| std::mem::replace(&mut e.chord, chord))
    }
}

fn read_chord(store: &dyn ConfigStore, codec: &dyn AcceleratorCodec, path: &str) -> KeyChord {
    let Some(accel) = store.get_string(path) else {
        return KeyChord::UNBOUND;
    };
    match codec.parse(&accel) {
        Ok(chord) => {
            log::debug!("Loaded binding {} = {}", path, accel);
            chord
        }
        Err(e) => {
            log::warn!("Invalid accelerator '{}' at {}: {}", accel, path, e);
            KeyChord::UNBOUND
        }
    }
}
