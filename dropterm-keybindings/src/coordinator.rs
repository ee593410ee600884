//! Atomic shortcut rebinding.
//!
//! [`RebindCoordinator`] is the only writer of the binding registry and of the
//! global grabs. A rebind runs to completion inside one call:
//!
//! 1. unchanged chord: nothing happens
//! 2. conflict check against every other entry
//! 3. typability check
//! 4. apply: swap the global grab (rolling back on failure) or disconnect the
//!    old local accelerator
//! 5. commit: registry, configuration store, accelerator reload
//!
//! A rejected or rolled-back attempt never writes the store or the registry.

use crate::accelerator::AcceleratorCodec;
use crate::chord::KeyChord;
use crate::conflict::find_conflict;
use crate::error::{BindingError, RebindState};
use crate::guard::is_typable;
use crate::platform::{GlobalHotkeys, LocalAccelerators};
use crate::registry::{BindingRegistry, Scope};
use dropterm_config::ConfigStore;
use dropterm_config::keys::keybindings::DISABLED;
use std::sync::Arc;

/// Result of a rebind that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebindOutcome {
    /// The entry already had this chord; nothing was touched.
    Unchanged,
    /// The new chord is live and persisted.
    Committed,
}

/// Owns the binding registry and applies shortcut changes to it.
pub struct RebindCoordinator<H, L> {
    registry: BindingRegistry,
    store: Arc<dyn ConfigStore>,
    codec: Box<dyn AcceleratorCodec>,
    hotkeys: H,
    local: L,
}

impl<H, L> std::fmt::Debug for RebindCoordinator<H, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RebindCoordinator")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl<H: GlobalHotkeys, L: LocalAccelerators> RebindCoordinator<H, L> {
    /// Build the registry from `store` and take ownership of the collaborators.
    pub fn new(
        store: Arc<dyn ConfigStore>,
        codec: Box<dyn AcceleratorCodec>,
        hotkeys: H,
        local: L,
    ) -> Self {
        let registry = BindingRegistry::build(store.as_ref(), codec.as_ref());
        Self::with_registry(registry, store, codec, hotkeys, local)
    }

    /// Use an already built registry.
    pub fn with_registry(
        registry: BindingRegistry,
        store: Arc<dyn ConfigStore>,
        codec: Box<dyn AcceleratorCodec>,
        hotkeys: H,
        local: L,
    ) -> Self {
        Self {
            registry,
            store,
            codec,
            hotkeys,
            local,
        }
    }

    pub fn registry(&self) -> &BindingRegistry {
        &self.registry
    }

    pub fn codec(&self) -> &dyn AcceleratorCodec {
        self.codec.as_ref()
    }

    pub fn store(&self) -> &Arc<dyn ConfigStore> {
        &self.store
    }

    pub fn hotkeys(&self) -> &H {
        &self.hotkeys
    }

    pub fn hotkeys_mut(&mut self) -> &mut H {
        &mut self.hotkeys
    }

    pub fn local(&self) -> &L {
        &self.local
    }

    pub fn local_mut(&mut self) -> &mut L {
        &mut self.local
    }

    /// Rebuild the registry from the store, discarding in-memory state.
    pub fn rebuild(&mut self) {
        self.registry = BindingRegistry::build(self.store.as_ref(), self.codec.as_ref());
    }

    /// Grab every bound global shortcut, e.g. at application startup.
    ///
    /// Returns the accelerator names that could not be grabbed.
    pub fn grab_global_bindings(&mut self) -> Vec<String> {
        let mut failed = Vec::new();
        for entry in self.registry.group(Scope::Global).entries() {
            if entry.chord().is_unbound() {
                continue;
            }
            let name = self.codec.name(entry.chord());
            if self.hotkeys.grab(&name, entry.config_path()) {
                log::info!("Grabbed global hotkey {} for {}", name, entry.config_path());
            } else {
                log::warn!("Unable to grab global hotkey {} for {}", name, entry.config_path());
                failed.push(name);
            }
        }
        failed
    }

    /// Change the shortcut of the entry at `config_path` to `chord`.
    ///
    /// Proposing the entry's current chord is a no-op. Proposing the unbound
    /// sentinel behaves like [`Self::clear`] minus the local disconnect of
    /// global chords.
    pub fn propose(
        &mut self,
        config_path: &str,
        chord: KeyChord,
    ) -> Result<RebindOutcome, BindingError> {
        let entry = self
            .registry
            .get(config_path)
            .ok_or_else(|| BindingError::UnknownBinding(config_path.to_string()))?;
        let old = entry.chord();
        let scope = entry.scope();
        self.transition(config_path, RebindState::Proposed);

        if chord == old {
            log::debug!("Binding {} already set to {}", config_path, chord);
            return Ok(RebindOutcome::Unchanged);
        }

        if let Err(e) = self.validate(config_path, chord) {
            self.transition(config_path, RebindState::Rejected);
            return Err(e);
        }
        self.transition(config_path, RebindState::Validated);

        self.transition(config_path, RebindState::Applying);
        match scope {
            Scope::Global => {
                if let Err(e) = self.swap_global_grab(config_path, old, chord) {
                    self.transition(config_path, RebindState::RolledBack);
                    return Err(e);
                }
            }
            Scope::Local => {
                if !old.is_unbound() {
                    self.local.disconnect(old);
                }
            }
        }

        self.commit(config_path, chord);
        Ok(RebindOutcome::Committed)
    }

    /// Remove the shortcut of the entry at `config_path`.
    ///
    /// Always succeeds for a known path: no conflict or typability check
    /// applies. Global grabs are released, any old chord is disconnected from
    /// the local table, and `"disabled"` is persisted.
    pub fn clear(&mut self, config_path: &str) -> Result<RebindOutcome, BindingError> {
        let entry = self
            .registry
            .get(config_path)
            .ok_or_else(|| BindingError::UnknownBinding(config_path.to_string()))?;
        let old = entry.chord();
        let scope = entry.scope();
        self.transition(config_path, RebindState::Proposed);
        self.transition(config_path, RebindState::Applying);

        if !old.is_unbound() {
            if scope == Scope::Global {
                let name = self.codec.name(old);
                log::info!("Releasing global hotkey {} for {}", name, config_path);
                self.hotkeys.release(&name);
            }
            self.local.disconnect(old);
        }

        self.commit(config_path, KeyChord::UNBOUND);
        Ok(RebindOutcome::Committed)
    }

    fn validate(&self, config_path: &str, chord: KeyChord) -> Result<(), BindingError> {
        if let Some(conflict) = find_conflict(&self.registry, chord, config_path) {
            log::info!(
                "Shortcut {} for {} rejected: already used by '{}'",
                self.codec.label(chord),
                config_path,
                conflict.label()
            );
            return Err(BindingError::Duplicate {
                accelerator: self.codec.label(chord),
                conflicting_label: conflict.label().to_string(),
            });
        }

        if is_typable(chord) {
            log::info!(
                "Shortcut {} for {} rejected: bare character key",
                self.codec.label(chord),
                config_path
            );
            return Err(BindingError::Untypable {
                accelerator: self.codec.label(chord),
            });
        }

        Ok(())
    }

    /// Release the old grab and acquire the new one, restoring the old grab
    /// when acquisition fails.
    fn swap_global_grab(
        &mut self,
        config_path: &str,
        old: KeyChord,
        new: KeyChord,
    ) -> Result<(), BindingError> {
        let old_name = (!old.is_unbound()).then(|| self.codec.name(old));
        if let Some(name) = &old_name {
            self.hotkeys.release(name);
        }

        if new.is_unbound() {
            return Ok(());
        }

        let new_name = self.codec.name(new);
        if self.hotkeys.grab(&new_name, config_path) {
            log::info!("Grabbed global hotkey {} for {}", new_name, config_path);
            return Ok(());
        }

        log::warn!(
            "Unable to grab global hotkey {} for {}, restoring previous binding",
            new_name,
            config_path
        );
        if let Some(name) = &old_name
            && !self.hotkeys.grab(name, config_path)
        {
            log::warn!("Failed to restore global hotkey {} for {}", name, config_path);
        }

        Err(BindingError::Apply {
            accelerator: self.codec.label(new),
        })
    }

    /// Persisting to the store is best-effort (see [`ConfigStore::set`]); the
    /// rebind is committed once the registry and accelerators are updated.
    fn commit(&mut self, config_path: &str, chord: KeyChord) {
        self.registry.set_chord(config_path, chord);

        let stored = if chord.is_unbound() {
            DISABLED.to_string()
        } else {
            self.codec.name(chord)
        };
        self.store.set_string(config_path, &stored);
        self.local.reload();

        log::info!("Keybinding {} set to {}", config_path, stored);
        self.transition(config_path, RebindState::Committed);
    }

    fn transition(&self, config_path: &str, state: RebindState) {
        log::debug!("Rebind {}: {}", config_path, state);
    }
}
