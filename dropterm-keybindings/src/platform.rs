//! Platform collaborators driven by the rebind coordinator.
//!
//! Contains:
//! - [`GlobalHotkeys`]: the OS-level global grab primitive
//! - [`LocalAccelerators`]: the terminal window's accelerator table
//!
//! Implementations live in the host application; tests use recording fakes.

use crate::chord::KeyChord;

/// OS-level exclusive registration of global hotkeys.
///
/// Grabs are a process-wide resource. Accelerators are passed as canonical
/// accelerator names (see [`crate::AcceleratorCodec::name`]).
pub trait GlobalHotkeys {
    /// Grab `accelerator` and route presses to the binding stored at
    /// `binding_path`. Returns `false` when the grab could not be acquired,
    /// typically because another client already holds it.
    fn grab(&mut self, accelerator: &str, binding_path: &str) -> bool;

    /// Release a grab. Releasing a key that is not grabbed is a no-op.
    fn release(&mut self, accelerator: &str);
}

/// The running window's local accelerator table.
pub trait LocalAccelerators {
    /// Remove whatever action is attached to `chord`.
    fn disconnect(&mut self, chord: KeyChord);

    /// Re-read every local binding from the configuration store.
    fn reload(&mut self);
}

impl<T: GlobalHotkeys + ?Sized> GlobalHotkeys for Box<T> {
    fn grab(&mut self, accelerator: &str, binding_path: &str) -> bool {
        (**self).grab(accelerator, binding_path)
    }

    fn release(&mut self, accelerator: &str) {
        (**self).release(accelerator)
    }
}

impl<T: LocalAccelerators + ?Sized> LocalAccelerators for Box<T> {
    fn disconnect(&mut self, chord: KeyChord) {
        (**self).disconnect(chord)
    }

    fn reload(&mut self) {
        (**self).reload()
    }
}
