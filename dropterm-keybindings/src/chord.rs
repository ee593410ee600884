//! Key chord value type.
//!
//! A [`KeyChord`] is a key code plus a modifier mask. Key codes are keysym
//! values as delivered by the toolkit's key capture (printable ASCII keys use
//! their ASCII code), and the modifier bits follow the GDK layout so a captured
//! `(keyval, state)` pair converts without translation.

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Modifier mask of a key chord.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u32 {
        const SHIFT = 1 << 0;
        const LOCK = 1 << 1;
        const CONTROL = 1 << 2;
        /// Mod1, reported as Alt by most keyboard maps
        const ALT = 1 << 3;
        const MOD2 = 1 << 4;
        const MOD3 = 1 << 5;
        const MOD4 = 1 << 6;
        const MOD5 = 1 << 7;
        const SUPER = 1 << 26;
        const HYPER = 1 << 27;
        const META = 1 << 28;
    }
}

/// A physical key combination: key code plus modifiers.
///
/// Two chords are equal iff both the key code and the mask are equal.
/// [`KeyChord::UNBOUND`] marks an entry with no shortcut assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyChord {
    pub keycode: u32,
    pub mods: Modifiers,
}

impl KeyChord {
    /// `KeyChord(0, 0)`: no shortcut.
    pub const UNBOUND: KeyChord = KeyChord {
        keycode: 0,
        mods: Modifiers::empty(),
    };

    pub const fn new(keycode: u32, mods: Modifiers) -> Self {
        Self { keycode, mods }
    }

    /// Build a chord from a raw `(keycode, mask)` pair as captured by the UI.
    ///
    /// Bits outside [`Modifiers`] (button state, group bits) are dropped, so
    /// every chord has an accelerator name that parses back to it.
    pub const fn from_raw(keycode: u32, mask: u32) -> Self {
        Self {
            keycode,
            mods: Modifiers::from_bits_truncate(mask),
        }
    }

    /// Chord for a printable ASCII key, e.g. `KeyChord::from_char('t', Modifiers::CONTROL)`.
    pub const fn from_char(c: char, mods: Modifiers) -> Self {
        Self {
            keycode: c as u32,
            mods,
        }
    }

    pub fn is_unbound(&self) -> bool {
        *self == Self::UNBOUND
    }

    pub fn has_modifiers(&self) -> bool {
        !self.mods.is_empty()
    }

    /// Raw modifier bits.
    pub fn mask(&self) -> u32 {
        self.mods.bits()
    }
}

impl fmt::Display for KeyChord {
    /// Canonical accelerator name, e.g. `<Shift><Control>t`, or `disabled`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::accelerator::accelerator_name(*self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_requires_both_fields() {
        let a = KeyChord::new('g' as u32, Modifiers::CONTROL | Modifiers::ALT);
        let b = KeyChord::from_raw('g' as u32, (1 << 2) | (1 << 3));
        assert_eq!(a, b);

        assert_ne!(a, KeyChord::new('g' as u32, Modifiers::CONTROL));
        assert_ne!(a, KeyChord::new('h' as u32, Modifiers::CONTROL | Modifiers::ALT));
    }

    #[test]
    fn test_unbound_sentinel() {
        assert!(KeyChord::UNBOUND.is_unbound());
        assert!(KeyChord::default().is_unbound());
        assert!(KeyChord::from_raw(0, 0).is_unbound());
        assert!(!KeyChord::from_raw(0, Modifiers::SHIFT.bits()).is_unbound());
        assert!(!KeyChord::from_char('a', Modifiers::empty()).is_unbound());
    }

    #[test]
    fn test_unknown_mask_bits_are_dropped() {
        let chord = KeyChord::from_raw('x' as u32, 1 << 13);
        assert_eq!(chord.mask(), 0);
        assert!(!chord.has_modifiers());
        assert_eq!(chord, KeyChord::from_raw('x' as u32, 0));

        let chord = KeyChord::from_raw('x' as u32, (1 << 13) | (1 << 2));
        assert_eq!(chord.mods, Modifiers::CONTROL);
    }

    #[test]
    fn test_display_is_accelerator_name() {
        let chord = KeyChord::from_char('t', Modifiers::CONTROL | Modifiers::SHIFT);
        assert_eq!(chord.to_string(), "<Shift><Control>t");
        assert_eq!(KeyChord::UNBOUND.to_string(), "disabled");
    }
}
