//! Guard against shortcuts that would swallow ordinary typing.

use crate::chord::KeyChord;

/// Whether `chord` is a bare letter or digit.
///
/// Binding such a key without a modifier would make it impossible to type
/// that character into the terminal, so these chords must be refused.
/// Always false for the unbound sentinel and for any chord with a modifier.
pub fn is_typable(chord: KeyChord) -> bool {
    if chord.has_modifiers() || chord.keycode == 0 {
        return false;
    }
    char::from_u32(chord.keycode).is_some_and(|c| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chord::Modifiers;

    #[test]
    fn test_bare_alphanumerics_are_typable() {
        for c in ('a'..='z').chain('A'..='Z').chain('0'..='9') {
            assert!(is_typable(KeyChord::from_char(c, Modifiers::empty())), "{c}");
        }
    }

    #[test]
    fn test_any_modifier_makes_it_a_shortcut() {
        for mods in [
            Modifiers::SHIFT,
            Modifiers::CONTROL,
            Modifiers::ALT,
            Modifiers::SUPER,
            Modifiers::LOCK,
        ] {
            assert!(!is_typable(KeyChord::from_char('a', mods)));
            assert!(!is_typable(KeyChord::from_char('7', mods)));
        }
    }

    #[test]
    fn test_unbound_is_not_typable() {
        assert!(!is_typable(KeyChord::UNBOUND));
    }

    #[test]
    fn test_bare_non_alphanumerics_are_allowed() {
        // F12, punctuation and space are acceptable without a modifier
        assert!(!is_typable(KeyChord::new(0xffc9, Modifiers::empty())));
        assert!(!is_typable(KeyChord::from_char('[', Modifiers::empty())));
        assert!(!is_typable(KeyChord::from_char(' ', Modifiers::empty())));
        assert!(!is_typable(KeyChord::from_char('@', Modifiers::empty())));
    }
}
