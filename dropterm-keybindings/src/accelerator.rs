//! Accelerator name parsing and formatting.
//!
//! Converts between stored accelerator names like `"<Shift><Control>t"` and
//! [`KeyChord`] values, and renders human-readable labels like `"Shift+Ctrl+T"`.
//!
//! The toolkit normally owns this conversion; [`AcceleratorCodec`] is the seam,
//! and [`GtkAccelerator`] is the default implementation over GTK-style names.

use crate::chord::{KeyChord, Modifiers};
use dropterm_config::keys::keybindings::DISABLED;
use std::fmt;

/// Error type for accelerator parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError(String);

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseError {}

/// Bidirectional conversion between accelerator strings and chords.
///
/// `parse(name(c)) == c` must hold for every chord produced by key capture.
pub trait AcceleratorCodec {
    /// Parse a stored accelerator name. Empty and `"disabled"` give [`KeyChord::UNBOUND`].
    fn parse(&self, accelerator: &str) -> Result<KeyChord, ParseError>;

    /// Canonical name stored in the configuration.
    fn name(&self, chord: KeyChord) -> String;

    /// Text shown to the user.
    fn label(&self, chord: KeyChord) -> String;
}

/// GTK-style accelerator names (`<Control><Alt>g`, `<Shift>F12`).
#[derive(Debug, Clone, Copy, Default)]
pub struct GtkAccelerator;

impl AcceleratorCodec for GtkAccelerator {
    fn parse(&self, accelerator: &str) -> Result<KeyChord, ParseError> {
        parse_accelerator(accelerator)
    }

    fn name(&self, chord: KeyChord) -> String {
        accelerator_name(chord)
    }

    fn label(&self, chord: KeyChord) -> String {
        accelerator_label(chord)
    }
}

/// Keyval of a named (non-printing or punctuation) key: (name, keyval, label).
const NAMED_KEYS: &[(&str, u32, &str)] = &[
    // Function keys
    ("F1", 0xffbe, "F1"),
    ("F2", 0xffbf, "F2"),
    ("F3", 0xffc0, "F3"),
    ("F4", 0xffc1, "F4"),
    ("F5", 0xffc2, "F5"),
    ("F6", 0xffc3, "F6"),
    ("F7", 0xffc4, "F7"),
    ("F8", 0xffc5, "F8"),
    ("F9", 0xffc6, "F9"),
    ("F10", 0xffc7, "F10"),
    ("F11", 0xffc8, "F11"),
    ("F12", 0xffc9, "F12"),
    // Editing and navigation
    ("Return", 0xff0d, "Return"),
    ("Escape", 0xff1b, "Escape"),
    ("Tab", 0xff09, "Tab"),
    ("BackSpace", 0xff08, "BackSpace"),
    ("Delete", 0xffff, "Delete"),
    ("Insert", 0xff63, "Insert"),
    ("Home", 0xff50, "Home"),
    ("End", 0xff57, "End"),
    ("Page_Up", 0xff55, "Page Up"),
    ("Page_Down", 0xff56, "Page Down"),
    ("Left", 0xff51, "Left"),
    ("Up", 0xff52, "Up"),
    ("Right", 0xff53, "Right"),
    ("Down", 0xff54, "Down"),
    // Printable keys that have a symbolic name
    ("space", 0x20, "Space"),
    ("minus", 0x2d, "-"),
    ("equal", 0x3d, "="),
    ("plus", 0x2b, "+"),
    ("bracketleft", 0x5b, "["),
    ("bracketright", 0x5d, "]"),
    ("backslash", 0x5c, "\\"),
    ("semicolon", 0x3b, ";"),
    ("apostrophe", 0x27, "'"),
    ("grave", 0x60, "`"),
    ("comma", 0x2c, ","),
    ("period", 0x2e, "."),
    ("slash", 0x2f, "/"),
    ("less", 0x3c, "<"),
    ("greater", 0x3e, ">"),
];

/// Keyvals above this offset encode a Unicode code point directly.
const UNICODE_KEYVAL_OFFSET: u32 = 0x0100_0000;

/// Modifier order used by [`accelerator_name`]: (flag, name, label).
const MODIFIER_ORDER: &[(Modifiers, &str, &str)] = &[
    (Modifiers::SHIFT, "Shift", "Shift"),
    (Modifiers::CONTROL, "Control", "Ctrl"),
    (Modifiers::ALT, "Alt", "Alt"),
    (Modifiers::SUPER, "Super", "Super"),
    (Modifiers::HYPER, "Hyper", "Hyper"),
    (Modifiers::META, "Meta", "Meta"),
    (Modifiers::LOCK, "Lock", "Lock"),
    (Modifiers::MOD2, "Mod2", "Mod2"),
    (Modifiers::MOD3, "Mod3", "Mod3"),
    (Modifiers::MOD4, "Mod4", "Mod4"),
    (Modifiers::MOD5, "Mod5", "Mod5"),
];

/// Parse an accelerator name into a [`KeyChord`].
///
/// Supported format: zero or more `<Modifier>` tokens followed by one key.
///
/// Modifiers (case-insensitive):
/// - `Shift`, `Lock`
/// - `Control`, `Ctrl`, `Ctl`, `Primary`
/// - `Alt`, `Mod1`, `Mod2`..`Mod5`
/// - `Super`, `Hyper`, `Meta`
///
/// Keys:
/// - Single characters: `t`, `T` (letters are normalised to lowercase), `1`
/// - Named keys: `F1`-`F12`, `Return`, `Escape`, `Page_Up`, `space`, `bracketleft`, etc.
/// - Raw keyvals: `0xfe03`
pub fn parse_accelerator(s: &str) -> Result<KeyChord, ParseError> {
    let s = s.trim_matches(|c: char| c.is_ascii_whitespace());
    if s.is_empty() || s.eq_ignore_ascii_case(DISABLED) {
        return Ok(KeyChord::UNBOUND);
    }

    let mut mods = Modifiers::empty();
    let mut rest = s;

    while let Some(after_open) = rest.strip_prefix('<') {
        let close = after_open
            .find('>')
            .ok_or_else(|| ParseError(format!("Unterminated modifier in '{}'", s)))?;
        let token = &after_open[..close];
        mods |= parse_modifier(token)
            .ok_or_else(|| ParseError(format!("Unknown modifier: '<{}>'", token)))?;
        rest = &after_open[close + 1..];
    }

    if rest.is_empty() {
        return Err(ParseError(format!(
            "Accelerator '{}' ends with modifier, no key specified",
            s
        )));
    }

    let keycode = parse_key(rest)?;
    Ok(KeyChord::new(keycode, mods))
}

fn parse_modifier(token: &str) -> Option<Modifiers> {
    match token.to_lowercase().as_str() {
        "shift" => Some(Modifiers::SHIFT),
        "lock" => Some(Modifiers::LOCK),
        "control" | "ctrl" | "ctl" | "primary" => Some(Modifiers::CONTROL),
        "alt" | "mod1" => Some(Modifiers::ALT),
        "mod2" => Some(Modifiers::MOD2),
        "mod3" => Some(Modifiers::MOD3),
        "mod4" => Some(Modifiers::MOD4),
        "mod5" => Some(Modifiers::MOD5),
        "super" => Some(Modifiers::SUPER),
        "hyper" => Some(Modifiers::HYPER),
        "meta" => Some(Modifiers::META),
        _ => None,
    }
}

/// Parse the key part of an accelerator into a keyval.
fn parse_key(s: &str) -> Result<u32, ParseError> {
    // Try named keys first (case-insensitive)
    if let Some(keyval) = parse_named_key(s) {
        return Ok(keyval);
    }

    // Single character
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(char_to_keyval(c));
    }

    // Raw keyval
    if let Some(hex) = s.strip_prefix("0x")
        && let Ok(keyval) = u32::from_str_radix(hex, 16)
        && keyval != 0
    {
        return Ok(keyval);
    }

    Err(ParseError(format!("Unknown key: '{}'", s)))
}

/// Look up a named key, accepting a few common aliases.
fn parse_named_key(s: &str) -> Option<u32> {
    let canonical = match s.to_lowercase().as_str() {
        "enter" => "Return",
        "esc" => "Escape",
        "del" => "Delete",
        "ins" => "Insert",
        "pageup" | "pgup" | "prior" => "Page_Up",
        "pagedown" | "pgdn" | "next" => "Page_Down",
        "backspace" => "BackSpace",
        _ => s,
    };
    NAMED_KEYS
        .iter()
        .find(|(name, _, _)| name.eq_ignore_ascii_case(canonical))
        .map(|(_, keyval, _)| *keyval)
}

fn char_to_keyval(c: char) -> u32 {
    let c = c.to_ascii_lowercase();
    let cp = c as u32;
    if cp < 0x100 { cp } else { UNICODE_KEYVAL_OFFSET + cp }
}

fn keyval_to_char(keyval: u32) -> Option<char> {
    let cp = if keyval >= UNICODE_KEYVAL_OFFSET {
        keyval - UNICODE_KEYVAL_OFFSET
    } else if (0x21..0x100).contains(&keyval) {
        keyval
    } else {
        return None;
    };
    // whitespace and control characters are written in 0x form
    char::from_u32(cp).filter(|c| !c.is_whitespace() && !c.is_control())
}

fn named_key(keyval: u32) -> Option<&'static (&'static str, u32, &'static str)> {
    NAMED_KEYS.iter().find(|(_, kv, _)| *kv == keyval)
}

/// Canonical accelerator name for a chord; `"disabled"` for the unbound sentinel.
pub fn accelerator_name(chord: KeyChord) -> String {
    if chord.is_unbound() {
        return DISABLED.to_string();
    }

    let mut name = String::new();
    for (flag, modifier, _) in MODIFIER_ORDER {
        if chord.mods.contains(*flag) {
            name.push('<');
            name.push_str(modifier);
            name.push('>');
        }
    }

    if let Some((key, _, _)) = named_key(chord.keycode) {
        name.push_str(key);
    } else if let Some(c) = keyval_to_char(chord.keycode) {
        name.push(c);
    } else {
        name.push_str(&format!("0x{:x}", chord.keycode));
    }
    name
}

/// Human-readable label such as `"Shift+Ctrl+T"`; `"Disabled"` when unbound.
pub fn accelerator_label(chord: KeyChord) -> String {
    if chord.is_unbound() {
        return "Disabled".to_string();
    }

    let mut parts: Vec<String> = MODIFIER_ORDER
        .iter()
        .filter(|(flag, _, _)| chord.mods.contains(*flag))
        .map(|(_, _, label)| label.to_string())
        .collect();

    if let Some((_, _, label)) = named_key(chord.keycode) {
        parts.push(label.to_string());
    } else if let Some(c) = keyval_to_char(chord.keycode) {
        parts.push(c.to_uppercase().to_string());
    } else {
        parts.push(format!("0x{:x}", chord.keycode));
    }

    parts.join("+")
}
