//! Keyboard input: normalized key chords and the keybinding registry.
//!
//! Raw terminal events are normalized into [`KeyChord`]s, which the
//! [`KeybindingRegistry`] resolves to symbolic action names.

pub mod defaults;
pub mod keybinding;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use serde::{Deserialize, Serialize};

pub use keybinding::{
    format_key_combo, ChordDefinition, KeyBinding, KeyCategory, KeybindingDiagnostic,
    KeybindingRegistry, Severity,
};

/// Modifier flags of a chord. Absent flags deserialize as `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Modifiers {
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub alt: bool,
    /// Cmd / Super / Meta
    #[serde(default)]
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
        alt: false,
        meta: false,
    };

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::NONE
        }
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }

    pub fn alt() -> Self {
        Self {
            alt: true,
            ..Self::NONE
        }
    }

    /// Whether no modifier is held
    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }
}

/// A key plus modifiers.
///
/// `key` is either a single printable character ("m", "?", " ") or a named
/// key in DOM style ("ArrowUp", "Escape", "Enter", "F5").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyChord {
    pub key: String,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl KeyChord {
    /// A chord without modifiers
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
        }
    }

    pub fn ctrl(key: impl Into<String>) -> Self {
        Self::with_modifiers(key, Modifiers::ctrl())
    }

    pub fn shift(key: impl Into<String>) -> Self {
        Self::with_modifiers(key, Modifiers::shift())
    }

    pub fn alt(key: impl Into<String>) -> Self {
        Self::with_modifiers(key, Modifiers::alt())
    }

    /// Single printable characters compare case-insensitively
    pub fn is_printable(&self) -> bool {
        let mut chars = self.key.chars();
        matches!((chars.next(), chars.next()), (Some(c), None) if !c.is_control())
    }

    /// Canonical lookup string: fixed modifier order, lowercased printable key.
    pub fn combo_string(&self) -> String {
        let mut combo = String::new();
        for (held, name) in [
            (self.modifiers.ctrl, "ctrl+"),
            (self.modifiers.alt, "alt+"),
            (self.modifiers.shift, "shift+"),
            (self.modifiers.meta, "meta+"),
        ] {
            if held {
                combo.push_str(name);
            }
        }
        if self.key == "Space" {
            // keymap files may spell the space bar out
            combo.push(' ');
        } else if self.is_printable() {
            combo.extend(self.key.chars().flat_map(char::to_lowercase));
        } else {
            combo.push_str(&self.key);
        }
        combo
    }

    /// Normalize a crossterm key event.
    ///
    /// Returns `None` for key releases and keys with no chord form. For
    /// non-letter characters the shift flag is dropped, since shift is already
    /// folded into the character ('?' rather than shift+'/'); for letters an
    /// uppercase character implies shift even if the terminal didn't report it.
    pub fn from_key_event(event: &KeyEvent) -> Option<Self> {
        if event.kind == KeyEventKind::Release {
            return None;
        }

        let mut modifiers = Modifiers {
            ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
            shift: event.modifiers.contains(KeyModifiers::SHIFT),
            alt: event.modifiers.contains(KeyModifiers::ALT),
            meta: event
                .modifiers
                .intersects(KeyModifiers::SUPER | KeyModifiers::META),
        };

        let key = match event.code {
            KeyCode::Char(c) => {
                if c.is_alphabetic() {
                    modifiers.shift |= c.is_uppercase();
                } else {
                    modifiers.shift = false;
                }
                c.to_string()
            }
            KeyCode::BackTab => {
                modifiers.shift = true;
                "Tab".to_string()
            }
            KeyCode::F(n) => format!("F{n}"),
            code => named_key(code)?.to_string(),
        };

        Some(Self { key, modifiers })
    }
}

fn named_key(code: KeyCode) -> Option<&'static str> {
    let name = match code {
        KeyCode::Up => "ArrowUp",
        KeyCode::Down => "ArrowDown",
        KeyCode::Left => "ArrowLeft",
        KeyCode::Right => "ArrowRight",
        KeyCode::Enter => "Enter",
        KeyCode::Esc => "Escape",
        KeyCode::Backspace => "Backspace",
        KeyCode::Tab => "Tab",
        KeyCode::Delete => "Delete",
        KeyCode::Insert => "Insert",
        KeyCode::Home => "Home",
        KeyCode::End => "End",
        KeyCode::PageUp => "PageUp",
        KeyCode::PageDown => "PageDown",
        _ => return None,
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn uppercase_letter_implies_shift() {
        let chord = KeyChord::from_key_event(&event(KeyCode::Char('G'), KeyModifiers::NONE)).unwrap();
        assert_eq!(chord, KeyChord::shift("G"));
    }

    #[test]
    fn shift_is_dropped_for_symbols() {
        let chord =
            KeyChord::from_key_event(&event(KeyCode::Char('?'), KeyModifiers::SHIFT)).unwrap();
        assert_eq!(chord, KeyChord::new("?"));
    }

    #[test]
    fn named_keys_use_dom_names() {
        let chord = KeyChord::from_key_event(&event(KeyCode::Up, KeyModifiers::ALT)).unwrap();
        assert_eq!(chord, KeyChord::alt("ArrowUp"));
        let chord = KeyChord::from_key_event(&event(KeyCode::BackTab, KeyModifiers::SHIFT)).unwrap();
        assert_eq!(chord, KeyChord::shift("Tab"));
        assert!(KeyChord::from_key_event(&event(KeyCode::CapsLock, KeyModifiers::NONE)).is_none());
    }

    #[test]
    fn combo_string_orders_modifiers_and_lowercases_printables() {
        let chord = KeyChord::with_modifiers(
            "M",
            Modifiers {
                ctrl: true,
                shift: true,
                alt: true,
                meta: false,
            },
        );
        assert_eq!(chord.combo_string(), "ctrl+alt+shift+m");
        assert_eq!(KeyChord::new("ArrowUp").combo_string(), "ArrowUp");
        assert_eq!(KeyChord::new(" ").combo_string(), " ");
    }

    #[test]
    fn printable_means_single_non_control_char() {
        assert!(KeyChord::new("a").is_printable());
        assert!(KeyChord::new(" ").is_printable());
        assert!(!KeyChord::new("Enter").is_printable());
        assert!(!KeyChord::new("").is_printable());
    }
}
