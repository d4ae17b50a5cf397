//! Decoding of send-keys payloads.
//!
//! Characters in the Unicode private use range U+E000..=U+E03D name special
//! keys; every other character is typed literally.

use serde::{Deserialize, Serialize};

/// A single key event to deliver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Char(char),
    Named(NamedKey),
}

impl Key {
    pub fn from_char(c: char) -> Self {
        match NamedKey::from_codepoint(c) {
            Some(named) => Key::Named(named),
            None => Key::Char(c),
        }
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{}", c),
            Key::Named(named) => write!(f, "<{:?}>", named),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NamedKey {
    Null,
    Cancel,
    Help,
    Backspace,
    Tab,
    Clear,
    Return,
    Enter,
    Shift,
    Control,
    Alt,
    Pause,
    Escape,
    Space,
    PageUp,
    PageDown,
    End,
    Home,
    ArrowLeft,
    ArrowUp,
    ArrowRight,
    ArrowDown,
    Insert,
    Delete,
    Semicolon,
    Equals,
    Numpad0,
    Numpad1,
    Numpad2,
    Numpad3,
    Numpad4,
    Numpad5,
    Numpad6,
    Numpad7,
    Numpad8,
    Numpad9,
    Multiply,
    Add,
    Separator,
    Subtract,
    Decimal,
    Divide,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    Meta,
}

impl NamedKey {
    pub fn from_codepoint(c: char) -> Option<Self> {
        use NamedKey::*;

        let key = match c {
            '\u{E000}' => Null,
            '\u{E001}' => Cancel,
            '\u{E002}' => Help,
            '\u{E003}' => Backspace,
            '\u{E004}' => Tab,
            '\u{E005}' => Clear,
            '\u{E006}' => Return,
            '\u{E007}' => Enter,
            '\u{E008}' => Shift,
            '\u{E009}' => Control,
            '\u{E00A}' => Alt,
            '\u{E00B}' => Pause,
            '\u{E00C}' => Escape,
            '\u{E00D}' => Space,
            '\u{E00E}' => PageUp,
            '\u{E00F}' => PageDown,
            '\u{E010}' => End,
            '\u{E011}' => Home,
            '\u{E012}' => ArrowLeft,
            '\u{E013}' => ArrowUp,
            '\u{E014}' => ArrowRight,
            '\u{E015}' => ArrowDown,
            '\u{E016}' => Insert,
            '\u{E017}' => Delete,
            '\u{E018}' => Semicolon,
            '\u{E019}' => Equals,
            '\u{E01A}' => Numpad0,
            '\u{E01B}' => Numpad1,
            '\u{E01C}' => Numpad2,
            '\u{E01D}' => Numpad3,
            '\u{E01E}' => Numpad4,
            '\u{E01F}' => Numpad5,
            '\u{E020}' => Numpad6,
            '\u{E021}' => Numpad7,
            '\u{E022}' => Numpad8,
            '\u{E023}' => Numpad9,
            '\u{E024}' => Multiply,
            '\u{E025}' => Add,
            '\u{E026}' => Separator,
            '\u{E027}' => Subtract,
            '\u{E028}' => Decimal,
            '\u{E029}' => Divide,
            '\u{E031}' => F1,
            '\u{E032}' => F2,
            '\u{E033}' => F3,
            '\u{E034}' => F4,
            '\u{E035}' => F5,
            '\u{E036}' => F6,
            '\u{E037}' => F7,
            '\u{E038}' => F8,
            '\u{E039}' => F9,
            '\u{E03A}' => F10,
            '\u{E03B}' => F11,
            '\u{E03C}' => F12,
            '\u{E03D}' => Meta,
            _ => return None,
        };
        Some(key)
    }

    /// Modifier keys toggle state instead of producing input
    pub fn is_modifier(&self) -> bool {
        matches!(
            self,
            NamedKey::Shift | NamedKey::Control | NamedKey::Alt | NamedKey::Meta
        )
    }
}

/// Decode a payload into one key per character, preserving order.
pub fn decode(text: &str) -> Vec<Key> {
    text.chars().map(Key::from_char).collect()
}
