use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_HOTKEY: &str = "Mod+K";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HotkeyError {
    #[error("hotkey must include at least one modifier and one key: '{0}'")]
    MissingPart(String),
    #[error("unsupported modifier '{0}'; use Mod, Ctrl, Meta, Alt, or Shift")]
    UnsupportedModifier(String),
    #[error("key must be a single letter or digit: '{0}'")]
    UnsupportedKey(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Modifier {
    /// Ctrl or Meta, whichever the platform treats as primary.
    Primary,
    Ctrl,
    Meta,
    Alt,
    Shift,
}

impl Modifier {
    fn label(self) -> &'static str {
        match self {
            Self::Primary => "Mod",
            Self::Ctrl => "Ctrl",
            Self::Meta => "Meta",
            Self::Alt => "Alt",
            Self::Shift => "Shift",
        }
    }

    fn held(self, input: &KeyInput) -> bool {
        match self {
            Self::Primary => input.ctrl || input.meta,
            Self::Ctrl => input.ctrl,
            Self::Meta => input.meta,
            Self::Alt => input.alt,
            Self::Shift => input.shift,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hotkey {
    pub modifiers: Vec<Modifier>,
    pub key: char,
}

impl Hotkey {
    /// Shift held without being declared is a different chord (Ctrl+Shift+K is not
    /// Mod+K). Other extra modifiers do not prevent a match.
    pub fn matches(&self, input: &KeyInput) -> bool {
        let mut chars = input.key.chars();
        let key_matches = match (chars.next(), chars.next()) {
            (Some(c), None) => c.eq_ignore_ascii_case(&self.key),
            _ => false,
        };
        if !key_matches || (input.shift && !self.modifiers.contains(&Modifier::Shift)) {
            return false;
        }
        self.modifiers.iter().all(|modifier| modifier.held(input))
    }
}

impl Display for Hotkey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for modifier in &self.modifiers {
            write!(f, "{}+", modifier.label())?;
        }
        write!(f, "{}", self.key.to_ascii_uppercase())
    }
}

pub fn parse_hotkey(input: &str) -> Result<Hotkey, HotkeyError> {
    let parts: Vec<&str> = input
        .split('+')
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect();
    if parts.len() < 2 {
        return Err(HotkeyError::MissingPart(input.to_string()));
    }

    let mut modifiers = Vec::with_capacity(parts.len() - 1);
    for part in &parts[..parts.len() - 1] {
        let modifier = match part.to_ascii_lowercase().as_str() {
            "mod" | "cmdorctrl" => Modifier::Primary,
            "ctrl" | "control" => Modifier::Ctrl,
            "meta" | "cmd" | "super" => Modifier::Meta,
            "alt" | "option" => Modifier::Alt,
            "shift" => Modifier::Shift,
            _ => return Err(HotkeyError::UnsupportedModifier(part.to_string())),
        };
        if !modifiers.contains(&modifier) {
            modifiers.push(modifier);
        }
    }
    modifiers.sort();

    let key_raw = parts[parts.len() - 1];
    let mut chars = key_raw.chars();
    let key = match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphanumeric() => c.to_ascii_lowercase(),
        _ => return Err(HotkeyError::UnsupportedKey(key_raw.to_string())),
    };

    Ok(Hotkey { modifiers, key })
}

/// A keydown as the host reports it; `key` follows DOM naming ("k", "ArrowDown", "Escape").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyInput {
    pub key: String,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub meta: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub shift: bool,
}

impl KeyInput {
    pub fn named(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ..Self::default()
        }
    }

    pub fn ctrl(key: &str) -> Self {
        Self {
            ctrl: true,
            ..Self::named(key)
        }
    }

    pub fn meta(key: &str) -> Self {
        Self {
            meta: true,
            ..Self::named(key)
        }
    }

    pub fn is_escape(&self) -> bool {
        self.key == "Escape" || self.key == "Esc"
    }
}
