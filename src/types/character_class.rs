use serde::{Deserialize, Serialize};

/// Characters allowed by the `special` class.
pub const SPECIAL_CHARS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";

/// One of the four disjoint character sets a password is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterClass {
    Lowercase,
    Uppercase,
    Digit,
    Special,
}

impl CharacterClass {
    /// Optional classes in the order the generator repairs them.
    pub const OPTIONAL: [CharacterClass; 3] = [
        CharacterClass::Uppercase,
        CharacterClass::Digit,
        CharacterClass::Special,
    ];

    /// Returns the members of this class.
    pub fn chars(self) -> &'static [u8] {
        match self {
            CharacterClass::Lowercase => b"abcdefghijklmnopqrstuvwxyz",
            CharacterClass::Uppercase => b"ABCDEFGHIJKLMNOPQRSTUVWXYZ",
            CharacterClass::Digit => b"0123456789",
            CharacterClass::Special => SPECIAL_CHARS.as_bytes(),
        }
    }

    /// Returns `true` if `c` belongs to this class.
    pub fn contains(self, c: char) -> bool {
        c.is_ascii() && self.chars().contains(&(c as u8))
    }

    /// Returns `true` if at least one character of `password` belongs to this class.
    pub fn is_present_in(self, password: &str) -> bool {
        password.chars().any(|c| self.contains(c))
    }

    pub fn name(self) -> &'static str {
        match self {
            CharacterClass::Lowercase => "lowercase",
            CharacterClass::Uppercase => "uppercase",
            CharacterClass::Digit => "digit",
            CharacterClass::Special => "special",
        }
    }
}
