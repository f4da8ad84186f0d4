//! Password generation with per-class inclusion guarantees.
//!
//! A password is drawn uniformly from lowercase letters plus every enabled
//! optional class. A repair pass then makes sure each enabled class shows up
//! at least once by overwriting a random position.

use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::character_class::CharacterClass;
use crate::types::credential::{GeneratorOptions, MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};
use crate::types::errors::GeneratorError;

/// Checks that `length` is inside the accepted range.
pub fn validate_length(length: usize) -> Result<(), GeneratorError> {
    if length < MIN_PASSWORD_LENGTH {
        return Err(GeneratorError::LengthTooShort(length));
    }
    if length > MAX_PASSWORD_LENGTH {
        return Err(GeneratorError::LengthTooLong(length));
    }
    Ok(())
}

/// Returns the classes enabled by `options`, lowercase first.
pub fn enabled_classes(options: &GeneratorOptions) -> Vec<CharacterClass> {
    let mut classes = vec![CharacterClass::Lowercase];
    for class in CharacterClass::OPTIONAL {
        let enabled = match class {
            CharacterClass::Uppercase => options.use_uppercase,
            CharacterClass::Digit => options.use_digits,
            CharacterClass::Special => options.use_special,
            CharacterClass::Lowercase => false,
        };
        if enabled {
            classes.push(class);
        }
    }
    classes
}

/// Random password generator. Owns its randomness source so tests can seed it.
pub struct PasswordGenerator<R = ThreadRng> {
    rng: R,
}

impl PasswordGenerator<ThreadRng> {
    /// Creates a generator backed by the thread-local CSPRNG.
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl Default for PasswordGenerator<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> PasswordGenerator<R> {
    /// Creates a generator that draws from `rng`.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Generates a password of `options.length` characters.
    ///
    /// # Errors
    /// `LengthTooShort`/`LengthTooLong` when the length is outside `[4, 100]`.
    pub fn generate(&mut self, options: &GeneratorOptions) -> Result<String, GeneratorError> {
        validate_length(options.length)?;

        let universe: Vec<u8> = enabled_classes(options)
            .iter()
            .flat_map(|class| class.chars().iter().copied())
            .collect();
        if universe.is_empty() {
            return Err(GeneratorError::EmptyCharacterUniverse);
        }

        let mut draft = String::with_capacity(options.length);
        for _ in 0..options.length {
            // universe is non-empty, so choose always yields
            if let Some(&b) = universe.choose(&mut self.rng) {
                draft.push(b as char);
            }
        }

        let password = self.ensure_character_classes(&draft, options);
        log::debug!(
            "generated password of length {} with classes [{}]",
            password.len(),
            enabled_classes(options)
                .iter()
                .map(|c| c.name())
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(password)
    }

    /// Makes sure every enabled class occurs in `password`.
    ///
    /// Classes are checked in the order lowercase, uppercase, digit, special
    /// against the current state of the string. A missing class overwrites one
    /// random position whose character is not the last of another enabled
    /// class. When no such position exists (input shorter than the number of
    /// classes) any position is used, so on a one-character input the last
    /// missing class wins.
    pub fn ensure_character_classes(&mut self, password: &str, options: &GeneratorOptions) -> String {
        let mut chars: Vec<char> = password.chars().collect();
        if chars.is_empty() {
            return String::new();
        }

        let classes = enabled_classes(options);
        for &class in &classes {
            if chars.iter().any(|&c| class.contains(c)) {
                continue;
            }

            let replaceable: Vec<usize> = (0..chars.len())
                .filter(|&i| match class_of(chars[i], &classes) {
                    Some(owner) => chars.iter().filter(|&&c| owner.contains(c)).count() > 1,
                    None => true,
                })
                .collect();
            let index = match replaceable.choose(&mut self.rng) {
                Some(&i) => i,
                None => self.rng.gen_range(0..chars.len()),
            };

            if let Some(&b) = class.chars().choose(&mut self.rng) {
                chars[index] = b as char;
            }
        }

        chars.into_iter().collect()
    }
}

fn class_of(c: char, classes: &[CharacterClass]) -> Option<CharacterClass> {
    classes.iter().copied().find(|class| class.contains(c))
}
