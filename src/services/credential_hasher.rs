use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use ring::pbkdf2;
use std::num::NonZeroU32;
use zeroize::Zeroizing;

use crate::types::errors::CryptoError;

/// PBKDF2 iteration count for password digests.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Salt length in bytes before encoding.
pub const SALT_LENGTH: usize = 16;

/// Derived hash length in bytes before encoding.
pub const HASH_LENGTH: usize = 32;

/// Separates the encoded salt from the encoded hash. Not part of the base64 alphabet.
pub const TOKEN_SEPARATOR: char = '$';

/// Trait defining how passwords are turned into stored digests and checked against them.
pub trait CredentialHasherTrait {
    /// Hashes `plaintext` with a fresh random salt, returning a `salt$hash` token.
    fn hash(&mut self, plaintext: &str) -> Result<String, CryptoError>;

    /// Returns `true` only if `token` is well formed and was derived from `plaintext`.
    fn verify(&self, plaintext: &str, token: &str) -> bool;
}

/// Salted PBKDF2-HMAC-SHA256 hasher using the `ring` crate.
pub struct CredentialHasher<R = OsRng> {
    rng: R,
}

impl CredentialHasher<OsRng> {
    /// Creates a hasher drawing salts from the operating system.
    pub fn new() -> Self {
        Self { rng: OsRng }
    }
}

impl Default for CredentialHasher<OsRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore + CryptoRng> CredentialHasher<R> {
    /// Creates a hasher drawing salts from `rng`.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    fn generate_salt(&mut self) -> Result<String, CryptoError> {
        let mut salt = [0u8; SALT_LENGTH];
        self.rng
            .try_fill_bytes(&mut salt)
            .map_err(CryptoError::RandomGeneration)?;
        Ok(STANDARD.encode(salt))
    }
}

fn iterations() -> Result<NonZeroU32, CryptoError> {
    NonZeroU32::new(PBKDF2_ITERATIONS)
        .ok_or_else(|| CryptoError::KeyDerivation("Invalid iteration count".to_string()))
}

/// Splits a token into its encoded salt and decoded hash, or `None` if malformed.
///
/// Both segments must decode to their full lengths. `pbkdf2::verify` only
/// derives as many bytes as it is given, so a short hash would match a prefix.
fn parse_token(token: &str) -> Option<(&str, Vec<u8>)> {
    let mut parts = token.split(TOKEN_SEPARATOR);
    let salt = parts.next()?;
    let hash = parts.next()?;
    if parts.next().is_some() || salt.is_empty() || hash.is_empty() {
        return None;
    }
    if STANDARD.decode(salt).ok()?.len() != SALT_LENGTH {
        return None;
    }
    let hash = STANDARD.decode(hash).ok()?;
    if hash.len() != HASH_LENGTH {
        return None;
    }
    Some((salt, hash))
}

impl<R: RngCore + CryptoRng> CredentialHasherTrait for CredentialHasher<R> {
    fn hash(&mut self, plaintext: &str) -> Result<String, CryptoError> {
        let salt = self.generate_salt()?;
        let mut derived = Zeroizing::new([0u8; HASH_LENGTH]);
        // The encoded salt text is the PBKDF2 salt, so a token verifies from its text alone.
        pbkdf2::derive(
            pbkdf2::PBKDF2_HMAC_SHA256,
            iterations()?,
            salt.as_bytes(),
            plaintext.as_bytes(),
            &mut derived[..],
        );
        Ok(format!("{}{}{}", salt, TOKEN_SEPARATOR, STANDARD.encode(&derived[..])))
    }

    fn verify(&self, plaintext: &str, token: &str) -> bool {
        let Some((salt, stored)) = parse_token(token) else {
            return false;
        };
        let Ok(iterations) = iterations() else {
            return false;
        };
        pbkdf2::verify(
            pbkdf2::PBKDF2_HMAC_SHA256,
            iterations,
            salt.as_bytes(),
            plaintext.as_bytes(),
            &stored,
        )
        .is_ok()
    }
}
