//! Key derivation with PBKDF2-HMAC-SHA256.
//!
//! Derivation is a pure function of the password: the salt is the
//! password's own UTF-8 bytes, so the same password always yields the same
//! key and nothing has to be persisted next to the vault. That is weaker
//! than a stored random salt, but the vault schema stores no key material
//! at all and password verification relies on re-deriving the exact key.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::ZeroizeOnDrop;

use crate::error::{Result, VaultError};

/// Key length (bytes) - 256 bits for AES-256
pub const KEY_LEN: usize = 32;

/// PBKDF2 round count. High enough to slow down offline brute force on the
/// vault file; derivation runs once per unlock, not per field.
pub const PBKDF2_ROUNDS: u32 = 100_000;

/// 32-byte symmetric key derived from the user password.
/// Wiped from memory on drop.
#[derive(ZeroizeOnDrop)]
pub struct DerivedKey([u8; KEY_LEN]);

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("DerivedKey").field(&"<redacted>").finish()
    }
}

impl DerivedKey {
    /// Raw key bytes, for handing to the field cipher.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

/// Derive the vault key from a password.
///
/// Deterministic: `derive_key(p)` always returns the same key for the same
/// `p`. Empty passwords are rejected - an empty salt and an empty secret
/// would make the whole vault trivially derivable.
pub fn derive_key(password: &str) -> Result<DerivedKey> {
    if password.is_empty() {
        return Err(VaultError::InvalidInput(
            "password must not be empty".into(),
        ));
    }

    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(
        password.as_bytes(),
        password.as_bytes(), // salt: the password itself, see module doc
        PBKDF2_ROUNDS,
        &mut key,
    );
    Ok(DerivedKey(key))
}
