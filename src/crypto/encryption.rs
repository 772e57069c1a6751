//! AES-256-GCM field encryption.
//!
//! Every text column in the vault (book names, book texts, page names,
//! page texts) is stored as one self-contained blob produced here.
//!
//! Blob format: nonce (12 bytes) || ciphertext + tag (16 bytes)
//!
//! The nonce is random per encryption, so encrypting the same text twice
//! yields different blobs; each blob decrypts independently. No other
//! module interprets these bytes.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use rand::{rngs::OsRng, RngCore};

use super::key_derivation::DerivedKey;
use crate::error::{Result, VaultError};

/// Nonce length (bytes) - 96 bits
pub const NONCE_LEN: usize = 12;

/// Authentication tag length (bytes) - 128 bits
pub const TAG_LEN: usize = 16;

/// Encrypts and decrypts individual text fields with a derived key.
///
/// This is the "key" handle the rest of the crate passes around: it is
/// constructed once per unlocked vault and handed to every repository call.
pub struct FieldCipher {
    cipher: Aes256Gcm,
}

impl std::fmt::Debug for FieldCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldCipher").finish_non_exhaustive()
    }
}

impl FieldCipher {
    /// Build a field cipher from a derived key.
    pub fn new(key: &DerivedKey) -> Self {
        let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
            .expect("KEY_LEN matches the AES-256 key size");
        Self { cipher }
    }

    /// Encrypt a text field. Returns nonce || ciphertext+tag.
    pub fn encrypt(&self, plaintext: &str) -> Result<Vec<u8>> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|_| VaultError::Authentication)?;

        let mut blob = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        blob.extend_from_slice(&nonce_bytes);
        blob.extend_from_slice(&ciphertext);
        Ok(blob)
    }

    /// Decrypt a blob back to the original text.
    ///
    /// Fails with `Format` when the blob cannot even be parsed (too short,
    /// or the plaintext is not UTF-8) and with `Authentication` when the
    /// tag does not verify (wrong key or tampered data).
    pub fn decrypt(&self, blob: &[u8]) -> Result<String> {
        if blob.len() < NONCE_LEN + TAG_LEN {
            return Err(VaultError::Format(format!(
                "blob too short: {} bytes, minimum {}",
                blob.len(),
                NONCE_LEN + TAG_LEN
            )));
        }

        let (nonce_bytes, ciphertext) = blob.split_at(NONCE_LEN);
        let nonce = Nonce::from_slice(nonce_bytes);

        let plaintext = self
            .cipher
            .decrypt(nonce, ciphertext)
            .map_err(|_| VaultError::Authentication)?;

        String::from_utf8(plaintext)
            .map_err(|e| VaultError::Format(format!("plaintext is not UTF-8: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::key_derivation::derive_key;

    fn cipher(password: &str) -> FieldCipher {
        FieldCipher::new(&derive_key(password).unwrap())
    }

    #[test]
    fn test_roundtrip() {
        let c = cipher("secret");
        let blob = c.encrypt("Hello, notebook!").unwrap();
        assert_eq!(c.decrypt(&blob).unwrap(), "Hello, notebook!");
    }

    #[test]
    fn test_roundtrip_unicode_and_empty() {
        let c = cipher("secret");
        for text in ["", "ñandú 枕草子 📓", "line one\nline two"] {
            let blob = c.encrypt(text).unwrap();
            assert_eq!(c.decrypt(&blob).unwrap(), text);
        }
    }

    #[test]
    fn test_blob_size() {
        let c = cipher("secret");
        let blob = c.encrypt("test").unwrap();
        assert_eq!(blob.len(), NONCE_LEN + "test".len() + TAG_LEN);
    }

    #[test]
    fn test_fresh_nonce_each_call() {
        let c = cipher("secret");
        let b1 = c.encrypt("same text").unwrap();
        let b2 = c.encrypt("same text").unwrap();
        assert_ne!(b1, b2);
        // Both still decrypt to the original
        assert_eq!(c.decrypt(&b1).unwrap(), "same text");
        assert_eq!(c.decrypt(&b2).unwrap(), "same text");
    }

    #[test]
    fn test_wrong_key_fails_authentication() {
        let blob = cipher("right password").encrypt("secret note").unwrap();
        let err = cipher("wrong password").decrypt(&blob).unwrap_err();
        assert!(matches!(err, VaultError::Authentication));
    }

    #[test]
    fn test_tampered_blob_fails_authentication() {
        let c = cipher("secret");
        let mut blob = c.encrypt("secret note").unwrap();
        *blob.last_mut().unwrap() ^= 0xFF;
        let err = c.decrypt(&blob).unwrap_err();
        assert!(matches!(err, VaultError::Authentication));
    }

    #[test]
    fn test_truncated_blob_is_format_error() {
        let c = cipher("secret");
        let err = c.decrypt(&[0u8; NONCE_LEN]).unwrap_err();
        assert!(matches!(err, VaultError::Format(_)));
    }
}
