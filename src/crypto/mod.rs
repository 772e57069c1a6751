//! Crypto module - key derivation and field encryption.
//!
//! Two layers, used together by the vault:
//! - Key derivation turns a password into a reproducible 32-byte key
//! - The field cipher encrypts/decrypts individual text columns with it

pub mod encryption;
pub mod key_derivation;

pub use encryption::FieldCipher;
pub use key_derivation::{derive_key, DerivedKey, KEY_LEN};
