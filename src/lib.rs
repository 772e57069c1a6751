//! Tomelock - encrypted personal notebook storage.
//!
//! Notes are organized as books containing pages, persisted in a local
//! SQLite file with every name and text column encrypted at rest under a
//! password-derived key. Layers, leaf first:
//! - Key derivation: password -> reproducible 32-byte key (PBKDF2)
//! - Field cipher: per-field AES-256-GCM blobs
//! - Repository: encrypted CRUD and listings over books/pages
//! - Vault: first-run creation and password verification via a sentinel row
//!
//! The UI shell sits on top of [`Vault`] and [`Repository`]; this crate
//! never presents dialogs, it only reports typed results.

pub mod config;
pub mod crypto;
pub mod error;
pub mod storage;
pub mod vault;

// Re-export main types
pub use config::VaultConfig;
pub use crypto::{derive_key, DerivedKey, FieldCipher};
pub use error::{Result, VaultError};
pub use storage::{BookEntry, PageEntry, Repository, SENTINEL_BOOK_ID};
pub use vault::Vault;
