//! Error taxonomy for the vault core.
//!
//! Every fallible operation in this crate returns [`VaultError`] so callers
//! can tell an engine fault from a bad password from a malformed blob.

use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, VaultError>;

#[derive(Debug, Error)]
pub enum VaultError {
    /// Storage engine fault: connection, disk, or SQL failure.
    #[error("Database error: {0}")]
    Engine(#[from] rusqlite::Error),

    /// Filesystem fault outside the storage engine (config files, probes).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file could not be parsed or serialized.
    #[error("Config error: {0}")]
    Config(String),

    /// AEAD tag did not verify: wrong key or tampered ciphertext.
    #[error("Decryption failed: authentication tag mismatch")]
    Authentication,

    /// Ciphertext blob is malformed (truncated, or plaintext not UTF-8).
    #[error("Malformed ciphertext: {0}")]
    Format(String),

    /// A referenced row does not exist (e.g. page created under a missing book).
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Caller-supplied input was rejected before touching the store.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Password does not unlock this vault.
    #[error("Invalid password")]
    InvalidPassword,

    /// `initialize` called but the store file already exists.
    #[error("Vault already initialized at {0}")]
    AlreadyInitialized(PathBuf),

    /// `unlock` called but there is no store file yet.
    #[error("No vault found at {0}")]
    NotInitialized(PathBuf),
}
