//! Vault lifecycle - first-run creation and password verification.
//!
//! The vault never stores the password or the key. Instead the first book
//! row (the sentinel, id 1) holds the password encrypted under the key the
//! password itself derives. Unlocking re-derives the key, decrypts the
//! sentinel, and compares: only the right password can both decrypt the
//! blob and match its contents.

use tracing::{debug, info};

use crate::config::VaultConfig;
use crate::crypto::{derive_key, FieldCipher};
use crate::error::{Result, VaultError};
use crate::storage::{Repository, SENTINEL_BOOK_ID};

// Sample content seeded on first run, so a fresh vault is not a blank
// screen. Mirrors what the desktop shell shows for a brand-new diary.
const SAMPLE_BOOK_NAME: &str = "Book";
const SAMPLE_BOOK_TEXT: &str = "# Welcome to your notebook\nYou can type your text here";
const SAMPLE_PAGE_NAME: &str = "Page";
const SAMPLE_PAGE_TEXT: &str = "This is a sample text for the page";

/// Handle over one vault file: either not yet created (`NoVault`) or
/// created and waiting for the right password (`VaultExists`).
pub struct Vault {
    config: VaultConfig,
    repo: Repository,
}

impl Vault {
    pub fn new(config: VaultConfig) -> Self {
        let repo = Repository::new(config.clone());
        Self { config, repo }
    }

    /// Access the repository bound to this vault's store.
    pub fn repository(&self) -> &Repository {
        &self.repo
    }

    /// Whether the store file exists yet.
    pub fn exists(&self) -> bool {
        self.config.db_path.exists()
    }

    /// First run: create the store, schema, and sentinel record.
    ///
    /// Returns the field cipher for the new vault. Fails with
    /// `AlreadyInitialized` when the store file is already present.
    pub fn initialize(&self, password: &str) -> Result<FieldCipher> {
        if self.exists() {
            return Err(VaultError::AlreadyInitialized(self.config.db_path.clone()));
        }

        let cipher = FieldCipher::new(&derive_key(password)?);
        self.repo.create_schema()?;

        let sentinel_id = self.repo.create_book(&cipher, password, "")?;
        debug_assert_eq!(sentinel_id, SENTINEL_BOOK_ID);

        info!(path = %self.config.db_path.display(), "vault created");
        Ok(cipher)
    }

    /// Subsequent runs: verify the password against the sentinel record.
    ///
    /// Decryption failure (wrong key) and a decrypted mismatch both come
    /// back as `InvalidPassword`; the caller only needs to know the vault
    /// did not open.
    pub fn unlock(&self, password: &str) -> Result<FieldCipher> {
        if !self.exists() {
            return Err(VaultError::NotInitialized(self.config.db_path.clone()));
        }

        let cipher = FieldCipher::new(&derive_key(password)?);
        let stored = match self.repo.get_book_name(&cipher, SENTINEL_BOOK_ID) {
            Ok(stored) => stored,
            Err(VaultError::Authentication) => {
                debug!("sentinel did not decrypt under the derived key");
                return Err(VaultError::InvalidPassword);
            }
            Err(e) => return Err(e),
        };

        if stored != password {
            debug!("sentinel decrypted but does not match the supplied password");
            return Err(VaultError::InvalidPassword);
        }

        info!(path = %self.config.db_path.display(), "vault unlocked");
        Ok(cipher)
    }

    /// Seed the sample books and pages shown after creating a new vault:
    /// "Book 1" with two pages and "Book 2" with three.
    pub fn seed_sample_content(&self, cipher: &FieldCipher) -> Result<()> {
        for (book_no, page_count) in [(1, 2), (2, 3)] {
            let book_name = format!("{SAMPLE_BOOK_NAME} {book_no}");
            let book_text = format!("{SAMPLE_BOOK_TEXT} ({book_name})");
            let book_id = self.repo.create_book(cipher, &book_name, &book_text)?;

            for page_no in 1..=page_count {
                let page_name = format!("{SAMPLE_PAGE_NAME} {page_no}");
                let page_text = format!("{SAMPLE_PAGE_TEXT} ({page_name})");
                self.repo.create_page(cipher, book_id, &page_name, &page_text)?;
            }
        }
        Ok(())
    }
}
