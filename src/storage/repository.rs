//! Repository - SQLite persistence for encrypted books and pages.
//!
//! Two tables: `book` and `page`. Ids are AUTOINCREMENT so they are never
//! reused after deletion. All name/text columns are AEAD blobs from
//! [`FieldCipher`]; the repository never looks inside them.
//!
//! Concurrency model: each operation opens its own short-lived connection,
//! runs one statement or one transaction, and drops the connection on every
//! exit path. A single active caller is assumed; there is no pooling and no
//! higher-level locking.

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, error, info};

use crate::config::VaultConfig;
use crate::crypto::FieldCipher;
use crate::error::{Result, VaultError};

/// Reserved book row holding the encrypted password. Never listed, never
/// handed to callers.
pub const SENTINEL_BOOK_ID: i64 = 1;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS book (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    book_name BLOB NOT NULL,
    book_text BLOB NOT NULL
);

CREATE TABLE IF NOT EXISTS page (
    book_id INTEGER NOT NULL,
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    page_name BLOB NOT NULL,
    page_text BLOB NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_page_book ON page(book_id);
";

/// A book as seen by the UI layer: id plus decrypted name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookEntry {
    pub id: i64,
    pub name: String,
}

/// A page as seen by the UI layer: id plus decrypted name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageEntry {
    pub id: i64,
    pub name: String,
}

/// Encrypted CRUD over books and pages.
pub struct Repository {
    config: VaultConfig,
}

impl Repository {
    pub fn new(config: VaultConfig) -> Self {
        Self { config }
    }

    /// Open a connection for one operation.
    fn connect(&self) -> Result<Connection> {
        Connection::open(&self.config.db_path).map_err(|e| {
            error!(path = %self.config.db_path.display(), "cannot open vault database: {e}");
            VaultError::Engine(e)
        })
    }

    /// Idempotently create tables and indexes, making parent directories
    /// for the database file first.
    pub fn create_schema(&self) -> Result<()> {
        if let Some(parent) = self.config.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = self.connect()?;
        conn.execute_batch(SCHEMA)?;
        info!(path = %self.config.db_path.display(), "vault schema ready");
        Ok(())
    }

    // ── Create ──────────────────────────────────────────────────────────

    /// Insert a book; returns its auto-assigned id.
    pub fn create_book(&self, cipher: &FieldCipher, name: &str, text: &str) -> Result<i64> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO book (book_name, book_text) VALUES (?1, ?2)",
            params![cipher.encrypt(name)?, cipher.encrypt(text)?],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Insert a page under an existing book; returns its auto-assigned id.
    ///
    /// Fails with `NotFound` when the book does not exist, so pages can
    /// never be orphaned at creation time.
    pub fn create_page(
        &self,
        cipher: &FieldCipher,
        book_id: i64,
        name: &str,
        text: &str,
    ) -> Result<i64> {
        let conn = self.connect()?;
        let book_exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM book WHERE id = ?1)",
            params![book_id],
            |row| row.get(0),
        )?;
        if !book_exists {
            return Err(VaultError::NotFound(format!("book {book_id}")));
        }
        conn.execute(
            "INSERT INTO page (book_id, page_name, page_text) VALUES (?1, ?2, ?3)",
            params![book_id, cipher.encrypt(name)?, cipher.encrypt(text)?],
        )?;
        Ok(conn.last_insert_rowid())
    }

    // ── Update ──────────────────────────────────────────────────────────
    //
    // Updates against an id that matches nothing are silent no-ops; that
    // is documented behavior the UI layer relies on.

    pub fn update_book_name(&self, cipher: &FieldCipher, book_id: i64, name: &str) -> Result<()> {
        self.update_column(cipher, "UPDATE book SET book_name = ?1 WHERE id = ?2", book_id, name)
    }

    pub fn update_book_text(&self, cipher: &FieldCipher, book_id: i64, text: &str) -> Result<()> {
        self.update_column(cipher, "UPDATE book SET book_text = ?1 WHERE id = ?2", book_id, text)
    }

    pub fn update_page_name(&self, cipher: &FieldCipher, page_id: i64, name: &str) -> Result<()> {
        self.update_column(cipher, "UPDATE page SET page_name = ?1 WHERE id = ?2", page_id, name)
    }

    pub fn update_page_text(&self, cipher: &FieldCipher, page_id: i64, text: &str) -> Result<()> {
        self.update_column(cipher, "UPDATE page SET page_text = ?1 WHERE id = ?2", page_id, text)
    }

    fn update_column(
        &self,
        cipher: &FieldCipher,
        sql: &str,
        id: i64,
        value: &str,
    ) -> Result<()> {
        let conn = self.connect()?;
        let changed = conn.execute(sql, params![cipher.encrypt(value)?, id])?;
        if changed == 0 {
            debug!(id, "update matched no row");
        }
        Ok(())
    }

    // ── Read ────────────────────────────────────────────────────────────

    /// Decrypted name of a book. Missing row yields an empty string.
    pub fn get_book_name(&self, cipher: &FieldCipher, book_id: i64) -> Result<String> {
        self.read_column(cipher, "SELECT book_name FROM book WHERE id = ?1", book_id)
    }

    /// Decrypted body text of a book. Missing row yields an empty string;
    /// a wrong key surfaces as `Authentication`.
    pub fn get_book_text(&self, cipher: &FieldCipher, book_id: i64) -> Result<String> {
        self.read_column(cipher, "SELECT book_text FROM book WHERE id = ?1", book_id)
    }

    /// Decrypted body text of a page. Same missing-row policy as books.
    pub fn get_page_text(&self, cipher: &FieldCipher, page_id: i64) -> Result<String> {
        self.read_column(cipher, "SELECT page_text FROM page WHERE id = ?1", page_id)
    }

    fn read_column(&self, cipher: &FieldCipher, sql: &str, id: i64) -> Result<String> {
        let conn = self.connect()?;
        let blob: Option<Vec<u8>> = conn
            .query_row(sql, params![id], |row| row.get(0))
            .optional()?;
        match blob {
            Some(blob) => cipher.decrypt(&blob),
            None => Ok(String::new()),
        }
    }

    // ── List ────────────────────────────────────────────────────────────

    /// All user-visible books (the sentinel row excluded), sorted by
    /// decrypted name, ascending and case-sensitive.
    pub fn list_books(&self, cipher: &FieldCipher) -> Result<Vec<BookEntry>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT id, book_name FROM book WHERE id > ?1")?;
        let rows = stmt.query_map(params![SENTINEL_BOOK_ID], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, Vec<u8>>(1)?))
        })?;

        let mut books = Vec::new();
        for row in rows {
            let (id, blob) = row?;
            books.push(BookEntry {
                id,
                name: cipher.decrypt(&blob)?,
            });
        }
        // Ordering lives on the decrypted names, so it cannot be pushed
        // into the SQL
        books.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(books)
    }

    /// Pages of one book, sorted like `list_books`.
    pub fn list_pages(&self, cipher: &FieldCipher, book_id: i64) -> Result<Vec<PageEntry>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT id, page_name FROM page WHERE book_id = ?1")?;
        let rows = stmt.query_map(params![book_id], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, Vec<u8>>(1)?))
        })?;

        let mut pages = Vec::new();
        for row in rows {
            let (id, blob) = row?;
            pages.push(PageEntry {
                id,
                name: cipher.decrypt(&blob)?,
            });
        }
        pages.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(pages)
    }

    // ── Delete ──────────────────────────────────────────────────────────

    /// Delete a book and all of its pages in one transaction, so a fault
    /// can never leave orphaned pages behind.
    pub fn delete_book(&self, book_id: i64) -> Result<()> {
        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let pages = tx.execute("DELETE FROM page WHERE book_id = ?1", params![book_id])?;
        tx.execute("DELETE FROM book WHERE id = ?1", params![book_id])?;
        tx.commit()?;
        info!(book_id, pages, "deleted book and its pages");
        Ok(())
    }

    /// Delete a single page.
    pub fn delete_page(&self, page_id: i64) -> Result<()> {
        let conn = self.connect()?;
        conn.execute("DELETE FROM page WHERE id = ?1", params![page_id])?;
        Ok(())
    }
}
