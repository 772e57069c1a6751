//! Storage module - encrypted CRUD over books and pages.
//!
//! The repository owns the SQLite schema and every read/write path. Text
//! columns never hold plaintext: each operation runs the field cipher on
//! the way in and on the way out.

pub mod repository;

pub use repository::{BookEntry, PageEntry, Repository, SENTINEL_BOOK_ID};
