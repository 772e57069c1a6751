//! End-to-end scenarios over a vault on disk: create, unlock, and drive
//! the full encrypted book/page lifecycle the way the UI shell would.

use anyhow::Result;
use tempfile::TempDir;

use tomelock::{Vault, VaultConfig, VaultError};

/// Helper: fresh vault in its own temporary directory.
fn vault_in(temp: &TempDir) -> Vault {
    Vault::new(VaultConfig::with_db_path(temp.path().join("vault.db")))
}

#[test]
fn test_diary_lifecycle() -> Result<()> {
    let temp = TempDir::new()?;
    let vault = vault_in(&temp);

    let cipher = vault.initialize("secret")?;
    let repo = vault.repository();

    // The sentinel takes id 1, so the first user book gets id 2
    let id = repo.create_book(&cipher, "Diary", "Hello")?;
    assert_eq!(id, 2);
    assert_eq!(repo.get_book_text(&cipher, id)?, "Hello");

    repo.update_book_text(&cipher, id, "Updated")?;
    assert_eq!(repo.get_book_text(&cipher, id)?, "Updated");

    repo.delete_book(id)?;
    assert!(repo.list_books(&cipher)?.is_empty());

    Ok(())
}

#[test]
fn test_unlock_matches_initialize_key() -> Result<()> {
    let temp = TempDir::new()?;

    // Write with the cipher from initialize
    let book_id = {
        let vault = vault_in(&temp);
        let cipher = vault.initialize("secret")?;
        vault.repository().create_book(&cipher, "Diary", "written at init")?
    };

    // A separate handle over the same file must read it back after unlock
    let vault = vault_in(&temp);
    let cipher = vault.unlock("secret")?;
    assert_eq!(
        vault.repository().get_book_text(&cipher, book_id)?,
        "written at init"
    );

    Ok(())
}

#[test]
fn test_wrong_password_is_rejected_cleanly() -> Result<()> {
    let temp = TempDir::new()?;
    let vault = vault_in(&temp);
    vault.initialize("secret")?;

    assert!(matches!(
        vault.unlock("wrong"),
        Err(VaultError::InvalidPassword)
    ));
    // The right password still works afterwards
    vault.unlock("secret")?;

    Ok(())
}

#[test]
fn test_listing_order_ignores_insertion_order() -> Result<()> {
    let temp = TempDir::new()?;
    let vault = vault_in(&temp);
    let cipher = vault.initialize("secret")?;
    let repo = vault.repository();

    repo.create_book(&cipher, "Zebra", "")?;
    repo.create_book(&cipher, "Apple", "")?;

    let names: Vec<String> = repo.list_books(&cipher)?.into_iter().map(|b| b.name).collect();
    assert_eq!(names, ["Apple", "Zebra"]);

    Ok(())
}

#[test]
fn test_cascade_delete_leaves_no_pages() -> Result<()> {
    let temp = TempDir::new()?;
    let vault = vault_in(&temp);
    let cipher = vault.initialize("secret")?;
    let repo = vault.repository();

    let book = repo.create_book(&cipher, "Diary", "")?;
    repo.create_page(&cipher, book, "One", "first")?;
    repo.create_page(&cipher, book, "Two", "second")?;
    assert_eq!(repo.list_pages(&cipher, book)?.len(), 2);

    repo.delete_book(book)?;
    assert!(repo.list_pages(&cipher, book)?.is_empty());

    Ok(())
}

#[test]
fn test_seeded_vault_round_trip() -> Result<()> {
    let temp = TempDir::new()?;
    let vault = vault_in(&temp);
    let cipher = vault.initialize("secret")?;
    vault.seed_sample_content(&cipher)?;

    // Reopen with a fresh unlock and walk every seeded field
    let vault = vault_in(&temp);
    let cipher = vault.unlock("secret")?;
    let repo = vault.repository();

    let books = repo.list_books(&cipher)?;
    assert_eq!(books.len(), 2);
    for book in &books {
        assert!(!repo.get_book_text(&cipher, book.id)?.is_empty());
        for page in repo.list_pages(&cipher, book.id)? {
            assert!(!repo.get_page_text(&cipher, page.id)?.is_empty());
        }
    }

    Ok(())
}
