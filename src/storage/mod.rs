pub mod json_backend;

use std::path::{Path, PathBuf};

use crate::{book::AddressBook, errors::ContactError};

pub type Result<T> = std::result::Result<T, ContactError>;

/// Abstraction over persistence backends capable of storing address books and
/// their backup snapshots.
pub trait StorageBackend: Send + Sync {
    fn save(&self, book: &AddressBook, name: &str) -> Result<PathBuf>;
    fn load(&self, name: &str) -> Result<AddressBook>;
    fn exists(&self, name: &str) -> bool;
    fn book_path(&self, name: &str) -> PathBuf;
    fn backup(&self, book: &AddressBook, name: &str, note: Option<&str>) -> Result<PathBuf>;
    /// Backup file names for `name`, newest first.
    fn list_backups(&self, name: &str) -> Result<Vec<String>>;
    fn restore(&self, name: &str, backup_name: &str) -> Result<AddressBook>;

    fn save_to_path(&self, book: &AddressBook, path: &Path) -> Result<()> {
        json_backend::save_book_to_path(book, path)
    }

    fn load_from_path(&self, path: &Path) -> Result<AddressBook> {
        json_backend::load_book_from_path(path)
    }
}

pub use json_backend::JsonStorage;
