use std::path::{Path, PathBuf};

use crate::book::AddressBook;
use crate::errors::ContactError;
use crate::storage::StorageBackend;

/// Facade that coordinates the open address book, persistence, and backups.
pub struct BookManager {
    book: AddressBook,
    name: String,
    dirty: bool,
    storage: Box<dyn StorageBackend>,
}

impl BookManager {
    pub fn new(storage: Box<dyn StorageBackend>, name: impl Into<String>) -> Self {
        Self {
            book: AddressBook::new(),
            name: name.into(),
            dirty: false,
            storage,
        }
    }

    /// Loads `name` from storage, falling back to an empty book when nothing
    /// has been saved under that name yet.
    pub fn open(storage: Box<dyn StorageBackend>, name: &str) -> Result<Self, ContactError> {
        let mut manager = Self::new(storage, name);
        if manager.storage.exists(name) {
            manager.book = manager.storage.load(name)?;
        } else {
            tracing::info!(book = name, "starting with an empty address book");
        }
        Ok(manager)
    }

    pub fn storage(&self) -> &dyn StorageBackend {
        self.storage.as_ref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn book(&self) -> &AddressBook {
        &self.book
    }

    /// Mutable access marks the book as having unsaved changes.
    pub fn book_mut(&mut self) -> &mut AddressBook {
        self.dirty = true;
        &mut self.book
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn save(&mut self) -> Result<PathBuf, ContactError> {
        let path = self.storage.save(&self.book, &self.name)?;
        self.dirty = false;
        Ok(path)
    }

    pub fn save_as(&mut self, name: &str) -> Result<PathBuf, ContactError> {
        let path = self.storage.save(&self.book, name)?;
        self.name = name.to_string();
        self.dirty = false;
        Ok(path)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), ContactError> {
        self.storage.save_to_path(&self.book, path)
    }

    /// Replaces the open book with the contents of `path`. The book keeps its
    /// current name, so the next `save` writes it to managed storage.
    pub fn load_from_path(&mut self, path: &Path) -> Result<(), ContactError> {
        self.book = self.storage.load_from_path(path)?;
        self.dirty = true;
        Ok(())
    }

    pub fn backup(&self, note: Option<&str>) -> Result<PathBuf, ContactError> {
        self.storage.backup(&self.book, &self.name, note)
    }

    pub fn list_backups(&self) -> Result<Vec<String>, ContactError> {
        self.storage.list_backups(&self.name)
    }

    pub fn restore(&mut self, backup_name: &str) -> Result<(), ContactError> {
        self.book = self.storage.restore(&self.name, backup_name)?;
        self.dirty = false;
        Ok(())
    }

    pub fn book_path(&self) -> PathBuf {
        self.storage.book_path(&self.name)
    }
}
