#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use contact_book::{
    book::{AddressBook, Record},
    config::ConfigManager,
    core::BookManager,
    storage::JsonStorage,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Returns a fresh directory that outlives the calling test.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Creates isolated managers backed by a unique directory for each test.
pub fn setup_test_env() -> (BookManager, ConfigManager, PathBuf) {
    let base = temp_home();
    let storage = JsonStorage::new(Some(base.clone()), Some(3)).expect("create json storage");
    let manager =
        BookManager::open(Box::new(storage), "addressbook").expect("open address book");
    let config_manager =
        ConfigManager::with_base_dir(base.clone()).expect("create config manager for temp dir");
    (manager, config_manager, base)
}

pub fn record(name: &str, phones: &[&str], birthday: Option<&str>) -> Record {
    let mut record = Record::new(name).expect("valid name");
    for phone in phones {
        record.add_phone(phone).expect("valid phone");
    }
    if let Some(date) = birthday {
        record.set_birthday(date).expect("valid birthday");
    }
    record
}

pub fn sample_book() -> AddressBook {
    let mut book = AddressBook::new();
    book.add_record(record(
        "John",
        &["1234567890", "5555555555"],
        Some("15.06.1990"),
    ));
    book.add_record(record("Jane", &["0987654321"], None));
    book
}
