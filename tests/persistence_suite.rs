mod common;

use std::fs;
use std::path::{Path, PathBuf};

use contact_book::{
    book::{AddressBook, BookSnapshot, CURRENT_SCHEMA_VERSION},
    core::BookManager,
    errors::ContactError,
    storage::{
        json_backend::{load_book_from_path, save_book_to_path},
        JsonStorage, StorageBackend,
    },
};
use tempfile::tempdir;

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.tmp", existing),
        None => String::from("tmp"),
    };
    tmp.set_extension(ext);
    tmp
}

#[test]
fn atomic_save_failure_preserves_original_file() {
    let temp = tempdir().unwrap();
    let store = JsonStorage::new(Some(temp.path().to_path_buf()), Some(2)).unwrap();

    let mut book = common::sample_book();
    let path = store.save(&book, "reliable").expect("initial save");
    let original = fs::read_to_string(&path).expect("read original file");

    // A directory at the temp file location makes File::create fail.
    fs::create_dir_all(tmp_path_for(&path)).unwrap();

    book.add_record(common::record("Extra", &["1112223334"], None));
    let result = store.save_to_path(&book, &path);
    assert!(
        result.is_err(),
        "expected save_to_path to fail when temp path is a directory"
    );

    let current = fs::read_to_string(&path).expect("read after failure");
    assert_eq!(
        current, original,
        "atomic save failure must not corrupt the original file"
    );
}

#[test]
fn snapshot_roundtrip_preserves_order_phones_and_birthdays() {
    let book = common::sample_book();
    let snapshot = BookSnapshot::from(&book);
    assert_eq!(snapshot.schema_version, CURRENT_SCHEMA_VERSION);
    assert_eq!(snapshot.records[0].name, "John");
    assert_eq!(snapshot.records[0].phones, vec!["1234567890", "5555555555"]);
    assert_eq!(snapshot.records[0].birthday.as_deref(), Some("15.06.1990"));
    assert_eq!(snapshot.records[1].birthday, None);

    let restored = AddressBook::try_from(snapshot).unwrap();
    assert_eq!(restored, book);
}

#[test]
fn saved_file_uses_the_plain_snapshot_layout() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("contacts.json");
    save_book_to_path(&common::sample_book(), &path).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["schema_version"], 1);
    assert_eq!(value["records"][0]["name"], "John");
    assert_eq!(value["records"][0]["birthday"], "15.06.1990");
    assert_eq!(value["records"][1]["phones"][0], "0987654321");
    assert!(!tmp_path_for(&path).exists());
}

#[test]
fn loading_rejects_invalid_content() {
    let temp = tempdir().unwrap();

    let bad_phone = temp.path().join("bad_phone.json");
    fs::write(
        &bad_phone,
        r#"{"schema_version":1,"records":[{"name":"John","phones":["123"],"birthday":null}]}"#,
    )
    .unwrap();
    assert!(load_book_from_path(&bad_phone).is_err());

    let bad_date = temp.path().join("bad_date.json");
    fs::write(
        &bad_date,
        r#"{"schema_version":1,"records":[{"name":"John","phones":[],"birthday":"1990-01-01"}]}"#,
    )
    .unwrap();
    assert!(load_book_from_path(&bad_date).is_err());

    let future = temp.path().join("future.json");
    fs::write(&future, r#"{"schema_version":9,"records":[]}"#).unwrap();
    assert!(matches!(
        load_book_from_path(&future),
        Err(ContactError::Storage(_))
    ));
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("legacy.json");
    fs::write(&path, r#"{"records":[{"name":"John"}]}"#).unwrap();

    let book = load_book_from_path(&path).unwrap();
    let john = book.find("John").unwrap();
    assert!(john.phones().is_empty());
    assert!(john.birthday().is_none());
}

#[test]
fn manager_reopens_saved_book_and_manages_backups() {
    let (mut manager, _config, base) = common::setup_test_env();
    assert!(manager.book().is_empty());

    for record in &common::sample_book() {
        manager.book_mut().add_record(record.clone());
    }
    manager.save().unwrap();
    manager.book_mut().delete("Jane");
    manager.save().unwrap();

    let backups = manager.list_backups().unwrap();
    assert_eq!(backups.len(), 1, "second save backs up the first file");

    let storage = JsonStorage::new(Some(base.clone()), Some(3)).unwrap();
    let reopened = BookManager::open(Box::new(storage), "addressbook").unwrap();
    assert_eq!(reopened.book().len(), 1);

    manager.restore(&backups[0]).unwrap();
    assert_eq!(manager.book().len(), 2);
    assert!(base.join("books").join("addressbook.json").exists());
}

#[test]
fn books_are_isolated_by_name() {
    let temp = tempdir().unwrap();
    let store = JsonStorage::new(Some(temp.path().to_path_buf()), None).unwrap();
    store.save(&common::sample_book(), "Family").unwrap();
    store.save(&AddressBook::new(), "Work").unwrap();

    assert_eq!(store.load("family").unwrap().len(), 2);
    assert!(store.load("work").unwrap().is_empty());
    assert!(store.load("other").is_err());
}
