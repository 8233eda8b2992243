mod common;

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;

fn script(home: &Path, input: &str) -> assert_cmd::assert::Assert {
    Command::cargo_bin("contact_book_cli")
        .unwrap()
        .env("CONTACT_BOOK_HOME", home)
        .env("CONTACT_BOOK_CLI_SCRIPT", "1")
        .env("CONTACT_BOOK_TODAY", "2024-06-10")
        .env_remove("RUST_LOG")
        .write_stdin(input)
        .assert()
}

#[test]
fn script_mode_runs_basic_flow() {
    let home = common::temp_home();
    let input = "hello\n\
                 add John 1234567890\n\
                 add John 0987654321\n\
                 add-birthday John 15.06.1900\n\
                 add Jane 5555555555\n\
                 add-birthday Jane 18.06.1980\n\
                 phone John\n\
                 birthdays\n\
                 all\n\
                 exit\n";

    script(&home, input)
        .success()
        .stdout(contains("Welcome to the assistant bot!"))
        .stdout(contains("How can I help you?"))
        .stdout(contains("Contact added."))
        .stdout(contains("Contact updated."))
        .stdout(contains("John: 1234567890; 0987654321"))
        .stdout(contains("John: 17.06.2024"))
        .stdout(contains("Jane: 18.06.2024").not())
        .stdout(contains(
            "Contact name: John, phones: 1234567890; 0987654321, birthday: 15.06.1900",
        ))
        .stdout(contains("Good bye!"));

    let json = fs::read_to_string(home.join("books").join("addressbook.json")).unwrap();
    assert!(json.contains("\"John\""));
    assert!(json.contains("\"15.06.1900\""));
}

#[test]
fn contacts_survive_between_runs() {
    let home = common::temp_home();
    script(&home, "add John 1234567890\nq\n").success();
    script(&home, "phone John\nclose\n")
        .success()
        .stdout(contains("John: 1234567890"));
}

#[test]
fn errors_are_reported_and_the_session_continues() {
    let home = common::temp_home();
    let input = "ad John 1234567890\n\
                 phone Ghost\n\
                 add John 12345\n\
                 add John\n\
                 add-birthday John 1990-01-01\n\
                 hello\n\
                 quit\n";

    script(&home, input)
        .success()
        .stdout(contains("Invalid command `ad`"))
        .stdout(contains("Did you mean `add`?"))
        .stdout(contains("Contact not found."))
        .stdout(contains("Phone 12345 is invalid"))
        .stdout(contains("Usage: add <name> <phone>"))
        .stdout(contains("How can I help you?"))
        .stdout(contains("Good bye!"));
}

#[test]
fn end_of_input_still_saves_changes() {
    let home = common::temp_home();
    script(&home, "add John 1234567890\n").success();
    assert!(home.join("books").join("addressbook.json").exists());
}

#[test]
fn config_changes_are_persisted() {
    let home = common::temp_home();
    script(&home, "config set plain_output true\nconfig show\nexit\n")
        .success()
        .stdout(contains("Updated `plain_output`."))
        .stdout(contains("plain_output"));

    let config = fs::read_to_string(home.join("config").join("config.json")).unwrap();
    assert!(config.contains("\"plain_output\": true"));
}

#[test]
fn backups_can_be_listed_and_restored() {
    let home = common::temp_home();
    let input = "add John 1234567890\n\
                 backup before cleanup\n\
                 delete John\n\
                 backups\n\
                 restore 1\n\
                 all\n\
                 exit\n";
    script(&home, input)
        .success()
        .stdout(contains("Backup created: addressbook_"))
        .stdout(contains("before-cleanup"))
        .stdout(contains("Restored 1 contacts"))
        .stdout(contains("Contact name: John"));
}
