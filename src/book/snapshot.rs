//! Plain persistence structures for address books.
//!
//! A book reduces to a list of `{name, phones, birthday}` entries made only of
//! strings, and is rebuilt from that list by re-running the usual validation.
//! Storage backends only ever see these types.

use serde::{Deserialize, Serialize};

use super::{
    address_book::AddressBook, birthday::Birthday, name::ContactName, phone::PhoneNumber,
    record::Record,
};
use crate::errors::ContactError;

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSnapshot {
    pub name: String,
    #[serde(default)]
    pub phones: Vec<String>,
    #[serde(default)]
    pub birthday: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSnapshot {
    #[serde(default = "BookSnapshot::schema_version_default")]
    pub schema_version: u8,
    #[serde(default)]
    pub records: Vec<RecordSnapshot>,
}

impl BookSnapshot {
    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

impl From<Record> for RecordSnapshot {
    fn from(record: Record) -> Self {
        Self::from(&record)
    }
}

impl From<&Record> for RecordSnapshot {
    fn from(record: &Record) -> Self {
        Self {
            name: record.name().to_string(),
            phones: record
                .phones()
                .iter()
                .map(|phone| phone.as_str().to_string())
                .collect(),
            birthday: record.birthday().map(|birthday| birthday.to_string()),
        }
    }
}

impl TryFrom<RecordSnapshot> for Record {
    type Error = ContactError;

    fn try_from(snapshot: RecordSnapshot) -> Result<Self, Self::Error> {
        let name = ContactName::new(snapshot.name)?;
        let phones = snapshot
            .phones
            .into_iter()
            .map(PhoneNumber::new)
            .collect::<Result<Vec<_>, _>>()?;
        let birthday = snapshot
            .birthday
            .as_deref()
            .map(Birthday::parse)
            .transpose()?;
        Ok(Record::from_parts(name, phones, birthday))
    }
}

impl From<AddressBook> for BookSnapshot {
    fn from(book: AddressBook) -> Self {
        Self::from(&book)
    }
}

impl From<&AddressBook> for BookSnapshot {
    fn from(book: &AddressBook) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            records: book.iter().map(RecordSnapshot::from).collect(),
        }
    }
}

impl TryFrom<BookSnapshot> for AddressBook {
    type Error = ContactError;

    fn try_from(snapshot: BookSnapshot) -> Result<Self, Self::Error> {
        if snapshot.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(ContactError::UnsupportedSchema {
                found: snapshot.schema_version,
                supported: CURRENT_SCHEMA_VERSION,
            });
        }
        let mut book = AddressBook::new();
        for entry in snapshot.records {
            book.add_record(Record::try_from(entry)?);
        }
        Ok(book)
    }
}
