use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{
    record::Record,
    snapshot::BookSnapshot,
    upcoming::{self, UpcomingBirthday},
};

/// Keyed collection of [`Record`]s, one per contact name.
///
/// Records are kept in insertion order. Re-adding a name replaces the stored
/// record in place, so the entry keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "BookSnapshot", try_from = "BookSnapshot")]
pub struct AddressBook {
    records: Vec<Record>,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `record`, overwriting any existing record with the same name.
    pub fn add_record(&mut self, record: Record) {
        match self.position(record.name()) {
            Some(index) => {
                tracing::debug!(name = record.name(), "replacing contact");
                self.records[index] = record;
            }
            None => {
                tracing::debug!(name = record.name(), "adding contact");
                self.records.push(record);
            }
        }
    }

    pub fn find(&self, name: &str) -> Option<&Record> {
        let index = self.position(name)?;
        self.records.get(index)
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Record> {
        let index = self.position(name)?;
        self.records.get_mut(index)
    }

    /// Removes the record stored under `name`; a missing name is not an error.
    pub fn delete(&mut self, name: &str) -> Option<Record> {
        let index = self.position(name)?;
        let record = self.records.remove(index);
        tracing::debug!(name = record.name(), "deleting contact");
        Some(record)
    }

    /// Contacts whose birthday falls within the coming week, counted from `today`.
    pub fn upcoming_birthdays(&self, today: NaiveDate) -> Vec<UpcomingBirthday> {
        upcoming::upcoming_birthdays(self.records.iter(), today)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(Record::name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Lookups use the same trimmed key that [`ContactName`] stores.
    ///
    /// [`ContactName`]: super::ContactName
    fn position(&self, name: &str) -> Option<usize> {
        let key = name.trim();
        self.records.iter().position(|record| record.name() == key)
    }
}

impl<'a> IntoIterator for &'a AddressBook {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
