use serde::{Deserialize, Serialize};
use std::fmt;

use super::{
    birthday::Birthday, name::ContactName, phone::PhoneNumber, snapshot::RecordSnapshot,
};
use crate::errors::ContactError;

/// One contact: a name, an ordered list of phone numbers and an optional birthday.
///
/// Phones are only ever inserted through validation, so the list never holds
/// an invalid number. Duplicates are allowed and insertion order is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "RecordSnapshot", try_from = "RecordSnapshot")]
pub struct Record {
    name: ContactName,
    phones: Vec<PhoneNumber>,
    birthday: Option<Birthday>,
}

impl Record {
    pub fn new(name: impl Into<String>) -> Result<Self, ContactError> {
        Ok(Self {
            name: ContactName::new(name)?,
            phones: Vec::new(),
            birthday: None,
        })
    }

    pub fn with_birthday(name: impl Into<String>, birthday: Birthday) -> Result<Self, ContactError> {
        let mut record = Self::new(name)?;
        record.birthday = Some(birthday);
        Ok(record)
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn phones(&self) -> &[PhoneNumber] {
        &self.phones
    }

    pub fn birthday(&self) -> Option<Birthday> {
        self.birthday
    }

    /// Validates `value` and appends it. On failure the phone list is untouched.
    pub fn add_phone(&mut self, value: &str) -> Result<(), ContactError> {
        let phone = PhoneNumber::new(value)?;
        self.phones.push(phone);
        Ok(())
    }

    /// Removes the first phone equal to `value`. Missing phones are ignored.
    pub fn remove_phone(&mut self, value: &str) -> Option<PhoneNumber> {
        let index = self.position(value)?;
        Some(self.phones.remove(index))
    }

    /// Replaces the first phone equal to `old` with `new`.
    ///
    /// Nothing changes when `new` is invalid or `old` is not present; the
    /// return value tells whether a replacement happened.
    pub fn edit_phone(&mut self, old: &str, new: &str) -> bool {
        let Ok(replacement) = PhoneNumber::new(new) else {
            return false;
        };
        match self.position(old) {
            Some(index) => {
                self.phones[index] = replacement;
                true
            }
            None => false,
        }
    }

    pub fn find_phone(&self, value: &str) -> Option<&PhoneNumber> {
        self.phones.iter().find(|phone| **phone == *value)
    }

    /// Parses `value` as `DD.MM.YYYY` and stores it, replacing any previous
    /// birthday. A parse failure leaves the current birthday in place.
    pub fn set_birthday(&mut self, value: &str) -> Result<(), ContactError> {
        self.birthday = Some(Birthday::parse(value)?);
        Ok(())
    }

    fn position(&self, value: &str) -> Option<usize> {
        self.phones.iter().position(|phone| *phone == *value)
    }

    pub(crate) fn from_parts(
        name: ContactName,
        phones: Vec<PhoneNumber>,
        birthday: Option<Birthday>,
    ) -> Self {
        Self {
            name,
            phones,
            birthday,
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phones = self
            .phones
            .iter()
            .map(PhoneNumber::as_str)
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "Contact name: {}, phones: {}", self.name, phones)?;
        if let Some(birthday) = &self.birthday {
            write!(f, ", birthday: {}", birthday)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phone_values(record: &Record) -> Vec<&str> {
        record.phones().iter().map(PhoneNumber::as_str).collect()
    }

    #[test]
    fn renders_name_and_phones() {
        let mut record = Record::new("John Doe").unwrap();
        assert_eq!(record.to_string(), "Contact name: John Doe, phones: ");
        record.add_phone("1234567890").unwrap();
        record.add_phone("5555555555").unwrap();
        assert_eq!(
            record.to_string(),
            "Contact name: John Doe, phones: 1234567890; 5555555555"
        );
        record.set_birthday("01.02.1990").unwrap();
        assert!(record.to_string().ends_with(", birthday: 01.02.1990"));
    }

    #[test]
    fn add_phone_reports_each_call_independently() {
        let mut record = Record::new("Jane").unwrap();
        record.add_phone("1234567890").unwrap();
        let err = record.add_phone("12345").unwrap_err();
        assert!(matches!(err, ContactError::InvalidPhoneFormat(ref value) if value == "12345"));
        assert_eq!(phone_values(&record), vec!["1234567890"]);
    }

    #[test]
    fn duplicates_are_kept_in_order() {
        let mut record = Record::new("Dup").unwrap();
        record.add_phone("1111111111").unwrap();
        record.add_phone("2222222222").unwrap();
        record.add_phone("1111111111").unwrap();
        assert_eq!(
            phone_values(&record),
            vec!["1111111111", "2222222222", "1111111111"]
        );

        let removed = record.remove_phone("1111111111");
        assert_eq!(removed.as_ref().map(PhoneNumber::as_str), Some("1111111111"));
        assert_eq!(phone_values(&record), vec!["2222222222", "1111111111"]);
    }

    #[test]
    fn remove_missing_phone_is_a_no_op() {
        let mut record = Record::new("Solo").unwrap();
        record.add_phone("1234567890").unwrap();
        assert!(record.remove_phone("0000000000").is_none());
        assert_eq!(record.phones().len(), 1);
    }

    #[test]
    fn edit_phone_replaces_first_match_only() {
        let mut record = Record::new("Edit").unwrap();
        record.add_phone("1234567890").unwrap();
        record.add_phone("1234567890").unwrap();
        assert!(record.edit_phone("1234567890", "0987654321"));
        assert_eq!(phone_values(&record), vec!["0987654321", "1234567890"]);
    }

    #[test]
    fn edit_phone_ignores_invalid_replacement_or_missing_original() {
        let mut record = Record::new("Edit").unwrap();
        record.add_phone("1234567890").unwrap();
        assert!(!record.edit_phone("1234567890", "bad"));
        assert!(!record.edit_phone("0000000000", "0987654321"));
        assert_eq!(phone_values(&record), vec!["1234567890"]);
    }

    #[test]
    fn find_phone_matches_exact_value() {
        let mut record = Record::new("Find").unwrap();
        record.add_phone("1234567890").unwrap();
        record.edit_phone("1234567890", "0987654321");
        assert!(record.find_phone("1234567890").is_none());
        assert_eq!(
            record.find_phone("0987654321").map(PhoneNumber::as_str),
            Some("0987654321")
        );
    }

    #[test]
    fn failed_birthday_update_keeps_previous_value() {
        let mut record = Record::new("Bday").unwrap();
        record.set_birthday("10.10.2000").unwrap();
        let err = record.set_birthday("2000-10-11").unwrap_err();
        assert_eq!(err.to_string(), "Invalid date format. Use DD.MM.YYYY");
        assert_eq!(record.birthday().unwrap().to_string(), "10.10.2000");

        record.set_birthday("11.10.2000").unwrap();
        assert_eq!(record.birthday().unwrap().to_string(), "11.10.2000");
    }

    #[test]
    fn with_birthday_sets_value_up_front() {
        let birthday = Birthday::parse("05.05.1955").unwrap();
        let record = Record::with_birthday("Old Timer", birthday).unwrap();
        assert_eq!(record.birthday(), Some(birthday));
        assert!(Record::with_birthday(" ", birthday).is_err());
    }
}
