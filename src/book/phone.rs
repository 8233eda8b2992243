use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::errors::ContactError;

/// Number of digits a stored phone number must have.
pub const PHONE_LENGTH: usize = 10;

/// A validated phone number: exactly ten ASCII digits.
///
/// Construction is the only way in, so every `PhoneNumber` held by a
/// [`Record`](super::Record) has passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn new(value: impl Into<String>) -> Result<Self, ContactError> {
        let value = value.into();
        if !Self::is_valid(&value) {
            return Err(ContactError::InvalidPhoneFormat(value));
        }
        Ok(Self(value))
    }

    pub fn is_valid(value: &str) -> bool {
        value.len() == PHONE_LENGTH && value.chars().all(|c| c.is_ascii_digit())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for PhoneNumber {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl Serialize for PhoneNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PhoneNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        PhoneNumber::new(raw).map_err(serde::de::Error::custom)
    }
}
