use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ContactError;

/// Contact name used as the address book key. Never empty; surrounding
/// whitespace is trimmed on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContactName(String);

impl ContactName {
    pub fn new(value: impl Into<String>) -> Result<Self, ContactError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ContactError::EmptyName);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ContactName {
    type Error = ContactError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ContactName> for String {
    fn from(name: ContactName) -> Self {
        name.0
    }
}

impl fmt::Display for ContactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_rejects_blank_names() {
        assert_eq!(ContactName::new("  Jane Doe ").unwrap().as_str(), "Jane Doe");
        assert!(matches!(ContactName::new("   "), Err(ContactError::EmptyName)));
        assert!(matches!(ContactName::new(""), Err(ContactError::EmptyName)));
    }
}
