use thiserror::Error;

/// Error type for contact validation and book persistence failures.
///
/// Every variant is recoverable: callers report it and carry on.
#[derive(Debug, Error)]
pub enum ContactError {
    #[error("Phone {0} is invalid, it should be 10 digits long and numeric")]
    InvalidPhoneFormat(String),
    #[error("Invalid date format. Use DD.MM.YYYY")]
    InvalidDateFormat(String),
    #[error("Contact name cannot be empty")]
    EmptyName,
    #[error("book schema v{found} is newer than supported v{supported}")]
    UnsupportedSchema { found: u8, supported: u8 },
    #[error("Persistence error: {0}")]
    Storage(String),
}

pub type Result<T> = std::result::Result<T, ContactError>;

impl From<std::io::Error> for ContactError {
    fn from(err: std::io::Error) -> Self {
        ContactError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for ContactError {
    fn from(err: serde_json::Error) -> Self {
        ContactError::Storage(err.to_string())
    }
}
