//! Contact records, the address book that owns them, and the weekly
//! birthday report.

pub mod address_book;
pub mod birthday;
pub mod name;
pub mod phone;
pub mod record;
pub mod snapshot;
pub mod upcoming;

pub use address_book::AddressBook;
pub use birthday::{Birthday, DATE_FORMAT};
pub use name::ContactName;
pub use phone::PhoneNumber;
pub use record::Record;
pub use snapshot::{BookSnapshot, RecordSnapshot, CURRENT_SCHEMA_VERSION};
pub use upcoming::{adjust_for_weekend, UpcomingBirthday, DAYS_IN_WEEK};
