//! Weekly birthday report: which contacts to congratulate, and on which day.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{
    birthday::{date_format, DATE_FORMAT},
    record::Record,
};

/// Days ahead of the reference date that still count as "upcoming", inclusive.
pub const DAYS_IN_WEEK: i64 = 7;

/// A contact to congratulate and the business day on which to do it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpcomingBirthday {
    pub name: String,
    #[serde(with = "date_format")]
    pub congratulation_date: NaiveDate,
}

impl fmt::Display for UpcomingBirthday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}",
            self.name,
            self.congratulation_date.format(DATE_FORMAT)
        )
    }
}

/// Collects the birthdays falling within `0..=DAYS_IN_WEEK` days of `today`,
/// preserving the order of `records`.
pub fn upcoming_birthdays<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    today: NaiveDate,
) -> Vec<UpcomingBirthday> {
    records
        .into_iter()
        .filter_map(|record| {
            let birthday = record.birthday()?;
            let mut next = birthday.observed_in(today.year())?;
            if next < today {
                next = birthday.observed_in(today.year() + 1)?;
            }
            let delta = (next - today).num_days();
            if !(0..=DAYS_IN_WEEK).contains(&delta) {
                return None;
            }
            Some(UpcomingBirthday {
                name: record.name().to_string(),
                congratulation_date: adjust_for_weekend(next),
            })
        })
        .collect()
}

/// Moves Saturday and Sunday to the following Monday; weekdays are unchanged.
pub fn adjust_for_weekend(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat | Weekday::Sun => {
            let shift = DAYS_IN_WEEK - i64::from(date.weekday().num_days_from_monday());
            date + Duration::days(shift)
        }
        _ => date,
    }
}
