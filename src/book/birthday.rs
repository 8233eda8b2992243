use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

use crate::errors::ContactError;

/// Textual date format used for birthdays and congratulation dates.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// A contact's date of birth, parsed from `DD.MM.YYYY`.
///
/// The value is kept as a [`NaiveDate`] so the scheduler can do arithmetic on
/// it; the textual form is only produced for display and persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Birthday(NaiveDate);

impl Birthday {
    pub fn parse(value: &str) -> Result<Self, ContactError> {
        NaiveDate::parse_from_str(value, DATE_FORMAT)
            .map(Self)
            .map_err(|_| ContactError::InvalidDateFormat(value.to_string()))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// The day this birthday is observed in `year`.
    ///
    /// Feb 29 falls back to Mar 1 when `year` is not a leap year. Returns
    /// `None` only when `year` is outside chrono's representable range.
    pub fn observed_in(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.0.month(), self.0.day()).or_else(|| {
            if self.0.month() == 2 && self.0.day() == 29 {
                NaiveDate::from_ymd_opt(year, 3, 1)
            } else {
                None
            }
        })
    }
}

impl FromStr for Birthday {
    type Err = ContactError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl fmt::Display for Birthday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl Serialize for Birthday {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Birthday {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Birthday::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter writing a [`NaiveDate`] as `DD.MM.YYYY`.
pub mod date_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::DATE_FORMAT;

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&date.format(DATE_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_formats_round_trip() {
        let birthday = Birthday::parse("15.03.1990").unwrap();
        assert_eq!(
            birthday.date(),
            NaiveDate::from_ymd_opt(1990, 3, 15).unwrap()
        );
        assert_eq!(birthday.to_string(), "15.03.1990");
    }

    #[test]
    fn rejects_other_formats() {
        for value in [
            "23-01-1985",
            "1990.03.15",
            "31.02.2000",
            "15/03/1990",
            "",
            "15.03.1990 ",
        ] {
            match Birthday::parse(value) {
                Err(ContactError::InvalidDateFormat(raw)) => assert_eq!(raw, value),
                other => panic!("expected format error for {value:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn leap_day_is_observed_on_march_first_in_common_years() {
        let birthday = Birthday::parse("29.02.2000").unwrap();
        assert_eq!(
            birthday.observed_in(2024),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert_eq!(
            birthday.observed_in(2025),
            NaiveDate::from_ymd_opt(2025, 3, 1)
        );
    }

    #[test]
    fn ordinary_dates_keep_month_and_day() {
        let birthday: Birthday = "31.12.1971".parse().unwrap();
        assert_eq!(
            birthday.observed_in(2030),
            NaiveDate::from_ymd_opt(2030, 12, 31)
        );
    }

    #[test]
    fn serializes_as_dotted_string() {
        let birthday = Birthday::parse("01.07.1985").unwrap();
        assert_eq!(serde_json::to_string(&birthday).unwrap(), "\"01.07.1985\"");
        let back: Birthday = serde_json::from_str("\"01.07.1985\"").unwrap();
        assert_eq!(back, birthday);
        assert!(serde_json::from_str::<Birthday>("\"1985-07-01\"").is_err());
    }
}
