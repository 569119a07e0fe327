//! Field values held by a contact record.
//!
//! Each field wraps exactly one raw value and never mutates it after
//! construction. Replacing a field means building a new wrapper.

use std::fmt;

use chrono::{Datelike, NaiveDate};

use super::{BookError, Result};

/// Semantic kind of a field value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Name,
    Phone,
    Email,
    Birthday,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Birthday => "birthday",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Common read-only view over every field wrapper
pub trait Field {
    type Raw: ?Sized;

    const KIND: FieldKind;

    fn value(&self) -> &Self::Raw;

    fn kind(&self) -> FieldKind {
        Self::KIND
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name(String);

impl Name {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Field for Name {
    type Raw = str;
    const KIND: FieldKind = FieldKind::Name;

    fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Phone(String);

impl Phone {
    /// Wrap a raw phone number, running the format hook first.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if !Self::is_valid(&value) {
            return Err(BookError::InvalidFormat {
                kind: FieldKind::Phone,
                value,
            });
        }
        Ok(Self(value))
    }

    /// Format hook for phone numbers. Accepts every value for now; length and
    /// digit checks belong here.
    pub fn is_valid(_value: &str) -> bool {
        true
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Field for Phone {
    type Raw = str;
    const KIND: FieldKind = FieldKind::Phone;

    fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Wrap a raw email address, running the format hook first.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if !Self::is_valid(&value) {
            return Err(BookError::InvalidFormat {
                kind: FieldKind::Email,
                value,
            });
        }
        Ok(Self(value))
    }

    /// Format hook for email addresses. Accepts every value for now.
    pub fn is_valid(_value: &str) -> bool {
        true
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Field for Email {
    type Raw = str;
    const KIND: FieldKind = FieldKind::Email;

    fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Calendar date of birth.
///
/// Only month and day matter for the days-to-birthday calculation; the year
/// is kept for display and persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Birthday(NaiveDate);

impl Birthday {
    pub fn new(value: NaiveDate) -> Result<Self> {
        if !Self::is_valid(&value) {
            return Err(BookError::InvalidBirthday(value.to_string()));
        }
        Ok(Self(value))
    }

    /// Build from year/month/day, rejecting dates that do not exist.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            BookError::InvalidBirthday(format!("{:04}-{:02}-{:02}", year, month, day))
        })?;
        Self::new(date)
    }

    /// Parse an ISO `YYYY-MM-DD` date.
    pub fn parse(input: &str) -> Result<Self> {
        let date = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
            .map_err(|e| BookError::InvalidBirthday(format!("'{}': {}", input, e)))?;
        Self::new(date)
    }

    /// Validity hook run on construction and on every assignment to a record.
    pub fn is_valid(_value: &NaiveDate) -> bool {
        true
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// This birthday's month/day in `year`. Feb 29 falls on Feb 28 outside
    /// leap years.
    pub fn occurrence_in(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.0.month(), self.0.day())
            .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
    }
}

impl Field for Birthday {
    type Raw = NaiveDate;
    const KIND: FieldKind = FieldKind::Birthday;

    fn value(&self) -> &NaiveDate {
        &self.0
    }
}

impl fmt::Display for Birthday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_expose_raw_value() {
        let phone = Phone::new("023456789").unwrap();
        assert_eq!(phone.value(), "023456789");
        assert_eq!(phone.kind(), FieldKind::Phone);

        let email = Email::new("Art@example.com").unwrap();
        assert_eq!(email.value(), "Art@example.com");

        assert_eq!(Name::new("Art").value(), "Art");
    }

    #[test]
    fn test_wrapper_equality_is_by_value() {
        assert_eq!(Phone::new("111").unwrap(), Phone::new("111").unwrap());
        assert_ne!(Email::new("a@x").unwrap(), Email::new("b@x").unwrap());
    }

    #[test]
    fn test_no_normalization() {
        let phone = Phone::new(" +38 (050) 000 ").unwrap();
        assert_eq!(phone.as_str(), " +38 (050) 000 ");
    }

    #[test]
    fn test_birthday_parse() {
        let birthday = Birthday::parse("1991-05-13").unwrap();
        assert_eq!(birthday.date(), NaiveDate::from_ymd_opt(1991, 5, 13).unwrap());
        assert_eq!(birthday.to_string(), "1991-05-13");

        let err = Birthday::parse("13.05.1991").unwrap_err();
        assert!(matches!(err, BookError::InvalidBirthday(_)));
    }

    #[test]
    fn test_birthday_from_ymd_rejects_impossible_dates() {
        assert!(Birthday::from_ymd(1997, 8, 9).is_ok());
        assert!(matches!(
            Birthday::from_ymd(1997, 2, 30),
            Err(BookError::InvalidBirthday(_))
        ));
    }

    #[test]
    fn test_leap_day_occurrence_falls_back_to_feb_28() {
        let birthday = Birthday::from_ymd(2000, 2, 29).unwrap();
        assert_eq!(
            birthday.occurrence_in(2023),
            NaiveDate::from_ymd_opt(2023, 2, 28)
        );
        assert_eq!(
            birthday.occurrence_in(2024),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
    }
}
