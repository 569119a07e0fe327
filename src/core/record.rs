use std::fmt;

use chrono::{Datelike, Local, NaiveDate};

use super::field::{Birthday, Email, Name, Phone};
use super::{BookError, Result};

/// One contact: a name, ordered phones and emails, and an optional birthday.
///
/// Phones and emails are compared by raw value everywhere: duplicates are
/// refused on insert, and update/delete touch every entry carrying the
/// given value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    name: Name,
    phones: Vec<Phone>,
    emails: Vec<Email>,
    birthday: Option<Birthday>,
}

impl Record {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Name::new(name),
            phones: Vec::new(),
            emails: Vec::new(),
            birthday: None,
        }
    }

    pub fn with_phone(mut self, phone: &str) -> Result<Self> {
        self.add_phone(phone)?;
        Ok(self)
    }

    pub fn with_email(mut self, email: &str) -> Result<Self> {
        self.add_email(email)?;
        Ok(self)
    }

    pub fn with_birthday(mut self, birthday: Birthday) -> Result<Self> {
        self.set_birthday(birthday)?;
        Ok(self)
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn phones(&self) -> &[Phone] {
        &self.phones
    }

    pub fn emails(&self) -> &[Email] {
        &self.emails
    }

    pub fn birthday(&self) -> Option<&Birthday> {
        self.birthday.as_ref()
    }

    pub fn has_phone(&self, raw: &str) -> bool {
        self.phones.iter().any(|p| p.as_str() == raw)
    }

    pub fn has_email(&self, raw: &str) -> bool {
        self.emails.iter().any(|e| e.as_str() == raw)
    }

    // ========================================================================
    // Phones
    // ========================================================================

    /// Append a phone unless one with the same value is already present.
    /// Returns whether the phone was added.
    pub fn add_phone(&mut self, raw: &str) -> Result<bool> {
        let phone = Phone::new(raw)?;
        if self.has_phone(phone.as_str()) {
            return Ok(false);
        }
        self.phones.push(phone);
        Ok(true)
    }

    /// Replace every phone equal to `old` with `new`. Returns the number of
    /// replaced entries; zero when nothing matched. If `new` ends up more than
    /// once, only its first position is kept.
    pub fn update_phone(&mut self, old: &str, new: &str) -> Result<usize> {
        let replacement = Phone::new(new)?;
        Ok(replace_values(&mut self.phones, Phone::as_str, old, replacement))
    }

    /// Remove every phone equal to `raw`. Returns how many were removed.
    pub fn delete_phone(&mut self, raw: &str) -> usize {
        let before = self.phones.len();
        self.phones.retain(|p| p.as_str() != raw);
        before - self.phones.len()
    }

    // ========================================================================
    // Emails
    // ========================================================================

    pub fn add_email(&mut self, raw: &str) -> Result<bool> {
        let email = Email::new(raw)?;
        if self.has_email(email.as_str()) {
            return Ok(false);
        }
        self.emails.push(email);
        Ok(true)
    }

    pub fn update_email(&mut self, old: &str, new: &str) -> Result<usize> {
        let replacement = Email::new(new)?;
        Ok(replace_values(&mut self.emails, Email::as_str, old, replacement))
    }

    pub fn delete_email(&mut self, raw: &str) -> usize {
        let before = self.emails.len();
        self.emails.retain(|e| e.as_str() != raw);
        before - self.emails.len()
    }

    // ========================================================================
    // Birthday
    // ========================================================================

    /// Assign a birthday, re-running its validity hook.
    pub fn set_birthday(&mut self, birthday: Birthday) -> Result<()> {
        if !Birthday::is_valid(&birthday.date()) {
            return Err(BookError::InvalidBirthday(birthday.to_string()));
        }
        self.birthday = Some(birthday);
        Ok(())
    }

    pub fn clear_birthday(&mut self) -> Option<Birthday> {
        self.birthday.take()
    }

    /// Whole days from `today` until the next occurrence of the birthday.
    ///
    /// Zero on the day itself. `None` when no birthday is set.
    pub fn days_to_birthday_from(&self, today: NaiveDate) -> Option<i64> {
        let birthday = self.birthday.as_ref()?;
        let this_year = birthday.occurrence_in(today.year())?;
        let next = if this_year < today {
            birthday.occurrence_in(today.year() + 1)?
        } else {
            this_year
        };
        Some((next - today).num_days())
    }

    /// Same as [`Record::days_to_birthday_from`] against the local date.
    pub fn calculate_days_to_birthday(&self) -> Option<i64> {
        self.days_to_birthday_from(Local::now().date_naive())
    }
}

/// Swap every value equal to `old` for `replacement`, then drop repeats of
/// the replacement after its first position.
fn replace_values<T: Clone>(
    values: &mut Vec<T>,
    raw: fn(&T) -> &str,
    old: &str,
    replacement: T,
) -> usize {
    let mut replaced = 0;
    for value in values.iter_mut().filter(|v| raw(v) == old) {
        *value = replacement.clone();
        replaced += 1;
    }
    if replaced > 0 {
        let new = raw(&replacement);
        let mut seen = false;
        values.retain(|v| {
            if raw(v) != new {
                return true;
            }
            !std::mem::replace(&mut seen, true)
        });
    }
    replaced
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |values: Vec<&str>| {
            if values.is_empty() {
                "-".to_string()
            } else {
                values.join(", ")
            }
        };
        write!(
            f,
            "{}; phones: {}; emails: {}",
            self.name,
            join(self.phones.iter().map(Phone::as_str).collect()),
            join(self.emails.iter().map(Email::as_str).collect()),
        )?;
        match &self.birthday {
            Some(birthday) => write!(f, "; birthday: {}", birthday),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn phones(record: &Record) -> Vec<&str> {
        record.phones().iter().map(Phone::as_str).collect()
    }

    fn emails(record: &Record) -> Vec<&str> {
        record.emails().iter().map(Email::as_str).collect()
    }

    #[test]
    fn test_add_phone_is_idempotent_by_value() {
        let mut record = Record::new("Nick");
        assert!(record.add_phone("987654321").unwrap());
        assert!(!record.add_phone("987654321").unwrap());
        assert_eq!(phones(&record), vec!["987654321"]);
    }

    #[test]
    fn test_add_phone_keeps_insertion_order() {
        let record = Record::new("Art")
            .with_phone("2")
            .unwrap()
            .with_phone("1")
            .unwrap()
            .with_phone("3")
            .unwrap();
        assert_eq!(phones(&record), vec!["2", "1", "3"]);
    }

    #[test]
    fn test_update_phone_replaces_matches_in_place() {
        let mut record = Record::new("Art").with_phone("111").unwrap().with_phone("222").unwrap();
        assert_eq!(record.update_phone("111", "333").unwrap(), 1);
        assert_eq!(phones(&record), vec!["333", "222"]);
    }

    #[test]
    fn test_update_phone_without_match_is_noop() {
        let mut record = Record::new("Art").with_phone("111").unwrap();
        assert_eq!(record.update_phone("999", "333").unwrap(), 0);
        assert_eq!(phones(&record), vec!["111"]);
    }

    #[test]
    fn test_update_phone_onto_existing_value_collapses() {
        let mut record = Record::new("Art").with_phone("111").unwrap().with_phone("222").unwrap();
        assert_eq!(record.update_phone("111", "222").unwrap(), 1);
        assert_eq!(phones(&record), vec!["222"]);

        let mut record = Record::new("Art")
            .with_phone("333")
            .unwrap()
            .with_phone("111")
            .unwrap()
            .with_phone("222")
            .unwrap();
        assert_eq!(record.update_phone("222", "333").unwrap(), 1);
        assert_eq!(phones(&record), vec!["333", "111"]);
    }

    #[test]
    fn test_update_phone_to_same_value() {
        let mut record = Record::new("Art").with_phone("111").unwrap().with_phone("222").unwrap();
        assert_eq!(record.update_phone("222", "222").unwrap(), 1);
        assert_eq!(phones(&record), vec!["111", "222"]);
    }

    #[test]
    fn test_update_email_onto_existing_value_collapses() {
        let mut record = Record::new("Art").with_email("a@x").unwrap().with_email("b@x").unwrap();
        assert_eq!(record.update_email("a@x", "b@x").unwrap(), 1);
        assert_eq!(emails(&record), vec!["b@x"]);
    }

    #[test]
    fn test_delete_phone() {
        let mut record = Record::new("Art").with_phone("111").unwrap().with_phone("222").unwrap();
        assert_eq!(record.delete_phone("111"), 1);
        assert_eq!(record.delete_phone("111"), 0);
        assert_eq!(phones(&record), vec!["222"]);
    }

    #[test]
    fn test_email_operations_compare_raw_values() {
        let mut record = Record::new("Art").with_email("Art@example.com").unwrap();
        assert!(!record.add_email("Art@example.com").unwrap());

        // Lookup by the raw string works even though the record stores wrappers.
        assert_eq!(record.update_email("Art@example.com", "art@example.org").unwrap(), 1);
        assert_eq!(emails(&record), vec!["art@example.org"]);

        assert_eq!(record.update_email("missing@example.com", "x@y").unwrap(), 0);
        assert_eq!(record.delete_email("art@example.org"), 1);
        assert!(record.emails().is_empty());
    }

    #[test]
    fn test_set_and_clear_birthday() {
        let mut record = Record::new("Art");
        assert!(record.birthday().is_none());

        record.set_birthday(Birthday::from_ymd(1991, 5, 13).unwrap()).unwrap();
        assert_eq!(record.birthday().unwrap().date(), date(1991, 5, 13));

        record.set_birthday(Birthday::from_ymd(1992, 6, 1).unwrap()).unwrap();
        assert_eq!(record.birthday().unwrap().date(), date(1992, 6, 1));

        assert!(record.clear_birthday().is_some());
        assert!(record.birthday().is_none());
    }

    #[test]
    fn test_days_to_birthday_without_birthday() {
        let record = Record::new("Nick");
        assert_eq!(record.days_to_birthday_from(date(2024, 1, 1)), None);
        assert_eq!(record.calculate_days_to_birthday(), None);
    }

    #[test]
    fn test_days_to_birthday_later_this_year() {
        let record = Record::new("Art")
            .with_birthday(Birthday::from_ymd(1991, 5, 13).unwrap())
            .unwrap();
        assert_eq!(record.days_to_birthday_from(date(2023, 5, 1)), Some(12));
    }

    #[test]
    fn test_days_to_birthday_is_zero_on_the_day() {
        let record = Record::new("Art")
            .with_birthday(Birthday::from_ymd(1991, 5, 13).unwrap())
            .unwrap();
        assert_eq!(record.days_to_birthday_from(date(2023, 5, 13)), Some(0));
        assert_eq!(record.days_to_birthday_from(date(2023, 5, 12)), Some(1));
    }

    #[test]
    fn test_days_to_birthday_wraps_to_next_year() {
        let record = Record::new("Nick")
            .with_birthday(Birthday::from_ymd(1997, 8, 9).unwrap())
            .unwrap();
        // 2023-08-10 -> 2024-08-09, 2024 is a leap year
        assert_eq!(record.days_to_birthday_from(date(2023, 8, 10)), Some(365));
        assert_eq!(record.days_to_birthday_from(date(2023, 12, 31)), Some(222));
    }

    #[test]
    fn test_days_to_birthday_never_negative() {
        let record = Record::new("Alice")
            .with_birthday(Birthday::from_ymd(1995, 10, 20).unwrap())
            .unwrap();
        let mut day = date(2023, 1, 1);
        while day.year() == 2023 {
            let days = record.days_to_birthday_from(day).unwrap();
            assert!(days >= 0);
            assert_eq!(days == 0, day.month() == 10 && day.day() == 20);
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_leap_day_birthday_in_common_year() {
        let record = Record::new("Leap")
            .with_birthday(Birthday::from_ymd(2000, 2, 29).unwrap())
            .unwrap();
        assert_eq!(record.days_to_birthday_from(date(2023, 2, 28)), Some(0));
        assert_eq!(record.days_to_birthday_from(date(2023, 2, 1)), Some(27));
        assert_eq!(record.days_to_birthday_from(date(2024, 2, 28)), Some(1));
        // 2023-03-01 -> 2024-02-29
        assert_eq!(record.days_to_birthday_from(date(2023, 3, 1)), Some(365));
    }

    #[test]
    fn test_display() {
        let record = Record::new("Art")
            .with_phone("023456789")
            .unwrap()
            .with_email("Art@example.com")
            .unwrap()
            .with_birthday(Birthday::from_ymd(1991, 5, 13).unwrap())
            .unwrap();
        assert_eq!(
            record.to_string(),
            "Art; phones: 023456789; emails: Art@example.com; birthday: 1991-05-13"
        );
        assert_eq!(Record::new("Nick").to_string(), "Nick; phones: -; emails: -");
    }
}
