//! Text and JSON output for contact listings

use anyhow::Result;
use chrono::NaiveDate;
use contact_book::Record;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Debug, Serialize, PartialEq)]
pub struct ContactView {
    pub name: String,
    pub phones: Vec<String>,
    pub emails: Vec<String>,
    pub birthday: Option<String>,
    pub days_to_birthday: Option<i64>,
}

impl ContactView {
    pub fn new(record: &Record, today: NaiveDate) -> Self {
        Self {
            name: record.name().to_string(),
            phones: record.phones().iter().map(ToString::to_string).collect(),
            emails: record.emails().iter().map(ToString::to_string).collect(),
            birthday: record.birthday().map(ToString::to_string),
            days_to_birthday: record.days_to_birthday_from(today),
        }
    }
}

pub fn format_text(view: &ContactView) -> String {
    let list = |values: &[String]| {
        if values.is_empty() {
            "-".to_string()
        } else {
            values.join(", ")
        }
    };
    let mut line = format!(
        "{}\n  phones: {}\n  emails: {}",
        view.name,
        list(&view.phones),
        list(&view.emails)
    );
    if let (Some(birthday), Some(days)) = (&view.birthday, view.days_to_birthday) {
        line.push_str(&format!("\n  birthday: {} ({} days left)", birthday, days));
    }
    line
}

pub fn print_records<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    today: NaiveDate,
    json: bool,
) -> Result<()> {
    let views: Vec<ContactView> = records
        .into_iter()
        .map(|record| ContactView::new(record, today))
        .collect();

    let mut stdout = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, &views)?;
        writeln!(stdout)?;
    } else if views.is_empty() {
        writeln!(stdout, "No contacts found.")?;
    } else {
        for view in &views {
            writeln!(stdout, "{}", format_text(view))?;
        }
    }
    stdout.flush()?;
    Ok(())
}

pub fn print_message(message: &str, json: bool) -> Result<()> {
    let mut stdout = io::stdout().lock();
    if json {
        serde_json::to_writer(&mut stdout, &serde_json::json!({ "status": "ok", "message": message }))?;
        writeln!(stdout)?;
    } else {
        writeln!(stdout, "{}", message)?;
    }
    Ok(())
}
