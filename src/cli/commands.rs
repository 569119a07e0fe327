//! Command implementations
//!
//! Every command loads the book through the missing-file-means-empty policy,
//! applies its change and, when something changed, saves the whole book back.

use anyhow::{Context, Result, anyhow, bail};
use chrono::Local;
use contact_book::{
    Birthday, BookConfig, ContactBook, DurabilityMode, FieldKind, Record, SnapshotManager,
};
use log::info;

use super::args::{BirthdayAction, Cli, Command, SearchBy, ValueAction};
use super::render::{print_message, print_records};

pub fn run(cli: Cli) -> Result<()> {
    let durability = if cli.sync {
        DurabilityMode::Sync
    } else {
        DurabilityMode::Async
    };
    let config = BookConfig::new(&cli.file).durability(durability);
    let manager = SnapshotManager::from_config(&config);
    let json = cli.json;
    let today = Local::now().date_naive();

    match cli.command {
        Command::Demo => {
            let book = run_demo(&manager)?;
            print_records(book.records(), today, json)
        }
        Command::List => {
            let book = open(&manager)?;
            print_records(book.records(), today, json)
        }
        Command::Search { query, by } => {
            let book = open(&manager)?;
            let found = match by {
                SearchBy::Any => book.search_by_name_or_phone(&query),
                SearchBy::Name => book.search_by_name(&query),
                SearchBy::Phone => book.search_by_phone(&query),
            };
            print_records(found, today, json)
        }
        Command::Add {
            name,
            phones,
            emails,
            birthday,
        } => {
            let record = build_record(&name, &phones, &emails, birthday.as_deref())?;
            let mut book = open(&manager)?;
            let replaced = book.add_record(record).is_some();
            commit(&manager, &book)?;
            let verb = if replaced { "Replaced" } else { "Added" };
            print_message(&format!("{} contact '{}'", verb, name), json)
        }
        Command::Remove { name } => {
            let mut book = open(&manager)?;
            if book.remove_record(&name).is_none() {
                bail!("Contact '{}' not found", name);
            }
            commit(&manager, &book)?;
            print_message(&format!("Removed contact '{}'", name), json)
        }
        Command::Phone { action } => {
            let message = edit_values(&manager, FieldKind::Phone, action)?;
            print_message(&message, json)
        }
        Command::Email { action } => {
            let message = edit_values(&manager, FieldKind::Email, action)?;
            print_message(&message, json)
        }
        Command::Birthday { action } => {
            let message = edit_birthday(&manager, action)?;
            print_message(&message, json)
        }
    }
}

fn open(manager: &SnapshotManager) -> Result<ContactBook> {
    manager
        .load_or_empty()
        .with_context(|| format!("Failed to open contact book '{}'", manager.path().display()))
}

fn commit(manager: &SnapshotManager, book: &ContactBook) -> Result<()> {
    manager
        .save(book)
        .with_context(|| format!("Failed to save contact book '{}'", manager.path().display()))
}

fn build_record(
    name: &str,
    phones: &[String],
    emails: &[String],
    birthday: Option<&str>,
) -> Result<Record> {
    let mut record = Record::new(name);
    for phone in phones {
        record.add_phone(phone)?;
    }
    for email in emails {
        record.add_email(email)?;
    }
    if let Some(date) = birthday {
        record.set_birthday(Birthday::parse(date)?)?;
    }
    Ok(record)
}

fn edit_values(manager: &SnapshotManager, kind: FieldKind, action: ValueAction) -> Result<String> {
    let mut book = open(manager)?;
    let name = action.name().to_string();
    let record = book
        .get_mut(&name)
        .ok_or_else(|| anyhow!("Contact '{}' not found", name))?;

    let (changed, message) = match (kind, action) {
        (FieldKind::Phone, ValueAction::Add { value, .. }) => {
            let added = record.add_phone(&value)?;
            (added, added_message(kind, &value, &name, added))
        }
        (FieldKind::Email, ValueAction::Add { value, .. }) => {
            let added = record.add_email(&value)?;
            (added, added_message(kind, &value, &name, added))
        }
        (FieldKind::Phone, ValueAction::Update { old, new, .. }) => {
            let count = record.update_phone(&old, &new)?;
            (count > 0, format!("Updated {} {}(s) of '{}'", count, kind, name))
        }
        (FieldKind::Email, ValueAction::Update { old, new, .. }) => {
            let count = record.update_email(&old, &new)?;
            (count > 0, format!("Updated {} {}(s) of '{}'", count, kind, name))
        }
        (FieldKind::Phone, ValueAction::Delete { value, .. }) => {
            let count = record.delete_phone(&value);
            (count > 0, format!("Deleted {} {}(s) of '{}'", count, kind, name))
        }
        (FieldKind::Email, ValueAction::Delete { value, .. }) => {
            let count = record.delete_email(&value);
            (count > 0, format!("Deleted {} {}(s) of '{}'", count, kind, name))
        }
        (other, _) => bail!("{} values cannot be edited as a list", other),
    };

    if changed {
        commit(manager, &book)?;
    } else {
        info!("no change to '{}', snapshot left untouched", name);
    }
    Ok(message)
}

fn added_message(kind: FieldKind, value: &str, name: &str, added: bool) -> String {
    if added {
        format!("Added {} '{}' to '{}'", kind, value, name)
    } else {
        format!("'{}' already has {} '{}'", name, kind, value)
    }
}

fn edit_birthday(manager: &SnapshotManager, action: BirthdayAction) -> Result<String> {
    let mut book = open(manager)?;
    let message = match action {
        BirthdayAction::Set { name, date } => {
            let birthday = Birthday::parse(&date)?;
            let record = book
                .get_mut(&name)
                .ok_or_else(|| anyhow!("Contact '{}' not found", name))?;
            record.set_birthday(birthday)?;
            format!("Set birthday of '{}' to {}", name, birthday)
        }
        BirthdayAction::Clear { name } => {
            let record = book
                .get_mut(&name)
                .ok_or_else(|| anyhow!("Contact '{}' not found", name))?;
            if record.clear_birthday().is_none() {
                return Ok(format!("'{}' has no birthday set", name));
            }
            format!("Cleared birthday of '{}'", name)
        }
    };
    commit(manager, &book)?;
    Ok(message)
}

/// The reference sample contacts
pub fn sample_records() -> Result<Vec<Record>> {
    Ok(vec![
        Record::new("Art")
            .with_phone("023456789")?
            .with_email("Art@example.com")?
            .with_birthday(Birthday::from_ymd(1991, 5, 13)?)?,
        Record::new("Nick")
            .with_phone("987654321")?
            .with_email("nick@example.com")?
            .with_birthday(Birthday::from_ymd(1997, 8, 9)?)?,
        Record::new("Alice")
            .with_phone("555555555")?
            .with_email("alice@example.com")?
            .with_birthday(Birthday::from_ymd(1995, 10, 20)?)?,
    ])
}

/// Seed the book, save it, drop it, reload and check nothing was lost.
fn run_demo(manager: &SnapshotManager) -> Result<ContactBook> {
    let seeded: ContactBook = sample_records()?.into_iter().collect();
    commit(manager, &seeded)?;

    let restored = manager
        .load()
        .with_context(|| format!("Failed to reload '{}'", manager.path().display()))?;

    if restored.len() != seeded.len() {
        bail!(
            "Reloaded {} contacts, expected {}",
            restored.len(),
            seeded.len()
        );
    }
    for record in seeded.records() {
        let name = record.name().as_str();
        if restored.get(name) != Some(record) {
            bail!("Contact '{}' changed across save and reload", name);
        }
    }
    info!("demo book verified after reload");
    Ok(restored)
}
