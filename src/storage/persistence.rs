//! Snapshot persistence for the contact book
//!
//! A snapshot is one MessagePack document holding the whole book:
//!
//! ```text
//! {
//!   format:   "contact-book",
//!   version:  1,
//!   metadata: { created_at, record_count },
//!   records:  [ { name, phones, emails, birthday }, ... ]
//! }
//! ```
//!
//! Fields are encoded by name, so a reader tolerates missing optional fields.
//! A snapshot without `version` is read as version 1.

use crate::config::{BookConfig, DurabilityMode};
use crate::core::{Birthday, BookError, Record, Result};
use crate::storage::ContactBook;
use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Format tag written into every snapshot
pub const SNAPSHOT_FORMAT: &str = "contact-book";

/// Newest snapshot version this build reads and the one it writes
pub const SNAPSHOT_VERSION: u32 = 1;

fn legacy_version() -> u32 {
    1
}

// ============================================================================
// Snapshot Envelope
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSnapshot {
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default = "legacy_version")]
    pub version: u32,
    #[serde(default)]
    pub metadata: SnapshotMetadata,
    pub records: Vec<RecordEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    pub created_at: Option<DateTime<Utc>>,
    pub record_count: usize,
}

/// On-disk form of one record; kept apart from [`Record`] so the in-memory
/// types can change without touching the file format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordEntry {
    pub name: String,
    #[serde(default)]
    pub phones: Vec<String>,
    #[serde(default)]
    pub emails: Vec<String>,
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
}

impl RecordEntry {
    fn from_record(record: &Record) -> Self {
        Self {
            name: record.name().as_str().to_string(),
            phones: record.phones().iter().map(|p| p.as_str().to_string()).collect(),
            emails: record.emails().iter().map(|e| e.as_str().to_string()).collect(),
            birthday: record.birthday().map(Birthday::date),
        }
    }

    /// Rebuild through the public constructors so every validation hook runs.
    fn into_record(self) -> Result<Record> {
        let mut record = Record::new(self.name);
        for phone in &self.phones {
            record.add_phone(phone)?;
        }
        for email in &self.emails {
            record.add_email(email)?;
        }
        if let Some(date) = self.birthday {
            record.set_birthday(Birthday::new(date)?)?;
        }
        Ok(record)
    }
}

impl BookSnapshot {
    pub fn capture(book: &ContactBook) -> Self {
        let records: Vec<RecordEntry> = book.records().map(RecordEntry::from_record).collect();
        Self {
            format: Some(SNAPSHOT_FORMAT.to_string()),
            version: SNAPSHOT_VERSION,
            metadata: SnapshotMetadata {
                created_at: Some(Utc::now()),
                record_count: records.len(),
            },
            records,
        }
    }

    /// Check the envelope and rebuild the book. `path` only labels errors.
    pub fn into_book(self, path: &Path) -> Result<ContactBook> {
        if let Some(format) = &self.format
            && format != SNAPSHOT_FORMAT
        {
            return Err(BookError::corrupt(
                path,
                format!("unexpected format tag '{}'", format),
            ));
        }
        if self.version > SNAPSHOT_VERSION {
            return Err(BookError::UnsupportedSnapshotVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        if self.metadata.created_at.is_some() && self.metadata.record_count != self.records.len() {
            return Err(BookError::corrupt(
                path,
                format!(
                    "metadata lists {} records, payload holds {}",
                    self.metadata.record_count,
                    self.records.len()
                ),
            ));
        }

        let mut book = ContactBook::new();
        for entry in self.records {
            let name = entry.name.clone();
            let record = entry
                .into_record()
                .map_err(|e| BookError::corrupt(path, format!("record '{}': {}", name, e)))?;
            if book.add_record(record).is_some() {
                return Err(BookError::corrupt(
                    path,
                    format!("duplicate record '{}'", name),
                ));
            }
        }
        Ok(book)
    }
}

// ============================================================================
// Snapshot Manager
// ============================================================================

pub struct SnapshotManager {
    snapshot_path: PathBuf,
    durability: DurabilityMode,
    create_parent_dirs: bool,
}

impl SnapshotManager {
    pub fn new<P: AsRef<Path>>(snapshot_path: P) -> Self {
        Self::from_config(&BookConfig::new(snapshot_path))
    }

    pub fn from_config(config: &BookConfig) -> Self {
        Self {
            snapshot_path: config.snapshot_path.clone(),
            durability: config.durability,
            create_parent_dirs: config.create_parent_dirs,
        }
    }

    pub fn path(&self) -> &Path {
        &self.snapshot_path
    }

    pub fn exists(&self) -> bool {
        self.snapshot_path.exists()
    }

    /// Write the whole book, replacing any existing snapshot.
    ///
    /// Bytes go to a temporary file in the target directory which is renamed
    /// over the snapshot once complete, so a failed save leaves the previous
    /// snapshot intact.
    pub fn save(&self, book: &ContactBook) -> Result<()> {
        let path = &self.snapshot_path;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if self.create_parent_dirs {
            fs::create_dir_all(&dir).map_err(|e| BookError::io(&dir, e))?;
        }

        let snapshot = BookSnapshot::capture(book);
        let serialized = rmp_serde::to_vec_named(&snapshot)
            .map_err(|e| BookError::io(path, io::Error::new(io::ErrorKind::InvalidData, e)))?;

        let mut temp = NamedTempFile::new_in(&dir).map_err(|e| BookError::io(&dir, e))?;
        temp.write_all(&serialized).map_err(|e| BookError::io(temp.path(), e))?;
        temp.flush().map_err(|e| BookError::io(temp.path(), e))?;
        if self.durability == DurabilityMode::Sync {
            temp.as_file()
                .sync_all()
                .map_err(|e| BookError::io(temp.path(), e))?;
        }
        temp.persist(path).map_err(|e| BookError::io(path, e.error))?;

        info!(
            "saved {} contacts to {} ({} bytes)",
            snapshot.metadata.record_count,
            path.display(),
            serialized.len()
        );
        Ok(())
    }

    /// Read the snapshot back into a fresh book.
    pub fn load(&self) -> Result<ContactBook> {
        let path = &self.snapshot_path;
        let mut file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => BookError::FileNotFound(path.clone()),
            _ => BookError::io(path, e),
        })?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)
            .map_err(|e| BookError::io(path, e))?;

        let snapshot: BookSnapshot = rmp_serde::from_slice(&data)
            .map_err(|e| BookError::corrupt(path, format!("failed to decode: {}", e)))?;
        debug!(
            "decoded snapshot {} (version {}, {} records)",
            path.display(),
            snapshot.version,
            snapshot.records.len()
        );

        let book = snapshot.into_book(path)?;
        info!("loaded {} contacts from {}", book.len(), path.display());
        Ok(book)
    }

    /// Load the snapshot, or start an empty book when the file does not exist.
    /// Any other failure is returned to the caller.
    pub fn load_or_empty(&self) -> Result<ContactBook> {
        match self.load() {
            Err(e) if e.is_not_found() => {
                warn!(
                    "snapshot {} not found, starting with an empty contact book",
                    self.snapshot_path.display()
                );
                Ok(ContactBook::new())
            }
            other => other,
        }
    }
}

/// Save `book` to `path` with default settings.
pub fn save<P: AsRef<Path>>(book: &ContactBook, path: P) -> Result<()> {
    SnapshotManager::new(path).save(book)
}

/// Load a book from `path`; fails with [`BookError::FileNotFound`] when absent.
pub fn load<P: AsRef<Path>>(path: P) -> Result<ContactBook> {
    SnapshotManager::new(path).load()
}

/// Load a book from `path`, treating a missing file as an empty book.
pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Result<ContactBook> {
    SnapshotManager::new(path).load_or_empty()
}
