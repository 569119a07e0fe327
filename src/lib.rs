// ============================================================================
// Contact Book Library
// ============================================================================

//! Personal contact book: named records with phones, emails and a birthday,
//! substring search, and versioned binary snapshots on disk.
//!
//! ```no_run
//! use contact_book::{Record, storage};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut book = storage::load_or_empty("address_book.snapshot")?;
//! book.add_record(Record::new("Nick").with_phone("987654321")?);
//!
//! for record in book.search_by_name_or_phone("987") {
//!     println!("{}", record);
//! }
//!
//! storage::save(&book, "address_book.snapshot")?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod storage;

// Re-export main types for convenience
pub use config::{BookConfig, DEFAULT_SNAPSHOT_FILE, DurabilityMode};
pub use core::{Birthday, BookError, Email, Field, FieldKind, Name, Phone, Record, Result};
pub use storage::{ContactBook, SnapshotManager};
