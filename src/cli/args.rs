//! Command line definitions
//!
//! - contact-book demo
//! - contact-book list
//! - contact-book search <query> [--by any|name|phone]
//! - contact-book add <name> [--phone P]... [--email E]... [--birthday YYYY-MM-DD]
//! - contact-book remove <name>
//! - contact-book phone|email add|update|delete ...
//! - contact-book birthday set|clear ...

use clap::{Parser, Subcommand, ValueEnum};
use contact_book::DEFAULT_SNAPSHOT_FILE;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "contact-book")]
#[command(version, about = "Personal contact book", long_about = None)]
pub struct Cli {
    /// Snapshot file holding the contact book
    #[arg(long, global = true, default_value = DEFAULT_SNAPSHOT_FILE)]
    pub file: PathBuf,

    /// Fsync every save before replacing the snapshot
    #[arg(long, global = true)]
    pub sync: bool,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Log snapshot activity to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fill the book with sample contacts, save, reload and verify
    Demo,

    /// Print every contact
    List,

    /// Find contacts by name or phone fragment
    Search {
        query: String,
        #[arg(long, value_enum, default_value_t = SearchBy::Any)]
        by: SearchBy,
    },

    /// Add a contact, replacing any contact with the same name
    Add {
        name: String,
        #[arg(long = "phone")]
        phones: Vec<String>,
        #[arg(long = "email")]
        emails: Vec<String>,
        /// Date in YYYY-MM-DD form
        #[arg(long)]
        birthday: Option<String>,
    },

    /// Remove a contact
    Remove { name: String },

    /// Edit a contact's phones
    Phone {
        #[command(subcommand)]
        action: ValueAction,
    },

    /// Edit a contact's emails
    Email {
        #[command(subcommand)]
        action: ValueAction,
    },

    /// Edit a contact's birthday
    Birthday {
        #[command(subcommand)]
        action: BirthdayAction,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SearchBy {
    /// Name (any case) or phone
    Any,
    /// Name, case-sensitive
    Name,
    /// Phone
    Phone,
}

#[derive(Subcommand, Debug)]
pub enum ValueAction {
    Add { name: String, value: String },
    Update { name: String, old: String, new: String },
    Delete { name: String, value: String },
}

impl ValueAction {
    pub fn name(&self) -> &str {
        match self {
            Self::Add { name, .. } | Self::Update { name, .. } | Self::Delete { name, .. } => name,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum BirthdayAction {
    /// Date in YYYY-MM-DD form
    Set { name: String, date: String },
    Clear { name: String },
}
