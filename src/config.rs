use std::path::{Path, PathBuf};

/// Default snapshot file, relative to the working directory
pub const DEFAULT_SNAPSHOT_FILE: &str = "address_book.snapshot";

/// How hard a save pushes bytes to disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DurabilityMode {
    /// Flush and fsync the snapshot before it replaces the old one
    Sync,
    /// Flush only; the OS decides when the bytes reach disk
    #[default]
    Async,
}

/// Contact book configuration
#[derive(Debug, Clone)]
pub struct BookConfig {
    /// Snapshot file the book is loaded from and saved to
    pub snapshot_path: PathBuf,

    /// Durability of each save
    pub durability: DurabilityMode,

    /// Create missing parent directories of the snapshot on save
    pub create_parent_dirs: bool,
}

impl BookConfig {
    pub fn new(snapshot_path: impl AsRef<Path>) -> Self {
        Self {
            snapshot_path: snapshot_path.as_ref().to_path_buf(),
            durability: DurabilityMode::default(),
            create_parent_dirs: true,
        }
    }

    /// Set the durability mode
    pub fn durability(mut self, mode: DurabilityMode) -> Self {
        self.durability = mode;
        self
    }

    /// Toggle creation of missing parent directories
    pub fn create_parent_dirs(mut self, enabled: bool) -> Self {
        self.create_parent_dirs = enabled;
        self
    }
}

impl Default for BookConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SNAPSHOT_FILE)
    }
}
