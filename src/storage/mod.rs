pub mod book;
pub mod persistence;

pub use book::ContactBook;
pub use persistence::{
    BookSnapshot, RecordEntry, SNAPSHOT_FORMAT, SNAPSHOT_VERSION, SnapshotManager,
    SnapshotMetadata, load, load_or_empty, save,
};
