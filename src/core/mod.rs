pub mod error;
pub mod field;
pub mod record;

pub use error::{BookError, Result};
pub use field::{Birthday, Email, Field, FieldKind, Name, Phone};
pub use record::Record;
