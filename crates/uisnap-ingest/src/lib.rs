pub mod error;
pub mod page_source;

pub use error::{IngestError, Result};
pub use page_source::{
    APPLICATION_TAG, SESSION_ROOT, WINDOW_TAG, load_snapshot, parse_snapshot,
};
