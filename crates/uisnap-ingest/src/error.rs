use std::path::PathBuf;

use crate::page_source::{APPLICATION_TAG, SESSION_ROOT, WINDOW_TAG};

/// Convenience alias for ingest results.
pub type Result<T> = std::result::Result<T, IngestError>;

/// Errors raised while loading a page-source snapshot.
///
/// Any structural problem with the dump is a hard error. A snapshot that
/// loads at all is guaranteed to have at least one window root.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read snapshot {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed XML at byte {position}: {message}")]
    Xml { position: u64, message: String },

    #[error("element <{tag}> is never closed")]
    UnclosedElement { tag: String },

    #[error("unexpected content before the document root at byte {position}")]
    LeadingContent { position: u64 },

    #[error("unexpected content after the document root at byte {position}")]
    TrailingContent { position: u64 },

    #[error("document contains no root element")]
    EmptyDocument,

    #[error("expected <{}> document root, found <{found}>", SESSION_ROOT)]
    UnexpectedRoot { found: String },

    #[error("document root has no <{}> node", APPLICATION_TAG)]
    MissingApplication,

    #[error("document root has {count} <{}> nodes, expected exactly one", APPLICATION_TAG)]
    AmbiguousApplication { count: usize },

    #[error("application node has no <{}> children", WINDOW_TAG)]
    MissingWindow,
}

impl IngestError {
    pub(crate) fn xml(position: u64, source: &dyn std::fmt::Display) -> Self {
        Self::Xml {
            position,
            message: source.to_string(),
        }
    }
}
