use crate::event::Asin;
use crate::projection::ReadingStatus;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the core.
#[derive(Debug, Error)]
pub enum Error {
    /// Another process holds the writer lock on the event log.
    #[error("event log {} is locked by another writer", path.display())]
    StoreLocked { path: PathBuf },

    /// A persisted record failed to parse. Fatal on load — no partial
    /// recovery is attempted.
    #[error("corrupt event log {} at line {line}", path.display())]
    CorruptLog {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// An event or observation referenced an asin outside the catalog.
    #[error("unknown book {asin}")]
    UnknownBook { asin: Asin },

    /// A registered event is inconsistent with the projected state,
    /// pending events included. Nothing was buffered.
    #[error("invalid transition for {asin}: book is {status}")]
    InvalidTransition { asin: Asin, status: ReadingStatus },

    /// Appending the pending buffer failed. The buffer is preserved and the
    /// commit may be retried; nothing was partially applied.
    #[error("commit of {pending} pending event(s) failed")]
    CommitFailed {
        pending: usize,
        #[source]
        source: Box<Error>,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}
