use crate::event::{Asin, Position};
use thiserror::Error;

/// One externally observed reading position. Ephemeral — never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub asin: Asin,

    /// Current location marker reported by the device.
    pub position: Position,

    /// Completion percentage, when the source reports one.
    pub percent_read: Option<u8>,
}

impl Observation {
    /// Whether the completion marker says the book is done.
    pub fn is_complete(&self) -> bool {
        self.percent_read.is_some_and(|p| p >= 100)
    }
}

/// Failure outcome of a snapshot fetch.
///
/// Network, auth, session expiry — the core does not distinguish. The
/// manager turns this into [`Detection::Unavailable`](crate::Detection)
/// data so "couldn't check" is never confused with "no changes".
#[derive(Debug, Error)]
#[error("observation source unavailable: {0}")]
pub struct SnapshotUnavailable(pub String);

/// Contract for the external data-acquisition collaborator.
///
/// One blocking call with a binary outcome. Credentials, sessions and any
/// retry policy belong to the implementor, not the core.
pub trait ObservationSource {
    fn fetch_snapshot(&mut self) -> Result<Vec<Observation>, SnapshotUnavailable>;
}
