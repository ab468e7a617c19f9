mod catalog;
mod error;
mod event;
mod manager;
mod observation;
mod projection;
mod store;

pub use catalog::{Book, Catalog};
pub use error::Error;
pub use event::{Asin, Event, Position};
pub use manager::{Detection, ReconciliationManager};
pub use observation::{Observation, ObservationSource, SnapshotUnavailable};
pub use projection::{apply, fold, BookProgress, LibraryState, ReadingStatus};
pub use store::EventStore;
