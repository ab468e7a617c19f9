//! One synchronization cycle: load baseline, diff against a fresh
//! observation snapshot, buffer new events, commit on request.

use crate::catalog::{Book, Catalog};
use crate::error::Error;
use crate::event::Event;
use crate::observation::ObservationSource;
use crate::projection::{self, LibraryState, ReadingStatus};
use crate::store::EventStore;

/// Outcome of one detection pass.
///
/// `Unavailable` is data, not an error — callers must be able to tell
/// "couldn't check" apart from "checked, nothing changed".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    /// The observation source could not be reached. Nothing was buffered.
    Unavailable,

    /// Newly detected events, possibly none. Already buffered as pending.
    Events(Vec<Event>),
}

/// Orchestrates a synchronization cycle over one event log.
///
/// Owns the in-memory buffer of pending (uncommitted) events accumulated
/// between detection/registration and commit. Once committed, events belong
/// to the [`EventStore`] and the buffer is cleared.
///
/// # Examples
///
/// ```no_run
/// use pagemark::{
///     Asin, Book, Catalog, Detection, Event, EventStore, Position,
///     ReconciliationManager,
/// };
/// # use pagemark::{Observation, ObservationSource, SnapshotUnavailable};
/// # struct Offline;
/// # impl ObservationSource for Offline {
/// #     fn fetch_snapshot(&mut self) -> Result<Vec<Observation>, SnapshotUnavailable> {
/// #         Err(SnapshotUnavailable("offline".into()))
/// #     }
/// # }
///
/// # fn main() -> Result<(), pagemark::Error> {
/// let store = EventStore::open("events.jsonl")?;
/// let catalog = Catalog::new(vec![Book {
///     asin: Asin::new("B001"),
///     title: "Piranesi".into(),
///     author: "Susanna Clarke".into(),
/// }]);
/// let mut mgr = ReconciliationManager::new(store, catalog, Offline)?;
///
/// match mgr.detect_events()? {
///     Detection::Unavailable => eprintln!("could not check for updates"),
///     Detection::Events(events) => {
///         for event in &events {
///             println!("{event}");
///         }
///     }
/// }
///
/// mgr.register_events([Event::Reading {
///     asin: Asin::new("B001"),
///     position: Position(0),
/// }])?;
/// mgr.commit_events()?;
/// # Ok(())
/// # }
/// ```
pub struct ReconciliationManager<S> {
    store: EventStore,
    catalog: Catalog,
    source: S,
    baseline: LibraryState,
    pending: Vec<Event>,
}

impl<S: ObservationSource> ReconciliationManager<S> {
    /// Create a manager, projecting the baseline state from the full log.
    ///
    /// # Errors
    ///
    /// Fails if the log cannot be read or is corrupt.
    pub fn new(store: EventStore, catalog: Catalog, source: S) -> Result<Self, Error> {
        let events = store.load()?;
        let baseline = projection::fold(&events);
        Ok(ReconciliationManager {
            store,
            catalog,
            source,
            baseline,
            pending: Vec::new(),
        })
    }

    /// Fetch a fresh observation snapshot and diff it against current state.
    ///
    /// Detection is completion-only: a book whose projected status is
    /// `Reading` and whose observation carries the completion marker yields
    /// a `Finished` event. Starting a book is always a manual declaration,
    /// and position drift alone is never a transition. Books already
    /// finished are skipped even if still reported complete, so repeated
    /// cycles emit no duplicates.
    ///
    /// Detected events are buffered as pending but not persisted.
    ///
    /// # Errors
    ///
    /// Fails on a corrupt log or on an observation naming an asin outside
    /// the catalog. An unreachable source is not an error — it returns
    /// [`Detection::Unavailable`].
    pub fn detect_events(&mut self) -> Result<Detection, Error> {
        let events = self.store.load()?;
        self.baseline = projection::fold(&events);

        let observations = match self.source.fetch_snapshot() {
            Ok(observations) => observations,
            Err(err) => {
                log::warn!("{err}");
                return Ok(Detection::Unavailable);
            }
        };

        // Diff against the projection including pending events, so a second
        // detect in the same cycle cannot buffer the same completion twice.
        let mut projected = self.projected();
        let mut detected = Vec::new();
        for obs in &observations {
            if !self.catalog.contains(&obs.asin) {
                return Err(Error::UnknownBook {
                    asin: obs.asin.clone(),
                });
            }
            if projected.status(&obs.asin) == ReadingStatus::Reading && obs.is_complete() {
                let event = Event::Finished {
                    asin: obs.asin.clone(),
                };
                projected = projection::apply(projected, &event);
                detected.push(event);
            }
        }

        if !detected.is_empty() {
            log::info!("detected {} completion(s)", detected.len());
        }
        self.pending.extend(detected.iter().cloned());
        Ok(Detection::Events(detected))
    }

    /// Buffer caller-declared events after validating each against the
    /// projected state, pending events included.
    ///
    /// Validation is all-or-nothing: if any event in the batch is rejected,
    /// none are buffered. Rules, in order of checking:
    /// - the asin must be in the catalog;
    /// - `Added` requires the book to be untracked so far;
    /// - `Reading` requires status `Unread`;
    /// - `Finished` requires status not already `Finished`.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownBook`] or [`Error::InvalidTransition`]; the buffer is
    /// unchanged on failure.
    pub fn register_events(
        &mut self,
        events: impl IntoIterator<Item = Event>,
    ) -> Result<(), Error> {
        let mut projected = self.projected();
        let mut accepted = Vec::new();

        for event in events {
            let asin = event.asin();
            if !self.catalog.contains(asin) {
                return Err(Error::UnknownBook { asin: asin.clone() });
            }

            let status = projected.status(asin);
            let legal = match &event {
                Event::Added { .. } => !projected.contains(asin),
                Event::Reading { .. } => status == ReadingStatus::Unread,
                Event::Finished { .. } => status != ReadingStatus::Finished,
            };
            if !legal {
                return Err(Error::InvalidTransition {
                    asin: asin.clone(),
                    status,
                });
            }

            projected = projection::apply(projected, &event);
            accepted.push(event);
        }

        self.pending.extend(accepted);
        Ok(())
    }

    /// Persist the full pending buffer, in accumulation order, as one
    /// all-or-nothing append, then clear it.
    ///
    /// Detected events precede manually registered ones, each group keeping
    /// its relative order.
    ///
    /// # Errors
    ///
    /// [`Error::CommitFailed`] if the append fails; the buffer is left
    /// intact so the commit can be retried.
    pub fn commit_events(&mut self) -> Result<(), Error> {
        if self.pending.is_empty() {
            return Ok(());
        }

        if let Err(err) = self.store.append(&self.pending) {
            return Err(Error::CommitFailed {
                pending: self.pending.len(),
                source: Box::new(err),
            });
        }

        log::info!("committed {} event(s)", self.pending.len());
        self.baseline = self
            .pending
            .iter()
            .fold(std::mem::take(&mut self.baseline), projection::apply);
        self.pending.clear();
        Ok(())
    }

    /// The known book catalog.
    pub fn books(&self) -> &[Book] {
        self.catalog.books()
    }

    /// Current projected state, including pending (uncommitted) effects.
    pub fn progress(&self) -> LibraryState {
        self.projected()
    }

    /// Events buffered but not yet committed, in accumulation order.
    pub fn pending(&self) -> &[Event] {
        &self.pending
    }

    fn projected(&self) -> LibraryState {
        self.pending
            .iter()
            .fold(self.baseline.clone(), projection::apply)
    }
}
