//! Pure fold from an event sequence to current library state.

use crate::event::{Asin, Event, Position};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The three progress states of a tracked book.
///
/// The only legal path is `Unread → Reading → Finished`. `Finished` is
/// terminal and absorbing — no later event moves a book out of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingStatus {
    Unread,
    Reading,
    Finished,
}

impl fmt::Display for ReadingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReadingStatus::Unread => "unread",
            ReadingStatus::Reading => "reading",
            ReadingStatus::Finished => "finished",
        })
    }
}

/// Progress of a single book within a [`LibraryState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookProgress {
    pub status: ReadingStatus,

    /// Last known location marker. `None` before the book is started and
    /// again once it is finished — the marker stops being meaningful.
    pub position: Option<Position>,
}

impl BookProgress {
    fn unread() -> Self {
        BookProgress {
            status: ReadingStatus::Unread,
            position: None,
        }
    }
}

/// Derived current state of the library.
///
/// Never persisted — always rebuilt by replaying the event log in append
/// order. Iteration order is deterministic (sorted by asin).
///
/// # Examples
///
/// ```
/// use pagemark::{fold, Asin, Event, Position, ReadingStatus};
///
/// let asin = Asin::new("B001");
/// let events = vec![
///     Event::Reading { asin: asin.clone(), position: Position(40) },
///     Event::Finished { asin: asin.clone() },
/// ];
///
/// let state = fold(&events);
/// assert_eq!(state.status(&asin), ReadingStatus::Finished);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryState {
    books: BTreeMap<Asin, BookProgress>,
}

impl LibraryState {
    /// Status of a book. Books the log has never mentioned are `Unread`.
    pub fn status(&self, asin: &Asin) -> ReadingStatus {
        self.books.get(asin).map_or(ReadingStatus::Unread, |p| p.status)
    }

    /// Progress entry for a book, if the log has mentioned it.
    pub fn get(&self, asin: &Asin) -> Option<&BookProgress> {
        self.books.get(asin)
    }

    /// Whether the log has mentioned this book at all.
    pub fn contains(&self, asin: &Asin) -> bool {
        self.books.contains_key(asin)
    }

    /// Iterate entries in asin order.
    pub fn iter(&self) -> impl Iterator<Item = (&Asin, &BookProgress)> {
        self.books.iter()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

/// Fold one event into the state.
///
/// Pure reducer, owned state in and out. Total over every event — an asin
/// the state has never seen folds as a fresh entry rather than erroring.
///
/// Transition rules:
/// - `Added`: insert an unread entry; no-op if the book is already tracked.
/// - `Reading`: move to reading at the given position. A restated `Reading`
///   updates the position; a `Reading` for a finished book is ignored.
/// - `Finished`: move to finished from any prior status (finishing straight
///   from unread is legal for short or skimmed reads) and clear the
///   position.
pub fn apply(mut state: LibraryState, event: &Event) -> LibraryState {
    match event {
        Event::Added { asin } => {
            state
                .books
                .entry(asin.clone())
                .or_insert_with(BookProgress::unread);
        }
        Event::Reading { asin, position } => {
            let entry = state
                .books
                .entry(asin.clone())
                .or_insert_with(BookProgress::unread);
            if entry.status != ReadingStatus::Finished {
                entry.status = ReadingStatus::Reading;
                entry.position = Some(*position);
            }
        }
        Event::Finished { asin } => {
            let entry = state
                .books
                .entry(asin.clone())
                .or_insert_with(BookProgress::unread);
            entry.status = ReadingStatus::Finished;
            entry.position = None;
        }
    }
    state
}

/// Replay a whole event sequence from the empty state.
///
/// Deterministic: no I/O, no randomness, no time dependency. Folding a
/// prefix and then the remaining suffix yields the same state as folding
/// the whole sequence at once.
pub fn fold<'a>(events: impl IntoIterator<Item = &'a Event>) -> LibraryState {
    events.into_iter().fold(LibraryState::default(), apply)
}
