#![allow(dead_code)]

use pagemark::{
    Asin, Book, Catalog, Event, Observation, ObservationSource, Position, SnapshotUnavailable,
};
use std::collections::VecDeque;

pub fn book(asin: &str, title: &str) -> Book {
    Book {
        asin: Asin::new(asin),
        title: title.to_string(),
        author: "Test Author".to_string(),
    }
}

pub fn catalog() -> Catalog {
    Catalog::new(vec![
        book("B001", "The Left Hand of Darkness"),
        book("B002", "Annihilation"),
        book("B003", "Piranesi"),
    ])
}

pub fn added(asin: &str) -> Event {
    Event::Added {
        asin: Asin::new(asin),
    }
}

pub fn reading(asin: &str, position: u64) -> Event {
    Event::Reading {
        asin: Asin::new(asin),
        position: Position(position),
    }
}

pub fn finished(asin: &str) -> Event {
    Event::Finished {
        asin: Asin::new(asin),
    }
}

pub fn observation(asin: &str, position: u64, percent_read: Option<u8>) -> Observation {
    Observation {
        asin: Asin::new(asin),
        position: Position(position),
        percent_read,
    }
}

/// Observation source scripted from a queue of fetch outcomes.
///
/// Each `fetch_snapshot` call pops the next outcome; once the queue is
/// drained, further calls report an empty snapshot.
pub struct ScriptedSource {
    outcomes: VecDeque<Result<Vec<Observation>, SnapshotUnavailable>>,
}

impl ScriptedSource {
    pub fn new(outcomes: Vec<Result<Vec<Observation>, SnapshotUnavailable>>) -> Self {
        ScriptedSource {
            outcomes: outcomes.into(),
        }
    }

    pub fn once(observations: Vec<Observation>) -> Self {
        ScriptedSource::new(vec![Ok(observations)])
    }

    pub fn empty() -> Self {
        ScriptedSource::new(Vec::new())
    }
}

impl ObservationSource for ScriptedSource {
    fn fetch_snapshot(&mut self) -> Result<Vec<Observation>, SnapshotUnavailable> {
        self.outcomes.pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Source that always fails, for cycles that never reach detection.
pub struct OfflineSource;

impl ObservationSource for OfflineSource {
    fn fetch_snapshot(&mut self) -> Result<Vec<Observation>, SnapshotUnavailable> {
        Err(SnapshotUnavailable("offline".to_string()))
    }
}
