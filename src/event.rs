use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable unique identifier for a book.
///
/// Titles and authors are descriptive only — every identity comparison in
/// this crate goes through the asin.
///
/// # Examples
///
/// ```
/// use pagemark::Asin;
///
/// let asin = Asin::new("B00ZV9PXP2");
/// assert_eq!(asin.as_str(), "B00ZV9PXP2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Asin(String);

impl Asin {
    pub fn new(asin: impl Into<String>) -> Self {
        Asin(asin.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Asin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Asin {
    fn from(asin: &str) -> Self {
        Asin(asin.to_string())
    }
}

impl From<String> for Asin {
    fn from(asin: String) -> Self {
        Asin(asin)
    }
}

/// Opaque, totally ordered location marker within a book.
///
/// The reading device defines the scale; the tracker only ever compares
/// markers belonging to the same book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(pub u64);

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An immutable state-transition record stored in the log.
///
/// Events are serialized as single JSON lines tagged with `"kind"`. The set
/// of variants is closed — folding and serializing never need runtime type
/// inspection.
///
/// # Examples
///
/// ```
/// use pagemark::{Asin, Event, Position};
///
/// let event = Event::Reading {
///     asin: Asin::new("B00ZV9PXP2"),
///     position: Position(1234),
/// };
/// assert_eq!(event.asin().as_str(), "B00ZV9PXP2");
/// assert_eq!(event.kind(), "reading");
///
/// let line = serde_json::to_string(&event).unwrap();
/// assert_eq!(line, r#"{"kind":"reading","asin":"B00ZV9PXP2","position":1234}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    /// The book entered the tracked library.
    Added { asin: Asin },

    /// The reader declared the book in progress, starting at `position`.
    Reading { asin: Asin, position: Position },

    /// The reader finished the book.
    Finished { asin: Asin },
}

impl Event {
    /// The book this event is about.
    pub fn asin(&self) -> &Asin {
        match self {
            Event::Added { asin } => asin,
            Event::Reading { asin, .. } => asin,
            Event::Finished { asin } => asin,
        }
    }

    /// The serialized tag of this variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::Added { .. } => "added",
            Event::Reading { .. } => "reading",
            Event::Finished { .. } => "finished",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Added { asin } => write!(f, "added {asin}"),
            Event::Reading { asin, position } => {
                write!(f, "started reading {asin} from location {position}")
            }
            Event::Finished { asin } => write!(f, "finished reading {asin}"),
        }
    }
}
