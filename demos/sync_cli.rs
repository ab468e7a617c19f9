//! One full synchronization cycle driven from the outside — the shape of
//! the interactive layer that sits on top of the core.
//!
//! Uses a canned observation source in place of a real device session.

use pagemark::{
    Asin, Book, Catalog, Detection, Event, EventStore, Observation, ObservationSource,
    Position, ReconciliationManager, SnapshotUnavailable,
};

/// Stands in for a real device session: one canned snapshot.
struct CannedSource {
    snapshot: Option<Vec<Observation>>,
}

impl ObservationSource for CannedSource {
    fn fetch_snapshot(&mut self) -> Result<Vec<Observation>, SnapshotUnavailable> {
        self.snapshot
            .take()
            .ok_or_else(|| SnapshotUnavailable("session expired".to_string()))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let store = EventStore::open(dir.path().join("events.jsonl"))?;

    let catalog = Catalog::new(vec![
        Book {
            asin: Asin::new("B001"),
            title: "The Dispossessed".to_string(),
            author: "Ursula K. Le Guin".to_string(),
        },
        Book {
            asin: Asin::new("B002"),
            title: "Solaris".to_string(),
            author: "Stanisław Lem".to_string(),
        },
    ]);

    let source = CannedSource {
        snapshot: Some(vec![
            Observation {
                asin: Asin::new("B001"),
                position: Position(5312),
                percent_read: Some(100),
            },
            Observation {
                asin: Asin::new("B002"),
                position: Position(0),
                percent_read: Some(0),
            },
        ]),
    };

    let mut mgr = ReconciliationManager::new(store, catalog, source)?;

    // The reader declared B001 started in an earlier session; replay it here
    // so the canned completion has something to land on.
    mgr.register_events([Event::Reading {
        asin: Asin::new("B001"),
        position: Position(0),
    }])?;
    mgr.commit_events()?;

    println!("Detecting updates to reading progress:");
    match mgr.detect_events()? {
        Detection::Unavailable => {
            println!("  could not reach the observation source");
            return Ok(());
        }
        Detection::Events(events) if events.is_empty() => {
            println!("  no updates detected");
        }
        Detection::Events(events) => {
            for event in &events {
                println!("  {event}");
            }
        }
    }

    // The reader also picks up a new book by hand.
    mgr.register_events([Event::Reading {
        asin: Asin::new("B002"),
        position: Position(0),
    }])?;
    mgr.commit_events()?;

    println!("\nLibrary:");
    let progress = mgr.progress();
    for book in mgr.books() {
        let status = progress.status(&book.asin);
        let position = progress
            .get(&book.asin)
            .and_then(|p| p.position)
            .map_or(String::new(), |p| format!(" @ {p}"));
        println!("  [{status}] {} — {}{position}", book.title, book.author);
    }

    Ok(())
}
