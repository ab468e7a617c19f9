use crate::error::Error;
use crate::event::Event;
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// The append-only event log.
///
/// One JSON line per event, strict append order. The trailing newline is
/// the per-record commit marker: an unterminated tail left by a crash was
/// never durable and is dropped on the next open. Committed records are
/// never rewritten or removed.
///
/// A sibling `.lock` file carries an exclusive advisory lock for the
/// store's lifetime, so a second process cannot open the same log for
/// writing.
pub struct EventStore {
    log_path: PathBuf,
    _lock: File,
}

impl EventStore {
    /// Open or create an event log at the given path.
    ///
    /// Creates parent directories and an empty log file if needed, acquires
    /// the writer lock, and drops any torn trailing record left by a crash
    /// mid-append.
    ///
    /// # Errors
    ///
    /// [`Error::StoreLocked`] if another process holds the lock; I/O errors
    /// otherwise.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let log_path = path.as_ref().to_path_buf();
        if let Some(parent) = log_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let lock_path = log_path.with_extension("lock");
        let lock = OpenOptions::new()
            .create(true)
            .write(true)
            .open(&lock_path)?;
        lock.try_lock_exclusive().map_err(|_| Error::StoreLocked {
            path: log_path.clone(),
        })?;

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;
        truncate_torn_tail(&log_path)?;

        log::debug!("opened event log at {}", log_path.display());
        Ok(EventStore {
            log_path,
            _lock: lock,
        })
    }

    /// Read and deserialize every persisted event, in append order.
    ///
    /// # Errors
    ///
    /// [`Error::CorruptLog`] if any record fails to parse — a corrupt log is
    /// a fatal startup condition, not something to recover around.
    pub fn load(&self) -> Result<Vec<Event>, Error> {
        let file = File::open(&self.log_path)?;
        let mut reader = BufReader::new(file);
        let mut events = Vec::new();
        let mut line = String::new();
        let mut line_no = 0usize;

        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                break;
            }
            line_no += 1;

            let record = line.trim_end();
            if record.is_empty() {
                continue;
            }

            let event = serde_json::from_str(record).map_err(|source| Error::CorruptLog {
                path: self.log_path.clone(),
                line: line_no,
                source,
            })?;
            events.push(event);
        }

        log::debug!("loaded {} event(s) from {}", events.len(), self.log_path.display());
        Ok(events)
    }

    /// Durably append the given events, in order, to the end of the log.
    ///
    /// All lines are serialized into one buffer and written with a single
    /// `write_all` followed by `sync_data`, so the batch lands all-or-nothing
    /// with respect to durability. Appending an empty slice is a no-op.
    pub fn append(&mut self, events: &[Event]) -> Result<(), Error> {
        if events.is_empty() {
            return Ok(());
        }

        let mut buf = String::new();
        for event in events {
            let line = serde_json::to_string(event)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            buf.push_str(&line);
            buf.push('\n');
        }

        let mut file = OpenOptions::new().append(true).open(&self.log_path)?;
        file.write_all(buf.as_bytes())?;
        file.sync_data()?;

        log::debug!("appended {} event(s) to {}", events.len(), self.log_path.display());
        Ok(())
    }

    /// Returns the path to the log file.
    pub fn path(&self) -> &Path {
        &self.log_path
    }
}

/// Drop an unterminated trailing record.
///
/// The newline is the commit marker, so bytes after the last newline were
/// never part of the log. Committed records are untouched.
fn truncate_torn_tail(path: &Path) -> io::Result<()> {
    let mut file = OpenOptions::new().read(true).write(true).open(path)?;
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(());
    }

    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    if last[0] == b'\n' {
        return Ok(());
    }

    file.seek(SeekFrom::Start(0))?;
    let mut contents = Vec::with_capacity(len as usize);
    file.read_to_end(&mut contents)?;
    let keep = contents
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |pos| pos as u64 + 1);

    file.set_len(keep)?;
    file.sync_data()?;
    log::warn!(
        "dropped torn trailing record in {} ({} bytes)",
        path.display(),
        len - keep
    );
    Ok(())
}
