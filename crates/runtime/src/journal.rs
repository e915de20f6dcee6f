use std::{
    env,
    fs::{self, File, OpenOptions},
    io::{self, BufRead, BufReader, Write},
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::{JOURNAL_DISABLED_ENV, JOURNAL_FILE_NAME, state_dir};

pub const JOURNAL_VERSION: u8 = 1;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub enum JournalEvent {
    Batch(BatchEvent),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Sent,
    Failed(String),
}

/// One batch handed to a sink.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BatchEvent {
    /// Schema version
    pub version: u8,

    pub timestamp: DateTime<Utc>,

    /// Sink kind, e.g. `queue`.
    pub sink: String,

    /// Queue URL, topic ARN or stream name.
    pub destination: String,

    /// Position of the batch within its dispatch run.
    pub batch: usize,

    /// Number of records in the batch.
    pub records: usize,

    pub size_kb: f64,

    pub outcome: Outcome,
}

impl BatchEvent {
    pub fn new(
        sink: impl Into<String>,
        destination: impl Into<String>,
        batch: usize,
        records: usize,
        size_kb: f64,
        outcome: Outcome,
    ) -> Self {
        Self {
            version: JOURNAL_VERSION,
            timestamp: Utc::now(),
            sink: sink.into(),
            destination: destination.into(),
            batch,
            records,
            size_kb,
            outcome,
        }
    }
}

/// Append-only JSON-lines record of dispatched batches.
///
/// Callers use it to find out which batches of a failed run already went out.
#[derive(Debug, Clone)]
pub struct Journal {
    path: PathBuf,
}

pub fn journal_path() -> Option<PathBuf> {
    state_dir().map(|d| d.join(JOURNAL_FILE_NAME))
}

fn journal_disabled() -> bool {
    match env::var(JOURNAL_DISABLED_ENV) {
        Ok(val) => val == "0" || val.eq_ignore_ascii_case("false"),
        Err(_) => false,
    }
}

impl Journal {
    /// Journal at the default location, or `None` when disabled through
    /// `JSONBATCH_HISTORY`.
    pub fn new() -> Option<Self> {
        if journal_disabled() {
            return None;
        }

        let path = journal_path()?;
        Some(Self { path })
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record a batch. Failures to write are logged and swallowed.
    pub fn log_batch(&self, event: BatchEvent) {
        if let Err(e) = self.append_event(&JournalEvent::Batch(event)) {
            debug!("Failed to write journal event: {}", e);
        }
    }

    fn append_event(&self, event: &JournalEvent) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut line = serde_json::to_string(event).map_err(io::Error::other)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        // One write per line keeps concurrent appends from interleaving
        // under O_APPEND.
        file.write_all(line.as_bytes())?;

        Ok(())
    }

    pub fn iter_events(&self) -> impl Iterator<Item = JournalEvent> {
        self.read_events().into_iter().flatten()
    }

    fn read_events(&self) -> Option<Vec<JournalEvent>> {
        let file = File::open(&self.path).ok()?;
        let reader = BufReader::new(file);
        let mut events = Vec::new();
        for line in reader.lines() {
            match line {
                Ok(line) => match serde_json::from_str(&line) {
                    Ok(ev) => events.push(ev),
                    Err(e) => debug!("Skipping malformed journal line: {e}"),
                },
                Err(e) => {
                    debug!("Error reading journal: {e}");
                    break;
                }
            }
        }
        Some(events)
    }

    /// Most recent batches first.
    pub fn recent(&self, limit: usize) -> Vec<BatchEvent> {
        let mut batches: Vec<BatchEvent> = self
            .iter_events()
            .map(|e| match e {
                JournalEvent::Batch(b) => b,
            })
            .collect();

        batches.reverse();
        batches.truncate(limit);
        batches
    }

    pub fn count(&self) -> usize {
        self.iter_events().count()
    }

    pub fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
#[path = "journal_tests.rs"]
mod tests;
