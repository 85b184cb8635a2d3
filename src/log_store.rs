/// Odds log storage - a JSON array of `LogEntry`, oldest first.
///
/// The file is small (at most 30 days of hourly entries), so every write
/// loads the whole array, edits it in memory and rewrites it. Rewrites go to
/// a temporary sibling file that is renamed over the log, so a failed write
/// never leaves a truncated log behind.
///
/// # Clock injection
/// Operations that depend on "now" take it as a parameter instead of calling
/// `Utc::now()` internally, which keeps retention and lookback deterministic
/// in tests.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Timelike, Utc};

use crate::error::LogStoreError;
use crate::model::LogEntry;

/// Entries older than this are dropped on every write.
pub const RETENTION_DAYS: i64 = 30;

pub fn retention() -> Duration {
    Duration::days(RETENTION_DAYS)
}

// ---------------------------------------------------------------------------
// Recent-entry view
// ---------------------------------------------------------------------------

/// Entries whose timestamp falls within a window ending at "now".
///
/// Both ends are inclusive. Entries stamped after "now" (a clock that has
/// since stepped back) are outside the window. Iteration is lazy and can be restarted any number of times with `iter()`.
#[derive(Debug, Clone)]
pub struct RecentEntries {
    entries: Vec<LogEntry>,
    cutoff: DateTime<Utc>,
    now: DateTime<Utc>,
}

impl RecentEntries {
    pub fn iter(&self) -> RecentIter<'_> {
        RecentIter {
            inner: self.entries.iter(),
            cutoff: self.cutoff,
            now: self.now,
        }
    }

    /// Logged pressures in the window, oldest first.
    pub fn pressures(&self) -> impl Iterator<Item = f64> + Clone + '_ {
        self.iter().map(|e| e.pressure_hpa)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl<'a> IntoIterator for &'a RecentEntries {
    type Item = &'a LogEntry;
    type IntoIter = RecentIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator returned by `RecentEntries::iter`.
#[derive(Debug, Clone)]
pub struct RecentIter<'a> {
    inner: std::slice::Iter<'a, LogEntry>,
    cutoff: DateTime<Utc>,
    now: DateTime<Utc>,
}

impl<'a> Iterator for RecentIter<'a> {
    type Item = &'a LogEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let (cutoff, now) = (self.cutoff, self.now);
        self.inner.by_ref().find(|e| e.timestamp >= cutoff && e.timestamp <= now)
    }
}

// ---------------------------------------------------------------------------
// Append outcome
// ---------------------------------------------------------------------------

/// How the new entry landed in the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    Appended,
    /// A rerun in the same UTC hour overwrote that hour's entry.
    ReplacedSameHour,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppendOutcome {
    pub kind: WriteKind,
    /// Entries in the log after the write.
    pub retained: usize,
    /// Entries dropped for being past retention.
    pub pruned: usize,
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct LogStore {
    path: PathBuf,
}

impl LogStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every entry. A missing file is an empty log, not an error.
    pub fn load(&self) -> Result<Vec<LogEntry>, LogStoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(error) => return Err(self.io_error(error)),
        };

        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&contents).map_err(|e| LogStoreError::Corrupt {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }

    /// Entries logged within `window` of `now`, oldest first.
    pub fn read_recent(&self, window: Duration, now: DateTime<Utc>) -> Result<RecentEntries, LogStoreError> {
        Ok(RecentEntries {
            entries: self.load()?,
            cutoff: now - window,
            now,
        })
    }

    /// Appends `entry`, drops everything past retention, and rewrites the log.
    ///
    /// If the last retained entry falls in the same UTC hour as `entry`, it is
    /// replaced rather than duplicated, so a manual rerun keeps one entry per
    /// hour. An entry older than the last retained one is rejected.
    pub fn append_and_prune(&self, entry: LogEntry, now: DateTime<Utc>) -> Result<AppendOutcome, LogStoreError> {
        let existing = self.load()?;
        let before = existing.len();
        let mut entries = prune(existing, now);
        let pruned = before - entries.len();

        let kind = match entries.last() {
            Some(last) if entry.timestamp < last.timestamp => {
                return Err(LogStoreError::OutOfOrder {
                    entry: entry.timestamp.to_rfc3339(),
                    last: last.timestamp.to_rfc3339(),
                });
            }
            Some(last) if same_hour(last.timestamp, entry.timestamp) => WriteKind::ReplacedSameHour,
            _ => WriteKind::Appended,
        };

        if kind == WriteKind::ReplacedSameHour {
            entries.pop();
        }
        entries.push(entry);

        // The new entry itself may be past retention if the caller's clock
        // is off; it is pruned like any other.
        let entries = prune(entries, now);
        self.persist(&entries)?;

        Ok(AppendOutcome {
            kind,
            retained: entries.len(),
            pruned,
        })
    }

    /// Rewrites the log with `entries` via write-then-rename.
    ///
    /// Refuses to write an entry holding NaN or infinity, since it could not
    /// be read back.
    pub fn persist(&self, entries: &[LogEntry]) -> Result<(), LogStoreError> {
        if let Some((entry, field)) = entries
            .iter()
            .find_map(|e| e.non_finite_field().map(|field| (e, field)))
        {
            return Err(LogStoreError::NonFinite {
                time: entry.timestamp.to_rfc3339(),
                field,
            });
        }

        let json = serde_json::to_string_pretty(entries)?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;
        }

        let tmp = self.tmp_path();
        let write = || -> std::io::Result<()> {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(json.as_bytes())?;
            file.write_all(b"\n")?;
            file.sync_all()?;
            fs::rename(&tmp, &self.path)
        };

        write().map_err(|error| {
            let _ = fs::remove_file(&tmp);
            self.io_error(error)
        })
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "odds_log.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, error: std::io::Error) -> LogStoreError {
        LogStoreError::Io {
            path: self.path.clone(),
            error,
        }
    }
}

/// Drops entries older than `now − RETENTION_DAYS`. Idempotent.
pub fn prune(entries: Vec<LogEntry>, now: DateTime<Utc>) -> Vec<LogEntry> {
    let cutoff = now - retention();
    entries.into_iter().filter(|e| e.timestamp >= cutoff).collect()
}

fn same_hour(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    a.date_naive() == b.date_naive() && a.hour() == b.hour()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
