//! War archive query boundary.
//!
//! The engine consumes an already-materialized sequence of war records;
//! obtaining them is the archive's concern. This module defines the
//! query shape the engine relies on (war-type filter, time/count window,
//! clan restriction) and an in-memory implementation backed by a JSON
//! document, which is what the CLI and tests feed from.

use std::path::Path;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::debug;

use crate::calculate::WarTypeFilter;
use crate::models::WarRecord;

/// Errors that can occur while loading archived records.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Time/count restriction on the record sequence.
///
/// Records are stored newest-first by convention, so `Latest(n)` keeps
/// the first `n` records that survive the other filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordWindow {
    /// Only records whose preparation start is at or after this instant
    Since(DateTime<Utc>),
    /// Only the most recent `n` records
    Latest(usize),
}

impl RecordWindow {
    /// Combine optional caller inputs; a count takes precedence over a
    /// timestamp when both are given.
    pub fn from_parts(since: Option<DateTime<Utc>>, latest: Option<usize>) -> Option<Self> {
        match (latest, since) {
            (Some(n), _) => Some(RecordWindow::Latest(n)),
            (None, Some(ts)) => Some(RecordWindow::Since(ts)),
            (None, None) => None,
        }
    }
}

/// One archive query.
#[derive(Debug, Clone)]
pub struct ArchiveQuery {
    /// War categories to include
    pub war_types: WarTypeFilter,

    /// Optional time/count window
    pub window: Option<RecordWindow>,

    /// When set, only records where this clan tag is one of the two
    /// sides are returned
    pub clan_only: Option<String>,
}

impl Default for ArchiveQuery {
    fn default() -> Self {
        Self {
            war_types: WarTypeFilter::default(),
            window: None,
            clan_only: None,
        }
    }
}

/// Source of war records for one analytics run.
pub trait WarArchive {
    /// Return all records matching the query, newest-first.
    fn fetch(&self, query: &ArchiveQuery) -> Result<Vec<WarRecord>, ArchiveError>;
}

/// Archive over an already-loaded record sequence.
pub struct MemoryArchive {
    records: Vec<WarRecord>,
}

impl MemoryArchive {
    /// Wrap a record sequence (expected newest-first).
    pub fn new(records: Vec<WarRecord>) -> Self {
        Self { records }
    }

    /// Load a JSON array of war records from disk.
    pub fn from_json_file(path: &Path) -> Result<Self, ArchiveError> {
        let contents = std::fs::read_to_string(path)?;
        let records: Vec<WarRecord> = serde_json::from_str(&contents)?;
        debug!(path = %path.display(), count = records.len(), "loaded war records");
        Ok(Self::new(records))
    }

    /// Number of records held, before any filtering.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the archive holds no records at all.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl WarArchive for MemoryArchive {
    fn fetch(&self, query: &ArchiveQuery) -> Result<Vec<WarRecord>, ArchiveError> {
        let filtered = self
            .records
            .iter()
            .filter(|war| query.war_types.allows(war.war_type))
            .filter(|war| match &query.clan_only {
                Some(tag) => war.side_a.tag == *tag || war.side_b.tag == *tag,
                None => true,
            })
            .filter(|war| match query.window {
                Some(RecordWindow::Since(ts)) => war.preparation_start >= ts,
                _ => true,
            });

        let records: Vec<WarRecord> = match query.window {
            Some(RecordWindow::Latest(n)) => filtered.take(n).cloned().collect(),
            _ => filtered.cloned().collect(),
        };

        debug!(matched = records.len(), "archive query");
        Ok(records)
    }
}
