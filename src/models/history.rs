//! Window of past daily records, ordered most recent first

use serde::{Deserialize, Serialize};

use super::ForecastRecord;
use crate::{AdvisoryError, Result};

/// Past daily records, newest first.
///
/// The day-over-day warning compares tomorrow with the first entry, so the
/// ordering is enforced here rather than assumed by the analyzer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct History {
    records: Vec<ForecastRecord>,
}

/// On-disk layout written by the persistence side: `{"records": [...]}`
#[derive(Debug, Deserialize)]
struct HistoryFile {
    #[serde(default)]
    records: Vec<ForecastRecord>,
}

impl History {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a history from records in any order
    #[must_use]
    pub fn from_records(mut records: Vec<ForecastRecord>) -> Self {
        records.sort_by(|a, b| b.date.cmp(&a.date));
        Self { records }
    }

    /// Build a history from records that must already be newest first
    pub fn most_recent_first(records: Vec<ForecastRecord>) -> Result<Self> {
        if let Some(pair) = records.windows(2).find(|pair| pair[0].date < pair[1].date) {
            return Err(AdvisoryError::validation(format!(
                "history must be ordered most recent first, but {} precedes {}",
                pair[0].date, pair[1].date
            )));
        }
        Ok(Self { records })
    }

    /// Parse a `{"records": [...]}` document, sorting it newest first
    pub fn from_json(json: &str) -> Result<Self> {
        let file: HistoryFile = serde_json::from_str(json)?;
        Ok(Self::from_records(file.records))
    }

    /// Keep only the newest `days` records
    #[must_use]
    pub fn truncated(mut self, days: usize) -> Self {
        self.records.truncate(days);
        self
    }

    #[must_use]
    pub fn records(&self) -> &[ForecastRecord] {
        &self.records
    }

    #[must_use]
    pub fn most_recent(&self) -> Option<&ForecastRecord> {
        self.records.first()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
