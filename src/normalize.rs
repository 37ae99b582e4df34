use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::DateTime;
use regex::Regex;

use crate::model::history::HistoryRecord;
use crate::model::item::NormalizedItem;

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

static TITLE_YEAR: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s*\((\d{4})\)").ok());

/// Insertion-ordered map of items keyed by import path.
///
/// Re-inserting a path replaces the stored item (last write wins) but keeps the
/// position where the path was first seen.
#[derive(Debug, Default)]
pub struct PathIndex {
    items: Vec<NormalizedItem>,
    positions: HashMap<String, usize>,
}

impl PathIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the item that was replaced, if the path was already present.
    pub fn insert(&mut self, item: NormalizedItem) -> Option<NormalizedItem> {
        match self.positions.get(&item.path) {
            Some(&idx) => Some(std::mem::replace(&mut self.items[idx], item)),
            None => {
                self.positions.insert(item.path.clone(), self.items.len());
                self.items.push(item);
                None
            }
        }
    }

    pub fn into_items(self) -> Vec<NormalizedItem> {
        self.items
    }
}

/// Collapse raw history records into one item per import path.
pub fn normalize(records: &[HistoryRecord]) -> Vec<NormalizedItem> {
    let mut index = PathIndex::new();
    for record in records {
        let Some(path) = record.imported_path() else {
            continue;
        };
        let item = NormalizedItem {
            path: path.to_string(),
            title: extract_title(path),
            added_date: to_local_timestamp(&record.date),
            movie_id: record.movie_id,
        };
        if let Some(previous) = index.insert(item) {
            tracing::trace!(path, replaced = %previous.added_date, "duplicate import path");
        }
    }
    let items = index.into_items();
    tracing::debug!(records = records.len(), items = items.len(), "normalized history");
    items
}

/// Display title from an import path: `Name (Year).ext` gives `Name`,
/// anything else gives the file name up to its first `.`.
pub fn extract_title(path: &str) -> String {
    let file_name = path.rsplit(['/', '\\']).next().unwrap_or_default();

    let title = match TITLE_YEAR.as_ref().and_then(|re| re.captures(file_name)) {
        Some(caps) => caps.get(1).map_or("", |m| m.as_str()),
        None => file_name.split('.').next().unwrap_or_default(),
    };

    if title.trim().is_empty() {
        UNKNOWN_TITLE.to_string()
    } else {
        title.to_string()
    }
}

/// Render an RFC 3339 history date as a naive `YYYY-MM-DD HH:MM:SS` in the
/// offset it was reported in. Unparseable dates are returned unchanged.
pub fn to_local_timestamp(date: &str) -> String {
    match DateTime::parse_from_rfc3339(date) {
        Ok(dt) => dt.naive_local().format(TIMESTAMP_FORMAT).to_string(),
        Err(e) => {
            tracing::debug!(date, "unparseable history date: {e}");
            date.to_string()
        }
    }
}
