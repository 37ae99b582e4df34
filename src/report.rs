use std::fmt;

use crate::model::item::NormalizedItem;
use crate::model::outcome::ItemOutcome;

#[derive(Debug)]
pub struct ReportEntry {
    pub title: String,
    pub movie_id: Option<i64>,
    pub outcome: ItemOutcome,
}

/// Per-item outcomes of one cleanup run, in processing order.
#[derive(Debug, Default)]
pub struct RunReport {
    pub max_age_days: i64,
    pub entries: Vec<ReportEntry>,
}

impl RunReport {
    pub fn new(max_age_days: i64) -> Self {
        Self {
            max_age_days,
            entries: Vec::new(),
        }
    }

    pub fn record(&mut self, item: &NormalizedItem, outcome: ItemOutcome) {
        self.entries.push(ReportEntry {
            title: item.title.clone(),
            movie_id: item.movie_id,
            outcome,
        });
    }

    fn count_where(&self, pred: impl Fn(&ItemOutcome) -> bool) -> usize {
        self.entries.iter().filter(|e| pred(&e.outcome)).count()
    }

    pub fn deleted(&self) -> usize {
        self.count_where(|o| matches!(o, ItemOutcome::Deleted { .. }))
    }

    pub fn no_file_found(&self) -> usize {
        self.count_where(|o| matches!(o, ItemOutcome::NoFileFound { .. }))
    }

    pub fn unmonitor_failed(&self) -> usize {
        self.count_where(|o| matches!(o, ItemOutcome::UnmonitorFailed { .. }))
    }

    pub fn delete_failed(&self) -> usize {
        self.count_where(|o| matches!(o, ItemOutcome::DeleteFailed { .. }))
    }

    pub fn not_aged(&self) -> usize {
        self.count_where(|o| matches!(o, ItemOutcome::NotAged { .. }))
    }

    pub fn age_unknown(&self) -> usize {
        self.count_where(|o| matches!(o, ItemOutcome::AgeUnknown))
    }

    pub fn aged(&self) -> usize {
        self.count_where(ItemOutcome::is_aged)
    }

    pub fn unmonitored(&self) -> usize {
        self.count_where(ItemOutcome::is_unmonitored)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(|e| e.outcome.is_failure())
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Checked {} movies against {} days: {} aged ({} unmonitored, {} files deleted, {} without file, {} unmonitor failed, {} delete failed), {} not aged, {} with unknown age",
            self.entries.len(),
            self.max_age_days,
            self.aged(),
            self.unmonitored(),
            self.deleted(),
            self.no_file_found(),
            self.unmonitor_failed(),
            self.delete_failed(),
            self.not_aged(),
            self.age_unknown(),
        )
    }
}
