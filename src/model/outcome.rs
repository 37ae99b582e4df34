use std::fmt;

/// Terminal state of one normalized item for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    AgeUnknown,
    NotAged { age_days: i64 },
    UnmonitorFailed { age_days: i64, reason: String },
    DeleteFailed { age_days: i64, reason: String },
    Deleted { age_days: i64, movie_file_id: i64 },
    NoFileFound { age_days: i64 },
}

impl ItemOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemOutcome::AgeUnknown => "age_unknown",
            ItemOutcome::NotAged { .. } => "not_aged",
            ItemOutcome::UnmonitorFailed { .. } => "unmonitor_failed",
            ItemOutcome::DeleteFailed { .. } => "delete_failed",
            ItemOutcome::Deleted { .. } => "deleted",
            ItemOutcome::NoFileFound { .. } => "no_file_found",
        }
    }

    /// Whether the item crossed the age threshold, regardless of what happened next.
    pub fn is_aged(&self) -> bool {
        !matches!(self, ItemOutcome::AgeUnknown | ItemOutcome::NotAged { .. })
    }

    /// Whether the monitored flag was cleared on the server.
    pub fn is_unmonitored(&self) -> bool {
        matches!(
            self,
            ItemOutcome::DeleteFailed { .. }
                | ItemOutcome::Deleted { .. }
                | ItemOutcome::NoFileFound { .. }
        )
    }

    /// Why a failed item failed, for the run summary.
    pub fn reason(&self) -> Option<&str> {
        match self {
            ItemOutcome::UnmonitorFailed { reason, .. } | ItemOutcome::DeleteFailed { reason, .. } => {
                Some(reason)
            }
            _ => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            ItemOutcome::UnmonitorFailed { .. } | ItemOutcome::DeleteFailed { .. }
        )
    }
}

impl fmt::Display for ItemOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
