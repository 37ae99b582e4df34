use crate::model::history::HistoryRecord;
use crate::radarr::{ApiError, RadarrApi};

/// Everything the history endpoint yielded before pagination stopped.
#[derive(Debug)]
pub struct HistoryFetch {
    pub records: Vec<HistoryRecord>,
    pub pages: u32,
    /// Set when a page failed; `records` then holds only the pages before it.
    pub error: Option<ApiError>,
}

impl HistoryFetch {
    pub fn is_partial(&self) -> bool {
        self.error.is_some()
    }
}

/// Walk the history pages from page 1 until an empty page or the first failure.
pub async fn fetch_all_history(api: &dyn RadarrApi, page_size: u32) -> HistoryFetch {
    let mut records = Vec::new();
    let mut page = 1;

    loop {
        match api.history_page(page, page_size).await {
            Ok(batch) if batch.records.is_empty() => {
                return HistoryFetch {
                    records,
                    pages: page - 1,
                    error: None,
                };
            }
            Ok(batch) => {
                tracing::debug!(page, count = batch.records.len(), "fetched history page");
                records.extend(batch.records);
                page += 1;
            }
            Err(e) => {
                tracing::error!(page, "Radarr history fetch stopped: {e}");
                if let Some(details) = e.body_details() {
                    tracing::error!("Response: {details}");
                }
                return HistoryFetch {
                    records,
                    pages: page - 1,
                    error: Some(e),
                };
            }
        }
    }
}
