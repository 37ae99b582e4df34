use serde::Deserialize;

/// One page of `GET /api/v3/history`.
#[derive(Debug, Deserialize, Default)]
pub struct HistoryPage {
    #[serde(default)]
    pub records: Vec<HistoryRecord>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub data: Option<HistoryData>,
    #[serde(default)]
    pub date: String,
    pub movie_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryData {
    pub imported_path: Option<String>,
}

impl HistoryRecord {
    /// The import path, if this record describes an import at all.
    pub fn imported_path(&self) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|d| d.imported_path.as_deref())
            .filter(|p| !p.is_empty())
    }
}
