/// A unique-by-path import, derived from one or more history records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedItem {
    pub path: String,
    pub title: String,
    /// Naive `YYYY-MM-DD HH:MM:SS`, or the raw history date when it could not be parsed.
    pub added_date: String,
    pub movie_id: Option<i64>,
}
