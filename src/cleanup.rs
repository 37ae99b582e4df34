use chrono::NaiveDateTime;

use crate::aging::{self, AgeDecision};
use crate::config::CleanupConfig;
use crate::model::item::NormalizedItem;
use crate::model::outcome::ItemOutcome;
use crate::radarr::{ApiError, RadarrApi};
use crate::report::RunReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRemoval {
    Deleted { movie_file_id: i64 },
    NoFile,
}

/// Applies the age rule to normalized items and mutates the aged ones.
pub struct Cleaner<'a> {
    api: &'a dyn RadarrApi,
    max_age_days: i64,
}

impl<'a> Cleaner<'a> {
    pub fn new(api: &'a dyn RadarrApi, config: &CleanupConfig) -> Self {
        Self {
            api,
            max_age_days: config.max_age_days,
        }
    }

    /// Read-modify-write of the full movie resource with a new `monitored` flag.
    pub async fn set_monitored(&self, movie_id: i64, monitored: bool) -> Result<(), ApiError> {
        let mut movie = self.api.get_movie(movie_id).await?;
        if movie.monitored() == Some(monitored) {
            tracing::debug!(movie_id, monitored, "monitored flag already set, updating anyway");
        }
        if !movie.set_monitored(monitored) {
            return Err(ApiError::Decode {
                url: format!("movie/{movie_id}"),
                message: "movie resource is not a JSON object".into(),
                body: movie.as_value().to_string(),
            });
        }
        self.api.put_movie(movie_id, &movie).await
    }

    /// Fetch the movie again and delete its attached file, if it has one.
    pub async fn delete_movie_file(&self, movie_id: i64) -> Result<FileRemoval, ApiError> {
        let movie = self.api.get_movie(movie_id).await?;
        let Some(movie_file_id) = movie.movie_file_id() else {
            return Ok(FileRemoval::NoFile);
        };
        self.api.delete_movie_file(movie_file_id).await?;
        tracing::info!(
            movie_id,
            movie_file_id,
            title = movie.title().unwrap_or_default(),
            "movie file deleted"
        );
        Ok(FileRemoval::Deleted { movie_file_id })
    }

    pub async fn process(&self, item: &NormalizedItem, now: NaiveDateTime) -> ItemOutcome {
        let movie_id = item.movie_id;
        let title = item.title.as_str();

        let age_days = match aging::evaluate(now, &item.added_date, self.max_age_days) {
            Ok((age, AgeDecision::Aged)) => age,
            Ok((age, AgeDecision::NotAged)) => {
                tracing::info!(
                    ?movie_id,
                    "'{title}' is not yet {} days old ({age} days), keeping monitored status",
                    self.max_age_days
                );
                return ItemOutcome::NotAged { age_days: age };
            }
            Err(e) => {
                tracing::warn!(?movie_id, added = %item.added_date, "'{title}': age calculation failed, {e}");
                return ItemOutcome::AgeUnknown;
            }
        };

        tracing::info!(
            ?movie_id,
            "'{title}' is older than {} days ({age_days} days), unmonitoring and deleting file",
            self.max_age_days
        );

        let Some(movie_id) = movie_id else {
            tracing::error!("'{title}' has no movie id in history, cannot unmonitor");
            return ItemOutcome::UnmonitorFailed {
                age_days,
                reason: "history record has no movie id".into(),
            };
        };

        if let Err(e) = self.set_monitored(movie_id, false).await {
            log_api_error(movie_id, "failed to set monitored status", &e);
            return ItemOutcome::UnmonitorFailed {
                age_days,
                reason: e.to_string(),
            };
        }

        match self.delete_movie_file(movie_id).await {
            Ok(FileRemoval::Deleted { movie_file_id }) => ItemOutcome::Deleted {
                age_days,
                movie_file_id,
            },
            Ok(FileRemoval::NoFile) => {
                tracing::warn!(movie_id, "no movie file found for '{title}'");
                ItemOutcome::NoFileFound { age_days }
            }
            Err(e) => {
                log_api_error(movie_id, "failed to delete movie file", &e);
                ItemOutcome::DeleteFailed {
                    age_days,
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Process every item in order, one at a time.
    pub async fn run(&self, items: &[NormalizedItem], now: NaiveDateTime) -> RunReport {
        let mut report = RunReport::new(self.max_age_days);
        for item in items {
            let outcome = self.process(item, now).await;
            report.record(item, outcome);
        }
        report
    }
}

fn log_api_error(movie_id: i64, what: &str, err: &ApiError) {
    tracing::error!(movie_id, "{what}: {err}");
    if let Some(details) = err.body_details() {
        tracing::error!(movie_id, "Radarr API error details:\n{details}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::movie::Movie;
    use crate::radarr::tests::MockRadarr;
    use serde_json::json;

    fn now() -> NaiveDateTime {
        NaiveDateTime::parse_from_str("2024-01-20 00:00:00", "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn config() -> CleanupConfig {
        CleanupConfig::default()
    }

    fn item(movie_id: Option<i64>, added_date: &str) -> NormalizedItem {
        NormalizedItem {
            path: "/movies/Heat (1995)/Heat (1995).mkv".into(),
            title: "Heat".into(),
            added_date: added_date.into(),
            movie_id,
        }
    }

    fn movie_with_file() -> Movie {
        Movie::from(json!({
            "id": 7,
            "title": "Heat",
            "monitored": true,
            "qualityProfileId": 1,
            "movieFile": { "id": 70, "size": 123 }
        }))
    }

    #[tokio::test]
    async fn aged_item_is_unmonitored_then_file_deleted() {
        let mock = MockRadarr::new().with_movie(7, movie_with_file());
        let cleaner = Cleaner::new(&mock, &config());

        let outcome = cleaner.process(&item(Some(7), "2024-01-01 00:00:00"), now()).await;

        assert_eq!(
            outcome,
            ItemOutcome::Deleted {
                age_days: 19,
                movie_file_id: 70
            }
        );
        assert_eq!(
            mock.calls(),
            vec!["GET movie/7", "PUT movie/7", "GET movie/7", "DELETE moviefile/70"]
        );
        let mut expected = movie_with_file().as_value().clone();
        expected["monitored"] = json!(false);
        assert_eq!(mock.movie(7).unwrap().as_value(), &expected);
    }

    #[tokio::test]
    async fn young_item_is_left_alone() {
        let mock = MockRadarr::new().with_movie(7, movie_with_file());
        let cleaner = Cleaner::new(&mock, &config());

        let outcome = cleaner.process(&item(Some(7), "2024-01-16 00:00:00"), now()).await;

        assert_eq!(outcome, ItemOutcome::NotAged { age_days: 4 });
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn bad_date_is_age_unknown() {
        let mock = MockRadarr::new().with_movie(7, movie_with_file());
        let cleaner = Cleaner::new(&mock, &config());

        let outcome = cleaner.process(&item(Some(7), "not a date"), now()).await;

        assert_eq!(outcome, ItemOutcome::AgeUnknown);
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn failed_get_skips_put_and_delete() {
        let mock = MockRadarr::new()
            .with_movie(7, movie_with_file())
            .failing_get_call(1);
        let cleaner = Cleaner::new(&mock, &config());

        let outcome = cleaner.process(&item(Some(7), "2024-01-01 00:00:00"), now()).await;

        assert!(matches!(outcome, ItemOutcome::UnmonitorFailed { age_days: 19, .. }));
        assert_eq!(mock.calls(), vec!["GET movie/7"]);
    }

    #[tokio::test]
    async fn failed_put_never_attempts_delete() {
        let mock = MockRadarr::new()
            .with_movie(7, movie_with_file())
            .failing_put();
        let cleaner = Cleaner::new(&mock, &config());

        let outcome = cleaner.process(&item(Some(7), "2024-01-01 00:00:00"), now()).await;

        match outcome {
            ItemOutcome::UnmonitorFailed { reason, .. } => assert!(reason.contains("HTTP 500")),
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(mock.calls(), vec!["GET movie/7", "PUT movie/7"]);
        assert_eq!(mock.movie(7).unwrap().monitored(), Some(true));
    }

    #[tokio::test]
    async fn missing_file_is_a_noop() {
        let mock = MockRadarr::new().with_movie(
            7,
            Movie::from(json!({"id": 7, "title": "Heat", "monitored": true, "hasFile": false})),
        );
        let cleaner = Cleaner::new(&mock, &config());

        let outcome = cleaner.process(&item(Some(7), "2024-01-01 00:00:00"), now()).await;

        assert_eq!(outcome, ItemOutcome::NoFileFound { age_days: 19 });
        assert!(!outcome.is_failure());
        assert_eq!(mock.calls(), vec!["GET movie/7", "PUT movie/7", "GET movie/7"]);
    }

    #[tokio::test]
    async fn zero_movie_file_id_is_never_deleted() {
        let mock = MockRadarr::new().with_movie(
            7,
            Movie::from(json!({"id": 7, "monitored": true, "movieFile": {"id": 0}})),
        );
        let cleaner = Cleaner::new(&mock, &config());

        let outcome = cleaner.process(&item(Some(7), "2024-01-01 00:00:00"), now()).await;

        assert_eq!(outcome, ItemOutcome::NoFileFound { age_days: 19 });
        assert!(!mock.calls().iter().any(|c| c.starts_with("DELETE")));
    }

    #[tokio::test]
    async fn second_fetch_failure_keeps_unmonitor() {
        let mock = MockRadarr::new()
            .with_movie(7, movie_with_file())
            .failing_get_call(2);
        let cleaner = Cleaner::new(&mock, &config());

        let outcome = cleaner.process(&item(Some(7), "2024-01-01 00:00:00"), now()).await;

        assert!(matches!(outcome, ItemOutcome::DeleteFailed { age_days: 19, .. }));
        assert_eq!(mock.movie(7).unwrap().monitored(), Some(false));
    }

    #[tokio::test]
    async fn delete_failure_is_reported() {
        let mock = MockRadarr::new()
            .with_movie(7, movie_with_file())
            .failing_delete();
        let cleaner = Cleaner::new(&mock, &config());

        let outcome = cleaner.process(&item(Some(7), "2024-01-01 00:00:00"), now()).await;

        assert!(matches!(outcome, ItemOutcome::DeleteFailed { .. }));
        assert!(outcome.is_unmonitored());
        assert_eq!(mock.calls().last().map(String::as_str), Some("DELETE moviefile/70"));
    }

    #[tokio::test]
    async fn aged_item_without_movie_id_makes_no_calls() {
        let mock = MockRadarr::new();
        let cleaner = Cleaner::new(&mock, &config());

        let outcome = cleaner.process(&item(None, "2024-01-01 00:00:00"), now()).await;

        assert!(matches!(outcome, ItemOutcome::UnmonitorFailed { .. }));
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn run_continues_past_failures() {
        let mock = MockRadarr::new()
            .with_movie(7, movie_with_file())
            .with_movie(8, Movie::from(json!({"id": 8, "monitored": true})));
        let cleaner = Cleaner::new(&mock, &config());
        let items = vec![
            item(Some(404), "2024-01-01 00:00:00"),
            item(Some(7), "2024-01-01 00:00:00"),
            item(Some(8), "2024-01-19 00:00:00"),
            item(Some(8), "garbage"),
        ];

        let report = cleaner.run(&items, now()).await;

        let states: Vec<_> = report.entries.iter().map(|e| e.outcome.as_str()).collect();
        assert_eq!(
            states,
            vec!["unmonitor_failed", "deleted", "not_aged", "age_unknown"]
        );
    }

    #[tokio::test]
    async fn set_monitored_rejects_non_object_resource() {
        let mock = MockRadarr::new().with_movie(3, Movie::from(json!("oops")));
        let cleaner = Cleaner::new(&mock, &config());

        let err = cleaner.set_monitored(3, false).await.unwrap_err();

        assert!(matches!(err, ApiError::Decode { .. }));
        assert_eq!(mock.calls(), vec!["GET movie/3"]);
    }
}
