pub mod client;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::history::HistoryPage;
use crate::model::movie::Movie;

/// Failure of a single Radarr API call.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{method} {url} failed: {message}")]
    Transport {
        method: &'static str,
        url: String,
        message: String,
    },
    #[error("{method} {url} returned HTTP {status}")]
    Status {
        method: &'static str,
        url: String,
        status: u16,
        body: String,
    },
    #[error("failed to decode response from {url}: {message}")]
    Decode {
        url: String,
        message: String,
        body: String,
    },
}

impl ApiError {
    pub fn body(&self) -> Option<&str> {
        match self {
            ApiError::Transport { .. } => None,
            ApiError::Status { body, .. } | ApiError::Decode { body, .. } => {
                Some(body.as_str()).filter(|b| !b.trim().is_empty())
            }
        }
    }

    /// Response body for logging: pretty-printed when it is JSON, raw text otherwise.
    pub fn body_details(&self) -> Option<String> {
        let body = self.body()?;
        match serde_json::from_str::<serde_json::Value>(body) {
            Ok(json) => Some(serde_json::to_string_pretty(&json).unwrap_or_else(|_| body.to_string())),
            Err(_) => Some(body.to_string()),
        }
    }
}

/// The slice of Radarr's v3 API this tool talks to.
#[async_trait]
pub trait RadarrApi: Send + Sync {
    /// `GET /api/v3/history?page=&pageSize=`, pages are 1-based.
    async fn history_page(&self, page: u32, page_size: u32) -> Result<HistoryPage, ApiError>;
    async fn get_movie(&self, movie_id: i64) -> Result<Movie, ApiError>;
    /// Full replace of the movie resource.
    async fn put_movie(&self, movie_id: i64, movie: &Movie) -> Result<(), ApiError>;
    async fn delete_movie_file(&self, movie_file_id: i64) -> Result<(), ApiError>;
}
