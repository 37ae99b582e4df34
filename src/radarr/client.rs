use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::{ApiError, RadarrApi};
use crate::config::RadarrConfig;
use crate::model::history::HistoryPage;
use crate::model::movie::Movie;

pub struct RadarrClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl RadarrClient {
    pub fn new(config: &RadarrConfig, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/v3/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn execute(
        &self,
        method: &'static str,
        url: &str,
        request: RequestBuilder,
    ) -> Result<Response, ApiError> {
        tracing::debug!(method, url, "radarr request");
        let resp = request
            .header("X-Api-Key", &self.api_key)
            .send()
            .await
            .map_err(|e| ApiError::Transport {
                method,
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                method,
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp)
    }
}

async fn decode<T: DeserializeOwned>(
    method: &'static str,
    url: &str,
    resp: Response,
) -> Result<T, ApiError> {
    let body = resp.text().await.map_err(|e| ApiError::Transport {
        method,
        url: url.to_string(),
        message: e.to_string(),
    })?;
    serde_json::from_str(&body).map_err(|e| ApiError::Decode {
        url: url.to_string(),
        message: e.to_string(),
        body,
    })
}

#[async_trait]
impl RadarrApi for RadarrClient {
    async fn history_page(&self, page: u32, page_size: u32) -> Result<HistoryPage, ApiError> {
        let url = self.url("history");
        let request = self
            .client
            .get(&url)
            .query(&[("page", page), ("pageSize", page_size)]);
        let resp = self.execute("GET", &url, request).await?;
        decode("GET", &url, resp).await
    }

    async fn get_movie(&self, movie_id: i64) -> Result<Movie, ApiError> {
        let url = self.url(&format!("movie/{movie_id}"));
        let resp = self.execute("GET", &url, self.client.get(&url)).await?;
        decode("GET", &url, resp).await
    }

    async fn put_movie(&self, movie_id: i64, movie: &Movie) -> Result<(), ApiError> {
        let url = self.url(&format!("movie/{movie_id}"));
        let request = self
            .client
            .put(&url)
            .header("Content-Type", "application/json")
            .json(movie);
        self.execute("PUT", &url, request).await?;
        Ok(())
    }

    async fn delete_movie_file(&self, movie_file_id: i64) -> Result<(), ApiError> {
        let url = self.url(&format!("moviefile/{movie_file_id}"));
        self.execute("DELETE", &url, self.client.delete(&url)).await?;
        Ok(())
    }
}
