//! HTTP implementation of [`ProgressSink`] against the API server.

use reelhub_core::types::DbId;
use serde::Deserialize;

use crate::sink::{ProgressSink, SinkError};

/// Talks to the `/api/videos/watched` and `/api/videos/incviews`
/// endpoints. The underlying client carries a cookie store so the `jwt`
/// session cookie set at login is replayed automatically.
pub struct HttpProgressSink {
    client: reqwest::Client,
    base_url: String,
}

/// Body of `GET /api/videos/watched/{videoId}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WatchedTimeResponse {
    watched_time: f64,
}

impl HttpProgressSink {
    /// Create a sink targeting an API server.
    ///
    /// * `base_url` - server root, e.g. `http://localhost:3000`.
    pub fn new(base_url: String) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self { client, base_url })
    }

    /// Create a sink reusing an existing [`reqwest::Client`] (it must
    /// have a cookie store holding a valid session).
    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, SinkError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SinkError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait::async_trait]
impl ProgressSink for HttpProgressSink {
    async fn load_watched_time(&self, video_id: DbId) -> Result<f64, SinkError> {
        let response = self
            .client
            .get(format!("{}/api/videos/watched/{video_id}", self.base_url))
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        let body = response.json::<WatchedTimeResponse>().await?;
        Ok(body.watched_time)
    }

    async fn save_watched_time(
        &self,
        video_id: DbId,
        watched_time: f64,
    ) -> Result<(), SinkError> {
        let body = serde_json::json!({
            "videoId": video_id,
            "watchedTime": watched_time,
        });
        let response = self
            .client
            .post(format!("{}/api/videos/watched", self.base_url))
            .json(&body)
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn increment_views(&self, video_id: DbId) -> Result<(), SinkError> {
        let response = self
            .client
            .post(format!("{}/api/videos/incviews/{video_id}", self.base_url))
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }
}
