//! HTTP implementation of [`TaskService`] on top of `reqwest`.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::TaskService;
use crate::error::{Result, TrackerError};
use crate::model::{NewTask, StatusUpdate, Task, TaskStatus};
use crate::storage::config::Settings;

/// TaskService reached over HTTP at `{backend.url}{backend.api_prefix}`.
#[derive(Debug, Clone)]
pub struct HttpTaskService {
    client: Client,
    api_base: Url,
}

impl HttpTaskService {
    /// Build a client from the startup settings.
    pub fn new(settings: &Settings) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            api_base: settings.api_base.clone(),
        })
    }

    /// Append path segments to the API base, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| TrackerError::config(format!("cannot append path to {}", self.api_base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl TaskService for HttpTaskService {
    async fn list_tasks(&self) -> Result<Vec<Task>> {
        let url = self.endpoint(&["tasks"])?;
        debug!(%url, "GET tasks");
        let response = self.client.get(url).send().await?;
        decode(response).await
    }

    async fn create_task(&self, title: &str) -> Result<Task> {
        let url = self.endpoint(&["tasks"])?;
        debug!(%url, "POST task");
        let body = NewTask {
            title: title.to_string(),
        };
        let response = self.client.post(url).json(&body).send().await?;
        decode(response).await
    }

    async fn update_status(&self, id: &str, status: TaskStatus) -> Result<Task> {
        let url = self.endpoint(&["tasks", id])?;
        debug!(%url, status = status.as_str(), "PUT task status");
        let response = self
            .client
            .put(url)
            .json(&StatusUpdate { status })
            .send()
            .await?;
        decode(response).await
    }
}

/// Turn a response into `T`, or into [`TrackerError::Api`] for non-2xx statuses.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let detail = error_detail(&body)
            .or_else(|| status.canonical_reason().map(str::to_string))
            .unwrap_or_default();
        return Err(TrackerError::api(status.as_u16(), detail));
    }
    Ok(response.json::<T>().await?)
}

/// Extract a readable message from an error body.
///
/// The backend answers errors as `{"detail": ...}`; anything else is returned trimmed.
fn error_detail(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => match map.get("detail") {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
            None => Some(body.to_string()),
        },
        _ => Some(body.to_string()),
    }
}
