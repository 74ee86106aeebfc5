//! REST Command Wrappers
//!
//! Frontend bindings to the backend REST API, organized by domain.

mod modules;
mod test_cases;

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::AppConfig;
use module_hierarchy::StoreError;

/// HTTP client for the module/test-case API
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    config: AppConfig,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: Client::new(),
            config: config.clone(),
        }
    }

    /// GET a JSON body
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, StoreError> {
        let url = self.config.endpoint(path);
        debug!(%url, "GET");
        let response = self.client.get(&url).send().await.map_err(transport)?;
        Self::json(Self::check(response).await?).await
    }

    /// POST a JSON body, expecting a JSON body back
    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<T, StoreError> {
        let url = self.config.endpoint(path);
        debug!(%url, "POST");
        let response = self.client.post(&url).json(body).send().await.map_err(transport)?;
        Self::json(Self::check(response).await?).await
    }

    /// POST a JSON body, ignoring whatever comes back
    async fn post_discard<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), StoreError> {
        let url = self.config.endpoint(path);
        debug!(%url, "POST");
        let response = self.client.post(&url).json(body).send().await.map_err(transport)?;
        Self::check(response).await.map(|_| ())
    }

    /// Turn non-success statuses into `StoreError::Rejected`
    async fn check(response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(StoreError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    async fn json<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
        response
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))
    }
}

fn transport(e: reqwest::Error) -> StoreError {
    StoreError::Transport(e.to_string())
}
