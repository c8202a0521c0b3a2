//! Shared HTTP client for the SmartSwipe backend.

use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use smartswipe_core::config::ApiSettings;
use smartswipe_core::error::{FunnelError, Result};
use std::time::Duration;

/// Thin wrapper around `reqwest` carrying the base URL and bearer token.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    bearer_token: Option<String>,
    timeout: Duration,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, bearer_token: Option<String>, timeout: Duration) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            bearer_token,
            timeout,
        }
    }

    pub fn from_settings(settings: &ApiSettings) -> Self {
        Self::new(
            settings.base_url.clone(),
            settings.bearer_token.clone(),
            settings.request_timeout(),
        )
    }

    /// Sets the token sent as `Authorization: Bearer <token>`.
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let request = self.request(self.client.get(self.url(path)).query(query));
        self.send_json(path, request).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(self.client.post(self.url(path)).json(body));
        self.send_json(path, request).await
    }

    /// Sends a POST and only checks the status; the response body is ignored.
    pub async fn post_for_status<B: Serialize + ?Sized>(&self, path: &str, body: Option<&B>) -> Result<()> {
        let mut builder = self.client.post(self.url(path));
        if let Some(body) = body {
            builder = builder.json(body);
        }
        self.send(path, self.request(builder)).await.map(|_| ())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.timeout(self.timeout);
        match &self.bearer_token {
            Some(token) => builder.header("Authorization", format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn send(&self, path: &str, request: RequestBuilder) -> Result<reqwest::Response> {
        let response = request.send().await.map_err(|e| self.translate(path, e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(FunnelError::transport(format!("{} returned {}: {}", path, status, error_text)));
        }
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, path: &str, request: RequestBuilder) -> Result<T> {
        self.send(path, request)
            .await?
            .json::<T>()
            .await
            .map_err(|e| FunnelError::transport(format!("Failed to parse {} response: {}", path, e)))
    }

    fn translate(&self, path: &str, err: reqwest::Error) -> FunnelError {
        if err.is_timeout() {
            FunnelError::Timeout {
                operation: path.to_string(),
                millis: self.timeout.as_millis() as u64,
            }
        } else {
            FunnelError::transport(format!("{} request failed: {}", path, err))
        }
    }
}
