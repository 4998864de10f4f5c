//! HTTP implementation of the publisher API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CACHE_CONTROL, CONTENT_TYPE};
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::{
    article_envelope, comment_envelope, ApiResponse, ClientError, PublisherApi,
    ARTICLES_ENDPOINT, COMMENTS_ENDPOINT,
};
use crate::config::ImportConfig;
use crate::models::DataEnvelope;

/// Connection settings for [`ModeratorClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct ModeratorClientConfig {
    /// Base URL; endpoint paths are appended verbatim
    pub base_url: String,

    /// Authorization header value
    pub auth: String,

    /// Request timeout (None = reqwest default)
    pub timeout: Option<Duration>,
}

impl From<&ImportConfig> for ModeratorClientConfig {
    fn from(config: &ImportConfig) -> Self {
        Self {
            base_url: config.api_url.clone(),
            auth: config.auth.clone(),
            timeout: config.timeout,
        }
    }
}

/// Publisher API client over HTTP.
pub struct ModeratorClient {
    client: Client,
    base_url: String,
    auth: String,
}

impl ModeratorClient {
    /// Create a client. Every request carries the JSON content type, the
    /// configured authorization value and `cache-control: no-cache`.
    ///
    /// The authorization value is attached per request, so one that is not
    /// a valid header value fails each call as a `Transport` error.
    pub fn new(config: ModeratorClientConfig) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ClientError::Build)?;

        Ok(Self {
            client,
            base_url: config.base_url,
            auth: config.auth,
        })
    }

    /// Full URL for an endpoint path.
    fn url_for(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// POST an envelope and decode the JSON answer.
    ///
    /// A non-200 status is logged but still decoded. Failing to reach the
    /// server is a `Transport` error; a body that is not JSON is `Decode`.
    async fn post<T: Serialize>(
        &self,
        endpoint: &'static str,
        envelope: &DataEnvelope<T>,
    ) -> Result<ApiResponse, ClientError> {
        let url = self.url_for(endpoint);
        let payload = serde_json::to_string(envelope)?;

        debug!("POST {} {}", url, payload);

        let transport = |e: reqwest::Error| ClientError::Transport {
            endpoint,
            message: e.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, self.auth.as_str())
            .body(payload)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status().as_u16();
        if status != 200 {
            warn!("Received non-200 response from {}: {}", endpoint, status);
        }

        let bytes = response.bytes().await.map_err(transport)?;
        let body: serde_json::Value =
            serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode {
                endpoint,
                status,
                message: e.to_string(),
            })?;

        info!("Response: {}", body);

        Ok(ApiResponse { status, body })
    }
}

#[async_trait]
impl PublisherApi for ModeratorClient {
    fn name(&self) -> &'static str {
        "moderator"
    }

    async fn create_article(
        &self,
        source_id: &str,
        title: &str,
        text: &str,
        url: &str,
        category: &str,
    ) -> Result<ApiResponse, ClientError> {
        let envelope = article_envelope(source_id, title, text, url, category);

        info!("Adding article {}", source_id);
        self.post(ARTICLES_ENDPOINT, &envelope).await
    }

    async fn create_comment(
        &self,
        review_id: &str,
        article_id: &str,
        text: &str,
        author_location: &str,
        author_name: &str,
    ) -> Result<ApiResponse, ClientError> {
        let envelope = comment_envelope(review_id, article_id, text, author_location, author_name);

        info!("Adding comment {} to product {}", review_id, article_id);
        self.post(COMMENTS_ENDPOINT, &envelope).await
    }
}
