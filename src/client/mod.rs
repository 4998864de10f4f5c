//! Publisher API client.
//!
//! The importer talks to the moderation platform through the
//! [`PublisherApi`] trait. [`ModeratorClient`] sends real HTTP requests;
//! [`DryRunPublisher`] only logs what would be sent.

mod dry_run;
mod http;

pub use dry_run::DryRunPublisher;
pub use http::{ModeratorClient, ModeratorClientConfig};

use async_trait::async_trait;
use chrono::Local;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{
    format_created_at, ArticleRecord, Author, CommentRecord, DataEnvelope, AUTHOR_SOURCE_ID,
};

pub const ARTICLES_ENDPOINT: &str = "/publisher/articles";
pub const COMMENTS_ENDPOINT: &str = "/publisher/comments";

/// Errors that can occur while calling the publisher API.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Error calling {endpoint}: {message}")]
    Transport {
        endpoint: &'static str,
        message: String,
    },

    #[error("Response from {endpoint} (HTTP {status}) is not JSON: {message}")]
    Decode {
        endpoint: &'static str,
        status: u16,
        message: String,
    },

    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// Whether the importer may log this error and carry on.
    ///
    /// Only failures to complete the exchange itself qualify. A server that
    /// answers with something other than JSON stops the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ClientError::Transport { .. })
    }
}

/// Decoded response from a publisher endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Trait for publisher API implementations.
#[async_trait]
pub trait PublisherApi: Send + Sync {
    /// Implementation name for logging.
    fn name(&self) -> &'static str;

    /// Create an article.
    async fn create_article(
        &self,
        source_id: &str,
        title: &str,
        text: &str,
        url: &str,
        category: &str,
    ) -> Result<ApiResponse, ClientError>;

    /// Create a comment attached to the article with source id `article_id`.
    async fn create_comment(
        &self,
        review_id: &str,
        article_id: &str,
        text: &str,
        author_location: &str,
        author_name: &str,
    ) -> Result<ApiResponse, ClientError>;
}

/// Request body for `POST /publisher/articles`, stamped with the current time.
pub fn article_envelope(
    source_id: &str,
    title: &str,
    text: &str,
    url: &str,
    category: &str,
) -> DataEnvelope<ArticleRecord> {
    DataEnvelope::single(ArticleRecord {
        source_id: source_id.to_string(),
        category_id: category.to_string(),
        title: title.to_string(),
        created_at: format_created_at(Local::now()),
        text: text.to_string(),
        url: url.to_string(),
    })
}

/// Request body for `POST /publisher/comments`, stamped with the current time.
pub fn comment_envelope(
    review_id: &str,
    article_id: &str,
    text: &str,
    author_location: &str,
    author_name: &str,
) -> DataEnvelope<CommentRecord> {
    DataEnvelope::single(CommentRecord {
        article_id: article_id.to_string(),
        source_id: review_id.to_string(),
        author_source_id: AUTHOR_SOURCE_ID.to_string(),
        text: text.to_string(),
        author: Author::placeholder(author_location, author_name),
        created_at: format_created_at(Local::now()),
    })
}
