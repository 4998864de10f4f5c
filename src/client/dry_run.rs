//! Publisher that logs payloads instead of sending them.

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use super::{
    article_envelope, comment_envelope, ApiResponse, ClientError, PublisherApi,
    ARTICLES_ENDPOINT, COMMENTS_ENDPOINT,
};

/// Dry-run publisher. Every call succeeds without touching the network.
#[derive(Debug, Default, Clone)]
pub struct DryRunPublisher;

impl DryRunPublisher {
    pub fn new() -> Self {
        Self
    }

    fn accepted() -> ApiResponse {
        ApiResponse {
            status: 200,
            body: json!({ "dryRun": true }),
        }
    }
}

#[async_trait]
impl PublisherApi for DryRunPublisher {
    fn name(&self) -> &'static str {
        "dry-run"
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
        info!(
            "[dry run] POST {} {}",
            ARTICLES_ENDPOINT,
            serde_json::to_string(&envelope)?
        );
        Ok(Self::accepted())
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
        info!(
            "[dry run] POST {} {}",
            COMMENTS_ENDPOINT,
            serde_json::to_string(&envelope)?
        );
        Ok(Self::accepted())
    }
}
