//! Publisher API request bodies.
//!
//! Every request wraps a single record in a `{"data": [...]}` envelope.
//! Field names follow the platform's camelCase wire format.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Placeholder email attached to every imported comment author.
pub const AUTHOR_EMAIL: &str = "person@email.com";

/// Placeholder avatar attached to every imported comment author.
pub const AUTHOR_AVATAR_URL: &str = "www.purple.com";

/// Author source id shared by every imported comment.
pub const AUTHOR_SOURCE_ID: &str = "4";

/// Local wall-clock time with microseconds, e.g. `2018-03-10 14:05:09.000000`.
pub fn format_created_at(at: DateTime<Local>) -> String {
    at.format("%Y-%m-%d %H:%M:%S%.6f").to_string()
}

/// Request envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    pub data: Vec<T>,
}

impl<T> DataEnvelope<T> {
    /// Wrap a single record.
    pub fn single(record: T) -> Self {
        Self { data: vec![record] }
    }
}

/// Article record for `POST /publisher/articles`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRecord {
    pub source_id: String,
    pub category_id: String,
    pub title: String,
    pub created_at: String,
    pub text: String,
    pub url: String,
}

/// Comment author block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub email: String,
    pub location: String,
    pub name: String,
    #[serde(rename = "avatarURL")]
    pub avatar_url: String,
}

impl Author {
    /// Placeholder author with the given location and display name.
    pub fn placeholder(location: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: AUTHOR_EMAIL.to_string(),
            location: location.into(),
            name: name.into(),
            avatar_url: AUTHOR_AVATAR_URL.to_string(),
        }
    }
}

/// Comment record for `POST /publisher/comments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRecord {
    /// Source id of the parent article, not a platform-assigned id
    pub article_id: String,
    pub source_id: String,
    pub author_source_id: String,
    pub text: String,
    pub author: Author,
    pub created_at: String,
}
