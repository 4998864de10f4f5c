//! Per-call outcomes and run summaries.

use serde::{Deserialize, Serialize};

/// Upper bound on comment ids kept per dataset; counts stay exact.
pub const MAX_FAILED_IDS: usize = 100;

/// What happened to a single create call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CallOutcome {
    /// Server answered 200
    Created,
    /// Server answered with another status
    Rejected { status: u16 },
    /// Request never completed
    Failed { reason: String },
}

impl CallOutcome {
    pub fn is_created(&self) -> bool {
        matches!(self, CallOutcome::Created)
    }
}

/// Outcome of importing one dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetReport {
    pub name: String,
    pub article: CallOutcome,
    pub comments_created: usize,
    pub comments_rejected: usize,
    pub comments_failed: usize,
    /// First comment ids whose call was rejected or failed, at most
    /// [`MAX_FAILED_IDS`]
    pub failed_ids: Vec<String>,
}

impl DatasetReport {
    pub fn new(name: impl Into<String>, article: CallOutcome) -> Self {
        Self {
            name: name.into(),
            article,
            comments_created: 0,
            comments_rejected: 0,
            comments_failed: 0,
            failed_ids: Vec::new(),
        }
    }

    /// Fold in the outcome of one comment call.
    pub fn record_comment(&mut self, comment_id: &str, outcome: &CallOutcome) {
        match outcome {
            CallOutcome::Created => self.comments_created += 1,
            CallOutcome::Rejected { .. } => {
                self.comments_rejected += 1;
                self.note_failure(comment_id);
            }
            CallOutcome::Failed { .. } => {
                self.comments_failed += 1;
                self.note_failure(comment_id);
            }
        }
    }

    fn note_failure(&mut self, comment_id: &str) {
        if self.failed_ids.len() < MAX_FAILED_IDS {
            self.failed_ids.push(comment_id.to_string());
        }
    }

    /// Number of comment calls attempted.
    pub fn comments_sent(&self) -> usize {
        self.comments_created + self.comments_rejected + self.comments_failed
    }
}

/// Outcome of a whole run, datasets in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    pub datasets: Vec<DatasetReport>,
}

impl ImportReport {
    pub fn comments_sent(&self) -> usize {
        self.datasets.iter().map(|d| d.comments_sent()).sum()
    }

    pub fn comments_created(&self) -> usize {
        self.datasets.iter().map(|d| d.comments_created).sum()
    }

    /// Whether every article and comment call returned 200.
    pub fn all_created(&self) -> bool {
        self.datasets
            .iter()
            .all(|d| d.article.is_created() && d.comments_sent() == d.comments_created)
    }
}
