//! Import driver.
//!
//! For each dataset, in table order:
//! 1. Create the parent article
//! 2. Stream the CSV, skipping row 0 as the header
//! 3. Create one comment per remaining row, text taken from field 0
//!
//! A call that never reaches the server is logged and the run carries on.
//! A missing CSV file, an empty row or a non-JSON response aborts the run.

mod report;
mod rows;

pub use report::*;
pub use rows::{CsvRows, Row};

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::client::{ApiResponse, ClientError, PublisherApi};
use crate::config::ImportConfig;
use crate::models::{CommentId, DatasetDescriptor, DatasetTable};

/// Location attached to every imported comment author.
pub const AUTHOR_LOCATION: &str = "USA";

/// Errors that stop an import run.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to read {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Row {row} of dataset '{dataset}' has no fields")]
    EmptyRow { dataset: String, row: usize },

    #[error("Unknown dataset '{name}' (known: {known})")]
    UnknownDataset { name: String, known: String },

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Settings for an import run.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOptions {
    /// Directory that relative CSV paths resolve against
    pub data_dir: PathBuf,

    /// Article `url` field
    pub article_url: String,

    /// Comment author display name
    pub author_name: String,

    /// Comment author location
    pub author_location: String,

    /// Datasets to import; empty means all
    pub only: Vec<String>,
}

impl Default for ImportOptions {
    fn default() -> Self {
        ImportOptions::from(&ImportConfig::default())
    }
}

impl From<&ImportConfig> for ImportOptions {
    fn from(config: &ImportConfig) -> Self {
        Self {
            data_dir: config.data_dir.clone(),
            article_url: config.article_url.clone(),
            author_name: config.author_name.clone(),
            author_location: AUTHOR_LOCATION.to_string(),
            only: config.sources.clone(),
        }
    }
}

/// Drives a [`PublisherApi`] over a dataset table.
pub struct Importer {
    api: Arc<dyn PublisherApi>,
    options: ImportOptions,
}

impl Importer {
    pub fn new(api: Arc<dyn PublisherApi>, options: ImportOptions) -> Self {
        Self { api, options }
    }

    /// Datasets this run will import, in table order.
    pub fn select<'a>(
        &self,
        table: &'a DatasetTable,
    ) -> Result<Vec<&'a DatasetDescriptor>, ImportError> {
        if self.options.only.is_empty() {
            return Ok(table.datasets.iter().collect());
        }

        if let Some(unknown) = self
            .options
            .only
            .iter()
            .find(|name| table.get(name).is_none())
        {
            return Err(ImportError::UnknownDataset {
                name: unknown.clone(),
                known: table.names().join(", "),
            });
        }

        Ok(table
            .datasets
            .iter()
            .filter(|d| self.options.only.contains(&d.name))
            .collect())
    }

    /// Import every selected dataset in order.
    pub async fn run(&self, table: &DatasetTable) -> Result<ImportReport, ImportError> {
        let selected = self.select(table)?;
        info!(
            "Importing {} dataset(s) via {} publisher",
            selected.len(),
            self.api.name()
        );

        let mut report = ImportReport::default();
        for dataset in selected {
            report.datasets.push(self.import_dataset(dataset).await?);
        }

        Ok(report)
    }

    /// Create the dataset's article, then one comment per data row.
    pub async fn import_dataset(
        &self,
        dataset: &DatasetDescriptor,
    ) -> Result<DatasetReport, ImportError> {
        info!("Loading data for {}", dataset.title);

        let article = settle(
            self.api
                .create_article(
                    &dataset.article_id,
                    &dataset.title,
                    &dataset.summary,
                    &self.options.article_url,
                    &dataset.category,
                )
                .await,
        )?;
        let mut report = DatasetReport::new(&dataset.name, article);

        let path = dataset.resolve_path(&self.options.data_dir);
        let rows = CsvRows::from_path(&path).map_err(|source| ImportError::Csv {
            path: path.clone(),
            source,
        })?;

        for (row, parsed) in rows.enumerate() {
            let parsed = parsed.map_err(|source| ImportError::Csv {
                path: path.clone(),
                source,
            })?;

            // header
            if row == 0 {
                continue;
            }

            let text = match &parsed {
                Row::Record(record) => record.get(0),
                Row::Blank => None,
            }
            .ok_or_else(|| ImportError::EmptyRow {
                dataset: dataset.name.clone(),
                row,
            })?;
            let comment_id = CommentId::new(&dataset.name, row);

            let outcome = settle(
                self.api
                    .create_comment(
                        comment_id.as_str(),
                        &dataset.article_id,
                        text,
                        &self.options.author_location,
                        &self.options.author_name,
                    )
                    .await,
            )?;
            report.record_comment(comment_id.as_str(), &outcome);
        }

        debug!(
            "Finished {}: {} comment(s) sent, {} created",
            dataset.name,
            report.comments_sent(),
            report.comments_created
        );

        Ok(report)
    }
}

/// Turn a call result into an outcome, keeping only fatal errors as errors.
fn settle(result: Result<ApiResponse, ClientError>) -> Result<CallOutcome, ImportError> {
    match result {
        Ok(response) if response.is_success() => Ok(CallOutcome::Created),
        Ok(response) => Ok(CallOutcome::Rejected {
            status: response.status,
        }),
        Err(e) if e.is_recoverable() => {
            error!("{}", e);
            Ok(CallOutcome::Failed {
                reason: e.to_string(),
            })
        }
        Err(e) => {
            warn!("Aborting import: {}", e);
            Err(e.into())
        }
    }
}
