//! Dataset descriptors: one CSV file plus the article its comments attach to.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One unit of import work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetDescriptor {
    /// Short name, used as the comment id prefix
    pub name: String,

    /// CSV file, relative paths resolve against the data directory
    pub path: PathBuf,

    /// Source id of the parent article
    pub article_id: String,

    /// Article title
    pub title: String,

    /// Article body text
    pub summary: String,

    /// Category the article is filed under
    pub category: String,
}

impl DatasetDescriptor {
    pub fn new(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        article_id: impl Into<String>,
        title: impl Into<String>,
        summary: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            article_id: article_id.into(),
            title: title.into(),
            summary: summary.into(),
            category: category.into(),
        }
    }

    /// Location of the CSV file given the configured data directory.
    pub fn resolve_path(&self, data_dir: &Path) -> PathBuf {
        if self.path.is_absolute() {
            self.path.clone()
        } else {
            data_dir.join(&self.path)
        }
    }
}

/// Ordered dataset table, as stored in a `[[datasets]]` TOML file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetTable {
    #[serde(default)]
    pub datasets: Vec<DatasetDescriptor>,
}

impl DatasetTable {
    /// Parse a table from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Names of all datasets, in table order.
    pub fn names(&self) -> Vec<&str> {
        self.datasets.iter().map(|d| d.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&DatasetDescriptor> {
        self.datasets.iter().find(|d| d.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }
}

impl Default for DatasetTable {
    /// The built-in review datasets.
    fn default() -> Self {
        Self {
            datasets: vec![
                DatasetDescriptor::new(
                    "wikipedia",
                    "wikipedia.csv",
                    "787",
                    "Wikipedia 1/9/17",
                    "Some comments from Wikipedia.",
                    "Wikipedia",
                ),
                DatasetDescriptor::new(
                    "brexit",
                    "brexit.csv",
                    "123",
                    "Brexit 9/1/2017",
                    "Some thoughts about brexit...",
                    "Brexit",
                ),
                DatasetDescriptor::new(
                    "climate",
                    "climate.csv",
                    "456",
                    "Climate Change 3/10/18",
                    "Some thoughts about climate change...",
                    "Climate Change",
                ),
                DatasetDescriptor::new(
                    "election",
                    "election.csv",
                    "789",
                    "US Election 10/20/17",
                    "Some thoughts about the US election...",
                    "US Election",
                ),
            ],
        }
    }
}
