//! Configuration loading and validation.
//!
//! All settings come from environment variables and are read once at
//! startup into an [`ImportConfig`] that is handed to the client and the
//! importer.

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use crate::models::DatasetTable;

pub const ENV_AUTH: &str = "MODERATOR_AUTH";
pub const ENV_API: &str = "MODERATOR_API";
pub const ENV_DATA_DIR: &str = "MODERATOR_DATA_DIR";
pub const ENV_DATASETS_FILE: &str = "MODERATOR_DATASETS_FILE";
pub const ENV_SOURCE: &str = "MODERATOR_SOURCE";
pub const ENV_ARTICLE_URL: &str = "MODERATOR_ARTICLE_URL";
pub const ENV_AUTHOR_NAME: &str = "MODERATOR_AUTHOR_NAME";
pub const ENV_TIMEOUT_SECS: &str = "MODERATOR_TIMEOUT_SECS";
pub const ENV_DRY_RUN: &str = "MODERATOR_DRY_RUN";
pub const ENV_LOG_FORMAT: &str = "MODERATOR_LOG_FORMAT";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read dataset file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse dataset file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

fn default_api_url() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_article_url() -> String {
    "https://jigsaw.google.com/".to_string()
}

fn default_author_name() -> String {
    "Lucas Dixon".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Importer configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportConfig {
    /// Publisher API base URL, used verbatim as a prefix
    pub api_url: String,

    /// Authorization header value; empty when unset
    pub auth: String,

    /// Directory that relative CSV paths resolve against
    pub data_dir: PathBuf,

    /// TOML file replacing the built-in dataset table
    pub datasets_file: Option<PathBuf>,

    /// Datasets to import; empty means all
    pub sources: Vec<String>,

    /// Value of every article's `url` field
    pub article_url: String,

    /// Display name of every comment author
    pub author_name: String,

    /// Per-request timeout (None = HTTP client default)
    pub timeout: Option<Duration>,

    /// Log payloads instead of sending them
    pub dry_run: bool,

    /// Emit logs as JSON lines
    pub json_logs: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            auth: String::new(),
            data_dir: default_data_dir(),
            datasets_file: None,
            sources: Vec::new(),
            article_url: default_article_url(),
            author_name: default_author_name(),
            timeout: None,
            dry_run: false,
            json_logs: false,
        }
    }
}

impl ImportConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(auth) = lookup(ENV_AUTH) {
            config.auth = auth;
        }
        if let Some(api) = lookup(ENV_API) {
            config.api_url = api;
        }
        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|s| !s.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        config.datasets_file = lookup(ENV_DATASETS_FILE)
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);
        if let Some(source) = lookup(ENV_SOURCE) {
            config.sources = parse_sources(&source);
        }
        if let Some(url) = lookup(ENV_ARTICLE_URL) {
            config.article_url = url;
        }
        if let Some(name) = lookup(ENV_AUTHOR_NAME) {
            config.author_name = name;
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS).filter(|s| !s.trim().is_empty()) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                ConfigError::ValidationError(format!(
                    "{} must be a whole number of seconds, got {:?}",
                    ENV_TIMEOUT_SECS, secs
                ))
            })?;
            config.timeout = Some(Duration::from_secs(secs));
        }
        if let Some(flag) = lookup(ENV_DRY_RUN) {
            config.dry_run = parse_flag(&flag);
        }
        if let Some(format) = lookup(ENV_LOG_FORMAT) {
            config.json_logs = format.trim().eq_ignore_ascii_case("json");
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout == Some(Duration::ZERO) {
            return Err(ConfigError::ValidationError(format!(
                "{} must be greater than 0",
                ENV_TIMEOUT_SECS
            )));
        }

        Ok(())
    }

    /// The dataset table: the configured TOML file, or the built-in one.
    pub fn load_datasets(&self) -> Result<DatasetTable, ConfigError> {
        match &self.datasets_file {
            Some(path) => load_dataset_file(path),
            None => Ok(DatasetTable::default()),
        }
    }
}

/// Read and parse a `[[datasets]]` TOML file.
pub fn load_dataset_file(path: &Path) -> Result<DatasetTable, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    let table = DatasetTable::from_toml_str(&contents)?;
    if table.is_empty() {
        return Err(ConfigError::ValidationError(format!(
            "dataset file {} defines no datasets",
            path.display()
        )));
    }
    Ok(table)
}

/// Split a comma-separated dataset list; `all` selects everything.
fn parse_sources(s: &str) -> Vec<String> {
    let names: Vec<String> = s
        .split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect();

    if names.iter().any(|n| n.eq_ignore_ascii_case("all")) {
        Vec::new()
    } else {
        names
    }
}

fn parse_flag(s: &str) -> bool {
    matches!(
        s.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ImportConfig::default();

        assert_eq!(config.api_url, "127.0.0.1:8080");
        assert_eq!(config.auth, "");
        assert_eq!(config.data_dir, PathBuf::from("."));
        assert_eq!(config.article_url, "https://jigsaw.google.com/");
        assert_eq!(config.author_name, "Lucas Dixon");
        assert!(config.sources.is_empty());
        assert!(config.timeout.is_none());
        assert!(!config.dry_run);
        assert!(!config.json_logs);
    }

    #[test]
    fn test_empty_environment_gives_defaults() {
        let config = ImportConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, ImportConfig::default());
    }

    #[test]
    fn test_unset_auth_is_empty_string() {
        let config =
            ImportConfig::from_lookup(lookup_from(&[(ENV_API, "http://mod:8080")])).unwrap();
        assert_eq!(config.auth, "");
        assert_eq!(config.api_url, "http://mod:8080");
    }

    #[test]
    fn test_from_lookup_reads_all_variables() {
        let config = ImportConfig::from_lookup(lookup_from(&[
            (ENV_AUTH, "JWT abc"),
            (ENV_API, "http://localhost:3000"),
            (ENV_DATA_DIR, "/srv/data"),
            (ENV_DATASETS_FILE, "/srv/datasets.toml"),
            (ENV_SOURCE, "brexit, climate"),
            (ENV_ARTICLE_URL, "https://example.com/"),
            (ENV_AUTHOR_NAME, "Test Author"),
            (ENV_TIMEOUT_SECS, "15"),
            (ENV_DRY_RUN, "true"),
            (ENV_LOG_FORMAT, "JSON"),
        ]))
        .unwrap();

        assert_eq!(config.auth, "JWT abc");
        assert_eq!(config.api_url, "http://localhost:3000");
        assert_eq!(config.data_dir, PathBuf::from("/srv/data"));
        assert_eq!(
            config.datasets_file,
            Some(PathBuf::from("/srv/datasets.toml"))
        );
        assert_eq!(config.sources, vec!["brexit", "climate"]);
        assert_eq!(config.article_url, "https://example.com/");
        assert_eq!(config.author_name, "Test Author");
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
        assert!(config.dry_run);
        assert!(config.json_logs);
    }

    #[test]
    fn test_source_all_selects_everything() {
        assert!(parse_sources("all").is_empty());
        assert!(parse_sources("ALL").is_empty());
        assert!(parse_sources("brexit,all").is_empty());
        assert!(parse_sources(" , ").is_empty());
        assert_eq!(parse_sources("wikipedia"), vec!["wikipedia"]);
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("1"));
        assert!(parse_flag("TRUE"));
        assert!(parse_flag(" yes "));
        assert!(!parse_flag("0"));
        assert!(!parse_flag(""));
        assert!(!parse_flag("nope"));
    }

    #[test]
    fn test_bad_timeout_rejected() {
        let result = ImportConfig::from_lookup(lookup_from(&[(ENV_TIMEOUT_SECS, "soon")]));
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = ImportConfig::from_lookup(lookup_from(&[(ENV_TIMEOUT_SECS, "0")]));
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_load_builtin_datasets() {
        let config = ImportConfig::default();
        let table = config.load_datasets().unwrap();
        assert_eq!(table, DatasetTable::default());
    }

    #[test]
    fn test_load_datasets_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("datasets.toml");
        std::fs::write(
            &path,
            r#"
[[datasets]]
name = "movies"
path = "movies.csv"
article_id = "900"
title = "Movie reviews"
summary = "Thoughts about films."
category = "Movies"
"#,
        )
        .unwrap();

        let config = ImportConfig {
            datasets_file: Some(path),
            ..Default::default()
        };
        let table = config.load_datasets().unwrap();
        assert_eq!(table.names(), vec!["movies"]);
    }

    #[test]
    fn test_load_datasets_missing_file() {
        let config = ImportConfig {
            datasets_file: Some(PathBuf::from("/nonexistent/datasets.toml")),
            ..Default::default()
        };
        assert!(matches!(
            config.load_datasets(),
            Err(ConfigError::ReadError(_))
        ));
    }

    #[test]
    fn test_load_datasets_empty_file_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("datasets.toml");
        std::fs::write(&path, "").unwrap();

        assert!(matches!(
            load_dataset_file(&path),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_load_datasets_bad_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("datasets.toml");
        std::fs::write(&path, "[[datasets]\nname = ").unwrap();

        assert!(matches!(
            load_dataset_file(&path),
            Err(ConfigError::ParseError(_))
        ));
    }
}
