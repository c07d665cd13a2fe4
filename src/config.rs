//! Application Configuration
//! Optional JSON settings file with defaults for every field.

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fixed location of the metadata export.
pub const DATA_PATH: &str = "asset/metadata.csv";

/// Settings file looked up in the working directory.
pub const CONFIG_FILE: &str = "cord19_explorer.json";

/// Titles are tokenized into runs of 3+ ASCII letters.
pub const DEFAULT_TOKEN_PATTERN: &str = r"\b[a-zA-Z]{3,}\b";

pub const DEFAULT_STOP_WORDS: [&str; 46] = [
    "the", "and", "for", "are", "with", "this", "that", "from", "they", "been", "have", "were",
    "said", "each", "which", "their", "time", "will", "about", "can", "when", "make", "like",
    "into", "him", "has", "two", "more", "her", "would", "there", "could", "way", "who", "its",
    "now", "find", "long", "down", "day", "did", "get", "come", "made", "may", "part",
];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid token pattern: {0}")]
    TokenPattern(#[from] regex::Error),
}

/// Tokenizer settings for title word frequencies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    pub token_pattern: String,
    pub stop_words: Vec<String>,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            token_pattern: DEFAULT_TOKEN_PATTERN.to_string(),
            stop_words: DEFAULT_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }
}

/// User settings shared by the report and the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub output_dir: PathBuf,
    pub top_journals: NonZeroUsize,
    pub top_words: NonZeroUsize,
    pub top_sources: NonZeroUsize,
    pub text: TokenizerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            top_journals: NonZeroUsize::new(10).unwrap_or(NonZeroUsize::MIN),
            top_words: NonZeroUsize::new(20).unwrap_or(NonZeroUsize::MIN),
            top_sources: NonZeroUsize::new(10).unwrap_or(NonZeroUsize::MIN),
            text: TokenizerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Read settings from `path`; a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        // Reject a bad pattern here rather than on first use
        regex::Regex::new(&config.text.token_pattern)?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let tmp = tempdir().unwrap();
        let config = AppConfig::load_or_default(&tmp.path().join("nope.json")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.top_journals.get(), 10);
        assert_eq!(config.top_words.get(), 20);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, r#"{{"top_words": 5, "text": {{"stop_words": ["virus"]}}}}"#).unwrap();

        let config = AppConfig::load_or_default(&path).unwrap();
        assert_eq!(config.top_words.get(), 5);
        assert_eq!(config.top_journals.get(), 10);
        assert_eq!(config.text.stop_words, vec!["virus".to_string()]);
        assert_eq!(config.text.token_pattern, DEFAULT_TOKEN_PATTERN);
    }

    #[test]
    fn test_zero_top_n_is_rejected() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{"top_journals": 0}"#).unwrap();

        let err = AppConfig::load_or_default(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_bad_pattern_is_rejected() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{"text": {"token_pattern": "[a-z"}}"#).unwrap();

        let err = AppConfig::load_or_default(&path).unwrap_err();
        assert!(matches!(err, ConfigError::TokenPattern(_)));
    }

    #[test]
    fn test_default_stop_words_are_unique_lowercase() {
        let set: std::collections::HashSet<_> = DEFAULT_STOP_WORDS.iter().collect();
        assert_eq!(set.len(), DEFAULT_STOP_WORDS.len());
        assert!(DEFAULT_STOP_WORDS.iter().all(|w| *w == w.to_lowercase()));
    }
}
