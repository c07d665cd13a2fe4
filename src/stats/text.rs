//! Title tokenizer for word frequencies.

use crate::config::TokenizerConfig;
use regex::Regex;
use std::collections::HashSet;

/// Splits titles into lowercase tokens and drops stop words.
#[derive(Debug, Clone)]
pub struct TitleTokenizer {
    pattern: Regex,
    stop_words: HashSet<String>,
}

impl TitleTokenizer {
    pub fn new(config: &TokenizerConfig) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(&config.token_pattern)?,
            stop_words: config.stop_words.iter().map(|w| w.to_lowercase()).collect(),
        })
    }

    /// Tokens of one title, in order of appearance.
    pub fn tokens(&self, title: &str) -> Vec<String> {
        let lower = title.to_lowercase();
        self.pattern
            .find_iter(&lower)
            .map(|m| m.as_str())
            .filter(|word| !self.stop_words.contains(*word))
            .map(str::to_string)
            .collect()
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(&word.to_lowercase())
    }
}
