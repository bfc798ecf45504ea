//! Dictionary of legal words
//!
//! Loaded once per session and read-only afterwards. Words are stored
//! uppercase; lookups are case-insensitive.
//!
//! Sources:
//! - an `http(s)://` URL answering `{"data": ["WORD", ...]}`
//! - a `.json` file with the same body
//! - any other file: one word per line

use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info};

/// Errors that can occur while loading a dictionary
#[derive(Debug, Error)]
pub enum DictionaryError {
    /// Could not read a word-list file
    #[error("failed to read word list {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// HTTP request failed before a response arrived
    #[error("word list request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Server answered with a non-success status
    #[error("word list request returned status {0}")]
    Status(u16),
    /// Body was not `{"data": [...]}`
    #[error("malformed word list body: {0}")]
    Json(#[from] serde_json::Error),
}

/// Where to load the word list from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionarySource {
    /// Local file (JSON body if it ends in `.json`, else one word per line)
    File(PathBuf),
    /// Remote endpoint returning a JSON body
    Url(String),
}

impl DictionarySource {
    /// Interpret a command-line argument as a URL or a path
    pub fn parse(arg: &str) -> Self {
        if arg.starts_with("http://") || arg.starts_with("https://") {
            DictionarySource::Url(arg.to_string())
        } else {
            DictionarySource::File(PathBuf::from(arg))
        }
    }
}

impl fmt::Display for DictionarySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DictionarySource::File(path) => write!(f, "{}", path.display()),
            DictionarySource::Url(url) => f.write_str(url),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WordListBody {
    data: Vec<String>,
}

/// Set of valid uppercase words
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    words: HashSet<String>,
}

impl Dictionary {
    /// Build a dictionary from any list of words (uppercased on insert)
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_uppercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { words }
    }

    /// Parse a `{"data": [...]}` body
    pub fn from_json_body(body: &str) -> Result<Self, DictionaryError> {
        let body: WordListBody = serde_json::from_str(body)?;
        Ok(Self::from_words(body.data))
    }

    /// Load from a file (JSON body or plain lines)
    pub fn load_file(path: &Path) -> Result<Self, DictionaryError> {
        let text = std::fs::read_to_string(path).map_err(|source| DictionaryError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_body(&text)
        } else {
            Ok(Self::from_words(text.lines()))
        }
    }

    /// Fetch from a URL returning a JSON body
    pub fn fetch(url: &str) -> Result<Self, DictionaryError> {
        let response = reqwest::blocking::get(url)?;
        let status = response.status();
        if !status.is_success() {
            return Err(DictionaryError::Status(status.as_u16()));
        }
        let body = response.text()?;
        Self::from_json_body(&body)
    }

    /// Load from either kind of source
    pub fn load(source: &DictionarySource) -> Result<Self, DictionaryError> {
        match source {
            DictionarySource::File(path) => Self::load_file(path),
            DictionarySource::Url(url) => Self::fetch(url),
        }
    }

    /// Load, or log the failure and fall back to an empty dictionary.
    ///
    /// An empty dictionary rejects every submission until the room is
    /// entered again.
    pub fn load_or_empty(source: Option<&DictionarySource>) -> Self {
        let Some(source) = source else {
            error!("no dictionary source configured; all submissions will be rejected");
            return Self::default();
        };

        match Self::load(source) {
            Ok(dict) => {
                info!(source = %source, words = dict.len(), "dictionary loaded");
                dict
            }
            Err(e) => {
                error!(source = %source, error = %e, "dictionary load failed");
                Self::default()
            }
        }
    }

    /// Check if a word is in the dictionary (case-insensitive)
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_uppercase())
    }

    /// Number of words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if nothing was loaded
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
