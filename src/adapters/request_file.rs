//! Request File Adapter - Loads a `DecisionRequest` from disk.
//!
//! The format follows the file extension: `.json` via serde_json,
//! `.yaml`/`.yml` via serde_yaml. Anything else is rejected before the file
//! is read.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::ranking::DecisionRequest;

/// Errors raised while loading a request file.
#[derive(Debug, Error)]
pub enum RequestFileError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported request file extension for {0} (expected .json, .yaml or .yml)")]
    UnsupportedFormat(PathBuf),

    #[error("Invalid JSON request in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid YAML request in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Supported request encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestFormat {
    Json,
    Yaml,
}

impl RequestFormat {
    /// Picks the format from the path extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(RequestFormat::Json),
            "yaml" | "yml" => Some(RequestFormat::Yaml),
            _ => None,
        }
    }
}

/// Reads and parses a request file.
///
/// Only the encoding is checked here; dimensions and values are validated by
/// the orchestrator.
pub fn load_request(path: impl AsRef<Path>) -> Result<DecisionRequest, RequestFileError> {
    let path = path.as_ref();
    let format = RequestFormat::from_path(path)
        .ok_or_else(|| RequestFileError::UnsupportedFormat(path.to_path_buf()))?;

    let contents = fs::read_to_string(path).map_err(|source| RequestFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_request(&contents, format).map_err(|err| err.at(path))
}

/// Parses request text in the given format.
pub fn parse_request(contents: &str, format: RequestFormat) -> Result<DecisionRequest, ParseError> {
    match format {
        RequestFormat::Json => serde_json::from_str(contents).map_err(ParseError::Json),
        RequestFormat::Yaml => serde_yaml::from_str(contents).map_err(ParseError::Yaml),
    }
}

/// A parse failure not yet tied to a file.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Json(serde_json::Error),
    #[error(transparent)]
    Yaml(serde_yaml::Error),
}

impl ParseError {
    fn at(self, path: &Path) -> RequestFileError {
        let path = path.to_path_buf();
        match self {
            ParseError::Json(source) => RequestFileError::Json { path, source },
            ParseError::Yaml(source) => RequestFileError::Yaml { path, source },
        }
    }
}
