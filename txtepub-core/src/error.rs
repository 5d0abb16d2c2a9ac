//! Error types for txtepub core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using TxtEpubError
pub type Result<T> = std::result::Result<T, TxtEpubError>;

/// Top-level error type for all txtepub operations
#[derive(Debug, Error)]
pub enum TxtEpubError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Segmentation error: {0}")]
    Segment(#[from] SegmentError),

    #[error("Conversion error: {0}")]
    Conversion(#[from] ConversionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors in the caller-supplied configuration. Raised before any output is written.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid title pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Cannot read config file {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config: {0}")]
    Malformed(#[from] serde_yaml::Error),

    #[error("Template directory not found: {0}")]
    TemplateNotFound(PathBuf),
}

/// Errors reading the source manuscript
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Cannot read manuscript {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Manuscript {path} is not valid UTF-8")]
    InvalidUtf8 { path: PathBuf },
}

/// Violations of the document model's invariants during segmentation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SegmentError {
    #[error("Front matter committed more than once")]
    DuplicateFrontMatter,
}

/// Errors that occur while staging or packaging the container
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("Staging failed at {path}: {source}")]
    Staging {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Template file {path} could not be updated: {source}")]
    Template {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Archive entry '{entry}' failed: {source}")]
    Archive {
        entry: String,
        #[source]
        source: zip::result::ZipError,
    },
}
