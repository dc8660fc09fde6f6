//! Error types for tokprep-rs.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for preparation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while preparing a treebank.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid glob pattern built from a path
    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Unreadable entry while globbing
    #[error("File discovery error: {0}")]
    Glob(#[from] glob::GlobError),

    /// The treebank has no train text file at all
    #[error("Cannot find train file for treebank {0}")]
    MissingTrainFile(String),

    /// A split file that must exist was not found
    #[error("Cannot find {split} .{extension} file for treebank {treebank}")]
    MissingFile {
        treebank: String,
        split: String,
        extension: String,
    },

    /// More than one file matched a discovery pattern
    #[error("Unexpected number of files matched '{pattern}': {count}")]
    AmbiguousFile { pattern: String, count: usize },

    /// Treebank name does not follow the `UD_<Language>-<Corpus>` shape
    #[error("Invalid treebank name: {0}")]
    InvalidTreebankName(String),

    /// Language part of a treebank name is not in the lookup table
    #[error("Unknown language '{language}' in treebank {treebank}")]
    UnknownLanguage { treebank: String, language: String },

    /// The train file is too small to carve out a dev split
    #[error("Dev sentence number less than one ({total} sentences in train)")]
    DevTooSmall { total: usize },

    /// An external tool exited unsuccessfully
    #[error("External tool '{command}' failed: {message}")]
    ExternalTool { command: String, message: String },

    /// Text and annotation disagree
    #[error("Alignment error in {path}: {message}")]
    Alignment { path: PathBuf, message: String },

    /// Malformed annotation content
    #[error("Unexpected format in {path}: {message}")]
    Format { path: PathBuf, message: String },
}

impl Error {
    /// Create an alignment error for the given file.
    pub fn alignment(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Error::Alignment {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// Create a format error for the given file.
    pub fn format(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Error::Format {
            path: path.into(),
            message: msg.into(),
        }
    }
}
