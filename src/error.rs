//! Error types for dump reading and parsing

use std::path::PathBuf;
use thiserror::Error;

/// Fatal failures while obtaining or interpreting a database dump
#[derive(Error, Debug)]
pub enum DumpError {
    /// The database file handed to the dump tool does not exist
    #[error("Database file not found: {0:?}")]
    DatabaseNotFound(PathBuf),

    /// The dump tool could not be run or reported a failure
    #[error("Dump command `{command}` failed: {message}")]
    DumpCommand { command: String, message: String },

    /// A matched statement has a quoted field that never closes
    #[error("Unterminated quote in statement on line {line}")]
    UnterminatedQuote { line: usize },

    /// Reader failure from csv; value lists are read from `&str`, so this
    /// exists for `?` and is not expected in practice
    #[error("Failed to tokenize statement: {0}")]
    Tokenize(#[from] csv::Error),

    /// A matched statement has fewer fields than its table requires
    #[error("{table} row on line {line} has no field {index}")]
    MissingField {
        table: &'static str,
        index: usize,
        line: usize,
    },

    /// No primary source row carries the music library marker
    #[error("Library ID was not found")]
    LibraryNotFound,

    /// The music library row exists but its identifier is not a number
    #[error("Library ID is not a number: {0:?}")]
    InvalidLibraryId(String),

    /// Sort criterion outside of pos/id/path
    #[error("Invalid sorting criterion: {0:?} (expected pos, id or path)")]
    InvalidSortOrder(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
