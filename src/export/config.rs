//! Export configuration

use super::sink::DirectorySink;
use crate::model::SortOrder;
use std::path::PathBuf;

/// Configuration for the export process
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Directory the playlist files are written to
    pub output_dir: PathBuf,

    /// Playlist file extension, without the dot
    pub extension: String,

    /// Appended to every playlist file name before the extension
    pub postfix: String,

    /// Remove existing files with the same extension before writing
    pub clear_existing: bool,

    /// Keep repeated songs within a playlist
    pub keep_duplicates: bool,

    /// Reorder playlists by this key (None = keep each playlist's own order)
    pub sort_order: Option<SortOrder>,
}

impl ExportConfig {
    /// Create a new export configuration
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            extension: "m3u".to_string(),
            postfix: String::new(),
            clear_existing: false,
            keep_duplicates: false,
            sort_order: None,
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn with_postfix(mut self, postfix: impl Into<String>) -> Self {
        self.postfix = postfix.into();
        self
    }

    pub fn with_clear_existing(mut self, clear: bool) -> Self {
        self.clear_existing = clear;
        self
    }

    pub fn with_keep_duplicates(mut self, keep: bool) -> Self {
        self.keep_duplicates = keep;
        self
    }

    /// Set the key all playlists are sorted by
    pub fn with_sort_order(mut self, order: Option<SortOrder>) -> Self {
        self.sort_order = order;
        self
    }

    /// Sink writing into the configured directory
    pub fn directory_sink(&self) -> DirectorySink {
        DirectorySink::new(self.output_dir.clone(), self.extension.clone())
            .with_postfix(self.postfix.clone())
            .with_clear_existing(self.clear_existing)
    }
}
