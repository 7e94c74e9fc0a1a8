use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A track of the music library whose file was reachable when indexed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// Track identifier from the dump
    pub id: i64,

    /// Absolute path of the audio file
    pub path: PathBuf,
}

impl Song {
    pub fn new(id: i64, path: PathBuf) -> Self {
        Self { id, path }
    }
}
