use crate::error::DumpError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Key a playlist's entries are ordered by
///
/// Keys are compared as lowercased strings, so numeric keys order
/// lexicographically: id `10` sorts before id `2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    /// Position stored with the playlist entry
    #[default]
    Position,

    /// Track identifier
    Id,

    /// Audio file path
    Path,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Position => "pos",
            SortOrder::Id => "id",
            SortOrder::Path => "path",
        }
    }

    /// String the entry is compared by under this order
    fn key(&self, entry: &PlaylistEntry) -> String {
        match self {
            SortOrder::Position => entry.position.to_string(),
            SortOrder::Id => entry.song_id.to_string(),
            SortOrder::Path => entry.path.to_string_lossy().to_lowercase(),
        }
    }
}

impl FromStr for SortOrder {
    type Err = DumpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pos" | "position" => Ok(SortOrder::Position),
            "id" => Ok(SortOrder::Id),
            "path" => Ok(SortOrder::Path),
            other => Err(DumpError::InvalidSortOrder(other.to_string())),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Membership of one song in a playlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistEntry {
    /// Track ID (references Song::id)
    pub song_id: i64,

    /// Path of the song, copied from the song index
    pub path: PathBuf,

    /// Position in playlist (always 0 for smart playlists)
    pub position: i64,
}

/// Represents a playlist or smart playlist of the music library
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    /// Playlist identifier from the dump
    pub id: i64,

    /// Display name
    pub name: String,

    /// Smart playlists have their own ID sequence and entry table
    pub smart: bool,

    /// Alphanumeric characters of the name at creation time
    file_name: String,

    order: SortOrder,

    entries: Vec<PlaylistEntry>,
}

impl Playlist {
    /// Create a new empty playlist ordered by entry position
    pub fn new(id: i64, name: String) -> Self {
        let file_name = name.chars().filter(|c| c.is_alphanumeric()).collect();
        Self {
            id,
            name,
            smart: false,
            file_name,
            order: SortOrder::default(),
            entries: Vec::new(),
        }
    }

    /// Create a new empty smart playlist
    pub fn new_smart(id: i64, name: String) -> Self {
        Self {
            smart: true,
            ..Self::new(id, name)
        }
    }

    /// Filename-safe name; never changes after creation
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    /// Append an entry in arrival order
    pub fn add_entry(&mut self, entry: PlaylistEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[PlaylistEntry] {
        &self.entries
    }

    /// Number of entries in this playlist
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if playlist is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop repeated songs, keeping the first occurrence of each song id
    /// where it stands. Returns the number of entries removed.
    pub fn remove_duplicates(&mut self) -> usize {
        let before = self.entries.len();
        let mut seen = HashSet::new();
        self.entries.retain(|entry| seen.insert(entry.song_id));
        before - self.entries.len()
    }

    /// Switch the ordering key and reorder the entries by it (stable)
    pub fn sort_by(&mut self, order: SortOrder) {
        self.order = order;
        self.entries.sort_by_cached_key(|entry| order.key(entry));
    }

    /// Song paths in the playlist's current order
    ///
    /// The ordering key is applied here as well, so a playlist that was
    /// never explicitly sorted is still written by entry position.
    pub fn paths(&self) -> Vec<String> {
        let mut ordered: Vec<&PlaylistEntry> = self.entries.iter().collect();
        ordered.sort_by_cached_key(|entry| self.order.key(entry));
        ordered
            .into_iter()
            .map(|entry| entry.path.to_string_lossy().into_owned())
            .collect()
    }
}
