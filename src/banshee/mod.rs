//! Banshee library parsing
//!
//! Reads the textual SQL dump of Banshee's database and extracts the
//! music library's songs and playlists.

mod database;
mod dump;
mod rows;
mod source;

pub use database::{build_library, resolve_library_id, uri_to_path, FileProbe, Filesystem};
pub use dump::{scan, DumpRows, Table, MUSIC_LIBRARY_MARKER};
pub use rows::{parse_int, split_fields};
pub use source::{DumpFile, DumpSource, SqliteDump};

use crate::error::DumpError;
use crate::model::Library;

/// Parse a complete Banshee library from its dump
///
/// # Arguments
/// * `dump` - Full text of the database dump
/// * `probe` - Decides which referenced audio files still exist
///
/// # Returns
/// The music library with its reachable songs and filled playlists
pub fn parse_library<P: FileProbe>(dump: &str, probe: &P) -> Result<Library, DumpError> {
    log::info!("Scanning dump ({} bytes)", dump.len());
    let rows = scan(dump)?;
    build_library(&rows, probe)
}
