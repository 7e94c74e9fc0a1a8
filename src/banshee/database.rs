//! Joins scanned rows into the library model

use super::dump::{DumpRows, SourceRow};
use crate::error::DumpError;
use crate::model::{Library, Playlist, Song};
use std::path::{Path, PathBuf};

/// Existence check for audio files referenced by the dump
pub trait FileProbe {
    fn is_file(&self, path: &Path) -> bool;
}

/// Probe backed by the real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct Filesystem;

impl FileProbe for Filesystem {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }
}

impl<F> FileProbe for F
where
    F: Fn(&Path) -> bool,
{
    fn is_file(&self, path: &Path) -> bool {
        self(path)
    }
}

/// Identifier of the music library among the primary sources
///
/// The first source carrying the marker wins; later ones are reported
/// and ignored.
pub fn resolve_library_id(sources: &[SourceRow]) -> Result<i64, DumpError> {
    let mut candidates = sources.iter().filter(|s| s.is_music_library);
    let first = candidates.next().ok_or(DumpError::LibraryNotFound)?;

    let ignored = candidates.count();
    if ignored > 0 {
        log::warn!(
            "Found {} more music library sources, using the first one (ID {})",
            ignored,
            first.raw_id
        );
    }

    first
        .id
        .ok_or_else(|| DumpError::InvalidLibraryId(first.raw_id.clone()))
}

/// Convert a file:// URI to PathBuf
///
/// The host part (usually empty or `localhost`) is dropped and the path
/// percent-decoded. Strings without a `file://` scheme are taken as paths.
pub fn uri_to_path(uri: &str) -> Option<PathBuf> {
    let path = match uri.strip_prefix("file://") {
        Some(rest) => &rest[rest.find('/')?..],
        None => uri,
    };
    let path = path.split(['?', '#']).next().unwrap_or(path);

    urlencoding::decode(path)
        .ok()
        .map(|decoded| PathBuf::from(decoded.into_owned()))
}

/// Build the library model from scanned rows
///
/// Tracks and playlists of other libraries are skipped, as are tracks
/// whose file is missing and entries pointing at unknown playlists or
/// songs.
pub fn build_library<P: FileProbe>(rows: &DumpRows, probe: &P) -> Result<Library, DumpError> {
    let library_id = resolve_library_id(&rows.sources)?;
    log::info!("Music library ID: {}", library_id);

    let mut library = Library::new(library_id);

    for track in rows.tracks.iter().filter(|t| t.library_id == Some(library_id)) {
        let Some(track_id) = track.track_id else {
            log::debug!("Skipping track without numeric ID: {}", track.uri);
            continue;
        };
        let Some(path) = uri_to_path(&track.uri) else {
            log::warn!("Undecodable location: {} # ID: {}", track.uri, track_id);
            continue;
        };
        if !probe.is_file(&path) {
            log::warn!("Not found: {} # ID: {}", path.display(), track_id);
            continue;
        }
        library.add_song(Song::new(track_id, path));
    }

    for row in rows.playlists.iter().filter(|p| p.library_id == Some(library_id)) {
        let Some(playlist_id) = row.playlist_id else {
            log::debug!("Skipping playlist without numeric ID: {:?}", row.name);
            continue;
        };
        log::debug!(
            "Found {} '{}' (ID {})",
            if row.smart { "smart playlist" } else { "playlist" },
            row.name,
            playlist_id
        );
        let playlist = if row.smart {
            Playlist::new_smart(playlist_id, row.name.clone())
        } else {
            Playlist::new(playlist_id, row.name.clone())
        };
        library.add_playlist(playlist);
    }

    let mut skipped = 0;
    for entry in &rows.entries {
        let added = match (entry.playlist_id, entry.track_id) {
            (Some(playlist_id), Some(track_id)) => {
                library.add_entry(playlist_id, entry.smart, track_id, entry.position)
            }
            _ => false,
        };
        if !added {
            log::debug!(
                "Skipping {}entry: playlist {:?}, track {:?}",
                if entry.smart { "smart " } else { "" },
                entry.playlist_id,
                entry.track_id
            );
            skipped += 1;
        }
    }

    log::info!(
        "Indexed {} songs, {} playlists ({} entries skipped)",
        library.song_count(),
        library.playlist_count(),
        skipped
    );

    Ok(library)
}
