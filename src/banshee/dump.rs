//! Single-pass scanner turning a Banshee SQL dump into typed rows

use super::rows::{argument_list, parse_int, split_fields};
use crate::error::DumpError;

/// Marker carried by the primary source row of the music library
pub const MUSIC_LIBRARY_MARKER: &str = "MusicLibrarySource-Library";

/// Tables of the Banshee schema the exporter reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    PrimarySources,
    Tracks,
    Playlists,
    SmartPlaylists,
    PlaylistEntries,
    SmartPlaylistEntries,
}

impl Table {
    const ALL: [Table; 6] = [
        Table::PrimarySources,
        Table::Tracks,
        Table::Playlists,
        Table::SmartPlaylists,
        Table::PlaylistEntries,
        Table::SmartPlaylistEntries,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Table::PrimarySources => "CorePrimarySources",
            Table::Tracks => "CoreTracks",
            Table::Playlists => "CorePlaylists",
            Table::SmartPlaylists => "CoreSmartPlaylists",
            Table::PlaylistEntries => "CorePlaylistEntries",
            Table::SmartPlaylistEntries => "CoreSmartPlaylistEntries",
        }
    }

    /// Table targeted by an `INSERT INTO` line, if it is one we read
    ///
    /// Accepts both `INSERT INTO "CoreTracks"` and `INSERT INTO CoreTracks`.
    pub fn of_statement(line: &str) -> Option<Table> {
        let rest = line.trim_start().strip_prefix("INSERT INTO ")?;
        let ident = match rest.strip_prefix('"') {
            Some(quoted) => &quoted[..quoted.find('"')?],
            None => rest.split([' ', '(']).next()?,
        };
        Table::ALL.into_iter().find(|table| table.name() == ident)
    }
}

/// Row of `CorePrimarySources`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRow {
    pub id: Option<i64>,
    pub raw_id: String,
    pub is_music_library: bool,
}

/// Row of `CoreTracks`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRow {
    pub library_id: Option<i64>,
    pub track_id: Option<i64>,
    pub uri: String,
}

/// Row of `CorePlaylists` or `CoreSmartPlaylists`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistRow {
    pub library_id: Option<i64>,
    pub playlist_id: Option<i64>,
    pub name: String,
    pub smart: bool,
}

/// Row of `CorePlaylistEntries` or `CoreSmartPlaylistEntries`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRow {
    pub playlist_id: Option<i64>,
    pub track_id: Option<i64>,
    pub position: i64,
    pub smart: bool,
}

/// All rows of interest, each table in dump order
#[derive(Debug, Clone, Default)]
pub struct DumpRows {
    pub sources: Vec<SourceRow>,
    pub tracks: Vec<TrackRow>,
    pub playlists: Vec<PlaylistRow>,
    pub entries: Vec<EntryRow>,
}

/// Positional access to a tokenized row
struct Fields {
    table: Table,
    line: usize,
    values: Vec<String>,
}

impl Fields {
    fn get(&self, index: usize) -> Result<&str, DumpError> {
        self.values
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| DumpError::MissingField {
                table: self.table.name(),
                index,
                line: self.line,
            })
    }

    fn int(&self, index: usize) -> Result<Option<i64>, DumpError> {
        self.get(index).map(parse_int)
    }
}

/// Scan every line of the dump once and collect the rows we need
///
/// Lines that are not inserts into one of our tables are ignored. A
/// matched line that cannot be tokenized or lacks a required field fails
/// the whole scan.
pub fn scan(dump: &str) -> Result<DumpRows, DumpError> {
    let mut rows = DumpRows::default();

    for (index, line) in dump.lines().enumerate() {
        let Some(table) = Table::of_statement(line) else {
            continue;
        };

        let line_no = index + 1;
        let fields = Fields {
            table,
            line: line_no,
            values: split_fields(argument_list(line), line_no)?,
        };

        match table {
            Table::PrimarySources => {
                let raw_id = fields.get(0)?;
                rows.sources.push(SourceRow {
                    id: parse_int(raw_id),
                    raw_id: raw_id.to_string(),
                    is_music_library: line.contains(MUSIC_LIBRARY_MARKER),
                });
            }
            Table::Tracks => rows.tracks.push(TrackRow {
                library_id: fields.int(0)?,
                track_id: fields.int(1)?,
                uri: fields.get(7)?.to_string(),
            }),
            Table::Playlists | Table::SmartPlaylists => rows.playlists.push(PlaylistRow {
                library_id: fields.int(0)?,
                playlist_id: fields.int(1)?,
                name: fields.get(2)?.to_string(),
                smart: table == Table::SmartPlaylists,
            }),
            Table::PlaylistEntries => rows.entries.push(EntryRow {
                playlist_id: fields.int(1)?,
                track_id: fields.int(2)?,
                position: fields.int(3)?.unwrap_or(0),
                smart: false,
            }),
            Table::SmartPlaylistEntries => rows.entries.push(EntryRow {
                playlist_id: fields.int(1)?,
                track_id: fields.int(2)?,
                position: 0,
                smart: true,
            }),
        }
    }

    log::debug!(
        "Scanned dump: {} sources, {} tracks, {} playlists, {} entries",
        rows.sources.len(),
        rows.tracks.len(),
        rows.playlists.len(),
        rows.entries.len()
    );

    Ok(rows)
}
