use super::{Playlist, PlaylistEntry, Song, SortOrder};
use std::collections::HashMap;

/// Songs and playlists of the resolved music library
#[derive(Debug, Clone)]
pub struct Library {
    /// Identifier of the music library within the dump
    id: i64,

    /// Reachable songs indexed by their ID
    songs: HashMap<i64, Song>,

    /// Playlists in dump order
    playlists: Vec<Playlist>,
}

impl Library {
    /// Create a new empty library
    pub fn new(id: i64) -> Self {
        Self {
            id,
            songs: HashMap::new(),
            playlists: Vec::new(),
        }
    }

    /// Identifier of the music library this model was built for
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Add a song to the index, replacing any song with the same ID
    pub fn add_song(&mut self, song: Song) {
        self.songs.insert(song.id, song);
    }

    /// Get a song by ID
    pub fn get_song(&self, id: i64) -> Option<&Song> {
        self.songs.get(&id)
    }

    /// Add a playlist to the library
    pub fn add_playlist(&mut self, playlist: Playlist) {
        self.playlists.push(playlist);
    }

    /// Get all playlists
    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    /// Get a playlist by ID for modification (first match)
    pub fn playlist_mut(&mut self, id: i64) -> Option<&mut Playlist> {
        self.playlists.iter_mut().find(|p| p.id == id)
    }

    /// Find the first playlist with the given display name
    pub fn playlist_by_name(&self, name: &str) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.name == name)
    }

    /// Join a membership row against the song index and append it
    ///
    /// Plain and smart playlists are numbered separately, so the row only
    /// joins a playlist of the same kind. Returns false when the playlist
    /// or the song is unknown; such rows are stale references and are
    /// dropped.
    pub fn add_entry(&mut self, playlist_id: i64, smart: bool, song_id: i64, position: i64) -> bool {
        let Some(song) = self.songs.get(&song_id) else {
            return false;
        };
        let entry = PlaylistEntry {
            song_id,
            path: song.path.clone(),
            position,
        };

        match self
            .playlists
            .iter_mut()
            .find(|p| p.id == playlist_id && p.smart == smart)
        {
            Some(playlist) => {
                playlist.add_entry(entry);
                true
            }
            None => false,
        }
    }

    /// Remove duplicate songs from every playlist
    pub fn remove_duplicates(&mut self) -> usize {
        self.playlists
            .iter_mut()
            .map(|p| p.remove_duplicates())
            .sum()
    }

    /// Reorder every playlist by the given key
    pub fn sort_playlists(&mut self, order: SortOrder) {
        for playlist in &mut self.playlists {
            playlist.sort_by(order);
        }
    }

    /// Reorder a single playlist; false if no playlist has that ID
    pub fn sort_playlist(&mut self, id: i64, order: SortOrder) -> bool {
        match self.playlist_mut(id) {
            Some(playlist) => {
                playlist.sort_by(order);
                true
            }
            None => false,
        }
    }

    /// Total number of indexed songs
    pub fn song_count(&self) -> usize {
        self.songs.len()
    }

    /// Total number of playlists
    pub fn playlist_count(&self) -> usize {
        self.playlists.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn library_with_songs() -> Library {
        let mut lib = Library::new(1);
        lib.add_song(Song::new(10, PathBuf::from("/music/ten.mp3")));
        lib.add_song(Song::new(11, PathBuf::from("/music/eleven.mp3")));
        lib.add_playlist(Playlist::new(100, "My List!".to_string()));
        lib
    }

    #[test]
    fn test_library_creation() {
        let lib = Library::new(3);
        assert_eq!(lib.id(), 3);
        assert_eq!(lib.song_count(), 0);
        assert_eq!(lib.playlist_count(), 0);
    }

    #[test]
    fn test_add_entry_joins_song_path() {
        let mut lib = library_with_songs();

        assert!(lib.add_entry(100, false, 11, 4));

        let playlist = &lib.playlists()[0];
        assert_eq!(playlist.len(), 1);
        assert_eq!(playlist.entries()[0].path, PathBuf::from("/music/eleven.mp3"));
        assert_eq!(playlist.entries()[0].position, 4);
    }

    #[test]
    fn test_add_entry_drops_stale_references() {
        let mut lib = library_with_songs();

        assert!(!lib.add_entry(100, false, 99, 0));
        assert!(!lib.add_entry(555, false, 10, 0));
        assert!(lib.playlists()[0].is_empty());
    }

    #[test]
    fn test_add_entry_matches_playlist_kind() {
        let mut lib = library_with_songs();
        lib.add_playlist(Playlist::new_smart(100, "Smart".to_string()));

        assert!(lib.add_entry(100, false, 10, 0));
        assert!(lib.add_entry(100, true, 11, 0));

        let plain = &lib.playlists()[0];
        let smart = &lib.playlists()[1];
        assert_eq!(plain.paths(), vec!["/music/ten.mp3"]);
        assert_eq!(smart.paths(), vec!["/music/eleven.mp3"]);
    }

    #[test]
    fn test_smart_entry_without_smart_playlist_is_dropped() {
        let mut lib = library_with_songs();
        assert!(!lib.add_entry(100, true, 10, 0));
        assert!(lib.playlists()[0].is_empty());
    }

    #[test]
    fn test_remove_duplicates_across_playlists() {
        let mut lib = library_with_songs();
        lib.add_entry(100, false, 10, 0);
        lib.add_entry(100, false, 11, 1);
        lib.add_entry(100, false, 10, 2);

        assert_eq!(lib.remove_duplicates(), 1);
        assert_eq!(lib.playlists()[0].len(), 2);
    }

    #[test]
    fn test_sort_single_playlist() {
        let mut lib = library_with_songs();
        lib.add_playlist(Playlist::new(200, "Other".to_string()));

        assert!(lib.sort_playlist(200, SortOrder::Path));
        assert!(!lib.sort_playlist(300, SortOrder::Path));
        assert_eq!(lib.playlists()[0].order(), SortOrder::Position);
        assert_eq!(lib.playlists()[1].order(), SortOrder::Path);
    }

    #[test]
    fn test_playlist_by_name() {
        let lib = library_with_songs();
        assert_eq!(lib.playlist_by_name("My List!").map(|p| p.id), Some(100));
        assert!(lib.playlist_by_name("MyList").is_none());
    }
}
