//! Main export pipeline orchestration

use super::config::ExportConfig;
use super::sink::PlaylistSink;
use crate::model::Library;
use anyhow::{Context, Result};
use std::collections::HashMap;

/// Main export pipeline
pub struct ExportPipeline<S: PlaylistSink> {
    config: ExportConfig,
    sink: S,
}

impl<S: PlaylistSink> ExportPipeline<S> {
    /// Create a new export pipeline
    pub fn new(config: ExportConfig, sink: S) -> Self {
        Self { config, sink }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Apply duplicate removal and sorting as configured
    pub fn arrange(&self, library: &mut Library) {
        if !self.config.keep_duplicates {
            let removed = library.remove_duplicates();
            log::info!("Removed {} duplicate playlist entries", removed);
        }

        if let Some(order) = self.config.sort_order {
            log::info!("Sorting playlists by {}", order);
            library.sort_playlists(order);
        }
    }

    /// Run the complete export process
    ///
    /// Every playlist is written, including empty ones. Returns the number
    /// of playlists written.
    pub fn export(&mut self, library: &mut Library) -> Result<usize> {
        log::info!("Starting playlist export");
        log::info!("Target: {:?}", self.config.output_dir);

        self.arrange(library);

        self.sink
            .prepare()
            .context("Failed to prepare playlist output")?;

        let mut written: HashMap<&str, &str> = HashMap::new();
        for playlist in library.playlists() {
            if let Some(previous) = written.insert(playlist.file_name(), playlist.name.as_str()) {
                log::warn!(
                    "Playlists '{}' and '{}' share the file name '{}', the latter overwrites the former",
                    previous,
                    playlist.name,
                    playlist.file_name()
                );
            }

            let paths = playlist.paths();
            log::info!("Exporting '{}' ({} songs)", playlist.name, paths.len());
            self.sink
                .write_playlist(playlist.file_name(), &paths)
                .with_context(|| format!("Failed to export playlist '{}'", playlist.name))?;
        }

        log::info!("Export complete!");
        Ok(library.playlist_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Playlist, Song, SortOrder};
    use std::path::PathBuf;

    /// Sink keeping playlists in memory
    #[derive(Default)]
    struct MemorySink {
        prepared: bool,
        playlists: Vec<(String, Vec<String>)>,
    }

    impl PlaylistSink for MemorySink {
        fn prepare(&mut self) -> Result<()> {
            self.prepared = true;
            Ok(())
        }

        fn write_playlist(&mut self, name: &str, paths: &[String]) -> Result<()> {
            self.playlists.push((name.to_string(), paths.to_vec()));
            Ok(())
        }
    }

    fn create_test_library() -> Library {
        let mut lib = Library::new(1);
        lib.add_song(Song::new(2, PathBuf::from("/music/B.mp3")));
        lib.add_song(Song::new(10, PathBuf::from("/music/a.mp3")));

        lib.add_playlist(Playlist::new(100, "Mix #1".to_string()));
        lib.add_playlist(Playlist::new(101, "Empty".to_string()));
        lib.add_entry(100, false, 2, 0);
        lib.add_entry(100, false, 10, 1);
        lib.add_entry(100, false, 2, 2);
        lib
    }

    #[test]
    fn test_export_defaults() {
        let mut lib = create_test_library();
        let mut pipeline = ExportPipeline::new(ExportConfig::new("/out".into()), MemorySink::default());

        assert_eq!(pipeline.export(&mut lib).unwrap(), 2);

        let sink = pipeline.sink();
        assert!(sink.prepared);
        assert_eq!(
            sink.playlists,
            vec![
                (
                    "Mix1".to_string(),
                    vec!["/music/B.mp3".to_string(), "/music/a.mp3".to_string()]
                ),
                ("Empty".to_string(), Vec::new()),
            ]
        );
    }

    #[test]
    fn test_export_keeps_duplicates() {
        let mut lib = create_test_library();
        let config = ExportConfig::new("/out".into()).with_keep_duplicates(true);
        let mut pipeline = ExportPipeline::new(config, MemorySink::default());

        pipeline.export(&mut lib).unwrap();
        assert_eq!(pipeline.sink().playlists[0].1.len(), 3);
    }

    #[test]
    fn test_export_sorted_by_id() {
        let mut lib = create_test_library();
        let config = ExportConfig::new("/out".into()).with_sort_order(Some(SortOrder::Id));
        let mut pipeline = ExportPipeline::new(config, MemorySink::default());

        pipeline.export(&mut lib).unwrap();
        assert_eq!(
            pipeline.sink().playlists[0].1,
            vec!["/music/a.mp3".to_string(), "/music/B.mp3".to_string()]
        );
    }
}
