//! Playlist file output

use anyhow::{Context, Result};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

/// Destination for exported playlists
pub trait PlaylistSink {
    /// Called once before the first playlist is written
    fn prepare(&mut self) -> Result<()>;

    /// Persist one playlist given its filename-safe name and ordered paths
    fn write_playlist(&mut self, name: &str, paths: &[String]) -> Result<()>;
}

/// Playlist file content: one path per line, no trailing newline
pub fn render_playlist(paths: &[String]) -> String {
    paths.join("\n")
}

/// Writes `<name><postfix>.<extension>` files into one directory
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    extension: String,
    postfix: String,
    clear_existing: bool,
}

impl DirectorySink {
    pub fn new(dir: PathBuf, extension: impl Into<String>) -> Self {
        Self {
            dir,
            extension: extension.into(),
            postfix: String::new(),
            clear_existing: false,
        }
    }

    pub fn with_postfix(mut self, postfix: impl Into<String>) -> Self {
        self.postfix = postfix.into();
        self
    }

    pub fn with_clear_existing(mut self, clear: bool) -> Self {
        self.clear_existing = clear;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file a playlist with this name is written to
    pub fn playlist_path(&self, name: &str) -> PathBuf {
        self.dir
            .join(format!("{}{}.{}", name, self.postfix, self.extension))
    }

    /// Remove every file in the directory carrying our extension
    fn clear(&self) -> Result<usize> {
        let mut removed = 0;
        let entries = fs::read_dir(&self.dir)
            .with_context(|| format!("Failed to list {:?}", self.dir))?;

        for entry in entries {
            let path = entry?.path();
            if !path.is_file() || path.extension() != Some(OsStr::new(&self.extension)) {
                continue;
            }
            match fs::remove_file(&path) {
                Ok(()) => removed += 1,
                Err(e) => log::error!("Could not remove playlist {:?}: {}", path, e),
            }
        }

        Ok(removed)
    }
}

impl PlaylistSink for DirectorySink {
    fn prepare(&mut self) -> Result<()> {
        if !self.dir.is_dir() {
            fs::create_dir_all(&self.dir)
                .with_context(|| format!("Failed to create output directory {:?}", self.dir))?;
            log::info!("Created output directory {:?}", self.dir);
        } else if self.clear_existing {
            let removed = self.clear()?;
            log::info!("Removed {} existing .{} files", removed, self.extension);
        }
        Ok(())
    }

    fn write_playlist(&mut self, name: &str, paths: &[String]) -> Result<()> {
        let path = self.playlist_path(name);
        fs::write(&path, render_playlist(paths))
            .with_context(|| format!("Failed to write playlist {:?}", path))?;
        log::debug!("Wrote {} entries to {:?}", paths.len(), path);
        Ok(())
    }
}
