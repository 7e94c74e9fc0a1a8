//! In-memory playlist model
//!
//! These types are independent of the dump format they are parsed from
//! and of the sink the playlists are exported to.

mod library;
mod playlist;
mod song;

pub use library::Library;
pub use playlist::{Playlist, PlaylistEntry, SortOrder};
pub use song::Song;
