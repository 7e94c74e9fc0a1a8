//! Banshee Exporter - Banshee playlists to plain playlist files
//!
//! This library reads the SQL dump of a Banshee music library and
//! writes each of its playlists as a list of file paths.

pub mod banshee;
pub mod error;
pub mod export;
pub mod model;

pub use error::DumpError;
pub use export::config::ExportConfig;
pub use export::pipeline::ExportPipeline;
