//! Export orchestration and playlist file writing

pub mod config;
pub mod pipeline;
pub mod sink;

pub use config::ExportConfig;
pub use pipeline::ExportPipeline;
pub use sink::{DirectorySink, PlaylistSink};
