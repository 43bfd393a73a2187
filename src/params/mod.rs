//! Parameter definitions with physical units and documented semantics.
//!
//! Every tunable lives here with:
//! - Physical units (seconds, meters, dBFS)
//! - Documented ranges and meanings
//! - Defaults matching the stock show

mod audio;
mod responder;
mod show;
mod track;

// Re-export all types
pub use audio::AnalyzerConfig;
pub use responder::{
    BarParams, ResponderConfig, SkyParams, SunParams, TerrainPanning, TerrainParams,
    TrackResponse,
};
pub use show::ShowConfig;
pub use track::{ControllerSettings, SongConfig, TrackConfig};
