//! Responder parameters: which track and band each visual element follows.

use serde::{Deserialize, Serialize};

use crate::music::TrackId;

/// A single track/frequency pair a responder samples every frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackResponse {
    /// Track to sample
    pub track: TrackId,

    /// Normalized frequency to sample (0 = lowest band, 1 = highest)
    pub frequency_tune: f32,
}

impl Default for TrackResponse {
    fn default() -> Self {
        Self {
            track: TrackId::from("None"),
            frequency_tune: 0.0,
        }
    }
}

/// Camera-relative panning of the terrain over the course of the song
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainPanning {
    /// Camera position the offsets are relative to (meters, world axes;
    /// camera rotation is not applied). Panning is disabled when absent.
    pub camera_position: Option<[f32; 3]>,

    /// Terrain offset from the camera at song start (meters)
    pub initial_offset: [f32; 3],

    /// Terrain offset from the camera at song end (meters)
    pub final_offset: [f32; 3],

    /// Fraction of the remaining distance covered each tick (0..=1)
    pub smooth_lerp: f32,
}

impl Default for TerrainPanning {
    fn default() -> Self {
        Self {
            camera_position: None,
            initial_offset: [0.0; 3],
            final_offset: [0.0; 3],
            smooth_lerp: 0.01,
        }
    }
}

/// Grid terrain: four material signals plus optional panning
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainParams {
    pub bass: TrackResponse,
    pub lead_verse: TrackResponse,
    pub lead_chorus: TrackResponse,
    pub outro: TrackResponse,

    /// Starting terrain position (meters)
    pub position: [f32; 3],

    /// Panning is only active when set
    pub panning: Option<TerrainPanning>,
}

/// Sky dome brightness
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyParams {
    pub brightness: TrackResponse,
}

/// Sun disc scale and brightness
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SunParams {
    pub scale: TrackResponse,
    pub brightness: TrackResponse,

    /// Uniform scale at rest
    pub initial_scale: f32,

    /// Scale multiplier reached at full signal
    pub max_scale: f32,
}

impl Default for SunParams {
    fn default() -> Self {
        Self {
            scale: TrackResponse::default(),
            brightness: TrackResponse::default(),
            initial_scale: 1.0,
            max_scale: 1.5,
        }
    }
}

/// A row of spectrum bars spread evenly over one track's bands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarParams {
    pub track: TrackId,

    /// Number of bars (bar i samples frequency i / count)
    pub number_of_bars: usize,

    /// Spacing between bars (meters)
    pub bar_distance: f32,

    /// Bar height = signal / divisor
    pub divisor: f32,

    /// Position of the first bar; the rest follow along +X (meters)
    pub origin: [f32; 3],
}

impl Default for BarParams {
    fn default() -> Self {
        Self {
            track: TrackId::from("None"),
            number_of_bars: 16,
            bar_distance: 100.0,
            divisor: 1.0,
            origin: [0.0; 3],
        }
    }
}

/// Responder selection (closed set of visual elements)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResponderConfig {
    Terrain(TerrainParams),
    Sky(SkyParams),
    Sun(SunParams),
    Bars(BarParams),
}
