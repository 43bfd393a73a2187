//! Grid terrain: four material signals and camera-relative panning.

use glam::Vec3;

use super::{sample, MusicResponder};
use crate::music::{MusicController, PlaybackClock};
use crate::params::{TerrainPanning, TerrainParams};

/// Material signals written every tick (each in [0, 1])
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TerrainSignals {
    pub bass: f32,
    pub lead_verse: f32,
    pub lead_chorus: f32,
    pub outro: f32,
}

/// Panning path resolved against a camera anchor
///
/// The anchor is a position only: offsets are world-axis translations from
/// the camera and do not follow its rotation.
#[derive(Debug, Clone, PartialEq)]
struct PanPath {
    camera: Vec3,
    initial_offset: Vec3,
    final_offset: Vec3,
    smooth_lerp: f32,
}

impl PanPath {
    fn from_params(panning: &TerrainPanning) -> Option<Self> {
        let camera = panning.camera_position?;
        Some(Self {
            camera: Vec3::from_array(camera),
            initial_offset: Vec3::from_array(panning.initial_offset),
            final_offset: Vec3::from_array(panning.final_offset),
            smooth_lerp: panning.smooth_lerp.clamp(0.0, 1.0),
        })
    }

    /// World-space target for the given song percent
    fn target(&self, song_percent: f32) -> Vec3 {
        self.camera + self.initial_offset.lerp(self.final_offset, song_percent)
    }
}

/// Terrain responder
#[derive(Debug, Clone)]
pub struct GridTerrain {
    params: TerrainParams,
    position: Vec3,
    pan: Option<PanPath>,
    signals: TerrainSignals,
}

impl GridTerrain {
    pub fn new(params: TerrainParams) -> Self {
        let pan = params.panning.as_ref().and_then(PanPath::from_params);
        Self {
            position: Vec3::from_array(params.position),
            params,
            pan,
            signals: TerrainSignals::default(),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn signals(&self) -> TerrainSignals {
        self.signals
    }

    pub fn is_panning(&self) -> bool {
        self.pan.is_some()
    }

    /// Move the terrain (e.g. while framing the pan endpoints)
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Record the current position as the song-start offset from the camera
    pub fn capture_initial_pan_position(&mut self) {
        match self.pan.as_mut() {
            Some(pan) => pan.initial_offset = self.position - pan.camera,
            None => log::warn!(
                "(Grid Terrain): Couldn't capture initial pan position. Missing camera reference."
            ),
        }
    }

    /// Record the current position as the song-end offset from the camera
    pub fn capture_final_pan_position(&mut self) {
        match self.pan.as_mut() {
            Some(pan) => pan.final_offset = self.position - pan.camera,
            None => log::warn!(
                "(Grid Terrain): Couldn't capture final pan position. Missing camera reference."
            ),
        }
    }

    fn update_material(&mut self, controller: &MusicController) {
        self.signals = TerrainSignals {
            bass: sample(controller, &self.params.bass),
            lead_verse: sample(controller, &self.params.lead_verse),
            lead_chorus: sample(controller, &self.params.lead_chorus),
            outro: sample(controller, &self.params.outro),
        };
    }
}

impl MusicResponder for GridTerrain {
    fn on_initialize(&mut self, _controller: &MusicController) {
        if self.params.panning.is_some() && self.pan.is_none() {
            log::warn!("(Grid Terrain): Panning disabled. Missing camera reference.");
        }
    }

    fn on_track_start(&mut self, clock: &PlaybackClock) {
        if let Some(pan) = &self.pan {
            log::info!("(Grid Terrain): OnTrackPlay. Setting initial position.");
            self.position = pan.target(clock.song_percent());
        }
    }

    fn on_tick(&mut self, controller: &MusicController, _delta_s: f32) {
        if let Some(pan) = &self.pan {
            let target = pan.target(controller.current_song_percent());
            self.position = self.position.lerp(target, pan.smooth_lerp);
        }
        self.update_material(controller);
    }
}
