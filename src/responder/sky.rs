//! Sky dome brightness.

use super::{sample, MusicResponder};
use crate::music::MusicController;
use crate::params::SkyParams;

#[derive(Debug, Clone)]
pub struct SynthSky {
    params: SkyParams,
    brightness: f32,
}

impl SynthSky {
    pub fn new(params: SkyParams) -> Self {
        Self {
            params,
            brightness: 0.0,
        }
    }

    /// Latest brightness signal in [0, 1]
    pub fn brightness(&self) -> f32 {
        self.brightness
    }
}

impl MusicResponder for SynthSky {
    fn on_tick(&mut self, controller: &MusicController, _delta_s: f32) {
        self.brightness = sample(controller, &self.params.brightness);
    }
}
