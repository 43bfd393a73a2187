//! Sun disc: scale pulses with one band, brightness with another.

use super::{sample, MusicResponder};
use crate::music::MusicController;
use crate::params::SunParams;

#[derive(Debug, Clone)]
pub struct SynthSun {
    params: SunParams,
    scale: f32,
    brightness: f32,
    pan_factor: f32,
    pan_time_offset_s: f32,
}

impl SynthSun {
    pub fn new(params: SunParams) -> Self {
        Self {
            scale: params.initial_scale,
            params,
            brightness: 0.0,
            pan_factor: 0.0,
            pan_time_offset_s: 0.0,
        }
    }

    /// Uniform scale, between `initial_scale` and `initial_scale * max_scale`
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    /// Toggle the scrolling band effect, anchored at host time `now_s`
    pub fn set_band_panning(&mut self, enabled: bool, now_s: f32) {
        self.pan_factor = if enabled { 1.0 } else { 0.0 };
        self.pan_time_offset_s = now_s;
    }

    /// (pan factor, pan time offset in seconds)
    pub fn band_panning(&self) -> (f32, f32) {
        (self.pan_factor, self.pan_time_offset_s)
    }
}

impl MusicResponder for SynthSun {
    fn on_tick(&mut self, controller: &MusicController, _delta_s: f32) {
        let initial = self.params.initial_scale;
        let scale_signal = sample(controller, &self.params.scale);
        self.scale = initial + (initial * self.params.max_scale - initial) * scale_signal;
        self.brightness = sample(controller, &self.params.brightness);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::TrackResponse;
    use crate::responder::test_support::playing_controller;

    #[test]
    fn test_scale_lerps_with_signal() {
        let controller = playing_controller();
        let mut sun = SynthSun::new(SunParams {
            scale: TrackResponse {
                track: "lead".into(),
                frequency_tune: 0.5,
            },
            brightness: TrackResponse {
                track: "lead".into(),
                frequency_tune: 1.0,
            },
            initial_scale: 2.0,
            max_scale: 3.0,
        });
        assert_eq!(sun.scale(), 2.0);

        sun.on_tick(&controller, 0.016);
        // lerp(2, 6, 0.5)
        assert_eq!(sun.scale(), 4.0);
        assert_eq!(sun.brightness(), 1.0);
    }

    #[test]
    fn test_silent_track_keeps_rest_scale() {
        let controller = playing_controller();
        let mut sun = SynthSun::new(SunParams::default());
        sun.on_tick(&controller, 0.016);
        assert_eq!(sun.scale(), 1.0);
        assert_eq!(sun.brightness(), 0.0);
    }

    #[test]
    fn test_band_panning() {
        let mut sun = SynthSun::new(SunParams::default());
        assert_eq!(sun.band_panning(), (0.0, 0.0));

        sun.set_band_panning(true, 12.5);
        assert_eq!(sun.band_panning(), (1.0, 12.5));
        sun.set_band_panning(false, 20.0);
        assert_eq!(sun.band_panning(), (0.0, 20.0));
    }
}
