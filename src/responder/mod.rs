//! Visual responders: thin readers of the controller's normalized spectrum.
//!
//! Each responder maps one or more [`TrackResponse`] samples to a visual
//! parameter. The set is closed, so dispatch goes through the [`Responder`]
//! enum rather than trait objects.

mod bars;
mod sky;
mod stage;
mod sun;
mod terrain;

// Re-export public types
pub use bars::{Bar, SpectrumBars};
pub use sky::SynthSky;
pub use stage::Stage;
pub use sun::SynthSun;
pub use terrain::{GridTerrain, TerrainSignals};

use crate::music::{MusicController, PlaybackClock};
use crate::params::{ResponderConfig, TrackResponse};

/// Hooks a responder receives from the stage
pub trait MusicResponder {
    /// Called once before the controller arms
    fn on_initialize(&mut self, _controller: &MusicController) {}

    fn on_track_start(&mut self, _clock: &PlaybackClock) {}

    fn on_track_end(&mut self, _clock: &PlaybackClock) {}

    /// Called every frame after the controller has refreshed its spectra
    fn on_tick(&mut self, controller: &MusicController, delta_s: f32);
}

/// Sample a single track/frequency pair through the controller query
pub fn sample(controller: &MusicController, response: &TrackResponse) -> f32 {
    controller.evaluate_normalized_spectrum(response.frequency_tune, response.track.as_str())
}

/// One of the supported visual elements
#[derive(Debug, Clone)]
pub enum Responder {
    Terrain(GridTerrain),
    Sky(SynthSky),
    Sun(SynthSun),
    Bars(SpectrumBars),
}

impl Responder {
    pub fn from_config(config: &ResponderConfig) -> Self {
        match config {
            ResponderConfig::Terrain(params) => Self::Terrain(GridTerrain::new(params.clone())),
            ResponderConfig::Sky(params) => Self::Sky(SynthSky::new(params.clone())),
            ResponderConfig::Sun(params) => Self::Sun(SynthSun::new(params.clone())),
            ResponderConfig::Bars(params) => Self::Bars(SpectrumBars::new(params.clone())),
        }
    }

    /// Short label for logs and reports
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Terrain(_) => "terrain",
            Self::Sky(_) => "sky",
            Self::Sun(_) => "sun",
            Self::Bars(_) => "bars",
        }
    }

    fn as_responder_mut(&mut self) -> &mut dyn MusicResponder {
        match self {
            Self::Terrain(r) => r,
            Self::Sky(r) => r,
            Self::Sun(r) => r,
            Self::Bars(r) => r,
        }
    }

    /// One-line summary of the current outputs
    pub fn describe(&self) -> String {
        match self {
            Self::Terrain(t) => {
                let s = t.signals();
                let p = t.position();
                format!(
                    "terrain bass={:.2} verse={:.2} chorus={:.2} outro={:.2} pos=({:.1}, {:.1}, {:.1})",
                    s.bass, s.lead_verse, s.lead_chorus, s.outro, p.x, p.y, p.z
                )
            }
            Self::Sky(s) => format!("sky brightness={:.2}", s.brightness()),
            Self::Sun(s) => format!(
                "sun scale={:.2} brightness={:.2}",
                s.scale(),
                s.brightness()
            ),
            Self::Bars(b) => {
                let heights: Vec<String> =
                    b.bars().iter().map(|bar| format!("{:.2}", bar.height)).collect();
                format!("bars [{}]", heights.join(" "))
            }
        }
    }
}

impl MusicResponder for Responder {
    fn on_initialize(&mut self, controller: &MusicController) {
        self.as_responder_mut().on_initialize(controller);
        log::info!("Music Responder ({}): Initialized.", self.kind());
    }

    fn on_track_start(&mut self, clock: &PlaybackClock) {
        self.as_responder_mut().on_track_start(clock);
    }

    fn on_track_end(&mut self, clock: &PlaybackClock) {
        self.as_responder_mut().on_track_end(clock);
    }

    fn on_tick(&mut self, controller: &MusicController, delta_s: f32) {
        self.as_responder_mut().on_tick(controller, delta_s);
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::audio::{AudioAsset, SimulatedTransport, SpectrumAnalyzer};
    use crate::music::{MusicController, Song, Track};
    use crate::params::{ControllerSettings, TrackConfig};

    /// Analyzer producing a ramp from -clamp to +clamp across the bands
    pub struct RampAnalyzer;

    impl SpectrumAnalyzer for RampAnalyzer {
        fn analyze(&mut self, _: &AudioAsset, _: f32, _: f32, resolution: usize) -> Vec<f32> {
            let last = resolution.saturating_sub(1).max(1) as f32;
            (0..resolution)
                .map(|i| -60.0 + 120.0 * i as f32 / last)
                .collect()
        }
    }

    /// Armed controller with a 100 s master "lead" (5 bands, linear response)
    pub fn playing_controller() -> MusicController {
        let asset = Arc::new(AudioAsset::from_samples("lead", vec![0.0; 1000], 10));
        let config = TrackConfig {
            spectrum_resolution: 5,
            spectrum_power_factor: 1.0,
            ..TrackConfig::new("lead", "lead.wav")
        };
        let song = Song::new(Track::new(config, Some(asset)), Vec::new());
        let mut controller = MusicController::new(
            "Music Controller",
            song,
            ControllerSettings::default(),
            Box::new(RampAnalyzer),
            Box::new(SimulatedTransport::new()),
        );
        controller.arm();
        controller.play(0.0, 0.0);
        controller.tick(0.0);
        controller
    }
}
