//! A single audio source and its spectrum buffer.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::audio::{AudioAsset, SpectrumAnalyzer};
use crate::error::ConfigError;
use crate::params::TrackConfig;

/// Stable track identifier, unique within a song
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TrackId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for TrackId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for TrackId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of arming a single track
#[derive(Debug, Clone, PartialEq)]
pub enum ArmOutcome {
    Armed,

    /// Armed, but the track's length differs from the master's (informational)
    DurationMismatch { track_s: f32, master_s: f32 },

    /// No audio asset attached
    MissingSource,

    /// Asset attached but holds no playable audio
    InvalidSource,

    InvalidConfig(ConfigError),
}

impl ArmOutcome {
    pub fn is_armed(&self) -> bool {
        matches!(self, Self::Armed | Self::DurationMismatch { .. })
    }
}

/// One audio source plus its most recent spectrum
#[derive(Debug, Clone)]
pub struct Track {
    config: TrackConfig,
    source: Option<Arc<AudioAsset>>,
    spectrum: Vec<f32>,
    min_observed: f32,
    max_observed: f32,
    armed: bool,
}

impl Track {
    /// Create an unarmed track with a flat spectrum at `-clamp`
    pub fn new(config: TrackConfig, source: Option<Arc<AudioAsset>>) -> Self {
        let clamp = config.spectrum_clamp;
        Self {
            spectrum: vec![-clamp; config.spectrum_resolution],
            min_observed: clamp,
            max_observed: -clamp,
            config,
            source,
            armed: false,
        }
    }

    /// Validate the source and reset the spectrum
    ///
    /// With a master duration hint (detail tracks), a length mismatch is
    /// logged but the track still arms.
    pub fn arm(&mut self, master_duration_hint: Option<f32>) -> ArmOutcome {
        self.armed = false;

        if let Err(e) = self.config.validate() {
            log::warn!("(Track {}): Invalid configuration: {}", self.id(), e);
            return ArmOutcome::InvalidConfig(e);
        }
        let Some(source) = self.source.as_ref() else {
            log::warn!("(Track {}): No audio source attached.", self.id());
            return ArmOutcome::MissingSource;
        };
        if !source.is_valid() {
            log::warn!(
                "(Track {}): Audio source ({}) holds no playable audio.",
                self.id(),
                source.name()
            );
            return ArmOutcome::InvalidSource;
        }
        let track_s = source.duration_s();

        let clamp = self.config.spectrum_clamp;
        self.spectrum = vec![-clamp; self.config.spectrum_resolution];
        self.min_observed = clamp;
        self.max_observed = -clamp;
        self.armed = true;

        match master_duration_hint {
            Some(master_s) if master_s != track_s => {
                log::warn!(
                    "(Track {}): Detail track duration ({}) does not match master track duration ({}).",
                    self.id(),
                    track_s,
                    master_s
                );
                ArmOutcome::DurationMismatch { track_s, master_s }
            }
            _ => ArmOutcome::Armed,
        }
    }

    pub fn disarm(&mut self) {
        self.armed = false;
    }

    /// Recompute the spectrum for the window starting at `current_time_s`
    ///
    /// Band values are clamped to `[-clamp, clamp]` (NaN becomes `-clamp`)
    /// before being stored and before updating the observed bounds. A result of the wrong length
    /// still updates the bounds with every value; the stored spectrum is
    /// then padded with `-clamp` or truncated to the configured resolution.
    pub fn refresh_spectrum(&mut self, analyzer: &mut dyn SpectrumAnalyzer, current_time_s: f32) {
        if !self.armed {
            return;
        }
        let Some(source) = self.source.as_ref() else {
            return;
        };

        let clamp = self.config.spectrum_clamp;
        let mut spectrum = analyzer.analyze(
            source,
            current_time_s,
            self.config.spectrum_window_s,
            self.config.spectrum_resolution,
        );

        for value in spectrum.iter_mut() {
            // NaN bands read as silence
            let clamped = if value.is_nan() {
                -clamp
            } else {
                (*value).clamp(-clamp, clamp)
            };
            self.max_observed = self.max_observed.max(clamped);
            self.min_observed = self.min_observed.min(clamped);
            *value = clamped;
        }

        spectrum.resize(self.config.spectrum_resolution, -clamp);
        self.spectrum = spectrum;
    }

    /// Band value nearest to `normalized_frequency` (no interpolation)
    ///
    /// Returns `-clamp` while unarmed.
    pub fn evaluate_raw_frequency(&self, normalized_frequency: f32) -> f32 {
        let clamp = self.config.spectrum_clamp;
        if !self.armed {
            return -clamp;
        }

        let last_band = self.config.spectrum_resolution.saturating_sub(1) as f32;
        let index = (normalized_frequency.clamp(0.0, 1.0) * last_band).round() as usize;
        self.spectrum.get(index).copied().unwrap_or(-clamp)
    }

    /// Raw band value clamped to `[-clamp, clamp]`; 0 while unarmed
    pub fn evaluate_clamped_frequency(&self, normalized_frequency: f32) -> f32 {
        if !self.armed {
            return 0.0;
        }
        let clamp = self.config.spectrum_clamp;
        self.evaluate_raw_frequency(normalized_frequency)
            .clamp(-clamp, clamp)
    }

    /// Band value mapped to [0, 1] and shaped by the power factor; 0 while unarmed
    pub fn evaluate_normalized_frequency(&self, normalized_frequency: f32) -> f32 {
        if !self.armed {
            return 0.0;
        }
        let clamp = self.config.spectrum_clamp;
        let clamped = self.evaluate_clamped_frequency(normalized_frequency);
        let normalized = (clamped + clamp) / (2.0 * clamp);
        // powf(0.0) is 1 even at the floor
        if normalized <= 0.0 {
            return 0.0;
        }
        normalized.powf(self.config.spectrum_power_factor)
    }

    pub fn id(&self) -> &TrackId {
        &self.config.id
    }

    pub fn config(&self) -> &TrackConfig {
        &self.config
    }

    pub fn source(&self) -> Option<&Arc<AudioAsset>> {
        self.source.as_ref()
    }

    /// Length of the attached asset (0 without one)
    pub fn duration_s(&self) -> f32 {
        self.source.as_ref().map_or(0.0, |s| s.duration_s())
    }

    pub fn spectrum(&self) -> &[f32] {
        &self.spectrum
    }

    /// Lowest clamped magnitude seen since arming
    ///
    /// Not used by normalization, which maps the fixed `[-clamp, clamp]`
    /// range instead.
    pub fn min_observed(&self) -> f32 {
        self.min_observed
    }

    /// Highest clamped magnitude seen since arming
    pub fn max_observed(&self) -> f32 {
        self.max_observed
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }
}
