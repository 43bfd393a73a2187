//! Track and song configuration supplied by the host.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::music::TrackId;

/// Per-track spectrum configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackConfig {
    /// Identifier used by responders to query this track (unique per song)
    pub id: TrackId,

    /// WAV file backing this track (resolved to an audio asset at load time)
    pub source: Option<PathBuf>,

    /// Number of frequency bands in the spectrum (fixed once armed)
    pub spectrum_resolution: usize,

    /// Length of the analysis window (seconds)
    pub spectrum_window_s: f32,

    /// Symmetric magnitude bound, band values live in [-clamp, +clamp]
    pub spectrum_clamp: f32,

    /// Exponent applied to the normalized [0, 1] value (2.0 = quadratic response)
    pub spectrum_power_factor: f32,

    /// Debug colour (RGBA)
    pub colour: [u8; 4],
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            id: TrackId::from("TrackID"),
            source: None,
            spectrum_resolution: 64,
            spectrum_window_s: 0.1,
            spectrum_clamp: 60.0,
            spectrum_power_factor: 2.0,
            colour: [255, 255, 255, 255],
        }
    }
}

impl TrackConfig {
    /// Create a default configuration for the given identifier and source file
    pub fn new(id: impl Into<TrackId>, source: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            source: Some(source.into()),
            ..Self::default()
        }
    }

    /// Validate numeric ranges (a track with an invalid config never arms)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.spectrum_resolution == 0 {
            return Err(ConfigError::ZeroResolution);
        }
        if !self.spectrum_clamp.is_finite() || self.spectrum_clamp <= 0.0 {
            return Err(ConfigError::InvalidClamp(self.spectrum_clamp));
        }
        if !self.spectrum_window_s.is_finite() || self.spectrum_window_s <= 0.0 {
            return Err(ConfigError::InvalidWindow(self.spectrum_window_s));
        }
        if !self.spectrum_power_factor.is_finite() || self.spectrum_power_factor < 0.0 {
            return Err(ConfigError::InvalidPowerFactor(self.spectrum_power_factor));
        }
        Ok(())
    }
}

/// A song: one master track defining the timeline plus any number of detail tracks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SongConfig {
    pub master: TrackConfig,
    pub detail_tracks: Vec<TrackConfig>,
}

/// Controller start-up behaviour
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerSettings {
    /// Start playback as soon as the controller arms
    pub play_on_start: bool,

    /// Song position to start from when `play_on_start` is set (0..=1)
    pub start_percent: f32,
}

impl ControllerSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.start_percent) {
            return Err(ConfigError::InvalidStartPercent(self.start_percent));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_track_config_is_valid() {
        let config = TrackConfig::default();
        assert_eq!(config.spectrum_resolution, 64);
        assert_eq!(config.spectrum_clamp, 60.0);
        assert_eq!(config.spectrum_power_factor, 2.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_track_config_rejects_bad_ranges() {
        let mut config = TrackConfig::default();
        config.spectrum_resolution = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroResolution));

        let mut config = TrackConfig::default();
        config.spectrum_clamp = 0.0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidClamp(0.0)));

        let mut config = TrackConfig::default();
        config.spectrum_window_s = -1.0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidWindow(-1.0)));

        let mut config = TrackConfig::default();
        config.spectrum_power_factor = f32::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPowerFactor(_))
        ));
    }

    #[test]
    fn test_controller_settings_start_percent() {
        let mut settings = ControllerSettings::default();
        assert!(settings.validate().is_ok());
        settings.start_percent = 1.5;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_track_config_partial_json_uses_defaults() {
        let config: TrackConfig =
            serde_json::from_str(r#"{ "id": "bass", "spectrum_resolution": 32 }"#).unwrap();
        assert_eq!(config.id.as_str(), "bass");
        assert_eq!(config.spectrum_resolution, 32);
        assert_eq!(config.spectrum_window_s, 0.1);
        assert!(config.source.is_none());
    }
}
