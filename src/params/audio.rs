//! Spectrum analysis configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for the built-in FFT spectrum analyzer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Smallest FFT size used, whatever the window length (must be power of 2)
    pub min_fft_size: usize,

    /// Level reported for silent bands (dBFS)
    pub floor_db: f32,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            min_fft_size: 1024,
            floor_db: -120.0,
        }
    }
}

impl AnalyzerConfig {
    /// FFT size for a window of `window_samples` split into `resolution` bands
    pub fn fft_size_for(&self, window_samples: usize, resolution: usize) -> usize {
        window_samples
            .max(resolution * 2)
            .max(self.min_fft_size)
            .next_power_of_two()
    }

    /// Validate configuration (FFT size must be power of 2)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_fft_size.is_power_of_two() {
            return Err(ConfigError::FftSizeNotPowerOfTwo(self.min_fft_size));
        }
        Ok(())
    }
}
