//! Windowed FFT spectrum analysis.

use rustfft::{num_complex::Complex, FftPlanner};
use std::f32::consts::PI;

use super::AudioAsset;
use crate::params::AnalyzerConfig;

/// External spectrum analysis function
///
/// Given an asset, a window start and length (seconds) and a band count,
/// returns one magnitude per band. Implementations must return promptly
/// (one window's worth of work) and be deterministic for the same inputs.
/// Callers tolerate a result whose length differs from `resolution`.
pub trait SpectrumAnalyzer {
    fn analyze(
        &mut self,
        asset: &AudioAsset,
        start_s: f32,
        window_s: f32,
        resolution: usize,
    ) -> Vec<f32>;
}

/// Hann-windowed FFT analyzer reporting per-band levels in dBFS
///
/// Bands split DC..Nyquist into equal widths. Samples outside the asset
/// are treated as silence, so windows hanging off either end are fine.
pub struct FftAnalyzer {
    config: AnalyzerConfig,
    planner: FftPlanner<f32>,
}

impl FftAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            config,
            planner: FftPlanner::new(),
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }
}

impl Default for FftAnalyzer {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}

impl SpectrumAnalyzer for FftAnalyzer {
    fn analyze(
        &mut self,
        asset: &AudioAsset,
        start_s: f32,
        window_s: f32,
        resolution: usize,
    ) -> Vec<f32> {
        if resolution == 0 {
            return Vec::new();
        }
        let floor_db = self.config.floor_db;
        if !asset.is_valid() {
            return vec![floor_db; resolution];
        }

        let sample_rate = asset.sample_rate() as f32;
        let window_samples = ((window_s * sample_rate).round() as usize).max(1);
        let fft_size = self.config.fft_size_for(window_samples, resolution);
        let start = (start_s * sample_rate).round() as i64;
        let samples = asset.samples();

        // Windowed slice, zero padded up to the FFT size
        let mut buffer: Vec<Complex<f32>> = (0..fft_size)
            .map(|i| {
                if i >= window_samples {
                    return Complex::new(0.0, 0.0);
                }
                let index = start + i as i64;
                let sample = usize::try_from(index)
                    .ok()
                    .and_then(|idx| samples.get(idx))
                    .copied()
                    .unwrap_or(0.0);
                Complex::new(sample * hann_window(i, window_samples), 0.0)
            })
            .collect();

        let fft = self.planner.plan_fft_forward(fft_size);
        fft.process(&mut buffer);

        // Single-sided amplitude: a full-scale sine peaks at 0 dBFS
        let window_sum: f32 = (0..window_samples)
            .map(|i| hann_window(i, window_samples))
            .sum();
        let scale = 2.0 / window_sum;

        let half = fft_size / 2;
        (0..resolution)
            .map(|band| {
                let lo = band * half / resolution;
                let hi = ((band + 1) * half / resolution).max(lo + 1);
                let mean = buffer[lo..hi].iter().map(|c| c.norm()).sum::<f32>() / (hi - lo) as f32;
                amplitude_to_db(mean * scale, floor_db)
            })
            .collect()
    }
}

/// Hann window function for FFT analysis
pub fn hann_window(index: usize, size: usize) -> f32 {
    if size <= 1 {
        return 1.0;
    }
    0.5 * (1.0 - ((2.0 * PI * index as f32) / (size as f32 - 1.0)).cos())
}

/// Linear amplitude to dBFS, never below `floor_db`
pub fn amplitude_to_db(amplitude: f32, floor_db: f32) -> f32 {
    if amplitude <= 0.0 || !amplitude.is_finite() {
        return floor_db;
    }
    (20.0 * amplitude.log10()).max(floor_db)
}
