//! A row of spectrum bars over one track.

use glam::Vec3;

use super::MusicResponder;
use crate::music::MusicController;
use crate::params::BarParams;

/// One bar: where it stands, which frequency it samples, how tall it is
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub position: Vec3,
    pub frequency: f32,
    pub height: f32,
}

#[derive(Debug, Clone)]
pub struct SpectrumBars {
    params: BarParams,
    bars: Vec<Bar>,
}

impl SpectrumBars {
    pub fn new(params: BarParams) -> Self {
        Self {
            params,
            bars: Vec::new(),
        }
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    fn spawn_bars(&mut self) {
        log::info!(
            "Spectrum Bar ({}): Spawning {} bars...",
            self.params.track,
            self.params.number_of_bars
        );
        let origin = Vec3::from_array(self.params.origin);
        let count = self.params.number_of_bars;
        self.bars = (0..count)
            .map(|i| Bar {
                position: origin + Vec3::X * self.params.bar_distance * i as f32,
                frequency: i as f32 / count as f32,
                height: 0.0,
            })
            .collect();
    }

    fn divisor(&self) -> f32 {
        if self.params.divisor > 0.0 {
            self.params.divisor
        } else {
            1.0
        }
    }
}

impl MusicResponder for SpectrumBars {
    fn on_initialize(&mut self, _controller: &MusicController) {
        if self.params.divisor <= 0.0 {
            log::warn!(
                "Spectrum Bar ({}): Divisor must be positive ({}), using 1.",
                self.params.track,
                self.params.divisor
            );
        }
        self.spawn_bars();
    }

    fn on_tick(&mut self, controller: &MusicController, _delta_s: f32) {
        let divisor = self.divisor();
        let track = self.params.track.as_str();
        for bar in self.bars.iter_mut() {
            bar.height = controller.evaluate_normalized_spectrum(bar.frequency, track) / divisor;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::responder::test_support::playing_controller;

    fn params(count: usize, divisor: f32) -> BarParams {
        BarParams {
            track: "lead".into(),
            number_of_bars: count,
            bar_distance: 10.0,
            divisor,
            origin: [0.0, 5.0, 0.0],
        }
    }

    #[test]
    fn test_spawn_spreads_bars_over_frequencies() {
        let controller = playing_controller();
        let mut bars = SpectrumBars::new(params(4, 1.0));
        assert!(bars.bars().is_empty());

        bars.on_initialize(&controller);
        let frequencies: Vec<f32> = bars.bars().iter().map(|b| b.frequency).collect();
        assert_eq!(frequencies, vec![0.0, 0.25, 0.5, 0.75]);
        assert_eq!(bars.bars()[3].position, Vec3::new(30.0, 5.0, 0.0));
    }

    #[test]
    fn test_heights_follow_spectrum() {
        let controller = playing_controller();
        let mut bars = SpectrumBars::new(params(4, 2.0));
        bars.on_initialize(&controller);
        bars.on_tick(&controller, 0.016);

        let heights: Vec<f32> = bars.bars().iter().map(|b| b.height).collect();
        assert_eq!(heights, vec![0.0, 0.125, 0.25, 0.375]);
    }

    #[test]
    fn test_non_positive_divisor_falls_back() {
        let controller = playing_controller();
        let mut bars = SpectrumBars::new(params(2, 0.0));
        bars.on_initialize(&controller);
        bars.on_tick(&controller, 0.016);
        assert_eq!(bars.bars()[1].height, 0.5);
    }
}
