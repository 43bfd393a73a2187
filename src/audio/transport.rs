//! Audio transport: the host's playback device, seen from the controller.

use std::sync::Arc;

use super::AudioAsset;

/// Notification delivered by a transport since the previous poll
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransportEvent {
    /// Progress since the last `play` call, as a fraction of the asset's
    /// full duration (relative, not an absolute song position)
    PlaybackPercent(f32),

    /// Playback reached the end of the asset
    Finished,
}

/// Playback device driven by the music controller
///
/// Commands never fail from the controller's point of view; a transport
/// that cannot honour one logs and carries on.
pub trait AudioTransport {
    /// Start playing `asset` from `start_s` seconds, fading in over `fade_in_s`
    fn play(&mut self, asset: &Arc<AudioAsset>, start_s: f32, fade_in_s: f32);

    fn pause(&mut self);

    fn resume(&mut self);

    fn stop(&mut self);

    /// Drain events raised since the last poll. `elapsed_s` is the host
    /// frame time, used by transports that have no clock of their own.
    fn poll_events(&mut self, elapsed_s: f32) -> Vec<TransportEvent>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeadState {
    Stopped,
    Playing,
    Paused,
}

/// Headless transport advancing a virtual play head by host frame time
///
/// Produces the same event stream as a real device, so the controller
/// behaves identically with or without audio output.
#[derive(Debug)]
pub struct SimulatedTransport {
    state: HeadState,
    duration_s: f32,
    start_s: f32,
    elapsed_s: f32,
    fade_in_s: f32,
}

impl SimulatedTransport {
    pub fn new() -> Self {
        Self {
            state: HeadState::Stopped,
            duration_s: 0.0,
            start_s: 0.0,
            elapsed_s: 0.0,
            fade_in_s: 0.0,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.state == HeadState::Playing
    }

    pub fn is_paused(&self) -> bool {
        self.state == HeadState::Paused
    }

    /// Absolute play head position within the asset (seconds)
    pub fn position_s(&self) -> f32 {
        self.start_s + self.elapsed_s
    }

    /// Output gain of the linear fade-in (1.0 once complete)
    pub fn gain(&self) -> f32 {
        if self.fade_in_s <= 0.0 {
            return 1.0;
        }
        (self.elapsed_s / self.fade_in_s).min(1.0)
    }
}

impl Default for SimulatedTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioTransport for SimulatedTransport {
    fn play(&mut self, asset: &Arc<AudioAsset>, start_s: f32, fade_in_s: f32) {
        self.duration_s = asset.duration_s();
        self.start_s = start_s.max(0.0);
        self.elapsed_s = 0.0;
        self.fade_in_s = fade_in_s.max(0.0);
        self.state = HeadState::Playing;
    }

    fn pause(&mut self) {
        if self.state == HeadState::Playing {
            self.state = HeadState::Paused;
        }
    }

    fn resume(&mut self) {
        if self.state == HeadState::Paused {
            self.state = HeadState::Playing;
        }
    }

    fn stop(&mut self) {
        self.state = HeadState::Stopped;
    }

    fn poll_events(&mut self, elapsed_s: f32) -> Vec<TransportEvent> {
        if self.state != HeadState::Playing || self.duration_s <= 0.0 {
            return Vec::new();
        }

        self.elapsed_s += elapsed_s.max(0.0);

        if self.position_s() >= self.duration_s {
            self.elapsed_s = (self.duration_s - self.start_s).max(0.0);
            self.state = HeadState::Stopped;
            return vec![
                TransportEvent::PlaybackPercent(self.elapsed_s / self.duration_s),
                TransportEvent::Finished,
            ];
        }

        vec![TransportEvent::PlaybackPercent(
            self.elapsed_s / self.duration_s,
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(seconds: usize) -> Arc<AudioAsset> {
        Arc::new(AudioAsset::from_samples("tone", vec![0.0; seconds * 100], 100))
    }

    #[test]
    fn test_reports_progress_relative_to_play() {
        let mut transport = SimulatedTransport::new();
        transport.play(&asset(10), 5.0, 0.0);

        let events = transport.poll_events(1.0);
        assert_eq!(events, vec![TransportEvent::PlaybackPercent(0.1)]);
        assert_eq!(transport.position_s(), 6.0);
    }

    #[test]
    fn test_finishes_at_end_of_asset() {
        let mut transport = SimulatedTransport::new();
        transport.play(&asset(10), 8.0, 0.0);

        let events = transport.poll_events(5.0);
        assert_eq!(
            events,
            vec![
                TransportEvent::PlaybackPercent(0.2),
                TransportEvent::Finished
            ]
        );
        assert!(!transport.is_playing());
        assert!(transport.poll_events(1.0).is_empty());
    }

    #[test]
    fn test_pause_freezes_play_head() {
        let mut transport = SimulatedTransport::new();
        transport.play(&asset(10), 0.0, 0.0);
        transport.poll_events(1.0);

        transport.pause();
        assert!(transport.is_paused());
        assert!(transport.poll_events(3.0).is_empty());
        assert_eq!(transport.position_s(), 1.0);

        transport.resume();
        assert_eq!(
            transport.poll_events(1.0),
            vec![TransportEvent::PlaybackPercent(0.2)]
        );
    }

    #[test]
    fn test_fade_in_gain() {
        let mut transport = SimulatedTransport::new();
        transport.play(&asset(10), 0.0, 2.0);
        assert_eq!(transport.gain(), 0.0);
        transport.poll_events(1.0);
        assert_eq!(transport.gain(), 0.5);
        transport.poll_events(2.0);
        assert_eq!(transport.gain(), 1.0);
    }
}
