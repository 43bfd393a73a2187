//! Music controller: arming, playback commands, spectrum refresh and queries.

use std::sync::Arc;
use std::time::Instant;

use super::{
    MusicEvent, Observers, PlaybackClock, Song, SubscriptionId, Track, TrackRegistry, TrackSlot,
};
use crate::audio::{AudioAsset, AudioTransport, SpectrumAnalyzer, TransportEvent};
use crate::params::ControllerSettings;

/// Controller lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Unarmed,
    /// Armed and idle (also after a reset, which keeps the position)
    Armed,
    Playing,
    Paused,
    Stopped,
}

/// Owns the song, tracks playback position and drives spectrum refresh
///
/// Single-threaded: `tick` refreshes every armed track before returning,
/// so queries made after `tick` in the same frame see that frame's spectra.
/// Commands never fail; misuse is logged and ignored, so callers should
/// check [`MusicController::state`] rather than expect errors.
pub struct MusicController {
    name: String,
    song: Song,
    settings: ControllerSettings,
    registry: TrackRegistry,
    clock: PlaybackClock,
    state: ControllerState,
    analyzer: Box<dyn SpectrumAnalyzer>,
    transport: Box<dyn AudioTransport>,
    observers: Observers,
    play_started_at: Option<Instant>,
}

impl MusicController {
    pub fn new(
        name: impl Into<String>,
        song: Song,
        settings: ControllerSettings,
        analyzer: Box<dyn SpectrumAnalyzer>,
        transport: Box<dyn AudioTransport>,
    ) -> Self {
        Self {
            name: name.into(),
            song,
            settings,
            registry: TrackRegistry::new(),
            clock: PlaybackClock::new(),
            state: ControllerState::Unarmed,
            analyzer,
            transport,
            observers: Observers::new(),
            play_started_at: None,
        }
    }

    /// Arm, then start playing if the settings ask for it
    pub fn begin_play(&mut self) {
        self.arm();
        if self.is_armed() && self.settings.play_on_start {
            self.play(self.settings.start_percent, 0.0);
        }
    }

    /// Arm the master track, then every detail track against its duration
    ///
    /// A master that fails to arm leaves the controller unarmed. Detail
    /// tracks that fail to arm or reuse an identifier are removed from the
    /// song for good.
    pub fn arm(&mut self) {
        if self.is_armed() {
            self.disarm();
        }

        let outcome = self.song.master.arm(None);
        if !outcome.is_armed() {
            log::warn!(
                "({}): Failed to arm track. Couldn't arm master track ({:?}).",
                self.name,
                outcome
            );
            return;
        }

        let master_duration_s = self.song.master.duration_s();
        self.clock.set_duration(master_duration_s);
        self.registry
            .insert(self.song.master.id().clone(), TrackSlot::Master);
        log::info!(
            "({}): Master track ({}) armed, {:.2}s.",
            self.name,
            self.song.master.id(),
            master_duration_s
        );

        let detail_tracks = std::mem::take(&mut self.song.detail_tracks);
        let mut kept = Vec::with_capacity(detail_tracks.len());
        for mut track in detail_tracks {
            if self.registry.contains(track.id().as_str()) {
                log::warn!(
                    "({}): Trying to arm track with duplicate track ID ({}), dropping it.",
                    self.name,
                    track.id()
                );
                continue;
            }

            let outcome = track.arm(Some(master_duration_s));
            if !outcome.is_armed() {
                log::warn!(
                    "({}): Couldn't arm detail track ({}): {:?}, dropping it.",
                    self.name,
                    track.id(),
                    outcome
                );
                continue;
            }

            self.registry
                .insert(track.id().clone(), TrackSlot::Detail(kept.len()));
            log::info!("({}): Armed detail track ({}).", self.name, track.id());
            kept.push(track);
        }
        self.song.detail_tracks = kept;

        self.state = ControllerState::Armed;
        log::info!(
            "({}): Track armed with {} detail track(s).",
            self.name,
            self.song.detail_tracks.len()
        );
    }

    /// Clear the registry and drop every track's armed flag
    ///
    /// Playback is halted as well; an unarmed controller never plays.
    pub fn disarm(&mut self) {
        if !self.is_armed() {
            return;
        }
        if self.clock.is_playing() {
            self.transport.stop();
        }
        self.clock.halt();
        self.registry.clear();
        self.song.master.disarm();
        for track in self.song.detail_tracks.iter_mut() {
            track.disarm();
        }
        self.state = ControllerState::Unarmed;
        log::info!("({}): Track disarmed.", self.name);
    }

    /// Start playback at `start_percent`, fading in over `fade_in_s`
    ///
    /// Calling this while already playing only clears the playing flag
    /// (see [`MusicController::reset`]); it never restarts the song.
    pub fn play(&mut self, start_percent: f32, fade_in_s: f32) {
        if !self.is_armed() {
            log::warn!("({}): Trying to play a song but not armed!", self.name);
            return;
        }

        if self.clock.is_playing() {
            self.reset();
            return;
        }

        self.clock.start(start_percent);
        self.play_started_at = Some(Instant::now());
        if let Some(asset) = self.song.master.source() {
            self.transport
                .play(asset, self.clock.song_time_s(), fade_in_s);
        }
        self.state = ControllerState::Playing;
        self.observers.notify(MusicEvent::TrackStarted, &self.clock);
        log::info!(
            "({}): Playing track from {}...",
            self.name,
            self.clock.time_text()
        );
    }

    pub fn pause(&mut self) {
        self.clock.halt();
        self.transport.pause();
        if self.is_armed() {
            self.state = ControllerState::Paused;
        }
        self.observers.notify(MusicEvent::TrackPaused, &self.clock);
        log::info!("({}): Track paused at {}.", self.name, self.clock.time_text());
    }

    /// Continue after a pause; progress reports stay relative to the last play
    pub fn resume(&mut self) {
        if !self.is_armed() {
            log::warn!("({}): Trying to resume a song but not armed!", self.name);
            return;
        }

        self.clock.resume();
        self.transport.resume();
        self.state = ControllerState::Playing;
        log::info!("({}): Track resumed.", self.name);
    }

    /// Stop playback and rewind to the start of the song
    pub fn stop(&mut self) {
        self.clock.stop();
        self.transport.stop();
        if self.is_armed() {
            self.state = ControllerState::Stopped;
        }
        self.observers.notify(MusicEvent::TrackEnded, &self.clock);

        match self.play_started_at.take() {
            Some(started) => log::info!(
                "({}): Track finished after {:.2}s.",
                self.name,
                started.elapsed().as_secs_f32()
            ),
            None => log::info!("({}): Track finished.", self.name),
        }
    }

    /// Clear the playing flag only; position and transport are untouched
    pub fn reset(&mut self) {
        self.clock.halt();
        if self.is_armed() {
            self.state = ControllerState::Armed;
        }
        log::debug!("({}): Track reset.", self.name);
    }

    /// Transport progress callback (relative to the last play call)
    pub fn on_playback_percent_update(&mut self, reported_percent: f32) {
        self.clock.apply_reported_percent(reported_percent);
    }

    /// Transport end-of-audio callback
    pub fn on_audio_finished(&mut self) {
        self.stop();
    }

    /// Advance one frame: deliver transport events, then refresh spectra
    pub fn tick(&mut self, delta_s: f32) {
        for event in self.transport.poll_events(delta_s) {
            match event {
                TransportEvent::PlaybackPercent(percent) => {
                    self.on_playback_percent_update(percent)
                }
                TransportEvent::Finished => self.on_audio_finished(),
            }
        }

        if self.clock.is_playing() {
            self.refresh_spectra();
        }
    }

    /// Recompute every armed track's spectrum at the current song time
    fn refresh_spectra(&mut self) {
        let time_s = self.clock.song_time_s();
        self.song
            .master
            .refresh_spectrum(self.analyzer.as_mut(), time_s);
        for track in self.song.detail_tracks.iter_mut() {
            track.refresh_spectrum(self.analyzer.as_mut(), time_s);
        }
        log::debug!("({}): Refreshed spectra at {:.3}s.", self.name, time_s);
    }

    /// Normalized [0, 1] signal for `track_id` at `normalized_frequency`
    ///
    /// Returns 0 for unknown or unarmed tracks. A pure read of the current
    /// spectrum, safe to call any number of times per frame.
    pub fn evaluate_normalized_spectrum(&self, normalized_frequency: f32, track_id: &str) -> f32 {
        self.track(track_id)
            .map_or(0.0, |track| track.evaluate_normalized_frequency(normalized_frequency))
    }

    /// Armed track registered under `track_id`
    pub fn track(&self, track_id: &str) -> Option<&Track> {
        let track = match self.registry.get(track_id)? {
            TrackSlot::Master => &self.song.master,
            TrackSlot::Detail(index) => self.song.detail_tracks.get(index)?,
        };
        track.is_armed().then_some(track)
    }

    /// Audio asset of the armed track registered under `track_id`
    pub fn track_source(&self, track_id: &str) -> Option<&Arc<AudioAsset>> {
        self.track(track_id).and_then(Track::source)
    }

    pub fn subscribe(
        &mut self,
        event: MusicEvent,
        callback: impl FnMut(MusicEvent, &PlaybackClock) + 'static,
    ) -> SubscriptionId {
        self.observers.subscribe(event, callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn current_song_time_s(&self) -> f32 {
        self.clock.song_time_s()
    }

    pub fn current_song_percent(&self) -> f32 {
        self.clock.song_percent()
    }

    pub fn current_song_duration_s(&self) -> f32 {
        self.clock.song_duration_s()
    }

    pub fn current_time_text(&self) -> String {
        self.clock.time_text()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn is_armed(&self) -> bool {
        self.state != ControllerState::Unarmed
    }

    pub fn is_playing(&self) -> bool {
        self.clock.is_playing()
    }

    pub fn clock(&self) -> &PlaybackClock {
        &self.clock
    }

    pub fn song(&self) -> &Song {
        &self.song
    }

    pub fn registry(&self) -> &TrackRegistry {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SimulatedTransport;
    use crate::params::TrackConfig;

    /// Analyzer answering every band with the window start time
    struct TimeAnalyzer;

    impl SpectrumAnalyzer for TimeAnalyzer {
        fn analyze(&mut self, _: &AudioAsset, start_s: f32, _: f32, resolution: usize) -> Vec<f32> {
            vec![start_s; resolution]
        }
    }

    fn track(id: &str, seconds: usize) -> Track {
        let asset = AudioAsset::from_samples(id, vec![0.0; seconds * 10], 10);
        Track::new(TrackConfig::new(id, "unused.wav"), Some(Arc::new(asset)))
    }

    fn controller(song: Song) -> MusicController {
        MusicController::new(
            "Music Controller",
            song,
            ControllerSettings::default(),
            Box::new(TimeAnalyzer),
            Box::new(SimulatedTransport::new()),
        )
    }

    #[test]
    fn test_arm_registers_master_and_details() {
        let mut controller = controller(Song::new(
            track("master", 100),
            vec![track("bass", 100), track("lead", 100)],
        ));
        controller.arm();

        assert_eq!(controller.state(), ControllerState::Armed);
        assert_eq!(controller.current_song_duration_s(), 100.0);
        assert_eq!(controller.registry().len(), 3);
        assert!(controller.track("lead").is_some());
    }

    #[test]
    fn test_detail_colliding_with_master_is_dropped() {
        let mut controller = controller(Song::new(
            track("master", 100),
            vec![track("master", 50), track("bass", 100)],
        ));
        controller.arm();

        assert_eq!(controller.song().detail_tracks.len(), 1);
        assert_eq!(controller.song().detail_tracks[0].id().as_str(), "bass");
        assert_eq!(controller.track("master").unwrap().duration_s(), 100.0);
    }

    #[test]
    fn test_tick_refreshes_only_while_playing() {
        let mut controller = controller(Song::new(track("master", 100), Vec::new()));
        controller.arm();

        controller.tick(1.0);
        assert_eq!(controller.track("master").unwrap().spectrum()[0], -60.0);

        controller.play(0.0, 0.0);
        controller.tick(1.0);
        // Transport moved one second in, the refresh used that time
        assert_eq!(controller.current_song_time_s(), 1.0);
        assert_eq!(controller.track("master").unwrap().spectrum()[0], 1.0);

        controller.pause();
        controller.tick(1.0);
        assert_eq!(controller.track("master").unwrap().spectrum()[0], 1.0);
    }

    #[test]
    fn test_disarm_clears_registry() {
        let mut controller = controller(Song::new(track("master", 100), vec![track("bass", 100)]));
        controller.arm();
        controller.play(0.0, 0.0);
        controller.disarm();

        assert_eq!(controller.state(), ControllerState::Unarmed);
        assert!(!controller.is_playing());
        assert!(controller.registry().is_empty());
        assert!(!controller.song().master.is_armed());
        assert_eq!(controller.evaluate_normalized_spectrum(0.5, "bass"), 0.0);

        controller.arm();
        assert!(controller.track("bass").is_some());
    }

    #[test]
    fn test_track_source_lookup() {
        let mut controller = controller(Song::new(track("master", 100), Vec::new()));
        assert!(controller.track_source("master").is_none());

        controller.arm();
        assert_eq!(controller.track_source("master").unwrap().name(), "master");
        assert!(controller.track_source("nope").is_none());
    }
}
