//! Song position: the single source of truth for "when are we in the song".

/// Playback position and state, derived from transport progress reports
///
/// `song_time_s` is always recomputed as `song_percent * song_duration_s`;
/// no mutation touches one without the other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackClock {
    song_percent: f32,
    song_time_s: f32,
    song_duration_s: f32,
    is_playing: bool,
    /// Percent at the last play call; transport reports are relative to it
    initial_playback_percent: f32,
}

impl PlaybackClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the authoritative song length (the master track's duration)
    pub fn set_duration(&mut self, song_duration_s: f32) {
        self.song_duration_s = song_duration_s;
        self.set_percent(self.song_percent);
    }

    /// Begin playing from `start_percent`
    pub fn start(&mut self, start_percent: f32) {
        self.set_percent(start_percent);
        self.initial_playback_percent = start_percent;
        self.is_playing = true;
    }

    /// Clear the playing flag, keeping the position (pause and reset)
    pub fn halt(&mut self) {
        self.is_playing = false;
    }

    /// Set the playing flag again; reports stay relative to the last start
    pub fn resume(&mut self) {
        self.is_playing = true;
    }

    /// Stop and rewind to the beginning
    pub fn stop(&mut self) {
        self.is_playing = false;
        self.set_percent(0.0);
    }

    /// Apply a transport report of progress since the last start
    pub fn apply_reported_percent(&mut self, reported_percent: f32) {
        self.set_percent(self.initial_playback_percent + reported_percent);
    }

    fn set_percent(&mut self, percent: f32) {
        self.song_percent = percent;
        self.song_time_s = percent * self.song_duration_s;
    }

    pub fn song_percent(&self) -> f32 {
        self.song_percent
    }

    pub fn song_time_s(&self) -> f32 {
        self.song_time_s
    }

    pub fn song_duration_s(&self) -> f32 {
        self.song_duration_s
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn initial_playback_percent(&self) -> f32 {
        self.initial_playback_percent
    }

    /// Current position as `"MM : SS : CC"` (minutes, seconds, hundredths)
    pub fn time_text(&self) -> String {
        let total = (self.song_percent * self.song_duration_s).max(0.0);
        let minutes = (total / 60.0).floor() as u32;
        let seconds = (total % 60.0).floor() as u32;
        let hundredths = ((total % 1.0) * 100.0).floor() as u32;
        format!("{:02} : {:02} : {:02}", minutes, seconds, hundredths)
    }
}
