//! Music/spectrum core: tracks, playback position and the query API.
//!
//! The controller arms a song's tracks, follows the transport's progress
//! reports and refreshes each armed track's spectrum once per tick.
//! Responders only ever read through [`MusicController::evaluate_normalized_spectrum`].

mod clock;
mod controller;
mod observers;
mod registry;
mod song;
mod track;

// Re-export public types
pub use clock::PlaybackClock;
pub use controller::{ControllerState, MusicController};
pub use observers::{MusicEvent, Observers, SubscriptionId};
pub use registry::{TrackRegistry, TrackSlot};
pub use song::Song;
pub use track::{ArmOutcome, Track, TrackId};
