//! Track lifecycle notifications.

use std::fmt;

use super::PlaybackClock;

/// Lifecycle event broadcast by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MusicEvent {
    TrackStarted,
    TrackEnded,
    TrackPaused,
}

/// Handle returned by [`Observers::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(MusicEvent, &PlaybackClock)>;

/// Registered callbacks, invoked synchronously in registration order
#[derive(Default)]
pub struct Observers {
    next_id: u64,
    entries: Vec<(SubscriptionId, MusicEvent, Callback)>,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(
        &mut self,
        event: MusicEvent,
        callback: impl FnMut(MusicEvent, &PlaybackClock) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, event, Box::new(callback)));
        id
    }

    /// Returns false if `id` was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn notify(&mut self, event: MusicEvent, clock: &PlaybackClock) {
        for (_, subscribed, callback) in self.entries.iter_mut() {
            if *subscribed == event {
                callback(event, clock);
            }
        }
    }

    /// Number of callbacks registered for `event`
    pub fn count(&self, event: MusicEvent) -> usize {
        self.entries.iter().filter(|(_, e, _)| *e == event).count()
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("subscriptions", &self.entries.len())
            .finish()
    }
}
