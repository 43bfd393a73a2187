//! Track lookup by identifier.

use std::collections::HashMap;

use super::TrackId;

/// Where a registered track lives in the controller's song
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackSlot {
    Master,
    /// Index into the song's detail tracks
    Detail(usize),
}

/// Maps track identifiers to the controller's track storage
///
/// Holds slots rather than tracks, so it is only meaningful alongside the
/// song it was built from and is rebuilt whenever the controller arms.
#[derive(Debug, Clone, Default)]
pub struct TrackRegistry {
    slots: HashMap<TrackId, TrackSlot>,
}

impl TrackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `id`. Returns false (and leaves the existing entry alone)
    /// when the identifier is already taken.
    pub fn insert(&mut self, id: TrackId, slot: TrackSlot) -> bool {
        if self.slots.contains_key(&id) {
            return false;
        }
        self.slots.insert(id, slot);
        true
    }

    pub fn get(&self, id: &str) -> Option<TrackSlot> {
        self.slots.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.slots.contains_key(id)
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Registered identifiers, sorted
    pub fn ids(&self) -> Vec<&TrackId> {
        let mut ids: Vec<&TrackId> = self.slots.keys().collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_rejects_duplicates() {
        let mut registry = TrackRegistry::new();
        assert!(registry.insert(TrackId::from("master"), TrackSlot::Master));
        assert!(registry.insert(TrackId::from("bass"), TrackSlot::Detail(0)));
        assert!(!registry.insert(TrackId::from("bass"), TrackSlot::Detail(1)));

        assert_eq!(registry.get("bass"), Some(TrackSlot::Detail(0)));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_lookup_and_clear() {
        let mut registry = TrackRegistry::new();
        registry.insert(TrackId::from("lead"), TrackSlot::Detail(3));
        registry.insert(TrackId::from("drums"), TrackSlot::Master);

        assert!(registry.contains("lead"));
        assert_eq!(registry.get("missing"), None);
        assert_eq!(
            registry.ids(),
            vec![&TrackId::from("drums"), &TrackId::from("lead")]
        );

        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.get("lead"), None);
    }
}
