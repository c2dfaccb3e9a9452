//! Tracks joining pairs of stations.

use serde::{Deserialize, Serialize};

/// Durability every normal track is created with and stays at.
pub const FULL_DURABILITY: u32 = 10;

/// Track construction kind. Only one kind exists today; breakable tracks are
/// deliberately out of scope and `Normal` tracks shrug off damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackKind {
    Normal,
}

impl TrackKind {
    pub fn label(self) -> &'static str {
        match self {
            TrackKind::Normal => "Normal",
        }
    }
}

/// A stretch of rail between two stations.
///
/// The endpoints are stored in creation order but the track is logically
/// undirected: trains traverse it both ways and adjacency checks ignore
/// orientation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    id: String,
    from: String,
    to: String,
    kind: TrackKind,
    durability: u32,
}

impl Track {
    pub fn new(id: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            from: from.into(),
            to: to.into(),
            kind: TrackKind::Normal,
            durability: FULL_DURABILITY,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn from_station(&self) -> &str {
        &self.from
    }

    pub fn to_station(&self) -> &str {
        &self.to
    }

    pub fn kind(&self) -> TrackKind {
        self.kind
    }

    pub fn durability(&self) -> u32 {
        self.durability
    }

    /// Whether this track joins `a` and `b`, in either orientation.
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }

    /// Normal tracks do not lose durability.
    pub fn damage(&mut self, _amount: u32) {}

    /// Normal tracks are always at full durability already.
    pub fn repair(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_track_is_normal_at_full_durability() {
        let t = Track::new("t1", "a", "b");
        assert_eq!(t.kind(), TrackKind::Normal);
        assert_eq!(t.durability(), FULL_DURABILITY);
    }

    #[test]
    fn test_connects_ignores_orientation() {
        let t = Track::new("t1", "a", "b");
        assert!(t.connects("a", "b"));
        assert!(t.connects("b", "a"));
        assert!(!t.connects("a", "c"));
    }

    #[test]
    fn test_damage_and_repair_are_inert() {
        let mut t = Track::new("t1", "a", "b");
        t.damage(7);
        assert_eq!(t.durability(), FULL_DURABILITY);
        t.repair();
        assert_eq!(t.durability(), FULL_DURABILITY);
    }
}
