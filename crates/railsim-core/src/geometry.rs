//! 2D geometry for the rail map: positions, distances, advance-toward stepping.

use serde::{Deserialize, Serialize};

/// A point on the 2D rail map.
///
/// Equality is exact; stations sit at fixed coordinates and a docked train's
/// position coincides with its station's position bit-for-bit.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_squared(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance to another position.
    pub fn distance(&self, other: &Self) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// The point `step` distance units along the straight line toward
    /// `target`. Lands exactly on `target` when `step` covers (or exceeds)
    /// the remaining separation, so callers never overshoot.
    pub fn advance_toward(&self, target: &Self, step: f64) -> Self {
        let total = self.distance(target);
        if step >= total || total == 0.0 {
            return *target;
        }
        let frac = step / total;
        Self {
            x: self.x + (target.x - self.x) * frac,
            y: self.y + (target.y - self.y) * frac,
        }
    }
}
