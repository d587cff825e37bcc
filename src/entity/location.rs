//! Grid locations

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// An integer grid position (or offset)
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Location {
    pub x: i32,
    pub y: i32,
}

impl Location {
    /// Create a location
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance: diagonal neighbours are 1 apart
    pub fn distance_to(&self, other: Location) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// The single 8-neighbourhood offset that moves toward `target`
    pub fn step_toward(&self, target: Location) -> Location {
        Location::new(
            (target.x - self.x).signum(),
            (target.y - self.y).signum(),
        )
    }

    /// Whether `other` is this location or one of its eight neighbours
    pub fn is_adjacent(&self, other: Location) -> bool {
        self.distance_to(other) <= 1
    }
}

impl Add for Location {
    type Output = Location;

    fn add(self, rhs: Location) -> Location {
        Location::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Location {
    type Output = Location;

    fn sub(self, rhs: Location) -> Location {
        Location::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
