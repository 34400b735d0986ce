//! The lead unit's place in a path's waypoint order.

use super::walker::Direction;
use serde::{Deserialize, Serialize};

/// Waypoint the lead is heading toward and the direction it travels in.
///
/// Written by the travel behavior, read by the trail formation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressCursor {
    pub index: usize,
    pub direction: Direction,
}

impl ProgressCursor {
    pub fn new(index: usize, direction: Direction) -> Self {
        Self { index, direction }
    }

    /// Cursor facing the other way from the same waypoint.
    pub fn reversed(self) -> Self {
        Self {
            index: self.index,
            direction: self.direction.reversed(),
        }
    }
}
