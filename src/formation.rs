//! Placement of trailing units behind the lead.
//!
//! Every tick each trailing unit's target is derived from scratch by walking
//! backward along the path from the lead. Nothing carries over from the
//! previous tick, so trailing units cannot drift away from the path.

use crate::path::{Path, PathWalker, ProgressCursor, Vec2};

/// A follower positioned behind the lead.
///
/// How a unit actually reaches its target (snap or smoothed) is up to the
/// unit.
pub trait TrailingUnit {
    fn move_to(&mut self, target: Vec2);

    /// Cosmetic signal that the convoy is winding down.
    fn mark_for_removal(&mut self) {}
}

/// Arc-length spacing of a convoy's trailing units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailFormation {
    first_offset: f32,
    spacing: f32,
    offset: Vec2,
    walker: PathWalker,
}

impl Default for TrailFormation {
    fn default() -> Self {
        Self::new(0.5, 0.4, Vec2::ZERO, PathWalker::default())
    }
}

impl TrailFormation {
    pub fn new(first_offset: f32, spacing: f32, offset: Vec2, walker: PathWalker) -> Self {
        Self {
            first_offset,
            spacing,
            offset,
            walker,
        }
    }

    /// Arc length between the lead and trailing unit `slot` (0-based).
    pub fn distance_for(&self, slot: usize) -> f32 {
        self.first_offset + self.spacing * slot as f32
    }

    /// Target position of trailing unit `slot`.
    pub fn target(&self, path: &Path, lead: Vec2, cursor: ProgressCursor, slot: usize) -> Vec2 {
        let walk = self.walker.walk(
            path,
            lead,
            cursor.index,
            -cursor.direction,
            self.distance_for(slot),
        );
        walk.position + self.offset
    }

    /// Targets for the first `count` trailing units.
    pub fn targets(
        &self,
        path: &Path,
        lead: Vec2,
        cursor: ProgressCursor,
        count: usize,
    ) -> Vec<Vec2> {
        (0..count)
            .map(|slot| self.target(path, lead, cursor, slot))
            .collect()
    }

    /// Move every unit to its target.
    pub fn arrange<U>(&self, path: &Path, lead: Vec2, cursor: ProgressCursor, units: &mut [U])
    where
        U: TrailingUnit,
    {
        for (slot, unit) in units.iter_mut().enumerate() {
            unit.move_to(self.target(path, lead, cursor, slot));
        }
    }
}

impl<T: TrailingUnit + ?Sized> TrailingUnit for Box<T> {
    fn move_to(&mut self, target: Vec2) {
        (**self).move_to(target);
    }

    fn mark_for_removal(&mut self) {
        (**self).mark_for_removal();
    }
}
