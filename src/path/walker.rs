//! Bounded arc-length traversal of polylines.

use super::geometry::{move_towards, Vec2};
use serde::{Deserialize, Serialize};
use std::ops::Neg;
use tracing::debug;

/// Step budget used by [`advance`].
pub const DEFAULT_MAX_STEPS: usize = 50;

/// Traversal direction along a path's waypoint order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Increasing waypoint index (+1).
    #[default]
    Forward,
    /// Decreasing waypoint index (-1).
    Backward,
}

impl Direction {
    pub fn sign(self) -> isize {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

impl Neg for Direction {
    type Output = Direction;

    fn neg(self) -> Direction {
        self.reversed()
    }
}

/// An ordered polyline, either open (traversal bounces at the ends) or
/// cyclic (traversal wraps from the last waypoint to the first).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    points: Vec<Vec2>,
    cyclic: bool,
}

impl Path {
    pub fn new(points: Vec<Vec2>, cyclic: bool) -> Self {
        Self { points, cyclic }
    }

    /// Open path whose traversal reverses at either end.
    pub fn open(points: Vec<Vec2>) -> Self {
        Self::new(points, false)
    }

    /// Closed loop.
    pub fn cyclic(points: Vec<Vec2>) -> Self {
        Self::new(points, true)
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn point(&self, index: usize) -> Option<Vec2> {
        self.points.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_cyclic(&self) -> bool {
        self.cyclic
    }

    /// Sum of segment lengths, including the closing segment of a cyclic
    /// path.
    pub fn total_length(&self) -> f32 {
        let open: f32 = self.points.windows(2).map(|w| w[0].distance(w[1])).sum();
        match (self.cyclic, self.points.first(), self.points.last()) {
            (true, Some(first), Some(last)) => open + last.distance(*first),
            _ => open,
        }
    }

    /// Axis-aligned bounding box as `(min, max)`.
    pub fn bounds(&self) -> Option<(Vec2, Vec2)> {
        let first = *self.points.first()?;
        Some(
            self.points
                .iter()
                .fold((first, first), |(min, max), p| (min.min(*p), max.max(*p))),
        )
    }

    /// Index reached by stepping once from `index` in `direction`, with the
    /// direction that applies afterwards.
    ///
    /// Cyclic paths wrap and keep their direction. Open paths bounce: running
    /// off the far end continues backward from `len - 2`, running off the
    /// near end continues forward from `1`. A single-point path always
    /// yields index 0 with the direction unchanged.
    pub fn next_index(&self, index: usize, direction: Direction) -> (usize, Direction) {
        let len = self.points.len();
        if len <= 1 {
            return (0, direction);
        }

        let last = len as isize - 1;
        let stepped = index as isize + direction.sign();

        if self.cyclic {
            if stepped > last {
                (0, direction)
            } else if stepped < 0 {
                (len - 1, direction)
            } else {
                (stepped as usize, direction)
            }
        } else if stepped > last {
            (len - 2, Direction::Backward)
        } else if stepped < 0 {
            (1, Direction::Forward)
        } else {
            (stepped as usize, direction)
        }
    }
}

/// Where a walk ended.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Walk {
    pub position: Vec2,
    /// Waypoint the walk was heading toward when it stopped.
    pub index: usize,
    /// Direction after any bounces; callers persist this across calls.
    pub direction: Direction,
    /// Steps consumed out of the walker's budget.
    pub steps: usize,
}

impl Walk {
    pub fn hit_step_limit(&self, walker: &PathWalker) -> bool {
        self.steps >= walker.max_steps
    }
}

/// Walks a fixed arc length along a path with a hard step budget.
///
/// Each step heads to the next waypoint and consumes the distance to it.
/// Zero-length segments consume a step without consuming distance, so a
/// degenerate path can exhaust the budget; the walker then returns where it
/// got to rather than failing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathWalker {
    max_steps: usize,
}

impl Default for PathWalker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_STEPS)
    }
}

impl PathWalker {
    pub fn new(max_steps: usize) -> Self {
        Self { max_steps }
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    pub fn walk(
        &self,
        path: &Path,
        start: Vec2,
        index: usize,
        direction: Direction,
        distance: f32,
    ) -> Walk {
        let mut walk = Walk {
            position: start,
            index,
            direction,
            steps: 0,
        };
        if path.is_empty() {
            return walk;
        }

        let mut remaining = distance;
        while remaining > 0.0 && walk.steps < self.max_steps {
            let (next, direction) = path.next_index(walk.index, walk.direction);
            walk.index = next;
            walk.direction = direction;

            let Some(target) = path.point(next) else {
                break;
            };
            let to_target = walk.position.distance(target);
            walk.position = move_towards(walk.position, target, remaining);
            remaining -= to_target;
            walk.steps += 1;
        }

        if remaining > 0.0 && walk.steps >= self.max_steps {
            debug!(
                remaining,
                max_steps = self.max_steps,
                "path walk stopped at step limit"
            );
        }

        walk
    }
}

/// Walk `distance` along `path` from `start` with the default step budget.
///
/// `index` is the waypoint the walker is currently at or heading away from;
/// the first step targets the waypoint after it in `direction`.
///
/// # Example
///
/// ```rust
/// use convoy::path::{advance, Direction, Path, Vec2};
///
/// let path = Path::open(vec![
///     Vec2::new(0.0, 0.0),
///     Vec2::new(1.0, 0.0),
///     Vec2::new(2.0, 0.0),
///     Vec2::new(3.0, 0.0),
/// ]);
///
/// // Three segments to the far end plus one more: bounce and come back one.
/// let walk = advance(&path, Vec2::new(0.0, 0.0), 0, Direction::Forward, 4.0);
/// assert_eq!(walk.position, Vec2::new(2.0, 0.0));
/// assert_eq!(walk.direction, Direction::Backward);
/// ```
pub fn advance(
    path: &Path,
    start: Vec2,
    index: usize,
    direction: Direction,
    distance: f32,
) -> Walk {
    PathWalker::default().walk(path, start, index, direction, distance)
}
