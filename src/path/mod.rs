//! Paths and arc-length walking.
//!
//! A [`Path`] is a read-only polyline. [`PathWalker`] moves a point a fixed
//! distance along it, reversing at the ends of open paths and wrapping on
//! cyclic ones, and reports the direction it finished in so the caller can
//! carry it into the next tick.

mod cursor;
mod geometry;
mod walker;

pub use cursor::ProgressCursor;
pub use geometry::{move_towards, Vec2};
pub use walker::{advance, Direction, Path, PathWalker, Walk, DEFAULT_MAX_STEPS};
