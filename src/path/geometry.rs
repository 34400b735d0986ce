//! Plane geometry used by paths and formations.
//!
//! Positions and offsets are `glam::Vec2`.

pub use glam::Vec2;

/// Move `current` toward `target` by at most `max_delta`, landing exactly on
/// the target when it is within reach.
pub fn move_towards(current: Vec2, target: Vec2, max_delta: f32) -> Vec2 {
    let delta = target - current;
    let distance = delta.length();
    if distance <= max_delta || distance == 0.0 {
        return target;
    }
    current + delta * (max_delta / distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_short_of_far_target() {
        let moved = move_towards(Vec2::ZERO, Vec2::new(10.0, 0.0), 2.5);
        assert_eq!(moved, Vec2::new(2.5, 0.0));
    }

    #[test]
    fn snaps_to_reachable_target() {
        let target = Vec2::new(1.0, 1.0);
        assert_eq!(move_towards(Vec2::ZERO, target, 5.0), target);
    }

    #[test]
    fn zero_budget_stays_put() {
        let start = Vec2::new(3.0, 4.0);
        assert_eq!(move_towards(start, Vec2::ZERO, 0.0), start);
    }
}
