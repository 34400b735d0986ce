//! Wind-down bookkeeping for convoys asked to retire.
//!
//! A convoy with cargo on board is not disposed straight away. It keeps
//! running so it can unload, while a counter tracks ticks spent without a
//! service point that takes its cargo. The counter never exceeds the number
//! of service stops on the route, and reaching that number ends the wait.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovalState {
    pending: bool,
    ticks_without_service: usize,
}

impl RemovalState {
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn ticks_without_service(&self) -> usize {
        self.ticks_without_service
    }

    /// Start winding down. Returns `false` if already pending.
    pub(crate) fn begin(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        self.ticks_without_service = 0;
        true
    }

    /// Count one tick of winding down, unless the convoy sits at a service
    /// point that takes its cargo. The count saturates at `bound`.
    pub(crate) fn record_tick(&mut self, serviced: bool, bound: usize) {
        if !self.pending || serviced {
            return;
        }
        if self.ticks_without_service < bound {
            self.ticks_without_service += 1;
        }
    }

    /// Whether a pending convoy may now be disposed.
    pub fn is_complete(&self, cargo_empty: bool, service_stops: usize) -> bool {
        self.pending && (cargo_empty || self.ticks_without_service >= service_stops)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_is_one_shot() {
        let mut removal = RemovalState::default();

        assert!(removal.begin());
        removal.record_tick(false, 5);
        assert!(!removal.begin());

        assert!(removal.is_pending());
        assert_eq!(removal.ticks_without_service(), 1);
    }

    #[test]
    fn serviced_ticks_do_not_count() {
        let mut removal = RemovalState::default();
        removal.begin();

        removal.record_tick(true, 3);
        removal.record_tick(false, 3);
        removal.record_tick(true, 3);

        assert_eq!(removal.ticks_without_service(), 1);
    }

    #[test]
    fn counter_saturates_at_bound() {
        let mut removal = RemovalState::default();
        removal.begin();

        for _ in 0..10 {
            removal.record_tick(false, 2);
        }

        assert_eq!(removal.ticks_without_service(), 2);
        assert!(removal.is_complete(false, 2));
    }

    #[test]
    fn idle_state_never_counts_or_completes() {
        let mut removal = RemovalState::default();
        removal.record_tick(false, 4);

        assert_eq!(removal.ticks_without_service(), 0);
        assert!(!removal.is_complete(true, 0));
    }

    #[test]
    fn empty_cargo_completes_immediately() {
        let mut removal = RemovalState::default();
        removal.begin();

        assert!(removal.is_complete(true, 8));
        assert!(!removal.is_complete(false, 8));
    }

    #[test]
    fn route_without_stops_completes_at_once() {
        let mut removal = RemovalState::default();
        removal.begin();

        assert!(removal.is_complete(false, 0));
    }
}
