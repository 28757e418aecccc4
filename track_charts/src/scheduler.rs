//! Redraw scheduling for the dashboard.
//!
//! Charts never repaint synchronously with a mutation. Each mutation
//! schedules a short-delay redraw so a burst of edits settles before the
//! repaint lands; container resizes instead debounce, with each resize
//! replacing the previous pending redraw. The host drives the scheduler by
//! polling it from its frame loop.

use std::time::{Duration, Instant};

/// Delay between a data mutation and the redraw it schedules.
pub const MUTATION_REDRAW_DELAY: Duration = Duration::from_millis(100);

/// Quiet period required after the last resize before redrawing.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(250);

/// Pending-redraw bookkeeping for one dashboard.
///
/// Mutation redraws are not coalesced: each mutation arms its own timer
/// and each expiry produces a redraw. Resize redraws are debounced: a new
/// resize replaces the pending one, so a drag produces a single repaint
/// once the size settles.
#[derive(Debug, Default)]
pub struct RedrawScheduler {
    mutation_deadlines: Vec<Instant>,
    resize_deadline: Option<Instant>,
}

impl RedrawScheduler {
    pub fn new() -> Self {
        RedrawScheduler::default()
    }

    /// A mutation happened; arm a redraw timer for it.
    pub fn on_mutation(&mut self, now: Instant) {
        self.mutation_deadlines.push(now + MUTATION_REDRAW_DELAY);
    }

    /// The container was resized; restart the debounce window.
    pub fn on_resize(&mut self, now: Instant) {
        self.resize_deadline = Some(now + RESIZE_DEBOUNCE);
    }

    /// True if any timer is armed.
    pub fn has_pending(&self) -> bool {
        !self.mutation_deadlines.is_empty() || self.resize_deadline.is_some()
    }

    /// Collect expired timers and return how many redraws are due.
    ///
    /// When the dashboard is not visible, expired timers are dropped
    /// without producing redraws; the next repaint happens when the
    /// dashboard is shown again and rebuilds its charts anyway.
    pub fn poll(&mut self, now: Instant, dashboard_visible: bool) -> usize {
        let mut due = 0;

        self.mutation_deadlines.retain(|deadline| {
            if *deadline <= now {
                due += 1;
                false
            } else {
                true
            }
        });

        if let Some(deadline) = self.resize_deadline {
            if deadline <= now {
                self.resize_deadline = None;
                due += 1;
            }
        }

        if dashboard_visible {
            due
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutation_redraw_fires_after_delay() {
        let start = Instant::now();
        let mut scheduler = RedrawScheduler::new();
        scheduler.on_mutation(start);

        assert_eq!(scheduler.poll(start + Duration::from_millis(50), true), 0);
        assert_eq!(scheduler.poll(start + MUTATION_REDRAW_DELAY, true), 1);
        assert!(!scheduler.has_pending());
    }

    #[test]
    fn test_mutation_redraws_are_not_coalesced() {
        let start = Instant::now();
        let mut scheduler = RedrawScheduler::new();
        scheduler.on_mutation(start);
        scheduler.on_mutation(start + Duration::from_millis(10));
        scheduler.on_mutation(start + Duration::from_millis(20));

        assert_eq!(scheduler.poll(start + Duration::from_millis(200), true), 3);
    }

    #[test]
    fn test_resize_debounce_replaces_pending_redraw() {
        let start = Instant::now();
        let mut scheduler = RedrawScheduler::new();
        scheduler.on_resize(start);
        scheduler.on_resize(start + Duration::from_millis(200));

        // First deadline would have been at +250ms but was replaced
        assert_eq!(scheduler.poll(start + Duration::from_millis(300), true), 0);
        assert_eq!(scheduler.poll(start + Duration::from_millis(450), true), 1);
    }

    #[test]
    fn test_hidden_dashboard_drops_expired_timers() {
        let start = Instant::now();
        let mut scheduler = RedrawScheduler::new();
        scheduler.on_mutation(start);
        scheduler.on_resize(start);

        assert_eq!(scheduler.poll(start + Duration::from_millis(500), false), 0);
        // Timers were consumed, not deferred
        assert!(!scheduler.has_pending());
        assert_eq!(scheduler.poll(start + Duration::from_millis(600), true), 0);
    }
}
