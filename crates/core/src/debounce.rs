//! Cooldown gate between the classifier and the output sink.

use crate::gesture::Gesture;
use std::time::{Duration, Instant};

/// An accepted gesture, ready for the output sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureEvent {
    pub gesture: Gesture,
    pub at: Instant,
}

/// Suppresses repeated gesture emission inside a cooldown window.
///
/// The window is global across gesture types: a different gesture arriving
/// inside the window is suppressed just like a repeat of the same one. This
/// is deliberate, fixed behavior — the vocabulary is small and switching
/// poses inside a second is overwhelmingly detector noise.
///
/// The timestamp is injected by the caller so the policy stays deterministic
/// under test.
#[derive(Debug)]
pub struct GestureDebouncer {
    cooldown: Duration,
    last_accepted: Option<Instant>,
}

impl GestureDebouncer {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_accepted: None,
        }
    }

    /// Gates one classification result. An unclassified hand never emits and
    /// never touches the window. A gesture emits iff nothing has been
    /// accepted yet or strictly more than the cooldown has elapsed since the
    /// last acceptance; emission restarts the window.
    pub fn accept(&mut self, candidate: Option<Gesture>, now: Instant) -> Option<GestureEvent> {
        let gesture = candidate?;
        if let Some(last) = self.last_accepted {
            if now.duration_since(last) <= self.cooldown {
                return None;
            }
        }
        self.last_accepted = Some(now);
        Some(GestureEvent { gesture, at: now })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COOLDOWN: Duration = Duration::from_secs(1);

    fn debouncer() -> GestureDebouncer {
        GestureDebouncer::new(COOLDOWN)
    }

    #[test]
    fn first_gesture_emits_immediately() {
        let mut gate = debouncer();
        let now = Instant::now();
        let event = gate.accept(Some(Gesture::Hello), now).expect("first emit");
        assert_eq!(event.gesture, Gesture::Hello);
        assert_eq!(event.at, now);
    }

    #[test]
    fn unclassified_hands_never_emit() {
        let mut gate = debouncer();
        let now = Instant::now();
        assert_eq!(gate.accept(None, now), None);
        assert_eq!(gate.accept(None, now + COOLDOWN * 5), None);
    }

    #[test]
    fn tight_sequence_emits_only_the_first() {
        let mut gate = debouncer();
        let base = Instant::now();
        let emitted: Vec<_> = (0..5)
            .filter_map(|i| gate.accept(Some(Gesture::Help), base + Duration::from_millis(200 * i)))
            .collect();
        assert_eq!(emitted.len(), 1);
        assert_eq!(emitted[0].at, base);
    }

    #[test]
    fn spacing_beyond_the_window_emits_every_time() {
        let mut gate = debouncer();
        let base = Instant::now();
        let emitted = (0..4)
            .filter_map(|i| gate.accept(Some(Gesture::Yes), base + Duration::from_millis(1001 * i)))
            .count();
        assert_eq!(emitted, 4);
    }

    #[test]
    fn window_boundary_is_strict() {
        let mut gate = debouncer();
        let base = Instant::now();
        assert!(gate.accept(Some(Gesture::A), base).is_some());
        // Exactly the cooldown is still inside the window.
        assert!(gate.accept(Some(Gesture::A), base + COOLDOWN).is_none());
        assert!(gate
            .accept(Some(Gesture::A), base + COOLDOWN + Duration::from_millis(1))
            .is_some());
    }

    #[test]
    fn different_gestures_share_one_window() {
        let mut gate = debouncer();
        let base = Instant::now();
        assert!(gate.accept(Some(Gesture::Hello), base).is_some());
        assert!(gate
            .accept(Some(Gesture::A), base + Duration::from_millis(300))
            .is_none());
    }

    #[test]
    fn suppressed_and_unclassified_results_do_not_restart_the_window() {
        let mut gate = debouncer();
        let base = Instant::now();
        assert!(gate.accept(Some(Gesture::No), base).is_some());
        assert!(gate.accept(Some(Gesture::No), base + Duration::from_millis(900)).is_none());
        assert!(gate.accept(None, base + Duration::from_millis(950)).is_none());
        // Measured from the acceptance at `base`, not from the suppressions.
        assert!(gate
            .accept(Some(Gesture::No), base + Duration::from_millis(1100))
            .is_some());
    }
}
