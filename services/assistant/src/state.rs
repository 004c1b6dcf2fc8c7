//! Shared Session State
//!
//! The only mutable state crossing task boundaries: one activity flag per
//! capture loop plus the terminal shutdown flag. Activity flags are written
//! by the [`SessionController`](crate::session::SessionController) (and by
//! the voice loop when a "stop listening" command deactivates it from the
//! inside); the shutdown flag may be requested by any component but is
//! one-way. A `watch` channel mirrors the shutdown flag so async observers
//! can await it instead of polling.

use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::watch;

#[derive(Debug)]
pub struct SessionState {
    voice_active: AtomicBool,
    vision_active: AtomicBool,
    shutdown: AtomicBool,
    shutdown_tx: watch::Sender<bool>,
}

impl SessionState {
    pub fn new() -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            voice_active: AtomicBool::new(false),
            vision_active: AtomicBool::new(false),
            shutdown: AtomicBool::new(false),
            shutdown_tx,
        }
    }

    pub fn voice_active(&self) -> bool {
        self.voice_active.load(Ordering::SeqCst)
    }

    pub fn set_voice_active(&self, active: bool) {
        // Shutdown is terminal: re-activation attempts are ignored.
        if active && self.is_shutdown() {
            return;
        }
        self.voice_active.store(active, Ordering::SeqCst);
    }

    pub fn vision_active(&self) -> bool {
        self.vision_active.load(Ordering::SeqCst)
    }

    pub fn set_vision_active(&self, active: bool) {
        if active && self.is_shutdown() {
            return;
        }
        self.vision_active.store(active, Ordering::SeqCst);
    }

    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    /// Sets the terminal shutdown flag and forces both activity flags false.
    ///
    /// Returns `true` for the call that actually performed the transition,
    /// `false` for every later call.
    pub fn request_shutdown(&self) -> bool {
        if self.shutdown.swap(true, Ordering::SeqCst) {
            return false;
        }
        self.voice_active.store(false, Ordering::SeqCst);
        self.vision_active.store(false, Ordering::SeqCst);
        let _ = self.shutdown_tx.send(true);
        true
    }

    /// A receiver that resolves once shutdown has been requested.
    pub fn shutdown_signal(&self) -> watch::Receiver<bool> {
        self.shutdown_tx.subscribe()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_start_inactive() {
        let state = SessionState::new();
        assert!(!state.voice_active());
        assert!(!state.vision_active());
        assert!(!state.is_shutdown());
    }

    #[test]
    fn activity_flags_are_independent() {
        let state = SessionState::new();
        state.set_voice_active(true);
        assert!(state.voice_active());
        assert!(!state.vision_active());

        state.set_vision_active(true);
        state.set_voice_active(false);
        assert!(!state.voice_active());
        assert!(state.vision_active());
    }

    #[test]
    fn shutdown_clears_both_activity_flags() {
        let state = SessionState::new();
        state.set_voice_active(true);
        state.set_vision_active(true);

        assert!(state.request_shutdown());
        assert!(state.is_shutdown());
        assert!(!state.voice_active());
        assert!(!state.vision_active());
    }

    #[test]
    fn shutdown_is_idempotent() {
        let state = SessionState::new();
        assert!(state.request_shutdown());
        assert!(!state.request_shutdown());
        assert!(state.is_shutdown());
    }

    #[test]
    fn activity_flags_stay_false_after_shutdown() {
        let state = SessionState::new();
        state.request_shutdown();

        state.set_voice_active(true);
        state.set_vision_active(true);
        assert!(!state.voice_active());
        assert!(!state.vision_active());
    }

    #[tokio::test]
    async fn shutdown_signal_observes_the_transition() {
        let state = SessionState::new();
        let mut rx = state.shutdown_signal();
        assert!(!*rx.borrow());

        state.request_shutdown();
        rx.changed().await.expect("sender still alive");
        assert!(*rx.borrow());
    }
}
