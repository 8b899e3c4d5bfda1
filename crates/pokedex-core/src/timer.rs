use std::time::Duration;

/// Cancellable single-shot countdown, advanced by its owner.
///
/// Holds at most one pending deadline: `arm` replaces whatever was pending, so
/// two firings for the same purpose can never race.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OneShotTimer {
    remaining: Option<Duration>,
}

impl OneShotTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the countdown.
    pub fn arm(&mut self, delay: Duration) {
        self.remaining = Some(delay);
    }

    /// Drop the pending deadline. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.remaining.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.remaining.is_some()
    }

    /// Time left before firing, if armed.
    pub fn remaining(&self) -> Option<Duration> {
        self.remaining
    }

    /// Move time forward by `dt`. Returns `true` on the step that fires.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let Some(left) = self.remaining else {
            return false;
        };
        let left = left.saturating_sub(dt);
        if left.is_zero() {
            self.remaining = None;
            true
        } else {
            self.remaining = Some(left);
            false
        }
    }
}
