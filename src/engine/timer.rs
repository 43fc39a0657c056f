//! Cancellable round countdown
//!
//! One timer per round, alive only while the round accepts input. The two
//! competing consumers of a round (submitted answer vs. expiry) are arbitrated
//! here: expiry is reported at most once, and cancellation is idempotent and
//! safe in every state, including after the timer has already fired. A
//! fired-then-cancelled timer can never report a second expiry.

/// Signal returned from [`RoundTimer::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// The countdown crossed a whole-second boundary; value is seconds left.
    Tick(u32),
    /// The countdown ran out. Returned at most once per timer.
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerState {
    Running,
    Fired,
    Cancelled,
}

/// Logical countdown driven by `advance(dt)`; no wall clock involved.
#[derive(Debug, Clone)]
pub struct RoundTimer {
    remaining: f64,
    last_whole: u32,
    state: TimerState,
}

impl RoundTimer {
    pub fn start(duration_seconds: f64) -> Self {
        let remaining = duration_seconds.max(0.0);
        Self {
            remaining,
            last_whole: remaining.ceil() as u32,
            state: TimerState::Running,
        }
    }

    /// Advance logical time. Returns a whole-second tick for display, or the
    /// one-shot expiry. A cancelled or already-fired timer returns nothing.
    pub fn advance(&mut self, dt: f64) -> Option<TimerEvent> {
        if self.state != TimerState::Running {
            return None;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            self.state = TimerState::Fired;
            return Some(TimerEvent::Expired);
        }
        let whole = self.remaining.ceil() as u32;
        if whole < self.last_whole {
            self.last_whole = whole;
            return Some(TimerEvent::Tick(whole));
        }
        None
    }

    /// Stop the countdown. Idempotent; a no-op after expiry, so the loser of
    /// the submit-vs-expiry race cannot resurrect or re-fire the timer.
    pub fn cancel(&mut self) {
        if self.state == TimerState::Running {
            self.state = TimerState::Cancelled;
        }
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    /// Seconds left, rounded up for display.
    pub fn seconds_remaining(&self) -> u32 {
        self.remaining.ceil() as u32
    }
}
