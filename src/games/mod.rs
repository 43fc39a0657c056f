//! The four mini-games, plugged into one round engine
//!
//! Each game supplies content generation, time limits, scoring and
//! termination policy through the [`Game`] trait; the session controller in
//! `engine::session` owns everything else (phases, timers, totals).

pub mod arithmetic;
pub mod color_rush;
pub mod sequence_recall;
pub mod tapping_memory;

pub use arithmetic::Arithmetic;
pub use color_rush::ColorRush;
pub use sequence_recall::SequenceRecall;
pub use tapping_memory::{TappingMemory, TappingVariant};

use rand_pcg::Pcg32;

use crate::engine::challenge::{Challenge, UserResponse};
use crate::engine::level::Level;
use crate::engine::round::RoundContext;

/// How a session advances between rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progression {
    /// Run exactly this many rounds regardless of per-round outcomes.
    FixedRounds(u32),
    /// Grow the challenge by one per success; the first miss ends the session.
    Escalating { start_len: u32 },
}

/// What a `Failure` or `Timeout` outcome does to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissPolicy {
    /// Apply the penalty and keep going (arithmetic).
    Continue,
    /// Game over on first miss (Color Rush and the recall games).
    EndSession,
}

/// Which clock the result record reports as `time`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBasis {
    /// Whole seconds elapsed since the session started.
    SessionClock,
    /// Accumulated input time of successful rounds (tapping memory).
    AnswerTime,
}

/// Reveal timing for content presented piecewise before input opens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Presentation {
    /// "Get ready" pause before the first symbol.
    pub ready_delay: f64,
    /// Seconds per revealed symbol.
    pub reveal_interval: f64,
}

/// Feedback pauses between a resolved round and the next step, by outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdvanceDelays {
    pub success: f64,
    pub failure: f64,
    pub timeout: f64,
}

/// One mini-game. Generators may keep state across rounds (the recall games
/// grow their sequence in place), so `generate` takes `&mut self`.
pub trait Game {
    /// Endpoint path segment, e.g. `"arithmetic"`.
    fn name(&self) -> &'static str;

    fn progression(&self) -> Progression;

    fn miss_policy(&self) -> MissPolicy;

    fn generate(&mut self, level: Level, ctx: RoundContext, rng: &mut Pcg32) -> Challenge;

    /// Round countdown for the input phase, in seconds.
    fn time_limit(&self, level: Level, ctx: RoundContext) -> f64;

    fn score_success(&self, level: Level, ctx: RoundContext, elapsed: f64) -> i32;

    /// Points subtracted on a wrong answer. Zero where the game has none.
    fn miss_penalty(&self, _level: Level) -> i32 {
        0
    }

    /// Points subtracted on expiry; defaults to the miss penalty.
    fn timeout_penalty(&self, level: Level) -> i32 {
        self.miss_penalty(level)
    }

    /// Whether the cumulative score is clamped at zero after a penalty.
    fn floor_score_at_zero(&self) -> bool {
        false
    }

    /// Piecewise-reveal timing; `None` for content shown all at once.
    fn presentation(&self, _level: Level) -> Option<Presentation> {
        None
    }

    fn time_basis(&self) -> TimeBasis {
        TimeBasis::SessionClock
    }

    /// Whether the result record carries `avg_time`.
    fn report_avg_time(&self) -> bool {
        false
    }

    /// Whether a silent finish still persists the result record.
    fn persist_on_silent(&self) -> bool {
        false
    }

    fn empty_response(&self) -> UserResponse;

    fn delays(&self) -> AdvanceDelays;
}
