//! Round lifecycle types

use serde::{Deserialize, Serialize};

/// Phase of the round currently in flight.
///
/// The recall games pass through `Preparing` and `Presenting`; the fixed-round
/// games show their content at once and jump straight to `AcceptingInput`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RoundPhase {
    /// No round in flight (before start, after finish).
    Idle,
    /// Pre-reveal pause ("Get ready...").
    Preparing { remaining: f64 },
    /// Piecewise reveal of recall content at a fixed cadence.
    Presenting { until_next: f64, revealed: usize },
    /// Waiting on the player; the round timer is live only in this phase.
    AcceptingInput,
    /// Outcome produced; short feedback pause before the next step.
    Resolved { remaining: f64, next: NextStep },
}

/// Where the session goes after a resolved round's feedback pause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    NextRound,
    Finish,
}

/// Terminal classification of one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeKind {
    Success,
    /// A complete but wrong answer.
    Failure,
    /// The round timer expired first, regardless of any partial input.
    Timeout,
}

/// Produced exactly once per round, then handed to the session controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub kind: OutcomeKind,
    /// Time spent in the input phase.
    pub elapsed_seconds: f64,
    /// Signed score change already applied to the session.
    pub points_delta: i32,
}

/// Inputs to generators and scoring for the round being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundContext {
    /// 1-based round number within the session.
    pub index: u32,
    /// Current sequence/path length for the escalating games; mirrors `index`
    /// for the fixed-round games.
    pub length: u32,
}
