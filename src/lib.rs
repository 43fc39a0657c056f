//! BrainRush Engine - deterministic round engine for timed brain-training games
//!
//! Core modules:
//! - `engine`: Session controller, round timer, scoring, challenge types
//! - `games`: The four game plugins (arithmetic, color rush, sequence recall,
//!   tapping memory)
//! - `persistence`: Result records and the host-supplied sink they post through

pub mod engine;
pub mod games;
pub mod persistence;

pub use engine::{Challenge, Event, Input, Level, Session, Status, UserResponse};
pub use games::{Arithmetic, ColorRush, Game, SequenceRecall, TappingMemory, TappingVariant};
pub use persistence::{ResultRecord, ResultSink};

/// Game configuration constants
pub mod consts {
    /// Starting sequence/path length for the escalating games
    pub const ESCALATION_START_LEN: u32 = 2;
    /// Rounds in one color rush session
    pub const COLOR_RUSH_MAX_ROUNDS: u32 = 10;
    /// Default problems per arithmetic session
    pub const DEFAULT_PROBLEM_COUNT: u32 = 5;
    /// Absolute tolerance when matching a typed numeric answer
    pub const ANSWER_TOLERANCE: f64 = 0.1;
}
