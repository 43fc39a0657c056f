//! Deterministic round engine
//!
//! Everything in this module advances on logical time only: the host calls
//! [`Session::tick`] with elapsed seconds and [`Session::handle`] with input
//! events, and the engine never reads a wall clock or spawns timers. Given
//! the same game, level, seed and call sequence, a session replays exactly,
//! round for round and point for point.

pub mod challenge;
pub mod error;
pub mod expr;
pub mod level;
pub mod round;
pub mod score;
pub mod session;
pub mod timer;

pub use challenge::{Cell, Challenge, ColorOption, UserResponse, COLOR_PALETTE};
pub use error::ConfigError;
pub use expr::{Expr, Op};
pub use level::Level;
pub use round::{NextStep, OutcomeKind, RoundContext, RoundOutcome, RoundPhase};
pub use session::{Event, Fragment, Input, Session, Status};
pub use timer::{RoundTimer, TimerEvent};
