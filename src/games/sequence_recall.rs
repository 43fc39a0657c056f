//! Sequence Recall
//!
//! Escalating digit-memory game. The sequence grows by one uniformly-random
//! digit per successful round and is revealed one digit at a time before the
//! recall window opens. Correctness within the limit is binary: no speed
//! bonus, no penalty on the miss that ends the session.

use rand::Rng;
use rand_pcg::Pcg32;

use super::{AdvanceDelays, Game, MissPolicy, Presentation, Progression};
use crate::consts::ESCALATION_START_LEN;
use crate::engine::challenge::{Challenge, UserResponse};
use crate::engine::level::Level;
use crate::engine::round::RoundContext;
use crate::engine::score::length_scaled_points;

/// Pause before the first digit appears.
const READY_DELAY: f64 = 1.0;

struct LevelConfig {
    base_time: f64,
    time_increment: f64,
    base_points: i32,
    /// Seconds per revealed digit.
    reveal_interval: f64,
}

fn config(level: Level) -> LevelConfig {
    match level {
        Level::Easy => LevelConfig {
            base_time: 8.0,
            time_increment: 0.8,
            base_points: 10,
            reveal_interval: 1.5,
        },
        Level::Medium => LevelConfig {
            base_time: 7.0,
            time_increment: 0.7,
            base_points: 20,
            reveal_interval: 1.0,
        },
        Level::Hard => LevelConfig {
            base_time: 6.0,
            time_increment: 0.6,
            base_points: 30,
            reveal_interval: 0.7,
        },
    }
}

#[derive(Debug, Default)]
pub struct SequenceRecall {
    /// Grows across rounds; each round's challenge is the whole sequence.
    digits: Vec<u8>,
}

impl SequenceRecall {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Game for SequenceRecall {
    fn name(&self) -> &'static str {
        "sequence_recall"
    }

    fn progression(&self) -> Progression {
        Progression::Escalating { start_len: ESCALATION_START_LEN }
    }

    fn miss_policy(&self) -> MissPolicy {
        MissPolicy::EndSession
    }

    fn generate(&mut self, _level: Level, ctx: RoundContext, rng: &mut Pcg32) -> Challenge {
        while self.digits.len() < ctx.length as usize {
            self.digits.push(rng.random_range(0..10u8));
        }
        Challenge::DigitSequence { digits: self.digits.clone() }
    }

    fn time_limit(&self, level: Level, ctx: RoundContext) -> f64 {
        let cfg = config(level);
        cfg.base_time + (ctx.length as f64 - 2.0) * cfg.time_increment
    }

    fn score_success(&self, level: Level, ctx: RoundContext, _elapsed: f64) -> i32 {
        length_scaled_points(config(level).base_points, ctx.length)
    }

    fn presentation(&self, level: Level) -> Option<Presentation> {
        Some(Presentation {
            ready_delay: READY_DELAY,
            reveal_interval: config(level).reveal_interval,
        })
    }

    fn empty_response(&self) -> UserResponse {
        UserResponse::Digits(Vec::new())
    }

    fn delays(&self) -> AdvanceDelays {
        AdvanceDelays {
            success: 1.5,
            failure: 3.0,
            timeout: 3.0,
        }
    }
}
