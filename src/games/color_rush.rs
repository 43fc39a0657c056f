//! Color Rush
//!
//! Fixed ten-round reaction game. A color word is painted in an independently
//! drawn display color; the correct tap is the *display* color, not the word.
//! The first miss or expiry ends the session, and the cumulative score never
//! drops below zero.

use rand::Rng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;

use super::{AdvanceDelays, Game, MissPolicy, Progression};
use crate::consts::COLOR_RUSH_MAX_ROUNDS;
use crate::engine::challenge::{Challenge, UserResponse};
use crate::engine::level::Level;
use crate::engine::round::RoundContext;
use crate::engine::score::{half_points, speed_bonus_score};

/// Speed-bonus multiplier: a fast tap adds at most half the base points.
const BONUS_MULTIPLIER: f64 = 0.5;

struct LevelConfig {
    color_count: usize,
    time_limit: f64,
    base_score: i32,
    penalty: i32,
}

fn config(level: Level) -> LevelConfig {
    match level {
        Level::Easy => LevelConfig { color_count: 4, time_limit: 5.0, base_score: 10, penalty: 5 },
        Level::Medium => LevelConfig { color_count: 6, time_limit: 4.0, base_score: 20, penalty: 10 },
        Level::Hard => LevelConfig { color_count: 8, time_limit: 2.5, base_score: 30, penalty: 15 },
    }
}

/// Palette indices available at a level (a prefix of the full palette).
pub fn color_count(level: Level) -> usize {
    config(level).color_count
}

/// The level's palette indices in a random order, for laying out the answer
/// buttons without the host needing its own RNG.
pub fn shuffled_palette(level: Level, rng: &mut Pcg32) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..color_count(level)).collect();
    indices.shuffle(rng);
    indices
}

#[derive(Debug, Default)]
pub struct ColorRush;

impl Game for ColorRush {
    fn name(&self) -> &'static str {
        "color_rush"
    }

    fn progression(&self) -> Progression {
        Progression::FixedRounds(COLOR_RUSH_MAX_ROUNDS)
    }

    fn miss_policy(&self) -> MissPolicy {
        MissPolicy::EndSession
    }

    fn generate(&mut self, level: Level, _ctx: RoundContext, rng: &mut Pcg32) -> Challenge {
        let count = color_count(level);
        // Word and display color are drawn independently and may coincide
        let word = rng.random_range(0..count);
        let display = rng.random_range(0..count);
        Challenge::ColorWord { word, display }
    }

    fn time_limit(&self, level: Level, _ctx: RoundContext) -> f64 {
        config(level).time_limit
    }

    fn score_success(&self, level: Level, _ctx: RoundContext, elapsed: f64) -> i32 {
        let cfg = config(level);
        speed_bonus_score(
            cfg.base_score,
            cfg.time_limit,
            elapsed,
            BONUS_MULTIPLIER,
            half_points(cfg.base_score),
        )
    }

    fn miss_penalty(&self, level: Level) -> i32 {
        config(level).penalty
    }

    fn floor_score_at_zero(&self) -> bool {
        true
    }

    fn empty_response(&self) -> UserResponse {
        UserResponse::Color(None)
    }

    fn delays(&self) -> AdvanceDelays {
        AdvanceDelays {
            success: 0.5,
            failure: 0.0,
            timeout: 1.0,
        }
    }
}
