//! Tapping Memory
//!
//! Escalating spatial-recall game on a level-sized square grid. Cells light up
//! one at a time and must be tapped back in order. Two deployed copies of this
//! game diverged; the differences are carried as an explicit variant rather
//! than merged.

use rand::Rng;
use rand_pcg::Pcg32;

use super::{AdvanceDelays, Game, MissPolicy, Presentation, Progression, TimeBasis};
use crate::consts::ESCALATION_START_LEN;
use crate::engine::challenge::{Cell, Challenge, UserResponse};
use crate::engine::level::Level;
use crate::engine::round::RoundContext;

/// Pause before the first cell lights up.
const READY_DELAY: f64 = 0.7;

/// Extra recall seconds granted per escalation step.
const TIME_INCREMENT: f64 = 1.2;

/// Flat points awarded per unit of current path length.
const POINTS_PER_LENGTH: i32 = 10;

struct LevelConfig {
    grid_size: u8,
    /// Seconds per lit cell.
    reveal_interval: f64,
    base_points: i32,
    base_time_limit: f64,
}

fn config(level: Level) -> LevelConfig {
    match level {
        Level::Easy => LevelConfig {
            grid_size: 3,
            reveal_interval: 0.7,
            base_points: 5,
            base_time_limit: 9.0,
        },
        Level::Medium => LevelConfig {
            grid_size: 4,
            reveal_interval: 0.5,
            base_points: 8,
            base_time_limit: 7.0,
        },
        Level::Hard => LevelConfig {
            grid_size: 5,
            reveal_interval: 0.3,
            base_points: 13,
            base_time_limit: 5.0,
        },
    }
}

/// The two deployed copies of the game, preserved as configuration.
///
/// They disagree on whether a silent finish still persists the result and on
/// how often the countdown display refreshes. The refresh interval is purely
/// decorative; scoring is driven by the logical countdown alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TappingVariant {
    /// 1 Hz countdown with a 500 ms display refresh; silent finishes are not
    /// persisted.
    #[default]
    Classic,
    /// 100 ms display refresh; silent finishes are persisted.
    Revised,
}

impl TappingVariant {
    pub fn display_refresh(&self) -> f64 {
        match self {
            TappingVariant::Classic => 0.5,
            TappingVariant::Revised => 0.1,
        }
    }

    fn persist_on_silent(&self) -> bool {
        matches!(self, TappingVariant::Revised)
    }
}

#[derive(Debug, Default)]
pub struct TappingMemory {
    variant: TappingVariant,
    /// Grows across rounds; each round's challenge is the whole path.
    path: Vec<Cell>,
}

impl TappingMemory {
    pub fn new(variant: TappingVariant) -> Self {
        Self { variant, path: Vec::new() }
    }

    pub fn variant(&self) -> TappingVariant {
        self.variant
    }

    pub fn grid_size(level: Level) -> u8 {
        config(level).grid_size
    }
}

impl Game for TappingMemory {
    fn name(&self) -> &'static str {
        "tapping_memory"
    }

    fn progression(&self) -> Progression {
        Progression::Escalating { start_len: ESCALATION_START_LEN }
    }

    fn miss_policy(&self) -> MissPolicy {
        MissPolicy::EndSession
    }

    fn generate(&mut self, level: Level, ctx: RoundContext, rng: &mut Pcg32) -> Challenge {
        let grid_size = config(level).grid_size;
        while self.path.len() < ctx.length as usize {
            let row = rng.random_range(0..grid_size);
            let col = rng.random_range(0..grid_size);
            self.path.push((row, col));
        }
        Challenge::TapPath { cells: self.path.clone(), grid_size }
    }

    fn time_limit(&self, level: Level, ctx: RoundContext) -> f64 {
        let cfg = config(level);
        (cfg.base_time_limit + (ctx.length as f64 - 2.0) * TIME_INCREMENT).floor()
    }

    fn score_success(&self, level: Level, ctx: RoundContext, _elapsed: f64) -> i32 {
        config(level).base_points + ctx.length as i32 * POINTS_PER_LENGTH
    }

    fn presentation(&self, level: Level) -> Option<Presentation> {
        Some(Presentation {
            ready_delay: READY_DELAY,
            reveal_interval: config(level).reveal_interval,
        })
    }

    fn time_basis(&self) -> TimeBasis {
        TimeBasis::AnswerTime
    }

    fn report_avg_time(&self) -> bool {
        true
    }

    fn persist_on_silent(&self) -> bool {
        self.variant.persist_on_silent()
    }

    fn empty_response(&self) -> UserResponse {
        UserResponse::Taps(Vec::new())
    }

    fn delays(&self) -> AdvanceDelays {
        AdvanceDelays {
            success: 0.7,
            failure: 0.9,
            timeout: 0.9,
        }
    }
}
