//! Arithmetic drills
//!
//! Fixed-round game: every configured problem runs regardless of outcome.
//! Expressions grow from two operands with `+`/`-` on easy up to grouped
//! four-operand expressions with all four operators on hard. Operand ranges
//! narrow when `*` or `/` is drawn so magnitudes stay typeable; the constants
//! are per-level tuning, not derived.

use rand::Rng;
use rand_pcg::Pcg32;

use super::{AdvanceDelays, Game, MissPolicy, Progression};
use crate::consts::DEFAULT_PROBLEM_COUNT;
use crate::engine::challenge::{Challenge, UserResponse};
use crate::engine::expr::{Expr, Op};
use crate::engine::level::Level;
use crate::engine::round::RoundContext;
use crate::engine::score::{half_points, speed_bonus_score};

const OPS_EASY: [Op; 2] = [Op::Add, Op::Sub];
const OPS_MEDIUM: [Op; 3] = [Op::Add, Op::Sub, Op::Mul];
const OPS_HARD: [Op; 4] = [Op::Add, Op::Sub, Op::Mul, Op::Div];

/// Speed-bonus multiplier: a fast answer can double the base points.
const BONUS_MULTIPLIER: f64 = 2.0;

pub struct Arithmetic {
    total_problems: u32,
}

impl Arithmetic {
    /// `total_problems = 0` falls back to the default count, matching the
    /// setup form's behavior for an unset selector.
    pub fn new(total_problems: u32) -> Self {
        let total_problems = if total_problems == 0 {
            DEFAULT_PROBLEM_COUNT
        } else {
            total_problems
        };
        Self { total_problems }
    }

    pub fn total_problems(&self) -> u32 {
        self.total_problems
    }

    fn base_points(level: Level) -> i32 {
        match level {
            Level::Easy => 5,
            Level::Medium => 10,
            Level::Hard => 20,
        }
    }

    fn limit(level: Level) -> f64 {
        match level {
            Level::Easy => 10.0,
            Level::Medium => 20.0,
            Level::Hard => 45.0,
        }
    }

    fn pick(ops: &[Op], rng: &mut Pcg32) -> Op {
        ops[rng.random_range(0..ops.len())]
    }

    fn generate_expr(level: Level, rng: &mut Pcg32) -> Expr {
        match level {
            Level::Easy => {
                let a = rng.random_range(1..=50i64);
                let b = rng.random_range(1..=50i64);
                let op = Self::pick(&OPS_EASY, rng);
                Expr::bin(op, Expr::num(a), Expr::num(b))
            }
            Level::Medium => {
                let a = rng.random_range(5..=50i64);
                let mut b = rng.random_range(5..=50i64);
                let mut c = rng.random_range(5..=20i64);
                let op1 = Self::pick(&OPS_MEDIUM, rng);
                if op1 == Op::Mul {
                    b = rng.random_range(1..=10);
                }
                let op2 = Self::pick(&OPS_MEDIUM, rng);
                if op2 == Op::Mul {
                    c = rng.random_range(3..=12);
                }
                Expr::chain3(Expr::num(a), op1, Expr::num(b), op2, Expr::num(c))
            }
            Level::Hard => {
                let a = rng.random_range(10..=100i64);
                let mut b = rng.random_range(10..=100i64);
                let op1 = Self::pick(&OPS_HARD, rng);
                match op1 {
                    Op::Mul => b = rng.random_range(2..=4),
                    Op::Div => b = rng.random_range(2..=3),
                    _ => {}
                }
                let op2 = Self::pick(&OPS_HARD, rng);
                // rhs group: redrawn until nonzero when it ends up a divisor
                loop {
                    let mut c = rng.random_range(5..=25i64);
                    let mut d = rng.random_range(1..=10i64);
                    if op2 == Op::Mul {
                        c = rng.random_range(2..=6);
                    } else if op2 == Op::Div {
                        c = rng.random_range(2..=5);
                    }
                    let op3 = Self::pick(&OPS_HARD, rng);
                    match op3 {
                        Op::Mul => d = rng.random_range(2..=10),
                        Op::Div => d = rng.random_range(2..=5),
                        _ => {}
                    }
                    let rhs = Expr::bin(op3, Expr::num(c), Expr::num(d));
                    if op2 == Op::Div && rhs.eval() == 0.0 {
                        continue;
                    }
                    let lhs = Expr::bin(op1, Expr::num(a), Expr::num(b));
                    return Expr::bin(op2, lhs, rhs);
                }
            }
        }
    }
}

impl Default for Arithmetic {
    fn default() -> Self {
        Self::new(DEFAULT_PROBLEM_COUNT)
    }
}

impl Game for Arithmetic {
    fn name(&self) -> &'static str {
        "arithmetic"
    }

    fn progression(&self) -> Progression {
        Progression::FixedRounds(self.total_problems)
    }

    fn miss_policy(&self) -> MissPolicy {
        MissPolicy::Continue
    }

    fn generate(&mut self, level: Level, _ctx: RoundContext, rng: &mut Pcg32) -> Challenge {
        let expr = Self::generate_expr(level, rng);
        let answer = expr.answer();
        Challenge::Arithmetic { expr, answer }
    }

    fn time_limit(&self, level: Level, _ctx: RoundContext) -> f64 {
        Self::limit(level)
    }

    fn score_success(&self, level: Level, _ctx: RoundContext, elapsed: f64) -> i32 {
        let base = Self::base_points(level);
        speed_bonus_score(base, Self::limit(level), elapsed, BONUS_MULTIPLIER, base)
    }

    fn miss_penalty(&self, level: Level) -> i32 {
        half_points(Self::base_points(level))
    }

    fn empty_response(&self) -> UserResponse {
        UserResponse::Numeric(String::new())
    }

    fn delays(&self) -> AdvanceDelays {
        AdvanceDelays {
            success: 0.7,
            failure: 0.7,
            timeout: 1.0,
        }
    }
}
