//! Challenge content and player responses
//!
//! A [`Challenge`] is one round's content plus its expected answer. It is
//! created fresh by the game's generator when the round begins and discarded
//! when the round resolves. The matching [`UserResponse`] accumulates input
//! while the round accepts it.

use serde::{Deserialize, Serialize};

use super::expr::Expr;
use crate::consts::ANSWER_TOLERANCE;

/// One cell of the tapping grid: `(row, col)`.
pub type Cell = (u8, u8);

/// A palette entry: the word shown to the player and the CSS color it can be
/// painted with. Both sides of a color-word challenge index this palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorOption {
    pub name: &'static str,
    pub css: &'static str,
}

/// Fixed palette; levels use a prefix of this list (4, 6 or 8 entries).
pub const COLOR_PALETTE: [ColorOption; 8] = [
    ColorOption { name: "RED", css: "red" },
    ColorOption { name: "GREEN", css: "green" },
    ColorOption { name: "BLUE", css: "blue" },
    ColorOption { name: "ORANGE", css: "orange" },
    ColorOption { name: "PURPLE", css: "purple" },
    ColorOption { name: "BROWN", css: "brown" },
    ColorOption { name: "PINK", css: "deeppink" },
    ColorOption { name: "CYAN", css: "cyan" },
];

/// Content of a single round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Challenge {
    /// An expression to solve; `answer` is the value rounded to one decimal.
    Arithmetic { expr: Expr, answer: f64 },
    /// A color word painted in an (independently drawn) display color.
    /// Both are indices into [`COLOR_PALETTE`]; the display color is correct.
    ColorWord { word: usize, display: usize },
    /// Digits revealed one at a time, recalled in order.
    DigitSequence { digits: Vec<u8> },
    /// Grid cells lit one at a time, tapped back in order.
    TapPath { cells: Vec<Cell>, grid_size: u8 },
}

impl Challenge {
    /// Number of symbols revealed piecewise before input opens, for content
    /// that presents over time. `None` for content shown all at once.
    pub fn reveal_len(&self) -> Option<usize> {
        match self {
            Challenge::DigitSequence { digits } => Some(digits.len()),
            Challenge::TapPath { cells, .. } => Some(cells.len()),
            _ => None,
        }
    }

    /// Response length at which the round auto-submits.
    pub fn auto_submit_len(&self) -> Option<usize> {
        match self {
            Challenge::DigitSequence { digits } => Some(digits.len()),
            Challenge::TapPath { cells, .. } => Some(cells.len()),
            _ => None,
        }
    }

    /// Structural comparison against the accumulated response.
    ///
    /// Arithmetic compares numerically with an absolute tolerance, because
    /// both sides are one-decimal-rounded values.
    pub fn matches(&self, response: &UserResponse) -> bool {
        match (self, response) {
            (Challenge::Arithmetic { answer, .. }, UserResponse::Numeric(text)) => {
                match text.trim().parse::<f64>() {
                    Ok(value) => (value - answer).abs() <= ANSWER_TOLERANCE,
                    Err(_) => false,
                }
            }
            (Challenge::ColorWord { display, .. }, UserResponse::Color(choice)) => {
                *choice == Some(*display)
            }
            (Challenge::DigitSequence { digits }, UserResponse::Digits(entered)) => {
                digits == entered
            }
            (Challenge::TapPath { cells, .. }, UserResponse::Taps(tapped)) => cells == tapped,
            _ => false,
        }
    }
}

/// Accumulated input for the active round. Reset at round start; mutated only
/// while the round's phase accepts input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UserResponse {
    /// Raw answer text; parsed at submit so garbage can be ignored in place.
    Numeric(String),
    /// Palette index of the tapped color button.
    Color(Option<usize>),
    Digits(Vec<u8>),
    Taps(Vec<Cell>),
}

impl UserResponse {
    /// Length in symbols, used for auto-submit.
    pub fn len(&self) -> usize {
        match self {
            UserResponse::Numeric(text) => text.len(),
            UserResponse::Color(choice) => usize::from(choice.is_some()),
            UserResponse::Digits(entered) => entered.len(),
            UserResponse::Taps(tapped) => tapped.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The typed number, if the response is numeric and parseable.
    pub fn parsed_number(&self) -> Option<f64> {
        match self {
            UserResponse::Numeric(text) => text.trim().parse().ok(),
            _ => None,
        }
    }
}
