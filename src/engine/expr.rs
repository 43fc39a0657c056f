//! Typed arithmetic expressions
//!
//! Arithmetic challenges are built and evaluated as a small expression tree
//! rather than a text string fed to an evaluator. Display still renders the
//! familiar `a op b` form for the UI.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    pub fn symbol(&self) -> char {
        match self {
            Op::Add => '+',
            Op::Sub => '-',
            Op::Mul => '*',
            Op::Div => '/',
        }
    }

    /// Standard precedence: `*` and `/` bind tighter than `+` and `-`.
    fn precedence(&self) -> u8 {
        match self {
            Op::Add | Op::Sub => 1,
            Op::Mul | Op::Div => 2,
        }
    }

    fn apply(&self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Op::Add => lhs + rhs,
            Op::Sub => lhs - rhs,
            Op::Mul => lhs * rhs,
            Op::Div => lhs / rhs,
        }
    }
}

/// An arithmetic expression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    Num(f64),
    Bin {
        op: Op,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl Expr {
    pub fn num(value: i64) -> Self {
        Expr::Num(value as f64)
    }

    pub fn bin(op: Op, lhs: Expr, rhs: Expr) -> Self {
        Expr::Bin {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Combine three operands with two infix operators, honoring precedence
    /// the way the displayed form `a op1 b op2 c` reads.
    pub fn chain3(a: Expr, op1: Op, b: Expr, op2: Op, c: Expr) -> Self {
        if op2.precedence() > op1.precedence() {
            Expr::bin(op1, a, Expr::bin(op2, b, c))
        } else {
            Expr::bin(op2, Expr::bin(op1, a, b), c)
        }
    }

    pub fn eval(&self) -> f64 {
        match self {
            Expr::Num(v) => *v,
            Expr::Bin { op, lhs, rhs } => op.apply(lhs.eval(), rhs.eval()),
        }
    }

    /// The value rounded to one decimal place, as players see and type it.
    pub fn answer(&self) -> f64 {
        (self.eval() * 10.0).round() / 10.0
    }

    fn fmt_child(child: &Expr, parent: Op, is_rhs: bool, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let needs_parens = match child {
            Expr::Num(_) => false,
            Expr::Bin { op, .. } => {
                op.precedence() < parent.precedence()
                    || (is_rhs
                        && op.precedence() == parent.precedence()
                        && matches!(parent, Op::Sub | Op::Div))
            }
        };
        if needs_parens {
            write!(f, "({child})")
        } else {
            write!(f, "{child}")
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Num(v) => write!(f, "{v}"),
            Expr::Bin { op, lhs, rhs } => {
                Expr::fmt_child(lhs, *op, false, f)?;
                write!(f, " {} ", op.symbol())?;
                Expr::fmt_child(rhs, *op, true, f)
            }
        }
    }
}
