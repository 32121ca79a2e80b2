//! Program tokens and the closed operator set.

use rhizome_helix_complex::Complex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One token of a program, in Reverse-Polish order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Token {
    /// Numeric literal, already resolved to a complex value.
    Number(Complex<f64>),
    /// Variable reference (calculated variable or registry entry).
    Identifier(String),
    Operator(Operator),
    /// `=name`: pop the top of the stack into a calculated variable.
    Assign(String),
    /// `#...` line. Never stored in a [`Program`](crate::Program).
    Comment(String),
    /// The sample variable `x`.
    XRef,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

/// Unary operators, written as functions in infix syntax (`sin(x)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
    Ln,
    Exp,
    Sqrt,
    Abs,
    Arg,
    Re,
    Im,
    Conj,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
}

/// An operator token. Arity is fixed by the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Operator {
    Binary(BinOp),
    Unary(UnaryOp),
}

/// An operator symbol outside the known set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid operator: '{symbol}'")]
pub struct InvalidOperator {
    pub symbol: String,
}

impl BinOp {
    pub const ALL: [BinOp; 5] = [BinOp::Add, BinOp::Sub, BinOp::Mul, BinOp::Div, BinOp::Pow];

    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Pow => "^",
        }
    }
}

impl UnaryOp {
    pub const ALL: [UnaryOp; 15] = [
        UnaryOp::Neg,
        UnaryOp::Ln,
        UnaryOp::Exp,
        UnaryOp::Sqrt,
        UnaryOp::Abs,
        UnaryOp::Arg,
        UnaryOp::Re,
        UnaryOp::Im,
        UnaryOp::Conj,
        UnaryOp::Sin,
        UnaryOp::Cos,
        UnaryOp::Tan,
        UnaryOp::Asin,
        UnaryOp::Acos,
        UnaryOp::Atan,
    ];

    pub fn name(self) -> &'static str {
        match self {
            UnaryOp::Neg => "neg",
            UnaryOp::Ln => "ln",
            UnaryOp::Exp => "exp",
            UnaryOp::Sqrt => "sqrt",
            UnaryOp::Abs => "abs",
            UnaryOp::Arg => "arg",
            UnaryOp::Re => "re",
            UnaryOp::Im => "im",
            UnaryOp::Conj => "conj",
            UnaryOp::Sin => "sin",
            UnaryOp::Cos => "cos",
            UnaryOp::Tan => "tan",
            UnaryOp::Asin => "asin",
            UnaryOp::Acos => "acos",
            UnaryOp::Atan => "atan",
        }
    }

    /// Looks up a function name. `log` is accepted as an alias of `ln`.
    pub fn from_name(name: &str) -> Option<Self> {
        if name == "log" {
            return Some(UnaryOp::Ln);
        }
        Self::ALL.into_iter().find(|op| op.name() == name)
    }
}

impl Operator {
    /// Number of stack values the operator consumes.
    pub fn arity(self) -> usize {
        match self {
            Operator::Binary(_) => 2,
            Operator::Unary(_) => 1,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Binary(op) => op.symbol(),
            Operator::Unary(op) => op.name(),
        }
    }
}

impl FromStr for Operator {
    type Err = InvalidOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(op) = BinOp::ALL.into_iter().find(|op| op.symbol() == s) {
            return Ok(Operator::Binary(op));
        }
        UnaryOp::from_name(s)
            .map(Operator::Unary)
            .ok_or_else(|| InvalidOperator {
                symbol: s.to_string(),
            })
    }
}

impl TryFrom<String> for Operator {
    type Error = InvalidOperator;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Operator> for &'static str {
    fn from(op: Operator) -> Self {
        op.symbol()
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Number(c) => write!(f, "{c}"),
            Token::Identifier(name) => f.write_str(name),
            Token::Operator(op) => write!(f, "{op}"),
            Token::Assign(name) => write!(f, "={name}"),
            Token::Comment(text) => write!(f, "#{text}"),
            Token::XRef => f.write_str("x"),
        }
    }
}
