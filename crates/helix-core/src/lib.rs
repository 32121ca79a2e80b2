//! helix-core: the stack-based function language.
//!
//! A function is written one item per line. Each line is a number, a
//! variable, an operator, an assignment, a comment, or a small infix
//! expression. Lines are parsed into a flat [`Program`] of Reverse-Polish
//! [`Token`]s that an interpreter runs once per sample of `x`.
//!
//! # Syntax
//!
//! ```text
//! # comment            // ignored
//! x                    // push the sample value
//! 2                    // push a number (also 3i, -i, 4-3i, 0,5)
//! ^                    // pop two, push their power
//! =a                   // pop into the calculated variable `a`
//! a                    // push a variable
//! sin(a) + 2*x         // infix, compiled to RPN: a sin 2 x * +
//! ```
//!
//! # Example
//!
//! ```
//! use rhizome_helix_core::{BinOp, Operator, Program, Token};
//!
//! let program = Program::parse("x\n2\n^").unwrap();
//! let tokens: Vec<&Token> = program.tokens().collect();
//! assert_eq!(tokens[0], &Token::XRef);
//! assert_eq!(tokens[2], &Token::Operator(Operator::Binary(BinOp::Pow)));
//! ```

use serde::{Deserialize, Serialize};

mod error;
mod lexer;
mod number;
mod parser;
mod token;

pub use error::{ParseError, ParseReason};
pub use number::parse_number;
pub use parser::{MAX_DEPTH, parse_expression, parse_line};
pub use rhizome_helix_complex::Complex;
pub use token::{BinOp, InvalidOperator, Operator, Token, UnaryOp};

// ============================================================================
// Program
// ============================================================================

/// A token tagged with the 1-based source line it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub line: usize,
    pub token: Token,
}

/// A parsed function: a flat sequence of tokens in evaluation order.
///
/// Programs are immutable. Editing the source means parsing a new one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    /// Parses multi-line source text. Blank and comment lines produce no tokens.
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        Self::from_lines(source.lines())
    }

    /// Parses pre-split lines, numbered from 1.
    pub fn from_lines<I, S>(lines: I) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut instructions = Vec::new();
        let mut line_count = 0;
        for (index, text) in lines.into_iter().enumerate() {
            let line = index + 1;
            line_count = line;
            for token in parse_line(line, text.as_ref())? {
                if !matches!(token, Token::Comment(_)) {
                    instructions.push(Instruction { line, token });
                }
            }
        }
        tracing::debug!(
            lines = line_count,
            tokens = instructions.len(),
            "parsed program"
        );
        Ok(Self { instructions })
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.instructions.iter().map(|i| &i.token)
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

impl std::str::FromStr for Program {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Program::parse(s)
    }
}

// ============================================================================
// Tests
// ============================================================================
