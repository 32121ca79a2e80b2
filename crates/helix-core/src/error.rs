//! Parse errors.

/// What went wrong while parsing a line.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseReason {
    #[error("unexpected character: '{0}'")]
    UnexpectedChar(char),
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("unexpected token: '{0}'")]
    UnexpectedToken(String),
    #[error("missing operator before '{0}'")]
    MissingOperator(String),
    #[error("invalid number: '{0}'")]
    InvalidNumber(String),
    #[error("unknown function: '{0}'")]
    UnknownFunction(String),
    #[error("function '{0}' needs an argument list")]
    MissingArguments(String),
    #[error("unmatched '('")]
    UnclosedParen,
    #[error("unmatched ')'")]
    UnmatchedCloseParen,
    #[error("cannot assign to '{0}'")]
    InvalidAssignment(String),
    #[error("expression nested too deeply")]
    TooDeep,
}

/// A parse failure at a 1-based line and 1-based character column.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("line {line}, column {column}: {reason}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub reason: ParseReason,
}

impl ParseError {
    pub fn new(line: usize, column: usize, reason: ParseReason) -> Self {
        Self {
            line,
            column,
            reason,
        }
    }
}
