//! Evaluation errors.

use rhizome_helix_core::ParseError;

/// Failure while evaluating a program at one sample.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvalError {
    /// An operator or assignment found too few values on the stack.
    #[error("line {line}: stack underflow")]
    StackUnderflow { line: usize },
    /// A name that is neither a calculated variable nor in the registry.
    #[error("line {line}: unknown identifier '{name}'")]
    UnknownIdentifier { name: String, line: usize },
    /// The program left nothing on the stack.
    #[error("function produced no values")]
    EmptyResult,
}

/// Invalid domain parameters.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("domain bounds and step must be finite")]
    NonFinite,
    #[error("domain needs {requested} samples, limit is {limit}")]
    TooManySamples { requested: f64, limit: usize },
}

/// Samples that cannot be joined into curves.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CurveError {
    #[error("sample {index} has {got} values, expected {expected}")]
    InconsistentArity {
        index: usize,
        expected: usize,
        got: usize,
    },
}

/// Any failure between source text and finished curves.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Curve(#[from] CurveError),
}
