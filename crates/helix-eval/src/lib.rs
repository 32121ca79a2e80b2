//! helix-eval: runs helix programs over a sampled domain.
//!
//! A [`Program`] is evaluated once per sample of `x` against a
//! [`VariableRegistry`]. Each evaluation starts from an empty stack and an
//! empty set of calculated variables, so samples never see each other's state.
//! Whatever remains on the stack at the end is the result, one value per
//! output curve.
//!
//! # Example
//!
//! ```
//! use rhizome_helix_core::Program;
//! use rhizome_helix_eval::{Domain, VariableRegistry, evaluate, evaluate_batch};
//!
//! let program = Program::parse("x\n2\n^").unwrap();
//! let registry = VariableRegistry::new();
//!
//! let values = evaluate(&program, &registry, 3.0).unwrap();
//! assert_eq!(values[0].re, 9.0);
//!
//! let samples = evaluate_batch(&program, &registry, &Domain::default()).unwrap();
//! assert_eq!(samples.len(), 80);
//! ```

use std::collections::HashMap;

use rhizome_helix_complex::Complex;
use rhizome_helix_core::{Operator, Program, Token};
use serde::Serialize;

mod curves;
mod domain;
mod error;
mod ops;
mod registry;
mod stack;


pub use curves::{Curves, Point3};
pub use domain::Domain;
pub use error::{CurveError, DomainError, Error, EvalError};
pub use ops::{apply_binop, apply_unaryop};
pub use registry::{Variable, VariableKind, VariableRegistry};
pub use stack::{Stack, Underflow};

// ============================================================================
// Evaluation
// ============================================================================

/// Evaluates `program` at one sample `x`.
///
/// Returns the final stack, bottom to top.
pub fn evaluate(
    program: &Program,
    registry: &VariableRegistry,
    x: f64,
) -> Result<Vec<Complex<f64>>, EvalError> {
    let mut stack = Stack::new();
    let mut calculated: HashMap<&str, Complex<f64>> = HashMap::new();

    for instruction in program.instructions() {
        let line = instruction.line;
        let underflow = |_: Underflow| EvalError::StackUnderflow { line };

        match &instruction.token {
            Token::XRef => stack.push(Complex::real(x)),
            Token::Number(value) => stack.push(*value),
            Token::Assign(name) => {
                let value = stack.pop().map_err(underflow)?;
                calculated.insert(name.as_str(), value);
            }
            Token::Identifier(name) => {
                let value = calculated
                    .get(name.as_str())
                    .copied()
                    .or_else(|| registry.resolve(name))
                    .ok_or_else(|| EvalError::UnknownIdentifier {
                        name: name.clone(),
                        line,
                    })?;
                stack.push(value);
            }
            Token::Operator(Operator::Binary(op)) => {
                let (left, right) = stack.pop_pair().map_err(underflow)?;
                stack.push(apply_binop(*op, left, right));
            }
            Token::Operator(Operator::Unary(op)) => {
                let value = stack.pop().map_err(underflow)?;
                stack.push(apply_unaryop(*op, value));
            }
            Token::Comment(_) => {}
        }
    }

    if stack.is_empty() {
        return Err(EvalError::EmptyResult);
    }
    Ok(stack.into_vec())
}

/// The result of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    pub x: f64,
    pub values: Vec<Complex<f64>>,
}

/// Evaluates at every point of `domain`, in order, stopping at the first error.
pub fn evaluate_batch(
    program: &Program,
    registry: &VariableRegistry,
    domain: &Domain,
) -> Result<Vec<Sample>, EvalError> {
    tracing::debug!(
        samples = domain.len(),
        begin = domain.begin(),
        step = domain.step(),
        "evaluating batch"
    );
    evaluate_points(program, registry, domain.points())
}

/// Evaluates at arbitrary points, keeping their order.
pub fn evaluate_points<I>(
    program: &Program,
    registry: &VariableRegistry,
    points: I,
) -> Result<Vec<Sample>, EvalError>
where
    I: IntoIterator<Item = f64>,
{
    points
        .into_iter()
        .map(|x| {
            let values = evaluate(program, registry, x)?;
            tracing::trace!(x, outputs = values.len(), "sample");
            Ok(Sample { x, values })
        })
        .collect()
}

/// Parses `source`, evaluates it over `domain` and joins the samples into curves.
pub fn curves(source: &str, registry: &VariableRegistry, domain: &Domain) -> Result<Curves, Error> {
    let program = Program::parse(source)?;
    let samples = evaluate_batch(&program, registry, domain)?;
    Ok(Curves::from_samples(&samples)?)
}

// ============================================================================
// Tests
// ============================================================================
