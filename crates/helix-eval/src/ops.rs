//! Operator semantics.

use rhizome_helix_complex::Complex;
use rhizome_helix_core::{BinOp, UnaryOp};

/// Apply a binary operator to `(below, top)`.
pub fn apply_binop(op: BinOp, left: Complex<f64>, right: Complex<f64>) -> Complex<f64> {
    match op {
        BinOp::Add => left + right,
        BinOp::Sub => left - right,
        BinOp::Mul => left * right,
        BinOp::Div => left / right,
        BinOp::Pow => left.raise(right),
    }
}

/// Apply a unary operator.
pub fn apply_unaryop(op: UnaryOp, val: Complex<f64>) -> Complex<f64> {
    match op {
        UnaryOp::Neg => -val,
        UnaryOp::Ln => val.ln(),
        UnaryOp::Exp => val.exp(),
        UnaryOp::Sqrt => val.sqrt(),
        UnaryOp::Abs => val.abs(),
        UnaryOp::Arg => val.arg(),
        UnaryOp::Re => val.real_part(),
        UnaryOp::Im => val.imag_part(),
        UnaryOp::Conj => val.conj(),
        UnaryOp::Sin => val.sin(),
        UnaryOp::Cos => val.cos(),
        UnaryOp::Tan => val.tan(),
        UnaryOp::Asin => val.asin(),
        UnaryOp::Acos => val.acos(),
        UnaryOp::Atan => val.atan(),
    }
}
