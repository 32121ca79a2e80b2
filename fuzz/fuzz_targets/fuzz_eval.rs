#![no_main]

//! Structured fuzzer for the interpreter.
//!
//! Builds programs from a small vocabulary of lines so most inputs parse, then
//! checks that evaluation never panics and that results do not depend on the
//! order samples are taken in.

use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;
use rhizome_helix_complex::Complex;
use rhizome_helix_core::{BinOp, Program, UnaryOp};
use rhizome_helix_eval::{EvalError, VariableRegistry, evaluate};

const NAMES: &[&str] = &["a", "b", "pi", "e"];

/// One source line.
#[derive(Debug, Clone)]
enum Line {
    X,
    Number(f64, f64),
    Name(usize),
    Assign(usize),
    Binary(BinOp),
    Unary(UnaryOp),
    Infix(String),
    Comment,
}

impl Line {
    fn render(&self) -> String {
        match self {
            Line::X => "x".into(),
            Line::Number(re, im) => Complex::new(*re, *im).print(6),
            Line::Name(i) => NAMES[*i].into(),
            Line::Assign(i) => format!("={}", NAMES[*i]),
            Line::Binary(op) => op.symbol().into(),
            Line::Unary(op) => op.name().into(),
            Line::Infix(text) => text.clone(),
            Line::Comment => "# note".into(),
        }
    }
}

impl<'a> Arbitrary<'a> for Line {
    fn arbitrary(u: &mut Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(match u.int_in_range(0..=7)? {
            0 => Line::X,
            1 => Line::Number(small(u)?, small(u)?),
            2 => Line::Name(u.choose_index(NAMES.len())?),
            3 => Line::Assign(u.choose_index(NAMES.len())?),
            4 => Line::Binary(*u.choose(&BinOp::ALL)?),
            5 => Line::Unary(*u.choose(&UnaryOp::ALL)?),
            6 => Line::Infix(infix(u, 0)?),
            _ => Line::Comment,
        })
    }
}

fn small(u: &mut Unstructured) -> arbitrary::Result<f64> {
    Ok(f64::from(u.int_in_range(-100i32..=100)?) / 10.0)
}

fn infix(u: &mut Unstructured, depth: usize) -> arbitrary::Result<String> {
    if depth > 4 || u.ratio(1, 3)? {
        return Ok(match u.int_in_range(0..=2)? {
            0 => "x".into(),
            1 => NAMES[u.choose_index(NAMES.len())?].into(),
            _ => format!("{}", u.int_in_range(0u8..=9)?),
        });
    }
    Ok(match u.int_in_range(0..=2)? {
        0 => {
            let op = u.choose(&BinOp::ALL)?;
            format!(
                "({} {} {})",
                infix(u, depth + 1)?,
                op.symbol(),
                infix(u, depth + 1)?
            )
        }
        1 => {
            let op = u.choose(&UnaryOp::ALL)?;
            format!("{}({})", op.name(), infix(u, depth + 1)?)
        }
        _ => format!("-{}", infix(u, depth + 1)?),
    })
}

#[derive(Debug, Arbitrary)]
struct EvalInput {
    lines: Vec<Line>,
    a: (i8, i8),
    b: i8,
    xs: Vec<i16>,
}

fn same(left: &Result<Vec<Complex<f64>>, EvalError>, right: &Result<Vec<Complex<f64>>, EvalError>) -> bool {
    match (left, right) {
        (Ok(l), Ok(r)) => {
            l.len() == r.len()
                && l.iter().zip(r).all(|(p, q)| {
                    // NaN != NaN, so compare bit patterns
                    p.re.to_bits() == q.re.to_bits() && p.im.to_bits() == q.im.to_bits()
                })
        }
        (Err(l), Err(r)) => l == r,
        _ => false,
    }
}

fuzz_target!(|input: EvalInput| {
    let source: Vec<String> = input.lines.iter().map(Line::render).collect();
    let Ok(program) = Program::from_lines(&source) else {
        return;
    };

    let mut registry = VariableRegistry::new();
    registry.define_constant("a", Complex::new(input.a.0.into(), input.a.1.into()));
    registry.define_range("b", -1.0, 1.0, f64::from(input.b) / 128.0);

    let xs: Vec<f64> = input.xs.iter().take(64).map(|&x| f64::from(x) / 100.0).collect();
    let forward: Vec<_> = xs.iter().map(|&x| evaluate(&program, &registry, x)).collect();
    let backward: Vec<_> = xs.iter().rev().map(|&x| evaluate(&program, &registry, x)).collect();

    for (f, b) in forward.iter().zip(backward.iter().rev()) {
        assert!(same(f, b), "sample results depend on evaluation order");
    }
});
