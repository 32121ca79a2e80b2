//! Transposes per-sample results into per-output curves.

use serde::Serialize;

use crate::Sample;
use crate::error::CurveError;

/// A point on a curve: the real input against the complex output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point3 {
    pub x: f64,
    pub re: f64,
    pub im: f64,
}

/// One curve per value the program leaves on the stack.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Curves {
    curves: Vec<Vec<Point3>>,
}

impl Curves {
    /// Every sample must carry the same number of values as the first.
    pub fn from_samples(samples: &[Sample]) -> Result<Self, CurveError> {
        let Some(first) = samples.first() else {
            return Ok(Self::default());
        };
        let expected = first.values.len();
        let mut curves = vec![Vec::with_capacity(samples.len()); expected];

        for (index, sample) in samples.iter().enumerate() {
            if sample.values.len() != expected {
                return Err(CurveError::InconsistentArity {
                    index,
                    expected,
                    got: sample.values.len(),
                });
            }
            for (curve, value) in curves.iter_mut().zip(&sample.values) {
                curve.push(Point3 {
                    x: sample.x,
                    re: value.re,
                    im: value.im,
                });
            }
        }

        Ok(Self { curves })
    }

    /// Number of curves.
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&[Point3]> {
        self.curves.get(index).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = &[Point3]> {
        self.curves.iter().map(Vec::as_slice)
    }

    pub fn into_inner(self) -> Vec<Vec<Point3>> {
        self.curves
    }
}
