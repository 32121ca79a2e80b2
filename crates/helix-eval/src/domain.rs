//! Real interval sampled for `x`.

use crate::error::DomainError;

/// Sample points `begin + i * step` for `i` in `0..len`.
///
/// The upper bound is exclusive: `[-2, 2]` at step `0.05` has 80 samples and
/// never evaluates `x = 2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    begin: f64,
    end: f64,
    step: f64,
    count: usize,
}

impl Domain {
    /// Step used when a zero step is requested.
    pub const DEFAULT_STEP: f64 = 0.05;
    /// Upper limit on samples per batch.
    pub const MAX_SAMPLES: usize = 1_000_000;

    /// Bounds may come in either order. A zero step becomes
    /// [`DEFAULT_STEP`](Self::DEFAULT_STEP) and a negative one its absolute value.
    pub fn new(min: f64, max: f64, step: f64) -> Result<Self, DomainError> {
        if !(min.is_finite() && max.is_finite() && step.is_finite()) {
            return Err(DomainError::NonFinite);
        }
        let begin = min.min(max);
        let end = min.max(max);
        let step = if step == 0.0 {
            Self::DEFAULT_STEP
        } else {
            step.abs()
        };

        let requested = ((end - begin) / step).floor();
        if !requested.is_finite() || requested > Self::MAX_SAMPLES as f64 {
            return Err(DomainError::TooManySamples {
                requested,
                limit: Self::MAX_SAMPLES,
            });
        }

        Ok(Self {
            begin,
            end,
            step,
            count: requested as usize,
        })
    }

    pub fn begin(&self) -> f64 {
        self.begin
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// `x` of sample `index`. Not bounds-checked.
    pub fn x_at(&self, index: usize) -> f64 {
        self.begin + index as f64 * self.step
    }

    /// Sample points in increasing order.
    pub fn points(&self) -> impl DoubleEndedIterator<Item = f64> + ExactSizeIterator + '_ {
        (0..self.count).map(|i| self.x_at(i))
    }
}

impl Default for Domain {
    fn default() -> Self {
        Self {
            begin: -2.0,
            end: 2.0,
            step: Self::DEFAULT_STEP,
            count: 80,
        }
    }
}
