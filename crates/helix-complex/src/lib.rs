//! Complex numbers for helix curves.
//!
//! An immutable `Complex<T>` value type with arithmetic, exponential,
//! logarithmic and trigonometric functions, generic over `T: Float`.
//! Every operation returns a new value and none of them panic: NaN and
//! infinities propagate per IEEE-754.
//!
//! # Example
//!
//! ```
//! use rhizome_helix_complex::Complex;
//!
//! let a = Complex::new(1.0, 2.0);
//! let b = Complex::new(3.0, 4.0);
//! // (1+2i)(3+4i) = 3 + 4i + 6i + 8i² = -5 + 10i
//! assert_eq!(a * b, Complex::new(-5.0, 10.0));
//!
//! // 0 raised to anything nonzero is exactly zero
//! assert_eq!(Complex::zero().raise(Complex::new(2.0, 1.0)), Complex::zero());
//! ```

use num_traits::Float;

mod funcs;
mod ops;

// ============================================================================
// Types
// ============================================================================

/// A complex number `re + im·i`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Complex<T> {
    pub re: T,
    pub im: T,
}

/// Polar form `r·e^(iθ)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polar<T> {
    pub r: T,
    pub theta: T,
}

/// Converts an `f64` constant into `T`.
pub(crate) fn lit<T: Float>(v: f64) -> T {
    T::from(v).unwrap_or_else(T::nan)
}

impl<T> Complex<T> {
    pub const fn new(re: T, im: T) -> Self {
        Self { re, im }
    }
}

impl<T: Float> Complex<T> {
    /// Promotes a real to `(v, 0)`.
    pub fn real(v: T) -> Self {
        Self::new(v, T::zero())
    }

    /// Pure imaginary `(0, v)`.
    pub fn imag(v: T) -> Self {
        Self::new(T::zero(), v)
    }

    pub fn zero() -> Self {
        Self::new(T::zero(), T::zero())
    }

    pub fn one() -> Self {
        Self::new(T::one(), T::zero())
    }

    /// The imaginary unit.
    pub fn i() -> Self {
        Self::new(T::zero(), T::one())
    }

    pub fn nan() -> Self {
        Self::new(T::nan(), T::nan())
    }

    pub fn is_zero(&self) -> bool {
        self.re == T::zero() && self.im == T::zero()
    }

    pub fn is_nan(&self) -> bool {
        self.re.is_nan() || self.im.is_nan()
    }

    /// Magnitude `|z|` as a bare real.
    pub fn magnitude(&self) -> T {
        self.re.hypot(self.im)
    }

    /// Converts to polar form. The angle of zero is taken as `0`.
    pub fn to_polar(&self) -> Polar<T> {
        let r = self.magnitude();
        let theta = if r == T::zero() {
            T::zero()
        } else {
            self.im.atan2(self.re)
        };
        Polar { r, theta }
    }

    pub fn from_polar(r: T, theta: T) -> Self {
        Self::new(r * theta.cos(), r * theta.sin())
    }

    /// Formats as `a + bi`, rounding both parts to `precision` decimal digits.
    ///
    /// A zero imaginary part prints as just `a`, and a zero real part with a
    /// nonzero imaginary part prints as `bi`.
    pub fn print(&self, precision: usize) -> String {
        let re = round_to(to_f64(self.re), precision);
        let im = round_to(to_f64(self.im), precision);
        format_parts(re, im)
    }
}

impl<T: Float> From<T> for Complex<T> {
    fn from(v: T) -> Self {
        Complex::real(v)
    }
}

impl<T: Float> From<Polar<T>> for Complex<T> {
    fn from(p: Polar<T>) -> Self {
        Complex::from_polar(p.r, p.theta)
    }
}

impl<T: Float> std::fmt::Display for Complex<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format_parts(to_f64(self.re), to_f64(self.im)))
    }
}

// ============================================================================
// Formatting helpers
// ============================================================================

fn to_f64<T: Float>(v: T) -> f64 {
    v.to_f64().unwrap_or(f64::NAN)
}

/// Highest precision that still leaves headroom in `10^p`.
const MAX_PRECISION: usize = 15;

fn round_to(v: f64, precision: usize) -> f64 {
    if !v.is_finite() {
        return v;
    }
    let scale = 10f64.powi(precision.min(MAX_PRECISION) as i32);
    let scaled = v * scale;
    if !scaled.is_finite() {
        return v;
    }
    let rounded = scaled.round() / scale;
    // clears negative zero
    if rounded == 0.0 { 0.0 } else { rounded }
}

fn format_parts(re: f64, im: f64) -> String {
    let re = if re == 0.0 { 0.0 } else { re };
    if im == 0.0 {
        return format!("{re}");
    }
    if re == 0.0 {
        return format!("{im}i");
    }
    let sign = if im.is_sign_negative() { '-' } else { '+' };
    format!("{re} {sign} {}i", im.abs())
}

// ============================================================================
// Tests
// ============================================================================
