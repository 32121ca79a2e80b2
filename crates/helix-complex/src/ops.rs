//! Arithmetic operators and exponentiation.
//!
//! Each binary operator accepts either another `Complex<T>` or a bare `T`
//! on the right, the real being promoted to `(v, 0)`.

use crate::Complex;
use num_traits::Float;
use std::ops::{Add, Div, Mul, Neg, Sub};

// ============================================================================
// Addition
// ============================================================================

impl<T: Float> Add for Complex<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Complex::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl<T: Float> Add<T> for Complex<T> {
    type Output = Self;

    fn add(self, rhs: T) -> Self {
        self + Complex::real(rhs)
    }
}

// ============================================================================
// Subtraction
// ============================================================================

impl<T: Float> Sub for Complex<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Complex::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl<T: Float> Sub<T> for Complex<T> {
    type Output = Self;

    fn sub(self, rhs: T) -> Self {
        self - Complex::real(rhs)
    }
}

// ============================================================================
// Multiplication
// ============================================================================

impl<T: Float> Mul for Complex<T> {
    type Output = Self;

    // (a + bi)(c + di) = (ac - bd) + (ad + bc)i
    fn mul(self, rhs: Self) -> Self {
        Complex::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

impl<T: Float> Mul<T> for Complex<T> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self {
        Complex::new(self.re * rhs, self.im * rhs)
    }
}

// ============================================================================
// Division
// ============================================================================

impl<T: Float> Div for Complex<T> {
    type Output = Self;

    /// `a / b = a · b^-1`. Dividing by zero gives `(NaN, NaN)`.
    fn div(self, rhs: Self) -> Self {
        // raise() maps 0^-1 to 0, so zero is caught here first
        if rhs.is_zero() {
            return Complex::nan();
        }
        self * rhs.raise(Complex::real(-T::one()))
    }
}

impl<T: Float> Div<T> for Complex<T> {
    type Output = Self;

    fn div(self, rhs: T) -> Self {
        self / Complex::real(rhs)
    }
}

// ============================================================================
// Negation
// ============================================================================

impl<T: Float> Neg for Complex<T> {
    type Output = Self;

    fn neg(self) -> Self {
        Complex::new(-self.re, -self.im)
    }
}

// ============================================================================
// Power
// ============================================================================

impl<T: Float> Complex<T> {
    /// Principal value of `self ^ exponent`.
    ///
    /// With `self = r·e^(iθ)` and `exponent = c + di` the result is
    /// `exp(c·ln r - d·θ) · e^(i(d·ln r + c·θ))`. Zero raised to any exponent
    /// of nonzero magnitude is exactly zero.
    pub fn raise(self, exponent: Self) -> Self {
        if self.magnitude() == T::zero() && exponent.magnitude() != T::zero() {
            return Complex::zero();
        }
        let polar = self.to_polar();
        let ln_r = polar.r.ln();
        let mag = (exponent.re * ln_r - exponent.im * polar.theta).exp();
        let angle = exponent.im * ln_r + exponent.re * polar.theta;
        Complex::from_polar(mag, angle)
    }
}

// ============================================================================
// Tests
// ============================================================================
