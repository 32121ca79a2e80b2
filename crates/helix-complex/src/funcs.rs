//! Complex functions: abs, arg, exp, ln, sqrt, trig and inverse trig.
//!
//! Functions that conceptually return a real (`abs`, `arg`, `norm`) still
//! return a `Complex` with zero imaginary part so they compose with the rest.

use crate::{Complex, lit};
use num_traits::Float;

impl<T: Float> Complex<T> {
    // ========================================================================
    // Components
    // ========================================================================

    /// Magnitude: abs(z) = (|z|, 0)
    pub fn abs(self) -> Self {
        Complex::real(self.magnitude())
    }

    /// Principal argument in (-π, π], as (θ, 0).
    pub fn arg(self) -> Self {
        Complex::real(self.to_polar().theta)
    }

    /// Squared magnitude: norm(z) = (re² + im², 0)
    pub fn norm(self) -> Self {
        Complex::real(self.re * self.re + self.im * self.im)
    }

    /// Complex conjugate: conj(a + bi) = a - bi
    pub fn conj(self) -> Self {
        Complex::new(self.re, -self.im)
    }

    /// Real part as (re, 0).
    pub fn real_part(self) -> Self {
        Complex::real(self.re)
    }

    /// Imaginary part as (im, 0).
    pub fn imag_part(self) -> Self {
        Complex::real(self.im)
    }

    // ========================================================================
    // Exponential and logarithm
    // ========================================================================

    /// exp(a + bi) = e^a · (cos b + i·sin b)
    pub fn exp(self) -> Self {
        Complex::from_polar(self.re.exp(), self.im)
    }

    /// Principal logarithm: ln(z) = ln|z| + i·arg(z)
    pub fn ln(self) -> Self {
        let polar = self.to_polar();
        Complex::new(polar.r.ln(), polar.theta)
    }

    /// Principal square root: sqrt(r·e^(iθ)) = sqrt(r)·e^(iθ/2)
    pub fn sqrt(self) -> Self {
        let polar = self.to_polar();
        Complex::from_polar(polar.r.sqrt(), polar.theta * lit(0.5))
    }

    // ========================================================================
    // Trigonometry
    // ========================================================================

    /// sin(a + bi) = sin a·cosh b + i·cos a·sinh b
    pub fn sin(self) -> Self {
        Complex::new(
            self.re.sin() * self.im.cosh(),
            self.re.cos() * self.im.sinh(),
        )
    }

    /// cos(a + bi) = cos a·cosh b - i·sin a·sinh b
    pub fn cos(self) -> Self {
        Complex::new(
            self.re.cos() * self.im.cosh(),
            -(self.re.sin() * self.im.sinh()),
        )
    }

    /// tan(a + bi) = (sin 2a + i·sinh 2b) / (cos 2a + cosh 2b)
    ///
    /// Tends to `±i` as `|b|` grows; once `cosh 2b` overflows that limit is
    /// returned directly.
    pub fn tan(self) -> Self {
        if self.im == T::zero() {
            return Complex::new(self.re.tan(), self.im);
        }
        let two_a = self.re + self.re;
        let two_b = self.im + self.im;
        let denom = two_a.cos() + two_b.cosh();
        if denom.is_infinite() {
            return Complex::new(T::zero(), self.im.signum());
        }
        Complex::new(two_a.sin() / denom, two_b.sinh() / denom)
    }

    /// asin(z) = -i·ln(iz + w) = i·ln(w - iz), with w = sqrt(1 - z²)
    ///
    /// `(iz + w)(w - iz) = 1`, so both forms agree. The one with the larger
    /// argument is taken, since the other cancels far from the origin.
    pub fn asin(self) -> Self {
        let i = Complex::i();
        let root = (Complex::one() - self * self).sqrt();
        let iz = i * self;
        let sum = iz + root;
        let diff = root - iz;
        if sum.magnitude() >= diff.magnitude() {
            -(i * sum.ln())
        } else {
            i * diff.ln()
        }
    }

    /// acos(z) = π/2 - asin(z)
    pub fn acos(self) -> Self {
        Complex::real(lit::<T>(std::f64::consts::FRAC_PI_2)) - self.asin()
    }

    /// atan(z) = (i/2)·(ln(1 - iz) - ln(1 + iz))
    pub fn atan(self) -> Self {
        let i = Complex::i();
        let iz = i * self;
        let diff = (Complex::one() - iz).ln() - (Complex::one() + iz).ln();
        i * diff * lit::<T>(0.5)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{E, FRAC_PI_2, FRAC_PI_4, FRAC_PI_6, PI};

    const EPSILON: f64 = 1e-9;

    fn assert_close(actual: Complex<f64>, expected: Complex<f64>) {
        assert!(
            (actual.re - expected.re).abs() < EPSILON && (actual.im - expected.im).abs() < EPSILON,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_abs_is_complex() {
        assert_eq!(Complex::new(3.0, 4.0).abs(), Complex::new(5.0, 0.0));
        assert_eq!(Complex::new(-2.0, 0.0).abs(), Complex::new(2.0, 0.0));
    }

    #[test]
    fn test_abs_propagates_non_finite() {
        assert_eq!(Complex::new(f64::INFINITY, 1.0).abs().re, f64::INFINITY);
        assert!(Complex::new(f64::NAN, 1.0).abs().re.is_nan());
    }

    #[test]
    fn test_arg() {
        assert_close(Complex::new(1.0, 1.0).arg(), Complex::real(FRAC_PI_4));
        assert_close(Complex::new(-1.0, 0.0).arg(), Complex::real(PI));
    }

    #[test]
    fn test_conj_and_parts() {
        let z = Complex::new(3.0, 4.0);
        assert_eq!(z.conj(), Complex::new(3.0, -4.0));
        assert_eq!(z.real_part(), Complex::real(3.0));
        assert_eq!(z.imag_part(), Complex::real(4.0));
        assert_eq!(z.norm(), Complex::real(25.0));
    }

    #[test]
    fn test_exp_euler() {
        // e^(iπ) = -1
        assert_close(Complex::new(0.0, PI).exp(), Complex::new(-1.0, 0.0));
        assert_close(Complex::real(1.0).exp(), Complex::real(E));
    }

    #[test]
    fn test_ln() {
        assert_close(Complex::new(-1.0, 0.0).ln(), Complex::new(0.0, PI));
        assert_close(Complex::new(0.0, 1.0).ln(), Complex::new(0.0, FRAC_PI_2));
        assert_close(Complex::real(E).ln(), Complex::real(1.0));
    }

    #[test]
    fn test_ln_zero() {
        let result = Complex::<f64>::zero().ln();
        assert_eq!(result.re, f64::NEG_INFINITY);
        assert_eq!(result.im, 0.0);
    }

    #[test]
    fn test_exp_ln_inverse() {
        for z in [Complex::new(0.3, -1.2), Complex::new(-2.0, 0.5), Complex::new(4.0, 4.0)] {
            assert_close(z.ln().exp(), z);
        }
    }

    #[test]
    fn test_sqrt() {
        assert_close(Complex::new(-1.0, 0.0).sqrt(), Complex::i());
        assert_close(Complex::new(0.0, 2.0).sqrt(), Complex::new(1.0, 1.0));
        assert_eq!(Complex::<f64>::zero().sqrt(), Complex::zero());
    }

    #[test]
    fn test_sin_cos_real_axis() {
        assert_close(Complex::real(FRAC_PI_6).sin(), Complex::real(0.5));
        assert_close(Complex::real(PI).cos(), Complex::real(-1.0));
        assert_close(Complex::real(FRAC_PI_4).tan(), Complex::real(1.0));
        // near the pole the real axis stays finite
        let pole = Complex::real(FRAC_PI_2).tan();
        assert!(pole.re.is_finite() && pole.re > 1e15 && pole.im == 0.0);
    }

    #[test]
    fn test_sin_imaginary_axis() {
        // sin(i) = i·sinh(1)
        assert_close(Complex::i().sin(), Complex::imag(1.0_f64.sinh()));
        // cos(i) = cosh(1)
        assert_close(Complex::i().cos(), Complex::real(1.0_f64.cosh()));
    }

    #[test]
    fn test_pythagorean_identity() {
        let z = Complex::new(0.7, -0.3);
        let s = z.sin();
        let c = z.cos();
        assert_close(s * s + c * c, Complex::one());
    }

    #[test]
    fn test_inverse_trig_real() {
        assert_close(Complex::real(0.5).asin(), Complex::real(FRAC_PI_6));
        assert_close(Complex::real(0.5).acos(), Complex::real(PI / 3.0));
        assert_close(Complex::real(1.0).atan(), Complex::real(FRAC_PI_4));
    }

    #[test]
    fn test_tan_large_imaginary() {
        assert_eq!(Complex::new(0.5, 800.0).tan(), Complex::i());
        assert_eq!(Complex::new(0.5, -800.0).tan(), -Complex::i());
        assert_close(Complex::new(0.5, 300.0).tan(), Complex::i());
        assert_close(Complex::new(-2.0, -30.0).tan(), -Complex::i());
        assert!(Complex::<f64>::nan().tan().is_nan());
    }

    #[test]
    fn test_asin_far_along_real_axis() {
        for exp in 6..=10 {
            let x = 10f64.powi(exp);
            let expected_im = x.acosh();

            let neg = Complex::real(-x).asin();
            assert!((neg.re + FRAC_PI_2).abs() < EPSILON, "asin(-{x}) = {neg}");
            assert!((neg.im.abs() - expected_im).abs() < 1e-6, "asin(-{x}) = {neg}");

            let pos = Complex::real(x).asin();
            assert!((pos.re - FRAC_PI_2).abs() < EPSILON, "asin({x}) = {pos}");
            assert!((pos.im.abs() - expected_im).abs() < 1e-6, "asin({x}) = {pos}");

            // acos stays in [0, π]
            let acos = Complex::real(-x).acos();
            assert!((acos.re - PI).abs() < EPSILON, "acos(-{x}) = {acos}");
        }
    }

    #[test]
    fn test_asin_far_along_imaginary_axis() {
        // asin(iy) = i·asinh(y)
        for y in [1e6, 1e8, -1e8, 1e10] {
            let result = Complex::imag(y).asin();
            assert!(result.re.abs() < EPSILON, "asin({y}i) = {result}");
            assert!((result.im - y.asinh()).abs() < 1e-6, "asin({y}i) = {result}");
        }
    }

    #[test]
    fn test_inverse_trig_round_trip() {
        for z in [Complex::new(0.3, 0.4), Complex::new(-0.5, 1.5), Complex::new(2.0, -0.25)] {
            assert_close(z.asin().sin(), z);
            assert_close(z.acos().cos(), z);
            assert_close(z.atan().tan(), z);
        }
    }
}
