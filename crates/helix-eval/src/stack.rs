//! Evaluation stack.

use rhizome_helix_complex::Complex;

/// Not enough values on the stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Underflow;

/// The value stack for one evaluation call.
#[derive(Clone, Debug, Default)]
pub struct Stack {
    items: Vec<Complex<f64>>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, value: Complex<f64>) {
        self.items.push(value);
    }

    pub fn pop(&mut self) -> Result<Complex<f64>, Underflow> {
        self.items.pop().ok_or(Underflow)
    }

    /// Pops the top two values as `(below, top)`, so `a b -` gives `(a, b)`.
    ///
    /// Leaves the stack untouched on underflow.
    pub fn pop_pair(&mut self) -> Result<(Complex<f64>, Complex<f64>), Underflow> {
        if self.items.len() < 2 {
            return Err(Underflow);
        }
        let top = self.pop()?;
        let below = self.pop()?;
        Ok((below, top))
    }

    /// Remaining values, bottom to top.
    pub fn into_vec(self) -> Vec<Complex<f64>> {
        self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop() {
        let mut stack = Stack::new();
        stack.push(Complex::real(1.0));
        stack.push(Complex::real(2.0));
        assert_eq!(stack.pop(), Ok(Complex::real(2.0)));
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_pop_empty() {
        assert_eq!(Stack::new().pop(), Err(Underflow));
    }

    #[test]
    fn test_pop_pair_order() {
        let mut stack = Stack::new();
        stack.push(Complex::real(10.0));
        stack.push(Complex::real(3.0));
        assert_eq!(stack.pop_pair(), Ok((Complex::real(10.0), Complex::real(3.0))));
        assert!(stack.is_empty());
    }

    #[test]
    fn test_pop_pair_underflow_keeps_stack() {
        let mut stack = Stack::new();
        stack.push(Complex::real(1.0));
        assert_eq!(stack.pop_pair(), Err(Underflow));
        assert_eq!(stack.into_vec(), vec![Complex::real(1.0)]);
    }
}
