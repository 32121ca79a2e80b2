//! Named variables available to every sample evaluation.
//!
//! Lookup is first-match: a later variable with the same name as an earlier
//! one is shadowed until the earlier one is removed.

use rhizome_helix_complex::Complex;
use serde::{Deserialize, Serialize};

/// How a variable's value is set by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VariableKind {
    /// Typed in directly.
    #[default]
    Constant,
    /// Driven by a slider between `min` and `max`.
    Range { min: f64, max: f64 },
}

/// A named value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub value: Complex<f64>,
    #[serde(default)]
    pub kind: VariableKind,
}

impl Variable {
    pub fn constant(name: impl Into<String>, value: Complex<f64>) -> Self {
        Self {
            name: name.into(),
            value,
            kind: VariableKind::Constant,
        }
    }

    pub fn range(name: impl Into<String>, min: f64, max: f64, value: f64) -> Self {
        Self {
            name: name.into(),
            value: Complex::real(value),
            kind: VariableKind::Range { min, max },
        }
    }

    /// Value at a slider position, `fraction` clamped to `[0, 1]`.
    ///
    /// `None` for constants.
    pub fn slider_value(&self, fraction: f64) -> Option<Complex<f64>> {
        match self.kind {
            VariableKind::Constant => None,
            VariableKind::Range { min, max } => {
                let t = fraction.clamp(0.0, 1.0);
                Some(Complex::real(min + t * (max - min)))
            }
        }
    }
}

/// Ordered collection of variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableRegistry {
    vars: Vec<Variable>,
}

impl Default for VariableRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl VariableRegistry {
    /// Registry holding the defaults `pi` and `e`.
    pub fn new() -> Self {
        Self {
            vars: vec![
                Variable::constant("pi", Complex::real(std::f64::consts::PI)),
                Variable::constant("e", Complex::real(std::f64::consts::E)),
            ],
        }
    }

    /// Registry with no variables at all.
    pub fn empty() -> Self {
        Self { vars: Vec::new() }
    }

    /// Appends a variable. An existing variable of the same name keeps
    /// precedence.
    pub fn define(&mut self, var: Variable) {
        self.vars.push(var);
    }

    pub fn define_constant(&mut self, name: impl Into<String>, value: Complex<f64>) {
        self.define(Variable::constant(name, value));
    }

    pub fn define_range(&mut self, name: impl Into<String>, min: f64, max: f64, value: f64) {
        self.define(Variable::range(name, min, max, value));
    }

    /// Current value of the first variable called `name`.
    pub fn resolve(&self, name: &str) -> Option<Complex<f64>> {
        self.get(name).map(|v| v.value)
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.vars.iter().find(|v| v.name == name)
    }

    /// Sets the first variable called `name`. Returns `false` if none exists.
    pub fn set_value(&mut self, name: &str, value: Complex<f64>) -> bool {
        match self.vars.iter_mut().find(|v| v.name == name) {
            Some(var) => {
                var.value = value;
                true
            }
            None => false,
        }
    }

    /// Moves a range variable's slider. Returns `false` if there is no such
    /// variable or it is a constant.
    pub fn set_slider(&mut self, name: &str, fraction: f64) -> bool {
        let Some(var) = self.vars.iter_mut().find(|v| v.name == name) else {
            return false;
        };
        match var.slider_value(fraction) {
            Some(value) => {
                var.value = value;
                true
            }
            None => false,
        }
    }

    /// Removes the first variable called `name`.
    pub fn remove(&mut self, name: &str) -> Option<Variable> {
        let index = self.vars.iter().position(|v| v.name == name)?;
        Some(self.vars.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.vars.iter()
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl FromIterator<Variable> for VariableRegistry {
    fn from_iter<I: IntoIterator<Item = Variable>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().collect(),
        }
    }
}

impl Extend<Variable> for VariableRegistry {
    fn extend<I: IntoIterator<Item = Variable>>(&mut self, iter: I) {
        self.vars.extend(iter);
    }
}
