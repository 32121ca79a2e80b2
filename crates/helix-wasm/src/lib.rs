//! WebAssembly bindings for helix.
//!
//! Tokenizes and evaluates function text for the browser editor.

use rhizome_helix_complex::Complex;
use rhizome_helix_core::{Instruction, Program};
use rhizome_helix_eval::{Curves, Domain, Variable, VariableRegistry, curves};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Tokenize result for JavaScript.
#[derive(Debug, Serialize)]
pub struct JsTokenizeResult {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    tokens: Option<Vec<Instruction>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Evaluation result for JavaScript.
#[derive(Debug, Serialize)]
pub struct JsEvaluateResult {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    curves: Option<Curves>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Parse function text and return its tokens, each tagged with its line.
#[wasm_bindgen]
pub fn tokenize(text: &str) -> JsValue {
    serde_wasm_bindgen::to_value(&tokenize_text(text)).unwrap_or(JsValue::NULL)
}

/// Evaluate function text over `[min, max)` and return one curve per output.
///
/// `variables` is an array of `{name, value: {re, im}, kind?}`. When it is
/// `undefined` or `null` the default registry (`pi`, `e`) is used.
#[wasm_bindgen]
pub fn evaluate(text: &str, variables: JsValue, min: f64, max: f64, step: f64) -> JsValue {
    let result = match registry_from_js(variables) {
        Ok(registry) => evaluate_text(text, &registry, min, max, step),
        Err(error) => JsEvaluateResult {
            ok: false,
            curves: None,
            error: Some(error),
        },
    };
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

/// Format a complex number for display.
#[wasm_bindgen]
pub fn format_complex(re: f64, im: f64, precision: usize) -> String {
    Complex::new(re, im).print(precision)
}

fn registry_from_js(variables: JsValue) -> Result<VariableRegistry, String> {
    if variables.is_undefined() || variables.is_null() {
        return Ok(VariableRegistry::new());
    }
    let vars: Vec<Variable> = serde_wasm_bindgen::from_value(variables)
        .map_err(|e| format!("invalid variables: {e}"))?;
    Ok(vars.into_iter().collect())
}

fn tokenize_text(text: &str) -> JsTokenizeResult {
    match Program::parse(text) {
        Ok(program) => JsTokenizeResult {
            ok: true,
            tokens: Some(program.instructions().to_vec()),
            error: None,
        },
        Err(e) => JsTokenizeResult {
            ok: false,
            tokens: None,
            error: Some(e.to_string()),
        },
    }
}

fn evaluate_text(
    text: &str,
    registry: &VariableRegistry,
    min: f64,
    max: f64,
    step: f64,
) -> JsEvaluateResult {
    let result = Domain::new(min, max, step)
        .map_err(rhizome_helix_eval::Error::from)
        .and_then(|domain| curves(text, registry, &domain));

    match result {
        Ok(curves) => JsEvaluateResult {
            ok: true,
            curves: Some(curves),
            error: None,
        },
        Err(e) => JsEvaluateResult {
            ok: false,
            curves: None,
            error: Some(e.to_string()),
        },
    }
}
