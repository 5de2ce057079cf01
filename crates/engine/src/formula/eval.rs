//! Formula evaluation.
//!
//! `evaluate_formula` is the single entry point the edit-commit boundary
//! calls. Cell access goes through the [`CellResolver`] contract so the
//! evaluator has no knowledge of how the store is laid out.
//!
//! The expression evaluator is naive: it tries each operator
//! in a fixed order and splits on the first occurrence, so there is no
//! operator precedence and chained same-operator expressions associate to
//! the right (`10-2-3` is `10-(2-3)`). Tests assert that documented
//! behavior, not conventional arithmetic.

use super::functions::{Arg, Function};
use super::parser;
use crate::cell_ref::parse_cell_ref;

/// Sentinel stored when evaluation fails for any internal reason.
pub const ERROR: &str = "#ERROR!";
/// Sentinel produced by the `/` operator on a zero divisor.
pub const DIV_ZERO: &str = "#DIV/0!";

/// Bound on expression recursion. Deeper nesting aborts the evaluation and
/// surfaces as `#ERROR!` at the entry point instead of blowing the stack.
const MAX_DEPTH: usize = 128;

/// Cell access contract supplied by the store.
///
/// `set_cell_value` is part of the contract for forward compatibility; no
/// current built-in writes through it.
pub trait CellResolver {
    /// The stored value for a reference, empty string when absent.
    fn get_cell_value(&self, reference: &str) -> String;
    /// Replace the stored value for a reference.
    fn set_cell_value(&mut self, reference: &str, value: String);
}

/// Scalar primitive an expression evaluates to.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl Value {
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(s) => parse_number(s),
        }
    }

    pub fn to_text(&self) -> String {
        match self {
            Value::Number(n) => format_number(*n),
            Value::Text(s) => s.clone(),
        }
    }
}

/// Parse text as a decimal number; `None` for anything that is not wholly
/// numeric (unlike JS `parseFloat`, no prefix parsing).
pub(crate) fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok()
}

/// Render a number the way a formula result displays: integral values
/// without a fractional part, everything else in shortest form.
pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// Evaluate raw input text against a resolver.
///
/// Text not starting with `=` is a literal and comes back unchanged. For
/// formulas the result is the evaluated value's string form; any internal
/// failure is absorbed here and returned as [`ERROR`]. This function never
/// panics and never propagates an error to the caller.
pub fn evaluate_formula<R: CellResolver>(input: &str, resolver: &R) -> String {
    let Some(body) = input.strip_prefix('=') else {
        return input.to_string();
    };
    match evaluate_body(body, resolver) {
        Ok(value) => value.to_text(),
        Err(_) => ERROR.to_string(),
    }
}

fn evaluate_body<R: CellResolver>(body: &str, resolver: &R) -> Result<Value, String> {
    let normalized = parser::normalize_case(body);

    if let Some(call) = parser::parse_function_call(&normalized) {
        if let Some(function) = Function::from_name(&call.name) {
            let mut args = Vec::with_capacity(call.args.len());
            for raw in &call.args {
                args.push(classify_arg(raw, resolver)?);
            }
            return Ok(function.call(&args, resolver));
        }
        // Unknown name: the whole text falls through to the expression
        // evaluator, same as any non-call shape.
    }

    evaluate_expression(&normalized, resolver, 0)
}

/// Classify one raw argument exactly once.
///
/// References and ranges stay as strings for the built-in to resolve
/// itself; everything else runs through the expression evaluator and
/// carries its primitive result.
fn classify_arg<R: CellResolver>(raw: &str, resolver: &R) -> Result<Arg, String> {
    if parse_cell_ref(raw).is_some() {
        return Ok(Arg::Reference(raw.to_string()));
    }
    if raw.contains(':') {
        return Ok(Arg::Range(raw.to_string()));
    }
    match evaluate_expression(raw, resolver, 0)? {
        Value::Number(n) => Ok(Arg::Number(n)),
        Value::Text(s) => Ok(Arg::Text(s)),
    }
}

/// Recursive expression evaluator over trimmed text.
///
/// Trial order: cell reference, decimal number, quoted literal, then the
/// operators `+ - * /` split on their first occurrence. When nothing
/// matches, the text echoes back unchanged rather than failing.
pub fn evaluate_expression<R: CellResolver>(
    expr: &str,
    resolver: &R,
    depth: usize,
) -> Result<Value, String> {
    if depth > MAX_DEPTH {
        return Err(format!("expression nested deeper than {}", MAX_DEPTH));
    }
    let expr = expr.trim();

    if parse_cell_ref(expr).is_some() {
        return Ok(Value::Text(resolver.get_cell_value(expr)));
    }

    if let Ok(n) = expr.parse::<f64>() {
        return Ok(Value::Number(n));
    }

    if let Some(inner) = parser::unquote(expr) {
        return Ok(Value::Text(inner.to_string()));
    }

    for op in ['+', '-', '*', '/'] {
        let Some((lhs, rhs)) = expr.split_once(op) else {
            continue;
        };
        let (lhs, rhs) = (lhs.trim(), rhs.trim());
        if lhs.is_empty() || rhs.is_empty() {
            continue;
        }
        let left = evaluate_expression(lhs, resolver, depth + 1)?;
        let right = evaluate_expression(rhs, resolver, depth + 1)?;
        if let (Some(a), Some(b)) = (left.to_number(), right.to_number()) {
            return Ok(apply_op(op, a, b));
        }
    }

    Ok(Value::Text(expr.to_string()))
}

fn apply_op(op: char, a: f64, b: f64) -> Value {
    match op {
        '+' => Value::Number(a + b),
        '-' => Value::Number(a - b),
        '*' => Value::Number(a * b),
        _ => {
            if b == 0.0 {
                Value::Text(DIV_ZERO.to_string())
            } else {
                Value::Number(a / b)
            }
        }
    }
}
