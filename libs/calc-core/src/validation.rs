//! Operand validation
//!
//! The core only ever sees [`Number`]s. These helpers turn untyped input
//! (command-line text, JSON values) into operands, failing with
//! [`CalcError::TypeMismatch`] for anything non-numeric.

use crate::error::{CalcError, Result};
use crate::number::Number;
use serde_json::Value;

/// Which operand is being validated, for error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandPosition {
    First,
    Second,
}

impl OperandPosition {
    fn not_a_number(self) -> CalcError {
        match self {
            OperandPosition::First => CalcError::type_mismatch("First operand must be a number"),
            OperandPosition::Second => CalcError::type_mismatch("Second operand must be a number"),
        }
    }
}

/// Parse text as an operand: integer literal first, then finite float
pub fn parse_operand(text: &str) -> Result<Number> {
    let text = text.trim();
    if let Ok(v) = text.parse::<i64>() {
        return Ok(Number::Int(v));
    }
    match text.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Number::Float(v)),
        _ => Err(CalcError::type_mismatch(format!(
            "'{}' is not a number",
            text
        ))),
    }
}

/// Convert a JSON value into an operand
pub fn number_from_json(value: &Value, position: OperandPosition) -> Result<Number> {
    match value {
        Value::Number(n) => {
            if let Some(v) = n.as_i64() {
                Ok(Number::Int(v))
            } else {
                n.as_f64()
                    .map(Number::Float)
                    .ok_or_else(|| position.not_a_number())
            }
        },
        _ => Err(position.not_a_number()),
    }
}

/// Validate a first operand and an optional second operand
pub fn validate_operands(a: &Value, b: Option<&Value>) -> Result<(Number, Option<Number>)> {
    let a = number_from_json(a, OperandPosition::First)?;
    let b = b
        .map(|b| number_from_json(b, OperandPosition::Second))
        .transpose()?;
    Ok((a, b))
}
