//! Batch and chain helpers
//!
//! Thin wrappers that drive [`calculate`] repeatedly. A batch evaluates
//! independent items and keeps every outcome; a chain feeds each result into
//! the next step as its first operand and stops at the first failure.

use crate::dispatcher::calculate;
use crate::error::{CalcError, Result};
use crate::number::Number;
use crate::validation::{parse_operand, validate_operands};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One independent calculation; one operand for unary, two for binary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchItem {
    pub operation: String,
    pub operands: Vec<Number>,
}

impl BatchItem {
    pub fn unary(operation: impl Into<String>, a: Number) -> Self {
        Self {
            operation: operation.into(),
            operands: vec![a],
        }
    }

    pub fn binary(operation: impl Into<String>, a: Number, b: Number) -> Self {
        Self {
            operation: operation.into(),
            operands: vec![a, b],
        }
    }

    /// Split the operand list into `(a, b)` for [`calculate`]
    pub fn split_operands(&self) -> Result<(Number, Option<Number>)> {
        match self.operands.as_slice() {
            [a] => Ok((*a, None)),
            [a, b] => Ok((*a, Some(*b))),
            [] => Err(CalcError::missing_operand(&self.operation)),
            _ => Err(CalcError::unexpected_operand(&self.operation)),
        }
    }

    pub fn evaluate(&self) -> Result<Number> {
        let (a, b) = self.split_operands()?;
        calculate(&self.operation, a, b)
    }
}

/// Evaluate every item, collecting one outcome per item
pub fn calculate_batch(items: &[BatchItem]) -> Vec<Result<Number>> {
    items.iter().map(BatchItem::evaluate).collect()
}

/// Parse a JSON batch document
///
/// Accepts an array whose elements are either objects
/// `{"operation": "add", "operands": [1, 2]}` or tuples `["add", 1, 2]`.
pub fn parse_batch(json: &str) -> Result<Vec<BatchItem>> {
    let document: Value = serde_json::from_str(json)
        .map_err(|e| CalcError::type_mismatch(format!("Invalid batch document: {}", e)))?;
    let Value::Array(elements) = document else {
        return Err(CalcError::type_mismatch("Batch document must be a JSON array"));
    };
    elements.iter().map(batch_item_from_json).collect()
}

fn batch_item_from_json(value: &Value) -> Result<BatchItem> {
    let (operation, operands): (&str, &[Value]) = match value {
        Value::Array(parts) => match parts.split_first() {
            Some((Value::String(name), rest)) => (name.as_str(), rest),
            _ => {
                return Err(CalcError::type_mismatch(
                    "Batch tuple must start with an operation name",
                ))
            },
        },
        Value::Object(fields) => {
            let name = fields
                .get("operation")
                .and_then(Value::as_str)
                .ok_or_else(|| CalcError::type_mismatch("Batch item is missing 'operation'"))?;
            let operands = fields
                .get("operands")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default();
            (name, operands)
        },
        _ => {
            return Err(CalcError::type_mismatch(
                "Batch item must be an object or an array",
            ))
        },
    };

    let operands = match operands {
        [] => Vec::new(),
        [a] => vec![validate_operands(a, None)?.0],
        [a, b, ..] => {
            let (a, b) = validate_operands(a, Some(b))?;
            let mut all = vec![a];
            all.extend(b);
            // Extra operands are kept so evaluation reports the arity error
            for extra in &operands[2..] {
                all.push(validate_operands(extra, None)?.0);
            }
            all
        },
    };

    Ok(BatchItem {
        operation: operation.to_string(),
        operands,
    })
}

/// One step of a chain; the running value is the first operand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainStep {
    pub operation: String,
    pub operand: Option<Number>,
}

impl ChainStep {
    pub fn new(operation: impl Into<String>, operand: Option<Number>) -> Self {
        Self {
            operation: operation.into(),
            operand,
        }
    }

    /// Parse `op` or `op:operand`, e.g. `multiply:3` or `square_root`
    pub fn parse(text: &str) -> Result<Self> {
        match text.split_once(':') {
            Some((operation, operand)) => Ok(Self::new(operation, Some(parse_operand(operand)?))),
            None => Ok(Self::new(text, None)),
        }
    }
}

/// Pipe `initial` through `steps`, returning the final value
pub fn calculate_chain(initial: Number, steps: &[ChainStep]) -> Result<Number> {
    steps.iter().try_fold(initial, |value, step| {
        calculate(&step.operation, value, step.operand)
    })
}
