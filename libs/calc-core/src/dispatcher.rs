//! Operation dispatch
//!
//! Resolves an operation name to one variant of the closed [`Operation`]
//! set, checks operand arity and invokes the matching function from
//! [`crate::operations`]. Domain checks live in the operations themselves.

use crate::error::{CalcError, Result};
use crate::number::Number;
use crate::operations;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of operands an operation takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arity {
    Unary,
    Binary,
}

impl Arity {
    pub fn operand_count(self) -> usize {
        match self {
            Arity::Unary => 1,
            Arity::Binary => 2,
        }
    }
}

/// Every supported operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Modulo,
    Percentage,
    FloorDivide,
    SquareRoot,
    Absolute,
    Factorial,
}

impl Operation {
    pub const UNARY: [Operation; 3] = [
        Operation::SquareRoot,
        Operation::Absolute,
        Operation::Factorial,
    ];

    pub const BINARY: [Operation; 8] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
        Operation::Power,
        Operation::Modulo,
        Operation::Percentage,
        Operation::FloorDivide,
    ];

    pub const ALL: [Operation; 11] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
        Operation::Power,
        Operation::Modulo,
        Operation::Percentage,
        Operation::FloorDivide,
        Operation::SquareRoot,
        Operation::Absolute,
        Operation::Factorial,
    ];

    /// Canonical name used for lookup and in history entries
    pub fn name(self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
            Operation::Power => "power",
            Operation::Modulo => "modulo",
            Operation::Percentage => "percentage",
            Operation::FloorDivide => "floor_divide",
            Operation::SquareRoot => "square_root",
            Operation::Absolute => "absolute",
            Operation::Factorial => "factorial",
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            Operation::SquareRoot | Operation::Absolute | Operation::Factorial => Arity::Unary,
            Operation::Add
            | Operation::Subtract
            | Operation::Multiply
            | Operation::Divide
            | Operation::Power
            | Operation::Modulo
            | Operation::Percentage
            | Operation::FloorDivide => Arity::Binary,
        }
    }

    /// Look up an operation by its exact name
    pub fn from_name(name: &str) -> Option<Operation> {
        Self::ALL.into_iter().find(|op| op.name() == name)
    }

    /// Invoke the operation after checking arity
    ///
    /// Unary operations reject a second operand; binary operations require one.
    pub fn apply(self, a: Number, b: Option<Number>) -> Result<Number> {
        use Operation::*;

        match (self, b) {
            (SquareRoot, None) => operations::square_root(a),
            (Absolute, None) => operations::absolute(a),
            (Factorial, None) => operations::factorial(a),
            (SquareRoot | Absolute | Factorial, Some(_)) => {
                Err(CalcError::unexpected_operand(self.name()))
            },
            (Add, Some(b)) => operations::add(a, b),
            (Subtract, Some(b)) => operations::subtract(a, b),
            (Multiply, Some(b)) => operations::multiply(a, b),
            (Divide, Some(b)) => operations::divide(a, b),
            (Power, Some(b)) => operations::power(a, b),
            (Modulo, Some(b)) => operations::modulo(a, b),
            (Percentage, Some(b)) => operations::percentage(a, b),
            (FloorDivide, Some(b)) => operations::floor_divide(a, b),
            (
                Add | Subtract | Multiply | Divide | Power | Modulo | Percentage | FloorDivide,
                None,
            ) => Err(CalcError::missing_operand(self.name())),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        Operation::from_name(s).ok_or_else(|| CalcError::unknown_operation(s))
    }
}

/// Perform a calculation named by `operation`
///
/// `b` must be present for binary operations and absent for unary ones.
///
/// # Errors
/// - [`CalcError::UnknownOperation`] if the name is not supported
/// - [`CalcError::MissingOperand`] / [`CalcError::UnexpectedOperand`] on arity mismatch
/// - whatever domain error the operation itself raises
pub fn calculate(operation: &str, a: Number, b: Option<Number>) -> Result<Number> {
    let op: Operation = operation.parse()?;
    op.apply(a, b)
}
