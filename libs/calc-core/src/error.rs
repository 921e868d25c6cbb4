//! Error types for calc-core

use thiserror::Error;

/// Calculation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// An operand violates a mathematical precondition
    #[error("{0}")]
    Domain(String),

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Operation '{0}' requires two operands")]
    MissingOperand(String),

    #[error("Operation '{0}' takes a single operand")]
    UnexpectedOperand(String),

    #[error("{0}")]
    TypeMismatch(String),

    #[error("Integer overflow in '{0}'")]
    Overflow(String),

    #[error("Configuration error: {0}")]
    InvalidConfig(String),
}

impl CalcError {
    pub fn domain(msg: impl Into<String>) -> Self {
        Self::Domain(msg.into())
    }

    pub fn unknown_operation(name: impl Into<String>) -> Self {
        Self::UnknownOperation(name.into())
    }

    pub fn missing_operand(operation: impl Into<String>) -> Self {
        Self::MissingOperand(operation.into())
    }

    pub fn unexpected_operand(operation: impl Into<String>) -> Self {
        Self::UnexpectedOperand(operation.into())
    }

    pub fn type_mismatch(msg: impl Into<String>) -> Self {
        Self::TypeMismatch(msg.into())
    }

    pub fn overflow(operation: impl Into<String>) -> Self {
        Self::Overflow(operation.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;

// Messages shared by the operation set and its callers
pub const ERROR_DIVIDE_BY_ZERO: &str = "Cannot divide by zero";
pub const ERROR_MODULO_ZERO: &str = "Cannot perform modulo with zero";
pub const ERROR_NEGATIVE_SQRT: &str = "Cannot calculate square root of negative number";
pub const ERROR_NEGATIVE_FACTORIAL: &str = "Cannot calculate factorial of negative number";
pub const ERROR_FACTORIAL_NON_INTEGER: &str = "Factorial requires an integer";
