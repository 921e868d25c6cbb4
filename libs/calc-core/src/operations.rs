//! Operation set
//!
//! Pure arithmetic functions over [`Number`], each with its own domain
//! validation. Integer inputs produce integer results where the result is
//! exact (add, subtract, multiply, modulo, floor_divide, power with a
//! non-negative exponent); divide, percentage and square_root always produce
//! floats.

use crate::error::{
    CalcError, Result, ERROR_DIVIDE_BY_ZERO, ERROR_FACTORIAL_NON_INTEGER, ERROR_MODULO_ZERO,
    ERROR_NEGATIVE_FACTORIAL, ERROR_NEGATIVE_SQRT,
};
use crate::number::Number;

pub const ERROR_FRACTIONAL_POWER: &str = "Cannot raise negative number to a fractional power";

/// Apply `int_op` when both operands are integers, `float_op` otherwise.
/// A `None` from `int_op` is reported as overflow of `operation`.
fn promote(
    operation: &str,
    a: Number,
    b: Number,
    int_op: impl FnOnce(i64, i64) -> Option<i64>,
    float_op: impl FnOnce(f64, f64) -> f64,
) -> Result<Number> {
    match (a, b) {
        (Number::Int(x), Number::Int(y)) => int_op(x, y)
            .map(Number::Int)
            .ok_or_else(|| CalcError::overflow(operation)),
        _ => Ok(Number::Float(float_op(a.as_f64(), b.as_f64()))),
    }
}

/// Add two numbers
pub fn add(a: Number, b: Number) -> Result<Number> {
    promote("add", a, b, i64::checked_add, |x, y| x + y)
}

/// Subtract `b` from `a`
pub fn subtract(a: Number, b: Number) -> Result<Number> {
    promote("subtract", a, b, i64::checked_sub, |x, y| x - y)
}

/// Multiply two numbers
pub fn multiply(a: Number, b: Number) -> Result<Number> {
    promote("multiply", a, b, i64::checked_mul, |x, y| x * y)
}

/// True division; always yields a float
pub fn divide(a: Number, b: Number) -> Result<Number> {
    if b.is_zero() {
        return Err(CalcError::domain(ERROR_DIVIDE_BY_ZERO));
    }
    Ok(Number::Float(a.as_f64() / b.as_f64()))
}

/// Raise `a` to the power of `b`
///
/// Integer base with a non-negative integer exponent stays integer; a
/// negative exponent or any float operand yields a float.
pub fn power(a: Number, b: Number) -> Result<Number> {
    if a.is_zero() && b.is_negative() {
        return Err(CalcError::domain(ERROR_DIVIDE_BY_ZERO));
    }
    match (a, b) {
        (Number::Int(base), Number::Int(exp)) if exp >= 0 => {
            // -1, 0 and 1 only depend on the exponent's parity
            let exp = if (-1..=1).contains(&base) && exp > 2 { 2 - exp % 2 } else { exp };
            u32::try_from(exp)
                .ok()
                .and_then(|exp| base.checked_pow(exp))
                .map(Number::Int)
                .ok_or_else(|| CalcError::overflow("power"))
        },
        (Number::Int(base), Number::Int(exp)) => match i32::try_from(exp) {
            Ok(exp) => Ok(Number::Float((base as f64).powi(exp))),
            Err(_) => Ok(Number::Float((base as f64).powf(exp as f64))),
        },
        _ => {
            let (base, exp) = (a.as_f64(), b.as_f64());
            if base < 0.0 && exp.fract() != 0.0 {
                return Err(CalcError::domain(ERROR_FRACTIONAL_POWER));
            }
            Ok(Number::Float(base.powf(exp)))
        },
    }
}

/// Remainder of `a / b`, carrying the sign of the divisor
pub fn modulo(a: Number, b: Number) -> Result<Number> {
    if b.is_zero() {
        return Err(CalcError::domain(ERROR_MODULO_ZERO));
    }
    promote(
        "modulo",
        a,
        b,
        |x, y| {
            let r = x.checked_rem(y)?;
            Some(if r != 0 && (r < 0) != (y < 0) { r + y } else { r })
        },
        |x, y| {
            let r = x % y;
            if r != 0.0 && (r < 0.0) != (y < 0.0) {
                r + y
            } else {
                r
            }
        },
    )
}

/// Division rounded towards negative infinity
pub fn floor_divide(a: Number, b: Number) -> Result<Number> {
    if b.is_zero() {
        return Err(CalcError::domain(ERROR_DIVIDE_BY_ZERO));
    }
    promote(
        "floor_divide",
        a,
        b,
        |x, y| {
            let q = x.checked_div(y)?;
            let r = x.checked_rem(y)?;
            Some(if r != 0 && (r < 0) != (y < 0) { q - 1 } else { q })
        },
        float_floor_div,
    )
}

/// Floored quotient derived from the remainder so that
/// `x == y * floor_div(x, y) + modulo(x, y)` holds in floating point
fn float_floor_div(x: f64, y: f64) -> f64 {
    let m = x % y;
    let mut div = (x - m) / y;
    if m != 0.0 && (m < 0.0) != (y < 0.0) {
        div -= 1.0;
    }
    if div == 0.0 {
        return 0.0_f64.copysign(x / y);
    }
    let floored = div.floor();
    if div - floored > 0.5 {
        floored + 1.0
    } else {
        floored
    }
}

/// `percent` percent of `value`: `value * percent / 100`
pub fn percentage(value: Number, percent: Number) -> Result<Number> {
    Ok(Number::Float(value.as_f64() * percent.as_f64() / 100.0))
}

/// Square root; always yields a float
pub fn square_root(a: Number) -> Result<Number> {
    if a.is_negative() {
        return Err(CalcError::domain(ERROR_NEGATIVE_SQRT));
    }
    Ok(Number::Float(a.as_f64().sqrt()))
}

/// Absolute value
pub fn absolute(a: Number) -> Result<Number> {
    match a {
        Number::Int(v) => v
            .checked_abs()
            .map(Number::Int)
            .ok_or_else(|| CalcError::overflow("absolute")),
        Number::Float(v) => Ok(Number::Float(v.abs())),
    }
}

/// Iterative factorial of a non-negative integer
pub fn factorial(a: Number) -> Result<Number> {
    let n = a
        .as_int()
        .ok_or_else(|| CalcError::type_mismatch(ERROR_FACTORIAL_NON_INTEGER))?;
    if n < 0 {
        return Err(CalcError::domain(ERROR_NEGATIVE_FACTORIAL));
    }
    (2..=n)
        .try_fold(1i64, |acc, k| acc.checked_mul(k))
        .map(Number::Int)
        .ok_or_else(|| CalcError::overflow("factorial"))
}
