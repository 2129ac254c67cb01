//! Numeric operator implementations for the evaluator.
//!
//! Operands are boxed into [`Number`] first (strings that spell a number
//! convert); dispatch is then a plain match over the operator enum.

use keel_ir::ArithmeticOp;
use keel_value::{operator_not_applicable, runtime_arithmetic, type_coercion, EvalResult, Value};

/// A boxed numeric operand.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    fn into_value(self) -> Value {
        match self {
            Number::Int(n) => Value::Integer(n),
            Number::Float(x) => Value::Float(x),
        }
    }
}

/// Box a value as a number, if it is one or a string spelling one.
pub fn to_number(value: &Value) -> Option<Number> {
    match value {
        Value::Integer(n) => Some(Number::Int(*n)),
        Value::Float(x) => Some(Number::Float(*x)),
        Value::Str(s) => parse_number(s),
        _ => None,
    }
}

/// Parse a numeric string: decimal, `0x` hex, leading-zero octal, or float.
pub fn parse_number(text: &str) -> Option<Number> {
    let (sign, body) = match text.as_bytes().first()? {
        b'-' => ("-", &text[1..]),
        b'+' => ("", &text[1..]),
        _ => ("", text),
    };
    if body.is_empty() {
        return None;
    }
    if let Some(hex) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        return i64::from_str_radix(&format!("{sign}{hex}"), 16)
            .ok()
            .map(Number::Int);
    }
    if body.bytes().all(|b| b.is_ascii_digit()) {
        let radix = if body.len() > 1 && body.starts_with('0') {
            8
        } else {
            10
        };
        return i64::from_str_radix(&format!("{sign}{body}"), radix)
            .ok()
            .map(Number::Int);
    }
    let float_shaped = body.bytes().any(|b| b.is_ascii_digit())
        && body
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !float_shaped {
        return None;
    }
    format!("{sign}{body}")
        .parse::<f64>()
        .ok()
        .filter(|x| x.is_finite())
        .map(Number::Float)
}

#[inline]
fn overflow(op: ArithmeticOp, operand: i64) -> keel_value::EvalError {
    runtime_arithmetic(op.as_symbol(), Value::Integer(operand), "integer overflow")
}

#[inline]
fn zero_divisor(op: ArithmeticOp, divisor: Value) -> keel_value::EvalError {
    let what = if op == ArithmeticOp::Mod {
        "modulo by zero"
    } else {
        "division by zero"
    };
    runtime_arithmetic(op.as_symbol(), divisor, what)
}

/// Checked arithmetic where the only failure is overflow of `left`.
#[inline]
fn checked_arith(result: Option<i64>, op: ArithmeticOp, left: i64) -> EvalResult {
    result.map(Value::Integer).ok_or_else(|| overflow(op, left))
}

/// Checked division or modulo with a zero guard.
#[inline]
fn checked_div<F>(f: F, op: ArithmeticOp, left: i64, divisor: i64) -> EvalResult
where
    F: FnOnce() -> Option<i64>,
{
    if divisor == 0 {
        Err(zero_divisor(op, Value::Integer(divisor)))
    } else {
        f().map(Value::Integer).ok_or_else(|| overflow(op, left))
    }
}

/// Integer division rounding toward negative infinity.
fn floor_div(a: i64, b: i64) -> Option<i64> {
    let q = a.checked_div(b)?;
    let r = a.checked_rem(b)?;
    if r != 0 && ((r < 0) != (b < 0)) {
        q.checked_sub(1)
    } else {
        Some(q)
    }
}

/// Remainder with the sign of the divisor.
fn floor_mod(a: i64, b: i64) -> Option<i64> {
    let r = a.checked_rem(b)?;
    if r != 0 && ((r < 0) != (b < 0)) {
        Some(r + b)
    } else {
        Some(r)
    }
}

fn shift_left(a: i64, n: u64) -> Option<i64> {
    if a == 0 {
        return Some(0);
    }
    let n = u32::try_from(n).ok().filter(|&n| n < 64)?;
    let shifted = a << n;
    (shifted >> n == a).then_some(shifted)
}

fn shift_right(a: i64, n: u64) -> i64 {
    match u32::try_from(n).ok().filter(|&n| n < 64) {
        Some(n) => a >> n,
        None if a < 0 => -1,
        None => 0,
    }
}

/// A negative shift amount shifts the other way.
fn shift(a: i64, b: i64, left: bool) -> Option<i64> {
    let amount = b.unsigned_abs();
    if (b >= 0) == left {
        shift_left(a, amount)
    } else {
        Some(shift_right(a, amount))
    }
}

fn eval_int(a: i64, b: i64, op: ArithmeticOp) -> EvalResult {
    match op {
        ArithmeticOp::Add => checked_arith(a.checked_add(b), op, a),
        ArithmeticOp::Sub => checked_arith(a.checked_sub(b), op, a),
        ArithmeticOp::Mul => checked_arith(a.checked_mul(b), op, a),
        ArithmeticOp::Div => checked_div(|| floor_div(a, b), op, a, b),
        ArithmeticOp::Mod => checked_div(|| floor_mod(a, b), op, a, b),
        ArithmeticOp::Shl => checked_arith(shift(a, b, true), op, a),
        ArithmeticOp::Shr => checked_arith(shift(a, b, false), op, a),
    }
}

fn eval_float(a: f64, b: f64, op: ArithmeticOp) -> EvalResult {
    let result = match op {
        ArithmeticOp::Add => a + b,
        ArithmeticOp::Sub => a - b,
        ArithmeticOp::Mul => a * b,
        ArithmeticOp::Div => {
            if b == 0.0 {
                return Err(zero_divisor(op, Value::Float(b)));
            }
            a / b
        }
        // Integer-only operators are rejected before dispatch.
        ArithmeticOp::Mod | ArithmeticOp::Shl | ArithmeticOp::Shr => {
            return Err(operator_not_applicable(op.as_symbol(), Value::Float(a)))
        }
    };
    Ok(Value::Float(result))
}

#[expect(
    clippy::cast_precision_loss,
    reason = "mixed integer/float arithmetic widens to float"
)]
#[inline]
fn int_to_float(n: i64) -> f64 {
    n as f64
}

fn box_operand(op: ArithmeticOp, value: &Value) -> Result<Number, keel_value::EvalError> {
    to_number(value).ok_or_else(|| {
        runtime_arithmetic(
            op.as_symbol(),
            value.clone(),
            format!("the value '{value}' cannot be converted to Numeric"),
        )
    })
}

/// Apply a numeric arithmetic operator.
///
/// Collection operands are the caller's business; here both sides must box
/// into numbers.
pub fn evaluate_arithmetic(op: ArithmeticOp, left: &Value, right: &Value) -> EvalResult {
    let a = box_operand(op, left)?;
    let b = box_operand(op, right)?;
    let integer_only = matches!(
        op,
        ArithmeticOp::Mod | ArithmeticOp::Shl | ArithmeticOp::Shr
    );
    match (a, b) {
        (Number::Int(x), Number::Int(y)) => eval_int(x, y, op),
        (Number::Float(_), _) if integer_only => {
            Err(operator_not_applicable(op.as_symbol(), a.into_value()))
        }
        (_, Number::Float(_)) if integer_only => {
            Err(operator_not_applicable(op.as_symbol(), b.into_value()))
        }
        (Number::Float(x), Number::Float(y)) => eval_float(x, y, op),
        (Number::Int(x), Number::Float(y)) => eval_float(int_to_float(x), y, op),
        (Number::Float(x), Number::Int(y)) => eval_float(x, int_to_float(y), op),
    }
}

/// Unary minus.
pub fn negate(value: &Value) -> EvalResult {
    match to_number(value) {
        Some(Number::Int(n)) => n
            .checked_neg()
            .map(Value::Integer)
            .ok_or_else(|| runtime_arithmetic("-", value.clone(), "integer overflow")),
        Some(Number::Float(x)) => Ok(Value::Float(-x)),
        None => Err(type_coercion(value.clone(), "Numeric")),
    }
}

#[cfg(test)]
#[expect(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
