//! Operator application

use crate::ast::{Location, Operator};
use crate::error::EvalError;

/// Apply `op` to two operands.
///
/// Division truncates toward zero. Comparisons yield 1 or 0. A zero divisor
/// and results outside the `i32` range are reported rather than wrapped.
pub fn apply(op: Operator, left: i32, right: i32, loc: &Location) -> Result<i32, EvalError> {
    let overflow = || EvalError::IntegerOverflow {
        op,
        loc: loc.clone(),
    };

    match op {
        // Arithmetic
        Operator::Plus => left.checked_add(right).ok_or_else(overflow),
        Operator::Minus => left.checked_sub(right).ok_or_else(overflow),
        Operator::Times => left.checked_mul(right).ok_or_else(overflow),
        Operator::Divide => {
            if right == 0 {
                return Err(EvalError::DivisionByZero { loc: loc.clone() });
            }
            left.checked_div(right).ok_or_else(overflow)
        }

        // Comparison
        Operator::Eq => Ok(i32::from(left == right)),
        Operator::Neq => Ok(i32::from(left != right)),
        Operator::Lt => Ok(i32::from(left < right)),
        Operator::Le => Ok(i32::from(left <= right)),
        Operator::Gt => Ok(i32::from(left > right)),
        Operator::Ge => Ok(i32::from(left >= right)),
    }
}
