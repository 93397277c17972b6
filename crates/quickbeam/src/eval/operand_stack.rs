//! Operand stack of the evaluator

use crate::error::EvalError;

/// A stack of 32-bit integers whose pops report underflow instead of
/// panicking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperandStack {
    values: Vec<i32>,
}

impl OperandStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a value.
    pub fn push(&mut self, value: i32) {
        self.values.push(value);
    }

    /// Pop one value.
    pub fn pop(&mut self) -> Result<i32, EvalError> {
        self.values.pop().ok_or(EvalError::StackUnderflow {
            needed: 1,
            available: 0,
        })
    }

    /// Pop two values, returned as `(left, right)`: `right` is the most
    /// recently pushed.
    pub fn pop_pair(&mut self) -> Result<(i32, i32), EvalError> {
        self.require(2)?;
        let right = self.pop()?;
        let left = self.pop()?;
        Ok((left, right))
    }

    /// The most recently pushed value.
    pub fn top(&self) -> Result<i32, EvalError> {
        self.values.last().copied().ok_or(EvalError::StackUnderflow {
            needed: 1,
            available: 0,
        })
    }

    /// Fail unless at least `needed` values are present.
    pub fn require(&self, needed: usize) -> Result<(), EvalError> {
        if self.values.len() < needed {
            return Err(EvalError::StackUnderflow {
                needed,
                available: self.values.len(),
            });
        }
        Ok(())
    }

    /// Drop every value.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the stack holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values from bottom to top.
    pub fn as_slice(&self) -> &[i32] {
        &self.values
    }
}
