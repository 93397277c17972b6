//! Error types for printing and evaluation

use thiserror::Error;

use crate::ast::{Location, Operator, Type};
use crate::visit::NodeKind;

/// Failures of the pretty-printer.
///
/// Each one means the tree broke an invariant the resolution passes are
/// supposed to establish. Printing stops and no text is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrintError {
    /// A type without a source form reached a position that needs one
    #[error("internal error: attempting to print the type of {ty}")]
    InternalType {
        /// The offending type (`void` or `undefined`)
        ty: Type,
    },

    /// A `for` loop variable has no initializer to print as the low bound
    #[error("internal error: loop variable `{name}` at {loc} has no low bound")]
    MissingLowBound {
        /// Loop variable name
        name: String,
        /// Loop location
        loc: Location,
    },

    /// The tree is nested deeper than the configured limit
    #[error("nesting exceeds the maximum depth of {max}")]
    NestingTooDeep {
        /// Configured limit
        max: usize,
    },
}

/// Failures of the evaluator.
///
/// The operand stack is left in an unspecified state after any of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// The node kind is outside the evaluable subset
    #[error("unsupported: {kind} at {loc}")]
    Unsupported {
        /// Offending kind
        kind: NodeKind,
        /// Offending node
        loc: Location,
    },

    /// An operation needed more operands than the stack holds
    #[error("stack error: needed {needed} operand(s), found {available}")]
    StackUnderflow {
        /// Operands required
        needed: usize,
        /// Operands present
        available: usize,
    },

    /// Integer division with a zero divisor
    #[error("division by zero at {loc}")]
    DivisionByZero {
        /// The division node
        loc: Location,
    },

    /// The result does not fit in a 32-bit signed integer
    #[error("integer overflow in `{op}` at {loc}")]
    IntegerOverflow {
        /// The operator
        op: Operator,
        /// The operation node
        loc: Location,
    },

    /// The tree is nested deeper than the configured limit
    #[error("nesting exceeds the maximum depth of {max}")]
    NestingTooDeep {
        /// Configured limit
        max: usize,
    },
}

/// Main error type for Quickbeam operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuickbeamError {
    /// Pretty-printing failed
    #[error("print: {0}")]
    Print(#[from] PrintError),

    /// Evaluation failed
    #[error("evaluate: {0}")]
    Eval(#[from] EvalError),
}

/// Result type alias for Quickbeam operations
pub type Result<T> = std::result::Result<T, QuickbeamError>;
