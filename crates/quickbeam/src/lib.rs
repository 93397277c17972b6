//! # Quickbeam
//!
//! Two traversals over a resolved Tiger abstract syntax tree.
//!
//! - [`PrettyPrinter`] turns a tree back into concrete syntax, optionally
//!   annotated with what name resolution found (declaration sites, depth
//!   differences, escaping variables).
//! - [`Evaluator`] computes the integer value of trees built from integer
//!   literals, binary operators, sequences and conditionals, using an
//!   explicit operand stack.
//!
//! ## Architecture
//!
//! - **Node model** ([`ast`]): the closed set of node kinds, produced and
//!   owned by the parser and resolution passes.
//! - **Dispatch** ([`visit`]): a [`Visitor`] trait with one required method
//!   per node kind; both traversals implement it.
//! - **Traversals** ([`print`], [`eval`]): independent visitors configured
//!   by a shared [`Context`].
//!
//! Failures never abort the process: both traversals return typed errors
//! ([`PrintError`], [`EvalError`]) and no partial output.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
pub mod context;
pub mod error;
pub mod eval;
pub mod print;
pub mod stack;
pub mod visit;

// Re-export main types
pub use ast::{Decl, Expr, Program, SymbolTable};
pub use context::Context;
pub use error::{EvalError, PrintError, QuickbeamError, Result};
pub use eval::{evaluate, evaluate_program, Evaluator, OperandStack};
pub use print::{print_expr, print_node, print_program, Emitter, PrettyPrinter, StringEmitter};
pub use visit::{Node, NodeKind, Visitor};

/// Quickbeam version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }
}
