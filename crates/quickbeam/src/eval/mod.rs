//! Stack-based evaluation of the arithmetic subset
//!
//! Only integer literals, binary operators, sequences and conditionals can
//! be evaluated. Every node pushes its value on an explicit operand stack;
//! operators pop their two operands and push the result. Any other node kind
//! aborts the evaluation with [`EvalError::Unsupported`].
//!
//! Sequences do not clean up after their leading expressions: `(1; 2; 3)`
//! leaves `1` and `2` on the stack below the `3` that becomes its value.

mod operand_stack;
mod operators;

pub use operand_stack::OperandStack;
pub use operators::apply;

use crate::ast::{
    Assign, BinaryOperator, Break, Expr, ForLoop, FunCall, FunDecl, Identifier, IfThenElse,
    IntegerLiteral, Let, Location, Program, Sequence, StringLiteral, VarDecl, WhileLoop,
};
use crate::context::Context;
use crate::error::EvalError;
use crate::stack::ensure_sufficient_stack;
use crate::visit::{Node, NodeKind, Visitor};

/// Computes integer values with an explicit operand stack.
///
/// ```
/// use quickbeam::ast::{Expr, Operator};
/// use quickbeam::{Context, Evaluator};
///
/// let tree = Expr::binary(
///     Expr::binary(Expr::int(3), Operator::Plus, Expr::int(4)),
///     Operator::Times,
///     Expr::int(2),
/// );
/// let ctx = Context::default();
///
/// assert_eq!(Evaluator::new(&ctx).evaluate(&tree), Ok(14));
/// ```
#[derive(Debug)]
pub struct Evaluator<'a> {
    ctx: &'a Context,
    stack: OperandStack,
    depth: usize,
}

impl<'a> Evaluator<'a> {
    /// Create an evaluator with an empty stack.
    pub fn new(ctx: &'a Context) -> Self {
        Self {
            ctx,
            stack: OperandStack::new(),
            depth: 0,
        }
    }

    /// Evaluate `node` and return the value on top of the stack.
    ///
    /// The stack is emptied first, so an evaluator can be reused after a
    /// failure.
    #[tracing::instrument(level = "debug", skip_all, fields(kind = %node.kind()))]
    pub fn evaluate<N: Node>(&mut self, node: &N) -> Result<i32, EvalError> {
        self.stack.clear();
        self.depth = 0;
        self.descend(node)?;
        let value = self.stack.top()?;
        tracing::debug!(value, stack_len = self.stack.len(), "evaluated");
        Ok(value)
    }

    /// The operand stack as left by the last evaluation.
    pub fn stack(&self) -> &OperandStack {
        &self.stack
    }

    fn descend<N: Node>(&mut self, node: &N) -> Result<(), EvalError> {
        if self.depth >= self.ctx.max_depth {
            return Err(EvalError::NestingTooDeep {
                max: self.ctx.max_depth,
            });
        }
        self.depth += 1;
        tracing::trace!(kind = %node.kind(), depth = self.depth, "eval");
        let result = ensure_sufficient_stack(|| node.accept(self));
        self.depth -= 1;
        result
    }

    fn push(&mut self, value: i32) {
        self.stack.push(value);
        if self.ctx.verbose {
            tracing::debug!(value, stack = ?self.stack.as_slice(), "push");
        }
    }

    fn unsupported(kind: NodeKind, loc: &Location) -> Result<(), EvalError> {
        tracing::debug!(%kind, %loc, "unsupported node");
        Err(EvalError::Unsupported {
            kind,
            loc: loc.clone(),
        })
    }
}

impl Visitor for Evaluator<'_> {
    type Output = Result<(), EvalError>;

    fn visit_integer_literal(&mut self, node: &IntegerLiteral) -> Self::Output {
        self.push(node.value);
        Ok(())
    }

    fn visit_binary_operator(&mut self, node: &BinaryOperator) -> Self::Output {
        self.descend(&node.left)?;
        self.descend(&node.right)?;
        let (left, right) = self.stack.pop_pair()?;
        let value = apply(node.op, left, right, &node.loc)?;
        if self.ctx.verbose {
            tracing::debug!(left, op = %node.op, right, value, "apply");
        }
        self.push(value);
        Ok(())
    }

    fn visit_sequence(&mut self, node: &Sequence) -> Self::Output {
        for expr in &node.exprs {
            self.descend(expr)?;
        }
        Ok(())
    }

    fn visit_if_then_else(&mut self, node: &IfThenElse) -> Self::Output {
        self.descend(&node.condition)?;
        let condition = self.stack.pop()?;
        if self.ctx.verbose {
            tracing::debug!(condition, "branch");
        }
        if condition != 0 {
            self.descend(&node.then_branch)
        } else {
            self.descend(&node.else_branch)
        }
    }

    // Everything below is outside the evaluable subset.

    fn visit_string_literal(&mut self, node: &StringLiteral) -> Self::Output {
        Self::unsupported(node.kind(), &node.loc)
    }

    fn visit_let(&mut self, node: &Let) -> Self::Output {
        Self::unsupported(node.kind(), &node.loc)
    }

    fn visit_identifier(&mut self, node: &Identifier) -> Self::Output {
        Self::unsupported(node.kind(), &node.loc)
    }

    fn visit_var_decl(&mut self, node: &VarDecl) -> Self::Output {
        Self::unsupported(node.kind(), &node.loc)
    }

    fn visit_fun_decl(&mut self, node: &FunDecl) -> Self::Output {
        Self::unsupported(node.kind(), &node.loc)
    }

    fn visit_fun_call(&mut self, node: &FunCall) -> Self::Output {
        Self::unsupported(node.kind(), &node.loc)
    }

    fn visit_while_loop(&mut self, node: &WhileLoop) -> Self::Output {
        Self::unsupported(node.kind(), &node.loc)
    }

    fn visit_for_loop(&mut self, node: &ForLoop) -> Self::Output {
        Self::unsupported(node.kind(), &node.loc)
    }

    fn visit_break(&mut self, node: &Break) -> Self::Output {
        Self::unsupported(node.kind(), &node.loc)
    }

    fn visit_assign(&mut self, node: &Assign) -> Self::Output {
        Self::unsupported(node.kind(), &node.loc)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Convenience Functions
// ═══════════════════════════════════════════════════════════════════════

/// Evaluate an expression with a fresh evaluator.
pub fn evaluate(expr: &Expr, ctx: &Context) -> Result<i32, EvalError> {
    Evaluator::new(ctx).evaluate(expr)
}

/// Evaluate a program's root expression with a fresh evaluator.
pub fn evaluate_program(program: &Program, ctx: &Context) -> Result<i32, EvalError> {
    evaluate(&program.root, ctx)
}
