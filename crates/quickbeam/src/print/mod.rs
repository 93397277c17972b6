//! Pretty-printer
//!
//! Renders a resolved tree back into concrete syntax. Binary operations are
//! always parenthesized, so the output re-parses to the same tree whatever
//! the operator precedence.
//!
//! Indentation is a single level counter with two kinds of nesting:
//!
//! - blocks (sequences, `let` sections, loop bodies) put every item on its
//!   own line one level deeper, and end with a line break back at the outer
//!   level;
//! - inline nesting (`if` arms, function bodies) raises the level without
//!   breaking the line, so only blocks nested inside start deeper.
//!
//! In verbose mode, uses are annotated with `/*decl:LOC*/` comments
//! (plus `depth_diff:N` when a variable is used from a deeper function),
//! breaks with `/*loop:LOC*/`, escaping variables with `/*e*/`, and
//! renamed functions with their external name.

mod emitter;
mod escape;

pub use emitter::{Emitter, StringEmitter};
pub use escape::escape;

use crate::ast::{
    Assign, BinaryOperator, Break, Expr, ForLoop, FunCall, FunDecl, Identifier, IfThenElse,
    IntegerLiteral, Let, Program, Sequence, StringLiteral, SymbolTable, VarDecl, WhileLoop,
};
use crate::context::Context;
use crate::error::PrintError;
use crate::stack::ensure_sufficient_stack;
use crate::visit::{Node, Visitor};

/// Renders nodes into an [`Emitter`].
///
/// ```
/// use quickbeam::ast::{Expr, Operator, SymbolTable};
/// use quickbeam::{Context, PrettyPrinter};
///
/// let tree = Expr::binary(Expr::int(1), Operator::Plus, Expr::int(2));
/// let symbols = SymbolTable::new();
/// let ctx = Context::default();
///
/// let text = PrettyPrinter::new(&symbols, &ctx).print(&tree).unwrap().output();
/// assert_eq!(text, "(1+2)");
/// ```
pub struct PrettyPrinter<'a, E: Emitter = StringEmitter> {
    symbols: &'a SymbolTable,
    ctx: &'a Context,
    out: E,
    level: usize,
    depth: usize,
}

impl<'a> PrettyPrinter<'a, StringEmitter> {
    /// Create a printer writing into a fresh [`StringEmitter`].
    pub fn new(symbols: &'a SymbolTable, ctx: &'a Context) -> Self {
        Self::with_emitter(symbols, ctx, StringEmitter::new())
    }
}

impl<'a, E: Emitter> PrettyPrinter<'a, E> {
    /// Create a printer writing into `out`.
    pub fn with_emitter(symbols: &'a SymbolTable, ctx: &'a Context, out: E) -> Self {
        Self {
            symbols,
            ctx,
            out,
            level: 0,
            depth: 0,
        }
    }

    /// Render `node`, handing back the emitter on success.
    ///
    /// The printer is consumed either way, so text from a failed rendering
    /// can never be observed.
    #[tracing::instrument(level = "debug", skip_all, fields(kind = %node.kind()))]
    pub fn print<N: Node>(mut self, node: &N) -> Result<E, PrintError> {
        self.descend(node)?;
        Ok(self.out)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Indentation
    // ═══════════════════════════════════════════════════════════════════

    fn newline(&mut self) {
        self.out.emit_newline();
        self.out.emit_indent(self.level * self.ctx.indent_width);
    }

    fn indent(&mut self) {
        self.level += 1;
    }

    fn dedent(&mut self) {
        self.level = self.level.saturating_sub(1);
    }

    /// Print `items` one per line, one level deeper, with `separator` after
    /// every item but the last.
    fn block<N: Node>(&mut self, items: &[N], separator: &str) -> Result<(), PrintError> {
        self.indent();
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.out.emit(separator);
            }
            self.newline();
            self.descend(item)?;
        }
        self.dedent();
        self.newline();
        Ok(())
    }

    /// Print `node` one inline level deeper.
    fn inline<N: Node>(&mut self, node: &N) -> Result<(), PrintError> {
        self.indent();
        self.descend(node)?;
        self.dedent();
        Ok(())
    }

    fn list<N: Node>(&mut self, items: &[N]) -> Result<(), PrintError> {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.out.emit(", ");
            }
            self.descend(item)?;
        }
        Ok(())
    }

    fn descend<N: Node>(&mut self, node: &N) -> Result<(), PrintError> {
        if self.depth >= self.ctx.max_depth {
            return Err(PrintError::NestingTooDeep {
                max: self.ctx.max_depth,
            });
        }
        self.depth += 1;
        tracing::trace!(kind = %node.kind(), depth = self.depth, "print");
        let result = ensure_sufficient_stack(|| node.accept(self));
        self.depth -= 1;
        result
    }

    // ═══════════════════════════════════════════════════════════════════
    // Declarations
    // ═══════════════════════════════════════════════════════════════════

    fn escape_marker(&mut self, escapes: bool) {
        if self.ctx.verbose && escapes {
            self.out.emit("/*e*/");
        }
    }

    /// Print a variable declaration. A type without a source form is left out.
    fn var_decl(&mut self, decl: &VarDecl) -> Result<(), PrintError> {
        if decl.init.is_some() {
            self.out.emit("var ");
        }
        self.out.emit(&decl.name);
        self.escape_marker(decl.escapes);

        if let Some(type_name) = &decl.type_name {
            self.out.emit(": ");
            self.out.emit(type_name);
        } else if decl.ty.is_printable() {
            let name = decl.ty.display_name()?;
            self.out.emit(": ");
            self.out.emit(name);
        }

        if let Some(init) = &decl.init {
            self.out.emit(" := ");
            self.descend(init)?;
        }
        Ok(())
    }

    fn decl_comment(&mut self, tag: &str, loc: &impl std::fmt::Display) {
        self.out.emit(&format!("/*{}:{}*/", tag, loc));
    }
}

impl<E: Emitter> Visitor for PrettyPrinter<'_, E> {
    type Output = Result<(), PrintError>;

    fn visit_integer_literal(&mut self, node: &IntegerLiteral) -> Self::Output {
        self.out.emit(&node.value.to_string());
        Ok(())
    }

    fn visit_string_literal(&mut self, node: &StringLiteral) -> Self::Output {
        self.out.emit("\"");
        self.out.emit(&escape(&node.value));
        self.out.emit("\"");
        Ok(())
    }

    fn visit_binary_operator(&mut self, node: &BinaryOperator) -> Self::Output {
        self.out.emit("(");
        self.descend(&node.left)?;
        self.out.emit(node.op.symbol());
        self.descend(&node.right)?;
        self.out.emit(")");
        Ok(())
    }

    fn visit_sequence(&mut self, node: &Sequence) -> Self::Output {
        self.out.emit("(");
        self.block(&node.exprs, ";")?;
        self.out.emit(")");
        Ok(())
    }

    fn visit_let(&mut self, node: &Let) -> Self::Output {
        self.out.emit("let");
        self.block(&node.decls, "")?;
        self.out.emit("in");
        self.block(&node.body.exprs, ";")?;
        self.out.emit("end");
        Ok(())
    }

    fn visit_identifier(&mut self, node: &Identifier) -> Self::Output {
        self.out.emit(&node.name);
        if !self.ctx.verbose {
            return Ok(());
        }
        let symbols = self.symbols;
        if let Some(site) = node.decl.and_then(|id| symbols.decl(id)) {
            let depth_diff = i64::from(node.depth) - i64::from(site.depth);
            let comment = if depth_diff != 0 {
                format!("/*decl:{} depth_diff:{}*/", site.loc, depth_diff)
            } else {
                format!("/*decl:{}*/", site.loc)
            };
            self.out.emit(&comment);
        }
        Ok(())
    }

    fn visit_if_then_else(&mut self, node: &IfThenElse) -> Self::Output {
        self.out.emit("if ");
        self.inline(&node.condition)?;
        self.out.emit(" then ");
        self.inline(&node.then_branch)?;
        self.out.emit(" else ");
        self.inline(&node.else_branch)
    }

    fn visit_var_decl(&mut self, node: &VarDecl) -> Self::Output {
        self.var_decl(node)
    }

    fn visit_fun_decl(&mut self, node: &FunDecl) -> Self::Output {
        self.out.emit("function ");
        self.out.emit(&node.name);
        if self.ctx.verbose && node.name != node.external_name {
            self.out.emit(&format!("/*{}*/", node.external_name));
        }
        self.out.emit("(");
        self.list(&node.params)?;
        self.out.emit(")");
        if let Some(type_name) = &node.type_name {
            self.out.emit(": ");
            self.out.emit(type_name);
        }
        self.out.emit(" = ");
        self.inline(&node.body)
    }

    fn visit_fun_call(&mut self, node: &FunCall) -> Self::Output {
        self.out.emit(&node.func_name);
        let symbols = self.symbols;
        if self.ctx.verbose {
            if let Some(site) = node.decl.and_then(|id| symbols.decl(id)) {
                self.decl_comment("decl", &site.loc);
            }
        }
        self.out.emit("(");
        self.list(&node.args)?;
        self.out.emit(")");
        Ok(())
    }

    fn visit_while_loop(&mut self, node: &WhileLoop) -> Self::Output {
        self.out.emit("while ");
        self.descend(&node.condition)?;
        self.out.emit(" do");
        self.block(std::slice::from_ref(&node.body), "")
    }

    fn visit_for_loop(&mut self, node: &ForLoop) -> Self::Output {
        let variable = &node.variable;
        let low = variable
            .init
            .as_ref()
            .ok_or_else(|| PrintError::MissingLowBound {
                name: variable.name.clone(),
                loc: node.loc.clone(),
            })?;

        self.out.emit("for ");
        self.out.emit(&variable.name);
        self.escape_marker(variable.escapes);
        self.out.emit(" := ");
        self.descend(low)?;
        self.out.emit(" to ");
        self.descend(&node.high)?;
        self.out.emit(" do");
        self.block(std::slice::from_ref(&node.body), "")
    }

    fn visit_break(&mut self, node: &Break) -> Self::Output {
        self.out.emit("break");
        let symbols = self.symbols;
        if self.ctx.verbose {
            if let Some(site) = node.target.and_then(|id| symbols.loop_site(id)) {
                self.decl_comment("loop", &site.loc);
            }
        }
        Ok(())
    }

    fn visit_assign(&mut self, node: &Assign) -> Self::Output {
        self.descend(&node.lhs)?;
        self.out.emit(" := ");
        self.descend(&node.rhs)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Convenience Functions
// ═══════════════════════════════════════════════════════════════════════

/// Render any node to a string.
pub fn print_node<N: Node>(
    node: &N,
    symbols: &SymbolTable,
    ctx: &Context,
) -> Result<String, PrintError> {
    Ok(PrettyPrinter::new(symbols, ctx).print(node)?.output())
}

/// Render an expression to a string.
pub fn print_expr(expr: &Expr, symbols: &SymbolTable, ctx: &Context) -> Result<String, PrintError> {
    print_node(expr, symbols, ctx)
}

/// Render a program's root expression to a string.
pub fn print_program(program: &Program, ctx: &Context) -> Result<String, PrintError> {
    print_node(&program.root, &program.symbols, ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Operator, Type};

    fn show(expr: &Expr) -> String {
        print_expr(expr, &SymbolTable::new(), &Context::default()).unwrap()
    }

    #[test]
    fn test_integer() {
        assert_eq!(show(&Expr::int(-12)), "-12");
    }

    #[test]
    fn test_nested_binary_keeps_every_paren() {
        let tree = Expr::binary(
            Expr::binary(Expr::int(3), Operator::Plus, Expr::int(4)),
            Operator::Times,
            Expr::int(2),
        );
        assert_eq!(show(&tree), "((3+4)*2)");
    }

    #[test]
    fn test_empty_sequence() {
        assert_eq!(show(&Expr::seq(vec![])), "(\n)");
    }

    #[test]
    fn test_var_decl_without_type() {
        let decl = VarDecl::new("x", Some(Expr::int(1)));
        let text = print_node(&decl, &SymbolTable::new(), &Context::default()).unwrap();
        assert_eq!(text, "var x := 1");
    }

    #[test]
    fn test_var_decl_void_type_is_omitted() {
        let decl = VarDecl::new("x", Some(Expr::seq(vec![]))).with_type(Type::Void);
        let text = print_node(&decl, &SymbolTable::new(), &Context::default()).unwrap();
        assert_eq!(text, "var x := (\n)");
    }

    #[test]
    fn test_depth_limit() {
        let mut tree = Expr::int(0);
        for _ in 0..10 {
            tree = Expr::binary(tree, Operator::Plus, Expr::int(1));
        }
        let ctx = Context::default().with_max_depth(5);
        assert_eq!(
            print_expr(&tree, &SymbolTable::new(), &ctx),
            Err(PrintError::NestingTooDeep { max: 5 })
        );
    }
}
