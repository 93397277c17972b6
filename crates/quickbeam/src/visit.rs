//! Dispatch from a node of unknown kind to a per-kind handler
//!
//! Every traversal implements [`Visitor`]. The trait has one required method
//! per node kind and no default bodies: a traversal that does not support a
//! kind still has to say so explicitly. [`Node::accept`] routes a node to the
//! matching method with an exhaustive `match`, so adding a node kind is a
//! compile error in every traversal until it grows a handler.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ast::{
    Assign, BinaryOperator, Break, Decl, Expr, ForLoop, FunCall, FunDecl, Identifier, IfThenElse,
    IntegerLiteral, Let, Sequence, StringLiteral, VarDecl, WhileLoop,
};

/// One operation over the tree.
pub trait Visitor {
    /// What each handler produces.
    type Output;

    /// Handle an integer constant.
    fn visit_integer_literal(&mut self, node: &IntegerLiteral) -> Self::Output;
    /// Handle a string constant.
    fn visit_string_literal(&mut self, node: &StringLiteral) -> Self::Output;
    /// Handle a binary operation.
    fn visit_binary_operator(&mut self, node: &BinaryOperator) -> Self::Output;
    /// Handle a sequence.
    fn visit_sequence(&mut self, node: &Sequence) -> Self::Output;
    /// Handle a let block.
    fn visit_let(&mut self, node: &Let) -> Self::Output;
    /// Handle a variable use.
    fn visit_identifier(&mut self, node: &Identifier) -> Self::Output;
    /// Handle a conditional.
    fn visit_if_then_else(&mut self, node: &IfThenElse) -> Self::Output;
    /// Handle a variable declaration.
    fn visit_var_decl(&mut self, node: &VarDecl) -> Self::Output;
    /// Handle a function declaration.
    fn visit_fun_decl(&mut self, node: &FunDecl) -> Self::Output;
    /// Handle a function call.
    fn visit_fun_call(&mut self, node: &FunCall) -> Self::Output;
    /// Handle a while loop.
    fn visit_while_loop(&mut self, node: &WhileLoop) -> Self::Output;
    /// Handle a for loop.
    fn visit_for_loop(&mut self, node: &ForLoop) -> Self::Output;
    /// Handle a break.
    fn visit_break(&mut self, node: &Break) -> Self::Output;
    /// Handle an assignment.
    fn visit_assign(&mut self, node: &Assign) -> Self::Output;
}

/// The closed set of node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// [`IntegerLiteral`]
    IntegerLiteral,
    /// [`StringLiteral`]
    StringLiteral,
    /// [`BinaryOperator`]
    BinaryOperator,
    /// [`Sequence`]
    Sequence,
    /// [`Let`]
    Let,
    /// [`Identifier`]
    Identifier,
    /// [`IfThenElse`]
    IfThenElse,
    /// [`VarDecl`]
    VarDecl,
    /// [`FunDecl`]
    FunDecl,
    /// [`FunCall`]
    FunCall,
    /// [`WhileLoop`]
    WhileLoop,
    /// [`ForLoop`]
    ForLoop,
    /// [`Break`]
    Break,
    /// [`Assign`]
    Assign,
}

impl NodeKind {
    /// The kind's name as it appears in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::IntegerLiteral => "IntegerLiteral",
            NodeKind::StringLiteral => "StringLiteral",
            NodeKind::BinaryOperator => "BinaryOperator",
            NodeKind::Sequence => "Sequence",
            NodeKind::Let => "Let",
            NodeKind::Identifier => "Identifier",
            NodeKind::IfThenElse => "IfThenElse",
            NodeKind::VarDecl => "VarDecl",
            NodeKind::FunDecl => "FunDecl",
            NodeKind::FunCall => "FunCall",
            NodeKind::WhileLoop => "WhileLoop",
            NodeKind::ForLoop => "ForLoop",
            NodeKind::Break => "Break",
            NodeKind::Assign => "Assign",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Anything a [`Visitor`] can be applied to.
pub trait Node {
    /// Route `self` to the visitor method for its kind.
    fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output;

    /// The node's kind.
    fn kind(&self) -> NodeKind;
}

macro_rules! leaf_node {
    ($($kind:ident => $method:ident),* $(,)?) => {
        $(
            impl Node for $kind {
                fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
                    visitor.$method(self)
                }

                fn kind(&self) -> NodeKind {
                    NodeKind::$kind
                }
            }
        )*
    };
}

leaf_node!(
    IntegerLiteral => visit_integer_literal,
    StringLiteral => visit_string_literal,
    BinaryOperator => visit_binary_operator,
    Sequence => visit_sequence,
    Let => visit_let,
    Identifier => visit_identifier,
    IfThenElse => visit_if_then_else,
    VarDecl => visit_var_decl,
    FunDecl => visit_fun_decl,
    FunCall => visit_fun_call,
    WhileLoop => visit_while_loop,
    ForLoop => visit_for_loop,
    Break => visit_break,
    Assign => visit_assign,
);

impl Node for Expr {
    fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            Expr::IntegerLiteral(node) => visitor.visit_integer_literal(node),
            Expr::StringLiteral(node) => visitor.visit_string_literal(node),
            Expr::BinaryOperator(node) => visitor.visit_binary_operator(node),
            Expr::Sequence(node) => visitor.visit_sequence(node),
            Expr::Let(node) => visitor.visit_let(node),
            Expr::Identifier(node) => visitor.visit_identifier(node),
            Expr::IfThenElse(node) => visitor.visit_if_then_else(node),
            Expr::FunCall(node) => visitor.visit_fun_call(node),
            Expr::WhileLoop(node) => visitor.visit_while_loop(node),
            Expr::ForLoop(node) => visitor.visit_for_loop(node),
            Expr::Break(node) => visitor.visit_break(node),
            Expr::Assign(node) => visitor.visit_assign(node),
        }
    }

    fn kind(&self) -> NodeKind {
        match self {
            Expr::IntegerLiteral(node) => node.kind(),
            Expr::StringLiteral(node) => node.kind(),
            Expr::BinaryOperator(node) => node.kind(),
            Expr::Sequence(node) => node.kind(),
            Expr::Let(node) => node.kind(),
            Expr::Identifier(node) => node.kind(),
            Expr::IfThenElse(node) => node.kind(),
            Expr::FunCall(node) => node.kind(),
            Expr::WhileLoop(node) => node.kind(),
            Expr::ForLoop(node) => node.kind(),
            Expr::Break(node) => node.kind(),
            Expr::Assign(node) => node.kind(),
        }
    }
}

impl Node for Decl {
    fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            Decl::VarDecl(node) => visitor.visit_var_decl(node),
            Decl::FunDecl(node) => visitor.visit_fun_decl(node),
        }
    }

    fn kind(&self) -> NodeKind {
        match self {
            Decl::VarDecl(node) => node.kind(),
            Decl::FunDecl(node) => node.kind(),
        }
    }
}

impl<T: Node> Node for Box<T> {
    fn accept<V: Visitor>(&self, visitor: &mut V) -> V::Output {
        (**self).accept(visitor)
    }

    fn kind(&self) -> NodeKind {
        (**self).kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Operator;

    /// Records the kinds it is routed to, in visiting order.
    #[derive(Default)]
    struct KindRecorder(Vec<NodeKind>);

    impl Visitor for KindRecorder {
        type Output = ();

        fn visit_integer_literal(&mut self, node: &IntegerLiteral) {
            self.0.push(node.kind());
        }
        fn visit_string_literal(&mut self, node: &StringLiteral) {
            self.0.push(node.kind());
        }
        fn visit_binary_operator(&mut self, node: &BinaryOperator) {
            self.0.push(node.kind());
            node.left.accept(self);
            node.right.accept(self);
        }
        fn visit_sequence(&mut self, node: &Sequence) {
            self.0.push(node.kind());
            for expr in &node.exprs {
                expr.accept(self);
            }
        }
        fn visit_let(&mut self, node: &Let) {
            self.0.push(node.kind());
            for decl in &node.decls {
                decl.accept(self);
            }
            node.body.accept(self);
        }
        fn visit_identifier(&mut self, node: &Identifier) {
            self.0.push(node.kind());
        }
        fn visit_if_then_else(&mut self, node: &IfThenElse) {
            self.0.push(node.kind());
            node.condition.accept(self);
            node.then_branch.accept(self);
            node.else_branch.accept(self);
        }
        fn visit_var_decl(&mut self, node: &VarDecl) {
            self.0.push(node.kind());
        }
        fn visit_fun_decl(&mut self, node: &FunDecl) {
            self.0.push(node.kind());
        }
        fn visit_fun_call(&mut self, node: &FunCall) {
            self.0.push(node.kind());
        }
        fn visit_while_loop(&mut self, node: &WhileLoop) {
            self.0.push(node.kind());
        }
        fn visit_for_loop(&mut self, node: &ForLoop) {
            self.0.push(node.kind());
        }
        fn visit_break(&mut self, node: &Break) {
            self.0.push(node.kind());
        }
        fn visit_assign(&mut self, node: &Assign) {
            self.0.push(node.kind());
        }
    }

    #[test]
    fn test_children_visited_in_field_order() {
        let tree = Expr::let_in(
            vec![VarDecl::new("a", Some(Expr::int(1))).into()],
            vec![Expr::if_then_else(
                Expr::binary(Expr::ident("a"), Operator::Lt, Expr::int(2)),
                Expr::string("yes"),
                Expr::call("f", vec![]),
            )],
        );
        let mut recorder = KindRecorder::default();
        tree.accept(&mut recorder);
        assert_eq!(
            recorder.0,
            vec![
                NodeKind::Let,
                NodeKind::VarDecl,
                NodeKind::Sequence,
                NodeKind::IfThenElse,
                NodeKind::BinaryOperator,
                NodeKind::Identifier,
                NodeKind::IntegerLiteral,
                NodeKind::StringLiteral,
                NodeKind::FunCall,
            ]
        );
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(NodeKind::FunCall.to_string(), "FunCall");
        assert_eq!(Expr::brk().kind(), NodeKind::Break);
        let decl: Decl = FunDecl::new("f", vec![], Expr::int(0)).into();
        assert_eq!(decl.kind(), NodeKind::FunDecl);
    }
}
