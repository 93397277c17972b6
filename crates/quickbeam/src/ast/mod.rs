//! Resolved abstract syntax tree
//!
//! Trees arrive here fully built by the parser and the name/type resolution
//! passes: declaration handles, lexical depths, escape flags and resolved
//! types are already filled in. Nothing in this crate mutates a tree.
//!
//! Twelve expression kinds live in [`Expr`]; the two declaration kinds live
//! in [`Decl`]. Both are closed sum types, so every traversal has to match
//! all of them.

mod location;
mod operator;
mod symbols;
mod types;

pub use location::{Location, Position};
pub use operator::Operator;
pub use symbols::{DeclId, DeclSite, LoopId, LoopSite, SymbolTable};
pub use types::Type;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::stack::ensure_sufficient_stack;

// ═══════════════════════════════════════════════════════════════════════
// Expressions
// ═══════════════════════════════════════════════════════════════════════

/// An integer constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegerLiteral {
    /// The value
    pub value: i32,
    /// Source location
    #[serde(default)]
    pub loc: Location,
}

/// A string constant, already unescaped by the lexer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringLiteral {
    /// The raw contents
    pub value: String,
    /// Source location
    #[serde(default)]
    pub loc: Location,
}

/// `left op right`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryOperator {
    /// The operator
    pub op: Operator,
    /// Left operand
    pub left: Box<Expr>,
    /// Right operand
    pub right: Box<Expr>,
    /// Source location
    #[serde(default)]
    pub loc: Location,
}

/// `(e1; e2; ...)`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    /// Expressions in evaluation order
    pub exprs: Vec<Expr>,
    /// Source location
    #[serde(default)]
    pub loc: Location,
}

/// `let decls in body end`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Let {
    /// Declarations in source order
    pub decls: Vec<Decl>,
    /// Body expressions
    pub body: Sequence,
    /// Source location
    #[serde(default)]
    pub loc: Location,
}

/// A variable use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier {
    /// Referenced name
    pub name: String,
    /// Declaration the name resolved to
    #[serde(default)]
    pub decl: Option<DeclId>,
    /// Lexical depth of the use
    #[serde(default)]
    pub depth: u32,
    /// Source location
    #[serde(default)]
    pub loc: Location,
}

/// `if condition then then_branch else else_branch`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IfThenElse {
    /// Condition
    pub condition: Box<Expr>,
    /// Taken when the condition is nonzero
    pub then_branch: Box<Expr>,
    /// Taken when the condition is zero
    pub else_branch: Box<Expr>,
    /// Source location
    #[serde(default)]
    pub loc: Location,
}

/// `name(args...)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunCall {
    /// Called name
    pub func_name: String,
    /// Function declaration the name resolved to
    #[serde(default)]
    pub decl: Option<DeclId>,
    /// Arguments in evaluation order
    #[serde(default)]
    pub args: Vec<Expr>,
    /// Source location
    #[serde(default)]
    pub loc: Location,
}

/// `while condition do body`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhileLoop {
    /// Loop condition
    pub condition: Box<Expr>,
    /// Loop body
    pub body: Box<Expr>,
    /// Source location
    #[serde(default)]
    pub loc: Location,
}

/// `for variable := low to high do body`
///
/// The low bound is the initializer of `variable`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForLoop {
    /// Loop variable, initialized with the low bound
    pub variable: VarDecl,
    /// High bound
    pub high: Box<Expr>,
    /// Loop body
    pub body: Box<Expr>,
    /// Source location
    #[serde(default)]
    pub loc: Location,
}

/// `break`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Break {
    /// Loop this break leaves
    #[serde(default)]
    pub target: Option<LoopId>,
    /// Source location
    #[serde(default)]
    pub loc: Location,
}

/// `lhs := rhs`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assign {
    /// Assigned place
    pub lhs: Box<Expr>,
    /// Assigned value
    pub rhs: Box<Expr>,
    /// Source location
    #[serde(default)]
    pub loc: Location,
}

/// Any expression node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", remote = "Self")]
pub enum Expr {
    /// Integer constant
    IntegerLiteral(IntegerLiteral),
    /// String constant
    StringLiteral(StringLiteral),
    /// Binary operation
    BinaryOperator(BinaryOperator),
    /// Parenthesized sequence
    Sequence(Sequence),
    /// Let block
    Let(Let),
    /// Variable use
    Identifier(Identifier),
    /// Conditional
    IfThenElse(IfThenElse),
    /// Function call
    FunCall(FunCall),
    /// While loop
    WhileLoop(WhileLoop),
    /// For loop
    ForLoop(ForLoop),
    /// Loop exit
    Break(Break),
    /// Assignment
    Assign(Assign),
}

// Serde recurses once per nested expression; run each level through the
// stack guard like the traversals do.

impl Serialize for Expr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ensure_sufficient_stack(|| Expr::serialize(self, serializer))
    }
}

impl<'de> Deserialize<'de> for Expr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        ensure_sufficient_stack(|| Expr::deserialize(deserializer))
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Declarations
// ═══════════════════════════════════════════════════════════════════════

/// A variable declaration, function parameter, or loop variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarDecl {
    /// Declared name
    pub name: String,
    /// Type name written in the source, if any
    #[serde(default)]
    pub type_name: Option<String>,
    /// Initializer; absent for parameters
    #[serde(default)]
    pub init: Option<Box<Expr>>,
    /// Whether the variable outlives its frame
    #[serde(default)]
    pub escapes: bool,
    /// Type computed by the type checker
    #[serde(default)]
    pub ty: Type,
    /// Lexical depth of the declaration
    #[serde(default)]
    pub depth: u32,
    /// Source location
    #[serde(default)]
    pub loc: Location,
}

/// A function declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunDecl {
    /// Declared name
    pub name: String,
    /// Name used by code generation; differs for nested or renamed functions
    pub external_name: String,
    /// Parameters in order
    #[serde(default)]
    pub params: Vec<VarDecl>,
    /// Return type name written in the source, if any
    #[serde(default)]
    pub type_name: Option<String>,
    /// Function body
    pub body: Box<Expr>,
    /// Lexical depth of the declaration
    #[serde(default)]
    pub depth: u32,
    /// Source location
    #[serde(default)]
    pub loc: Location,
}

/// Any declaration node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Decl {
    /// Variable declaration
    VarDecl(VarDecl),
    /// Function declaration
    FunDecl(FunDecl),
}

/// A resolved tree together with the table its handles point into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    /// Top-level expression
    pub root: Expr,
    /// Resolution results for `root`
    #[serde(default)]
    pub symbols: SymbolTable,
}

impl Program {
    /// Bundle a tree with its resolution table.
    pub fn new(root: Expr, symbols: SymbolTable) -> Self {
        Self { root, symbols }
    }

    /// Load a program handed over as JSON.
    ///
    /// The parser's nesting limit is lifted and its stack grows on demand,
    /// so any tree the traversals accept can also be loaded.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        let mut json = serde_json::Deserializer::from_str(text);
        json.disable_recursion_limit();
        let program = Program::deserialize(serde_stacker::Deserializer::new(&mut json))?;
        json.end()?;
        Ok(program)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Construction helpers
// ═══════════════════════════════════════════════════════════════════════

macro_rules! into_expr {
    ($($kind:ident),* $(,)?) => {
        $(
            impl From<$kind> for Expr {
                fn from(node: $kind) -> Self {
                    Expr::$kind(node)
                }
            }
        )*
    };
}

into_expr!(
    IntegerLiteral,
    StringLiteral,
    BinaryOperator,
    Sequence,
    Let,
    Identifier,
    IfThenElse,
    FunCall,
    WhileLoop,
    ForLoop,
    Break,
    Assign,
);

impl From<VarDecl> for Decl {
    fn from(decl: VarDecl) -> Self {
        Decl::VarDecl(decl)
    }
}

impl From<FunDecl> for Decl {
    fn from(decl: FunDecl) -> Self {
        Decl::FunDecl(decl)
    }
}

impl Expr {
    /// `value`
    pub fn int(value: i32) -> Self {
        IntegerLiteral {
            value,
            loc: Location::default(),
        }
        .into()
    }

    /// `"value"`
    pub fn string(value: impl Into<String>) -> Self {
        StringLiteral {
            value: value.into(),
            loc: Location::default(),
        }
        .into()
    }

    /// `(left op right)`
    pub fn binary(left: Expr, op: Operator, right: Expr) -> Self {
        BinaryOperator {
            op,
            left: Box::new(left),
            right: Box::new(right),
            loc: Location::default(),
        }
        .into()
    }

    /// `(e1; e2; ...)`
    pub fn seq(exprs: Vec<Expr>) -> Self {
        Sequence {
            exprs,
            loc: Location::default(),
        }
        .into()
    }

    /// `let decls in body end`
    pub fn let_in(decls: Vec<Decl>, body: Vec<Expr>) -> Self {
        Let {
            decls,
            body: Sequence {
                exprs: body,
                loc: Location::default(),
            },
            loc: Location::default(),
        }
        .into()
    }

    /// An unresolved variable use at depth 0.
    pub fn ident(name: impl Into<String>) -> Self {
        Identifier::new(name).into()
    }

    /// `if condition then then_branch else else_branch`
    pub fn if_then_else(condition: Expr, then_branch: Expr, else_branch: Expr) -> Self {
        IfThenElse {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
            loc: Location::default(),
        }
        .into()
    }

    /// An unresolved call.
    pub fn call(func_name: impl Into<String>, args: Vec<Expr>) -> Self {
        FunCall {
            func_name: func_name.into(),
            decl: None,
            args,
            loc: Location::default(),
        }
        .into()
    }

    /// `while condition do body`
    pub fn while_loop(condition: Expr, body: Expr) -> Self {
        WhileLoop {
            condition: Box::new(condition),
            body: Box::new(body),
            loc: Location::default(),
        }
        .into()
    }

    /// `for name := low to high do body`
    pub fn for_loop(name: impl Into<String>, low: Expr, high: Expr, body: Expr) -> Self {
        ForLoop {
            variable: VarDecl::new(name, Some(low)).with_type(Type::Int),
            high: Box::new(high),
            body: Box::new(body),
            loc: Location::default(),
        }
        .into()
    }

    /// An unresolved `break`.
    pub fn brk() -> Self {
        Break::default().into()
    }

    /// `lhs := rhs`
    pub fn assign(lhs: Expr, rhs: Expr) -> Self {
        Assign {
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
            loc: Location::default(),
        }
        .into()
    }
}

impl Identifier {
    /// An unresolved use at depth 0.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            decl: None,
            depth: 0,
            loc: Location::default(),
        }
    }

    /// Attach the resolved declaration and the depth of this use.
    pub fn resolved(mut self, decl: DeclId, depth: u32) -> Self {
        self.decl = Some(decl);
        self.depth = depth;
        self
    }
}

impl FunCall {
    /// Attach the resolved function declaration.
    pub fn resolved(mut self, decl: DeclId) -> Self {
        self.decl = Some(decl);
        self
    }
}

impl VarDecl {
    /// `var name := init`, or a bare parameter when `init` is `None`.
    pub fn new(name: impl Into<String>, init: Option<Expr>) -> Self {
        Self {
            name: name.into(),
            type_name: None,
            init: init.map(Box::new),
            escapes: false,
            ty: Type::Undefined,
            depth: 0,
            loc: Location::default(),
        }
    }

    /// Set the type name written in the source.
    pub fn typed(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Set the type computed by the type checker.
    pub fn with_type(mut self, ty: Type) -> Self {
        self.ty = ty;
        self
    }

    /// Mark the variable as escaping.
    pub fn escaping(mut self) -> Self {
        self.escapes = true;
        self
    }
}

impl FunDecl {
    /// `function name(params) = body`, with the external name equal to `name`.
    pub fn new(name: impl Into<String>, params: Vec<VarDecl>, body: Expr) -> Self {
        let name = name.into();
        Self {
            external_name: name.clone(),
            name,
            params,
            type_name: None,
            body: Box::new(body),
            depth: 0,
            loc: Location::default(),
        }
    }

    /// Set the return type name.
    pub fn returning(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Set the external name.
    pub fn external(mut self, external_name: impl Into<String>) -> Self {
        self.external_name = external_name.into();
        self
    }
}
