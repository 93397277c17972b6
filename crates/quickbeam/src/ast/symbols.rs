//! Resolution table owned by the name-resolution stage
//!
//! Use sites (`Identifier`, `FunCall`, `Break`) never own the node they
//! resolve to. They carry a typed handle instead, and the handle is looked up
//! here when a traversal needs the target's location or lexical depth.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::Location;

/// Handle to a resolved variable or function declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeclId(pub u32);

/// Handle to a resolved `while` or `for` loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoopId(pub u32);

/// What a use site needs to know about its declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclSite {
    /// Declared name
    pub name: String,
    /// Where the declaration appears
    pub loc: Location,
    /// Lexical depth of the declaration
    pub depth: u32,
}

/// What a `break` needs to know about its loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoopSite {
    /// Where the loop appears
    pub loc: Location,
}

/// Declarations and loops indexed by handle.
///
/// ```
/// use quickbeam::ast::{Location, SymbolTable};
///
/// let mut symbols = SymbolTable::new();
/// let x = symbols.declare("x", Location::new(2, 9), 1).unwrap();
///
/// assert_eq!(symbols.decl(x).map(|site| site.depth), Some(1));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolTable {
    #[serde(default)]
    decls: IndexMap<DeclId, DeclSite>,
    #[serde(default)]
    loops: IndexMap<LoopId, LoopSite>,
}

impl SymbolTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a declaration under a fresh handle, one past the highest in use.
    ///
    /// Returns `None` when the highest handle in use is `u32::MAX`.
    pub fn declare(
        &mut self,
        name: impl Into<String>,
        loc: Location,
        depth: u32,
    ) -> Option<DeclId> {
        let id = DeclId(next_handle(self.decls.keys().map(|id| id.0))?);
        self.insert_decl(
            id,
            DeclSite {
                name: name.into(),
                loc,
                depth,
            },
        );
        Some(id)
    }

    /// Register a declaration under a handle chosen by the caller.
    ///
    /// Replaces any previous entry for the same handle.
    pub fn insert_decl(&mut self, id: DeclId, site: DeclSite) {
        self.decls.insert(id, site);
    }

    /// Register a loop under a fresh handle, one past the highest in use.
    ///
    /// Returns `None` when the highest handle in use is `u32::MAX`.
    pub fn declare_loop(&mut self, loc: Location) -> Option<LoopId> {
        let id = LoopId(next_handle(self.loops.keys().map(|id| id.0))?);
        self.loops.insert(id, LoopSite { loc });
        Some(id)
    }

    /// Look up a declaration.
    pub fn decl(&self, id: DeclId) -> Option<&DeclSite> {
        self.decls.get(&id)
    }

    /// Look up a loop.
    pub fn loop_site(&self, id: LoopId) -> Option<&LoopSite> {
        self.loops.get(&id)
    }

    /// Number of registered declarations.
    pub fn decl_count(&self) -> usize {
        self.decls.len()
    }

    /// Number of registered loops.
    pub fn loop_count(&self) -> usize {
        self.loops.len()
    }
}

fn next_handle(in_use: impl Iterator<Item = u32>) -> Option<u32> {
    match in_use.max() {
        Some(highest) => highest.checked_add(1),
        None => Some(0),
    }
}
