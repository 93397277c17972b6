//! Traversal configuration

/// Configuration shared by the printer and the evaluator.
///
/// Each traversal reads it and never changes it, so one context can drive
/// any number of traversals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    /// Emit diagnostic annotations (printer) and log every stack
    /// transition (evaluator)
    pub verbose: bool,

    /// Spaces per indentation level
    pub indent_width: usize,

    /// Maximum nesting depth of a single traversal
    pub max_depth: usize,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            verbose: false,
            indent_width: 2,
            max_depth: 10_000,
        }
    }
}

impl Context {
    /// Create a context with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a verbose context with otherwise default settings.
    pub fn verbose() -> Self {
        Self {
            verbose: true,
            ..Default::default()
        }
    }

    /// Set the verbose flag.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Set the number of spaces per indentation level.
    pub fn with_indent_width(mut self, indent_width: usize) -> Self {
        self.indent_width = indent_width;
        self
    }

    /// Set the nesting depth limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let ctx = Context::default();
        assert!(!ctx.verbose);
        assert_eq!(ctx.indent_width, 2);
        assert_eq!(ctx.max_depth, 10_000);
    }

    #[test]
    fn test_builders() {
        let ctx = Context::verbose().with_indent_width(4).with_max_depth(8);
        assert!(ctx.verbose);
        assert_eq!(ctx.indent_width, 4);
        assert_eq!(ctx.max_depth, 8);
    }
}
