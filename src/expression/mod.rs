//! Boolean expression graph: parsing, interning, and cached evaluation
//!
//! An expression string is decomposed by precedence (`or` before `and`,
//! since AND binds tighter) into a graph of nodes interned by canonical
//! text. Each node caches its value after the first evaluation; a top-level
//! `!` is represented as a pass-through node referencing the shared inner
//! node, so `!A` reuses `A`'s cached value instead of duplicating state.
//!
//! The public surface is [`Engine`] plus the [`SymbolTable`] trait supplying
//! leaf values.

mod eval;
mod node;
mod scan;
mod symbols;


use std::sync::{Arc, RwLock};

use crate::error::EvalError;
use node::Registry;
pub use symbols::SymbolTable;

/// The expression engine: an interning node registry plus a caching,
/// short-circuiting evaluator.
///
/// The engine is an explicitly constructed service; create one per
/// independent cache domain and share it by reference. The registry lives
/// for the lifetime of the engine: nodes are created lazily on first lookup
/// and persist across invalidation epochs.
///
/// # Concurrency
///
/// The registry and the per-node cached values are the only shared mutable
/// state, guarded by a single `RwLock`. An evaluation holds the write lock
/// for its whole read-check-compute-cache sequence, so concurrent calls for
/// the same canonical text can never race to construct duplicate nodes and
/// cached values are never torn; evaluations therefore serialize against
/// each other and against [`invalidate_all`](Engine::invalidate_all). The
/// traversal path used for cycle detection is call-local.
///
/// # Examples
///
/// ```
/// use expr_graph::Engine;
/// use std::collections::HashMap;
///
/// # fn main() -> Result<(), expr_graph::EvalError> {
/// let engine = Engine::new();
/// let mut facts = HashMap::new();
/// facts.insert("a".to_string(), true);
/// facts.insert("b".to_string(), false);
///
/// assert!(engine.evaluate("a or b", &facts)?);
/// assert!(!engine.evaluate("a and b", &facts)?);
/// assert!(engine.evaluate("a and !b", &facts)?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct Engine {
    registry: RwLock<Registry>,
}

impl Engine {
    /// Create an engine with an empty registry.
    pub fn new() -> Self {
        Engine {
            registry: RwLock::new(Registry::new()),
        }
    }

    /// Evaluate an expression against the given symbol table.
    ///
    /// Nodes are resolved or created as needed; already-cached values are
    /// returned without re-consulting the symbol table. Composite values
    /// short-circuit: an OR returns `true` at the first true operand, an
    /// AND returns `false` at the first false one, in source order.
    ///
    /// # Errors
    ///
    /// - [`EvalError::MalformedExpression`] for unbalanced parentheses,
    ///   empty expression text, or an operator with a missing operand.
    /// - [`EvalError::UnboundLiteral`] when a leaf has no entry in
    ///   `symbols`.
    /// - [`EvalError::CircularDependency`] when a node's evaluation
    ///   transitively depends on itself.
    pub fn evaluate(&self, expression: &str, symbols: &dyn SymbolTable) -> Result<bool, EvalError> {
        let mut registry = self.registry.write().unwrap();
        let id = registry.get_or_create(expression)?;
        registry.evaluate(id, symbols)
    }

    /// Clear every node's cached value, forcing full re-evaluation on the
    /// next query.
    ///
    /// Call this after the underlying facts changed. Node identity and
    /// topology persist, only the cached values are dropped. Always
    /// succeeds.
    pub fn invalidate_all(&self) {
        self.registry.write().unwrap().invalidate_all();
    }

    /// Resolve an expression and return its canonical registry text.
    ///
    /// The canonical text is the normalized, de-parenthesized spelling an
    /// expression is interned under; two expressions with equal canonical
    /// text share one node and one cached value.
    ///
    /// ```
    /// use expr_graph::Engine;
    ///
    /// # fn main() -> Result<(), expr_graph::EvalError> {
    /// let engine = Engine::new();
    /// assert_eq!(&*engine.canonicalize("((a and b))")?, "a and b");
    /// assert_eq!(&*engine.canonicalize("!(!(a and b))")?, "a and b");
    /// # Ok(())
    /// # }
    /// ```
    pub fn canonicalize(&self, expression: &str) -> Result<Arc<str>, EvalError> {
        let mut registry = self.registry.write().unwrap();
        let id = registry.get_or_create(expression)?;
        Ok(Arc::clone(registry.text(id)))
    }

    /// Number of nodes in the registry.
    pub fn node_count(&self) -> usize {
        self.registry.read().unwrap().len()
    }

    /// Whether the registry holds no nodes yet.
    pub fn is_empty(&self) -> bool {
        self.node_count() == 0
    }
}
