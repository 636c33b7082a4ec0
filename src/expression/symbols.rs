//! External symbol table interface for leaf literal values

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Source of truth for leaf literals.
///
/// The engine looks names up on demand while evaluating leaf nodes. The
/// caller supplies and owns the table; the engine never mutates it and never
/// defines how it is populated or kept current. A missing entry surfaces as
/// [`EvalError::UnboundLiteral`](crate::EvalError::UnboundLiteral) rather
/// than a guessed default.
///
/// Implementations for the standard map types are provided:
///
/// ```
/// use expr_graph::SymbolTable;
/// use std::collections::HashMap;
///
/// let mut facts = HashMap::new();
/// facts.insert("enabled".to_string(), true);
/// assert_eq!(facts.lookup("enabled"), Some(true));
/// assert_eq!(facts.lookup("unknown"), None);
/// ```
pub trait SymbolTable {
    /// Look up the value of a named boolean fact.
    fn lookup(&self, name: &str) -> Option<bool>;
}

impl SymbolTable for HashMap<String, bool> {
    fn lookup(&self, name: &str) -> Option<bool> {
        self.get(name).copied()
    }
}

impl SymbolTable for HashMap<Arc<str>, bool> {
    fn lookup(&self, name: &str) -> Option<bool> {
        self.get(name).copied()
    }
}

impl SymbolTable for BTreeMap<String, bool> {
    fn lookup(&self, name: &str) -> Option<bool> {
        self.get(name).copied()
    }
}

impl<T: SymbolTable + ?Sized> SymbolTable for &T {
    fn lookup(&self, name: &str) -> Option<bool> {
        (**self).lookup(name)
    }
}
