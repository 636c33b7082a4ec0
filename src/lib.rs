//! # expr-graph
//!
//! A caching engine for repeatedly-evaluated boolean conditions over a
//! mutable set of named facts.
//!
//! Textual expressions built from literals, `and`, `or`, `!` and parentheses
//! are parsed into a shared, memoized graph of expression nodes. Every
//! distinct canonical sub-expression is represented by exactly one node, so
//! `a and b`, `(a and b)` and the `a and b` inside a larger condition all
//! share a single cached value. Evaluation short-circuits on the dominant
//! operand value, detects circular dependencies, and caches each node's
//! result until the whole cache is invalidated.
//!
//! ## Quick Start
//!
//! ```
//! use expr_graph::Engine;
//! use std::collections::HashMap;
//!
//! # fn main() -> Result<(), expr_graph::EvalError> {
//! let engine = Engine::new();
//!
//! let mut facts = HashMap::new();
//! facts.insert("A".to_string(), true);
//! facts.insert("B".to_string(), true);
//! facts.insert("C".to_string(), false);
//! facts.insert("D".to_string(), true);
//!
//! assert!(engine.evaluate("A and B and (C or D)", &facts)?);
//! assert!(!engine.evaluate("A and C", &facts)?);
//! assert!(engine.evaluate("!(A and C)", &facts)?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Caching and Invalidation
//!
//! Node values are cached after the first evaluation and trusted until
//! [`Engine::invalidate_all`] is called. A changed fact is therefore only
//! visible after an explicit invalidation:
//!
//! ```
//! use expr_graph::Engine;
//! use std::collections::HashMap;
//!
//! # fn main() -> Result<(), expr_graph::EvalError> {
//! let engine = Engine::new();
//! let mut facts = HashMap::new();
//! facts.insert("ready".to_string(), true);
//!
//! assert!(engine.evaluate("ready", &facts)?);
//!
//! facts.insert("ready".to_string(), false);
//! // Stale: the cached value is still returned.
//! assert!(engine.evaluate("ready", &facts)?);
//!
//! engine.invalidate_all();
//! assert!(!engine.evaluate("ready", &facts)?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Supplying Facts
//!
//! Leaf values come from an external [`SymbolTable`] owned by the caller.
//! The trait is implemented for the standard map types; custom sources
//! (configuration stores, test stubs) only need to implement
//! [`SymbolTable::lookup`]. The engine never mutates the table and never
//! guesses a value: a leaf with no entry is an [`EvalError::UnboundLiteral`]
//! failure.

pub mod error;
mod expression;

pub use error::EvalError;
pub use expression::{Engine, SymbolTable};
