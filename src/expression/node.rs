//! Node interning registry and expression construction
//!
//! The registry maps canonical expression text to a single shared node, so
//! every surface spelling of the same sub-expression (`"a and b"`,
//! `"(a and b)"`, `"!(!(a and b))"`) resolves to one cached value. Nodes are
//! arena entries addressed by stable indices; a node references its children
//! by index and never owns them exclusively.

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;

use super::scan;
use crate::error::EvalError;

/// Node identifier: a stable index into the registry arena.
pub(super) type NodeId = usize;

/// Operator kind of a node.
///
/// A top-level inversion is represented by a degenerate [`NodeKind::And`]
/// pass-through node with exactly one inverted child; no dedicated kind is
/// needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum NodeKind {
    And,
    Or,
    Leaf,
}

/// A single expression node.
///
/// `children` holds `(child, inverted)` edges in source order and is fixed
/// at construction together with `kind`; only `cached` changes afterwards.
#[derive(Debug, Clone)]
pub(super) struct Node {
    /// Canonical text, also the registry key this node is interned under
    pub(super) text: Arc<str>,
    pub(super) kind: NodeKind,
    pub(super) children: Vec<(NodeId, bool)>,
    /// `None` means not yet evaluated since the last invalidation
    pub(super) cached: Option<bool>,
}

/// Interning registry mapping canonical expression text to nodes.
///
/// # Invariant: NodeId stability
///
/// NodeIds are stable: the `nodes` Vec only grows, never shrinks or
/// reorders, so a NodeId stays valid for the lifetime of the registry.
/// Invalidation clears cached values but never removes a node.
#[derive(Debug, Default)]
pub(super) struct Registry {
    pub(super) nodes: Vec<Node>,
    pub(super) interned: HashMap<Arc<str>, NodeId>,
}

impl Registry {
    pub(super) fn new() -> Self {
        Registry::default()
    }

    pub(super) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Canonical text of a node.
    pub(super) fn text(&self, id: NodeId) -> &Arc<str> {
        &self.nodes[id].text
    }

    /// Resolve the node for an expression, creating it (and any missing
    /// children) on first sight.
    ///
    /// Idempotent: repeated calls with textually-equivalent input, through
    /// any surface spelling, return the identical NodeId.
    pub(super) fn get_or_create(&mut self, text: &str) -> Result<NodeId, EvalError> {
        let (clean, inverted) = scan::clean_and_extract_inversion(text)?;
        if clean.is_empty() {
            return Err(EvalError::MalformedExpression {
                message: Arc::from("empty expression"),
                input: Arc::from(text),
                position: None,
            });
        }
        if inverted {
            // Top-level inversion: register a pass-through node under the
            // paren-stripped spelling that keeps the inversion mark, and
            // reference the shared inner node instead of duplicating it.
            let key = scan::strip(text)?;
            if let Some(&id) = self.interned.get(key) {
                return Ok(id);
            }
            let key: Arc<str> = Arc::from(key);
            let inner = self.get_or_create(clean)?;
            Ok(self.insert(key, NodeKind::And, vec![(inner, true)]))
        } else {
            if let Some(&id) = self.interned.get(clean) {
                return Ok(id);
            }
            self.construct(clean)
        }
    }

    /// Classify already-inversion-stripped canonical text and materialize a
    /// node for it.
    ///
    /// `split_or` deciding first makes OR the top-level operator whenever
    /// one exists outside parens; otherwise AND; otherwise the text is a
    /// single literal whose value is resolved at evaluation time from the
    /// symbol table.
    fn construct(&mut self, clean: &str) -> Result<NodeId, EvalError> {
        let or_parts = scan::split_or(clean)?;
        let (kind, parts) = if or_parts.len() > 1 {
            (NodeKind::Or, or_parts)
        } else {
            let and_parts = scan::split_and(clean)?;
            if and_parts.len() > 1 {
                (NodeKind::And, and_parts)
            } else {
                return self.construct_leaf(clean);
            }
        };

        // Resolve children before inserting the parent so a malformed part
        // leaves no half-built parent behind.
        let mut children = Vec::with_capacity(parts.len());
        for part in parts {
            let (child_text, inverted) = scan::clean_and_extract_inversion(part)?;
            if child_text.is_empty() {
                return Err(EvalError::MalformedExpression {
                    message: Arc::from("operator with a missing operand"),
                    input: Arc::from(clean),
                    position: None,
                });
            }
            let child = self.get_or_create(child_text)?;
            children.push((child, inverted));
        }
        Ok(self.insert(Arc::from(clean), kind, children))
    }

    fn construct_leaf(&mut self, clean: &str) -> Result<NodeId, EvalError> {
        let bytes = clean.as_bytes();
        let valid_start = bytes
            .first()
            .is_some_and(|&b| b.is_ascii_alphabetic() || b == b'_');
        let bad_position = if valid_start {
            bytes
                .iter()
                .position(|&b| !(b.is_ascii_alphanumeric() || b == b'_'))
        } else {
            Some(0)
        };
        if let Some(position) = bad_position {
            return Err(EvalError::MalformedExpression {
                message: Arc::from("expected a literal name"),
                input: Arc::from(clean),
                position: Some(position),
            });
        }
        Ok(self.insert(Arc::from(clean), NodeKind::Leaf, Vec::new()))
    }

    fn insert(&mut self, text: Arc<str>, kind: NodeKind, children: Vec<(NodeId, bool)>) -> NodeId {
        let id = self.nodes.len();
        debug!("interned {:?} node {} for {:?}", kind, id, text);
        self.interned.insert(Arc::clone(&text), id);
        self.nodes.push(Node {
            text,
            kind,
            children,
            cached: None,
        });
        id
    }
}
