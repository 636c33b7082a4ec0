//! Recursive evaluation with short-circuiting, caching and cycle detection
//!
//! Evaluation is plain depth-first recursion bounded by expression nesting
//! depth. The traversal path used for cycle detection is call-local state
//! threaded through the recursion, never stored on a node or the registry.

use std::sync::Arc;

use log::{debug, trace};

use super::node::{NodeId, NodeKind, Registry};
use super::symbols::SymbolTable;
use crate::error::EvalError;

impl Registry {
    /// Evaluate a node, starting a fresh traversal path.
    pub(super) fn evaluate(
        &mut self,
        id: NodeId,
        symbols: &dyn SymbolTable,
    ) -> Result<bool, EvalError> {
        let mut path = Vec::new();
        self.eval_rec(id, symbols, &mut path)
    }

    fn eval_rec(
        &mut self,
        id: NodeId,
        symbols: &dyn SymbolTable,
        path: &mut Vec<NodeId>,
    ) -> Result<bool, EvalError> {
        if path.contains(&id) {
            let chain = path
                .iter()
                .chain(Some(&id))
                .map(|&node| Arc::clone(self.text(node)))
                .collect();
            return Err(EvalError::CircularDependency { chain });
        }
        // A cached node cannot participate in a new cycle, so the cache
        // check may run before the push.
        if let Some(value) = self.nodes[id].cached {
            trace!("cache hit for {:?}: {}", self.nodes[id].text, value);
            return Ok(value);
        }

        path.push(id);
        let result = self.eval_uncached(id, symbols, path);
        path.pop();

        // Cache only on successful completion; a failed sub-evaluation
        // leaves this node unevaluated rather than half-trusted.
        let value = result?;
        self.nodes[id].cached = Some(value);
        Ok(value)
    }

    fn eval_uncached(
        &mut self,
        id: NodeId,
        symbols: &dyn SymbolTable,
        path: &mut Vec<NodeId>,
    ) -> Result<bool, EvalError> {
        let kind = self.nodes[id].kind;
        match kind {
            NodeKind::Leaf => {
                let name = Arc::clone(&self.nodes[id].text);
                symbols
                    .lookup(&name)
                    .ok_or(EvalError::UnboundLiteral { name })
            }
            NodeKind::And | NodeKind::Or => {
                for index in 0..self.nodes[id].children.len() {
                    let (child, inverted) = self.nodes[id].children[index];
                    let mut value = self.eval_rec(child, symbols, path)?;
                    if inverted {
                        value = !value;
                    }
                    // Short-circuit on the dominant value for the operator:
                    // remaining operands cannot change the result.
                    match kind {
                        NodeKind::Or if value => return Ok(true),
                        NodeKind::And if !value => return Ok(false),
                        _ => {}
                    }
                }
                // The loop completed without short-circuiting: every AND
                // operand held, no OR operand did.
                Ok(kind == NodeKind::And)
            }
        }
    }

    /// Clear every node's cached value, forcing full re-evaluation on the
    /// next query. Node identity and topology persist.
    pub(super) fn invalidate_all(&mut self) {
        for node in &mut self.nodes {
            node.cached = None;
        }
        debug!("invalidated cached values of {} nodes", self.nodes.len());
    }
}
