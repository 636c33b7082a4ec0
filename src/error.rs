//! Error types for expression parsing and evaluation
//!
//! All failures are surfaced synchronously to the caller of
//! [`Engine::evaluate`](crate::Engine::evaluate); none are retried
//! internally. Nodes cached before a failing sub-evaluation keep their
//! cached values, since caching only happens on successful completion of a
//! node.

use std::fmt;
use std::io;
use std::sync::Arc;

/// Errors that can occur while resolving or evaluating an expression
///
/// The variants are programmatically distinguishable and carry enough
/// context to report the failure without re-parsing the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// A node's evaluation transitively depends on itself
    ///
    /// The cycle is a structural property of the expression set and will not
    /// resolve itself, so this is fatal to the evaluation call. The chain
    /// holds the canonical texts of the in-progress nodes in traversal
    /// order, ending with the node that was revisited.
    CircularDependency {
        /// Ordered canonical texts of the dependency chain
        chain: Vec<Arc<str>>,
    },

    /// A leaf literal has no entry in the external symbol table
    ///
    /// The engine never guesses a value for an unbound literal; the caller
    /// decides whether to treat this as fatal or to bind a default and
    /// retry.
    UnboundLiteral {
        /// The literal name that was looked up
        name: Arc<str>,
    },

    /// The expression text could not be parsed
    ///
    /// Covers unbalanced parentheses, empty expression text, operators with
    /// a missing operand, and text that is not a valid literal name.
    MalformedExpression {
        /// Description of what was malformed
        message: Arc<str>,
        /// The expression text that failed to parse
        input: Arc<str>,
        /// Optional byte position in `input` where the problem was detected
        position: Option<usize>,
    },
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::CircularDependency { chain } => {
                write!(
                    f,
                    "Circular dependency detected: {}",
                    chain.join(" --> ")
                )
            }
            EvalError::UnboundLiteral { name } => {
                write!(f, "No value bound for literal {:?} in the symbol table", name)
            }
            EvalError::MalformedExpression {
                message,
                input,
                position,
            } => {
                if let Some(pos) = position {
                    write!(
                        f,
                        "Malformed expression at position {}: {}. Input: {:?}",
                        pos, message, input
                    )
                } else {
                    write!(f, "Malformed expression: {}. Input: {:?}", message, input)
                }
            }
        }
    }
}

impl std::error::Error for EvalError {}

// Conversion to io::Error for callers that funnel everything through IO
// results.
impl From<EvalError> for io::Error {
    fn from(err: EvalError) -> Self {
        let kind = match &err {
            EvalError::CircularDependency { .. } => io::ErrorKind::InvalidInput,
            EvalError::UnboundLiteral { .. } => io::ErrorKind::NotFound,
            EvalError::MalformedExpression { .. } => io::ErrorKind::InvalidData,
        };
        io::Error::new(kind, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circular_dependency_display() {
        let err = EvalError::CircularDependency {
            chain: vec![Arc::from("a and b"), Arc::from("b"), Arc::from("a and b")],
        };
        let msg = err.to_string();
        assert!(msg.contains("Circular dependency"));
        assert!(msg.contains("a and b --> b --> a and b"));
    }

    #[test]
    fn test_unbound_literal_display() {
        let err = EvalError::UnboundLiteral {
            name: Arc::from("missing_flag"),
        };
        let msg = err.to_string();
        assert!(msg.contains("No value bound"));
        assert!(msg.contains("missing_flag"));
    }

    #[test]
    fn test_malformed_expression_with_position() {
        let err = EvalError::MalformedExpression {
            message: Arc::from("unbalanced parentheses"),
            input: Arc::from("(a and b"),
            position: Some(0),
        };
        let msg = err.to_string();
        assert!(msg.contains("position 0"));
        assert!(msg.contains("unbalanced parentheses"));
        assert!(msg.contains("(a and b"));
    }

    #[test]
    fn test_malformed_expression_without_position() {
        let err = EvalError::MalformedExpression {
            message: Arc::from("empty expression"),
            input: Arc::from(""),
            position: None,
        };
        let msg = err.to_string();
        assert!(!msg.contains("position"));
        assert!(msg.contains("empty expression"));
    }

    #[test]
    fn test_io_error_conversion() {
        let err = EvalError::MalformedExpression {
            message: Arc::from("unbalanced parentheses"),
            input: Arc::from("(a"),
            position: Some(0),
        };
        let io_err: io::Error = err.into();
        assert_eq!(io_err.kind(), io::ErrorKind::InvalidData);

        let io_err: io::Error = EvalError::UnboundLiteral {
            name: Arc::from("x"),
        }
        .into();
        assert_eq!(io_err.kind(), io::ErrorKind::NotFound);
    }
}
