//! Error types for canvas-dom.
//!
//! Contract violations (drawing a node whose derived value is missing, building
//! an invalid tree) and malformed prop values. Running out of path while placing
//! glyphs is not an error and never shows up here.

use thiserror::Error;

use crate::id::NodeId;
use crate::node::NodeType;

/// Errors that can occur while building, deriving or drawing a scene.
#[derive(Debug, Error)]
pub enum DrawError {
    /// A drawing node was drawn before its derived value was computed
    /// for the current props.
    #[error("{kind}: {what} is undefined")]
    NotDerived {
        /// Kind of the offending node
        kind: NodeType,
        /// Name of the missing derived value
        what: &'static str,
    },

    /// SVG path data could not be parsed
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// Color string could not be parsed
    #[error("invalid color: {0:?}")]
    InvalidColor(String),

    /// String-keyed enum prop has no matching variant
    #[error("unknown {prop} value: {value:?}")]
    UnknownValue {
        /// Prop name (e.g. `textAlign`)
        prop: &'static str,
        /// Offending value
        value: String,
    },

    /// Node id is not (or no longer) part of the scene
    #[error("node {0} does not exist")]
    UnknownNode(NodeId),

    /// Props of a different node kind were supplied on update
    #[error("node {node} is a {expected} node, got {found} props")]
    KindMismatch {
        /// Updated node
        node: NodeId,
        /// Kind of the existing node
        expected: NodeType,
        /// Kind of the supplied props
        found: NodeType,
    },

    /// Child kind is not accepted by the parent kind
    #[error("{parent} nodes cannot hold {child} children")]
    InvalidChild {
        /// Kind of the parent node
        parent: NodeType,
        /// Kind of the rejected child
        child: NodeType,
    },

    /// A span would carry both literal text and child spans
    #[error("span {0} cannot have both text and children")]
    SpanConflict(NodeId),

    /// Attaching the child would create a cycle
    #[error("attaching {child} under {parent} would create a cycle")]
    Cycle {
        /// Prospective parent
        parent: NodeId,
        /// Prospective child
        child: NodeId,
    },

    /// Child already has a parent
    #[error("node {0} is already attached")]
    AlreadyAttached(NodeId),

    /// Node is not a child of the given parent
    #[error("node {child} is not a child of {parent}")]
    NotAChild {
        /// Supposed parent
        parent: NodeId,
        /// Node that was not found under it
        child: NodeId,
    },
}

/// Result type alias for scene operations.
pub type DrawResult<T> = Result<T, DrawError>;

impl DrawError {
    /// Create a path error from any parse error.
    pub fn invalid_path(err: impl std::error::Error) -> Self {
        Self::InvalidPath(err.to_string())
    }

    /// Create an unknown-value error for a string-keyed prop.
    pub fn unknown_value(prop: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownValue {
            prop,
            value: value.into(),
        }
    }

    /// Whether this error is a tree or drawing contract violation rather
    /// than a malformed prop value.
    pub fn is_contract_violation(&self) -> bool {
        !matches!(
            self,
            Self::InvalidPath(_) | Self::InvalidColor(_) | Self::UnknownValue { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DrawError::NotDerived {
            kind: NodeType::Text,
            what: "paragraph style",
        };
        assert_eq!(err.to_string(), "Text: paragraph style is undefined");

        let err = DrawError::unknown_value("textAlign", "middle");
        assert_eq!(err.to_string(), "unknown textAlign value: \"middle\"");

        let err = DrawError::InvalidChild {
            parent: NodeType::Span,
            child: NodeType::Group,
        };
        assert_eq!(err.to_string(), "Span nodes cannot hold Group children");
    }

    #[test]
    fn test_contract_violation_classification() {
        assert!(DrawError::UnknownNode(NodeId::from_raw(3)).is_contract_violation());
        assert!(!DrawError::InvalidColor("#zz".into()).is_contract_violation());
    }

    #[test]
    fn test_error_is_send_sync() {
        static_assertions::assert_impl_all!(DrawError: Send, Sync);
    }
}
