//! Scene nodes
//!
//! Two families of nodes live in a scene:
//!
//! - **Drawing nodes** (`Group`, `Text`, `TextPath`) hold a props snapshot and
//!   a derived value cached per props version, and draw through a backend.
//! - **Declaration nodes** (`Span`) never draw. A drawing ancestor pulls them
//!   into plain values with `materialize`.
//!
//! Which children an ancestor consumes is decided by matching on
//! [`NodeType::declaration_kind`], not by inspecting concrete node types.

mod derived;
mod group;
mod span;
mod text;
mod text_path;

pub use derived::{DeriveProps, Derived, DrawingNode, NodeProps};
pub use group::{GroupNode, GroupProps, GroupState};
pub use span::{SpanNode, SpanProps};
pub use text::{TextNode, TextProps};
pub use text_path::{PathSource, PlacedText, TextPathNode, TextPathProps};

use std::fmt;

use crate::backend::Backend;
use crate::config::RenderConfig;
use crate::error::{DrawError, DrawResult};
use crate::id::NodeId;

// =============================================================================
// NodeType / DeclarationKind
// =============================================================================

/// Kind tag of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Group,
    Text,
    TextPath,
    Span,
}

/// What a declaration node materializes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Span,
}

impl NodeType {
    /// Display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Group => "Group",
            Self::Text => "Text",
            Self::TextPath => "TextPath",
            Self::Span => "Span",
        }
    }

    /// Declaration kind, or `None` for drawing nodes.
    #[inline]
    pub const fn declaration_kind(self) -> Option<DeclarationKind> {
        match self {
            Self::Span => Some(DeclarationKind::Span),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_drawing(self) -> bool {
        self.declaration_kind().is_none()
    }

    /// Whether a node of this kind may hold a `child` node.
    ///
    /// Drawing nodes hold anything (children they do not consume are
    /// ignored when drawing); spans hold spans only.
    pub const fn accepts_child(self, child: NodeType) -> bool {
        match self {
            Self::Span => matches!(child.declaration_kind(), Some(DeclarationKind::Span)),
            _ => true,
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Props
// =============================================================================

/// Props of any node kind, as supplied by the UI layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Props<F> {
    Group(GroupProps),
    Text(TextProps),
    TextPath(TextPathProps<F>),
    Span(SpanProps),
}

impl<F> Props<F> {
    /// Kind of node these props construct.
    pub fn node_type(&self) -> NodeType {
        match self {
            Self::Group(_) => NodeType::Group,
            Self::Text(_) => NodeType::Text,
            Self::TextPath(_) => NodeType::TextPath,
            Self::Span(_) => NodeType::Span,
        }
    }
}

impl<F> From<GroupProps> for Props<F> {
    fn from(props: GroupProps) -> Self {
        Self::Group(props)
    }
}

impl<F> From<TextProps> for Props<F> {
    fn from(props: TextProps) -> Self {
        Self::Text(props)
    }
}

impl<F> From<TextPathProps<F>> for Props<F> {
    fn from(props: TextPathProps<F>) -> Self {
        Self::TextPath(props)
    }
}

impl<F> From<SpanProps> for Props<F> {
    fn from(props: SpanProps) -> Self {
        Self::Span(props)
    }
}

// =============================================================================
// Node
// =============================================================================

/// A node of a scene over backend `B`.
pub enum Node<B: Backend> {
    Group(GroupNode),
    Text(TextNode),
    TextPath(TextPathNode<B>),
    Span(SpanNode),
}

impl<B: Backend> Node<B> {
    /// Construct the node kind matching `props`.
    pub fn new(props: Props<B::Font>) -> Self {
        match props {
            Props::Group(p) => Self::Group(DrawingNode::new(p)),
            Props::Text(p) => Self::Text(DrawingNode::new(p)),
            Props::TextPath(p) => Self::TextPath(DrawingNode::new(p)),
            Props::Span(p) => Self::Span(SpanNode::new(p)),
        }
    }

    impl_enum_accessors!(
        group: GroupNode,
        text: TextNode,
        text_path: TextPathNode<B>,
        span: SpanNode,
    );

    pub fn node_type(&self) -> NodeType {
        match self {
            Self::Group(_) => NodeType::Group,
            Self::Text(_) => NodeType::Text,
            Self::TextPath(_) => NodeType::TextPath,
            Self::Span(_) => NodeType::Span,
        }
    }

    #[inline]
    pub fn declaration_kind(&self) -> Option<DeclarationKind> {
        self.node_type().declaration_kind()
    }

    /// Props version of the node.
    pub fn version(&self) -> u64 {
        match self {
            Self::Group(n) => n.version(),
            Self::Text(n) => n.version(),
            Self::TextPath(n) => n.version(),
            Self::Span(n) => n.version(),
        }
    }

    /// Replace the props of node `id` wholesale.
    ///
    /// Returns whether they changed; props of another kind are rejected.
    pub fn set_props(&mut self, id: NodeId, props: Props<B::Font>) -> DrawResult<bool> {
        match (self, props) {
            (Self::Group(n), Props::Group(p)) => Ok(n.set_props(p)),
            (Self::Text(n), Props::Text(p)) => Ok(n.set_props(p)),
            (Self::TextPath(n), Props::TextPath(p)) => Ok(n.set_props(p)),
            (Self::Span(n), Props::Span(p)) => Ok(n.set_props(p)),
            (node, props) => Err(DrawError::KindMismatch {
                node: id,
                expected: node.node_type(),
                found: props.node_type(),
            }),
        }
    }

    /// Derive for the current props unless already cached.
    ///
    /// Declaration nodes have nothing to derive.
    pub fn refresh(&mut self, backend: &B, config: &RenderConfig) -> DrawResult<bool> {
        match self {
            Self::Group(n) => n.refresh(backend, config),
            Self::Text(n) => n.refresh(backend, config),
            Self::TextPath(n) => n.refresh(backend, config),
            Self::Span(_) => Ok(false),
        }
    }

    /// Number of derivations this node has run.
    pub fn derivation_count(&self) -> u64 {
        match self {
            Self::Group(n) => n.derivation_count(),
            Self::Text(n) => n.derivation_count(),
            Self::TextPath(n) => n.derivation_count(),
            Self::Span(_) => 0,
        }
    }

    /// Whether this is a span carrying literal text.
    pub fn is_text_span(&self) -> bool {
        self.as_span().is_some_and(|n| n.props().has_text())
    }
}

impl<B: Backend> fmt::Debug for Node<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("kind", &self.node_type())
            .field("version", &self.version())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_kind() {
        assert_eq!(NodeType::Span.declaration_kind(), Some(DeclarationKind::Span));
        assert!(NodeType::Text.is_drawing());
        assert!(NodeType::Group.is_drawing());
        assert!(!NodeType::Span.is_drawing());
    }

    #[test]
    fn test_accepts_child() {
        assert!(NodeType::Span.accepts_child(NodeType::Span));
        assert!(!NodeType::Span.accepts_child(NodeType::Text));
        assert!(NodeType::Text.accepts_child(NodeType::Span));
        assert!(NodeType::Group.accepts_child(NodeType::TextPath));
    }

    #[test]
    fn test_props_node_type() {
        let props: Props<()> = SpanProps::text("a").into();
        assert_eq!(props.node_type(), NodeType::Span);
        let props: Props<()> = TextProps::new(10.0).into();
        assert_eq!(props.node_type(), NodeType::Text);
        assert_eq!(NodeType::TextPath.to_string(), "TextPath");
    }
}

#[cfg(all(test, feature = "recording"))]
mod recording_tests {
    use super::*;
    use crate::backend::recording::RecordingBackend;

    #[test]
    fn test_set_props_kind_mismatch() {
        let mut node = Node::<RecordingBackend>::new(TextProps::new(10.0).into());
        let id = NodeId::from_raw(1);
        assert!(!node.set_props(id, TextProps::new(10.0).into()).unwrap());

        let err = node.set_props(id, SpanProps::new().into()).unwrap_err();
        assert!(matches!(
            err,
            DrawError::KindMismatch {
                expected: NodeType::Text,
                found: NodeType::Span,
                ..
            }
        ));
    }

    #[test]
    fn test_accessors() {
        let mut node = Node::<RecordingBackend>::new(GroupProps::new().into());
        assert!(node.is_group());
        assert!(node.as_text().is_none());
        assert!(node.as_group_mut().is_some());
        assert_eq!(node.declaration_kind(), None);
    }
}
