//! Span declaration node.

use compact_str::CompactString;

use crate::span::Span;
use crate::style::{Paint, TextStyle};

use super::derived::NodeProps;
use super::NodeType;

/// Props of a span declaration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpanProps {
    pub text: Option<CompactString>,
    pub foreground_paint: Option<Paint>,
    pub background_paint: Option<Paint>,
    /// Sparse style override; empty means "no style attribute"
    pub style: TextStyle,
}

impl SpanProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(text: impl Into<CompactString>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn with_foreground(mut self, paint: Paint) -> Self {
        self.foreground_paint = Some(paint);
        self
    }

    pub fn with_background(mut self, paint: Paint) -> Self {
        self.background_paint = Some(paint);
        self
    }

    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    /// Whether the span carries non-empty literal text.
    #[inline]
    pub fn has_text(&self) -> bool {
        self.text.as_deref().is_some_and(|t| !t.is_empty())
    }
}

impl NodeProps for SpanProps {
    const KIND: NodeType = NodeType::Span;
}

/// Declaration node producing a [`Span`] for its drawing ancestor.
///
/// Spans are cheap to rebuild and are materialized on every pull.
#[derive(Debug, Clone)]
pub struct SpanNode {
    props: SpanProps,
    version: u64,
}

impl SpanNode {
    pub fn new(props: SpanProps) -> Self {
        Self { props, version: 0 }
    }

    #[inline]
    pub fn props(&self) -> &SpanProps {
        &self.props
    }

    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Replace the props wholesale. Returns whether they differed.
    pub fn set_props(&mut self, props: SpanProps) -> bool {
        if self.props.same_snapshot(&props) {
            return false;
        }
        self.props = props;
        self.version += 1;
        true
    }

    /// Build the span value from these props and already materialized
    /// child spans.
    pub fn materialize(&self, children: Vec<Span>) -> Span {
        let props = &self.props;
        let mut span =
            Span::from_parts(props.text.as_deref(), children).with_style(props.style.clone());
        span.foreground = props.foreground_paint;
        span.background = props.background_paint;
        span
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;

    #[test]
    fn test_materialize_text_span() {
        let node = SpanNode::new(
            SpanProps::text("Hi").with_foreground(Paint::new(Color::WHITE)),
        );
        let span = node.materialize(Vec::new());
        assert_eq!(span.as_text(), Some("Hi"));
        assert_eq!(span.foreground, Some(Paint::new(Color::WHITE)));
        assert!(span.background.is_none());
        assert!(span.style.is_none());
    }

    #[test]
    fn test_materialize_with_children_and_style() {
        let node = SpanNode::new(SpanProps::new().with_style(TextStyle::new().with_font_size(12.0)));
        let span = node.materialize(vec![Span::text("a"), Span::text("b")]);
        assert_eq!(span.children().len(), 2);
        assert_eq!(span.plain_text(), "ab");
        assert_eq!(span.style.as_ref().and_then(|s| s.font_size), Some(12.0));
    }

    #[test]
    fn test_has_text() {
        assert!(SpanProps::text("x").has_text());
        assert!(!SpanProps::text("").has_text());
        assert!(!SpanProps::new().has_text());
    }
}
