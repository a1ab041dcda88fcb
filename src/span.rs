//! Materialized span values
//!
//! A [`Span`] is the plain value a span declaration node turns into when its
//! drawing ancestor pulls it. Text and nested spans are mutually exclusive,
//! which [`SpanContent`] encodes directly.

use compact_str::CompactString;

use crate::style::{Paint, TextStyle};

/// What a span contributes inside its scope.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SpanContent {
    #[default]
    Empty,
    Text(CompactString),
    Children(Vec<Span>),
}

/// One styled run of text, possibly containing nested runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Span {
    content: SpanContent,
    /// Foreground paint override
    pub foreground: Option<Paint>,
    /// Background paint override
    pub background: Option<Paint>,
    /// Sparse style override; `None` when no style attribute was given
    pub style: Option<TextStyle>,
}

impl Span {
    /// Span holding literal text.
    pub fn text(text: impl Into<CompactString>) -> Self {
        Self {
            content: SpanContent::Text(text.into()),
            ..Self::default()
        }
    }

    /// Span grouping nested spans.
    pub fn group(children: impl IntoIterator<Item = Span>) -> Self {
        Self {
            content: SpanContent::Children(children.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Build from optional text and nested spans.
    ///
    /// Non-empty text wins; otherwise non-empty children; otherwise empty.
    /// Callers are expected to have rejected spans holding both.
    pub fn from_parts(text: Option<&str>, children: Vec<Span>) -> Self {
        let content = match text {
            Some(text) if !text.is_empty() => SpanContent::Text(text.into()),
            _ if !children.is_empty() => SpanContent::Children(children),
            _ => SpanContent::Empty,
        };
        Self {
            content,
            ..Self::default()
        }
    }

    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = (!style.is_empty()).then_some(style);
        self
    }

    pub fn with_foreground(mut self, paint: Paint) -> Self {
        self.foreground = Some(paint);
        self
    }

    pub fn with_background(mut self, paint: Paint) -> Self {
        self.background = Some(paint);
        self
    }

    #[inline]
    pub fn content(&self) -> &SpanContent {
        &self.content
    }

    /// Literal text, if this is a text span.
    pub fn as_text(&self) -> Option<&str> {
        match &self.content {
            SpanContent::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Nested spans (empty for text spans).
    pub fn children(&self) -> &[Span] {
        match &self.content {
            SpanContent::Children(children) => children,
            _ => &[],
        }
    }

    /// Whether a foreground or background paint is set.
    #[inline]
    pub fn has_paint(&self) -> bool {
        self.foreground.is_some() || self.background.is_some()
    }

    /// Whether this span opens a builder scope.
    #[inline]
    pub fn opens_scope(&self) -> bool {
        self.has_paint() || self.style.is_some()
    }

    /// Concatenated text of the whole span tree.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, buf: &mut String) {
        match &self.content {
            SpanContent::Text(text) => buf.push_str(text),
            SpanContent::Children(children) => {
                for child in children {
                    child.collect_text(buf);
                }
            }
            SpanContent::Empty => {}
        }
    }

    /// Number of scopes this span tree opens.
    pub fn scope_count(&self) -> usize {
        usize::from(self.opens_scope()) + self.children().iter().map(Span::scope_count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;

    #[test]
    fn test_text_and_children_are_exclusive() {
        let span = Span::from_parts(Some("hi"), vec![Span::text("ignored")]);
        assert_eq!(span.as_text(), Some("hi"));
        assert!(span.children().is_empty());

        let span = Span::from_parts(Some(""), vec![Span::text("a")]);
        assert_eq!(span.as_text(), None);
        assert_eq!(span.children().len(), 1);

        assert_eq!(Span::from_parts(None, Vec::new()).content(), &SpanContent::Empty);
    }

    #[test]
    fn test_empty_style_is_dropped() {
        let span = Span::text("x").with_style(TextStyle::new());
        assert!(span.style.is_none());
        assert!(!span.opens_scope());
    }

    #[test]
    fn test_plain_text_and_scope_count() {
        let span = Span::group([
            Span::text("Hello ").with_style(TextStyle::new().with_font_size(20.0)),
            Span::group([Span::text("wor"), Span::text("ld")])
                .with_foreground(Paint::new(Color::WHITE)),
        ]);
        assert_eq!(span.plain_text(), "Hello world");
        assert_eq!(span.scope_count(), 2);
    }
}
