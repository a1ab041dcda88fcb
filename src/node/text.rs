//! Text node: a paragraph composed from span children.

use compact_str::CompactString;

use crate::backend::{Backend, Canvas, Paragraph, ParagraphBuilder};
use crate::config::{RenderConfig, SpanScopePolicy};
use crate::error::DrawResult;
use crate::paragraph::{ScopeStats, compose_spans};
use crate::scene::DrawingContext;
use crate::span::Span;
use crate::style::{
    ParagraphStyle, StrutStyle, TextAlign, TextDirection, TextHeightBehavior, TextStyle,
};

use super::derived::{DeriveProps, DrawingNode, NodeProps};
use super::NodeType;

/// Drawing node that lays out its span children as one paragraph.
pub type TextNode = DrawingNode<TextProps, ParagraphStyle>;

// =============================================================================
// TextProps
// =============================================================================

/// Props of a text node.
///
/// Position defaults to the origin. Paragraph-level fields left unset are
/// omitted from the derived style so the backend defaults apply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextProps {
    pub x: f32,
    pub y: f32,
    /// Layout width
    pub width: f32,
    pub text_align: Option<TextAlign>,
    pub text_direction: Option<TextDirection>,
    pub text_height_behavior: Option<TextHeightBehavior>,
    pub max_lines: Option<u32>,
    pub ellipsis: Option<CompactString>,
    pub height_multiplier: Option<f32>,
    pub disable_hinting: Option<bool>,
    pub strut_style: Option<StrutStyle>,
    /// Root text style of the paragraph
    pub style: TextStyle,
}

impl TextProps {
    /// Text laid out at `width`, positioned at the origin.
    pub fn new(width: f32) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn with_text_align(mut self, align: TextAlign) -> Self {
        self.text_align = Some(align);
        self
    }

    pub fn with_text_direction(mut self, direction: TextDirection) -> Self {
        self.text_direction = Some(direction);
        self
    }

    pub fn with_max_lines(mut self, max_lines: u32) -> Self {
        self.max_lines = Some(max_lines);
        self
    }

    pub fn with_ellipsis(mut self, ellipsis: impl Into<CompactString>) -> Self {
        self.ellipsis = Some(ellipsis.into());
        self
    }

    pub fn with_strut_style(mut self, strut: StrutStyle) -> Self {
        self.strut_style = Some(strut);
        self
    }

    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    /// Paragraph style for these props.
    pub fn paragraph_style(&self) -> ParagraphStyle {
        ParagraphStyle {
            disable_hinting: self.disable_hinting,
            ellipsis: self.ellipsis.clone().filter(|e| !e.is_empty()),
            height_multiplier: self.height_multiplier,
            max_lines: self.max_lines,
            strut_style: self.strut_style.clone().filter(|s| !s.is_empty()),
            text_align: self.text_align,
            text_direction: self.text_direction,
            text_height_behavior: self.text_height_behavior,
            text_style: self.style.clone(),
        }
    }
}

impl NodeProps for TextProps {
    const KIND: NodeType = NodeType::Text;
}

impl<B: Backend> DeriveProps<B> for TextProps {
    type Derived = ParagraphStyle;

    const DERIVED: &'static str = "paragraph style";

    fn derive_props(&self, _backend: &B, _config: &RenderConfig) -> DrawResult<ParagraphStyle> {
        Ok(self.paragraph_style())
    }
}

// =============================================================================
// Drawing
// =============================================================================

impl DrawingNode<TextProps, ParagraphStyle> {
    /// Build, lay out and draw the paragraph for `spans`.
    ///
    /// Fails with `NotDerived` when the paragraph style is missing or stale.
    pub fn draw<B: Backend>(
        &self,
        backend: &B,
        ctx: &mut DrawingContext<'_, B>,
        spans: &[Span],
        policy: SpanScopePolicy,
    ) -> DrawResult<ScopeStats> {
        let style = self.require("paragraph style")?;
        let props = self.props();

        let mut builder = backend.paragraph_builder(style, ctx.fonts);
        let stats = compose_spans(&mut builder, &style.text_style, spans, policy);
        let mut paragraph = builder.build();
        paragraph.layout(props.width);
        ctx.canvas.draw_paragraph(&paragraph, props.x, props.y);
        Ok(stats)
    }
}

#[cfg(all(test, feature = "recording"))]
mod tests {
    use super::*;
    use crate::backend::recording::{Call, RecordingBackend};
    use crate::error::DrawError;
    use crate::style::Color;

    fn props() -> TextProps {
        TextProps::new(200.0)
            .at(10.0, 20.0)
            .with_text_align(TextAlign::Center)
            .with_style(TextStyle::new().with_font_size(18.0).with_color(Color::BLACK))
    }

    #[test]
    fn test_derivation_is_idempotent() {
        let backend = RecordingBackend::new();
        let config = RenderConfig::default();
        let props = props();
        let a = DeriveProps::<RecordingBackend>::derive_props(&props, &backend, &config).unwrap();
        let b = DeriveProps::<RecordingBackend>::derive_props(&props, &backend, &config).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.text_align, Some(TextAlign::Center));
        assert_eq!(a.text_style.font_size, Some(18.0));
        assert_eq!(a.max_lines, None);
        assert_eq!(a.strut_style, None);
    }

    #[test]
    fn test_empty_strut_is_omitted() {
        let style = TextProps::new(10.0)
            .with_strut_style(StrutStyle::new())
            .paragraph_style();
        assert!(style.strut_style.is_none());
    }

    #[test]
    fn test_empty_ellipsis_is_omitted() {
        let style = TextProps::new(10.0).with_ellipsis("").paragraph_style();
        assert!(style.ellipsis.is_none());

        let style = TextProps::new(10.0).with_max_lines(1).with_ellipsis("…").paragraph_style();
        assert_eq!(style.ellipsis.as_deref(), Some("…"));
        assert_eq!(style.max_lines, Some(1));
    }

    #[test]
    fn test_set_props_bumps_version_only_on_change() {
        let mut node = TextNode::new(props());
        assert!(!node.set_props(props()));
        assert_eq!(node.version(), 0);
        assert!(node.set_props(props().with_max_lines(2)));
        assert_eq!(node.version(), 1);
    }

    #[test]
    fn test_draw_before_derive_fails() {
        let backend = RecordingBackend::new();
        let node = TextNode::new(props());
        let mut canvas = backend.canvas();
        let mut ctx = DrawingContext::<RecordingBackend>::new(&mut canvas, &());
        let err = node
            .draw(&backend, &mut ctx, &[], SpanScopePolicy::default())
            .unwrap_err();
        assert!(matches!(err, DrawError::NotDerived { kind: NodeType::Text, .. }));
        assert_eq!(err.to_string(), "Text: paragraph style is undefined");
        assert!(backend.log().calls().is_empty());
    }

    #[test]
    fn test_stale_derivation_is_not_drawn() {
        let backend = RecordingBackend::new();
        let config = RenderConfig::default();
        let mut node = TextNode::new(props());
        node.refresh(&backend, &config).unwrap();
        node.set_props(props().with_max_lines(1));
        assert!(node.derived().is_none());
        assert!(node.require("paragraph style").is_err());
    }

    #[test]
    fn test_draw_sequence() {
        let backend = RecordingBackend::new();
        let mut node = TextNode::new(props());
        node.refresh(&backend, &RenderConfig::default()).unwrap();

        let mut canvas = backend.canvas();
        let mut ctx = DrawingContext::<RecordingBackend>::new(&mut canvas, &());
        node.draw(&backend, &mut ctx, &[Span::text("Hi")], SpanScopePolicy::default())
            .unwrap();

        let calls = backend.log().calls();
        assert_eq!(
            calls,
            vec![
                Call::AddText("Hi".into()),
                Call::Build,
                Call::Layout(200.0),
                Call::DrawParagraph { x: 10.0, y: 20.0 },
            ]
        );
    }
}
