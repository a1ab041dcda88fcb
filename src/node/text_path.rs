//! TextPath node: a string laid out along a path, drawn as one glyph run.

use std::borrow::Cow;

use compact_str::CompactString;
use kurbo::BezPath;

use crate::backend::{Backend, Canvas, Font};
use crate::config::RenderConfig;
use crate::error::{DrawError, DrawResult};
use crate::placement::{Placement, place_glyphs};
use crate::scene::DrawingContext;

use super::derived::{DeriveProps, DrawingNode, NodeProps};
use super::NodeType;

/// Drawing node for text on a path.
pub type TextPathNode<B> =
    DrawingNode<TextPathProps<<B as Backend>::Font>, PlacedText<<B as Backend>::TextBlob>>;

// =============================================================================
// PathSource
// =============================================================================

/// Path geometry as supplied by props.
#[derive(Debug, Clone, PartialEq)]
pub enum PathSource {
    /// SVG path data, parsed at derivation time
    Svg(CompactString),
    Path(BezPath),
}

impl PathSource {
    /// Resolve to a path, parsing SVG data if needed.
    pub fn resolve(&self) -> DrawResult<Cow<'_, BezPath>> {
        match self {
            Self::Svg(data) => BezPath::from_svg(data)
                .map(Cow::Owned)
                .map_err(DrawError::invalid_path),
            Self::Path(path) => Ok(Cow::Borrowed(path)),
        }
    }
}

impl From<BezPath> for PathSource {
    fn from(path: BezPath) -> Self {
        Self::Path(path)
    }
}

impl From<&str> for PathSource {
    fn from(data: &str) -> Self {
        Self::Svg(data.into())
    }
}

// =============================================================================
// TextPathProps
// =============================================================================

/// Props of a text-on-path node.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPathProps<F> {
    pub path: PathSource,
    pub text: CompactString,
    pub font: F,
    /// Starting distance along the first contour
    pub initial_offset: f32,
}

impl<F: Font> TextPathProps<F> {
    pub fn new(path: impl Into<PathSource>, text: impl Into<CompactString>, font: F) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
            font,
            initial_offset: 0.0,
        }
    }

    pub fn with_initial_offset(mut self, offset: f32) -> Self {
        self.initial_offset = offset;
        self
    }
}

/// Derived value of a text-path node: where each glyph went, and the run
/// built from it.
#[derive(Debug, Clone)]
pub struct PlacedText<T> {
    pub placement: Placement,
    pub blob: T,
}

impl<F: Font> NodeProps for TextPathProps<F> {
    const KIND: NodeType = NodeType::TextPath;
}

impl<B: Backend> DeriveProps<B> for TextPathProps<B::Font> {
    type Derived = PlacedText<B::TextBlob>;

    const DERIVED: &'static str = "text blob";

    fn derive_props(
        &self,
        backend: &B,
        config: &RenderConfig,
    ) -> DrawResult<PlacedText<B::TextBlob>> {
        let path = self.path.resolve()?;
        let glyphs = self.font.glyph_ids(&self.text);
        let widths = self.font.glyph_widths(&glyphs);
        let contours = backend.contour_measure_iter(
            &path,
            config.force_closed_contours,
            config.contour_res_scale,
        );

        let placement = place_glyphs(&self.text, &widths, contours, self.initial_offset);
        let blob = backend.text_blob_from_rsxform(&placement.text, &placement.xforms(), &self.font);
        Ok(PlacedText { placement, blob })
    }
}

// =============================================================================
// Drawing
// =============================================================================

impl<F: Font, T> DrawingNode<TextPathProps<F>, PlacedText<T>> {
    /// Draw the glyph run at the origin with the ambient paint.
    ///
    /// Placement is baked into the per-glyph transforms.
    pub fn draw<B>(&self, ctx: &mut DrawingContext<'_, B>) -> DrawResult<()>
    where
        B: Backend<TextBlob = T>,
    {
        let placed = self.require("text blob")?;
        ctx.canvas.draw_text_blob(&placed.blob, 0.0, 0.0, &ctx.paint);
        Ok(())
    }

    /// Placement of the current derived run, if any.
    pub fn placement(&self) -> Option<&Placement> {
        self.derived().map(|placed| &placed.placement)
    }
}
