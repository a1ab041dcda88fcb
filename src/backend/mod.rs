//! Drawing backend capabilities
//!
//! The scene never rasterizes. Everything it produces is a sequence of calls
//! on these traits: paragraph builders for styled text, contour measurement
//! for text on paths, transformed glyph runs, and canvas draw operations.
//!
//! A backend is a stateless factory ([`Backend`]) plus the objects it hands
//! out. Builders, paragraphs and the canvas belong to the draw pass that
//! created or received them.

use std::fmt::Debug;

use kurbo::{Affine, BezPath, Point, Vec2};

use crate::style::{Paint, ParagraphStyle, TextStyle};

#[cfg(feature = "recording")]
pub mod recording;

/// Glyph identifier within a font.
pub type GlyphId = u16;

// =============================================================================
// RsxForm
// =============================================================================

/// Per-glyph rotation/scale + translation.
///
/// Maps glyph space to canvas space as
/// `[scos -ssin tx; ssin scos ty]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RsxForm {
    pub scos: f32,
    pub ssin: f32,
    pub tx: f32,
    pub ty: f32,
}

impl RsxForm {
    pub const fn new(scos: f32, ssin: f32, tx: f32, ty: f32) -> Self {
        Self { scos, ssin, tx, ty }
    }

    /// Translation part of the transform.
    #[inline]
    pub fn translation(&self) -> Point {
        Point::new(f64::from(self.tx), f64::from(self.ty))
    }

    /// Rotation angle in radians.
    #[inline]
    pub fn angle(&self) -> f32 {
        self.ssin.atan2(self.scos)
    }

    /// Equivalent affine transform.
    pub fn to_affine(&self) -> Affine {
        Affine::new([
            f64::from(self.scos),
            f64::from(self.ssin),
            -f64::from(self.ssin),
            f64::from(self.scos),
            f64::from(self.tx),
            f64::from(self.ty),
        ])
    }
}

// =============================================================================
// Capability traits
// =============================================================================

/// Font object: glyph lookup and advance measurement.
///
/// Fonts are compared by value so that props holding them can be diffed.
pub trait Font: Clone + PartialEq + Debug {
    /// One glyph id per Unicode scalar value of `text`.
    fn glyph_ids(&self, text: &str) -> Vec<GlyphId>;

    /// Advance width of each glyph.
    fn glyph_widths(&self, glyphs: &[GlyphId]) -> Vec<f32>;
}

/// Arc-length measurement of one contour of a path.
pub trait ContourMeasure {
    /// Total length of the contour.
    fn length(&self) -> f64;

    /// Position and unit tangent at `distance` along the contour.
    ///
    /// Distances outside `[0, length]` are clamped. Returns `None` only for
    /// a contour that cannot be sampled at all.
    fn pos_tan(&self, distance: f64) -> Option<(Point, Vec2)>;
}

/// Incremental builder of a styled paragraph.
///
/// Every `push_*` must be matched by exactly one [`pop`](Self::pop).
pub trait ParagraphBuilder {
    type Paragraph: Paragraph;

    /// Push a text style scope.
    fn push_style(&mut self, style: &TextStyle);

    /// Push a text style scope with explicit foreground/background paints.
    fn push_paint_style(
        &mut self,
        style: &TextStyle,
        foreground: Option<&Paint>,
        background: Option<&Paint>,
    );

    /// Pop the innermost scope.
    fn pop(&mut self);

    /// Append a run of text in the current scope.
    fn add_text(&mut self, text: &str);

    /// Finish construction.
    fn build(self) -> Self::Paragraph;
}

/// Built paragraph, ready for layout.
pub trait Paragraph {
    /// Break lines for the given width.
    fn layout(&mut self, width: f32);
}

/// Drawing surface.
pub trait Canvas {
    type Paragraph;
    type TextBlob;

    fn save(&mut self);
    fn restore(&mut self);
    fn concat(&mut self, transform: Affine);

    /// Draw a laid-out paragraph with its top-left corner at `(x, y)`.
    fn draw_paragraph(&mut self, paragraph: &Self::Paragraph, x: f32, y: f32);

    /// Draw a glyph run offset by `(x, y)`.
    fn draw_text_blob(&mut self, blob: &Self::TextBlob, x: f32, y: f32, paint: &Paint);
}

/// Factory for every backend object the scene consumes.
pub trait Backend {
    type Font: Font;
    /// Typeface source handed to paragraph builders
    type FontProvider;
    type Paragraph: Paragraph;
    type ParagraphBuilder: ParagraphBuilder<Paragraph = Self::Paragraph>;
    type TextBlob: Debug;
    type Contour: ContourMeasure;
    type Contours: Iterator<Item = Self::Contour>;
    type Canvas: Canvas<Paragraph = Self::Paragraph, TextBlob = Self::TextBlob>;

    /// Start a paragraph with the given root style.
    fn paragraph_builder(
        &self,
        style: &ParagraphStyle,
        fonts: &Self::FontProvider,
    ) -> Self::ParagraphBuilder;

    /// Iterate the measurable contours of `path`.
    fn contour_measure_iter(&self, path: &BezPath, force_closed: bool, res_scale: f64)
    -> Self::Contours;

    /// Build one glyph run from `text` with one transform per glyph.
    fn text_blob_from_rsxform(&self, text: &str, xforms: &[RsxForm], font: &Self::Font)
    -> Self::TextBlob;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsxform_affine() {
        let xform = RsxForm::new(0.0, 1.0, 5.0, 6.0);
        let mapped = xform.to_affine() * Point::new(1.0, 0.0);
        assert!((mapped.x - 5.0).abs() < 1e-9);
        assert!((mapped.y - 7.0).abs() < 1e-9);
        assert!((xform.angle() - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert_eq!(xform.translation(), Point::new(5.0, 6.0));
    }
}
