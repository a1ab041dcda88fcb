//! In-memory backend that records every call.
//!
//! Nothing is rasterized. Paragraph builders, paragraphs and canvases append
//! a [`Call`] to a shared [`CallLog`], so hosts and tests can inspect the exact
//! instruction stream a scene produced. Contour measurement goes through
//! [`PathContours`].

use std::sync::Arc;

use compact_str::CompactString;
use kurbo::{Affine, BezPath};
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use crate::measure::{Contour, PathContours};
use crate::style::{Paint, ParagraphStyle, TextStyle};

use super::{Backend, Canvas, Font, GlyphId, Paragraph, ParagraphBuilder, RsxForm};

// =============================================================================
// Call log
// =============================================================================

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    PushStyle(TextStyle),
    PushPaintStyle {
        style: TextStyle,
        foreground: Option<Paint>,
        background: Option<Paint>,
    },
    Pop,
    AddText(CompactString),
    Build,
    Layout(f32),
    DrawParagraph { x: f32, y: f32 },
    DrawTextBlob {
        text: CompactString,
        x: f32,
        y: f32,
        paint: Paint,
    },
    Save,
    Restore,
    Concat(Affine),
}

/// Shared, append-only list of calls.
///
/// Cloning yields another handle to the same log.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    inner: Arc<Mutex<Vec<Call>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, call: Call) {
        self.inner.lock().push(call);
    }

    /// Snapshot of the calls so far.
    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().clone()
    }

    /// Remove and return every recorded call.
    pub fn take(&self) -> Vec<Call> {
        std::mem::take(&mut *self.inner.lock())
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Number of recorded calls matching `pred`.
    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.inner.lock().iter().filter(|c| pred(c)).count()
    }
}

// =============================================================================
// Font
// =============================================================================

/// Font with a default advance and optional per-character overrides.
///
/// Glyph ids are the character's code point truncated to 16 bits.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingFont {
    advance: f32,
    overrides: FxHashMap<GlyphId, f32>,
}

impl RecordingFont {
    /// Monospace font where every glyph advances by `advance`.
    pub fn mono(advance: f32) -> Self {
        Self {
            advance,
            overrides: FxHashMap::default(),
        }
    }

    /// Override the advance of one character.
    pub fn with_advance(mut self, ch: char, advance: f32) -> Self {
        self.overrides.insert(Self::glyph_id(ch), advance);
        self
    }

    fn glyph_id(ch: char) -> GlyphId {
        (u32::from(ch) & 0xFFFF) as GlyphId
    }
}

impl Font for RecordingFont {
    fn glyph_ids(&self, text: &str) -> Vec<GlyphId> {
        text.chars().map(Self::glyph_id).collect()
    }

    fn glyph_widths(&self, glyphs: &[GlyphId]) -> Vec<f32> {
        glyphs
            .iter()
            .map(|g| self.overrides.get(g).copied().unwrap_or(self.advance))
            .collect()
    }
}

// =============================================================================
// Paragraphs
// =============================================================================

/// Paragraph builder that records its calls.
#[derive(Debug)]
pub struct RecordingParagraphBuilder {
    log: CallLog,
    style: ParagraphStyle,
    text: String,
    depth: usize,
}

impl RecordingParagraphBuilder {
    /// Open scopes.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl ParagraphBuilder for RecordingParagraphBuilder {
    type Paragraph = RecordingParagraph;

    fn push_style(&mut self, style: &TextStyle) {
        self.depth += 1;
        self.log.push(Call::PushStyle(style.clone()));
    }

    fn push_paint_style(
        &mut self,
        style: &TextStyle,
        foreground: Option<&Paint>,
        background: Option<&Paint>,
    ) {
        self.depth += 1;
        self.log.push(Call::PushPaintStyle {
            style: style.clone(),
            foreground: foreground.copied(),
            background: background.copied(),
        });
    }

    fn pop(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.log.push(Call::Pop);
    }

    fn add_text(&mut self, text: &str) {
        self.text.push_str(text);
        self.log.push(Call::AddText(text.into()));
    }

    fn build(self) -> RecordingParagraph {
        self.log.push(Call::Build);
        RecordingParagraph {
            log: self.log,
            style: self.style,
            text: self.text,
            width: None,
        }
    }
}

/// Built paragraph.
#[derive(Debug)]
pub struct RecordingParagraph {
    log: CallLog,
    style: ParagraphStyle,
    text: String,
    width: Option<f32>,
}

impl RecordingParagraph {
    /// Concatenated text runs.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> &ParagraphStyle {
        &self.style
    }

    /// Width of the last layout.
    pub fn width(&self) -> Option<f32> {
        self.width
    }
}

impl Paragraph for RecordingParagraph {
    fn layout(&mut self, width: f32) {
        self.width = Some(width);
        self.log.push(Call::Layout(width));
    }
}

// =============================================================================
// Text blob / canvas
// =============================================================================

/// Glyph run with one transform per glyph.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingBlob {
    pub text: CompactString,
    pub xforms: Vec<RsxForm>,
}

/// Canvas that records draw calls.
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    log: CallLog,
}

impl Canvas for RecordingCanvas {
    type Paragraph = RecordingParagraph;
    type TextBlob = RecordingBlob;

    fn save(&mut self) {
        self.log.push(Call::Save);
    }

    fn restore(&mut self) {
        self.log.push(Call::Restore);
    }

    fn concat(&mut self, transform: Affine) {
        self.log.push(Call::Concat(transform));
    }

    fn draw_paragraph(&mut self, _paragraph: &RecordingParagraph, x: f32, y: f32) {
        self.log.push(Call::DrawParagraph { x, y });
    }

    fn draw_text_blob(&mut self, blob: &RecordingBlob, x: f32, y: f32, paint: &Paint) {
        self.log.push(Call::DrawTextBlob {
            text: blob.text.clone(),
            x,
            y,
            paint: *paint,
        });
    }
}

// =============================================================================
// RecordingBackend
// =============================================================================

/// Backend whose every object writes to one [`CallLog`].
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    log: CallLog,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn log(&self) -> &CallLog {
        &self.log
    }

    /// Canvas recording into this backend's log.
    pub fn canvas(&self) -> RecordingCanvas {
        RecordingCanvas {
            log: self.log.clone(),
        }
    }
}

impl Backend for RecordingBackend {
    type Font = RecordingFont;
    type FontProvider = ();
    type Paragraph = RecordingParagraph;
    type ParagraphBuilder = RecordingParagraphBuilder;
    type TextBlob = RecordingBlob;
    type Contour = Contour;
    type Contours = PathContours;
    type Canvas = RecordingCanvas;

    fn paragraph_builder(&self, style: &ParagraphStyle, _fonts: &()) -> RecordingParagraphBuilder {
        RecordingParagraphBuilder {
            log: self.log.clone(),
            style: style.clone(),
            text: String::new(),
            depth: 0,
        }
    }

    fn contour_measure_iter(&self, path: &BezPath, force_closed: bool, res_scale: f64) -> PathContours {
        PathContours::new(path.clone(), force_closed, res_scale)
    }

    fn text_blob_from_rsxform(&self, text: &str, xforms: &[RsxForm], _font: &RecordingFont) -> RecordingBlob {
        RecordingBlob {
            text: text.into(),
            xforms: xforms.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_widths() {
        let font = RecordingFont::mono(10.0).with_advance('i', 4.0);
        let ids = font.glyph_ids("hi!");
        assert_eq!(ids.len(), 3);
        assert_eq!(font.glyph_widths(&ids), vec![10.0, 4.0, 10.0]);
    }

    #[test]
    fn test_builder_records_and_tracks_depth() {
        let backend = RecordingBackend::new();
        let mut builder = backend.paragraph_builder(&ParagraphStyle::default(), &());
        builder.push_style(&TextStyle::new());
        builder.add_text("a");
        assert_eq!(builder.depth(), 1);
        builder.pop();
        builder.add_text("b");
        let mut paragraph = builder.build();
        paragraph.layout(50.0);

        assert_eq!(paragraph.text(), "ab");
        assert_eq!(paragraph.width(), Some(50.0));
        assert_eq!(backend.log().len(), 6);
        assert_eq!(backend.log().count(|c| matches!(c, Call::AddText(_))), 2);
    }

    #[test]
    fn test_log_handles_share_state() {
        let backend = RecordingBackend::new();
        let mut canvas = backend.canvas();
        canvas.save();
        canvas.restore();
        assert_eq!(backend.log().take(), vec![Call::Save, Call::Restore]);
        assert!(backend.log().is_empty());
    }

    #[test]
    fn test_backend_is_send_sync() {
        static_assertions::assert_impl_all!(RecordingBackend: Send, Sync);
        static_assertions::assert_impl_all!(CallLog: Send, Sync, Clone);
    }
}
