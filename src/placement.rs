//! Glyph placement along a path
//!
//! Walks the contours of a path by arc length and turns every glyph into a
//! rotation + translation so the whole string can be drawn as one transformed
//! glyph run. Each glyph is centred on its sample point: the cursor advances by
//! half a glyph, samples position and tangent, then advances the other half.
//!
//! Running out of path truncates the text. That is the normal outcome for long
//! strings on short paths and is not an error.

use compact_str::CompactString;
use kurbo::{Point, Vec2};

use crate::backend::{ContourMeasure, RsxForm};

// =============================================================================
// GlyphPlacement
// =============================================================================

/// Placement of one glyph on the path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphPlacement {
    /// Rotation from the tangent, translation to the glyph's left edge
    pub xform: RsxForm,
    /// Sample point on the path the glyph is centred on
    pub center: Point,
}

impl GlyphPlacement {
    /// Glyph origin (left edge of its advance).
    #[inline]
    pub fn anchor(&self) -> Point {
        self.xform.translation()
    }
}

/// Result of laying a string out along a path.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// The placed prefix of the input text
    pub text: CompactString,
    /// One entry per placed glyph
    pub glyphs: Vec<GlyphPlacement>,
    /// Whether glyphs were dropped because the path ran out
    pub truncated: bool,
}

impl Placement {
    /// Number of placed glyphs.
    #[inline]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Transforms in glyph order.
    pub fn xforms(&self) -> Vec<RsxForm> {
        self.glyphs.iter().map(|g| g.xform).collect()
    }
}

// =============================================================================
// ContourCursor
// =============================================================================

/// Traversal state over a path's contours for one placement pass.
struct ContourCursor<I: Iterator> {
    contours: I,
    current: Option<I::Item>,
    distance: f64,
}

impl<I> ContourCursor<I>
where
    I: Iterator,
    I::Item: ContourMeasure,
{
    fn new(mut contours: I, offset: f64) -> Self {
        let current = contours.next();
        Self {
            contours,
            current,
            distance: offset,
        }
    }

    /// Advance to the centre of a glyph whose half-advance is `half`.
    ///
    /// Moves to the next contour when the centre falls past the end of the
    /// current one. `None` once the path is exhausted.
    fn enter_glyph(&mut self, half: f64) -> Option<(Point, Vec2)> {
        let length = self.current.as_ref()?.length();
        self.distance += half;
        if self.distance > length {
            self.current = self.contours.next();
            self.distance = half;
        }
        self.current.as_ref()?.pos_tan(self.distance)
    }

    fn leave_glyph(&mut self, half: f64) {
        self.distance += half;
    }
}

// =============================================================================
// place_glyphs
// =============================================================================

/// Place `text` along `contours`.
///
/// `widths` holds one advance per `char` of `text`; missing entries count as
/// zero width. `initial_offset` is the starting distance on the first contour.
pub fn place_glyphs<I>(text: &str, widths: &[f32], contours: I, initial_offset: f32) -> Placement
where
    I: IntoIterator,
    I::Item: ContourMeasure,
{
    let mut cursor = ContourCursor::new(contours.into_iter(), f64::from(initial_offset));
    let mut glyphs = Vec::with_capacity(widths.len());
    let mut end = text.len();

    for (i, (byte, _)) in text.char_indices().enumerate() {
        let half = f64::from(widths.get(i).copied().unwrap_or_default()) / 2.0;
        let Some((pos, tan)) = cursor.enter_glyph(half) else {
            end = byte;
            break;
        };
        let anchor = pos - tan * half;
        glyphs.push(GlyphPlacement {
            xform: RsxForm::new(tan.x as f32, tan.y as f32, anchor.x as f32, anchor.y as f32),
            center: pos,
        });
        cursor.leave_glyph(half);
    }

    let truncated = end < text.len();
    if truncated {
        log::debug!(
            "path exhausted after {} of {} glyphs",
            glyphs.len(),
            text.chars().count()
        );
    }
    Placement {
        text: CompactString::from(&text[..end]),
        glyphs,
        truncated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::PathContours;
    use kurbo::BezPath;

    fn line(length: f64) -> BezPath {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((length, 0.0));
        path
    }

    fn contours(path: BezPath) -> PathContours {
        PathContours::new(path, false, 1.0)
    }

    #[test]
    fn test_two_glyphs_on_line() {
        let placement = place_glyphs("AB", &[20.0, 20.0], contours(line(100.0)), 0.0);
        assert_eq!(placement.len(), 2);
        assert!(!placement.truncated);

        let centers: Vec<f64> = placement.glyphs.iter().map(|g| g.center.x).collect();
        assert!((centers[0] - 10.0).abs() < 1e-6 && (centers[1] - 30.0).abs() < 1e-6);
        let anchors: Vec<f64> = placement.glyphs.iter().map(|g| g.anchor().x).collect();
        assert!((anchors[0] - 0.0).abs() < 1e-6 && (anchors[1] - 20.0).abs() < 1e-6);
        assert!(placement.glyphs.iter().all(|g| g.xform.scos == 1.0 && g.xform.ssin == 0.0));
    }

    #[test]
    fn test_exact_fit_places_length_over_width() {
        // L = 100, W = 20 -> floor(L / W) = 5 glyphs, with zero remainder
        let text = "ABCDEFG";
        let placement = place_glyphs(text, &[20.0; 7], contours(line(100.0)), 0.0);
        assert_eq!(placement.len(), 5);
        assert_eq!(placement.text, "ABCDE");

        let anchors: Vec<f64> = placement.glyphs.iter().map(|g| g.anchor().x).collect();
        for pair in anchors.windows(2) {
            assert!((pair[1] - pair[0] - 20.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_half_glyph_remainder_places_one_more() {
        // L = 50, W = 20: the third centre lands exactly on the path end
        let placement = place_glyphs("ABCDEFG", &[20.0; 7], contours(line(50.0)), 0.0);
        assert_eq!(placement.len(), 3);
        assert_eq!(placement.text, "ABC");
        assert!(placement.truncated);

        let last = placement.glyphs[2];
        assert!((last.center.x - 50.0).abs() < 1e-6);
        assert!((last.anchor().x - 40.0).abs() < 1e-6);
    }

    #[test]
    fn test_remainder_below_half_glyph_is_floor() {
        // L = 49, W = 20: the third centre would sit at 50, past the end
        let placement = place_glyphs("ABCDEFG", &[20.0; 7], contours(line(49.0)), 0.0);
        assert_eq!(placement.len(), 2);
        assert_eq!(placement.text, "AB");
    }

    #[test]
    fn test_truncation_is_silent_prefix() {
        let text = "hello world";
        let placement = place_glyphs(text, &[10.0; 11], contours(line(42.0)), 0.0);
        assert!(placement.truncated);
        assert!(placement.len() < text.chars().count());
        assert_eq!(placement.text, "hell");
        assert_eq!(placement.text.chars().count(), placement.len());
    }

    #[test]
    fn test_initial_offset() {
        let placement = place_glyphs("A", &[10.0], contours(line(100.0)), 30.0);
        assert!((placement.glyphs[0].center.x - 35.0).abs() < 1e-6);
        assert!((placement.glyphs[0].anchor().x - 30.0).abs() < 1e-6);
    }

    #[test]
    fn test_jumps_to_next_contour() {
        let mut path = line(20.0);
        path.move_to((0.0, 50.0));
        path.line_to((100.0, 50.0));

        let placement = place_glyphs("ABCD", &[10.0; 4], contours(path), 0.0);
        assert_eq!(placement.len(), 4);
        // A, B on the first contour; C restarts at the second contour
        assert_eq!(placement.glyphs[1].center.y, 0.0);
        assert!((placement.glyphs[2].center - Point::new(5.0, 50.0)).hypot() < 1e-6);
        assert!((placement.glyphs[3].center - Point::new(15.0, 50.0)).hypot() < 1e-6);
    }

    #[test]
    fn test_vertical_path_rotates_glyphs() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((0.0, 100.0));
        let placement = place_glyphs("A", &[10.0], contours(path), 0.0);
        let xform = placement.glyphs[0].xform;
        assert!((xform.scos).abs() < 1e-6);
        assert!((xform.ssin - 1.0).abs() < 1e-6);
        assert!((xform.ty - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_path_places_nothing() {
        let placement = place_glyphs("abc", &[5.0; 3], contours(BezPath::new()), 0.0);
        assert!(placement.is_empty());
        assert_eq!(placement.text, "");
        assert!(placement.truncated);
    }

    #[test]
    fn test_multibyte_truncation_on_char_boundary() {
        let placement = place_glyphs("ééé", &[10.0; 3], contours(line(20.0)), 0.0);
        assert_eq!(placement.text, "éé");
    }
}
