//! Contour measurement on kurbo paths
//!
//! A ready-made [`ContourMeasure`] for backends without native contour
//! measurement. A path is split into contours at every move-to; each contour
//! keeps its segments with their cumulative arc-length offsets so sampling is
//! a binary search followed by one inverse arc-length solve.

use kurbo::{
    BezPath, CubicBez, Line, ParamCurve, ParamCurveArclen, ParamCurveDeriv, PathEl, PathSeg, Point,
    QuadBez, Vec2,
};
use smallvec::SmallVec;

use crate::backend::ContourMeasure;

/// Arc-length accuracy at resolution scale 1.0.
pub const BASE_ACCURACY: f64 = 1e-3;

// =============================================================================
// Contour
// =============================================================================

#[derive(Debug, Clone, Copy)]
struct MeasuredSeg {
    seg: PathSeg,
    /// Distance from contour start to this segment's start
    offset: f64,
    length: f64,
}

/// One measured contour of a path.
#[derive(Debug, Clone)]
pub struct Contour {
    segments: SmallVec<[MeasuredSeg; 4]>,
    length: f64,
    closed: bool,
    accuracy: f64,
}

impl Contour {
    /// Whether the contour ends with a close (explicit or forced).
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Number of non-degenerate segments.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }
}

impl ContourMeasure for Contour {
    fn length(&self) -> f64 {
        self.length
    }

    fn pos_tan(&self, distance: f64) -> Option<(Point, Vec2)> {
        let last = self.segments.len().checked_sub(1)?;
        let distance = distance.clamp(0.0, self.length);
        let index = self
            .segments
            .partition_point(|s| s.offset + s.length < distance)
            .min(last);
        let measured = &self.segments[index];
        let local = (distance - measured.offset).clamp(0.0, measured.length);
        let t = match measured.seg {
            _ if local >= measured.length => 1.0,
            PathSeg::Line(_) => local / measured.length,
            seg => seg.inv_arclen(local, self.accuracy),
        };
        Some((measured.seg.eval(t), unit_tangent(&measured.seg, t)))
    }
}

fn unit_tangent(seg: &PathSeg, t: f64) -> Vec2 {
    let deriv = match seg {
        PathSeg::Line(line) => line.p1 - line.p0,
        PathSeg::Quad(quad) => quad.deriv().eval(t).to_vec2(),
        PathSeg::Cubic(cubic) => cubic.deriv().eval(t).to_vec2(),
    };
    // Cusps and coincident control points have no derivative; use the chord.
    let dir = if deriv.hypot2() > f64::EPSILON {
        deriv
    } else {
        seg.end() - seg.start()
    };
    let len = dir.hypot();
    if len > 0.0 { dir / len } else { Vec2::new(1.0, 0.0) }
}

// ─────────────────────────────────────────────────────────────────────────────

struct ContourBuilder {
    start: Point,
    last: Point,
    segments: SmallVec<[MeasuredSeg; 4]>,
    length: f64,
    closed: bool,
    accuracy: f64,
}

impl ContourBuilder {
    fn new(start: Point, accuracy: f64) -> Self {
        Self {
            start,
            last: start,
            segments: SmallVec::new(),
            length: 0.0,
            closed: false,
            accuracy,
        }
    }

    fn push(&mut self, seg: PathSeg) {
        self.last = seg.end();
        let length = seg.arclen(self.accuracy);
        if length > 0.0 {
            self.segments.push(MeasuredSeg {
                seg,
                offset: self.length,
                length,
            });
            self.length += length;
        }
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        if self.last != self.start {
            self.push(PathSeg::Line(Line::new(self.last, self.start)));
        }
        self.closed = true;
    }

    fn finish(self) -> Contour {
        Contour {
            segments: self.segments,
            length: self.length,
            closed: self.closed,
            accuracy: self.accuracy,
        }
    }
}

// =============================================================================
// PathContours
// =============================================================================

/// Iterator over the measurable contours of a path.
///
/// Zero-length contours are skipped.
#[derive(Debug, Clone)]
pub struct PathContours {
    path: BezPath,
    index: usize,
    pen: Point,
    force_closed: bool,
    accuracy: f64,
}

impl PathContours {
    /// Measure `path`. Higher `res_scale` gives more accurate lengths.
    pub fn new(path: BezPath, force_closed: bool, res_scale: f64) -> Self {
        let accuracy = if res_scale.is_finite() && res_scale > 0.0 {
            BASE_ACCURACY / res_scale
        } else {
            BASE_ACCURACY
        };
        Self {
            path,
            index: 0,
            pen: Point::ZERO,
            force_closed,
            accuracy,
        }
    }

    /// Total length over all measurable contours.
    pub fn total_length(self) -> f64 {
        self.map(|c| c.length()).sum()
    }

    fn next_contour(&mut self) -> Option<Contour> {
        let elements = self.path.elements();
        if self.index >= elements.len() {
            return None;
        }
        let mut builder = ContourBuilder::new(self.pen, self.accuracy);
        let mut started = false;
        while let Some(el) = elements.get(self.index) {
            match *el {
                PathEl::MoveTo(p) => {
                    if started {
                        break;
                    }
                    builder = ContourBuilder::new(p, self.accuracy);
                }
                PathEl::LineTo(p) => builder.push(PathSeg::Line(Line::new(builder.last, p))),
                PathEl::QuadTo(p1, p2) => {
                    builder.push(PathSeg::Quad(QuadBez::new(builder.last, p1, p2)));
                }
                PathEl::CurveTo(p1, p2, p3) => {
                    builder.push(PathSeg::Cubic(CubicBez::new(builder.last, p1, p2, p3)));
                }
                PathEl::ClosePath => {
                    builder.close();
                    self.index += 1;
                    break;
                }
            }
            started = true;
            self.index += 1;
        }
        if self.force_closed {
            builder.close();
        }
        // After a close, drawing continues from the contour start.
        self.pen = if builder.closed { builder.start } else { builder.last };
        Some(builder.finish())
    }
}

impl Iterator for PathContours {
    type Item = Contour;

    fn next(&mut self) -> Option<Contour> {
        loop {
            let contour = self.next_contour()?;
            if contour.length > 0.0 {
                return Some(contour);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_straight_line() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((100.0, 0.0));

        let contours: Vec<_> = PathContours::new(path, false, 1.0).collect();
        assert_eq!(contours.len(), 1);
        let contour = &contours[0];
        assert!(close(contour.length(), 100.0));

        let (pos, tan) = contour.pos_tan(25.0).unwrap();
        assert!(close(pos.x, 25.0) && close(pos.y, 0.0));
        assert!(close(tan.x, 1.0) && close(tan.y, 0.0));
    }

    #[test]
    fn test_pos_tan_clamps() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((0.0, 10.0));
        let contour = PathContours::new(path, false, 1.0).next().unwrap();

        let (start, tan) = contour.pos_tan(-5.0).unwrap();
        assert!(close(start.y, 0.0));
        assert!(close(tan.y, 1.0));
        let (end, _) = contour.pos_tan(50.0).unwrap();
        assert!(close(end.y, 10.0));
    }

    #[test]
    fn test_polyline_segments() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((10.0, 0.0));
        path.line_to((10.0, 10.0));
        let contour = PathContours::new(path, false, 1.0).next().unwrap();
        assert_eq!(contour.segment_count(), 2);
        assert!(close(contour.length(), 20.0));

        let (pos, tan) = contour.pos_tan(15.0).unwrap();
        assert!(close(pos.x, 10.0) && close(pos.y, 5.0));
        assert!(close(tan.x, 0.0) && close(tan.y, 1.0));
    }

    #[test]
    fn test_multiple_contours_and_degenerate_skip() {
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((30.0, 0.0));
        path.move_to((5.0, 5.0)); // zero length, skipped
        path.move_to((0.0, 10.0));
        path.line_to((0.0, 30.0));

        let lengths: Vec<f64> = PathContours::new(path, false, 1.0).map(|c| c.length()).collect();
        assert_eq!(lengths.len(), 2);
        assert!(close(lengths[0], 30.0));
        assert!(close(lengths[1], 20.0));
    }

    #[test]
    fn test_close_and_force_closed() {
        let mut open = BezPath::new();
        open.move_to((0.0, 0.0));
        open.line_to((10.0, 0.0));
        open.line_to((10.0, 10.0));

        let plain = PathContours::new(open.clone(), false, 1.0).next().unwrap();
        assert!(!plain.is_closed());
        assert!(close(plain.length(), 20.0));

        let forced = PathContours::new(open, true, 1.0).next().unwrap();
        assert!(forced.is_closed());
        assert!(close(forced.length(), 20.0 + 200f64.sqrt()));

        let mut square = BezPath::new();
        square.move_to((0.0, 0.0));
        square.line_to((10.0, 0.0));
        square.line_to((10.0, 10.0));
        square.line_to((0.0, 10.0));
        square.close_path();
        assert!(close(PathContours::new(square, false, 1.0).total_length(), 40.0));
    }

    #[test]
    fn test_curve_length() {
        // Quarter circle approximation of radius 100.
        let k = 0.552_284_749_8 * 100.0;
        let mut path = BezPath::new();
        path.move_to((100.0, 0.0));
        path.curve_to((100.0, k), (k, 100.0), (0.0, 100.0));
        let contour = PathContours::new(path, false, 1.0).next().unwrap();
        let quarter = std::f64::consts::FRAC_PI_2 * 100.0;
        assert!((contour.length() - quarter).abs() < 0.1);

        let (mid, tan) = contour.pos_tan(contour.length() / 2.0).unwrap();
        assert!((mid.x - mid.y).abs() < 0.05);
        assert!((tan.hypot() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_path() {
        assert_eq!(PathContours::new(BezPath::new(), false, 1.0).count(), 0);
    }
}
