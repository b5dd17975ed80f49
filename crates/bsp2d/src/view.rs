//! Painter's-algorithm 360° views.
//!
//! A [`View`] is the back-to-front list of angular projections of every
//! segment fragment in a [`BspTree`], as seen from one viewpoint. Overlapping
//! intervals are not merged or clipped: a renderer drawing them in order gets
//! correct occlusion because nearer fragments always come later.

use std::f64::consts::{PI, TAU};
use std::fmt;

use log::trace;

use crate::{BspTree, BspVisitor, Point, Segment};

/// The angular interval `[start_angle, end_angle)` covered by a segment
/// fragment, in radians.
///
/// `start_angle` is in `[0, 2π)`. When the interval wraps past angle zero,
/// `end_angle` exceeds `2π`; consumers reduce it modulo `2π`.
#[derive(Debug, Clone, PartialEq)]
pub struct AngularSegment {
    start_angle: f64,
    end_angle: f64,
    segment: Segment,
}

impl AngularSegment {
    pub fn new(start_angle: f64, end_angle: f64, segment: Segment) -> Self {
        Self {
            start_angle,
            end_angle,
            segment,
        }
    }

    #[inline]
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    #[inline]
    pub fn end_angle(&self) -> f64 {
        self.end_angle
    }

    /// The fragment this interval was projected from.
    #[inline]
    pub fn segment(&self) -> &Segment {
        &self.segment
    }

    /// Angular width of the interval. At most `π`.
    #[inline]
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Returns `true` if `angle` (any real, reduced modulo `2π`) lies in the
    /// half-open interval.
    pub fn contains_angle(&self, angle: f64) -> bool {
        let mut angle = normalize_angle(angle);
        if angle < self.start_angle {
            angle += TAU;
        }
        angle >= self.start_angle && angle < self.end_angle
    }

    /// Start and end angles in degrees.
    pub fn degrees(&self) -> (f64, f64) {
        (self.start_angle.to_degrees(), self.end_angle.to_degrees())
    }
}

impl fmt::Display for AngularSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (start, end) = self.degrees();
        write!(f, "AngularSegment[{start:.2}°, {end:.2}°) of {}", self.segment)
    }
}

/// One painter's-algorithm query result: angular segments in back-to-front
/// order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct View {
    segments: Vec<AngularSegment>,
}

impl View {
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Angular segments, farthest first.
    #[inline]
    pub fn angular_segments(&self) -> &[AngularSegment] {
        &self.segments
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AngularSegment> {
        self.segments.iter()
    }

    pub fn into_inner(self) -> Vec<AngularSegment> {
        self.segments
    }
}

impl<'a> IntoIterator for &'a View {
    type Item = &'a AngularSegment;
    type IntoIter = std::slice::Iter<'a, AngularSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

impl IntoIterator for View {
    type Item = AngularSegment;
    type IntoIter = std::vec::IntoIter<AngularSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.into_iter()
    }
}

/// Reduces an angle into `[0, 2π)`.
fn normalize_angle(angle: f64) -> f64 {
    let reduced = angle.rem_euclid(TAU);
    // rem_euclid can round a tiny negative input up to exactly 2π
    if reduced >= TAU { 0.0 } else { reduced }
}

/// Projects a segment onto the circle of directions around `viewpoint`.
///
/// Both endpoint angles are taken with `atan2` and reduced into `[0, 2π)`.
/// The shorter of the direct and the wrapping arc is returned, so the span is
/// at most `π` for any viewpoint off the segment.
pub fn angular_projection(segment: &Segment, viewpoint: Point) -> AngularSegment {
    let to_start = segment.start() - viewpoint;
    let to_end = segment.end() - viewpoint;
    let a1 = normalize_angle(to_start.y.atan2(to_start.x));
    let a2 = normalize_angle(to_end.y.atan2(to_end.x));

    let direct = (a2 - a1).abs();
    let complement = TAU - direct;

    let (start, end) = if direct <= complement {
        (a1.min(a2), a1.max(a2))
    } else if a1 > a2 {
        (a1, a2 + TAU)
    } else {
        (a2, a1 + TAU)
    };
    debug_assert!(end - start <= PI + 1e-12);

    AngularSegment::new(start, end, segment.clone())
}

/// Visitor projecting every visited segment onto the viewpoint's circle.
struct ProjectingVisitor {
    viewpoint: Point,
    projected: Vec<AngularSegment>,
}

impl BspVisitor for ProjectingVisitor {
    fn visit(&mut self, segments: &[Segment]) {
        self.projected
            .extend(segments.iter().map(|s| angular_projection(s, self.viewpoint)));
    }
}

/// Runs the painter's algorithm on `tree` from `viewpoint`.
///
/// Every fragment reachable by the back-to-front traversal is projected, in
/// traversal order. Segments lying on a partition line that passes exactly
/// through the viewpoint are edge-on and omitted.
pub fn paint(tree: &BspTree, viewpoint: Point) -> View {
    let mut visitor = ProjectingVisitor {
        viewpoint,
        projected: Vec::with_capacity(tree.segment_count()),
    };
    tree.traverse_back_to_front(viewpoint, &mut visitor);
    trace!(
        "painted {} of {} fragments from ({}, {})",
        visitor.projected.len(),
        tree.segment_count(),
        viewpoint.x,
        viewpoint.y
    );
    View {
        segments: visitor.projected,
    }
}

/// Paints the same tree from several viewpoints in parallel.
///
/// The tree is only read, so it is shared by all workers.
#[cfg(feature = "parallel")]
pub fn paint_many(tree: &BspTree, viewpoints: &[Point]) -> Vec<View> {
    use rayon::prelude::*;

    viewpoints
        .par_iter()
        .map(|&viewpoint| paint(tree, viewpoint))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, TreeBuilder};
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::f64::consts::FRAC_PI_2;

    fn seg(x1: f64, y1: f64, x2: f64, y2: f64, color: Color) -> Segment {
        Segment::from_coords(x1, y1, x2, y2, color).unwrap()
    }

    #[test]
    fn projection_without_wrap() {
        // From the origin: (1, 0) is at 0 and (0, 1) at π/2
        let s = seg(0.0, 1.0, 1.0, 0.0, Color::RED);
        let projected = angular_projection(&s, Point::origin());

        assert_relative_eq!(projected.start_angle(), 0.0);
        assert_relative_eq!(projected.end_angle(), FRAC_PI_2);
        assert_eq!(projected.segment(), &s);
    }

    #[test]
    fn projection_wraps_past_zero() {
        // Endpoints at -45° and +45° seen from the origin
        let s = seg(1.0, -1.0, 1.0, 1.0, Color::RED);
        let projected = angular_projection(&s, Point::origin());

        assert_relative_eq!(projected.start_angle(), 7.0 * PI / 4.0);
        assert_relative_eq!(projected.end_angle(), TAU + PI / 4.0);
        assert_relative_eq!(projected.span(), FRAC_PI_2);
        assert!(projected.contains_angle(0.0));
        assert!(projected.contains_angle(-0.1));
        assert!(!projected.contains_angle(PI));
    }

    #[test]
    fn projection_span_is_bounded() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..500 {
            let s = seg(
                rng.random_range(-10.0..10.0),
                rng.random_range(-10.0..10.0),
                rng.random_range(-10.0..10.0),
                rng.random_range(-10.0..10.0),
                Color::BLACK,
            );
            let eye = Point::new(rng.random_range(-10.0..10.0), rng.random_range(-10.0..10.0));
            let projected = angular_projection(&s, eye);

            assert!(projected.start_angle() >= 0.0 && projected.start_angle() < TAU);
            assert!(projected.span() >= 0.0);
            assert!(projected.span() <= PI + 1e-12);
        }
    }

    #[test]
    fn degrees_and_display() {
        let s = seg(0.0, 1.0, 1.0, 0.0, Color::RED);
        let projected = angular_projection(&s, Point::origin());
        let (start, end) = projected.degrees();
        assert_relative_eq!(start, 0.0);
        assert_relative_eq!(end, 90.0);
        assert!(projected.to_string().starts_with("AngularSegment[0.00°, 90.00°)"));
    }

    #[test]
    fn far_side_is_painted_before_near_side() {
        // Walls on both sides of the splitting wall y = 0, all spanning the
        // same directions from a viewpoint below.
        let far = Color::rgb(1, 0, 0);
        let split = Color::rgb(2, 0, 0);
        let near = Color::rgb(3, 0, 0);
        let segments = vec![
            seg(-1.0, 2.0, 1.0, 2.0, far),
            seg(-3.0, 4.0, 3.0, 4.0, far),
            seg(-1.0, -2.0, 1.0, -2.0, near),
            seg(-2.0, 0.0, 2.0, 0.0, split),
        ];

        for builder in [TreeBuilder::Deterministic, TreeBuilder::teller()] {
            let tree = builder.build(&segments);
            let view = paint(&tree, Point::new(0.0, -5.0));
            let colors: Vec<Color> = view.iter().map(|a| a.segment().color()).collect();

            assert_eq!(colors.len(), 4);
            let last_far = colors.iter().rposition(|&c| c == far).unwrap();
            let first_near = colors.iter().position(|&c| c == near).unwrap();
            assert!(last_far < first_near, "{builder}: {colors:?}");
        }
    }

    #[test]
    fn square_from_origin() {
        let top = Color::rgb(3, 0, 0);
        let bottom = Color::rgb(1, 0, 0);
        let segments = vec![
            seg(1.0, 1.0, 5.0, 1.0, bottom),
            seg(5.0, 1.0, 5.0, 5.0, Color::rgb(2, 0, 0)),
            seg(5.0, 5.0, 1.0, 5.0, top),
            seg(1.0, 5.0, 1.0, 1.0, Color::rgb(4, 0, 0)),
            seg(2.0, 3.0, 3.0, 4.0, Color::rgb(5, 0, 0)),
        ];
        let tree = TreeBuilder::Deterministic.build(&segments);
        let view = paint(&tree, Point::origin());

        assert_eq!(view.len(), tree.segment_count());
        assert_eq!(view.angular_segments()[0].segment().color(), top);
        assert_eq!(view.angular_segments()[view.len() - 1].segment().color(), bottom);
        for angular in &view {
            assert!(angular.span() <= PI);
        }
    }

    #[test]
    fn viewpoint_on_partition_hides_edge_on_segments() {
        let segments = vec![
            seg(0.0, 0.0, 10.0, 0.0, Color::RED),
            seg(0.0, 4.0, 10.0, 4.0, Color::GREEN),
            seg(0.0, 2.0, 10.0, 2.0, Color::BLUE),
        ];
        let tree = TreeBuilder::Deterministic.build(&segments);

        // Exactly on y = 2: the blue wall is edge-on and skipped
        let on_line = paint(&tree, Point::new(-3.0, 2.0));
        assert_eq!(on_line.len(), 2);
        assert!(on_line.iter().all(|a| a.segment().color() != Color::BLUE));

        // Slightly off the line the exact sign applies, so it is painted
        let off_line = paint(&tree, Point::new(-3.0, 2.0 + 1e-9));
        assert_eq!(off_line.len(), 3);
    }

    #[test]
    fn empty_tree_paints_empty_view() {
        let tree = TreeBuilder::Deterministic.build(&[]);
        let view = paint(&tree, Point::origin());
        assert!(view.is_empty());
        assert!(view.into_inner().is_empty());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn paint_many_matches_sequential() {
        let segments = vec![
            seg(0.0, 0.0, 10.0, 0.0, Color::RED),
            seg(3.0, -2.0, 3.0, 6.0, Color::GREEN),
            seg(0.0, 2.0, 10.0, 2.0, Color::BLUE),
        ];
        let tree = TreeBuilder::teller().build(&segments);
        let eyes = [Point::new(-1.0, -1.0), Point::new(5.0, 1.0), Point::new(20.0, 7.0)];

        let views = paint_many(&tree, &eyes);
        for (view, eye) in views.iter().zip(eyes) {
            assert_eq!(view, &paint(&tree, eye));
        }
    }
}
