//! Segment splitting for BSP trees.

use crate::{Line, Point, Segment, EPSILON};

/// Trait for geometry that can be cut by a line.
pub trait Cuttable {
    /// Splits the geometry by a line.
    ///
    /// Returns `(positive, negative)`:
    ///
    /// - **Same side**: `(Some(self), None)` or `(None, Some(self))`
    /// - **Coplanar** (both endpoints within `EPSILON`): `(Some(self), None)`
    /// - **Straddling**: both parts, sharing the original color. A zero-length
    ///   part is dropped.
    fn split(&self, line: &Line) -> (Option<Segment>, Option<Segment>);
}

impl Cuttable for Segment {
    fn split(&self, line: &Line) -> (Option<Segment>, Option<Segment>) {
        let eval_start = line.evaluate(self.start());
        let eval_end = line.evaluate(self.end());

        if eval_start * eval_end > 0.0 {
            return if eval_start > 0.0 {
                (Some(self.clone()), None)
            } else {
                (None, Some(self.clone()))
            };
        }

        if eval_start.abs() < EPSILON && eval_end.abs() < EPSILON {
            return (Some(self.clone()), None);
        }

        let crossing = intersection_point(self.start(), self.end(), eval_start, eval_end);

        let (positive, negative) = if eval_start > 0.0 {
            (
                Segment::new(self.start(), crossing, self.color()),
                Segment::new(crossing, self.end(), self.color()),
            )
        } else {
            (
                Segment::new(crossing, self.end(), self.color()),
                Segment::new(self.start(), crossing, self.color()),
            )
        };

        // A fragment that cannot form a segment has zero length.
        (positive.ok(), negative.ok())
    }
}

/// Interpolates the crossing point from the endpoint evaluations.
///
/// The parameter is clamped to the endpoints so an endpoint lying exactly on
/// the line yields that endpoint bit-for-bit.
fn intersection_point(start: Point, end: Point, eval_start: f64, eval_end: f64) -> Point {
    let t = eval_start / (eval_start - eval_end);
    if t <= 0.0 {
        start
    } else if t >= 1.0 {
        end
    } else {
        start + (end - start) * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;
    use approx::assert_relative_eq;

    fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> Segment {
        Segment::from_coords(x1, y1, x2, y2, Color::GREEN).unwrap()
    }

    fn vertical_axis() -> Line {
        // x = 0 with the positive side at x > 0
        Line::new(1.0, 0.0, 0.0).unwrap()
    }

    #[test]
    fn same_side_is_returned_whole() {
        let line = vertical_axis();
        let right = seg(1.0, 0.0, 2.0, 5.0);
        let left = seg(-1.0, 0.0, -2.0, 5.0);

        assert_eq!(right.split(&line), (Some(right.clone()), None));
        assert_eq!(left.split(&line), (None, Some(left.clone())));
    }

    #[test]
    fn coplanar_goes_positive() {
        let line = vertical_axis();
        let on = seg(0.0, -3.0, 0.0, 3.0);
        assert_eq!(on.split(&line), (Some(on.clone()), None));
    }

    #[test]
    fn straddling_segment_is_split_at_crossing() {
        let line = vertical_axis();
        let s = seg(-1.0, 0.0, 3.0, 4.0);

        let (positive, negative) = s.split(&line);
        let positive = positive.unwrap();
        let negative = negative.unwrap();

        assert_eq!(negative.start(), s.start());
        assert_eq!(positive.end(), s.end());
        assert_relative_eq!(negative.end().x, 0.0);
        assert_relative_eq!(negative.end().y, 1.0);
        assert_eq!(negative.end(), positive.start());
        assert_eq!(positive.color(), Color::GREEN);
        assert_eq!(negative.color(), Color::GREEN);
        assert_relative_eq!(positive.length() + negative.length(), s.length(), epsilon = 1e-12);
    }

    #[test]
    fn split_keeps_orientation_when_start_is_positive() {
        let line = vertical_axis();
        let s = seg(2.0, 0.0, -2.0, 0.0);

        let (positive, negative) = s.split(&line);
        assert_eq!(positive.unwrap().start(), Point::new(2.0, 0.0));
        assert_eq!(negative.unwrap().end(), Point::new(-2.0, 0.0));
    }

    #[test]
    fn endpoint_on_line_drops_zero_length_fragment() {
        let line = vertical_axis();
        let touching = seg(0.0, 0.0, 3.0, 0.0);
        assert_eq!(touching.split(&line), (Some(touching.clone()), None));

        let touching_end = seg(-3.0, 1.0, 0.0, 1.0);
        assert_eq!(touching_end.split(&line), (None, Some(touching_end.clone())));
    }
}
