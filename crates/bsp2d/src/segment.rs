//! Colored straight segments, the primitives stored in the BSP tree.

use std::fmt;

use nalgebra::Point2;

use crate::{Classification, GeometryError, Line, EPSILON};

/// A point in the plane.
pub type Point = Point2<f64>;

/// Opaque color tag carried by a segment and inherited by its fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A straight segment between two distinct points.
///
/// The support line (the line through both endpoints) is computed once at
/// construction, so a `Segment` always has a valid one.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    start: Point,
    end: Point,
    color: Color,
    line: Line,
}

impl Segment {
    /// Creates a segment from two endpoints.
    ///
    /// Fails if the endpoints coincide or are not finite.
    pub fn new(start: Point, end: Point, color: Color) -> Result<Self, GeometryError> {
        if start == end {
            return Err(GeometryError::CoincidentPoints(start));
        }
        let line = Line::through(start, end)?;
        Ok(Self {
            start,
            end,
            color,
            line,
        })
    }

    /// Convenience constructor from raw coordinates.
    pub fn from_coords(
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: Color,
    ) -> Result<Self, GeometryError> {
        Self::new(Point::new(x1, y1), Point::new(x2, y2), color)
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Point {
        self.end
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the line through both endpoints.
    #[inline]
    pub fn support_line(&self) -> Line {
        self.line
    }

    /// Returns the midpoint of the segment.
    pub fn center(&self) -> Point {
        nalgebra::center(&self.start, &self.end)
    }

    /// Returns the Euclidean length of the segment.
    pub fn length(&self) -> f64 {
        nalgebra::distance(&self.start, &self.end)
    }

    /// The endpoint with the smaller x-coordinate (the start point on ties).
    pub fn left_endpoint(&self) -> Point {
        if self.start.x <= self.end.x {
            self.start
        } else {
            self.end
        }
    }

    /// The endpoint with the larger x-coordinate (the end point on ties).
    pub fn right_endpoint(&self) -> Point {
        if self.start.x > self.end.x {
            self.start
        } else {
            self.end
        }
    }

    /// Returns `true` if `line` strictly cuts this segment, i.e. the product of
    /// the endpoint evaluations is below `-EPSILON`.
    pub fn crosses(&self, line: &Line) -> bool {
        line.evaluate(self.left_endpoint()) * line.evaluate(self.right_endpoint()) < -EPSILON
    }

    /// Classifies this segment relative to a partition line.
    ///
    /// The center decides the side; a segment whose center is off the line but
    /// whose endpoints straddle it is `Spanning`.
    pub fn classify(&self, line: &Line) -> Classification {
        let eval = line.evaluate(self.center());
        if eval.abs() < EPSILON {
            Classification::Coplanar
        } else if self.crosses(line) {
            Classification::Spanning
        } else if eval > 0.0 {
            Classification::Positive
        } else {
            Classification::Negative
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Segment[({}, {}) -> ({}, {}), {}]",
            self.start.x, self.start.y, self.end.x, self.end.y, self.color
        )
    }
}
