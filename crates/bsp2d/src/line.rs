//! Line representation and sidedness tests for 2D BSP trees.

use nalgebra::{Point2, Vector2};

use crate::GeometryError;

/// Universal tolerance for "on the line" decisions.
/// Points whose signed distance to a line is below this are considered on it.
pub const EPSILON: f64 = 1e-6;

/// Which side of a line a point lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSide {
    /// Positive half-plane (`evaluate(p) > tolerance`)
    Positive,
    /// Negative half-plane (`evaluate(p) < -tolerance`)
    Negative,
    /// On the line (within tolerance)
    On,
}

/// Classification of a segment relative to a partition line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Center on the positive side, no crossing
    Positive,
    /// Center on the negative side, no crossing
    Negative,
    /// Center on the line (within tolerance)
    Coplanar,
    /// Endpoints straddle the line, so the segment must be split
    Spanning,
}

/// A line in the plane, stored in normalized implicit form `a·x + b·y + c = 0`
/// with `a² + b² = 1`.
///
/// Because the normal `(a, b)` has unit length, [`Line::evaluate`] returns the
/// true signed distance from a point to the line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    normal: Vector2<f64>,
    c: f64,
}

impl Line {
    /// Creates a line from its coefficients, normalizing them.
    ///
    /// Fails if `a` and `b` are both zero or any coefficient is not finite.
    pub fn new(a: f64, b: f64, c: f64) -> Result<Self, GeometryError> {
        if !(a.is_finite() && b.is_finite() && c.is_finite()) {
            return Err(GeometryError::NonFinite);
        }
        let normal = Vector2::new(a, b);
        let norm = normal.norm();
        if norm == 0.0 {
            return Err(GeometryError::DegenerateCoefficients { a, b, c });
        }
        Ok(Self {
            normal: normal / norm,
            c: c / norm,
        })
    }

    /// Creates the line passing through two distinct points.
    ///
    /// The normal is `(p2.y - p1.y, p1.x - p2.x)`, so points to the right of the
    /// direction `p1 -> p2` evaluate positive.
    pub fn through(p1: Point2<f64>, p2: Point2<f64>) -> Result<Self, GeometryError> {
        if !(p1.coords.iter().all(|v| v.is_finite()) && p2.coords.iter().all(|v| v.is_finite())) {
            return Err(GeometryError::NonFinite);
        }
        let a = p2.y - p1.y;
        let b = p1.x - p2.x;
        let c = -(a * p1.x + b * p1.y);
        let norm = a.hypot(b);
        if norm == 0.0 {
            return Err(GeometryError::CoincidentPoints(p1));
        }
        Ok(Self {
            normal: Vector2::new(a / norm, b / norm),
            c: c / norm,
        })
    }

    /// Returns the unit normal `(a, b)`.
    #[inline]
    pub fn normal(&self) -> Vector2<f64> {
        self.normal
    }

    /// Returns the normalized coefficients `(a, b, c)`.
    #[inline]
    pub fn coefficients(&self) -> (f64, f64, f64) {
        (self.normal.x, self.normal.y, self.c)
    }

    /// Signed distance from `p` to the line.
    #[inline]
    pub fn evaluate(&self, p: Point2<f64>) -> f64 {
        self.normal.dot(&p.coords) + self.c
    }

    /// Returns `true` if `p` lies on the line within [`EPSILON`].
    #[inline]
    pub fn contains(&self, p: Point2<f64>) -> bool {
        self.evaluate(p).abs() < EPSILON
    }

    /// Classifies which side of the line a point lies on, using [`EPSILON`].
    #[inline]
    pub fn classify_point(&self, p: Point2<f64>) -> LineSide {
        self.classify_point_with_epsilon(p, EPSILON)
    }

    /// Classifies which side of the line a point lies on, with a custom tolerance.
    ///
    /// A tolerance of `0.0` gives the exact sign of [`Line::evaluate`].
    pub fn classify_point_with_epsilon(&self, p: Point2<f64>, epsilon: f64) -> LineSide {
        let dist = self.evaluate(p);
        if dist > epsilon {
            LineSide::Positive
        } else if dist < -epsilon {
            LineSide::Negative
        } else {
            LineSide::On
        }
    }

    /// Determinant of the two normals; zero when the lines are parallel.
    #[inline]
    fn det(&self, other: &Line) -> f64 {
        self.normal.perp(&other.normal)
    }

    /// Returns `true` if the lines meet: either they cross at a single point,
    /// or they are parallel and coincident within [`EPSILON`].
    pub fn touches(&self, other: &Line) -> bool {
        if self.det(other).abs() > EPSILON {
            return true;
        }
        // Parallel. Bring the other line to our orientation before comparing offsets.
        let other_c = if self.normal.dot(&other.normal) < 0.0 {
            -other.c
        } else {
            other.c
        };
        (self.c - other_c).abs() < EPSILON
    }

    /// Returns `true` only if the lines cross at a single point.
    ///
    /// Unlike [`Line::touches`], coincident lines do not intersect.
    #[inline]
    pub fn intersect(&self, other: &Line) -> bool {
        self.det(other).abs() >= EPSILON
    }
}
