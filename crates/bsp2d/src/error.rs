//! Geometry construction errors.

use nalgebra::Point2;
use thiserror::Error;

/// Reasons a [`Line`](crate::Line) or [`Segment`](crate::Segment) cannot be built.
///
/// These are the only failures in the crate. Everything downstream of a valid
/// segment list (partitioning, tree construction, painting) is total.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Both defining points are the same, so no direction exists.
    #[error("points must be distinct, got {0} twice")]
    CoincidentPoints(Point2<f64>),

    /// `a` and `b` are both zero, so the coefficients describe no line.
    #[error("invalid line coefficients ({a}, {b}, {c}): a and b cannot both be zero")]
    DegenerateCoefficients { a: f64, b: f64, c: f64 },

    /// A coordinate or coefficient is NaN or infinite.
    #[error("non-finite value in geometry input")]
    NonFinite,
}

/// A builder name that matches none of the known strategies.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tree builder {0:?}, expected Deterministic, Random or Teller")]
pub struct ParseBuilderError(pub String);
