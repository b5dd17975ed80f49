//! Partitioning of a segment set by a splitting line.

use crate::{Classification, Cuttable, Line, Segment};

/// Result of partitioning segments by a line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition {
    /// Segments whose center lies on the line.
    pub coplanar: Vec<Segment>,
    /// Segments (or fragments) in the positive half-plane.
    pub positive: Vec<Segment>,
    /// Segments (or fragments) in the negative half-plane.
    pub negative: Vec<Segment>,
}

/// Splits `segments` into coplanar, positive and negative groups relative to
/// `line`, cutting every segment whose endpoints straddle it.
///
/// Input order is preserved within each group, so the result is a pure
/// function of the input order and the line.
pub fn partition(segments: Vec<Segment>, line: &Line) -> Partition {
    let mut result = Partition::default();

    for segment in segments {
        match segment.classify(line) {
            Classification::Coplanar => result.coplanar.push(segment),
            Classification::Positive => result.positive.push(segment),
            Classification::Negative => result.negative.push(segment),
            Classification::Spanning => {
                let (positive, negative) = segment.split(line);
                if let Some(p) = positive {
                    result.positive.push(p);
                }
                if let Some(n) = negative {
                    result.negative.push(n);
                }
            }
        }
    }

    result
}
