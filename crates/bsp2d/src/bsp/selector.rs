//! Splitting-line selection heuristics for BSP tree construction.
//!
//! Every candidate is the support line of a segment in the working set. The
//! heuristics differ in which candidates they accept below the root and in how
//! they rank the survivors.

use crate::{Line, Segment, EPSILON};

/// Strategy for choosing the splitting line of a BSP node.
pub trait LineSelector {
    /// Picks a splitting line among the support lines of `segments`.
    ///
    /// `parent` is the splitting line of the parent node (`None` at the root).
    /// Returns `None` when no candidate is acceptable; the caller then falls
    /// back to the first segment's support line.
    fn select(&self, segments: &[Segment], parent: Option<&Line>) -> Option<Line>;
}

/// A candidate line scored by the balance heuristic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BalanceCandidate {
    pub line: Line,
    /// `|positive - negative|` over segment centers, or `-inf` for a free split.
    pub balance: f64,
}

/// Minimizes the imbalance between the two half-planes.
///
/// Below the root, only candidates that touch the parent line are accepted,
/// so every split connects back to an ancestor split. A candidate whose own
/// segment lies entirely on the parent line is a free split and always wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct BalanceSelector;

impl BalanceSelector {
    /// Scores every acceptable candidate, in input order.
    pub fn evaluate_candidates(
        &self,
        segments: &[Segment],
        parent: Option<&Line>,
    ) -> Vec<BalanceCandidate> {
        let mut candidates = Vec::with_capacity(segments.len());

        for segment in segments {
            let line = segment.support_line();
            if parent.is_some_and(|p| !line.touches(p)) {
                continue;
            }

            let mut positive = 0i64;
            let mut negative = 0i64;
            for other in segments {
                let eval = line.evaluate(other.center());
                if eval > EPSILON {
                    positive += 1;
                } else if eval < -EPSILON {
                    negative += 1;
                }
            }

            let free_split = parent.is_some_and(|p| {
                p.contains(segment.left_endpoint()) && p.contains(segment.right_endpoint())
            });
            let balance = if free_split {
                f64::NEG_INFINITY
            } else {
                (positive - negative).abs() as f64
            };

            candidates.push(BalanceCandidate { line, balance });
        }

        candidates
    }
}

impl LineSelector for BalanceSelector {
    fn select(&self, segments: &[Segment], parent: Option<&Line>) -> Option<Line> {
        let candidates = self.evaluate_candidates(segments, parent);
        let mut iter = candidates.into_iter();
        let mut best = iter.next()?;
        for candidate in iter {
            // Strict comparison: the first candidate seen wins ties.
            if candidate.balance < best.balance {
                best = candidate;
            }
        }
        Some(best.line)
    }
}

/// A candidate line scored by the Teller heuristic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TellerCandidate {
    pub line: Line,
    /// Number of segments the line would cut.
    pub f: usize,
    /// `f` divided by the size of the working set.
    pub sigma: f64,
}

/// Teller's ratio heuristic.
///
/// Candidates with `sigma >= tau` form the first group; if it is non-empty the
/// one with the largest `sigma` is chosen. Otherwise the candidate cutting the
/// fewest segments is chosen. Below the root, candidates must cross the parent
/// line at a single point (coincident lines are rejected).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TellerSelector {
    tau: f64,
}

impl TellerSelector {
    /// Creates a selector with threshold `tau`, expected in `(0, 1)`.
    /// The range is not checked.
    pub fn new(tau: f64) -> Self {
        Self { tau }
    }

    #[inline]
    pub fn tau(&self) -> f64 {
        self.tau
    }

    /// Scores every acceptable candidate, in input order.
    pub fn evaluate_candidates(
        &self,
        segments: &[Segment],
        parent: Option<&Line>,
    ) -> Vec<TellerCandidate> {
        let total = segments.len() as f64;
        let mut candidates = Vec::with_capacity(segments.len());

        for segment in segments {
            let line = segment.support_line();
            if parent.is_some_and(|p| !line.intersect(p)) {
                continue;
            }

            let f = segments.iter().filter(|other| other.crosses(&line)).count();
            candidates.push(TellerCandidate {
                line,
                f,
                sigma: f as f64 / total,
            });
        }

        candidates
    }
}

impl LineSelector for TellerSelector {
    fn select(&self, segments: &[Segment], parent: Option<&Line>) -> Option<Line> {
        let candidates = self.evaluate_candidates(segments, parent);

        let mut max_sigma: Option<&TellerCandidate> = None;
        let mut min_f: Option<&TellerCandidate> = None;
        for candidate in &candidates {
            if candidate.sigma >= self.tau {
                if max_sigma.is_none_or(|best| candidate.sigma > best.sigma) {
                    max_sigma = Some(candidate);
                }
            } else if min_f.is_none_or(|best| candidate.f < best.f) {
                min_f = Some(candidate);
            }
        }

        max_sigma.or(min_f).map(|candidate| candidate.line)
    }
}
