//! The closed set of tree construction strategies.

use std::fmt;
use std::str::FromStr;

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::{ParseBuilderError, Segment};

use super::selector::{BalanceSelector, TellerSelector};
use super::tree::BspTree;

/// Default Teller threshold.
pub const DEFAULT_TAU: f64 = 0.5;

/// Selects how a BSP tree is built from a segment list.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TreeBuilder {
    /// Balance heuristic over the segments in input order.
    #[default]
    Deterministic,
    /// Balance heuristic over a uniformly random permutation of the input.
    Random,
    /// Teller's ratio heuristic with threshold `tau` in `(0, 1)`.
    Teller { tau: f64 },
}

impl TreeBuilder {
    /// Teller builder with [`DEFAULT_TAU`].
    pub const fn teller() -> Self {
        TreeBuilder::Teller { tau: DEFAULT_TAU }
    }

    /// All builders with their default settings.
    pub const fn all() -> [TreeBuilder; 3] {
        [TreeBuilder::Deterministic, TreeBuilder::Random, TreeBuilder::teller()]
    }

    /// Display name of the strategy, without parameters.
    pub fn name(&self) -> &'static str {
        match self {
            TreeBuilder::Deterministic => "Deterministic",
            TreeBuilder::Random => "Random",
            TreeBuilder::Teller { .. } => "Teller",
        }
    }

    /// Builds a tree from `segments`, leaving the input untouched.
    ///
    /// The random variant draws its permutation from the thread RNG.
    pub fn build(&self, segments: &[Segment]) -> BspTree {
        self.build_with_rng(segments, &mut rand::rng())
    }

    /// Builds a tree, drawing the random permutation (if any) from `rng`.
    pub fn build_with_rng<R: Rng + ?Sized>(&self, segments: &[Segment], rng: &mut R) -> BspTree {
        let working = match self {
            TreeBuilder::Random => {
                let mut shuffled = segments.to_vec();
                shuffled.shuffle(rng);
                shuffled
            }
            _ => segments.to_vec(),
        };

        let tree = match self {
            TreeBuilder::Deterministic | TreeBuilder::Random => {
                BspTree::build(working, &BalanceSelector)
            }
            TreeBuilder::Teller { tau } => BspTree::build(working, &TellerSelector::new(*tau)),
        };

        debug!(
            "{} builder: {} segments -> {} nodes, height {}, {} fragments",
            self,
            segments.len(),
            tree.size(),
            tree.height(),
            tree.segment_count()
        );
        tree
    }
}

impl fmt::Display for TreeBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeBuilder::Teller { tau } => write!(f, "Teller (tau = {tau})"),
            other => f.write_str(other.name()),
        }
    }
}

impl FromStr for TreeBuilder {
    type Err = ParseBuilderError;

    /// Parses a display name, ignoring case. `"Teller"` uses [`DEFAULT_TAU`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        TreeBuilder::all()
            .into_iter()
            .find(|builder| builder.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| ParseBuilderError(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn seg(x1: f64, y1: f64, x2: f64, y2: f64, color: Color) -> Segment {
        Segment::from_coords(x1, y1, x2, y2, color).unwrap()
    }

    fn square() -> Vec<Segment> {
        vec![
            seg(0.0, 0.0, 4.0, 0.0, Color::rgb(1, 0, 0)),
            seg(4.0, 0.0, 4.0, 4.0, Color::rgb(2, 0, 0)),
            seg(4.0, 4.0, 0.0, 4.0, Color::rgb(3, 0, 0)),
            seg(0.0, 4.0, 0.0, 0.0, Color::rgb(4, 0, 0)),
        ]
    }

    /// Scattered segments with a distinct color per input segment.
    fn random_scene(seed: u64, count: u8) -> Vec<Segment> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut segments = Vec::new();
        for i in 0..count {
            let x1 = rng.random_range(-50.0..50.0);
            let y1 = rng.random_range(-50.0..50.0);
            let x2 = x1 + rng.random_range(1.0..20.0);
            let y2 = y1 + rng.random_range(-20.0..20.0);
            segments.push(seg(x1, y1, x2, y2, Color::rgb(i, 0, 0)));
        }
        segments
    }

    fn assert_proper(node: &crate::BspNode) {
        match node {
            crate::BspNode::Leaf { segments } => assert!(segments.len() <= 1),
            crate::BspNode::Internal {
                negative, positive, ..
            } => {
                assert_eq!(node.size(), 1 + negative.size() + positive.size());
                assert_proper(negative);
                assert_proper(positive);
            }
        }
    }

    #[test]
    fn names_round_trip() {
        for builder in TreeBuilder::all() {
            assert_eq!(builder.name().parse::<TreeBuilder>(), Ok(builder));
        }
        assert_eq!("  teller ".parse::<TreeBuilder>(), Ok(TreeBuilder::teller()));
        assert_eq!(
            "bogus".parse::<TreeBuilder>(),
            Err(ParseBuilderError("bogus".to_string()))
        );
    }

    #[test]
    fn display_includes_tau() {
        assert_eq!(TreeBuilder::Deterministic.to_string(), "Deterministic");
        assert_eq!(TreeBuilder::Teller { tau: 0.25 }.to_string(), "Teller (tau = 0.25)");
    }

    #[test]
    fn every_builder_produces_a_proper_tree() {
        let _ = env_logger::builder().is_test(true).try_init();
        let scene = random_scene(7, 40);
        for builder in TreeBuilder::all()
            .into_iter()
            .chain([TreeBuilder::Teller { tau: 1e-7 }, TreeBuilder::Teller { tau: 0.9999999 }])
        {
            let tree = builder.build(&scene);
            assert_proper(tree.root());
            assert!(tree.segment_count() >= scene.len(), "{builder} lost segments");
        }
    }

    #[test]
    fn splitting_conserves_length() {
        let scene = random_scene(42, 30);
        for builder in TreeBuilder::all() {
            let stored = builder.build(&scene).segments();
            for original in &scene {
                let total: f64 = stored
                    .iter()
                    .filter(|s| s.color() == original.color())
                    .map(Segment::length)
                    .sum();
                assert_relative_eq!(total, original.length(), epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn deterministic_is_idempotent() {
        let scene = random_scene(3, 25);
        assert_eq!(
            TreeBuilder::Deterministic.build(&scene),
            TreeBuilder::Deterministic.build(&scene)
        );
    }

    #[test]
    fn random_leaves_input_untouched() {
        let scene = square();
        let before = scene.clone();
        let _ = TreeBuilder::Random.build(&scene);
        assert_eq!(scene, before);
    }

    #[test]
    fn random_varies_root_line() {
        // All four sides tie, so the root is whichever side is shuffled first.
        let scene = square();
        let roots: HashSet<[u64; 3]> = (0..40)
            .map(|_| {
                let tree = TreeBuilder::Random.build(&scene);
                let (a, b, c) = tree.root().partition().unwrap().coefficients();
                [a.to_bits(), b.to_bits(), c.to_bits()]
            })
            .collect();
        assert!(roots.len() > 1);
    }

    #[test]
    fn random_is_reproducible_with_seed() {
        let scene = random_scene(11, 20);
        let first = TreeBuilder::Random.build_with_rng(&scene, &mut StdRng::seed_from_u64(99));
        let second = TreeBuilder::Random.build_with_rng(&scene, &mut StdRng::seed_from_u64(99));
        assert_eq!(first, second);
    }
}
