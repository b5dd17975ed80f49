//! BSP tree container and construction.

use log::{trace, warn};
use nalgebra::Point2;

use crate::{LineSide, Line, Segment};

use super::node::BspNode;
use super::partition::{partition, Partition};
use super::selector::LineSelector;
use super::visitor::BspVisitor;

/// A Binary Space Partitioning tree over 2D segments.
///
/// Each internal node splits its region with a line and keeps the segments
/// lying on that line; everything else is pushed into the negative or
/// positive subtree, splitting segments that straddle the line. Leaves hold
/// at most one segment.
///
/// # Construction
///
/// Trees are built from a list of segments using a [`LineSelector`] to choose
/// splitting lines. Most callers go through [`TreeBuilder`](super::TreeBuilder):
///
/// ```ignore
/// use bsp2d::{TreeBuilder, Segment};
///
/// let segments: Vec<Segment> = /* ... */;
/// let tree = TreeBuilder::Deterministic.build(&segments);
/// ```
///
/// # Traversal
///
/// [`BspTree::traverse_back_to_front`] visits node segment groups farthest
/// first relative to a viewpoint, which is the order used by the painter's
/// algorithm.
#[derive(Debug, Clone, PartialEq)]
pub struct BspTree {
    root: BspNode,
}

impl BspTree {
    /// Builds a BSP tree from a list of segments.
    ///
    /// Zero or one segment yields a single leaf.
    pub fn build<S: LineSelector + ?Sized>(segments: Vec<Segment>, selector: &S) -> Self {
        Self {
            root: build_node(segments, None, selector),
        }
    }

    /// Wraps an already constructed root node.
    pub fn from_root(root: BspNode) -> Self {
        Self { root }
    }

    #[inline]
    pub fn root(&self) -> &BspNode {
        &self.root
    }

    /// Returns `true` if the tree stores no segments.
    pub fn is_empty(&self) -> bool {
        self.segment_count() == 0
    }

    /// Number of nodes, leaves included.
    pub fn size(&self) -> usize {
        self.root.size()
    }

    /// Height of the tree (0 for a single leaf).
    pub fn height(&self) -> usize {
        self.root.height()
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Number of segments and fragments stored in the tree.
    pub fn segment_count(&self) -> usize {
        self.root.segment_count()
    }

    /// Collects all stored segments, in pre-order (node list, negative subtree,
    /// positive subtree).
    pub fn segments(&self) -> Vec<Segment> {
        let mut result = Vec::with_capacity(self.segment_count());
        collect_segments_recursive(&self.root, &mut result);
        result
    }

    /// Traverses the tree back-to-front relative to the given viewpoint.
    ///
    /// At each internal node the viewpoint is classified by the exact sign of
    /// the partition line's evaluation:
    /// - positive: negative subtree, coplanar segments, positive subtree
    /// - negative: positive subtree, coplanar segments, negative subtree
    /// - exactly on the line: positive subtree, then negative subtree; the
    ///   coplanar segments are edge-on and are not visited
    ///
    /// Leaves visit their segments in stored order.
    pub fn traverse_back_to_front<V: BspVisitor + ?Sized>(&self, eye: Point2<f64>, visitor: &mut V) {
        traverse_back_to_front_node(&self.root, eye, visitor);
    }
}

/// Recursively builds a BSP node from a list of segments.
///
/// `parent` is the splitting line of the enclosing node, used by the
/// selector's continuity constraint.
pub(crate) fn build_node<S: LineSelector + ?Sized>(
    segments: Vec<Segment>,
    parent: Option<&Line>,
    selector: &S,
) -> BspNode {
    if segments.len() <= 1 {
        return BspNode::leaf(segments);
    }

    let line = match selector.select(&segments, parent) {
        Some(line) => line,
        None => {
            trace!(
                "no acceptable candidate among {} segments, using the first support line",
                segments.len()
            );
            segments[0].support_line()
        }
    };

    let count = segments.len();
    let Partition {
        coplanar,
        positive,
        negative,
    } = partition(segments, &line);

    // Each child shrinks only if the line absorbed at least one segment.
    if coplanar.is_empty() {
        warn!(
            "splitting line {:?} holds none of {} segments, stopping with a leaf",
            line.coefficients(),
            count
        );
        let mut rest = negative;
        rest.extend(positive);
        return BspNode::leaf(rest);
    }

    trace!(
        "split {} segments by {:?}: {} coplanar, {} negative, {} positive",
        count,
        line.coefficients(),
        coplanar.len(),
        negative.len(),
        positive.len()
    );

    let negative_child = build_node(negative, Some(&line), selector);
    let positive_child = build_node(positive, Some(&line), selector);

    BspNode::internal(line, coplanar, negative_child, positive_child)
}

/// Traverses a node subtree back-to-front.
fn traverse_back_to_front_node<V: BspVisitor + ?Sized>(
    node: &BspNode,
    eye: Point2<f64>,
    visitor: &mut V,
) {
    let BspNode::Internal {
        partition,
        coplanar,
        negative,
        positive,
    } = node
    else {
        let segments = node.segments();
        if !segments.is_empty() {
            visitor.visit(segments);
        }
        return;
    };

    match partition.classify_point_with_epsilon(eye, 0.0) {
        LineSide::Positive => {
            // Eye is on the positive side: the negative subtree is farther
            traverse_back_to_front_node(negative, eye, visitor);
            if !coplanar.is_empty() {
                visitor.visit(coplanar);
            }
            traverse_back_to_front_node(positive, eye, visitor);
        }
        LineSide::Negative => {
            traverse_back_to_front_node(positive, eye, visitor);
            if !coplanar.is_empty() {
                visitor.visit(coplanar);
            }
            traverse_back_to_front_node(negative, eye, visitor);
        }
        LineSide::On => {
            traverse_back_to_front_node(positive, eye, visitor);
            traverse_back_to_front_node(negative, eye, visitor);
        }
    }
}

/// Recursively collects all segments from a node subtree.
fn collect_segments_recursive(node: &BspNode, result: &mut Vec<Segment>) {
    result.extend(node.segments().iter().cloned());
    if let Some(negative) = node.negative() {
        collect_segments_recursive(negative, result);
    }
    if let Some(positive) = node.positive() {
        collect_segments_recursive(positive, result);
    }
}
