//! BSP tree node implementation.

use crate::{Line, Segment};

/// A node in the BSP tree.
///
/// An internal node partitions the plane with a line, stores the segments
/// lying on that line, and owns exactly two subtrees: the negative half-plane
/// (left) and the positive half-plane (right). A leaf stores the segments of
/// its region and has no partition.
///
/// Whether a node is internal or a leaf is fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub enum BspNode {
    Internal {
        /// The splitting line for this node.
        partition: Line,
        /// Segments lying on the partition line.
        coplanar: Vec<Segment>,
        /// Subtree for the negative half-plane.
        negative: Box<BspNode>,
        /// Subtree for the positive half-plane.
        positive: Box<BspNode>,
    },
    Leaf {
        segments: Vec<Segment>,
    },
}

impl BspNode {
    /// Creates a leaf holding the given segments.
    pub fn leaf(segments: Vec<Segment>) -> Self {
        BspNode::Leaf { segments }
    }

    /// Creates an internal node from a partition line, its coplanar segments
    /// and both subtrees.
    pub fn internal(
        partition: Line,
        coplanar: Vec<Segment>,
        negative: BspNode,
        positive: BspNode,
    ) -> Self {
        BspNode::Internal {
            partition,
            coplanar,
            negative: Box::new(negative),
            positive: Box::new(positive),
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, BspNode::Leaf { .. })
    }

    /// Returns the partition line, or `None` for a leaf.
    #[inline]
    pub fn partition(&self) -> Option<&Line> {
        match self {
            BspNode::Internal { partition, .. } => Some(partition),
            BspNode::Leaf { .. } => None,
        }
    }

    /// Returns the segments stored at this node: the coplanar list of an
    /// internal node, or the contents of a leaf.
    #[inline]
    pub fn segments(&self) -> &[Segment] {
        match self {
            BspNode::Internal { coplanar, .. } => coplanar,
            BspNode::Leaf { segments } => segments,
        }
    }

    /// Returns the negative (left) subtree.
    #[inline]
    pub fn negative(&self) -> Option<&BspNode> {
        match self {
            BspNode::Internal { negative, .. } => Some(negative.as_ref()),
            BspNode::Leaf { .. } => None,
        }
    }

    /// Returns the positive (right) subtree.
    #[inline]
    pub fn positive(&self) -> Option<&BspNode> {
        match self {
            BspNode::Internal { positive, .. } => Some(positive.as_ref()),
            BspNode::Leaf { .. } => None,
        }
    }

    /// Number of nodes in this subtree. A leaf counts as 1.
    pub fn size(&self) -> usize {
        match self {
            BspNode::Internal {
                negative, positive, ..
            } => 1 + negative.size() + positive.size(),
            BspNode::Leaf { .. } => 1,
        }
    }

    /// Height of this subtree. A leaf has height 0.
    pub fn height(&self) -> usize {
        match self {
            BspNode::Internal {
                negative, positive, ..
            } => 1 + negative.height().max(positive.height()),
            BspNode::Leaf { .. } => 0,
        }
    }

    /// Number of leaves in this subtree.
    pub fn leaf_count(&self) -> usize {
        match self {
            BspNode::Internal {
                negative, positive, ..
            } => negative.leaf_count() + positive.leaf_count(),
            BspNode::Leaf { .. } => 1,
        }
    }

    /// Total number of segments (including fragments) stored in this subtree.
    pub fn segment_count(&self) -> usize {
        let own = self.segments().len();
        match self {
            BspNode::Internal {
                negative, positive, ..
            } => own + negative.segment_count() + positive.segment_count(),
            BspNode::Leaf { .. } => own,
        }
    }
}
