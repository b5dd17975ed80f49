//! Callbacks for back-to-front traversal.

use crate::Segment;

/// Receives the segment groups of a tree in traversal order.
///
/// A group is either the coplanar list of an internal node or the contents of
/// a leaf. Empty groups are never passed.
pub trait BspVisitor {
    fn visit(&mut self, segments: &[Segment]);
}

impl<V: BspVisitor + ?Sized> BspVisitor for &mut V {
    fn visit(&mut self, segments: &[Segment]) {
        (**self).visit(segments);
    }
}

/// Clones every visited segment into a flat list, remembering how many
/// groups it saw.
#[derive(Debug, Default)]
pub struct CollectingVisitor {
    collected: Vec<Segment>,
    groups: usize,
}

impl CollectingVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.collected
    }

    /// Number of non-empty groups visited so far.
    pub fn group_count(&self) -> usize {
        self.groups
    }

    pub fn into_segments(self) -> Vec<Segment> {
        self.collected
    }
}

impl BspVisitor for CollectingVisitor {
    fn visit(&mut self, segments: &[Segment]) {
        self.groups += 1;
        self.collected.extend_from_slice(segments);
    }
}

/// Adapts a closure into a [`BspVisitor`].
pub struct FnVisitor<F>(F);

impl<F: FnMut(&[Segment])> FnVisitor<F> {
    pub fn new(func: F) -> Self {
        Self(func)
    }
}

impl<F: FnMut(&[Segment])> BspVisitor for FnVisitor<F> {
    fn visit(&mut self, segments: &[Segment]) {
        (self.0)(segments);
    }
}
