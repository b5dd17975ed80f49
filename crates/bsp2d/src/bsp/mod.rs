//! Binary Space Partitioning trees over 2D segments.
//!
//! Trees are built top-down: a [`LineSelector`] picks a splitting line among
//! the support lines of the working set, [`partition`] distributes the
//! segments (cutting those that straddle the line), and both halves are built
//! recursively.
//!
//! # Example
//!
//! ```ignore
//! use bsp2d::{BspTree, CollectingVisitor, Point, TreeBuilder};
//!
//! let tree: BspTree = TreeBuilder::teller().build(&segments);
//!
//! let mut visitor = CollectingVisitor::new();
//! tree.traverse_back_to_front(Point::new(0.0, 0.0), &mut visitor);
//! let far_to_near = visitor.into_segments();
//! ```
//!
//! # Architecture
//!
//! - [`BspTree`]: The container holding the root node
//! - [`BspNode`]: Internal nodes storing a splitting line and the segments on it
//! - [`LineSelector`]: Strategy trait for choosing splitting lines
//! - [`TreeBuilder`]: The closed set of strategies (Deterministic, Random, Teller)
//! - [`BspVisitor`]: Visitor trait for custom traversal behavior

mod builder;
mod node;
mod partition;
mod selector;
mod tree;
mod visitor;

pub use builder::{DEFAULT_TAU, TreeBuilder};
pub use node::BspNode;
pub use partition::{Partition, partition};
pub use selector::{
    BalanceCandidate, BalanceSelector, LineSelector, TellerCandidate, TellerSelector,
};
pub use tree::BspTree;
pub use visitor::{BspVisitor, CollectingVisitor, FnVisitor};
