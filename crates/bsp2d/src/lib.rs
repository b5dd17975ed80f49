//! 2D Binary Space Partitioning over colored segments, with painter's-algorithm
//! 360° views.
//!
//! Build a [`BspTree`] with one of the [`TreeBuilder`] strategies, then
//! [`paint`] it from any viewpoint to get the angular extent of every visible
//! fragment in back-to-front order.

pub mod bsp;
mod cuttable;
mod error;
mod line;
mod segment;
mod view;

pub use bsp::{
    BalanceCandidate, BalanceSelector, BspNode, BspTree, BspVisitor, CollectingVisitor,
    DEFAULT_TAU, FnVisitor, LineSelector, Partition, TellerCandidate, TellerSelector,
    TreeBuilder,
};
pub use cuttable::Cuttable;
pub use error::{GeometryError, ParseBuilderError};
pub use line::{Classification, EPSILON, Line, LineSide};
pub use segment::{Color, Point, Segment};
#[cfg(feature = "parallel")]
pub use view::paint_many;
pub use view::{AngularSegment, View, angular_projection, paint};
