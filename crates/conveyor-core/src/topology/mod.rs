//! Force-directed topology of a plan.
//!
//! [`GraphData`] is what the topology endpoint returns, [`diff_graphs`]
//! compares two of them without side effects and [`TopologyView`] applies
//! the result to the node and link sets a [`TopologyRenderer`] draws.

mod diff;
mod node;
mod renderer;
mod view;

#[cfg(test)]
mod tests;

pub use diff::{diff_graphs, GraphDiff, NodeUpdate};
pub use node::{resource_image, truncate_type, GraphData, Link, RenderNode};
pub use renderer::{LayoutParams, NullRenderer, Thumbnail, TopologyRenderer};
pub use view::{TopologyView, ViewState};
