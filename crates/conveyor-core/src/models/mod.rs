//! Data models for plans and their dependency graphs.
//!
//! A [`Plan`] owns two snapshots of a resource dependency graph: the
//! original one taken when the plan was loaded and the working copy that
//! edits mutate. Each snapshot is an ordered list of [`DependencyNode`]s
//! whose `dependencies` point at other nodes of the same snapshot
//! (dependent → dependency).
//!
//! Display implementations for these models live in
//! [`crate::display::models`].
//!
//! # Examples
//!
//! ```rust
//! use conveyor_core::models::{DependencyNode, Plan, ResourceType};
//!
//! let graph = vec![
//!     DependencyNode::new(ResourceType::Net, "net1"),
//!     DependencyNode::new(ResourceType::Subnet, "sub1").depends_on(ResourceType::Net, "net1"),
//! ];
//! let plan = Plan::new("plan-1", graph);
//! assert_eq!(plan.original_dependencies, plan.updated_dependencies);
//! ```

pub mod filters;
pub mod plan;
pub mod requests;
pub mod resource;
pub mod status;
pub mod summary;

#[cfg(test)]
mod tests;

pub use filters::PlanFilter;
pub use plan::{Plan, ResourceUpdate, Substitution};
pub use requests::{
    AzMap, CloneInfo, CloneLink, CloneRequest, CloneResource, CreatePlan, EditResult,
    ResourceEdit, ResourceShowInfo,
};
pub use resource::{DependencyNode, DependencyRef, FixedIp, ResourceType};
pub use status::{PlanStatus, PlanType};
pub use summary::{PlanRecord, PlanSummary};
