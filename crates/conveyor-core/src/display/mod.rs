//! Markdown formatting of plans, dependencies and edit outcomes.
//!
//! Domain types implement [`std::fmt::Display`] directly (see [`models`]);
//! collections and operation outcomes get newtype wrappers so the same data
//! can be printed differently per context. Everything renders as markdown
//! for the CLI's terminal renderer.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │    Wrappers     │    │    Markdown     │
//! │ (Plan, CloneInfo│───▶│ (Dependencies,  │───▶│     Output      │
//! │  GraphDiff)     │    │  EditReport)    │    │   (terminal)    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ```rust
//! use conveyor_core::display::Dependencies;
//! use conveyor_core::models::{DependencyNode, ResourceType};
//!
//! let nodes = vec![
//!     DependencyNode::new(ResourceType::Net, "net1"),
//!     DependencyNode::new(ResourceType::Subnet, "sub1").depends_on(ResourceType::Net, "net1"),
//! ];
//! let output = Dependencies(nodes).to_string();
//! assert!(output.contains("OS::Neutron::Subnet"));
//! assert!(output.contains("→ OS::Neutron::Net net1"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;

pub use collections::{Dependencies, PlanSummaries, Topology};
pub use datetime::LocalDateTime;
pub use results::{DeleteResult, EditReport};
