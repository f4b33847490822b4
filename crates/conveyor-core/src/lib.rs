//! Core library of the conveyor migration plan editor.
//!
//! A plan is a dependency graph of cloud resources (servers, volumes,
//! networks, subnets, ports, ...) to clone or migrate into another
//! availability zone. This crate holds the plan model and everything around
//! it:
//!
//! - [`models`]: resources, dependency nodes, plans and backend payloads
//! - [`graph`]: arena index used by every traversal
//! - [`plan`]: the [`PlanStore`], structural queries and substitution cascades
//! - [`topology`]: render graph, pure diff and the reconciling view
//! - [`fields`]: extraction of edits from resource forms
//! - [`api`]: the backend interface
//! - [`session`]: an edit session tying model, view and backend together
//! - [`db`] / [`store`]: SQLite persistence of edited plans, with the
//!   handlers taking [`params`]
//! - [`display`]: markdown output
//!
//! # Quick Start
//!
//! ```rust
//! use conveyor_core::{RepositoryBuilder, models::{DependencyNode, Plan, ResourceType}};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let repository = RepositoryBuilder::new()
//!     .with_database_path(Some("plans.db"))
//!     .build()
//!     .await?;
//!
//! let plan = Plan::new(
//!     "plan-1",
//!     vec![DependencyNode::new(ResourceType::Server, "vm1")],
//! );
//! repository.save_plan(&plan).await?;
//!
//! let store = repository.open("plan-1").await?;
//! println!("{}", store.get_plan("plan-1").map(|p| p.to_string()).unwrap_or_default());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod db;
pub mod display;
pub mod error;
pub mod fields;
pub mod graph;
pub mod models;
pub mod params;
pub mod plan;
pub mod session;
pub mod store;
pub mod topology;

// Re-export commonly used types
pub use api::{EditResponse, LogNotifier, Notifier, PlanApi, TopologyResponse};
pub use db::Database;
pub use display::{Dependencies, PlanSummaries};
pub use error::{ConveyorError, Result};
pub use models::{
    CloneInfo, DependencyNode, EditResult, Plan, PlanFilter, PlanStatus, PlanSummary, PlanType,
    ResourceType,
};
pub use plan::{PlanStore, ResourceCatalog, StaticCatalog};
pub use session::{CloneOptions, EditSession, SaveOutcome};
pub use store::{Repository, RepositoryBuilder};
pub use topology::{GraphData, TopologyRenderer, TopologyView};
