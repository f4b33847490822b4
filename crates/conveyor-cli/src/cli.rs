//! Plan commands: clap argument wrappers and their handlers.
//!
//! Argument structs stay CLI-only and convert into the core parameter types
//! of [`conveyor_core::params`]:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Repository handlers
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use conveyor_core::{
    display::{DeleteResult, EditReport, Topology},
    models::{PlanFilter, PlanStatus, PlanType, ResourceType},
    params::{
        CloneInfoRequest, LoadPlan, PlanSource, ReplaceResource, ResourceKey, ShowDependencies,
        UpdateResource,
    },
    Repository,
};
use log::debug;

use crate::renderer::TerminalRenderer;

#[derive(Clone, Copy, ValueEnum)]
pub enum PlanTypeArg {
    Clone,
    Migrate,
}

impl From<PlanTypeArg> for PlanType {
    fn from(val: PlanTypeArg) -> Self {
        match val {
            PlanTypeArg::Clone => PlanType::Clone,
            PlanTypeArg::Migrate => PlanType::Migrate,
        }
    }
}

fn parse_status(s: &str) -> Result<PlanStatus, String> {
    s.parse()
}

/// Parses a `name=value` assignment.
fn parse_assignment(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(name, value)| (name.trim().to_string(), value.to_string()))
        .filter(|(name, _)| !name.is_empty())
        .ok_or_else(|| format!("expected name=value, got '{s}'"))
}

/// Parses a `network=subnet,subnet` catalog entry.
fn parse_network(s: &str) -> Result<(String, Vec<String>), String> {
    let (network, subnets) = s
        .split_once('=')
        .ok_or_else(|| format!("expected network=subnet[,subnet...], got '{s}'"))?;
    let subnets = subnets
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .collect();
    Ok((network.trim().to_string(), subnets))
}

/// Load a plan from a dependency graph exported by the backend
///
/// The file holds either a JSON list of dependency nodes or a topology
/// document with `plan` and `dependencies` keys.
#[derive(Args)]
pub struct LoadPlanArgs {
    /// JSON file with the plan's dependency graph
    pub file: PathBuf,
    /// Plan ID; required unless the file carries plan metadata
    #[arg(long)]
    pub id: Option<String>,
    /// Display name of the plan
    #[arg(short, long)]
    pub name: Option<String>,
    /// Plan type, overriding the one in the file
    #[arg(short = 't', long = "type", value_enum)]
    pub plan_type: Option<PlanTypeArg>,
}

/// List stored plans
#[derive(Args)]
pub struct ListPlansArgs {
    /// Only plans of this type
    #[arg(short = 't', long = "type", value_enum)]
    pub plan_type: Option<PlanTypeArg>,
    /// Only plans in this status
    #[arg(short, long, value_parser = parse_status)]
    pub status: Option<PlanStatus>,
    /// Only plans whose name contains this text
    #[arg(short, long)]
    pub name: Option<String>,
}

impl From<ListPlansArgs> for PlanFilter {
    fn from(val: ListPlansArgs) -> Self {
        PlanFilter {
            plan_type: val.plan_type.map(Into::into),
            plan_status: val.status,
            name_contains: val.name,
        }
    }
}

#[derive(Args)]
pub struct PlanIdArgs {
    /// ID of the plan
    pub plan_id: String,
}

/// A plan, optionally narrowed to one resource and its neighbours.
#[derive(Args)]
pub struct FocusArgs {
    /// ID of the plan
    pub plan_id: String,
    /// Resource type tag, e.g. OS::Neutron::Port
    pub resource_type: Option<String>,
    /// Resource ID
    #[arg(requires = "resource_type")]
    pub resource_id: Option<String>,
}

impl TryFrom<FocusArgs> for ShowDependencies {
    type Error = anyhow::Error;

    fn try_from(val: FocusArgs) -> Result<Self> {
        let focus = match (val.resource_type, val.resource_id) {
            (Some(resource_type), Some(resource_id)) => {
                Some((ResourceType::from(resource_type.as_str()), resource_id))
            }
            (None, None) => None,
            (Some(_), None) => anyhow::bail!("a resource type needs a resource ID"),
            (None, Some(_)) => anyhow::bail!("a resource ID needs a resource type"),
        };
        Ok(ShowDependencies {
            plan_id: val.plan_id,
            focus,
        })
    }
}

#[derive(Args)]
pub struct ResourceArgs {
    /// ID of the plan
    pub plan_id: String,
    /// Resource type tag, e.g. OS::Cinder::Volume
    pub resource_type: String,
    /// Resource ID
    pub resource_id: String,
}

impl From<ResourceArgs> for ResourceKey {
    fn from(val: ResourceArgs) -> Self {
        ResourceKey {
            plan_id: val.plan_id,
            resource_type: ResourceType::from(val.resource_type.as_str()),
            resource_id: val.resource_id,
        }
    }
}

/// Edit resource properties
#[derive(Args)]
pub struct EditResourceArgs {
    #[command(flatten)]
    pub resource: ResourceArgs,
    /// Property assignment, repeatable: --set name=value
    #[arg(long = "set", value_parser = parse_assignment, required = true)]
    pub assignments: Vec<(String, String)>,
}

impl From<EditResourceArgs> for UpdateResource {
    fn from(val: EditResourceArgs) -> Self {
        UpdateResource {
            resource: val.resource.into(),
            assignments: val.assignments,
        }
    }
}

/// Replace a resource with an existing one
#[derive(Args)]
pub struct ReplaceResourceArgs {
    #[command(flatten)]
    pub resource: ResourceArgs,
    /// ID of the existing resource taking its place
    pub dest_id: String,
    /// Existing network and its subnets, repeatable: --network net=sub1,sub2
    #[arg(long = "network", value_parser = parse_network)]
    pub networks: Vec<(String, Vec<String>)>,
}

impl From<ReplaceResourceArgs> for ReplaceResource {
    fn from(val: ReplaceResourceArgs) -> Self {
        ReplaceResource {
            resource: val.resource.into(),
            dest_id: val.dest_id,
            networks: val.networks,
        }
    }
}

/// Show the payload a clone submission would send
#[derive(Args)]
pub struct CloneInfoArgs {
    /// ID of the plan
    pub plan_id: String,
    /// Skip resources created by an earlier clone
    #[arg(short, long)]
    pub incremental: bool,
    /// Print the payload as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum PlanCommands {
    /// Load a plan from an exported dependency graph
    Load(LoadPlanArgs),
    /// List stored plans
    #[command(aliases = ["l", "ls"])]
    List(ListPlansArgs),
    /// Show a plan with its resources and pending edits
    #[command(alias = "s")]
    Show(PlanIdArgs),
    /// Show the dependency graph, whole or around one resource
    Deps(FocusArgs),
    /// Show a resource with its pending edits
    Info(ResourceArgs),
    /// Edit resource properties
    #[command(alias = "e")]
    Edit(EditResourceArgs),
    /// Replace a resource with an existing one
    #[command(alias = "r")]
    Replace(ReplaceResourceArgs),
    /// Show the clone payload
    CloneInfo(CloneInfoArgs),
    /// Show the rendered topology, whole or reconciled to one resource
    Topo(FocusArgs),
    /// Delete a stored plan
    #[command(aliases = ["d", "rm"])]
    Delete(PlanIdArgs),
}

/// Runs plan commands against the repository and renders their output.
pub struct Cli {
    repository: Repository,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(repository: Repository, renderer: TerminalRenderer) -> Self {
        Self {
            repository,
            renderer,
        }
    }

    pub async fn handle_plan_command(&self, command: PlanCommands) -> Result<()> {
        match command {
            PlanCommands::Load(args) => self.load_plan(args).await,
            PlanCommands::List(args) => self.list_plans(&args.into()).await,
            PlanCommands::Show(args) => self.show_plan(&args.plan_id).await,
            PlanCommands::Deps(args) => self.show_dependencies(args.try_into()?).await,
            PlanCommands::Info(args) => self.show_resource(args.into()).await,
            PlanCommands::Edit(args) => self.edit_resource(args.into()).await,
            PlanCommands::Replace(args) => self.replace_resource(args.into()).await,
            PlanCommands::CloneInfo(args) => self.clone_info(args).await,
            PlanCommands::Topo(args) => self.topology(args.try_into()?).await,
            PlanCommands::Delete(args) => self.delete_plan(&args.plan_id).await,
        }
    }

    async fn load_plan(&self, args: LoadPlanArgs) -> Result<()> {
        let content = std::fs::read_to_string(&args.file)
            .with_context(|| format!("Failed to read {}", args.file.display()))?;
        let source: PlanSource = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse dependency graph in {}", args.file.display()))?;

        let embedded_id = match &source {
            PlanSource::Topology {
                plan: Some(record), ..
            } => Some(record.plan_id.clone()),
            _ => None,
        };
        let plan_id = args
            .id
            .or(embedded_id)
            .context("The file carries no plan metadata; pass --id")?;

        let plan = self
            .repository
            .load_plan(&LoadPlan {
                plan_id,
                plan_name: args.name,
                plan_type: args.plan_type.map(Into::into),
                source,
            })
            .await
            .context("Failed to load plan")?;

        let output = format!(
            "Loaded plan {} with {} resources.\n\n{plan}",
            plan.plan_id,
            plan.updated_dependencies.len()
        );
        self.renderer.render(&output)
    }

    pub async fn list_plans(&self, filter: &PlanFilter) -> Result<()> {
        let summaries = self
            .repository
            .list_plans_summary(filter)
            .await
            .context("Failed to list plans")?;
        debug!("Listing {} plans", summaries.len());
        self.renderer.render(&summaries.to_string())
    }

    async fn show_plan(&self, plan_id: &str) -> Result<()> {
        let plan = self
            .repository
            .require_plan(plan_id)
            .await
            .context("Failed to show plan")?;
        self.renderer.render(&plan.to_string())
    }

    async fn show_dependencies(&self, params: ShowDependencies) -> Result<()> {
        let dependencies = self
            .repository
            .show_dependencies(&params)
            .await
            .context("Failed to show dependencies")?;
        self.renderer.render(&dependencies.to_string())
    }

    async fn show_resource(&self, key: ResourceKey) -> Result<()> {
        let info = self
            .repository
            .show_resource(&key)
            .await
            .context("Failed to show resource")?;
        self.renderer.render(&info.to_string())
    }

    async fn edit_resource(&self, params: UpdateResource) -> Result<()> {
        let outcome = self
            .repository
            .update_resource(&params)
            .await
            .context("Failed to edit resource")?;
        let report = EditReport {
            plan_id: &params.resource.plan_id,
            resource_type: &params.resource.resource_type,
            resource_id: &params.resource.resource_id,
            edit: &outcome.edit,
            applied: outcome.applied,
        };
        self.renderer.render(&report.to_string())
    }

    async fn replace_resource(&self, params: ReplaceResource) -> Result<()> {
        let outcome = self
            .repository
            .replace_resource(&params)
            .await
            .context("Failed to replace resource")?;
        let report = EditReport {
            plan_id: &params.resource.plan_id,
            resource_type: &params.resource.resource_type,
            resource_id: &params.resource.resource_id,
            edit: &outcome.edit,
            applied: outcome.applied,
        };
        self.renderer.render(&report.to_string())
    }

    async fn clone_info(&self, args: CloneInfoArgs) -> Result<()> {
        let info = self
            .repository
            .clone_info(&CloneInfoRequest {
                plan_id: args.plan_id,
                incremental: args.incremental,
            })
            .await
            .context("Failed to compute clone payload")?;

        if args.json {
            let json = serde_json::to_string_pretty(&info).context("Failed to serialize payload")?;
            println!("{json}");
            Ok(())
        } else {
            self.renderer.render(&info.to_string())
        }
    }

    async fn topology(&self, params: ShowDependencies) -> Result<()> {
        let (view, diff) = self
            .repository
            .topology(&params)
            .await
            .context("Failed to build topology")?;

        let mut output = Topology {
            nodes: view.nodes(),
            links: view.links(),
        }
        .to_string();
        if let Some(diff) = diff {
            output.push_str("\n## Changes\n\n");
            output.push_str(&diff.to_string());
        }
        self.renderer.render(&output)
    }

    async fn delete_plan(&self, plan_id: &str) -> Result<()> {
        let deleted = self
            .repository
            .delete_plan(plan_id)
            .await
            .context("Failed to delete plan")?;
        self.renderer.render(&DeleteResult { plan_id, deleted }.to_string())
    }
}
