//! The CLI prints exactly the markdown of the core display types.

use std::process::Command;

use conveyor_core::{
    display::Dependencies,
    models::{DependencyNode, Plan, PlanType, ResourceType},
    params::ShowDependencies,
    PlanFilter, Repository, RepositoryBuilder,
};
use tempfile::TempDir;

async fn create_test_repository() -> (Repository, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test.db");

    let repository = RepositoryBuilder::new()
        .with_database_path(Some(db_path))
        .build()
        .await
        .expect("Failed to create repository");

    (repository, temp_dir)
}

fn run_cli_command(db_path: &str, args: &[&str]) -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_conveyor"))
        .arg("--no-color")
        .arg("--database-file")
        .arg(db_path)
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    assert!(
        output.status.success(),
        "CLI command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("Invalid UTF-8 in CLI output")
}

fn sample_plan() -> Plan {
    Plan::new(
        "plan-1",
        vec![
            DependencyNode::new(ResourceType::Net, "net1"),
            DependencyNode::new(ResourceType::Subnet, "sub1").depends_on(ResourceType::Net, "net1"),
            DependencyNode::new(ResourceType::Server, "vm1").cloned(),
        ],
    )
    .with_name("web tier")
    .with_type(PlanType::Migrate)
}

#[tokio::test]
async fn test_show_matches_plan_display() {
    let (repository, _temp_dir) = create_test_repository().await;
    let plan = sample_plan();
    repository.save_plan(&plan).await.expect("Failed to save plan");

    let stored = repository.require_plan("plan-1").await.expect("Plan should exist");
    let db_path = repository.database_path().to_string_lossy().into_owned();
    let output = run_cli_command(&db_path, &["plan", "show", "plan-1"]);

    assert_eq!(output, stored.to_string());
}

#[tokio::test]
async fn test_list_matches_summaries_display() {
    let (repository, _temp_dir) = create_test_repository().await;
    repository
        .save_plan(&sample_plan())
        .await
        .expect("Failed to save plan");

    let summaries = repository
        .list_plans_summary(&PlanFilter::default())
        .await
        .expect("Failed to list plans");
    let db_path = repository.database_path().to_string_lossy().into_owned();

    assert_eq!(run_cli_command(&db_path, &["plan", "list"]), summaries.to_string());
    assert_eq!(run_cli_command(&db_path, &[]), summaries.to_string());
}

#[tokio::test]
async fn test_deps_matches_dependencies_display() {
    let (repository, _temp_dir) = create_test_repository().await;
    repository
        .save_plan(&sample_plan())
        .await
        .expect("Failed to save plan");

    let deps: Dependencies = repository
        .show_dependencies(&ShowDependencies {
            plan_id: "plan-1".to_string(),
            focus: Some((ResourceType::Subnet, "sub1".to_string())),
        })
        .await
        .expect("Failed to show dependencies");
    let db_path = repository.database_path().to_string_lossy().into_owned();
    let output = run_cli_command(
        &db_path,
        &["plan", "deps", "plan-1", "OS::Neutron::Subnet", "sub1"],
    );

    assert_eq!(output, deps.to_string());
    assert_eq!(deps.len(), 2);
}
