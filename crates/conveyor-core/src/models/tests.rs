#[cfg(test)]
mod model_tests {
    use crate::models::{
        DependencyNode, Plan, PlanFilter, PlanRecord, PlanStatus, PlanSummary, PlanType,
        ResourceType,
    };

    fn create_test_plan() -> Plan {
        Plan::new(
            "plan-789",
            vec![
                DependencyNode::new(ResourceType::Net, "net1").cloned(),
                DependencyNode::new(ResourceType::Subnet, "sub1")
                    .depends_on(ResourceType::Net, "net1"),
                DependencyNode::new(ResourceType::Server, "vm1")
                    .depends_on(ResourceType::Subnet, "sub1"),
            ],
        )
        .with_name("Web tier")
        .with_status(PlanStatus::Available)
    }

    #[test]
    fn test_plan_snapshots_are_independent() {
        let mut plan = create_test_plan();
        plan.updated_dependencies[0].id = "net9".to_string();
        assert_eq!(plan.original_dependencies[0].id, "net1");
    }

    #[test]
    fn test_plan_summary_counts() {
        let mut plan = create_test_plan();
        plan.substitutions.push(crate::models::Substitution {
            resource_type: ResourceType::Net,
            src_id: "net1".to_string(),
            dest_id: "net2".to_string(),
        });

        let summary = PlanSummary::from(&plan);
        assert_eq!(summary.plan_id, "plan-789");
        assert_eq!(summary.total_resources, 3);
        assert_eq!(summary.cloned_resources, 1);
        assert_eq!(summary.pending_updates, 0);
        assert_eq!(summary.substitutions, 1);
    }

    #[test]
    fn test_plan_serde_round_trip_keeps_type_tags() {
        let plan = create_test_plan();
        let json = serde_json::to_string(&plan).unwrap();
        assert!(json.contains("\"OS::Neutron::Subnet\""));
        let back: Plan = serde_json::from_str(&json).unwrap();
        assert_eq!(back, plan);
    }

    #[test]
    fn test_plan_filter_matches() {
        let record = PlanRecord::from(&create_test_plan());

        assert!(PlanFilter::default().matches(&record));
        assert!(PlanFilter::for_type(PlanType::Clone).matches(&record));
        assert!(!PlanFilter::for_type(PlanType::Migrate).matches(&record));

        let by_name = PlanFilter {
            name_contains: Some("web".to_string()),
            ..Default::default()
        };
        assert!(by_name.matches(&record));

        let by_status = PlanFilter {
            plan_status: Some(PlanStatus::Finished),
            ..Default::default()
        };
        assert!(!by_status.matches(&record));
    }
}
