//! Status enumerations for plans.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What a plan is for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    /// Copy resources into another availability zone
    #[default]
    Clone,

    /// Move resources into another availability zone
    Migrate,
}

impl FromStr for PlanType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "clone" => Ok(PlanType::Clone),
            "migrate" => Ok(PlanType::Migrate),
            _ => Err(format!("Invalid plan type: {s}")),
        }
    }
}

impl PlanType {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanType::Clone => "clone",
            PlanType::Migrate => "migrate",
        }
    }
}

/// Backend lifecycle status of a plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    Initiating,
    Creating,
    #[default]
    Available,
    Cloning,
    Migrating,
    Finished,
    Error,
    Cancelled,
    #[serde(untagged)]
    Other(String),
}

impl FromStr for PlanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "initiating" => PlanStatus::Initiating,
            "creating" => PlanStatus::Creating,
            "available" => PlanStatus::Available,
            "cloning" => PlanStatus::Cloning,
            "migrating" => PlanStatus::Migrating,
            "finished" => PlanStatus::Finished,
            "error" => PlanStatus::Error,
            "cancelled" => PlanStatus::Cancelled,
            "" => return Err("Empty plan status".to_string()),
            _ => PlanStatus::Other(s.to_string()),
        })
    }
}

impl PlanStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &str {
        match self {
            PlanStatus::Initiating => "initiating",
            PlanStatus::Creating => "creating",
            PlanStatus::Available => "available",
            PlanStatus::Cloning => "cloning",
            PlanStatus::Migrating => "migrating",
            PlanStatus::Finished => "finished",
            PlanStatus::Error => "error",
            PlanStatus::Cancelled => "cancelled",
            PlanStatus::Other(status) => status,
        }
    }

    /// Only available or finished plans accept a clone submission.
    pub fn can_clone(&self) -> bool {
        matches!(self, PlanStatus::Available | PlanStatus::Finished)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_status_parse() {
        assert_eq!("Finished".parse::<PlanStatus>(), Ok(PlanStatus::Finished));
        assert_eq!(
            "paused".parse::<PlanStatus>(),
            Ok(PlanStatus::Other("paused".to_string()))
        );
        assert!("".parse::<PlanStatus>().is_err());
    }

    #[test]
    fn test_can_clone() {
        assert!(PlanStatus::Available.can_clone());
        assert!(PlanStatus::Finished.can_clone());
        assert!(!PlanStatus::Cloning.can_clone());
        assert!(!PlanStatus::Other("paused".into()).can_clone());
    }

    #[test]
    fn test_plan_type_parse() {
        assert_eq!("migrate".parse::<PlanType>(), Ok(PlanType::Migrate));
        assert!("move".parse::<PlanType>().is_err());
    }

    #[test]
    fn test_plan_status_serde_keeps_unknown_values() {
        let status: PlanStatus = serde_json::from_str("\"paused\"").unwrap();
        assert_eq!(status, PlanStatus::Other("paused".to_string()));
        let status: PlanStatus = serde_json::from_str("\"cloning\"").unwrap();
        assert_eq!(status, PlanStatus::Cloning);
    }
}
