//! Family model: the root that owns parents, children and scenarios.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

use super::{Child, Parent, ParentRole, Scenario};

/// Maximum number of saved scenarios per family.
pub const MAX_SCENARIOS: usize = 3;

/// What the family cares most about when planning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanningPriority {
    /// Keep household income as high as possible.
    MaximizeIncome,
    /// Split days evenly between the parents.
    EqualSplit,
    /// Stretch the time at home as long as possible.
    MaxTime,
}

/// How familiar the family is with the benefit rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnowledgeLevel {
    /// New to the system.
    Beginner,
    /// Knows the basics.
    Some,
    /// Knows the terminology.
    Good,
}

/// A family snapshot passed into the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Family {
    /// Unique identifier for the family.
    pub id: Uuid,
    /// One or two parents, at most one per role.
    pub parents: Vec<Parent>,
    /// Children. Only the earliest-born one drives the calculations.
    #[serde(default)]
    pub children: Vec<Child>,
    /// Saved leave plans.
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
    /// Optional planning priority.
    #[serde(default)]
    pub planning_priority: Option<PlanningPriority>,
    /// Optional knowledge level.
    #[serde(default)]
    pub knowledge_level: Option<KnowledgeLevel>,
}

impl Family {
    /// Creates a validated family without scenarios.
    pub fn new(parents: Vec<Parent>, children: Vec<Child>) -> EngineResult<Self> {
        let family = Self {
            id: Uuid::new_v4(),
            parents,
            children,
            scenarios: Vec::new(),
            planning_priority: None,
            knowledge_level: None,
        };
        family.validate_members()?;
        Ok(family)
    }

    /// Adds a scenario, refusing more than [`MAX_SCENARIOS`].
    pub fn add_scenario(&mut self, scenario: Scenario) -> EngineResult<()> {
        if self.scenarios.len() >= MAX_SCENARIOS {
            return Err(EngineError::ScenarioLimitReached {
                limit: MAX_SCENARIOS,
            });
        }
        scenario.validate()?;
        self.scenarios.push(scenario);
        Ok(())
    }

    /// Removes a scenario. Its blocks go with it.
    pub fn remove_scenario(&mut self, id: Uuid) -> Option<Scenario> {
        let index = self.scenarios.iter().position(|s| s.id == id)?;
        Some(self.scenarios.remove(index))
    }

    /// Validates a deserialized snapshot in full.
    pub fn validate(&self, today: NaiveDate) -> EngineResult<()> {
        self.validate_members()?;

        for child in &self.children {
            child.validate(today)?;
        }

        if self.scenarios.len() > MAX_SCENARIOS {
            return Err(EngineError::ScenarioLimitReached {
                limit: MAX_SCENARIOS,
            });
        }
        for scenario in &self.scenarios {
            scenario.validate()?;
        }

        Ok(())
    }

    fn validate_members(&self) -> EngineResult<()> {
        for parent in &self.parents {
            parent.validate()?;
        }

        for role in [ParentRole::First, ParentRole::Second] {
            if self.parents.iter().filter(|p| p.role == role).count() > 1 {
                return Err(EngineError::InvalidParent {
                    field: "role".to_string(),
                    message: format!("more than one parent with role {}", role),
                });
            }
        }

        Ok(())
    }

    /// The parent holding the given role.
    pub fn parent(&self, role: ParentRole) -> Option<&Parent> {
        self.parents.iter().find(|p| p.role == role)
    }

    /// Mutable access to the parent holding the given role.
    pub fn parent_mut(&mut self, role: ParentRole) -> Option<&mut Parent> {
        self.parents.iter_mut().find(|p| p.role == role)
    }

    /// The first parent.
    pub fn parent1(&self) -> Option<&Parent> {
        self.parent(ParentRole::First)
    }

    /// The second parent.
    pub fn parent2(&self) -> Option<&Parent> {
        self.parent(ParentRole::Second)
    }

    /// True when the family has at most one parent.
    pub fn is_single_parent(&self) -> bool {
        self.parents.len() <= 1
    }

    /// The earliest-born child, which drives all day totals and deadlines.
    pub fn first_child(&self) -> Option<&Child> {
        self.children.iter().min_by_key(|c| c.birth_date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Multiplicity;
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn parent(role: ParentRole) -> Parent {
        Parent::new("Test", role, Decimal::from(30_000)).unwrap()
    }

    #[test]
    fn test_duplicate_role_rejected() {
        let result = Family::new(vec![parent(ParentRole::First), parent(ParentRole::First)], vec![]);
        assert!(matches!(result, Err(EngineError::InvalidParent { .. })));
    }

    #[test]
    fn test_parent_lookup_by_role() {
        let family =
            Family::new(vec![parent(ParentRole::Second), parent(ParentRole::First)], vec![]).unwrap();

        assert_eq!(family.parent1().unwrap().role, ParentRole::First);
        assert_eq!(family.parent2().unwrap().role, ParentRole::Second);
        assert!(!family.is_single_parent());
    }

    #[test]
    fn test_first_child_is_earliest_born() {
        let older = Child::new(date(2024, 2, 1), true, Multiplicity::Single);
        let younger = Child::new(date(2026, 1, 1), true, Multiplicity::Twins);
        let family = Family::new(vec![parent(ParentRole::First)], vec![younger, older]).unwrap();

        assert_eq!(family.first_child().unwrap().birth_date, date(2024, 2, 1));
        assert!(family.is_single_parent());
    }

    #[test]
    fn test_scenario_limit() {
        let mut family = Family::new(vec![parent(ParentRole::First)], vec![]).unwrap();
        for i in 0..MAX_SCENARIOS {
            family.add_scenario(Scenario::new(format!("Plan {}", i + 1))).unwrap();
        }

        match family.add_scenario(Scenario::new("Plan 4")) {
            Err(EngineError::ScenarioLimitReached { limit }) => assert_eq!(limit, 3),
            other => panic!("Expected ScenarioLimitReached, got {:?}", other),
        }
    }

    #[test]
    fn test_remove_scenario() {
        let mut family = Family::new(vec![parent(ParentRole::First)], vec![]).unwrap();
        let scenario = Scenario::new("Plan 1");
        let id = scenario.id;
        family.add_scenario(scenario).unwrap();

        assert!(family.remove_scenario(id).is_some());
        assert!(family.scenarios.is_empty());
    }

    #[test]
    fn test_validate_checks_children() {
        let child = Child::new(date(2027, 3, 1), true, Multiplicity::Single);
        let family = Family::new(vec![parent(ParentRole::First)], vec![child]).unwrap();

        assert!(matches!(
            family.validate(date(2026, 10, 19)),
            Err(EngineError::InvalidChild { .. })
        ));
    }

    #[test]
    fn test_preferences_serialization() {
        assert_eq!(
            serde_json::to_string(&PlanningPriority::MaximizeIncome).unwrap(),
            "\"maximize_income\""
        );
        assert_eq!(
            serde_json::to_string(&KnowledgeLevel::Beginner).unwrap(),
            "\"beginner\""
        );
    }
}
