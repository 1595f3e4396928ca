//! Request types for the parental leave engine API.
//!
//! Every endpoint takes the same body: a family snapshot, an optional
//! scenario, and optional overrides for the calculation date, rule year
//! and projection horizon. The request types carry no identifiers; they
//! are converted into validated domain types before any calculation runs.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::RuleConstants;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Child, EmployerTopUp, Family, KnowledgeLevel, LeaveBlock, LeaveDayType, LeaveFraction,
    Multiplicity, Parent, ParentRole, PayLevel, PlanningPriority, Scenario,
};

/// Request body shared by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanningRequest {
    /// The family snapshot.
    pub family: FamilyRequest,
    /// The plan to project or summarize. Required by the scenario endpoints.
    #[serde(default)]
    pub scenario: Option<ScenarioRequest>,
    /// The date calculations are relative to. Defaults to today.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
    /// Rule year to apply. Defaults to the year of `as_of`.
    #[serde(default)]
    pub rule_year: Option<i32>,
    /// Months to project. Defaults to 48 and is capped at 48.
    #[serde(default)]
    pub horizon_months: Option<u32>,
}

/// Family information in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyRequest {
    /// One or two parents.
    pub parents: Vec<ParentRequest>,
    /// Children; the earliest-born one drives the calculations.
    #[serde(default)]
    pub children: Vec<ChildRequest>,
    /// Optional planning priority.
    #[serde(default)]
    pub planning_priority: Option<PlanningPriority>,
    /// Optional knowledge level.
    #[serde(default)]
    pub knowledge_level: Option<KnowledgeLevel>,
}

/// Parent information in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParentRequest {
    /// Display name.
    pub name: String,
    /// First or second parent.
    pub role: ParentRole,
    /// Monthly gross income in kronor.
    pub monthly_gross_income: Decimal,
    /// Optional employer top-up.
    #[serde(default)]
    pub employer_top_up: Option<EmployerTopUp>,
    /// Föräldrapenning days already taken but not logged day by day.
    #[serde(default)]
    pub days_taken: u32,
    /// Individually logged days.
    #[serde(default)]
    pub leave_days: Vec<LeaveDayRequest>,
}

/// A logged day in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveDayRequest {
    /// The calendar date.
    pub date: NaiveDate,
    /// What kind of leave the day was.
    pub leave_type: LeaveDayType,
    /// The tier it was paid at.
    pub pay_level: PayLevel,
    /// Planned rather than taken.
    #[serde(default)]
    pub is_planned: bool,
}

/// Child information in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildRequest {
    /// Optional name.
    #[serde(default)]
    pub name: Option<String>,
    /// Birth date, or due date when not yet born.
    pub birth_date: NaiveDate,
    /// Whether the child has been born.
    pub is_born: bool,
    /// Single, twins or more.
    #[serde(default)]
    pub multiplicity: Multiplicity,
}

/// A leave plan in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioRequest {
    /// Display name.
    #[serde(default = "default_scenario_name")]
    pub name: String,
    /// The blocks of the plan.
    #[serde(default)]
    pub blocks: Vec<LeaveBlockRequest>,
}

fn default_scenario_name() -> String {
    "Plan 1".to_string()
}

/// A leave block in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveBlockRequest {
    /// First day of leave.
    pub start_date: NaiveDate,
    /// First day after the leave (exclusive).
    pub end_date: NaiveDate,
    /// Which parent takes the leave.
    pub parent: ParentRole,
    /// The compensation tier drawn.
    pub pay_level: PayLevel,
    /// Share of each day drawn: 1, 0.75, 0.5, 0.25 or 0.125.
    pub fraction: LeaveFraction,
}

impl ParentRequest {
    fn into_parent(
        self,
        first_child: Option<&Child>,
        rules: &RuleConstants,
        today: NaiveDate,
    ) -> EngineResult<Parent> {
        let mut parent = Parent::new(self.name, self.role, self.monthly_gross_income)?;
        if let Some(top_up) = self.employer_top_up {
            parent = parent.with_top_up(top_up.percentage, top_up.months)?;
        }

        for day in self.leave_days {
            parent.log_day(day.date, day.leave_type, day.pay_level, day.is_planned);
        }

        if self.days_taken > 0 {
            let Some(child) = first_child else {
                return Err(EngineError::InvalidParent {
                    field: "days_taken".to_string(),
                    message: "days already taken require a child".to_string(),
                });
            };
            let available = rules.total_days(child.multiplicity);
            if self.days_taken > available {
                return Err(EngineError::InvalidParent {
                    field: "days_taken".to_string(),
                    message: format!(
                        "{} days taken but only {} days exist",
                        self.days_taken, available
                    ),
                });
            }
            let birth = child.birth_date;
            let seeded = parent.seed_taken_days(self.days_taken, birth, today);
            if seeded < self.days_taken {
                return Err(EngineError::InvalidParent {
                    field: "days_taken".to_string(),
                    message: format!(
                        "{} days taken but only {} weekdays between {} and {}",
                        self.days_taken, seeded, birth, today
                    ),
                });
            }
        }

        Ok(parent)
    }
}

impl From<ChildRequest> for Child {
    fn from(req: ChildRequest) -> Self {
        let mut child = Child::new(req.birth_date, req.is_born, req.multiplicity);
        child.name = req.name;
        child
    }
}

impl FamilyRequest {
    /// Converts the request into a validated family.
    ///
    /// `days_taken` is seeded as individual weekdays walking back from
    /// `today`, never before the earliest child's birth date, and may not
    /// exceed the days that child carries under `rules`.
    pub fn into_family(self, rules: &RuleConstants, today: NaiveDate) -> EngineResult<Family> {
        let children: Vec<Child> = self.children.into_iter().map(Into::into).collect();
        let first_child = children.iter().min_by_key(|c| c.birth_date);

        let parents = self
            .parents
            .into_iter()
            .map(|p| p.into_parent(first_child, rules, today))
            .collect::<EngineResult<Vec<_>>>()?;

        let mut family = Family::new(parents, children)?;
        family.planning_priority = self.planning_priority;
        family.knowledge_level = self.knowledge_level;
        family.validate(today)?;
        Ok(family)
    }
}

impl ScenarioRequest {
    /// Converts the request into a validated scenario.
    ///
    /// Rejects blocks that end before they start and blocks overlapping
    /// another block of the same parent.
    pub fn into_scenario(self) -> EngineResult<Scenario> {
        let mut scenario = Scenario::new(self.name);
        for block in self.blocks {
            scenario.add_block(LeaveBlock::new(
                block.start_date,
                block.end_date,
                block.parent,
                block.pay_level,
                block.fraction,
            )?)?;
        }
        Ok(scenario)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rules() -> RuleConstants {
        RuleConstants::embedded().unwrap()
    }

    #[test]
    fn test_deserialize_planning_request() {
        let json = r#"{
            "family": {
                "parents": [
                    {
                        "name": "Anna",
                        "role": "first",
                        "monthly_gross_income": "35000",
                        "employer_top_up": { "percentage": 90, "months": 6 },
                        "days_taken": 20
                    },
                    { "name": "Bo", "role": "second", "monthly_gross_income": 42000 }
                ],
                "children": [
                    { "birth_date": "2026-03-01", "is_born": true, "multiplicity": "twins" }
                ],
                "planning_priority": "equal_split"
            },
            "scenario": {
                "blocks": [
                    {
                        "start_date": "2026-11-02",
                        "end_date": "2027-02-01",
                        "parent": "second",
                        "pay_level": "sgi_level",
                        "fraction": "0.5"
                    }
                ]
            },
            "as_of": "2026-10-19"
        }"#;

        let request: PlanningRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.family.parents.len(), 2);
        assert_eq!(request.family.parents[0].days_taken, 20);
        assert_eq!(request.family.parents[1].days_taken, 0);
        assert_eq!(request.family.children[0].multiplicity, Multiplicity::Twins);

        let scenario = request.scenario.unwrap();
        assert_eq!(scenario.name, "Plan 1");
        assert_eq!(scenario.blocks[0].fraction, LeaveFraction::Half);
        assert_eq!(request.as_of, Some(date(2026, 10, 19)));
        assert!(request.rule_year.is_none());
    }

    #[test]
    fn test_unsupported_fraction_rejected() {
        let json = r#"{
            "start_date": "2026-11-02",
            "end_date": "2026-12-01",
            "parent": "first",
            "pay_level": "basic_level",
            "fraction": "0.6"
        }"#;
        assert!(serde_json::from_str::<LeaveBlockRequest>(json).is_err());
    }

    #[test]
    fn test_unknown_pay_level_rejected() {
        let json = r#"{
            "start_date": "2026-11-02",
            "end_date": "2026-12-01",
            "parent": "first",
            "pay_level": "premium",
            "fraction": "1"
        }"#;
        assert!(serde_json::from_str::<LeaveBlockRequest>(json).is_err());
    }

    fn family_request(days_taken: u32, birth: NaiveDate) -> FamilyRequest {
        FamilyRequest {
            parents: vec![ParentRequest {
                name: "Anna".to_string(),
                role: ParentRole::First,
                monthly_gross_income: Decimal::from(35_000),
                employer_top_up: None,
                days_taken,
                leave_days: vec![],
            }],
            children: vec![ChildRequest {
                name: None,
                birth_date: birth,
                is_born: true,
                multiplicity: Multiplicity::Single,
            }],
            planning_priority: None,
            knowledge_level: None,
        }
    }

    #[test]
    fn test_days_taken_are_seeded() {
        let family = family_request(40, date(2026, 1, 5))
            .into_family(&rules(), date(2026, 10, 19))
            .unwrap();
        assert_eq!(family.parent1().unwrap().parental_leave_days_taken(), 40);
    }

    #[test]
    fn test_days_taken_beyond_window_rejected() {
        // Only 5 weekdays between birth and today
        let result = family_request(30, date(2026, 10, 13)).into_family(&rules(), date(2026, 10, 19));
        assert!(matches!(result, Err(EngineError::InvalidParent { .. })));
    }

    #[test]
    fn test_days_taken_above_allocation_rejected() {
        // An ancient birth date leaves room for far more weekdays than exist
        let result = family_request(5_000_000, date(1, 1, 1)).into_family(&rules(), date(2026, 10, 19));
        match result {
            Err(EngineError::InvalidParent { field, .. }) => assert_eq!(field, "days_taken"),
            other => panic!("Expected InvalidParent, got {:?}", other),
        }
    }

    #[test]
    fn test_days_taken_near_earliest_date_rejected() {
        let birth = NaiveDate::MIN;
        let today = birth + chrono::Duration::days(10);
        let result = family_request(100, birth).into_family(&rules(), today);
        assert!(matches!(result, Err(EngineError::InvalidParent { .. })));
    }

    #[test]
    fn test_days_taken_without_child_rejected() {
        let mut request = family_request(10, date(2026, 1, 5));
        request.children.clear();
        assert!(request.into_family(&rules(), date(2026, 10, 19)).is_err());
    }

    #[test]
    fn test_born_child_in_future_rejected() {
        let result = family_request(0, date(2026, 12, 1)).into_family(&rules(), date(2026, 10, 19));
        assert!(matches!(result, Err(EngineError::InvalidChild { .. })));
    }

    #[test]
    fn test_overlapping_blocks_for_same_parent_rejected() {
        let block = |start, end| LeaveBlockRequest {
            start_date: start,
            end_date: end,
            parent: ParentRole::First,
            pay_level: PayLevel::SgiLevel,
            fraction: LeaveFraction::Full,
        };
        let request = ScenarioRequest {
            name: "Plan".to_string(),
            blocks: vec![
                block(date(2026, 11, 2), date(2026, 12, 1)),
                block(date(2026, 11, 16), date(2027, 1, 1)),
            ],
        };

        assert!(matches!(
            request.into_scenario(),
            Err(EngineError::InvalidLeaveBlock { .. })
        ));
    }
}
