//! Structured facts for the advisory component.
//!
//! The advisory component turns these into prose. This module only
//! gathers the figures, deadlines and nudges it needs, so the wording
//! can live elsewhere.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calculation::compensation::calculate_income;
use crate::calculation::day_balance::calculate_days;
use crate::calculation::deadlines::{days_until, double_days_expiry_date, next_deadline, save_limit_date};
use crate::calculation::formatting::format_currency;
use crate::config::RuleConstants;
use crate::models::{
    DaySummary, DeadlineInfo, Family, IncomeSummary, KnowledgeLevel, PlanningPriority,
};

/// Double-days nudges fire inside this many days of expiry.
const DOUBLE_DAYS_NUDGE_DAYS: u32 = 90;
/// Save-limit nudges fire inside this many days.
const SAVE_LIMIT_NUDGE_DAYS: u32 = 365;
/// Expiring-days topic is suggested inside this many days of the save limit.
const EXPIRING_TOPIC_DAYS: u32 = 2 * 365;
/// Double-days topic is suggested inside this many days of expiry.
const DOUBLE_DAYS_TOPIC_DAYS: u32 = 365;
/// Suggested topics are capped at this length before a rotating extra is added.
const MAX_TOPICS: usize = 5;

/// A proactive reminder about an approaching deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Nudge {
    /// Double days run out soon.
    DoubleDaysExpiring {
        /// Days until they expire.
        days_until: u32,
    },
    /// The save limit is within a year.
    SaveLimitApproaching {
        /// Days until the save limit.
        days_until: u32,
    },
}

/// A question the family is likely to want answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryTopic {
    /// How many days are left.
    DaysRemaining,
    /// How to split days between the parents.
    SplitDays,
    /// How to protect the SGI.
    ProtectSgi,
    /// Which days are about to be forfeited.
    ExpiringDays,
    /// How double days work.
    DoubleDays,
    /// How the weekend rule applies.
    WeekendRule,
    /// How leave affects the pension.
    Pension,
    /// Working part time during leave.
    PartTime,
}

const ROTATING_TOPICS: [AdvisoryTopic; 3] = [
    AdvisoryTopic::WeekendRule,
    AdvisoryTopic::Pension,
    AdvisoryTopic::PartTime,
];

/// Everything the advisory component needs to know about a family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisoryFacts {
    /// Day balance.
    pub days: DaySummary,
    /// Income figures.
    pub income: IncomeSummary,
    /// The deadline to show first.
    pub next_deadline: Option<DeadlineInfo>,
    /// One line per parent with an employer top-up.
    pub top_ups: Vec<String>,
    /// Days left to use double days, when still available.
    pub double_days_left: Option<u32>,
    /// The single most pressing reminder, if any.
    pub nudge: Option<Nudge>,
    /// Starter questions for the family.
    pub suggested_topics: Vec<AdvisoryTopic>,
    /// What the family cares most about.
    pub planning_priority: Option<PlanningPriority>,
    /// How familiar the family is with the rules.
    pub knowledge_level: Option<KnowledgeLevel>,
}

fn nudge_for(double_days_left: Option<u32>, save_limit_days: Option<u32>) -> Option<Nudge> {
    if let Some(days) = double_days_left.filter(|d| *d < DOUBLE_DAYS_NUDGE_DAYS) {
        return Some(Nudge::DoubleDaysExpiring { days_until: days });
    }
    save_limit_days
        .filter(|d| *d < SAVE_LIMIT_NUDGE_DAYS)
        .map(|days| Nudge::SaveLimitApproaching { days_until: days })
}

fn suggested_topics(
    family: &Family,
    double_days_left: Option<u32>,
    save_limit_days: Option<u32>,
    today: NaiveDate,
) -> Vec<AdvisoryTopic> {
    let mut topics = vec![AdvisoryTopic::DaysRemaining];
    if !family.is_single_parent() {
        topics.push(AdvisoryTopic::SplitDays);
    }
    topics.push(AdvisoryTopic::ProtectSgi);

    if family.first_child().is_some()
        && save_limit_days.is_none_or(|d| d < EXPIRING_TOPIC_DAYS)
    {
        topics.push(AdvisoryTopic::ExpiringDays);
    }
    if double_days_left.is_some_and(|d| d < DOUBLE_DAYS_TOPIC_DAYS) {
        topics.push(AdvisoryTopic::DoubleDays);
    }

    if topics.len() < MAX_TOPICS {
        let index = today.day() as usize % ROTATING_TOPICS.len();
        topics.push(ROTATING_TOPICS[index]);
    }
    topics
}

/// Gathers advisory facts for a family.
///
/// Nudges prefer expiring double days over the save limit; at most one
/// is returned. Nothing here depends on the wall clock.
pub fn build_advisory_facts(family: &Family, rules: &RuleConstants, today: NaiveDate) -> AdvisoryFacts {
    let child = family.first_child();

    let remaining = |date: NaiveDate| Some(days_until(date, today)).filter(|d| *d > 0);
    let double_days_left =
        child.and_then(|c| remaining(double_days_expiry_date(c.birth_date, rules)));
    let save_limit_days = child.and_then(|c| remaining(save_limit_date(c.birth_date, rules)));

    let top_ups = family
        .parents
        .iter()
        .filter_map(|p| {
            p.employer_top_up.map(|t| {
                format!(
                    "{}: {}% of {} for {} months",
                    p.name,
                    t.percentage,
                    format_currency(p.monthly_gross_income),
                    t.months
                )
            })
        })
        .collect();

    AdvisoryFacts {
        days: calculate_days(family, rules),
        income: calculate_income(family, rules),
        next_deadline: next_deadline(family, rules, today),
        top_ups,
        double_days_left,
        nudge: nudge_for(double_days_left, save_limit_days),
        suggested_topics: suggested_topics(family, double_days_left, save_limit_days, today),
        planning_priority: family.planning_priority,
        knowledge_level: family.knowledge_level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Child, Multiplicity, Parent, ParentRole};
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn rules() -> RuleConstants {
        RuleConstants::embedded().unwrap()
    }

    fn family(birth: NaiveDate) -> Family {
        let p1 = Parent::new("Anna", ParentRole::First, Decimal::from(35_000))
            .unwrap()
            .with_top_up(90, 6)
            .unwrap();
        let p2 = Parent::new("Bo", ParentRole::Second, Decimal::from(42_000)).unwrap();
        Family::new(vec![p1, p2], vec![Child::new(birth, true, Multiplicity::Single)]).unwrap()
    }

    #[test]
    fn test_double_days_nudge_preferred() {
        // Double days expire 2026-12-01, 43 days after today
        let facts = build_advisory_facts(&family(date(2025, 9, 1)), &rules(), date(2026, 10, 19));

        assert_eq!(facts.double_days_left, Some(43));
        assert_eq!(facts.nudge, Some(Nudge::DoubleDaysExpiring { days_until: 43 }));
        assert!(facts.suggested_topics.contains(&AdvisoryTopic::DoubleDays));
    }

    #[test]
    fn test_save_limit_nudge() {
        let facts = build_advisory_facts(&family(date(2023, 1, 10)), &rules(), date(2026, 10, 19));

        assert_eq!(facts.double_days_left, None);
        assert_eq!(facts.nudge, Some(Nudge::SaveLimitApproaching { days_until: 83 }));
        assert!(facts.suggested_topics.contains(&AdvisoryTopic::ExpiringDays));
        assert!(!facts.suggested_topics.contains(&AdvisoryTopic::DoubleDays));
    }

    #[test]
    fn test_no_nudge_for_young_child_far_from_deadlines() {
        // Double days expire 2027-05-01, 194 days away
        let facts = build_advisory_facts(&family(date(2026, 2, 1)), &rules(), date(2026, 10, 19));
        assert_eq!(facts.nudge, None);
    }

    #[test]
    fn test_top_up_descriptions() {
        let facts = build_advisory_facts(&family(date(2026, 2, 1)), &rules(), date(2026, 10, 19));
        assert_eq!(facts.top_ups, vec!["Anna: 90% of 35 000 kr for 6 months".to_string()]);
    }

    #[test]
    fn test_topics_for_single_parent() {
        let p1 = Parent::new("Anna", ParentRole::First, Decimal::from(35_000)).unwrap();
        let fam = Family::new(vec![p1], vec![]).unwrap();

        let facts = build_advisory_facts(&fam, &rules(), date(2026, 10, 19));
        assert_eq!(facts.suggested_topics[0], AdvisoryTopic::DaysRemaining);
        assert!(!facts.suggested_topics.contains(&AdvisoryTopic::SplitDays));
        assert!(facts.next_deadline.is_none());
        // 19 % 3 == 1
        assert_eq!(facts.suggested_topics.last(), Some(&AdvisoryTopic::Pension));
    }

    #[test]
    fn test_preferences_carried_through() {
        let mut fam = family(date(2026, 2, 1));
        fam.planning_priority = Some(PlanningPriority::EqualSplit);
        fam.knowledge_level = Some(KnowledgeLevel::Beginner);

        let facts = build_advisory_facts(&fam, &rules(), date(2026, 10, 19));
        assert_eq!(facts.planning_priority, Some(PlanningPriority::EqualSplit));
        assert_eq!(facts.knowledge_level, Some(KnowledgeLevel::Beginner));
    }

    #[test]
    fn test_nudge_serialization() {
        let json = serde_json::to_string(&Nudge::DoubleDaysExpiring { days_until: 12 }).unwrap();
        assert_eq!(json, r#"{"kind":"double_days_expiring","days_until":12}"#);
    }
}
