//! Child model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

/// How many children a single birth brought.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Multiplicity {
    /// One child.
    #[default]
    Single,
    /// Twins.
    Twins,
    /// Triplets or more.
    TripletsOrMore,
}

/// A child whose birth drives day totals and deadlines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Child {
    /// Unique identifier for the child.
    pub id: Uuid,
    /// Optional name.
    #[serde(default)]
    pub name: Option<String>,
    /// Birth date, or the estimated due date while not yet born.
    pub birth_date: NaiveDate,
    /// Whether the child has been born.
    pub is_born: bool,
    /// Single, twins or more.
    #[serde(default)]
    pub multiplicity: Multiplicity,
    /// Whether this is the family's first child.
    #[serde(default = "default_first_child")]
    pub is_first_child: bool,
}

fn default_first_child() -> bool {
    true
}

impl Child {
    /// Creates a child.
    pub fn new(birth_date: NaiveDate, is_born: bool, multiplicity: Multiplicity) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: None,
            birth_date,
            is_born,
            multiplicity,
            is_first_child: true,
        }
    }

    /// Rejects a child marked as born with a birth date after `today`.
    pub fn validate(&self, today: NaiveDate) -> EngineResult<()> {
        if self.is_born && self.birth_date > today {
            return Err(EngineError::InvalidChild {
                field: "birth_date".to_string(),
                message: format!("born child has a future birth date {}", self.birth_date),
            });
        }
        Ok(())
    }
}
