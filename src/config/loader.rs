//! Rule table loading functionality.
//!
//! This module provides the [`RulesLoader`] type for loading yearly rule
//! tables from YAML files, and the bundled table compiled into the crate.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::LeaveFraction;

use super::types::RuleConstants;

/// The bundled rule table for the current rule-year.
const EMBEDDED_RULES: &str = include_str!("../../config/rules/2026.yaml");

impl RuleConstants {
    /// Parses the rule table bundled with the crate.
    ///
    /// # Example
    ///
    /// ```
    /// use parental_leave_engine::config::RuleConstants;
    ///
    /// let rules = RuleConstants::embedded()?;
    /// assert_eq!(rules.days.total_per_child, 480);
    /// # Ok::<(), parental_leave_engine::error::EngineError>(())
    /// ```
    pub fn embedded() -> EngineResult<Self> {
        let rules: RuleConstants =
            serde_yaml::from_str(EMBEDDED_RULES).map_err(|e| EngineError::ConfigParseError {
                path: "<embedded>/2026.yaml".to_string(),
                message: e.to_string(),
            })?;
        rules.validate()?;
        Ok(rules)
    }

    /// Checks the internal consistency of the table.
    ///
    /// Returns `InvalidRules` if:
    /// - total days per child is not SGI-level days plus basic-level days
    /// - shared days is not total days minus both parents' reserved days
    /// - the VAB cap is not strictly below the föräldrapenning cap
    /// - a part-time level is not one of the supported fractions
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |message: String| EngineError::InvalidRules {
            year: self.year,
            message,
        };

        let days = &self.days;
        if days.total_per_child != days.sgi_level + days.basic_level {
            return Err(invalid(format!(
                "total days {} != sgi-level {} + basic-level {}",
                days.total_per_child, days.sgi_level, days.basic_level
            )));
        }

        let both_reserved = days.reserved_per_parent * 2;
        if both_reserved > days.total_per_child
            || days.shared != days.total_per_child - both_reserved
        {
            return Err(invalid(format!(
                "shared days {} != total {} - 2 x reserved {}",
                days.shared, days.total_per_child, days.reserved_per_parent
            )));
        }

        if self.vab_cap() >= self.sgi_cap() {
            return Err(invalid(format!(
                "VAB cap {} must be below the SGI cap {}",
                self.vab_cap(),
                self.sgi_cap()
            )));
        }

        if self.compensation.days_in_year == 0 || self.compensation.days_in_month == 0 {
            return Err(invalid("day divisors must be positive".to_string()));
        }

        for level in &self.part_time_levels {
            LeaveFraction::try_from(*level).map_err(|e| invalid(e.to_string()))?;
        }

        Ok(())
    }
}

/// Loads and provides access to yearly rule tables.
///
/// # Directory Structure
///
/// ```text
/// config/rules/
/// ├── 2025.yaml
/// └── 2026.yaml
/// ```
///
/// # Example
///
/// ```no_run
/// use parental_leave_engine::config::RulesLoader;
///
/// let loader = RulesLoader::load("./config/rules")?;
/// let rules = loader.rules_for_year(2027)?;
/// println!("Base amount: {}", rules.base_amount);
/// # Ok::<(), parental_leave_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RulesLoader {
    /// Tables sorted oldest first.
    tables: Vec<RuleConstants>,
}

impl RulesLoader {
    /// Loads every `*.yaml` rule table in the directory.
    ///
    /// Fails if the directory is missing or empty, if any file contains
    /// invalid YAML, or if any table violates its invariants.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let dir = path.as_ref();
        let dir_str = dir.display().to_string();

        if !dir.exists() {
            return Err(EngineError::ConfigNotFound { path: dir_str });
        }

        let entries = fs::read_dir(dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut tables = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let rules = Self::load_yaml(&path)?;
                rules.validate()?;
                tables.push(rules);
            }
        }

        if tables.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rule files found)", dir_str),
            });
        }

        Ok(Self::from_tables(tables))
    }

    /// Builds a loader holding only the bundled table.
    pub fn embedded() -> EngineResult<Self> {
        Ok(Self::from_tables(vec![RuleConstants::embedded()?]))
    }

    /// Builds a loader from already-parsed tables.
    pub fn from_tables(mut tables: Vec<RuleConstants>) -> Self {
        tables.sort_by_key(|t| t.year);
        Self { tables }
    }

    fn load_yaml(path: &Path) -> EngineResult<RuleConstants> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the most recent table effective on or before `year`.
    pub fn rules_for_year(&self, year: i32) -> EngineResult<&RuleConstants> {
        self.tables
            .iter()
            .rfind(|t| t.year <= year)
            .ok_or(EngineError::RulesNotFound { year })
    }

    /// Returns the newest table.
    pub fn latest(&self) -> Option<&RuleConstants> {
        self.tables.last()
    }

    /// Returns all loaded tables, oldest first.
    pub fn tables(&self) -> &[RuleConstants] {
        &self.tables
    }
}
