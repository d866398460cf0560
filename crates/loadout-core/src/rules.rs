use crate::types::SkillId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// KeywordRule
// ---------------------------------------------------------------------------

/// A keyword rule: if any trigger occurs in the lower-cased description, the
/// associated skill is appended to the selection unless already present.
///
/// Rules are evaluated independently and in table order. Triggers must be
/// lowercase; matching lower-cases the description, not the trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub skill: SkillId,
    pub triggers: Vec<String>,
}

impl KeywordRule {
    pub fn new(skill: &str, triggers: &[&str]) -> Self {
        Self {
            skill: SkillId::from(skill),
            triggers: triggers.iter().map(|t| t.to_string()).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Built-in tables
// ---------------------------------------------------------------------------

fn ids(names: &[&str]) -> Vec<SkillId> {
    names.iter().map(|n| SkillId::from(*n)).collect()
}

/// Built-in keyword rule table, evaluation-ordered.
pub fn default_rules() -> Vec<KeywordRule> {
    vec![
        KeywordRule::new(
            "development/testing",
            &["test", "tdd", "pytest", "unit test", "coverage"],
        ),
        KeywordRule::new(
            "development/debugging",
            &["debug", "error", "failing", "bug", "broken"],
        ),
        KeywordRule::new(
            "infrastructure/serverless",
            &["lambda", "serverless", "deploy", "cloud function"],
        ),
        KeywordRule::new(
            "development/data-modeling",
            &["data", "migration", "schema", "etl"],
        ),
        KeywordRule::new("tools/duckdb", &["duckdb", "sql", "data", "migration"]),
        KeywordRule::new(
            "development/api-design",
            &["api", "endpoint", "rest", "graphql"],
        ),
        KeywordRule::new(
            "development/refactoring",
            &["refactor", "cleanup", "simplify"],
        ),
        KeywordRule::new(
            "writing/documentation",
            &["document", "readme", "changelog"],
        ),
    ]
}

/// Built-in command base lists. The `implement` command already carries the
/// retrospective skill; description selection appends it instead.
pub fn default_commands() -> HashMap<String, Vec<SkillId>> {
    let mut commands = HashMap::new();
    commands.insert(
        "implement".to_string(),
        ids(&[
            "core/thinking",
            "core/verification",
            "development/tdd",
            "development/debugging",
            "process/retrospective",
        ]),
    );
    commands.insert(
        "plan".to_string(),
        ids(&["core/thinking", "planning/design", "writing/documentation"]),
    );
    commands.insert(
        "review".to_string(),
        ids(&[
            "core/verification",
            "development/refactoring",
            "process/retrospective",
        ]),
    );
    commands.insert(
        "debug".to_string(),
        ids(&[
            "core/thinking",
            "development/debugging",
            "process/retrospective",
        ]),
    );
    commands
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
