use crate::config::SelectorConfig;
use crate::error::Result;
use crate::rules::KeywordRule;
use crate::types::{MatchMode, SkillId};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Selection (output)
// ---------------------------------------------------------------------------

/// Ordered result of a selection: base skills first, then keyword-triggered
/// skills in rule-evaluation order, de-duplicated preserving first-seen order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub skills: Vec<SkillId>,
    /// Skills whose rule fired, in rule order, whether or not the skill was
    /// already present. Diagnostic only.
    pub matched_rules: Vec<SkillId>,
}

impl Selection {
    pub fn contains(&self, id: &SkillId) -> bool {
        self.skills.contains(id)
    }
}

// ---------------------------------------------------------------------------
// Compiled rules
// ---------------------------------------------------------------------------

enum TriggerSet {
    /// Containment against the lower-cased description.
    Substring(Vec<String>),
    /// Word-boundary regexes over the lower-cased description.
    WordBoundary(Vec<Regex>),
}

struct CompiledRule {
    skill: SkillId,
    triggers: TriggerSet,
}

impl CompiledRule {
    fn compile(rule: &KeywordRule, mode: MatchMode) -> Result<Self> {
        let triggers = match mode {
            MatchMode::Substring => {
                TriggerSet::Substring(rule.triggers.iter().map(|t| t.to_lowercase()).collect())
            }
            MatchMode::WordBoundary => {
                let mut patterns = Vec::with_capacity(rule.triggers.len());
                for t in &rule.triggers {
                    let re = Regex::new(&format!(r"\b{}\b", regex::escape(&t.to_lowercase())))?;
                    patterns.push(re);
                }
                TriggerSet::WordBoundary(patterns)
            }
        };
        Ok(Self {
            skill: rule.skill.clone(),
            triggers,
        })
    }

    fn matches(&self, lowered: &str) -> bool {
        match &self.triggers {
            TriggerSet::Substring(triggers) => triggers.iter().any(|t| lowered.contains(t.as_str())),
            TriggerSet::WordBoundary(patterns) => patterns.iter().any(|re| re.is_match(lowered)),
        }
    }
}

// ---------------------------------------------------------------------------
// Selector
// ---------------------------------------------------------------------------

/// Stateless, one-shot classification over an immutable rule table.
///
/// Selection itself cannot fail for any input; empty descriptions and unknown
/// command names degrade to the configured defaults.
pub struct Selector {
    baseline: Vec<SkillId>,
    fallback: SkillId,
    trailing: SkillId,
    commands: HashMap<String, Vec<SkillId>>,
    rules: Vec<CompiledRule>,
}

impl Selector {
    /// Compile the rule table. Only fails when word-boundary mode produces an
    /// uncompilable pattern.
    pub fn new(config: &SelectorConfig) -> Result<Self> {
        let rules = config
            .rules
            .iter()
            .map(|r| CompiledRule::compile(r, config.match_mode))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            baseline: config.baseline.clone(),
            fallback: config.fallback.clone(),
            trailing: config.trailing.clone(),
            commands: config.commands.clone(),
            rules,
        })
    }

    /// Select skills for a free-text task description.
    ///
    /// Baseline skills first, then any keyword-triggered skills in rule
    /// order, then the trailing identifier. Pure and deterministic.
    pub fn select(&self, description: &str) -> Selection {
        let mut skills = Vec::new();
        let mut matched_rules = Vec::new();
        for id in &self.baseline {
            push_unique(&mut skills, id.clone());
        }
        self.apply_rules(description, &mut skills, &mut matched_rules);
        push_unique(&mut skills, self.trailing.clone());
        Selection {
            skills,
            matched_rules,
        }
    }

    /// Select skills for a named command, with an optional description for
    /// the keyword pass. Unknown command names degrade to the fallback base
    /// list; no trailing identifier is appended here since command base lists
    /// already carry it where relevant.
    pub fn select_for_command(&self, command: &str, description: &str) -> Selection {
        let base = self
            .commands
            .get(command)
            .cloned()
            .unwrap_or_else(|| vec![self.fallback.clone()]);

        let mut skills = Vec::new();
        let mut matched_rules = Vec::new();
        for id in base {
            push_unique(&mut skills, id);
        }
        self.apply_rules(description, &mut skills, &mut matched_rules);
        Selection {
            skills,
            matched_rules,
        }
    }

    fn apply_rules(
        &self,
        description: &str,
        skills: &mut Vec<SkillId>,
        matched_rules: &mut Vec<SkillId>,
    ) {
        let lowered = description.to_lowercase();
        for rule in &self.rules {
            if rule.matches(&lowered) {
                matched_rules.push(rule.skill.clone());
                push_unique(skills, rule.skill.clone());
            }
        }
    }
}

fn push_unique(list: &mut Vec<SkillId>, id: SkillId) {
    if !list.contains(&id) {
        list.push(id);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn selector() -> Selector {
        Selector::new(&SelectorConfig::default()).unwrap()
    }

    fn id(s: &str) -> SkillId {
        SkillId::from(s)
    }

    #[test]
    fn baseline_always_present() {
        let s = selector();
        for d in ["", "write unit tests", "deploy a lambda", "x", "ZZZZZ"] {
            let sel = s.select(d);
            assert!(sel.contains(&id("core/thinking")), "input: {d:?}");
            assert!(sel.contains(&id("core/verification")), "input: {d:?}");
        }
    }

    #[test]
    fn trailing_always_present() {
        let s = selector();
        for d in ["", "anything at all", "debug the bug"] {
            assert!(s.select(d).contains(&id("process/retrospective")), "input: {d:?}");
        }
    }

    #[test]
    fn testing_keywords_trigger_testing_skill() {
        let s = selector();
        for d in ["run the TEST suite", "try tdd here", "fix pytest fixtures"] {
            assert!(s.select(d).contains(&id("development/testing")), "input: {d:?}");
        }
    }

    #[test]
    fn no_trigger_input_yields_exactly_baseline_plus_trailing() {
        let s = selector();
        let sel = s.select("hello world");
        assert_eq!(
            sel.skills,
            vec![
                id("core/thinking"),
                id("core/verification"),
                id("process/retrospective"),
            ]
        );
        assert!(sel.matched_rules.is_empty());
    }

    #[test]
    fn empty_description_yields_defaults_only() {
        let s = selector();
        let sel = s.select("");
        assert_eq!(
            sel.skills,
            vec![
                id("core/thinking"),
                id("core/verification"),
                id("process/retrospective"),
            ]
        );
    }

    #[test]
    fn idempotent_for_same_input() {
        let s = selector();
        let d = "Debug the failing error in data migration";
        assert_eq!(s.select(d), s.select(d));
    }

    #[test]
    fn scenario_unit_tests_for_login_flow() {
        let sel = selector().select("Write unit tests for the login flow");
        assert!(sel.contains(&id("core/thinking")));
        assert!(sel.contains(&id("development/testing")));
        assert!(sel.contains(&id("process/retrospective")));
    }

    #[test]
    fn scenario_lambda_deploy() {
        let sel = selector().select("Deploy a lambda for the checkout API");
        assert!(sel.contains(&id("infrastructure/serverless")));
        assert!(sel.contains(&id("process/retrospective")));
    }

    #[test]
    fn scenario_data_migration_debugging() {
        let sel = selector().select("Debug the failing error in data migration");
        assert!(sel.contains(&id("development/debugging")));
        assert!(sel.contains(&id("development/data-modeling")));
        assert!(sel.contains(&id("tools/duckdb")));
        assert!(sel.contains(&id("process/retrospective")));
    }

    #[test]
    fn implement_command_with_empty_description_is_exactly_base() {
        let sel = selector().select_for_command("implement", "");
        assert_eq!(
            sel.skills,
            vec![
                id("core/thinking"),
                id("core/verification"),
                id("development/tdd"),
                id("development/debugging"),
                id("process/retrospective"),
            ]
        );
        assert!(sel.matched_rules.is_empty());
    }

    #[test]
    fn unknown_command_degrades_to_fallback() {
        let sel = selector().select_for_command("unknown-command", "");
        assert_eq!(sel.skills, vec![id("core/thinking")]);
    }

    #[test]
    fn command_keyword_pass_appends_new_skills() {
        let sel = selector().select_for_command("plan", "plan the checkout api rollout");
        // base first, triggered appended after
        assert_eq!(sel.skills[0], id("core/thinking"));
        assert!(sel.contains(&id("development/api-design")));
    }

    #[test]
    fn dedup_preserves_first_seen_order() {
        // De-duplication is deliberate policy: the implement base list already
        // carries development/debugging, so the debugging rule firing must not
        // append a second copy or move the first.
        let sel = selector().select_for_command("implement", "debug the regression");
        let debug_count = sel
            .skills
            .iter()
            .filter(|s| **s == id("development/debugging"))
            .count();
        assert_eq!(debug_count, 1);
        assert_eq!(sel.skills[3], id("development/debugging"));
        assert!(sel.matched_rules.contains(&id("development/debugging")));
    }

    #[test]
    fn result_length_is_bounded() {
        let cfg = SelectorConfig::default();
        let bound = cfg.baseline.len() + cfg.rules.len() + 1;
        let s = Selector::new(&cfg).unwrap();
        let everything =
            "test tdd debug error lambda deploy data migration sql api refactor document readme";
        assert!(s.select(everything).skills.len() <= bound);
    }

    #[test]
    fn substring_mode_fires_inside_words() {
        // "api" occurs inside "rapid"; substring containment fires on it.
        let sel = selector().select("rapid prototyping session");
        assert!(sel.contains(&id("development/api-design")));
    }

    #[test]
    fn word_boundary_mode_does_not_fire_inside_words() {
        let mut cfg = SelectorConfig::default();
        cfg.match_mode = MatchMode::WordBoundary;
        let s = Selector::new(&cfg).unwrap();
        let sel = s.select("rapid prototyping session");
        assert!(!sel.contains(&id("development/api-design")));
        // a real word still matches
        let sel = s.select("design the payments api");
        assert!(sel.contains(&id("development/api-design")));
    }

    #[test]
    fn word_boundary_matches_multiword_triggers() {
        let mut cfg = SelectorConfig::default();
        cfg.match_mode = MatchMode::WordBoundary;
        let s = Selector::new(&cfg).unwrap();
        assert!(s
            .select("add unit test scaffolding")
            .contains(&id("development/testing")));
    }

    #[test]
    fn rule_table_order_is_result_order() {
        let mut cfg = SelectorConfig::default();
        cfg.baseline = vec![id("base/one")];
        cfg.rules = vec![
            KeywordRule::new("first/skill", &["alpha"]),
            KeywordRule::new("second/skill", &["beta"]),
        ];
        let s = Selector::new(&cfg).unwrap();
        // both fire regardless of the order they appear in the description
        let sel = s.select("beta then alpha");
        assert_eq!(
            sel.skills,
            vec![
                id("base/one"),
                id("first/skill"),
                id("second/skill"),
                id("process/retrospective"),
            ]
        );
    }

    #[test]
    fn trailing_already_in_base_is_not_duplicated() {
        let mut cfg = SelectorConfig::default();
        cfg.baseline = vec![id("process/retrospective"), id("core/thinking")];
        let s = Selector::new(&cfg).unwrap();
        let sel = s.select("");
        assert_eq!(
            sel.skills,
            vec![id("process/retrospective"), id("core/thinking")]
        );
    }
}
