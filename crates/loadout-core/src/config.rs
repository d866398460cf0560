use crate::error::{LoadoutError, Result};
use crate::paths;
use crate::rules::{default_commands, default_rules, KeywordRule};
use crate::types::{MatchMode, SkillId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// SelectorConfig
// ---------------------------------------------------------------------------

/// The immutable rule/command tables the selector runs against.
///
/// Loaded once from `.loadout/config.yaml`; there is no runtime mutation API.
/// Rule changes are file edits reviewed like any other change, then a reload.
/// Absent keys fall back to the built-in tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    /// Identifiers present in every description selection, before any rules.
    #[serde(default = "default_baseline")]
    pub baseline: Vec<SkillId>,

    /// Base list used when a command name has no entry in `commands`.
    #[serde(default = "default_fallback")]
    pub fallback: SkillId,

    /// Appended unconditionally at the end of description selections.
    #[serde(default = "default_trailing")]
    pub trailing: SkillId,

    #[serde(default)]
    pub match_mode: MatchMode,

    /// Cap applied by the registry when materializing a selection.
    #[serde(default = "default_max_active")]
    pub max_active: usize,

    #[serde(default = "default_rules")]
    pub rules: Vec<KeywordRule>,

    #[serde(default = "default_commands")]
    pub commands: HashMap<String, Vec<SkillId>>,
}

fn default_version() -> u32 {
    1
}

fn default_baseline() -> Vec<SkillId> {
    vec![SkillId::from("core/thinking"), SkillId::from("core/verification")]
}

fn default_fallback() -> SkillId {
    SkillId::from("core/thinking")
}

fn default_trailing() -> SkillId {
    SkillId::from("process/retrospective")
}

fn default_max_active() -> usize {
    5
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            baseline: default_baseline(),
            fallback: default_fallback(),
            trailing: default_trailing(),
            match_mode: MatchMode::default(),
            max_active: default_max_active(),
            rules: default_rules(),
            commands: default_commands(),
        }
    }
}

impl SelectorConfig {
    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(LoadoutError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: SelectorConfig = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    /// Like [`load`](Self::load), but an uninitialized tree yields the
    /// built-in defaults instead of an error. Parse errors still propagate.
    pub fn load_or_default(root: &Path) -> Result<Self> {
        match Self::load(root) {
            Ok(cfg) => Ok(cfg),
            Err(LoadoutError::NotInitialized) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        // 1. Every referenced id must have the registry-resolvable shape.
        //    A malformed id still selects fine, but can never materialize.
        for (context, id) in self.all_skill_ids() {
            if paths::validate_skill_id(id).is_err() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("invalid skill id '{id}' in {context}"),
                });
            }
        }

        // 2. Rule triggers
        for rule in &self.rules {
            if rule.triggers.is_empty() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!("rule for '{}' has no triggers and can never fire", rule.skill),
                });
            }
            for t in &rule.triggers {
                if t.trim().is_empty() {
                    warnings.push(ConfigWarning {
                        level: WarnLevel::Warning,
                        message: format!(
                            "rule for '{}' has an empty trigger, which matches every description",
                            rule.skill
                        ),
                    });
                } else if t != &t.to_lowercase() {
                    warnings.push(ConfigWarning {
                        level: WarnLevel::Warning,
                        message: format!(
                            "trigger '{t}' for '{}' is not lowercase and can never match",
                            rule.skill
                        ),
                    });
                }
            }
        }

        // 3. Command base lists
        for (name, base) in &self.commands {
            if base.is_empty() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!("command '{name}' has an empty base list"),
                });
            }
        }

        // 4. Duplicate baseline entries
        for (i, id) in self.baseline.iter().enumerate() {
            if self.baseline[..i].contains(id) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!("baseline lists '{id}' more than once"),
                });
            }
        }

        // 5. max_active sanity
        if self.max_active == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "max_active is 0, materialization will drop every skill".to_string(),
            });
        } else if self.max_active > 10 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!("max_active={} (>10 is unusual)", self.max_active),
            });
        }

        warnings
    }

    /// Every skill id the config references, with a human-readable context.
    fn all_skill_ids(&self) -> Vec<(String, &SkillId)> {
        let mut out = Vec::new();
        for id in &self.baseline {
            out.push(("baseline".to_string(), id));
        }
        out.push(("fallback".to_string(), &self.fallback));
        out.push(("trailing".to_string(), &self.trailing));
        for rule in &self.rules {
            out.push(("rules".to_string(), &rule.skill));
        }
        for (name, base) in &self.commands {
            for id in base {
                out.push((format!("command '{name}'"), id));
            }
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
