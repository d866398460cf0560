use crate::error::{LoadoutError, Result};
use crate::types::SkillId;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const LOADOUT_DIR: &str = ".loadout";
pub const SKILLS_DIR: &str = ".loadout/skills";

pub const CONFIG_FILE: &str = ".loadout/config.yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn loadout_dir(root: &Path) -> PathBuf {
    root.join(LOADOUT_DIR)
}

pub fn skills_dir(root: &Path) -> PathBuf {
    root.join(SKILLS_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Document path for a skill id: `core/thinking` maps to
/// `.loadout/skills/core/thinking.md`.
pub fn skill_doc_path(root: &Path, id: &SkillId) -> PathBuf {
    let mut path = skills_dir(root);
    for segment in id.as_str().split('/') {
        path.push(segment);
    }
    path.set_extension("md");
    path
}

// ---------------------------------------------------------------------------
// Skill id validation
// ---------------------------------------------------------------------------

static SKILL_ID_RE: OnceLock<Regex> = OnceLock::new();

fn skill_id_re() -> &'static Regex {
    // Lowercase alphanumeric/hyphen segments, no leading/trailing hyphen,
    // separated by single slashes.
    SKILL_ID_RE.get_or_init(|| {
        Regex::new(r"^[a-z0-9]([a-z0-9\-]*[a-z0-9])?(/[a-z0-9]([a-z0-9\-]*[a-z0-9])?)*$").unwrap()
    })
}

pub fn validate_skill_id(id: &SkillId) -> Result<()> {
    let s = id.as_str();
    if s.is_empty() || s.len() > 64 || !skill_id_re().is_match(s) {
        return Err(LoadoutError::InvalidSkillId(s.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
