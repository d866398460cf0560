use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// SkillId
// ---------------------------------------------------------------------------

/// Opaque name of a unit of instructional content (e.g. "core/thinking").
///
/// Equality is case-sensitive string equality. The registry additionally
/// requires the slash-segmented lowercase shape checked by
/// [`crate::paths::validate_skill_id`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillId(String);

impl SkillId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SkillId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for SkillId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ---------------------------------------------------------------------------
// MatchMode
// ---------------------------------------------------------------------------

/// How keyword triggers are matched against a description.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Plain substring containment: "api" fires inside "rapid".
    #[default]
    Substring,
    /// Word-boundary matching. Opt-in; changes which rules fire.
    WordBoundary,
}

impl MatchMode {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchMode::Substring => "substring",
            MatchMode::WordBoundary => "word_boundary",
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MatchMode {
    type Err = crate::error::LoadoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "substring" => Ok(MatchMode::Substring),
            "word_boundary" => Ok(MatchMode::WordBoundary),
            _ => Err(crate::error::LoadoutError::InvalidMatchMode(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
