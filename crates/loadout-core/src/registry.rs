use crate::error::{LoadoutError, Result};
use crate::paths;
use crate::selector::Selection;
use crate::types::SkillId;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// SkillDoc
// ---------------------------------------------------------------------------

/// A skill identifier resolved to its markdown document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillDoc {
    pub id: SkillId,
    pub path: PathBuf,
    pub content: String,
}

// ---------------------------------------------------------------------------
// SkillRegistry
// ---------------------------------------------------------------------------

/// File-backed resolution of skill identifiers to documents under
/// `.loadout/skills/`. Read-only after open.
pub struct SkillRegistry {
    root: PathBuf,
}

impl SkillRegistry {
    pub fn open(root: &Path) -> Result<Self> {
        if !paths::skills_dir(root).is_dir() {
            return Err(LoadoutError::NotInitialized);
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// All skill ids with a document present, sorted.
    pub fn list(&self) -> Result<Vec<SkillId>> {
        let base = paths::skills_dir(&self.root);
        let mut ids = Vec::new();
        collect_ids(&base, &base, &mut ids)?;
        ids.sort();
        Ok(ids)
    }

    /// Resolve one identifier to its document.
    ///
    /// The id shape is validated first, which also keeps lookups inside the
    /// skills directory.
    pub fn load(&self, id: &SkillId) -> Result<SkillDoc> {
        paths::validate_skill_id(id)?;
        let path = paths::skill_doc_path(&self.root, id);
        if !path.is_file() {
            return Err(LoadoutError::SkillNotFound(id.to_string()));
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(SkillDoc {
            id: id.clone(),
            path,
            content,
        })
    }

    /// Resolve a selection to documents in selection order.
    ///
    /// Identifiers without a document are skipped with a warning rather than
    /// failing the whole selection. At most `max_active` documents are
    /// returned; anything beyond the cap is dropped with a warning naming the
    /// dropped identifiers.
    pub fn materialize(&self, selection: &Selection, max_active: usize) -> Result<Vec<SkillDoc>> {
        let mut docs = Vec::new();
        for (i, id) in selection.skills.iter().enumerate() {
            if docs.len() == max_active {
                let dropped: Vec<&str> = selection.skills[i..].iter().map(|s| s.as_str()).collect();
                tracing::warn!(
                    "max_active={} reached, dropping: {}",
                    max_active,
                    dropped.join(", ")
                );
                break;
            }
            match self.load(id) {
                Ok(doc) => docs.push(doc),
                Err(LoadoutError::SkillNotFound(_)) => {
                    tracing::warn!("no document for skill '{id}', skipping");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(docs)
    }
}

fn collect_ids(dir: &Path, base: &Path, out: &mut Vec<SkillId>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_ids(&path, base, out)?;
        } else if path.extension().is_some_and(|e| e == "md") {
            let rel = path.strip_prefix(base).unwrap_or(&path).with_extension("");
            let id = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            out.push(SkillId::from(id));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_doc(root: &Path, id: &str, content: &str) {
        let path = paths::skill_doc_path(root, &SkillId::from(id));
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn project() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(paths::skills_dir(dir.path())).unwrap();
        dir
    }

    fn selection(ids: &[&str]) -> Selection {
        Selection {
            skills: ids.iter().map(|s| SkillId::from(*s)).collect(),
            matched_rules: vec![],
        }
    }

    #[test]
    fn open_requires_skills_dir() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            SkillRegistry::open(dir.path()),
            Err(LoadoutError::NotInitialized)
        ));
    }

    #[test]
    fn list_is_sorted_and_nested() {
        let dir = project();
        write_doc(dir.path(), "tools/duckdb", "# DuckDB");
        write_doc(dir.path(), "core/thinking", "# Thinking");
        write_doc(dir.path(), "core/verification", "# Verification");
        let registry = SkillRegistry::open(dir.path()).unwrap();
        let ids = registry.list().unwrap();
        assert_eq!(
            ids,
            vec![
                SkillId::from("core/thinking"),
                SkillId::from("core/verification"),
                SkillId::from("tools/duckdb"),
            ]
        );
    }

    #[test]
    fn list_ignores_non_markdown() {
        let dir = project();
        write_doc(dir.path(), "core/thinking", "# Thinking");
        std::fs::write(paths::skills_dir(dir.path()).join("notes.txt"), "x").unwrap();
        let registry = SkillRegistry::open(dir.path()).unwrap();
        assert_eq!(registry.list().unwrap().len(), 1);
    }

    #[test]
    fn load_reads_content() {
        let dir = project();
        write_doc(dir.path(), "core/thinking", "# Thinking\n\nThink first.\n");
        let registry = SkillRegistry::open(dir.path()).unwrap();
        let doc = registry.load(&SkillId::from("core/thinking")).unwrap();
        assert!(doc.content.contains("Think first."));
        assert!(doc.path.ends_with("core/thinking.md"));
    }

    #[test]
    fn load_unknown_id_errors() {
        let dir = project();
        let registry = SkillRegistry::open(dir.path()).unwrap();
        let err = registry.load(&SkillId::from("no/such-skill")).unwrap_err();
        assert!(matches!(err, LoadoutError::SkillNotFound(_)));
    }

    #[test]
    fn load_rejects_malformed_id() {
        let dir = project();
        let registry = SkillRegistry::open(dir.path()).unwrap();
        let err = registry.load(&SkillId::from("../escape")).unwrap_err();
        assert!(matches!(err, LoadoutError::InvalidSkillId(_)));
    }

    #[test]
    fn materialize_skips_missing_documents() {
        let dir = project();
        write_doc(dir.path(), "core/thinking", "# Thinking");
        let registry = SkillRegistry::open(dir.path()).unwrap();
        let docs = registry
            .materialize(&selection(&["core/thinking", "no/doc-here"]), 5)
            .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, SkillId::from("core/thinking"));
    }

    #[test]
    fn materialize_truncates_to_max_active() {
        let dir = project();
        for id in ["a/one", "a/two", "a/three"] {
            write_doc(dir.path(), id, "# doc");
        }
        let registry = SkillRegistry::open(dir.path()).unwrap();
        let docs = registry
            .materialize(&selection(&["a/one", "a/two", "a/three"]), 2)
            .unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, SkillId::from("a/one"));
        assert_eq!(docs[1].id, SkillId::from("a/two"));
    }

    #[test]
    fn materialize_with_zero_cap_is_empty() {
        let dir = project();
        write_doc(dir.path(), "a/one", "# doc");
        let registry = SkillRegistry::open(dir.path()).unwrap();
        let docs = registry.materialize(&selection(&["a/one"]), 0).unwrap();
        assert!(docs.is_empty());
    }
}
