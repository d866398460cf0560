use std::path::{Path, PathBuf};

/// Resolve the project root.
///
/// Priority:
/// 1. `--root` flag / `LOADOUT_ROOT` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for `.loadout/`
/// 3. Walk upward from `cwd` looking for `.git/`
/// 4. Fall back to `cwd`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    for marker in [".loadout", ".git"] {
        if let Some(found) = find_upward(&cwd, marker) {
            return found;
        }
    }

    cwd
}

fn find_upward(start: &Path, marker: &str) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        if dir.join(marker).is_dir() {
            return Some(dir);
        }
        dir = dir.parent()?.to_path_buf();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_root_wins() {
        let dir = TempDir::new().unwrap();
        assert_eq!(resolve_root(Some(dir.path())), dir.path());
    }

    #[test]
    fn find_upward_locates_marker_from_subdir() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".loadout")).unwrap();
        let subdir = dir.path().join("src/deep");
        std::fs::create_dir_all(&subdir).unwrap();

        let found = find_upward(&subdir, ".loadout").unwrap();
        assert_eq!(found, dir.path());
    }

    #[test]
    fn find_upward_none_when_absent() {
        let dir = TempDir::new().unwrap();
        assert_eq!(find_upward(dir.path(), ".loadout"), None);
    }
}
