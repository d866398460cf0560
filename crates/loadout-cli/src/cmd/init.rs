use anyhow::Context;
use loadout_core::{config::SelectorConfig, io, paths, types::SkillId};
use std::path::Path;

/// Seed documents for every identifier the built-in tables reference.
/// Written with `write_if_missing` so re-running init never clobbers local
/// edits to a skill document.
const SEED_SKILLS: &[(&str, &str)] = &[
    (
        "core/thinking",
        "# Thinking\n\nBefore touching code, restate the task in your own words, list what is\nknown and unknown, and write down the smallest plan that could work.\nPrefer reasoning you can check over reasoning that sounds complete.\n",
    ),
    (
        "core/verification",
        "# Verification\n\nEvery claim about behavior needs a way to observe it. Run the thing,\nread the output, and compare against what you predicted before running.\n",
    ),
    (
        "process/retrospective",
        "# Retrospective\n\nAfter the task, record what surprised you: wrong assumptions, missing\ncontext, steps that took longer than expected. Propose one concrete edit\nto these documents per lesson.\n",
    ),
    (
        "development/testing",
        "# Testing\n\nWrite the failing test first when the expected behavior is clear. Name\ntests after the behavior they pin, not the function they call. One\nassertion story per test.\n",
    ),
    (
        "development/tdd",
        "# TDD\n\nRed, green, refactor. Keep the loop short: if a test stays red for more\nthan a few minutes, shrink the step.\n",
    ),
    (
        "development/debugging",
        "# Debugging\n\nReproduce before you theorize. Bisect the input, not the code, when you\ncan. State the expected and actual behavior side by side before changing\nanything.\n",
    ),
    (
        "infrastructure/serverless",
        "# Serverless\n\nKeep handlers thin: parse, delegate, serialize. Cold-start cost lives in\nimports and init code. Configuration belongs in the environment, not the\nbundle.\n",
    ),
    (
        "development/data-modeling",
        "# Data modeling\n\nModel the queries you will run, not the entities you can imagine.\nMigrations are append-only history: never edit an applied one.\n",
    ),
    (
        "tools/duckdb",
        "# DuckDB\n\nPrefer one wide query over a loop of small ones. Use `EXPLAIN` before\nassuming a scan is the problem. Parquet in, Parquet out.\n",
    ),
    (
        "development/api-design",
        "# API design\n\nName endpoints after resources, not verbs. Version from day one. Every\nerror response carries a machine-readable code and a human-readable\nmessage.\n",
    ),
    (
        "development/refactoring",
        "# Refactoring\n\nSeparate behavior-preserving changes from behavior changes, in commits\nand in review. If tests must change, it was not a refactor.\n",
    ),
    (
        "writing/documentation",
        "# Documentation\n\nWrite for the reader who has the problem, not the author who has the\nsolution. Lead with the working example.\n",
    ),
    (
        "planning/design",
        "# Design\n\nA plan names the pieces, the seams between them, and the order of\nattack. Decisions you are deferring are part of the plan: list them.\n",
    ),
];

pub fn run(root: &Path) -> anyhow::Result<()> {
    println!("Initializing loadout in: {}", root.display());

    // 1. Create the .loadout directory tree
    for dir in [paths::LOADOUT_DIR, paths::SKILLS_DIR] {
        let p = root.join(dir);
        io::ensure_dir(&p).with_context(|| format!("failed to create {}", p.display()))?;
    }

    // 2. Write config.yaml if missing
    let config_path = paths::config_path(root);
    if !config_path.exists() {
        SelectorConfig::default()
            .save(root)
            .context("failed to write config.yaml")?;
        println!("  created: .loadout/config.yaml");
    } else {
        println!("  exists:  .loadout/config.yaml");
    }

    // 3. Seed skill documents for the built-in identifiers
    let mut created = 0;
    for (id, content) in SEED_SKILLS {
        let path = paths::skill_doc_path(root, &SkillId::from(*id));
        let written = io::write_if_missing(&path, content.as_bytes())
            .with_context(|| format!("failed to write skill document for '{id}'"))?;
        if written {
            created += 1;
        }
    }
    println!("  skills:  {created} created, {} existing", SEED_SKILLS.len() - created);

    println!("\nloadout initialized.");
    println!("Next: loadout select \"<task description>\"");

    Ok(())
}
