use crate::output::print_json;
use anyhow::Context;
use loadout_core::{config::SelectorConfig, registry::SkillRegistry, selector::Selector};
use std::path::Path;

pub fn run(
    root: &Path,
    description: &str,
    command: Option<&str>,
    resolve: bool,
    json: bool,
) -> anyhow::Result<()> {
    // An uninitialized tree still selects against the built-in tables.
    let config = SelectorConfig::load_or_default(root).context("failed to load config")?;
    let selector = Selector::new(&config).context("failed to compile rule table")?;

    let selection = match command {
        Some(name) => selector.select_for_command(name, description),
        None => selector.select(description),
    };

    if resolve {
        let registry = SkillRegistry::open(root).context("failed to open skill registry")?;
        let docs = registry
            .materialize(&selection, config.max_active)
            .context("failed to materialize selection")?;

        if json {
            print_json(&docs)?;
        } else {
            for doc in &docs {
                println!("--- {} ({})", doc.id, doc.path.display());
                println!("{}\n", doc.content.trim_end());
            }
        }
        return Ok(());
    }

    if json {
        print_json(&selection)?;
    } else {
        println!("Skills ({}):", selection.skills.len());
        for id in &selection.skills {
            println!("  {id}");
        }
        if !selection.matched_rules.is_empty() {
            let triggered: Vec<&str> = selection
                .matched_rules
                .iter()
                .map(|s| s.as_str())
                .collect();
            println!("Triggered: {}", triggered.join(", "));
        }
    }

    Ok(())
}
