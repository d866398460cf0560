use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use loadout_core::{paths, registry::SkillRegistry, types::SkillId};
use std::path::Path;

#[derive(Subcommand)]
pub enum SkillSubcommand {
    /// List skill documents in the registry
    List,

    /// Print one skill document
    Show {
        /// Skill id, e.g. core/thinking
        id: String,
    },
}

pub fn run(root: &Path, subcmd: SkillSubcommand, json: bool) -> anyhow::Result<()> {
    let registry = SkillRegistry::open(root).context("failed to open skill registry")?;

    match subcmd {
        SkillSubcommand::List => {
            let ids = registry.list().context("failed to list skills")?;
            if json {
                print_json(&ids)?;
            } else {
                let rows = ids
                    .iter()
                    .map(|id| {
                        vec![
                            id.to_string(),
                            paths::skill_doc_path(root, id).display().to_string(),
                        ]
                    })
                    .collect();
                print_table(&["ID", "PATH"], rows);
            }
        }
        SkillSubcommand::Show { id } => {
            let id = SkillId::from(id);
            let doc = registry
                .load(&id)
                .with_context(|| format!("skill '{id}' not found"))?;
            if json {
                print_json(&doc)?;
            } else {
                println!("{}", doc.content.trim_end());
            }
        }
    }

    Ok(())
}
