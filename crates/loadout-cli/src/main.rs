mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{config::ConfigSubcommand, skill::SkillSubcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "loadout",
    about = "Deterministic skill selection — map task descriptions to the instruction documents an agent should load",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .loadout/ or .git/)
    #[arg(long, global = true, env = "LOADOUT_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize loadout in the current project
    Init,

    /// Select skills for a task description
    Select {
        /// Free-text task description (empty is valid)
        #[arg(default_value = "")]
        description: String,

        /// Select for a named command (implement, plan, ...) instead of the
        /// description baseline
        #[arg(long)]
        command: Option<String>,

        /// Resolve selected identifiers to documents through the registry
        #[arg(long)]
        resolve: bool,
    },

    /// List and read skill documents
    Skill {
        #[command(subcommand)]
        subcommand: SkillSubcommand,
    },

    /// Inspect and validate the selector configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root),
        Commands::Select {
            description,
            command,
            resolve,
        } => cmd::select::run(&root, &description, command.as_deref(), resolve, cli.json),
        Commands::Skill { subcommand } => cmd::skill::run(&root, subcommand, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
