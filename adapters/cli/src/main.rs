#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives the stage editor from files.

mod catalog;
mod config;
mod script;
mod stage_transfer;

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tank_editor_system_session::EditorSession;

use crate::{
    catalog::{read_catalog, read_stage, write_json, CatalogSink},
    config::EditorConfig,
    script::{parse_script, replay},
};

#[derive(Parser)]
#[command(name = "tank-editor")]
#[command(about = "Stage editor for tank arena levels")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay an input script against a stage and store the outcome
    Edit(EditArgs),
    /// Print the share code of a stage file
    Export {
        /// Stage stored as JSON
        stage: PathBuf,
    },
    /// Turn a share code back into a stage file
    Import {
        /// Share code as printed by `export`
        code: String,
        /// Where to write the stage; printed when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Args)]
struct EditArgs {
    /// Input script, one author action per line
    script: PathBuf,
    /// Stage to open; a blank stage is edited when omitted
    #[arg(long)]
    stage: Option<PathBuf>,
    /// Existing built-in and custom stages, as a JSON array
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Editor settings
    #[arg(long, default_value = "editor.toml")]
    config: PathBuf,
    /// Where to write the catalog after a successful save
    #[arg(long)]
    out: Option<PathBuf>,
    /// Where to write the draft parked by `back`
    #[arg(long)]
    draft: Option<PathBuf>,
}

/// Entry point for the stage editor command-line interface.
fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Edit(args) => edit(args),
        Commands::Export { stage } => export(stage),
        Commands::Import { code, out } => import(&code, out),
    }
}

fn edit(args: EditArgs) -> Result<()> {
    let config = EditorConfig::load(&args.config)?;
    let stages = match &args.catalog {
        Some(path) => read_catalog(path)?,
        None => Vec::new(),
    };
    let source = fs::read_to_string(&args.script)
        .with_context(|| format!("failed to read script {}", args.script.display()))?;
    let steps = parse_script(&source)
        .with_context(|| format!("failed to parse script {}", args.script.display()))?;

    let sink = CatalogSink::new(stages.clone());
    let mut session = match &args.stage {
        Some(path) => {
            let stage = read_stage(path)?;
            EditorSession::open(&stage, stages, sink, config.geometry())
                .with_context(|| format!("stage {} cannot be edited", path.display()))?
        }
        None => EditorSession::blank(stages, sink, config.geometry()),
    };

    replay(&mut session, &steps, &config.chain());

    if let Some(modal) = session.modal() {
        println!("unanswered dialog: {}", modal.message());
    }
    let (_, sink) = session.into_parts();
    for route in &sink.routes {
        println!("navigate: {route:?}");
    }

    match &sink.saved {
        Some(stage) => {
            println!("saved stage {:?}", stage.name);
            if let Some(path) = &args.out {
                write_json(path, &sink.stages)?;
            }
        }
        None => println!("stage not saved"),
    }
    if let Some(draft) = &sink.draft {
        println!("parked draft {:?}", draft.name);
        if let Some(path) = &args.draft {
            write_json(path, draft)?;
        }
    }
    Ok(())
}

fn export(path: PathBuf) -> Result<()> {
    let stage = read_stage(&path)?;
    let code = stage_transfer::encode(&stage)
        .with_context(|| format!("failed to encode {}", path.display()))?;
    println!("{code}");
    Ok(())
}

fn import(code: &str, out: Option<PathBuf>) -> Result<()> {
    let stage = stage_transfer::decode(code).context("failed to decode share code")?;
    match out {
        Some(path) => write_json(&path, &stage),
        None => {
            let json = serde_json::to_string_pretty(&stage).context("failed to serialise stage")?;
            println!("{json}");
            Ok(())
        }
    }
}
