use anyhow::Result;
use clap::{Parser, Subcommand};

use stencil::{list, render, telemetry};

/// Render text templates against layered value documents
///
/// stencil builds a rendering context by deep-merging YAML/JSON value
/// documents in order — nested mappings merge key-by-key, sequences
/// concatenate, scalars are overwritten by later documents — then renders
/// each selected template against it.
///
/// QUICK START:
///
///   # values.yaml:  name: Bob
///   # greeting:     hello {{ name }}
///   stencil render -f values.yaml greeting
///
///   # Layer documents; later ones win on scalars:
///   stencil render -f base.yaml -f prod.yaml -p 'templates/**/*.tmpl'
///
///   # Render into a directory instead of stdout:
///   stencil render -f base.yaml -p '*.tmpl' -o build/
///
/// Bare value names (-f prod) resolve against the context directory
/// (default: ~/.config/stencil). Project defaults live in .stencil.toml.
#[derive(Parser)]
#[command(name = "stencil")]
#[command(version, about)]
#[command(propagate_version = true)]
#[command(after_help = "See 'stencil <command> --help' for more information on a specific command.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render templates against the merged context
    Render(render::RenderArgs),

    /// List value documents in the context directory
    List(list::ListArgs),
}

fn main() -> Result<()> {
    telemetry::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Render(ref args) => render::run(args),
        Commands::List(ref args) => list::run(args),
    }
}
