//! Command-line arguments.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "prism")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Project JSON records through shape selections")]
pub(crate) struct Cli {
    /// Engine config file (TOML, YAML or JSON). `PRISM__*` variables override it.
    #[arg(short, long, global = true)]
    pub(crate) config: Option<PathBuf>,

    /// JSON catalog of record types to use instead of the built-in one
    #[arg(long, global = true)]
    pub(crate) catalog: Option<PathBuf>,

    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub(crate) verbose: u8,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Parse a shape string and print its canonical form
    Parse {
        shape: String,
        #[command(flatten)]
        flags: LayoutFlags,
    },
    /// Resolve a shape against a record type and print the descriptor
    Describe {
        #[command(flatten)]
        target: Target,
        #[command(flatten)]
        flags: LayoutFlags,
    },
    /// Project a JSON object or array of objects
    Project {
        #[command(flatten)]
        target: Target,
        #[command(flatten)]
        flags: LayoutFlags,
        /// Input file; stdin when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Single-line JSON output
        #[arg(long)]
        compact: bool,
    },
    /// List the fields of a record type, sorted
    Fields { model: String },
    /// List known record types
    Types,
    /// List the built-in shape presets
    Presets,
}

/// Either an explicit `--model`/`--shape` pair or a named `--preset`.
#[derive(Debug, Args)]
pub(crate) struct Target {
    #[arg(short, long, requires = "shape", conflicts_with = "preset")]
    pub(crate) model: Option<String>,

    #[arg(short, long, requires = "model")]
    pub(crate) shape: Option<String>,

    #[arg(short, long, required_unless_present = "model")]
    pub(crate) preset: Option<String>,
}

#[derive(Debug, Args)]
pub(crate) struct LayoutFlags {
    /// Treat input keys as flattened (`recipient.uei`)
    #[arg(long)]
    pub(crate) flat: bool,

    #[arg(long)]
    pub(crate) flat_lists: bool,
}
