#![allow(clippy::print_stdout)]

mod args;
mod commands;

use crate::args::{Cli, Command};
use anyhow::{Context, Result};
use clap::Parser;
use prism::domain::config::EngineConfigInner;
use prism::{Catalog, EngineConfig, SchemaRegistry, ShapeEngine};
use prism_kernel::config::load_config;
use prism_logger::Logger;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config: EngineConfigInner = load_config(cli.config.as_deref())?;
    let config = EngineConfig::from(config);
    let _logger = Logger::from_config(env!("CARGO_PKG_NAME"), &config.logging, cli.verbose)?.init()?;

    let mut builder = ShapeEngine::builder().config(config);
    if let Some(path) = &cli.catalog {
        builder = builder.registry(Arc::new(load_catalog(path)?));
    }
    let engine = builder.build();

    match cli.command {
        Command::Parse { shape, flags } => commands::parse(&engine, &shape, &flags)?,
        Command::Describe { target, flags } => commands::describe(&engine, &target, &flags)?,
        Command::Project { target, flags, input, compact } => {
            commands::project(&engine, &target, &flags, input.as_deref(), compact)?;
        }
        Command::Fields { model } => commands::fields(&engine, &model)?,
        Command::Types => commands::types(&engine),
        Command::Presets => commands::list_presets(),
    }

    Ok(())
}

fn load_catalog(path: &Path) -> Result<SchemaRegistry> {
    let file = File::open(path).with_context(|| format!("Failed to open catalog {}", path.display()))?;
    let catalog = Catalog::from_reader(BufReader::new(file))?;
    Ok(SchemaRegistry::from_catalog(&catalog)?)
}
