//! Subcommand handlers. Results go to stdout as JSON or plain lines; logs go to stderr.

use crate::args::{LayoutFlags, Target};
use anyhow::{Context, Result, bail};
use prism::{ShapeEngine, presets};
use serde_json::Value;
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::Path;
use tracing::info;

pub(crate) fn parse(engine: &ShapeEngine, shape: &str, flags: &LayoutFlags) -> Result<()> {
    let spec = engine.parse_with_flags(shape, flags.flat, flags.flat_lists)?;
    write_json(&spec, false)
}

pub(crate) fn describe(engine: &ShapeEngine, target: &Target, flags: &LayoutFlags) -> Result<()> {
    let (model, shape) = resolve_target(target)?;
    let spec = engine.parse_with_flags(&shape, flags.flat, flags.flat_lists)?;
    let descriptor = engine.generator().generate(&model, &spec)?;
    write_json(&*descriptor, false)
}

pub(crate) fn project(
    engine: &ShapeEngine,
    target: &Target,
    flags: &LayoutFlags,
    input: Option<&Path>,
    compact: bool,
) -> Result<()> {
    let (model, shape) = resolve_target(target)?;
    let spec = engine.parse_with_flags(&shape, flags.flat, flags.flat_lists)?;
    let raw = read_input(input)?;

    match raw {
        Value::Array(items) => {
            let shaped = engine.factory().create_list(&model, &spec, &items)?;
            info!(model = %model, items = shaped.len(), "Projection complete");
            write_json(&shaped, compact)
        }
        single => {
            let shaped = engine.factory().create_one(&model, &spec, &single)?;
            write_json(&shaped, compact)
        }
    }
}

pub(crate) fn fields(engine: &ShapeEngine, model: &str) -> Result<()> {
    for name in engine.registry().list_field_names(model)? {
        println!("{name}");
    }
    Ok(())
}

pub(crate) fn types(engine: &ShapeEngine) {
    for name in engine.registry().type_names() {
        println!("{name}");
    }
}

pub(crate) fn list_presets() {
    for preset in presets::ALL {
        println!("{:<28}{:<16}{}", preset.name, preset.model.name(), compact_shape(preset.shape));
    }
}

fn resolve_target(target: &Target) -> Result<(String, String)> {
    match (&target.preset, &target.model, &target.shape) {
        (Some(name), _, _) => {
            let preset = presets::find(name).with_context(|| format!("Unknown preset: {name}"))?;
            Ok((preset.model.name().to_owned(), preset.shape.to_owned()))
        }
        (None, Some(model), Some(shape)) => Ok((model.clone(), shape.clone())),
        _ => bail!("Either --preset or both --model and --shape are required"),
    }
}

fn read_input(path: Option<&Path>) -> Result<Value> {
    let mut raw = String::new();
    match path {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
            BufReader::new(file).read_to_string(&mut raw)?;
        }
        None => {
            io::stdin().lock().read_to_string(&mut raw).context("Failed to read stdin")?;
        }
    }
    serde_json::from_str(&raw).context("Input is not valid JSON")
}

fn write_json(value: &impl serde::Serialize, compact: bool) -> Result<()> {
    let mut out = io::stdout().lock();
    if compact {
        serde_json::to_writer(&mut out, value)?;
    } else {
        serde_json::to_writer_pretty(&mut out, value)?;
    }
    writeln!(out)?;
    Ok(())
}

/// Collapses the whitespace of multi-line preset shapes for one-line listings.
fn compact_shape(shape: &str) -> String {
    shape.split_whitespace().collect()
}
