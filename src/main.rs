//! Rbxlx CLI - Command-line tool for inspecting and editing RBXLX place files.
//!
//! This is a host for the rbxlx library: it reads files, calls the pure
//! parse/edit/serialize operations, and writes the exported result.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rbxlx::prelude::*;

/// Rbxlx - Roblox place file editor
#[derive(Parser)]
#[command(name = "rbxlx")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log edits and parse details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the scene tree
    Tree {
        /// Path to the RBXLX file
        #[arg(short, long, env = "RBXLX_INPUT")]
        input: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the properties of a node
    Props {
        /// Path to the RBXLX file
        #[arg(short, long, env = "RBXLX_INPUT")]
        input: PathBuf,

        /// Node id (referent)
        id: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the body of a script node
    Script {
        /// Path to the RBXLX file
        #[arg(short, long, env = "RBXLX_INPUT")]
        input: PathBuf,

        /// Node id (referent)
        id: String,
    },

    /// Set a property and export the result
    Set {
        /// Path to the RBXLX file
        #[arg(short, long, env = "RBXLX_INPUT")]
        input: PathBuf,

        /// Node id (referent)
        id: String,

        /// Property locator, e.g. Vector3.size
        locator: String,

        /// New value, e.g. "4, 1, 2"
        value: String,

        /// Output RBXLX file
        #[arg(short, long, default_value = rbxlx::DEFAULT_EXPORT_FILE_NAME)]
        output: PathBuf,
    },

    /// Replace a script body from a file and export the result
    SetScript {
        /// Path to the RBXLX file
        #[arg(short, long, env = "RBXLX_INPUT")]
        input: PathBuf,

        /// Node id (referent)
        id: String,

        /// File holding the new script body
        #[arg(long)]
        from: PathBuf,

        /// Output RBXLX file
        #[arg(short, long, default_value = rbxlx::DEFAULT_EXPORT_FILE_NAME)]
        output: PathBuf,
    },

    /// Parse and re-export without edits
    Roundtrip {
        /// Path to the RBXLX file
        #[arg(short, long, env = "RBXLX_INPUT")]
        input: PathBuf,

        /// Output RBXLX file
        #[arg(short, long, default_value = rbxlx::DEFAULT_EXPORT_FILE_NAME)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Tree { input, json } => {
            cmd_tree(&input, json)?;
        }
        Commands::Props { input, id, json } => {
            cmd_props(&input, &id, json)?;
        }
        Commands::Script { input, id } => {
            cmd_script(&input, &id)?;
        }
        Commands::Set { input, id, locator, value, output } => {
            cmd_set(&input, &id, &locator, &value, &output)?;
        }
        Commands::SetScript { input, id, from, output } => {
            cmd_set_script(&input, &id, &from, &output)?;
        }
        Commands::Roundtrip { input, output } => {
            cmd_roundtrip(&input, &output)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load(input: &Path) -> Result<Scene> {
    let start = Instant::now();
    let data = fs::read(input).context("Failed to read input file")?;
    let scene = Scene::parse_bytes(&data).context("Failed to parse RBXLX")?;

    tracing::info!(
        path = %input.display(),
        nodes = scene.tree.iter().count(),
        elapsed = ?start.elapsed(),
        "loaded place file"
    );

    Ok(scene)
}

fn resolve(scene: &Scene, id: &str) -> Result<NodePath> {
    let path = scene.resolve_path(id);
    if !path.is_found() {
        bail!("Node {:?} not found", id);
    }
    Ok(path)
}

fn find<'a>(scene: &'a Scene, id: &str) -> Result<&'a TreeNode> {
    match scene.tree.find(id) {
        Some(node) => Ok(node),
        None => bail!("Node {:?} not found", id),
    }
}

fn export(scene: &Scene, output: &Path) -> Result<()> {
    if output.extension().and_then(|e| e.to_str()) != Some(rbxlx::EXPORT_EXTENSION) {
        tracing::warn!(
            path = %output.display(),
            "output does not have the .{} extension",
            rbxlx::EXPORT_EXTENSION
        );
    }

    let xml = scene.to_xml_string().context("Failed to serialize RBXLX")?;
    fs::write(output, xml).context("Failed to write output file")?;

    println!("Wrote {} ({})", output.display(), rbxlx::EXPORT_MIME_TYPE);
    Ok(())
}

fn cmd_tree(input: &Path, json: bool) -> Result<()> {
    let scene = load(input)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&scene.tree)?);
        return Ok(());
    }

    for node in scene.tree.roots() {
        print_node(node, 0);
    }

    Ok(())
}

fn print_node(node: &TreeNode, depth: usize) {
    println!(
        "{}{}{} [{}] {}",
        "  ".repeat(depth),
        if node.is_script { "*" } else { "" },
        node.name,
        node.class,
        node.id
    );

    for child in &node.children {
        print_node(child, depth + 1);
    }
}

fn cmd_props(input: &Path, id: &str, json: bool) -> Result<()> {
    let scene = load(input)?;
    let node = find(&scene, id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&node.properties)?);
        return Ok(());
    }

    for property in &node.properties {
        match &property.value {
            PropertyValue::Fields(_) => {
                println!("{} =", property.path);
                for line in property.value.to_string().lines() {
                    println!("    {}", line);
                }
            }
            value => println!("{} = {}", property.path, value),
        }
    }

    if let Some(source) = &node.source_property_path {
        println!("{} = <script body, see `rbxlx script`>", source);
    }

    Ok(())
}

fn cmd_script(input: &Path, id: &str) -> Result<()> {
    let scene = load(input)?;
    let node = find(&scene, id)?;

    match (&node.content, node.is_script) {
        (Some(content), true) => print!("{}", content),
        _ => bail!("Node {:?} ({}) is not a script", id, node.class),
    }

    Ok(())
}

fn cmd_set(input: &Path, id: &str, locator: &str, value: &str, output: &Path) -> Result<()> {
    let scene = load(input)?;
    let path = resolve(&scene, id)?;

    let (scene, outcome) = scene
        .edit_property(&path, locator, value)
        .with_context(|| format!("Failed to set {} on {}", locator, id))?;

    if outcome == EditOutcome::Unchanged {
        println!("Value {:?} does not fit {}; property left unchanged", value, locator);
    }

    export(&scene, output)
}

fn cmd_set_script(input: &Path, id: &str, from: &Path, output: &Path) -> Result<()> {
    let scene = load(input)?;
    let path = resolve(&scene, id)?;
    let content = fs::read_to_string(from).context("Failed to read script file")?;

    let (scene, _) = scene
        .edit_script_body(&path, &content)
        .with_context(|| format!("Failed to replace script body of {}", id))?;

    export(&scene, output)
}

fn cmd_roundtrip(input: &Path, output: &Path) -> Result<()> {
    println!("Converting: {} -> {}", input.display(), output.display());
    let scene = load(input)?;
    export(&scene, output)
}
