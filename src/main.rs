use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use kgml::Pathway;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Validate and convert KEGG KGML pathway files", long_about = None)]
struct Cli {
    /// RUST_LOG is used when omitted
    #[arg(long, global = true, value_parser = ["trace", "debug", "info", "warn", "error"])]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse each file and report whether it is valid KGML.
    #[command(name = "check_kgml")]
    CheckKgml {
        #[arg(long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,
    },
    /// Print the gene ids of all gene entries, one per line.
    #[command(name = "list_genes")]
    ListGenes {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value_t = false)]
        unique: bool,
    },
    #[command(name = "show_entry")]
    ShowEntry {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        id: String,
    },
    /// Parse and re-serialize a KGML file.
    #[command(name = "write_kgml")]
    WriteKgml {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
    /// Dump the parsed pathway as JSON to a file or stdout.
    #[command(name = "export_json")]
    ExportJson {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.log_level.as_deref());
    match cli.command {
        Command::CheckKgml { input } => check_kgml(&input),
        Command::ListGenes { input, unique } => list_genes(&input, unique),
        Command::ShowEntry { input, id } => show_entry(&input, &id),
        Command::WriteKgml { input, output } => write_kgml(&input, &output),
        Command::ExportJson { input, output } => export_json(&input, output.as_deref()),
    }
}

fn setup_logging(log_level: Option<&str>) {
    // clap restricts the value to a level name, which EnvFilter accepts as-is.
    let filter = match log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .init();
}

fn load_pathway(input: &Path) -> Result<Pathway> {
    let xml = fs::read_to_string(input).with_context(|| format!("Failed to read {:?}", input))?;
    Pathway::parse(&xml).with_context(|| format!("Failed to parse KGML {:?}", input))
}

fn check_kgml(inputs: &[PathBuf]) -> Result<()> {
    // Each document passes or fails on its own; keep going across the batch.
    let mut failed = 0usize;
    for input in inputs {
        match load_pathway(input) {
            Ok(pathway) => info!(
                file = ?input,
                pathway = pathway.name(),
                entries = pathway.entries().len(),
                relations = pathway.relations().len(),
                reactions = pathway.reactions().len(),
                "valid KGML"
            ),
            Err(err) => {
                failed += 1;
                error!(file = ?input, "{:#}", err);
            }
        }
    }
    if failed > 0 {
        bail!("{failed} of {} KGML files failed validation", inputs.len());
    }
    Ok(())
}

fn list_genes(input: &Path, unique: bool) -> Result<()> {
    let pathway = load_pathway(input)?;
    let genes = if unique {
        pathway.unique_genes()
    } else {
        pathway.get_genes()
    };
    let mut stdout = io::stdout().lock();
    for gene in genes {
        writeln!(stdout, "{gene}")?;
    }
    Ok(())
}

fn show_entry(input: &Path, id: &str) -> Result<()> {
    let pathway = load_pathway(input)?;
    match pathway.get_entry_by_id(id) {
        Some(entry) => {
            println!("{entry}");
            if let Some(graphics) = entry.graphics() {
                println!("  {graphics}");
            }
            for component in entry.components() {
                println!("  {component}");
            }
            Ok(())
        }
        None => bail!("No entry with id '{}' in {}", id, pathway.name()),
    }
}

fn write_kgml(input: &Path, output: &Path) -> Result<()> {
    let pathway = load_pathway(input)?;
    let xml = pathway.to_xml_string().context("Failed to serialize KGML")?;
    fs::write(output, xml).with_context(|| format!("Failed to write {:?}", output))?;
    info!(output = ?output, "wrote KGML");
    Ok(())
}

fn export_json(input: &Path, output: Option<&Path>) -> Result<()> {
    let pathway = load_pathway(input)?;
    let json = serde_json::to_string_pretty(&pathway).context("Failed to encode JSON")?;
    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Failed to write {:?}", path))?
        }
        None => println!("{json}"),
    }
    Ok(())
}
