mod loader;
mod report;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use roster_core::{
    Catalog, CatalogLoader, PartialTeam, StaticCatalogLoader, Team, base_team_data, dehydrate,
    deserialize, hydrate, serialize,
};
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};

use loader::DirCatalogLoader;
use report::{Table, catalog_rows, write_catalog, write_team};

#[derive(Debug, Subcommand)]
enum Command {
    /// Hydrate a saved team (dehydrated JSON) and print its share string
    Encode {
        /// Path to the dehydrated team JSON
        path: PathBuf,
    },
    /// Decode a share string and print the team
    Decode {
        /// Share string, e.g. "n=Road%20Hogs&v=s:car,w:ram!turret"
        share: String,

        /// Print the dehydrated JSON tree instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// List one of the reference catalogs
    Catalog {
        #[arg(value_enum)]
        table: Table,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Parser)]
#[command(name = "roster", version = "0.1.0")]
#[command(about = "Build, inspect and decode vehicle team share links")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Directory holding vehicles/sponsors/weapons/upgrades/perks JSON tables
    #[arg(long, global = true)]
    catalog_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Optional path to write output instead of stdout
    #[arg(long, global = true)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let catalog = load_catalog(&args)?;
    let mut out = open_output(args.output.as_deref())?;
    run(&args.command, &catalog, &mut out)?;
    out.flush()?;
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn load_catalog(args: &Args) -> Result<Catalog> {
    if let Some(dir) = &args.catalog_dir {
        DirCatalogLoader::new(dir)
            .load_catalog()
            .with_context(|| format!("failed to load catalog from {}", dir.display()))
    } else {
        StaticCatalogLoader
            .load_catalog()
            .context("bundled catalog is invalid")
    }
}

fn run(command: &Command, catalog: &Catalog, out: &mut dyn Write) -> Result<()> {
    match command {
        Command::Encode { path } => {
            let link = encode_file(catalog, path)?;
            writeln!(out, "{link}")?;
        }
        Command::Decode { share, json } => {
            let team = decode_or_default(catalog, share);
            if *json {
                serde_json::to_writer_pretty(&mut *out, &dehydrate(&team))?;
                writeln!(out)?;
            } else {
                write_team(out, &team)?;
            }
        }
        Command::Catalog { table, json } => {
            let rows = catalog_rows(catalog, *table);
            if *json {
                serde_json::to_writer_pretty(&mut *out, &rows)?;
                writeln!(out)?;
            } else {
                write_catalog(out, &rows)?;
            }
        }
    }
    Ok(())
}

fn encode_file(catalog: &Catalog, path: &Path) -> Result<String> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let partial: PartialTeam = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a dehydrated team", path.display()))?;
    let team = hydrate(catalog, partial)
        .with_context(|| format!("{} references unknown catalog entries", path.display()))?;
    Ok(serialize(&team))
}

/// Invalid links fall back to a new team, as a shared link in the browser would.
fn decode_or_default(catalog: &Catalog, share: &str) -> Team {
    deserialize(catalog, share).unwrap_or_else(|| {
        eprintln!(
            "⚠️  {}",
            "Share link is invalid; showing a new team instead".yellow()
        );
        base_team_data()
    })
}

/// Buffered stdout, or a freshly created file when `--output` is given.
fn open_output(path: Option<&Path>) -> Result<BufWriter<Box<dyn Write>>> {
    let sink: Box<dyn Write> = match path {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?,
        ),
        None => Box::new(stdout()),
    };
    Ok(BufWriter::new(sink))
}
