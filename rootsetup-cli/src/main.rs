mod catalog;
mod policy;
mod reports;
mod runner;
mod seeds;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use catalog::FileCatalogLoader;
use policy::PickPolicy;
use rootsetup_core::{CatalogLoader, ExpansionCatalog, SetupOptions, StaticCatalogLoader};
use runner::{SetupRecord, run_setup};
use seeds::{resolve_seed_inputs, split_csv};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Colored human-readable summary
    Console,
    /// Machine-readable JSON document
    Json,
    /// Markdown table
    Markdown,
}

#[derive(Debug, Parser)]
#[command(name = "rootsetup", version)]
#[command(about = "Randomized setup generator for the Root board game")]
struct Args {
    /// Seeds to run (comma-separated; integers, ranges like 1..10, or `now`)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Number of players
    #[arg(long, default_value_t = 4)]
    players: usize,

    /// Expansions to enable (comma-separated); defaults to the base game
    #[arg(long, default_value = "")]
    expansions: String,

    /// Number of random landmarks (0-2)
    #[arg(long, default_value_t = 0)]
    landmarks: u8,

    /// Set up the landmark printed on the chosen map
    #[arg(long)]
    map_landmark: bool,

    /// Deal three hirelings
    #[arg(long)]
    hirelings: bool,

    /// Player 1 always goes first
    #[arg(long)]
    fixed_first_player: bool,

    /// JSON options file; replaces the individual setup flags above
    #[arg(long)]
    options: Option<PathBuf>,

    /// Expansion catalog JSON file instead of the bundled one
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// How automated players pick their faction
    #[arg(long, value_enum, default_value_t = PickPolicy::First)]
    policy: PickPolicy,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// List the expansions in the catalog and exit
    #[arg(long)]
    list_expansions: bool,

    /// Print every step as it runs
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let catalog = load_catalog(&args)?;

    if args.list_expansions {
        return list_expansions(&args, &catalog);
    }

    let options = build_options(&args)?;
    let seeds = resolve_seed_inputs(&split_csv(&args.seeds))?;
    log::info!(
        "running {} setup(s) with {} players",
        seeds.len(),
        options.player_count
    );

    if args.report == ReportFormat::Console {
        announce_banner();
    }

    let start_time = Instant::now();
    let mut records = Vec::with_capacity(seeds.len());
    for seed in seeds {
        records.push(run_setup(
            &catalog,
            &options,
            seed,
            args.policy,
            args.verbose,
        )?);
    }

    write_reports(&args, &records, start_time)?;

    if records.iter().any(|record| !record.completed) {
        std::process::exit(1);
    }
    Ok(())
}

fn load_catalog(args: &Args) -> Result<ExpansionCatalog> {
    match &args.catalog {
        Some(path) => FileCatalogLoader::new(path)
            .load_catalog()
            .with_context(|| format!("failed to load catalog {}", path.display())),
        None => StaticCatalogLoader
            .load_catalog()
            .context("bundled catalog is invalid"),
    }
}

fn build_options(args: &Args) -> Result<SetupOptions> {
    if let Some(path) = &args.options {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        return SetupOptions::from_json(&json)
            .with_context(|| format!("failed to parse options {}", path.display()));
    }
    Ok(SetupOptions {
        expansions: split_csv(&args.expansions),
        player_count: args.players,
        fixed_first_player: args.fixed_first_player,
        use_map_landmark: args.map_landmark,
        landmark_count: args.landmarks,
        use_hirelings: args.hirelings,
    })
}

fn list_expansions(args: &Args, catalog: &ExpansionCatalog) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available expansions:")?;
    for code in catalog.codes() {
        let Some(definition) = catalog.get(code) else {
            continue;
        };
        let marker = if definition.base { " (base)" } else { "" };
        writeln!(
            output_target.writer(),
            "  {code:12} - {}{marker}",
            definition.name
        )?;
    }
    output_target.flush_inner()?;
    Ok(())
}

fn announce_banner() {
    println!("{}", "🌲 Root Setup Generator".bright_cyan().bold());
    println!("{}", "=======================".cyan());
}

fn write_reports(args: &Args, records: &[SetupRecord], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report {
        ReportFormat::Json => reports::generate_json_report(output_target.writer(), records)?,
        ReportFormat::Markdown => {
            reports::generate_markdown_report(output_target.writer(), records)?;
        }
        ReportFormat::Console => {
            reports::generate_console_report(
                output_target.writer(),
                records,
                start_time.elapsed(),
            )?;
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}
