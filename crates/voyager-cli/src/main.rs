// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::io::Read;
use std::path::{Path, PathBuf};
use voyager_parser::{
    export_to_json, parse_with_fallback, validate_itinerary, ManualItineraryParser,
    ParsingConfig, TravelItinerary,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the parser config (parsing.json)
    #[arg(short, long, global = true, env = "VOYAGER_PARSER_CONFIG")]
    config: Option<PathBuf>,

    /// More log output on stderr (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse an itinerary from a file or stdin
    Parse {
        /// Input file; stdin when omitted or "-"
        input: Option<PathBuf>,
        /// Print a readable plan instead of JSON
        #[arg(long)]
        text: bool,
        /// Skip the structured JSON reader
        #[arg(long)]
        manual: bool,
        /// Print only the list of days
        #[arg(long, conflicts_with = "text")]
        days_only: bool,
    },
    /// Check an itinerary JSON file
    Validate { file: PathBuf },
    /// Show the effective parser config
    Config {
        /// Write the default config to the config path
        #[arg(long)]
        init: bool,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // Only fails if a logger is already installed.
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {:?}", path)),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn print_plan(itinerary: &TravelItinerary) {
    println!("{}", itinerary.summary());
    for day in itinerary.itinerary() {
        println!();
        println!("Day {} - {}", day.day(), day.location());
        for activity in day.activities() {
            println!("  - {}", activity);
        }
        if let Some(stay) = day.accommodation() {
            println!("  Stay: {}", stay);
        }
        if let Some(budget) = day.budget_estimate() {
            println!("  Budget: {}", budget);
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config.unwrap_or_else(ParsingConfig::default_path);
    log::debug!("[CLI] Parser config path: {:?}", config_path);

    match &cli.command {
        Commands::Parse {
            input,
            text,
            manual,
            days_only,
        } => {
            let parser = ManualItineraryParser::from_config_file(&config_path)
                .with_context(|| format!("Failed to load config from {:?}", config_path))?;
            let raw = read_input(input.as_deref())?;

            let parsed = if *manual {
                parser.parse_itinerary_text(&raw)?
            } else {
                parse_with_fallback(&raw, &parser)?
            };
            let itinerary = parsed.stamped();

            if *text {
                print_plan(&itinerary);
            } else if *days_only {
                println!("{}", export_to_json(itinerary.itinerary())?);
            } else {
                println!("{}", serde_json::to_string_pretty(&itinerary)?);
            }
        }
        Commands::Validate { file } => {
            let content = std::fs::read_to_string(file)
                .with_context(|| format!("Failed to read {:?}", file))?;
            let itinerary: TravelItinerary = serde_json::from_str(&content)
                .with_context(|| format!("{:?} is not a valid itinerary", file))?;
            if !validate_itinerary(itinerary.itinerary()) {
                anyhow::bail!("{:?} has non-sequential days", file);
            }
            println!("OK: {}", itinerary.summary());
        }
        Commands::Config { init } => {
            if *init {
                if config_path.exists() {
                    anyhow::bail!(
                        "Config already exists at {:?}; remove it first to reset",
                        config_path
                    );
                }
                ParsingConfig::default().save(&config_path)?;
                println!("Wrote default config to {:?}", config_path);
            }
            let config = ParsingConfig::load(&config_path)?;
            println!("# {}", config_path.display());
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
