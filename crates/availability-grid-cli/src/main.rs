//! `gridsel` CLI — generate labels, replay pointer gestures and summarize
//! availability matrices from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Default day/time labels for the upcoming week
//! gridsel labels
//!
//! # Labels relative to a fixed date
//! gridsel labels --today 2026-03-04
//!
//! # Empty matrix of the configured shape
//! GRID_DAYS=5 gridsel blank
//!
//! # Replay a gesture script against a matrix
//! gridsel replay -i script.json
//!
//! # Describe the selected ranges of a matrix
//! gridsel summary -i matrix.json --today 2026-03-04
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`.

mod config;

use std::io::{self, Read};

use anyhow::{Context, Result};
use availability_grid::{
    describe_ranges, selected_ranges, AvailabilityMatrix, GridConfig, GridSelector, LabelSet,
    PaintPolicy, PointerEvent, SlotRange,
};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "gridsel", version, about = "Availability grid selection CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print default day and time labels as JSON
    Labels {
        /// Reference date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Print an empty matrix of the configured shape
    Blank,
    /// Replay pointer events against a matrix and print the result
    Replay {
        /// Script file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Describe the selected time ranges of a matrix
    Summary {
        /// Matrix JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Reference date for day labels (YYYY-MM-DD); defaults to today
        #[arg(long)]
        today: Option<NaiveDate>,
        /// Emit slot ranges as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

/// A gesture script: a starting matrix plus the pointer events to apply.
#[derive(Deserialize)]
struct Script {
    matrix: AvailabilityMatrix,
    #[serde(default)]
    policy: PaintPolicy,
    events: Vec<PointerEvent>,
}

/// One selected range plus its length under the configured slot size.
#[derive(Serialize)]
struct RangeOutput {
    #[serde(flatten)]
    range: SlotRange,
    minutes: u64,
}

#[derive(Serialize)]
struct ReplayOutput {
    commits: usize,
    dragging: bool,
    matrix: AvailabilityMatrix,
}

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let grid = config::load()?;

    match cli.command {
        Commands::Labels { today } => {
            let today = today.unwrap_or_else(|| Local::now().date_naive());
            let labels = LabelSet::for_config(&grid, today);
            println!("{}", serde_json::to_string_pretty(&labels)?);
        }
        Commands::Blank => {
            println!("{}", serde_json::to_string(&grid.blank_matrix())?);
        }
        Commands::Replay { input, output } => {
            let raw = read_input(input.as_deref())?;
            let script: Script =
                serde_json::from_str(&raw).context("Failed to parse gesture script")?;
            let result = replay(script, &grid)?;
            let json = serde_json::to_string(&result)?;
            write_output(output.as_deref(), &format!("{json}\n"))?;
        }
        Commands::Summary { input, today, json } => {
            let raw = read_input(input.as_deref())?;
            let matrix: AvailabilityMatrix =
                serde_json::from_str(&raw).context("Failed to parse availability matrix")?;
            if json {
                let ranges: Vec<RangeOutput> = selected_ranges(&matrix)
                    .into_iter()
                    .map(|range| RangeOutput {
                        minutes: range.duration_minutes(grid.slot_minutes),
                        range,
                    })
                    .collect();
                println!("{}", serde_json::to_string(&ranges)?);
            } else {
                let today = today.unwrap_or_else(|| Local::now().date_naive());
                let grid = GridConfig {
                    days: matrix.days(),
                    slots: matrix.slots(),
                    ..grid
                };
                let labels = LabelSet::for_config(&grid, today);
                let lines = describe_ranges(&matrix, &labels, &grid);
                if lines.is_empty() {
                    println!("No availability selected");
                }
                for line in lines {
                    println!("{line}");
                }
            }
        }
    }

    Ok(())
}

fn replay(script: Script, grid: &GridConfig) -> Result<ReplayOutput> {
    let mut commits = 0;
    let labels = LabelSet::for_config(
        &GridConfig {
            days: script.matrix.days(),
            slots: script.matrix.slots(),
            ..grid.clone()
        },
        Local::now().date_naive(),
    );
    let mut selector = GridSelector::new(script.matrix, Some(labels), |_: &AvailabilityMatrix| {
        commits += 1
    })?
    .with_policy(script.policy);

    for (index, event) in script.events.into_iter().enumerate() {
        debug!(index, ?event, "replaying event");
        selector
            .handle(event)
            .with_context(|| format!("Event {index} rejected"))?;
    }

    let dragging = selector.is_dragging();
    let matrix = selector.into_matrix();
    Ok(ReplayOutput {
        commits,
        dragging,
        matrix,
    })
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
