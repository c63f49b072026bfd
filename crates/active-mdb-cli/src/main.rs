//! mdb-query - inspect legacy .mdb files from the command line.
//!
//! Thin wrapper over the active-mdb library. Records are written to stdout as
//! one JSON object per line; logs go to stderr.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use active_mdb::MdbConfig;

#[derive(Parser, Debug)]
#[command(name = "mdb-query")]
#[command(about = "Query legacy .mdb files through mdbtools")]
struct Args {
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory containing the mdbtools binaries (defaults to PATH)
    #[arg(long)]
    bin_dir: Option<PathBuf>,

    /// Field delimiter requested from mdb-sql
    #[arg(long)]
    delimiter: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Database file
    file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the JET version reported by mdb-ver
    Version,

    /// List tables
    Tables {
        /// Keep only tables matching any of these patterns
        #[arg(long, conflicts_with = "exclude")]
        include: Vec<String>,

        /// Drop tables matching any of these patterns
        #[arg(long)]
        exclude: Vec<String>,
    },

    /// List the columns of a table
    Fields { table: String },

    /// Run a raw SQL statement
    Sql { statement: String },

    /// Select rows from a table
    Select {
        table: String,

        /// Columns to select (default: all)
        #[arg(long = "column")]
        columns: Vec<String>,

        #[command(flatten)]
        filter: commands::WhereArgs,
    },

    /// Count rows matching the conditions
    Count {
        table: String,

        #[command(flatten)]
        filter: commands::WhereArgs,
    },

    /// Export a table with mdb-export
    Export {
        table: String,

        /// Output format: sql or csv
        #[arg(long)]
        format: Option<String>,

        /// Include a header row
        #[arg(long)]
        headers: bool,
    },

    /// Print the DDL of a table
    Schema {
        table: String,

        /// Target SQL dialect
        #[arg(long)]
        backend: Option<String>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let config = load_config(&args)?;
    debug!("Using configuration: {:?}", config);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::run(config, &args.file, args.command, &mut out)
}

/// Configuration file first, then command-line overrides.
fn load_config(args: &Args) -> Result<MdbConfig> {
    let mut config = match &args.config {
        Some(path) => MdbConfig::from_json_file(path)?,
        None => MdbConfig::default(),
    };
    if let Some(bin_dir) = &args.bin_dir {
        config = config.with_bin_dir(bin_dir);
    }
    if let Some(delimiter) = &args.delimiter {
        config = config.with_delimiter(delimiter);
    }
    config.validate()?;
    Ok(config)
}
