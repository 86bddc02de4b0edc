// smartstore/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "smartstore")]
#[command(about = "Cleans customer, product and sales extracts and loads them into a DuckDB warehouse", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🧽 Cleans the raw files into prepared files (data/raw -> data/prepared)
    Prepare {
        /// Project directory
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Date used for missing or unreadable dates (YYYY-MM-DD, default: today)
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// 🏗️  Loads the prepared files into the warehouse (truncate + reload)
    Load {
        /// Project directory
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },

    /// 🚀 Runs prepare then load
    Run {
        /// Project directory
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Date used for missing or unreadable dates (YYYY-MM-DD, default: today)
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// 🧼 Generic cleaning pass over a single CSV file
    Scrub {
        /// Input CSV file
        input: PathBuf,

        /// Output CSV file
        #[arg(long, short)]
        output: PathBuf,

        /// Value written into every missing cell
        #[arg(long)]
        fill: Option<String>,

        /// Remove exact duplicate rows
        #[arg(long)]
        dedupe: bool,

        /// Lower-case and trim every text value
        #[arg(long)]
        normalize_text: bool,

        /// Column rename, repeatable (ex: --rename cust_id=CustomerID)
        #[arg(long = "rename", value_parser = parse_rename)]
        renames: Vec<(String, String)>,

        /// Column parsed into 'StandardDateTime'
        #[arg(long)]
        date_column: Option<String>,
    },

    /// 🔍 Inspects a warehouse table (schema + sample rows)
    Inspect {
        /// Project directory (used to locate the warehouse)
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Path to the DuckDB database file (overrides the project setting)
        #[arg(long)]
        db_path: Option<PathBuf>,

        /// Table name to inspect
        #[arg(long, short)]
        table: String,

        /// Number of sample rows to display
        #[arg(long, default_value = "5")]
        limit: usize,
    },

    /// 🧹 Cleans generated artifacts (target/ and prepared files)
    Clean {
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },
}

fn parse_rename(raw: &str) -> Result<(String, String), String> {
    let (from, to) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FROM=TO, got '{}'", raw))?;
    let (from, to) = (from.trim(), to.trim());
    if from.is_empty() || to.is_empty() {
        return Err(format!("empty column name in '{}'", raw));
    }
    Ok((from.to_string(), to.to_string()))
}
