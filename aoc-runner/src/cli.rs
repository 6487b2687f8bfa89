//! Command-line arguments

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// How solver work is spread over the thread pool
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum ParallelizeBy {
    /// Everything in order on the calling thread
    Sequential,
    /// One task per year; days and parts run in order within a year
    Year,
    /// One task per year/day; parts share one parsed instance (default)
    #[default]
    Day,
    /// One task per part; each part parses its own instance
    Part,
}

/// Run Advent of Code solvers for 2020 and 2023
#[derive(Parser, Debug)]
#[command(name = "aoc", about = "Run Advent of Code solvers", version)]
pub struct Args {
    /// Year to run (runs all years if omitted)
    #[arg(short, long)]
    pub year: Option<u16>,

    /// Day to run (runs all days if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
    pub day: Option<u8>,

    /// Part to run (runs all parts if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub part: Option<u8>,

    /// Only run solvers carrying all of these tags (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Solve this file instead of the downloaded input ("-" reads stdin)
    #[arg(short, long, requires_all = ["year", "day"])]
    pub input: Option<PathBuf>,

    /// Cache directory for downloaded puzzle inputs
    #[arg(long, default_value = "~/.cache/aoc_solver")]
    pub cache_dir: PathBuf,

    /// Number of worker threads
    #[arg(long)]
    pub threads: Option<usize>,

    #[arg(long, value_enum, default_value = "day")]
    pub parallelize_by: ParallelizeBy,

    /// User id the cached inputs are filed under
    #[arg(long)]
    pub user_id: Option<u64>,

    /// Only print answers
    #[arg(short, long)]
    pub quiet: bool,

    /// Debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long)]
    pub verbose: bool,
}
