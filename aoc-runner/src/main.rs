//! `aoc` - run the Advent of Code solvers on cached, downloaded or local input

mod aggregator;
mod cache;
mod cli;
mod config;
mod error;
mod executor;
mod input;
mod logging;
mod output;

// Linked for its `inventory` submissions
use aoc_puzzles as _;

use aoc_core::{SolverRegistry, SolverRegistryBuilder};
use aoc_fetch::PuzzleClient;
use cache::InputCache;
use clap::Parser;
use cli::Args;
use config::Config;
use error::CliError;
use executor::{Executor, Selection, WorkItem};
use input::{InputSource, RemoteInput};
use output::OutputFormatter;
use std::io::Read;
use std::path::Path;

fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let config = Config::from_args(args)?;
    let registry = build_registry(&config.tags)?;

    let selection = Selection {
        year: config.year_filter,
        day: config.day_filter,
        part: config.part_filter,
    };
    let work_items = selection.work_items(&registry);
    if work_items.is_empty() {
        println!("No solvers found matching the specified filters.");
        return Ok(());
    }

    let input = match &config.input {
        Some(path) => InputSource::Literal(read_literal_input(path)?),
        None => InputSource::Remote(remote_input(&config, &work_items)?),
    };

    let executor = Executor::new(
        registry,
        input,
        config.parallelize_by,
        config.thread_count,
    )
    .map_err(|e| CliError::Config(e.to_string()))?;

    run_executor(executor, work_items, config.quiet)
}

/// `--input` contents; `-` reads stdin
fn read_literal_input(path: &Path) -> Result<String, CliError> {
    let read = if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text).map(|_| text)
    } else {
        std::fs::read_to_string(path)
    };
    read.map_err(|source| CliError::InputFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Cache plus downloader, prompting for a session if some input is not
/// cached yet and none was configured.
fn remote_input(config: &Config, work_items: &[WorkItem]) -> Result<RemoteInput, CliError> {
    let client = PuzzleClient::new()?;
    let mut remote = RemoteInput::new(
        InputCache::new(config.cache_dir.clone(), config.user_id),
        client,
        config.session.clone(),
    );

    let missing = remote.missing(work_items.iter().map(|w| (w.year, w.day)));
    if missing.is_empty() {
        return Ok(remote);
    }

    tracing::info!(count = missing.len(), "inputs missing from cache");
    for (year, day) in &missing {
        tracing::debug!(year, day, "missing");
    }

    if config.session.is_empty() {
        let session = config::prompt_session(
            "Session token required to fetch missing inputs from adventofcode.com",
        )?;
        let expected = config.user_id_provided.then_some(config.user_id);
        let user_id = config::verify_session(&session, expected)?;
        remote.set_session(
            session,
            InputCache::new(config.cache_dir.clone(), user_id),
        );
    }
    Ok(remote)
}

fn run_executor(
    executor: Executor,
    work_items: Vec<WorkItem>,
    quiet: bool,
) -> Result<(), CliError> {
    if !quiet {
        println!("Running {} solver(s)...", work_items.len());
    }

    let expected_keys: Vec<aggregator::ResultKey> = work_items
        .iter()
        .flat_map(|w| {
            w.parts.clone().map(move |part| aggregator::ResultKey {
                year: w.year,
                day: w.day,
                part,
            })
        })
        .collect();

    let (tx, rx) = std::sync::mpsc::channel();
    let executor_handle = std::thread::spawn(move || executor.execute(work_items, tx));

    let formatter = OutputFormatter::new(quiet);
    let mut aggregator = aggregator::ResultAggregator::new(expected_keys);
    let mut results = Vec::new();

    for result in rx {
        for ready in aggregator.add(result) {
            formatter.print_result(&ready);
            results.push(ready);
        }
    }

    for ready in aggregator.drain() {
        formatter.print_result(&ready);
        results.push(ready);
    }

    if !aggregator.is_complete() {
        tracing::warn!("not all expected results were received");
    }

    executor_handle
        .join()
        .map_err(|_| CliError::Config("Executor thread panicked".to_string()))??;

    formatter.print_summary(&results);
    Ok(())
}

/// Registry of every linked solver carrying all of `tags`
fn build_registry(tags: &[String]) -> Result<SolverRegistry, CliError> {
    let builder = SolverRegistryBuilder::new();

    let builder = if tags.is_empty() {
        builder.register_all_plugins()?
    } else {
        builder.register_solver_plugins(|plugin| {
            tags.iter().all(|tag| plugin.tags.contains(&tag.as_str()))
        })?
    };

    Ok(builder.build())
}
