//! Parallel executor for running solvers

use crate::cli::ParallelizeBy;
use crate::error::{ArcExecutorError, ExecutorError};
use crate::input::InputSource;
use aoc_core::{DynSolver, SolverRegistry};
use chrono::TimeDelta;
use itertools::Itertools;
use rayon::prelude::*;
use std::ops::RangeInclusive;
use std::sync::mpsc::Sender;

/// Outcome of a single part
#[derive(Debug)]
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, ArcExecutorError>,
    /// Set on the first result produced from a parsed instance
    pub parse_duration: Option<TimeDelta>,
    pub solve_duration: TimeDelta,
}

impl SolverResult {
    fn failed(year: u16, day: u8, part: u8, error: ArcExecutorError) -> Self {
        Self {
            year,
            day,
            part,
            answer: Err(error),
            parse_duration: None,
            solve_duration: TimeDelta::zero(),
        }
    }
}

/// A registered day and the parts to run for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Which registered days and parts a run covers
#[derive(Debug, Clone, Copy, Default)]
pub struct Selection {
    pub year: Option<u16>,
    pub day: Option<u8>,
    pub part: Option<u8>,
}

impl Selection {
    /// Work items in (year, day) order
    pub fn work_items(&self, registry: &SolverRegistry) -> Vec<WorkItem> {
        registry
            .storage()
            .iter_info()
            .filter(|info| self.year.is_none_or(|y| info.year == y))
            .filter(|info| self.day.is_none_or(|d| info.day == d))
            .filter_map(|info| {
                let parts = match self.part {
                    Some(p) if (1..=info.parts).contains(&p) => p..=p,
                    Some(_) => return None,
                    None => 1..=info.parts,
                };
                Some(WorkItem {
                    year: info.year,
                    day: info.day,
                    parts,
                })
            })
            .collect()
    }
}

/// Runs work items on a dedicated thread pool, streaming results
pub struct Executor {
    shared: Shared,
    thread_pool: rayon::ThreadPool,
}

/// Everything a worker needs, shared across the pool
struct Shared {
    registry: SolverRegistry,
    input: InputSource,
    parallelize_by: ParallelizeBy,
}

impl Executor {
    pub fn new(
        registry: SolverRegistry,
        input: InputSource,
        parallelize_by: ParallelizeBy,
        thread_count: usize,
    ) -> Result<Self, ExecutorError> {
        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(thread_count)
            .thread_name(|i| format!("aoc-worker-{i}"))
            .build()
            .map_err(|e| ExecutorError::ThreadPool(e.to_string()))?;

        Ok(Self {
            shared: Shared {
                registry,
                input,
                parallelize_by,
            },
            thread_pool,
        })
    }

    /// Run `work_items`, sending one result per part to `tx`.
    ///
    /// Input and solver failures become error results; only a closed
    /// channel is reported as an `Err`.
    pub fn execute(
        &self,
        work_items: Vec<WorkItem>,
        tx: Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let shared = &self.shared;

        match shared.parallelize_by {
            ParallelizeBy::Sequential => {
                let mut collected: Option<ArcExecutorError> = None;
                for work in &work_items {
                    if let Err(e) = shared.run(work, &tx) {
                        collected = Some(ArcExecutorError::combine_opt(collected, e));
                    }
                }
                collected.map_or(Ok(()), Err)
            }
            ParallelizeBy::Year => {
                let by_year: Vec<Vec<WorkItem>> = work_items
                    .into_iter()
                    .chunk_by(|w| w.year)
                    .into_iter()
                    .map(|(_, group)| group.collect())
                    .collect();

                self.thread_pool.install(|| {
                    by_year
                        .into_par_iter()
                        .map_with(tx, |tx, items| {
                            let mut err = None;
                            for work in &items {
                                if let Err(e) = shared.run(work, tx) {
                                    err = Some(ArcExecutorError::combine_opt(err, e));
                                }
                            }
                            err
                        })
                        .reduce(|| None, combine_errors)
                        .map_or(Ok(()), Err)
                })
            }
            ParallelizeBy::Day | ParallelizeBy::Part => self.thread_pool.install(|| {
                work_items
                    .into_par_iter()
                    .map_with(tx, |tx, work| shared.run(&work, tx).err())
                    .reduce(|| None, combine_errors)
                    .map_or(Ok(()), Err)
            }),
        }
    }
}

fn combine_errors(
    a: Option<ArcExecutorError>,
    b: Option<ArcExecutorError>,
) -> Option<ArcExecutorError> {
    match (a, b) {
        (Some(a), Some(b)) => Some(ArcExecutorError::combine(a, b)),
        (a, b) => a.or(b),
    }
}

fn send(tx: &Sender<SolverResult>, result: SolverResult) -> Result<(), ArcExecutorError> {
    tx.send(result)
        .map_err(|_| ExecutorError::ChannelSend.into())
}

impl Shared {
    fn run(&self, work: &WorkItem, tx: &Sender<SolverResult>) -> Result<(), ArcExecutorError> {
        let (year, day) = (work.year, work.day);

        let input = match self.input.load(year, day) {
            Ok(input) => input,
            Err(e) => {
                let error = ArcExecutorError::from(e);
                tracing::error!(year, day, error = %error, "no input");
                for part in work.parts.clone() {
                    send(tx, SolverResult::failed(year, day, part, error.clone()))?;
                }
                return Ok(());
            }
        };

        if self.parallelize_by == ParallelizeBy::Part {
            self.run_parts_parallel(work, &input, tx)
        } else {
            self.run_parts_in_order(work, &input, tx)
        }
    }

    /// Parse once, then solve the parts in order on the same instance.
    fn run_parts_in_order(
        &self,
        work: &WorkItem,
        input: &str,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let (year, day) = (work.year, work.day);
        let mut solver = match self.registry.create_solver(year, day, input) {
            Ok(solver) => solver,
            Err(e) => return self.send_create_error(work, e, tx),
        };

        let mut parse_duration = Some(solver.parse_duration());
        for part in work.parts.clone() {
            let mut result = solve_part(year, day, part, solver.as_mut());
            result.parse_duration = parse_duration.take();
            send(tx, result)?;
        }
        Ok(())
    }

    /// Each part gets its own instance, parsed and solved on its own task.
    /// Results are still sent in part order.
    fn run_parts_parallel(
        &self,
        work: &WorkItem,
        input: &str,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let (year, day) = (work.year, work.day);

        let results: Vec<SolverResult> = work
            .parts
            .clone()
            .into_par_iter()
            .map(|part| match self.registry.create_solver(year, day, input) {
                Ok(mut solver) => {
                    let mut result = solve_part(year, day, part, solver.as_mut());
                    result.parse_duration = Some(solver.parse_duration());
                    result
                }
                Err(e) => SolverResult::failed(year, day, part, ExecutorError::from(e).into()),
            })
            .collect();

        results.into_iter().try_for_each(|result| send(tx, result))
    }

    fn send_create_error(
        &self,
        work: &WorkItem,
        error: aoc_core::SolverError,
        tx: &Sender<SolverResult>,
    ) -> Result<(), ArcExecutorError> {
        let error = ArcExecutorError::from(ExecutorError::from(error));
        tracing::warn!(year = work.year, day = work.day, error = %error, "solver not created");
        for part in work.parts.clone() {
            send(tx, SolverResult::failed(work.year, work.day, part, error.clone()))?;
        }
        Ok(())
    }
}

fn solve_part(year: u16, day: u8, part: u8, solver: &mut dyn DynSolver) -> SolverResult {
    match solver.solve(part) {
        Ok(solved) => SolverResult {
            year,
            day,
            part,
            solve_duration: solved.duration,
            answer: Ok(solved.answer),
            parse_duration: None,
        },
        Err(e) => {
            let error = ExecutorError::from(aoc_core::SolverError::from(e));
            SolverResult::failed(year, day, part, error.into())
        }
    }
}
