//! Parsed, ready-to-solve puzzle instances

use crate::error::{ParseError, SolveError};
use crate::solver::{Solver, SolverExt};
use chrono::{TimeDelta, Utc};

/// Answer for one part and the wall time spent computing it
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub answer: String,
    pub duration: TimeDelta,
}

/// Runs `f` and measures it with the UTC clock.
fn timed<T>(f: impl FnOnce() -> T) -> (T, TimeDelta) {
    let start = Utc::now();
    let value = f();
    (value, Utc::now() - start)
}

/// One day's parsed input, bound to the year/day it was created for.
///
/// All parts solved through the same instance share `S::SharedData`, so a
/// part may reuse work a previous part stored there.
pub struct SolverInstance<'a, S: Solver> {
    year: u16,
    day: u8,
    shared: S::SharedData<'a>,
    parsed_in: TimeDelta,
}

impl<'a, S: Solver> SolverInstance<'a, S> {
    pub fn new(year: u16, day: u8, input: &'a str) -> Result<Self, ParseError> {
        let (shared, parsed_in) = timed(|| S::parse(input));
        Ok(Self {
            year,
            day,
            shared: shared?,
            parsed_in,
        })
    }
}

/// Object-safe view of a [`SolverInstance`], used by the registry.
///
/// ```no_run
/// use aoc_core::DynSolver;
///
/// fn run(mut solver: Box<dyn DynSolver>) -> Result<(), Box<dyn std::error::Error>> {
///     for part in 1..=solver.parts() {
///         let result = solver.solve(part)?;
///         println!("Part {part}: {} ({})", result.answer, result.duration);
///     }
///     println!("Parse took {}", solver.parse_duration());
///     Ok(())
/// }
/// ```
pub trait DynSolver {
    /// Solve `part` and time it. Parts outside `1..=parts()` are rejected.
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError>;

    fn year(&self) -> u16;

    fn day(&self) -> u8;

    fn parts(&self) -> u8;

    fn parse_duration(&self) -> TimeDelta;
}

impl<S: SolverExt> DynSolver for SolverInstance<'_, S> {
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError> {
        let (answer, duration) = timed(|| S::solve_part_checked_range(&mut self.shared, part));
        Ok(SolveResult {
            answer: answer?,
            duration,
        })
    }

    fn year(&self) -> u16 {
        self.year
    }

    fn day(&self) -> u8 {
        self.day
    }

    fn parts(&self) -> u8 {
        S::PARTS
    }

    fn parse_duration(&self) -> TimeDelta {
        self.parsed_in
    }
}
