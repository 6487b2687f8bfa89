//! Core solver traits

use crate::error::{ParseError, SolveError};

/// Parses a day's puzzle text into the data its parts share.
///
/// The shared data is either owned or borrows from the input text, e.g.
/// `type SharedData<'a> = Vec<&'a str>` keeps the lines without copying.
pub trait AocParser {
    /// Parsed input plus anything the parts want to memoize for each other
    type SharedData<'a>: 'a;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError>;
}

/// Solves part `N` of a puzzle.
///
/// ```
/// use aoc_core::{AocParser, PartSolver, ParseError, SolveError};
///
/// struct Depths;
///
/// impl AocParser for Depths {
///     type SharedData<'a> = Vec<i32>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input.split_whitespace().map(|w| w.parse().map_err(|_| ParseError::invalid(w))).collect()
///     }
/// }
///
/// impl PartSolver<1> for Depths {
///     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
///         Ok(shared.iter().sum::<i32>().to_string())
///     }
/// }
/// ```
pub trait PartSolver<const N: u8>: AocParser {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError>;
}

/// A complete day: parsing plus dispatch to each part.
///
/// Usually generated by `#[derive(AocSolver)]`, which forwards part `k`
/// to `PartSolver<k>` and reports [`SolveError::PartNotImplemented`] for
/// anything else. Parts are numbered from 1.
pub trait Solver: AocParser {
    const PARTS: u8;

    /// `Err(SolveFailed)` means the input has no answer for this part.
    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError>;
}

pub trait SolverExt: Solver {
    /// Like [`Solver::solve_part`], but rejects parts outside `1..=PARTS` first.
    fn solve_part_checked_range(
        shared: &mut Self::SharedData<'_>,
        part: u8,
    ) -> Result<String, SolveError> {
        if (1..=Self::PARTS).contains(&part) {
            Self::solve_part(shared, part)
        } else {
            Err(SolveError::PartOutOfRange(part))
        }
    }
}

impl<T: Solver + ?Sized> SolverExt for T {}
