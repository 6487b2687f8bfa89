//! Report Repair: entries summing to 2020

use crate::utils::text::{lines, parse_num};
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

const TARGET: u64 = 2020;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 1, tags = ["search"])]
pub struct Solver;

impl AocParser for Solver {
    /// Expense entries, sorted ascending
    type SharedData<'a> = Vec<u64>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let mut entries = lines(input).map(parse_num).collect::<Result<Vec<u64>, _>>()?;
        entries.sort_unstable();
        Ok(entries)
    }
}

/// Two entries of `sorted` adding up to `target`
fn pair_summing_to(sorted: &[u64], target: u64) -> Option<(u64, u64)> {
    let (mut lo, mut hi) = (0, sorted.len().checked_sub(1)?);
    while lo < hi {
        let sum = sorted[lo] + sorted[hi];
        match sum.cmp(&target) {
            std::cmp::Ordering::Equal => return Some((sorted[lo], sorted[hi])),
            std::cmp::Ordering::Less => lo += 1,
            std::cmp::Ordering::Greater => hi -= 1,
        }
    }
    None
}

impl PartSolver<1> for Solver {
    fn solve(entries: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (a, b) = pair_summing_to(entries, TARGET)
            .ok_or_else(|| SolveError::failed("no two entries sum to 2020"))?;
        Ok((a * b).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(entries: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        for (i, &first) in entries.iter().enumerate() {
            let Some(rest) = TARGET.checked_sub(first) else {
                break;
            };
            if let Some((a, b)) = pair_summing_to(&entries[i + 1..], rest) {
                return Ok((first * a * b).to_string());
            }
        }
        Err(SolveError::failed("no three entries sum to 2020"))
    }
}
