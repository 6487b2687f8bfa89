//! Rambunctious Recitation

use crate::utils::text::parse_num;
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 15, tags = ["simulation", "slow"])]
pub struct Solver;

impl AocParser for Solver {
    /// Starting numbers
    type SharedData<'a> = Vec<u32>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let start = input
            .trim()
            .split(',')
            .map(parse_num)
            .collect::<Result<Vec<u32>, _>>()?;
        if start.is_empty() {
            return Err(ParseError::missing("no starting numbers"));
        }
        Ok(start)
    }
}

/// Number spoken on turn `turns` (1-based)
fn spoken(start: &[u32], turns: u32) -> u32 {
    if (turns as usize) <= start.len() {
        return start[turns as usize - 1];
    }

    // turn on which each number was last spoken, 0 for never
    let size = start.iter().map(|&n| n as usize + 1).max().unwrap_or(0).max(turns as usize);
    let mut last_seen = vec![0u32; size];
    for (turn, &n) in (1..).zip(&start[..start.len() - 1]) {
        last_seen[n as usize] = turn;
    }

    let mut current = start[start.len() - 1];
    for turn in start.len() as u32..turns {
        let seen = std::mem::replace(&mut last_seen[current as usize], turn);
        current = if seen == 0 { 0 } else { turn - seen };
    }
    current
}

impl PartSolver<1> for Solver {
    fn solve(start: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(spoken(start, 2020).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(start: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        tracing::debug!("playing 30 million turns");
        Ok(spoken(start, 30_000_000).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solve;

    #[test]
    fn sample() {
        assert_eq!(solve::<Solver>("0,3,6\n", 1), "436");
        assert_eq!(solve::<Solver>("1,3,2\n", 1), "1");
        assert_eq!(solve::<Solver>("2,1,3\n", 1), "10");
        assert_eq!(solve::<Solver>("3,1,2\n", 1), "1836");
    }

    #[test]
    fn thirty_millionth_turn() {
        assert_eq!(solve::<Solver>("0,3,6\n", 2), "175594");
    }

    #[test]
    fn first_turns() {
        let sequence: Vec<u32> = (1..=10).map(|t| spoken(&[0, 3, 6], t)).collect();
        assert_eq!(sequence, vec![0, 3, 6, 0, 3, 3, 1, 0, 4, 0]);
    }

    #[test]
    fn empty_start_is_rejected() {
        assert!(Solver::parse("\n").is_err());
    }
}
