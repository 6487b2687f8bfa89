//! Mirage Maintenance

use crate::utils::text::{lines, numbers};
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 9, tags = ["math"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<Vec<i64>>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        lines(input).map(numbers::<i64>).collect()
    }
}

/// Next value of `history`: sum of the last entry of every difference row
fn extrapolate(history: &[i64]) -> i64 {
    let mut row = history.to_vec();
    let mut next = 0;
    while row.iter().any(|&v| v != 0) {
        next += row[row.len() - 1];
        row = row.windows(2).map(|w| w[1] - w[0]).collect();
    }
    next
}

impl PartSolver<1> for Solver {
    fn solve(histories: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(histories.iter().map(|h| extrapolate(h)).sum::<i64>().to_string())
    }
}

impl PartSolver<2> for Solver {
    /// Backwards is forwards on the reversed history
    fn solve(histories: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum: i64 = histories
            .iter()
            .map(|h| {
                let reversed: Vec<i64> = h.iter().rev().copied().collect();
                extrapolate(&reversed)
            })
            .sum();
        Ok(sum.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solve;

    const SAMPLE: &str = "\
0 3 6 9 12 15
1 3 6 10 15 21
10 13 16 21 30 45
";

    #[test]
    fn sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "114");
        assert_eq!(solve::<Solver>(SAMPLE, 2), "2");
    }

    #[test]
    fn constant_and_empty() {
        assert_eq!(extrapolate(&[4, 4, 4]), 4);
        assert_eq!(extrapolate(&[]), 0);
        assert_eq!(extrapolate(&[-3, -1, 1]), 3);
    }
}
