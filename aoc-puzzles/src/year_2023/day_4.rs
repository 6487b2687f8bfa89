//! Scratchcards

use crate::utils::text::{lines, numbers, split_once_or};
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use std::collections::HashSet;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 4, tags = ["counting"])]
pub struct Solver;

/// `Card 1: 41 48 | 83 86 6` to its number of matches
fn matches(line: &str) -> Result<usize, ParseError> {
    let (_, numbers_part) = split_once_or(line, ":")?;
    let (winning, have) = split_once_or(numbers_part, "|")?;
    let winning: HashSet<u32> = numbers::<u32>(winning)?.into_iter().collect();
    Ok(numbers::<u32>(have)?
        .iter()
        .filter(|&n| winning.contains(n))
        .count())
}

impl AocParser for Solver {
    /// Matching numbers per card, in card order
    type SharedData<'a> = Vec<usize>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        lines(input).map(matches).collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(cards: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let points: u64 = cards
            .iter()
            .filter(|&&m| m > 0)
            .map(|&m| 1u64 << (m - 1))
            .sum();
        Ok(points.to_string())
    }
}

impl PartSolver<2> for Solver {
    /// Each card wins copies of the next `matches` cards, never past the end
    fn solve(cards: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut copies = vec![1u64; cards.len()];
        for (i, &m) in cards.iter().enumerate() {
            let won = copies[i];
            for count in copies.iter_mut().skip(i + 1).take(m) {
                *count += won;
            }
        }
        Ok(copies.iter().sum::<u64>().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solve;

    const SAMPLE: &str = "\
Card 1: 41 48 83 86 17 | 83 86  6 31 17  9 48 53
Card 2: 13 32 20 16 61 | 61 30 68 82 17 32 24 19
Card 3:  1 21 53 59 44 | 69 82 63 72 16 21 14  1
Card 4: 41 92 73 84 69 | 59 84 76 51 58  5 54 83
Card 5: 87 83 26 28 32 | 88 30 70 12 93 22 82 36
Card 6: 31 18 13 56 72 | 74 77 10 23 35 67 36 11
";

    #[test]
    fn sample() {
        assert_eq!(Solver::parse(SAMPLE).unwrap(), vec![4, 2, 2, 1, 0, 0]);
        assert_eq!(solve::<Solver>(SAMPLE, 1), "13");
        assert_eq!(solve::<Solver>(SAMPLE, 2), "30");
    }

    #[test]
    fn copies_stop_at_last_card() {
        assert_eq!(solve::<Solver>("Card 1: 1 2 | 1 2\n", 2), "1");
    }
}
