//! Encoding Error

use crate::utils::text::{lines, parse_num};
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 9, tags = ["search"])]
pub struct Solver;

const PREAMBLE: usize = 25;

pub struct Data {
    numbers: Vec<u64>,
    /// Part 1 answer, kept for part 2 when both run on one instance
    invalid: Option<u64>,
}

impl AocParser for Solver {
    type SharedData<'a> = Data;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(Data {
            numbers: lines(input).map(parse_num).collect::<Result<_, _>>()?,
            invalid: None,
        })
    }
}

/// First number that is not the sum of two distinct numbers among the
/// `preamble` before it
fn first_invalid(numbers: &[u64], preamble: usize) -> Option<u64> {
    numbers.windows(preamble + 1).find_map(|window| {
        let (candidates, &[target]) = window.split_at(preamble) else {
            return None;
        };
        let valid = candidates.iter().enumerate().any(|(i, &a)| {
            candidates[i + 1..]
                .iter()
                .any(|&b| a != b && a + b == target)
        });
        (!valid).then_some(target)
    })
}

/// Contiguous run of at least two numbers summing to `target`
fn run_summing_to(numbers: &[u64], target: u64) -> Option<&[u64]> {
    let (mut start, mut sum) = (0, 0);
    for end in 0..numbers.len() {
        sum += numbers[end];
        while sum > target && start < end {
            sum -= numbers[start];
            start += 1;
        }
        if sum == target && end > start {
            return Some(&numbers[start..=end]);
        }
    }
    None
}

fn invalid(data: &mut Data, preamble: usize) -> Result<u64, SolveError> {
    if let Some(found) = data.invalid {
        return Ok(found);
    }
    let found = first_invalid(&data.numbers, preamble)
        .ok_or_else(|| SolveError::failed("every number is a sum of two in its preamble"))?;
    data.invalid = Some(found);
    Ok(found)
}

fn weakness(data: &mut Data, preamble: usize) -> Result<u64, SolveError> {
    let target = invalid(data, preamble)?;
    let run = run_summing_to(&data.numbers, target)
        .ok_or_else(|| SolveError::failed(format!("no contiguous run sums to {target}")))?;
    let min = run.iter().min();
    let max = run.iter().max();
    match (min, max) {
        (Some(min), Some(max)) => Ok(min + max),
        _ => Err(SolveError::failed("empty run")),
    }
}

impl PartSolver<1> for Solver {
    fn solve(data: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        invalid(data, PREAMBLE).map(|n| n.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(data: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        weakness(data, PREAMBLE).map(|n| n.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{solve, try_solve};

    const SAMPLE: &str = "\
35
20
15
25
47
40
62
55
65
95
102
117
150
182
127
219
299
277
309
576
";

    #[test]
    fn sample_with_short_preamble() {
        let mut data = Solver::parse(SAMPLE).unwrap();
        assert_eq!(invalid(&mut data, 5).unwrap(), 127);
        assert_eq!(data.invalid, Some(127));
        assert_eq!(weakness(&mut data, 5).unwrap(), 62);
    }

    #[test]
    fn weakness_without_cached_invalid() {
        let mut data = Solver::parse(SAMPLE).unwrap();
        assert_eq!(weakness(&mut data, 5).unwrap(), 62);
    }

    #[test]
    fn full_preamble() {
        let mut input: String = (1..=25).map(|n| format!("{n}\n")).collect();
        input.push_str("26\n49\n100\n");
        assert_eq!(solve::<Solver>(&input, 1), "100");
        // 9 + 10 + ... + 16
        assert_eq!(solve::<Solver>(&input, 2), "25");
        // 26 is still a sum within the first 25
        assert!(try_solve::<Solver>(&input[..input.len() - 7], 1).is_err());
    }

    #[test]
    fn pair_must_be_distinct() {
        assert_eq!(first_invalid(&[1, 2, 3, 4, 5, 10], 5), Some(10));
        assert_eq!(first_invalid(&[1, 2, 3, 4, 5, 9], 5), None);
    }
}
