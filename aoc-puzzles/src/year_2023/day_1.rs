//! Trebuchet?!

use crate::utils::text::lines;
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 1, tags = ["string"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<&'a str>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Ok(lines(input).collect())
    }
}

const WORDS: [&str; 9] = [
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

/// Digit starting at byte `i`, if any
fn digit_at(line: &str, i: usize, spelled: bool) -> Option<u32> {
    let rest = &line.as_bytes()[i..];
    match rest.first() {
        Some(b) if b.is_ascii_digit() => Some(u32::from(b - b'0')),
        _ if spelled => WORDS
            .iter()
            .zip(1..)
            .find_map(|(word, value)| rest.starts_with(word.as_bytes()).then_some(value)),
        _ => None,
    }
}

/// First and last digit of `line` as a two-digit number. Spelled digits may
/// overlap, as in `eightwo`.
fn calibration(line: &str, spelled: bool) -> Result<u32, SolveError> {
    let first = (0..line.len()).find_map(|i| digit_at(line, i, spelled));
    let last = (0..line.len()).rev().find_map(|i| digit_at(line, i, spelled));
    match (first, last) {
        (Some(first), Some(last)) => Ok(first * 10 + last),
        _ => Err(SolveError::failed(format!("no digit in {line:?}"))),
    }
}

fn total(lines: &[&str], spelled: bool) -> Result<String, SolveError> {
    let mut sum = 0;
    for line in lines {
        sum += calibration(line, spelled)?;
    }
    Ok(sum.to_string())
}

impl PartSolver<1> for Solver {
    fn solve(lines: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        total(lines, false)
    }
}

impl PartSolver<2> for Solver {
    fn solve(lines: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        total(lines, true)
    }
}
