//! Password Philosophy

use crate::utils::text::{lines, parse_num, split_once_or};
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 2, tags = ["parsing"])]
pub struct Solver;

pub struct Entry<'a> {
    low: usize,
    high: usize,
    letter: u8,
    password: &'a str,
}

impl<'a> Entry<'a> {
    /// `1-3 a: abcde`
    fn parse(line: &'a str) -> Result<Self, ParseError> {
        let (policy, password) = split_once_or(line, ": ")?;
        let (range, letter) = split_once_or(policy, " ")?;
        let (low, high) = split_once_or(range, "-")?;
        let &[letter] = letter.as_bytes() else {
            return Err(ParseError::invalid(format!("expected one letter in {line:?}")));
        };
        Ok(Self {
            low: parse_num(low)?,
            high: parse_num(high)?,
            letter,
            password,
        })
    }

    fn count_in_range(&self) -> bool {
        let count = self.password.bytes().filter(|&b| b == self.letter).count();
        (self.low..=self.high).contains(&count)
    }

    /// Exactly one of the 1-based positions holds the letter
    fn one_position_matches(&self) -> bool {
        let at = |pos: usize| {
            pos.checked_sub(1)
                .and_then(|i| self.password.as_bytes().get(i))
                .is_some_and(|&b| b == self.letter)
        };
        at(self.low) != at(self.high)
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Entry<'a>>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        lines(input).map(Entry::parse).collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(entries: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(entries.iter().filter(|e| e.count_in_range()).count().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(entries: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(entries
            .iter()
            .filter(|e| e.one_position_matches())
            .count()
            .to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solve;

    const SAMPLE: &str = "\
1-3 a: abcde
1-3 b: cdefg
2-9 c: ccccccccc
";

    #[test]
    fn sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "2");
        assert_eq!(solve::<Solver>(SAMPLE, 2), "1");
    }

    #[test]
    fn crlf_input() {
        assert_eq!(solve::<Solver>(&SAMPLE.replace('\n', "\r\n"), 1), "2");
    }

    #[test]
    fn malformed_policy() {
        assert!(Solver::parse("1-3 ab: abc\n").is_err());
        assert!(Solver::parse("1 a: abc\n").is_err());
    }
}
