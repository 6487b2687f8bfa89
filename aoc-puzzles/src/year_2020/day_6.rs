//! Custom Customs

use crate::utils::text::paragraphs;
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 6, tags = ["parsing"])]
pub struct Solver;

/// One bit per question `a..=z`
type Answers = u32;

impl AocParser for Solver {
    /// Per group, each person's answers
    type SharedData<'a> = Vec<Vec<Answers>>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        paragraphs(input)
            .into_iter()
            .map(|group| group.into_iter().map(person).collect::<Result<Vec<_>, _>>())
            .collect()
    }
}

fn person(line: &str) -> Result<Answers, ParseError> {
    line.bytes().try_fold(0, |set, b| match b {
        b'a'..=b'z' => Ok(set | 1 << (b - b'a')),
        _ => Err(ParseError::invalid(format!("unexpected {:?} in {line:?}", b as char))),
    })
}

impl PartSolver<1> for Solver {
    fn solve(groups: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u32 = groups
            .iter()
            .map(|g| g.iter().fold(0, |acc, p| acc | p).count_ones())
            .sum();
        Ok(total.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(groups: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total: u32 = groups
            .iter()
            .map(|g| g.iter().fold(!0, |acc, p| acc & p).count_ones())
            .sum();
        Ok(total.to_string())
    }
}
