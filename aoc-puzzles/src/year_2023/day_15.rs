//! Lens Library

use crate::utils::text::parse_num;
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 15, tags = ["hashing"])]
pub struct Solver;

impl AocParser for Solver {
    /// Comma separated steps; line breaks are ignored
    type SharedData<'a> = Vec<String>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let joined: String = input.chars().filter(|c| !c.is_whitespace()).collect();
        if joined.is_empty() {
            return Err(ParseError::missing("initialization sequence"));
        }
        Ok(joined.split(',').map(str::to_owned).collect())
    }
}

/// Holiday ASCII String Helper
fn hash(s: &str) -> usize {
    s.bytes()
        .fold(0, |acc, b| (acc + usize::from(b)) * 17 % 256)
}

enum Step<'a> {
    Remove(&'a str),
    Insert(&'a str, u8),
}

fn step(text: &str) -> Result<Step<'_>, ParseError> {
    if let Some(label) = text.strip_suffix('-') {
        return Ok(Step::Remove(label));
    }
    let (label, focal) = text
        .split_once('=')
        .ok_or_else(|| ParseError::invalid(format!("bad step {text:?}")))?;
    Ok(Step::Insert(label, parse_num(focal)?))
}

impl PartSolver<1> for Solver {
    fn solve(steps: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(steps.iter().map(|s| hash(s)).sum::<usize>().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(steps: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut boxes: Vec<Vec<(&str, u8)>> = vec![Vec::new(); 256];
        for text in steps.iter() {
            match step(text)? {
                Step::Remove(label) => boxes[hash(label)].retain(|&(l, _)| l != label),
                Step::Insert(label, focal) => {
                    let lenses = &mut boxes[hash(label)];
                    match lenses.iter_mut().find(|(l, _)| *l == label) {
                        Some(lens) => lens.1 = focal,
                        None => lenses.push((label, focal)),
                    }
                }
            }
        }
        let power: usize = boxes
            .iter()
            .zip(1..)
            .flat_map(|(lenses, b)| {
                lenses
                    .iter()
                    .zip(1..)
                    .map(move |(&(_, focal), slot)| b * slot * usize::from(focal))
            })
            .sum();
        Ok(power.to_string())
    }
}
