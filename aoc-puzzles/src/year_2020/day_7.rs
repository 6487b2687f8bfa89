//! Handy Haversacks

use crate::utils::dp::{DpCache, DpProblem};
use crate::utils::text::{lines, parse_num, split_once_or};
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use std::collections::{HashMap, HashSet};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 7, tags = ["graph"])]
pub struct Solver;

const MINE: &str = "shiny gold";

/// Colour to its direct contents
type Rules<'a> = HashMap<&'a str, Vec<(u64, &'a str)>>;

impl AocParser for Solver {
    type SharedData<'a> = Rules<'a>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        lines(input).map(rule).collect()
    }
}

/// `light red bags contain 1 bright white bag, 2 muted yellow bags.`
fn rule(line: &str) -> Result<(&str, Vec<(u64, &str)>), ParseError> {
    let (outer, contents) = split_once_or(line, " bags contain ")?;
    let contents = contents.trim_end_matches('.');
    if contents == "no other bags" {
        return Ok((outer, Vec::new()));
    }

    let inner = contents.split(", ").map(content).collect::<Result<_, ParseError>>()?;
    Ok((outer, inner))
}

/// `2 muted yellow bags`
fn content(item: &str) -> Result<(u64, &str), ParseError> {
    let (count, rest) = split_once_or(item, " ")?;
    let colour = rest
        .strip_suffix(" bags")
        .or_else(|| rest.strip_suffix(" bag"))
        .ok_or_else(|| ParseError::invalid(format!("expected bag(s) in {item:?}")))?;
    Ok((parse_num(count)?, colour))
}

/// Bags nested inside one bag of a colour, `None` once past `u64`
struct Nested<'r, 'a> {
    rules: &'r Rules<'a>,
}

impl<'a> DpProblem<&'a str, Option<u64>> for Nested<'_, 'a> {
    fn deps(&self, colour: &&'a str) -> Vec<&'a str> {
        self.rules
            .get(colour)
            .map(|inner| inner.iter().map(|&(_, c)| c).collect())
            .unwrap_or_default()
    }

    fn compute(&self, colour: &&'a str, deps: Vec<Option<u64>>) -> Option<u64> {
        let inner = self.rules.get(colour).map_or(&[][..], Vec::as_slice);
        inner.iter().zip(deps).try_fold(0u64, |total, (&(count, _), nested)| {
            let with_self = nested?.checked_add(1)?;
            total.checked_add(count.checked_mul(with_self)?)
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(rules: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut holders: HashMap<&str, Vec<&str>> = HashMap::new();
        for (&outer, inner) in rules.iter() {
            for &(_, colour) in inner {
                holders.entry(colour).or_default().push(outer);
            }
        }

        let mut seen = HashSet::new();
        let mut stack = vec![MINE];
        while let Some(colour) = stack.pop() {
            for &outer in holders.get(colour).into_iter().flatten() {
                if seen.insert(outer) {
                    stack.push(outer);
                }
            }
        }
        Ok(seen.len().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(rules: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        if !rules.contains_key(MINE) {
            return Err(SolveError::failed("no rule for shiny gold bags"));
        }
        let cache = DpCache::new(Nested { rules: &*rules });
        cache
            .get(&MINE)?
            .map(|bags| bags.to_string())
            .ok_or_else(|| SolveError::failed("bag count does not fit in 64 bits"))
    }
}
