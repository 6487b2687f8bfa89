//! Haunted Wasteland

use crate::utils::math::lcm;
use crate::utils::text::{lines, split_once_or};
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use std::collections::HashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 8, tags = ["graph", "math"])]
pub struct Solver;

pub struct Network<'a> {
    /// `true` for right
    turns: Vec<bool>,
    names: Vec<&'a str>,
    /// Left and right successor per node
    links: Vec<[usize; 2]>,
}

impl AocParser for Solver {
    type SharedData<'a> = Network<'a>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let mut rows = lines(input);
        let turns = rows
            .next()
            .ok_or_else(|| ParseError::missing("instructions"))?
            .chars()
            .map(|c| match c {
                'L' => Ok(false),
                'R' => Ok(true),
                _ => Err(ParseError::invalid(format!("unknown turn {c:?}"))),
            })
            .collect::<Result<Vec<_>, _>>()?;
        if turns.is_empty() {
            return Err(ParseError::missing("instructions"));
        }

        let mut nodes = Vec::new();
        for row in rows {
            let (name, pair) = split_once_or(row, " = ")?;
            let (left, right) = pair
                .strip_prefix('(')
                .and_then(|p| p.strip_suffix(')'))
                .and_then(|p| p.split_once(", "))
                .ok_or_else(|| ParseError::invalid(format!("bad node {row:?}")))?;
            nodes.push((name, left, right));
        }

        let index: HashMap<&str, usize> = nodes.iter().enumerate().map(|(i, n)| (n.0, i)).collect();
        let lookup = |name: &str| {
            index
                .get(name)
                .copied()
                .ok_or_else(|| ParseError::invalid(format!("undefined node {name:?}")))
        };
        let mut links = Vec::with_capacity(nodes.len());
        for &(_, left, right) in &nodes {
            links.push([lookup(left)?, lookup(right)?]);
        }
        Ok(Network {
            turns,
            names: nodes.iter().map(|n| n.0).collect(),
            links,
        })
    }
}

impl Network<'_> {
    fn find(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|&n| n == name)
    }

    /// Steps from `start` until `done` holds. A walk longer than every
    /// (node, instruction) state has looped and never finishes.
    fn steps(&self, start: usize, done: impl Fn(&str) -> bool) -> Result<u64, SolveError> {
        let limit = self.names.len() * self.turns.len();
        let mut at = start;
        for (step, &right) in self.turns.iter().cycle().enumerate().take(limit + 1) {
            if done(self.names[at]) {
                return Ok(step as u64);
            }
            at = self.links[at][usize::from(right)];
        }
        Err(SolveError::failed(format!(
            "{} never reaches its goal",
            self.names[start]
        )))
    }
}

impl PartSolver<1> for Solver {
    fn solve(network: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let start = network
            .find("AAA")
            .ok_or_else(|| SolveError::failed("no node AAA"))?;
        Ok(network.steps(start, |n| n == "ZZZ")?.to_string())
    }
}

impl PartSolver<2> for Solver {
    /// Assumes each ghost's first arrival repeats with the same period, which
    /// holds for generated inputs
    fn solve(network: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut total = 1;
        let mut ghosts = 0;
        for (i, name) in network.names.iter().enumerate() {
            if name.ends_with('A') {
                total = lcm(total, network.steps(i, |n| n.ends_with('Z'))?);
                ghosts += 1;
            }
        }
        if ghosts == 0 {
            return Err(SolveError::failed("no starting nodes"));
        }
        Ok(total.to_string())
    }
}
