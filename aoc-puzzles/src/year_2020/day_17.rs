//! Conway Cubes

use crate::utils::grid::Grid;
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use std::collections::{HashMap, HashSet};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 17, tags = ["simulation"])]
pub struct Solver;

const CYCLES: usize = 6;

type Cube = [i32; 4];

impl AocParser for Solver {
    /// Active cubes of the starting slice
    type SharedData<'a> = HashSet<Cube>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let slice = Grid::parse(input, |c| match c {
            '#' => Ok(true),
            '.' => Ok(false),
            other => Err(ParseError::invalid(format!("unexpected {other:?}"))),
        })?;
        Ok(slice
            .iter()
            .filter(|&(_, &active)| active)
            .map(|(pos, _)| [pos.col as i32, pos.row as i32, 0, 0])
            .collect())
    }
}

/// Offsets to every neighbour in the first `dims` dimensions
fn offsets(dims: usize) -> Vec<Cube> {
    let mut all = vec![[0; 4]];
    for axis in 0..dims {
        all = all
            .into_iter()
            .flat_map(|cube| {
                (-1..=1).map(move |d| {
                    let mut moved = cube;
                    moved[axis] = d;
                    moved
                })
            })
            .collect();
    }
    all.retain(|cube| cube != &[0; 4]);
    all
}

fn simulate(start: &HashSet<Cube>, dims: usize) -> usize {
    let offsets = offsets(dims);
    let mut active = start.clone();
    for _ in 0..CYCLES {
        let mut counts: HashMap<Cube, u8> = HashMap::new();
        for cube in &active {
            for offset in &offsets {
                let neighbour = std::array::from_fn(|i| cube[i] + offset[i]);
                *counts.entry(neighbour).or_default() += 1;
            }
        }
        active = counts
            .into_iter()
            .filter(|&(cube, n)| n == 3 || (n == 2 && active.contains(&cube)))
            .map(|(cube, _)| cube)
            .collect();
    }
    active.len()
}

impl PartSolver<1> for Solver {
    fn solve(start: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(simulate(start, 3).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(start: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(simulate(start, 4).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solve;

    const SAMPLE: &str = ".#.\n..#\n###\n";

    #[test]
    fn sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "112");
        assert_eq!(solve::<Solver>(SAMPLE, 2), "848");
    }

    #[test]
    fn neighbour_counts() {
        assert_eq!(offsets(3).len(), 26);
        assert_eq!(offsets(4).len(), 80);
    }
}
