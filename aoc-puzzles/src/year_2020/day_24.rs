//! Lobby Layout
//!
//! Hex tiles use axial coordinates `(q, r)`: east is `q + 1`, south-east is
//! `r + 1`.

use crate::utils::text::lines;
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use std::collections::{HashMap, HashSet};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 24, tags = ["simulation"])]
pub struct Solver;

type Hex = (i32, i32);

const NEIGHBOURS: [Hex; 6] = [(1, 0), (-1, 0), (0, 1), (-1, 1), (0, -1), (1, -1)];

/// `esenee` to the tile it leads to from the reference tile
fn walk(line: &str) -> Result<Hex, ParseError> {
    let mut bytes = line.bytes();
    let (mut q, mut r) = (0, 0);
    while let Some(b) = bytes.next() {
        let (dq, dr) = match b {
            b'e' => (1, 0),
            b'w' => (-1, 0),
            b'n' | b's' => match (b, bytes.next()) {
                (b's', Some(b'e')) => (0, 1),
                (b's', Some(b'w')) => (-1, 1),
                (b'n', Some(b'w')) => (0, -1),
                (b'n', Some(b'e')) => (1, -1),
                _ => return Err(ParseError::invalid(format!("bad direction in {line:?}"))),
            },
            _ => return Err(ParseError::invalid(format!("bad direction in {line:?}"))),
        };
        q += dq;
        r += dr;
    }
    Ok((q, r))
}

impl AocParser for Solver {
    /// Tiles flipped an odd number of times
    type SharedData<'a> = HashSet<Hex>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let mut black = HashSet::new();
        for line in lines(input) {
            let tile = walk(line)?;
            if !black.remove(&tile) {
                black.insert(tile);
            }
        }
        Ok(black)
    }
}

/// One day of the exhibit: black tiles with no or more than two black
/// neighbours flip to white, white tiles with exactly two flip to black
fn next_day(black: &HashSet<Hex>) -> HashSet<Hex> {
    let mut counts: HashMap<Hex, u8> = HashMap::new();
    for &(q, r) in black {
        for (dq, dr) in NEIGHBOURS {
            *counts.entry((q + dq, r + dr)).or_default() += 1;
        }
    }
    counts
        .into_iter()
        .filter(|&(tile, n)| n == 2 || (n == 1 && black.contains(&tile)))
        .map(|(tile, _)| tile)
        .collect()
}

impl PartSolver<1> for Solver {
    fn solve(black: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(black.len().to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(black: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let floor = (0..100).fold(black.clone(), |floor, _| next_day(&floor));
        Ok(floor.len().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solve;

    #[test]
    fn walks() {
        assert_eq!(walk("nwwswee").unwrap(), (0, 0));
        assert_eq!(walk("esew").unwrap(), (0, 1));
        assert!(walk("ex").is_err());
        assert!(walk("en").is_err());
    }

    #[test]
    fn flipping_twice_restores_white() {
        assert_eq!(solve::<Solver>("esew\nnwwswee\nnwwswee\n", 1), "1");
    }

    #[test]
    fn adjacent_pair_grows() {
        let black = Solver::parse("e\nee\n").unwrap();
        let after = next_day(&black);
        let expected: HashSet<Hex> = [(1, 0), (2, 0), (2, -1), (1, 1)].into_iter().collect();
        assert_eq!(after, expected);
    }

    #[test]
    fn lone_tile_dies() {
        assert_eq!(solve::<Solver>("e\n", 2), "0");
    }
}
