//! A Long Walk
//!
//! Corridors are compressed into weighted edges between junctions, then a
//! depth-first search tries every simple path with the visited set held in
//! a bitmask.

use crate::utils::grid::{Direction, Grid, Pos};
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use std::collections::HashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 23, tags = ["graph", "search", "slow"])]
pub struct Solver;

#[derive(Debug, Clone, Copy)]
struct Edge {
    to: usize,
    length: u32,
    /// Walkable without climbing a slope
    downhill: bool,
}

pub struct Trails {
    edges: Vec<Vec<Edge>>,
    start: usize,
    end: usize,
}

fn open(map: &Grid<char>, pos: Pos) -> bool {
    map.get(pos).is_some_and(|&c| c != '#')
}

/// Leaving a slope is only allowed in the direction it points
fn downhill(map: &Grid<char>, from: Pos, dir: Direction) -> bool {
    match map[from] {
        '.' => true,
        c => Direction::from_letter(c) == Some(dir),
    }
}

/// The single open cell in `row`
fn gap(map: &Grid<char>, row: usize, side: &str) -> Result<Pos, ParseError> {
    let cols: Vec<usize> = (0..map.width()).filter(|&c| map.row(row)[c] == '.').collect();
    match cols[..] {
        [col] => Ok(Pos::new(row as i64, col as i64)),
        _ => Err(ParseError::invalid(format!("expected one gap in the {side} row"))),
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Trails;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let map = Grid::parse(input, |c| match c {
            '#' | '.' | '^' | '>' | 'v' | '<' => Ok(c),
            _ => Err(ParseError::invalid(format!("unexpected {c:?}"))),
        })?;
        let start = gap(&map, 0, "top")?;
        let end = gap(&map, map.height() - 1, "bottom")?;

        let mut junctions = vec![start, end];
        junctions.extend(map.positions().filter(|&p| {
            open(&map, p) && p.neighbours4().filter(|&n| open(&map, n)).count() >= 3
        }));
        if junctions.len() > 64 {
            return Err(ParseError::invalid("more than 64 junctions"));
        }
        let index: HashMap<Pos, usize> = junctions.iter().enumerate().map(|(i, &p)| (p, i)).collect();

        let mut edges = vec![Vec::new(); junctions.len()];
        for (from, &origin) in junctions.iter().enumerate() {
            for dir in Direction::ALL {
                let (mut prev, mut at) = (origin, origin.step(dir));
                if !open(&map, at) {
                    continue;
                }
                let mut length = 1;
                let mut ok = downhill(&map, origin, dir);
                // corridor cells have exactly one way onward
                while !index.contains_key(&at) {
                    let Some(step) = Direction::ALL
                        .into_iter()
                        .find(|&d| at.step(d) != prev && open(&map, at.step(d)))
                    else {
                        break;
                    };
                    ok &= downhill(&map, at, step);
                    (prev, at) = (at, at.step(step));
                    length += 1;
                }
                if let Some(&to) = index.get(&at) {
                    edges[from].push(Edge {
                        to,
                        length,
                        downhill: ok,
                    });
                }
            }
        }
        Ok(Trails {
            edges,
            start: index[&start],
            end: index[&end],
        })
    }
}

impl Trails {
    /// Longest path to the end from `at`, avoiding junctions in `visited`
    fn longest(&self, at: usize, visited: u64, slopes: bool) -> Option<u32> {
        if at == self.end {
            return Some(0);
        }
        let usable = |e: &&Edge| visited & (1 << e.to) == 0 && (e.downhill || !slopes);
        // stepping past the last junction before the end strands the walk
        if let Some(last) = self.edges[at].iter().filter(usable).find(|e| e.to == self.end) {
            return Some(last.length);
        }
        self.edges[at]
            .iter()
            .filter(usable)
            .filter_map(|e| Some(e.length + self.longest(e.to, visited | 1 << e.to, slopes)?))
            .max()
    }

    fn hike(&self, slopes: bool) -> Result<String, SolveError> {
        self.longest(self.start, 1 << self.start, slopes)
            .map(|steps| steps.to_string())
            .ok_or_else(|| SolveError::failed("no path to the bottom row"))
    }
}

impl PartSolver<1> for Solver {
    fn solve(trails: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        trails.hike(true)
    }
}

impl PartSolver<2> for Solver {
    /// Slopes are plain paths
    fn solve(trails: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        trails.hike(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{solve, try_solve};

    const SAMPLE: &str = "\
#.#####################
#.......#########...###
#######.#########.#.###
###.....#.>.>.###.#.###
###v#####.#v#.###.#.###
###.>...#.#.#.....#...#
###v###.#.#.#########.#
###...#.#.#.......#...#
#####.#.#.#######.#.###
#.....#.#.#.......#...#
#.#####.#.#.#########v#
#.#...#...#...###...>.#
#.#.#v#######v###.###v#
#...#.>.#...>.>.#.###.#
#####v#.#.###v#.#.###.#
#.....#...#...#.#.#...#
#.#########.###.#.#.###
#...###...#...#...#.###
###.###.#.###v#####v###
#...#...#.#.>.>.#.>.###
#.###.###.#.###.#.#v###
#.....###...###...#...#
#####################.#
";

    #[test]
    fn sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "94");
        assert_eq!(solve::<Solver>(SAMPLE, 2), "154");
    }

    #[test]
    fn slope_blocks_the_long_way() {
        let input = "\
#.#######
#.......#
#.#####.#
#.#.<.#.#
#.#.#.#.#
#...#...#
#######.#
";
        assert_eq!(solve::<Solver>(input, 1), "12");
        assert_eq!(solve::<Solver>(input, 2), "16");
    }

    #[test]
    fn walled_off() {
        assert!(try_solve::<Solver>("#.#\n###\n#.#\n", 2).is_err());
        assert!(Solver::parse("#..#\n#..#\n#.##\n").is_err());
    }
}
