//! Step Counter

use crate::utils::grid::{Grid, Pos};
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use std::collections::{HashMap, VecDeque};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 21, tags = ["grid", "bfs", "math"])]
pub struct Solver;

pub struct Garden {
    /// `true` for rocks
    rocks: Grid<bool>,
    start: Pos,
}

impl AocParser for Solver {
    type SharedData<'a> = Garden;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let map = Grid::from_chars(input)?;
        let start = map
            .find(|&c| c == 'S')
            .ok_or_else(|| ParseError::missing("start tile S"))?;
        let rocks = Grid::parse(input, |c| match c {
            '#' => Ok(true),
            '.' | 'S' => Ok(false),
            _ => Err(ParseError::invalid(format!("unexpected {c:?}"))),
        })?;
        Ok(Garden { rocks, start })
    }
}

/// Plots the elf can stand on after exactly `steps` steps. A plot reached
/// in fewer steps of the same parity counts, since the elf can step away
/// and back. With `infinite` the map tiles the plane.
fn reachable(garden: &Garden, steps: u64, infinite: bool) -> u64 {
    let open = |p: Pos| match garden.rocks.get(p) {
        Some(&rock) => !rock,
        None => infinite && !*garden.rocks.get_wrapped(p),
    };
    let mut dist: HashMap<Pos, u64> = HashMap::from([(garden.start, 0)]);
    let mut queue = VecDeque::from([garden.start]);
    while let Some(pos) = queue.pop_front() {
        let d = dist[&pos];
        if d == steps {
            continue;
        }
        for next in pos.neighbours4() {
            if open(next) && !dist.contains_key(&next) {
                dist.insert(next, d + 1);
                queue.push_back(next);
            }
        }
    }
    dist.values().filter(|&&d| d % 2 == steps % 2).count() as u64
}

impl PartSolver<1> for Solver {
    fn solve(garden: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(reachable(garden, 64, false).to_string())
    }
}

const FAR_STEPS: u64 = 26_501_365;

impl PartSolver<2> for Solver {
    /// The count grows quadratically in the number of whole map widths walked
    /// when the start sits centred in a square map, so three samples at
    /// `FAR_STEPS mod size + k * size` fix the curve.
    fn solve(garden: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let size = garden.rocks.width() as u64;
        let centre = (size / 2) as i64;
        if garden.rocks.height() as u64 != size || garden.start != Pos::new(centre, centre) {
            return Err(SolveError::failed("expected a square garden with S at its centre"));
        }
        let rem = FAR_STEPS % size;
        let [a, b, c] = [0, 1, 2].map(|k| reachable(garden, rem + k * size, true) as i128);
        let n = ((FAR_STEPS - rem) / size) as i128;
        tracing::debug!(a, b, c, n, "extrapolating plot counts");
        let plots = a + n * (b - a) + n * (n - 1) / 2 * (c - 2 * b + a);
        Ok(plots.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{solve, try_solve};

    const SAMPLE: &str = "\
...........
.....###.#.
.###.##..#.
..#.#...#..
....#.#....
.##..S####.
.##..#...#.
.......##..
.##.#.####.
.##..##.##.
...........
";

    #[test]
    fn sample() {
        let garden = Solver::parse(SAMPLE).unwrap();
        assert_eq!(reachable(&garden, 6, false), 16);
        assert_eq!(reachable(&garden, 10, true), 50);
        assert_eq!(reachable(&garden, 50, true), 1594);
    }

    #[test]
    fn open_field() {
        let input = ".....\n.....\n..S..\n.....\n.....\n";
        assert_eq!(solve::<Solver>(input, 1), "13");
        assert_eq!(solve::<Solver>(input, 2), (26_501_366u64 * 26_501_366).to_string());
    }

    #[test]
    fn off_centre_start() {
        assert!(try_solve::<Solver>(".S.\n...\n...\n", 2).is_err());
        assert!(try_solve::<Solver>("...\n.S.\n", 2).is_err());
    }
}
