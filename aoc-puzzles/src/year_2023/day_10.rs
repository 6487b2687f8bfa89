//! Pipe Maze
//!
//! The loop is a simple lattice polygon: the shoelace formula gives its area
//! and Pick's theorem turns that into the count of enclosed tiles.

use crate::utils::grid::{Direction, Grid, Pos};
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 10, tags = ["grid", "geometry"])]
pub struct Solver;

/// The two sides a pipe opens to
fn openings(c: char) -> Option<[Direction; 2]> {
    use Direction::*;
    Some(match c {
        '|' => [North, South],
        '-' => [East, West],
        'L' => [North, East],
        'J' => [North, West],
        '7' => [South, West],
        'F' => [South, East],
        _ => return None,
    })
}

/// Follow the pipes leaving `start` heading `dir`; the tiles of the loop if
/// they lead back to `start`
fn trace(maze: &Grid<char>, start: Pos, mut dir: Direction) -> Option<Vec<Pos>> {
    let mut tiles = vec![start];
    let mut at = start.step(dir);
    while at != start {
        let [a, b] = openings(*maze.get(at)?)?;
        dir = if a == dir.reverse() {
            b
        } else if b == dir.reverse() {
            a
        } else {
            return None;
        };
        tiles.push(at);
        at = at.step(dir);
    }
    Some(tiles)
}

impl AocParser for Solver {
    /// Tiles of the main loop, in walking order from `S`
    type SharedData<'a> = Vec<Pos>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let maze = Grid::from_chars(input)?;
        let start = maze
            .find(|&c| c == 'S')
            .ok_or_else(|| ParseError::missing("start tile S"))?;
        Direction::ALL
            .into_iter()
            .find_map(|dir| trace(&maze, start, dir))
            .ok_or_else(|| ParseError::invalid("no loop through S"))
    }
}

impl PartSolver<1> for Solver {
    fn solve(tiles: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok((tiles.len() / 2).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(tiles: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let twice_area: i64 = tiles
            .iter()
            .zip(tiles.iter().cycle().skip(1))
            .map(|(a, b)| a.row * b.col - b.row * a.col)
            .sum();
        let interior = twice_area.abs() / 2 - tiles.len() as i64 / 2 + 1;
        Ok(interior.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solve;

    #[test]
    fn square_loop() {
        let input = "\
.....
.S-7.
.|.|.
.L-J.
.....
";
        assert_eq!(solve::<Solver>(input, 1), "4");
        assert_eq!(solve::<Solver>(input, 2), "1");
    }

    #[test]
    fn winding_loop() {
        let input = "\
..F7.
.FJ|.
SJ.L7
|F--J
LJ...
";
        assert_eq!(solve::<Solver>(input, 1), "8");
    }

    #[test]
    fn enclosed_tiles() {
        let input = "\
...........
.S-------7.
.|F-----7|.
.||.....||.
.||.....||.
.|L-7.F-J|.
.|..|.|..|.
.L--J.L--J.
...........
";
        assert_eq!(solve::<Solver>(input, 2), "4");
    }

    #[test]
    fn broken_loop() {
        assert!(Solver::parse(".S-.\n.|..\n").is_err());
        assert!(Solver::parse("...\n").is_err());
    }
}
