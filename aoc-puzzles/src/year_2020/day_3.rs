//! Toboggan Trajectory

use crate::utils::grid::{Grid, Pos};
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 3, tags = ["grid"])]
pub struct Solver;

impl AocParser for Solver {
    /// `true` where a tree stands
    type SharedData<'a> = Grid<bool>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Grid::parse(input, |c| match c {
            '#' => Ok(true),
            '.' => Ok(false),
            other => Err(ParseError::invalid(format!("unexpected {other:?} in map"))),
        })
    }
}

/// Trees hit going `right` and `down` per step from the top-left corner.
/// The map repeats to the right.
fn trees_on_slope(map: &Grid<bool>, right: i64, down: i64) -> usize {
    (0..)
        .map(|step| Pos::new(step * down, step * right))
        .take_while(|pos| pos.row < map.height() as i64)
        .filter(|&pos| *map.get_wrapped(pos))
        .count()
}

impl PartSolver<1> for Solver {
    fn solve(map: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(trees_on_slope(map, 3, 1).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(map: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let product: usize = [(1, 1), (3, 1), (5, 1), (7, 1), (1, 2)]
            .into_iter()
            .map(|(right, down)| trees_on_slope(map, right, down))
            .product();
        Ok(product.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solve;

    const SAMPLE: &str = "\
..##.......
#...#...#..
.#....#..#.
..#.#...#.#
.#...##..#.
..#.##.....
.#.#.#....#
.#........#
#.##...#...
#...##....#
.#..#...#.#
";

    #[test]
    fn sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "7");
        assert_eq!(solve::<Solver>(SAMPLE, 2), "336");
    }

    #[test]
    fn individual_slopes() {
        let map = Solver::parse(SAMPLE).unwrap();
        let hits: Vec<_> = [(1, 1), (3, 1), (5, 1), (7, 1), (1, 2)]
            .into_iter()
            .map(|(r, d)| trees_on_slope(&map, r, d))
            .collect();
        assert_eq!(hits, vec![2, 7, 3, 4, 2]);
    }
}
