//! Cosmic Expansion

use crate::utils::grid::Grid;
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 11, tags = ["grid"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Grid<bool>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Grid::parse(input, |c| match c {
            '#' => Ok(true),
            '.' => Ok(false),
            _ => Err(ParseError::invalid(format!("unexpected {c:?}"))),
        })
    }
}

/// Sum over pairs of `|a - b|` along one axis, where every empty line counts
/// `factor` times. `counts[i]` is the number of galaxies on line `i`.
fn axis_distance(counts: &[u64], factor: u64) -> u64 {
    let (mut total, mut seen, mut coord_sum, mut coord) = (0, 0, 0, 0);
    for &n in counts {
        // each new galaxy is `coord - c` from every earlier one at `c`
        total += n * (seen * coord - coord_sum);
        seen += n;
        coord_sum += n * coord;
        coord += if n == 0 { factor } else { 1 };
    }
    total
}

fn distances(image: &Grid<bool>, factor: u64) -> u64 {
    let per_row: Vec<u64> = image
        .rows()
        .map(|row| row.iter().filter(|&&g| g).count() as u64)
        .collect();
    let per_col: Vec<u64> = (0..image.width())
        .map(|col| image.column(col).filter(|&&g| g).count() as u64)
        .collect();
    axis_distance(&per_row, factor) + axis_distance(&per_col, factor)
}

impl PartSolver<1> for Solver {
    fn solve(image: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(distances(image, 2).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(image: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(distances(image, 1_000_000).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solve;

    const SAMPLE: &str = "\
...#......
.......#..
#.........
..........
......#...
.#........
.........#
..........
.......#..
#...#.....
";

    #[test]
    fn sample() {
        let image = Solver::parse(SAMPLE).unwrap();
        assert_eq!(distances(&image, 2), 374);
        assert_eq!(distances(&image, 10), 1030);
        assert_eq!(distances(&image, 100), 8410);
        assert_eq!(solve::<Solver>(SAMPLE, 1), "374");
    }

    #[test]
    fn single_axis() {
        assert_eq!(axis_distance(&[1, 0, 1], 5), 6);
        assert_eq!(axis_distance(&[2, 1], 1), 2);
    }
}
