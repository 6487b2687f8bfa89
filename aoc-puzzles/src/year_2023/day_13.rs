//! Point of Incidence

use crate::utils::grid::Grid;
use crate::utils::text::paragraphs;
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 13, tags = ["grid", "bits"])]
pub struct Solver;

/// A pattern as row bitmasks and column bitmasks
pub struct Pattern {
    rows: Vec<u64>,
    cols: Vec<u64>,
}

fn mask<'a>(cells: impl Iterator<Item = &'a bool>) -> u64 {
    cells.fold(0, |acc, &rock| acc << 1 | u64::from(rock))
}

fn pattern(block: &[&str]) -> Result<Pattern, ParseError> {
    let grid = Grid::parse(&block.join("\n"), |c| match c {
        '#' => Ok(true),
        '.' => Ok(false),
        _ => Err(ParseError::invalid(format!("unexpected {c:?}"))),
    })?;
    if grid.width() > 64 || grid.height() > 64 {
        return Err(ParseError::invalid("patterns wider than 64 cells"));
    }
    Ok(Pattern {
        rows: grid.rows().map(|row| mask(row.iter())).collect(),
        cols: (0..grid.width()).map(|c| mask(grid.column(c))).collect(),
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Pattern>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        paragraphs(input).iter().map(|b| pattern(b)).collect()
    }
}

/// Lines before a mirror that needs exactly `smudges` cells fixed
fn mirror(lines: &[u64], smudges: u32) -> Option<usize> {
    (1..lines.len()).find(|&k| {
        lines[..k]
            .iter()
            .rev()
            .zip(&lines[k..])
            .map(|(a, b)| (a ^ b).count_ones())
            .sum::<u32>()
            == smudges
    })
}

fn summarize(patterns: &[Pattern], smudges: u32) -> Result<String, SolveError> {
    let mut total = 0;
    for (i, p) in patterns.iter().enumerate() {
        total += match (mirror(&p.cols, smudges), mirror(&p.rows, smudges)) {
            (Some(cols), _) => cols,
            (None, Some(rows)) => 100 * rows,
            (None, None) => {
                return Err(SolveError::failed(format!("pattern {} has no mirror", i + 1)));
            }
        };
    }
    Ok(total.to_string())
}

impl PartSolver<1> for Solver {
    fn solve(patterns: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        summarize(patterns, 0)
    }
}

impl PartSolver<2> for Solver {
    fn solve(patterns: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        summarize(patterns, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{solve, try_solve};

    const SAMPLE: &str = "\
#.##..##.
..#.##.#.
##......#
##......#
..#.##.#.
..##..##.
#.#.##.#.

#...##..#
#....#..#
..##..###
#####.##.
#####.##.
..##..###
#....#..#
";

    #[test]
    fn sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "405");
        assert_eq!(solve::<Solver>(SAMPLE, 2), "400");
    }

    #[test]
    fn no_mirror() {
        assert!(try_solve::<Solver>("#.\n..\n", 1).is_err());
        assert_eq!(mirror(&[1, 2, 2, 1], 0), Some(2));
        assert_eq!(mirror(&[1, 3], 1), Some(1));
    }
}
