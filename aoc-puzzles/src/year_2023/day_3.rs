//! Gear Ratios

use crate::utils::grid::{Grid, Pos};
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use std::collections::HashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 3, tags = ["grid"])]
pub struct Solver;

/// A number on the schematic and the symbols touching it
pub struct PartNumber {
    value: u64,
    symbols: Vec<(Pos, char)>,
}

fn is_symbol(c: char) -> bool {
    c != '.' && !c.is_ascii_digit()
}

/// Cells around the run `row, cols`, including diagonals
fn border(row: i64, cols: std::ops::Range<i64>) -> impl Iterator<Item = Pos> {
    let (start, end) = (cols.start, cols.end);
    (row - 1..=row + 1)
        .flat_map(move |r| (start - 1..=end).map(move |c| Pos::new(r, c)))
        .filter(move |p| p.row != row || p.col < start || p.col >= end)
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<PartNumber>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let schematic = Grid::from_chars(input)?;
        let mut numbers = Vec::new();
        for (r, row) in schematic.rows().enumerate() {
            let mut col = 0;
            while col < row.len() {
                let Some(mut value) = row[col].to_digit(10).map(u64::from) else {
                    col += 1;
                    continue;
                };
                let start = col;
                col += 1;
                while let Some(d) = row.get(col).and_then(|c| c.to_digit(10)) {
                    value = value * 10 + u64::from(d);
                    col += 1;
                }
                let symbols = border(r as i64, start as i64..col as i64)
                    .filter_map(|p| schematic.get(p).map(|&c| (p, c)))
                    .filter(|&(_, c)| is_symbol(c))
                    .collect();
                numbers.push(PartNumber { value, symbols });
            }
        }
        Ok(numbers)
    }
}

impl PartSolver<1> for Solver {
    fn solve(numbers: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum: u64 = numbers
            .iter()
            .filter(|n| !n.symbols.is_empty())
            .map(|n| n.value)
            .sum();
        Ok(sum.to_string())
    }
}

impl PartSolver<2> for Solver {
    /// A gear is a `*` touching exactly two part numbers
    fn solve(numbers: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut stars: HashMap<Pos, Vec<u64>> = HashMap::new();
        for number in numbers.iter() {
            for &(pos, c) in &number.symbols {
                if c == '*' {
                    stars.entry(pos).or_default().push(number.value);
                }
            }
        }
        let sum: u64 = stars
            .values()
            .filter_map(|adjacent| match adjacent[..] {
                [a, b] => Some(a * b),
                _ => None,
            })
            .sum();
        Ok(sum.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solve;

    const SAMPLE: &str = "\
467..114..
...*......
..35..633.
......#...
617*......
.....+.58.
..592.....
......755.
...$.*....
.664.598..
";

    #[test]
    fn sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "4361");
        assert_eq!(solve::<Solver>(SAMPLE, 2), "467835");
    }

    #[test]
    fn number_at_row_end() {
        assert_eq!(solve::<Solver>("..12\n...#\n", 1), "12");
        assert_eq!(solve::<Solver>("12.\n...\n.#.\n", 1), "0");
    }

    #[test]
    fn border_skips_the_run_itself() {
        assert_eq!(border(0, 0..2).count(), 10);
    }
}
