//! Parabolic Reflector Dish

use crate::utils::grid::{Grid, Pos};
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use std::collections::HashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 14, tags = ["grid", "cycle"])]
pub struct Solver;

const ROUND: char = 'O';
const CUBE: char = '#';
const EMPTY: char = '.';

impl AocParser for Solver {
    type SharedData<'a> = Grid<char>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Grid::parse(input, |c| match c {
            ROUND | CUBE | EMPTY => Ok(c),
            _ => Err(ParseError::invalid(format!("unexpected {c:?}"))),
        })
    }
}

/// Roll every round rock as far north as it goes
fn tilt_north(dish: &mut Grid<char>) {
    for col in 0..dish.width() as i64 {
        let mut free = 0;
        for row in 0..dish.height() as i64 {
            match dish[Pos::new(row, col)] {
                CUBE => free = row + 1,
                ROUND => {
                    dish[Pos::new(row, col)] = EMPTY;
                    dish[Pos::new(free, col)] = ROUND;
                    free += 1;
                }
                _ => {}
            }
        }
    }
}

fn north_load(dish: &Grid<char>) -> usize {
    dish.rows()
        .enumerate()
        .map(|(r, row)| row.iter().filter(|&&c| c == ROUND).count() * (dish.height() - r))
        .sum()
}

/// Tilt north, west, south then east. Each quarter turn brings the next
/// side to the north.
fn spin_cycle(dish: &Grid<char>) -> Grid<char> {
    (0..4).fold(dish.clone(), |mut d, _| {
        tilt_north(&mut d);
        d.rotate_clockwise()
    })
}

impl PartSolver<1> for Solver {
    fn solve(dish: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut tilted = dish.clone();
        tilt_north(&mut tilted);
        Ok(north_load(&tilted).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(dish: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        const CYCLES: usize = 1_000_000_000;
        let mut seen: HashMap<Grid<char>, usize> = HashMap::new();
        let mut history = vec![dish.clone()];
        let mut current = dish.clone();
        for i in 1..=CYCLES {
            current = spin_cycle(&current);
            if let Some(&first) = seen.get(&current) {
                let period = i - first;
                tracing::debug!(first, period, "spin cycles repeat");
                let index = first + (CYCLES - first) % period;
                return Ok(north_load(&history[index]).to_string());
            }
            seen.insert(current.clone(), i);
            history.push(current.clone());
        }
        Ok(north_load(&current).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solve;

    const SAMPLE: &str = "\
O....#....
O.OO#....#
.....##...
OO.#O....O
.O.....O#.
O.#..O.#.#
..O..#O..O
.......O..
#....###..
#OO..#....
";

    #[test]
    fn sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "136");
        assert_eq!(solve::<Solver>(SAMPLE, 2), "64");
    }

    #[test]
    fn one_cycle() {
        let dish = Solver::parse(SAMPLE).unwrap();
        let expected = "\
.....#....
....#...O#
...OO##...
.OO#......
.....OOO#.
.O#...O#.#
....O#....
......OOOO
#...O###..
#..OO#....
";
        assert_eq!(spin_cycle(&dish).to_string(), expected);
    }
}
