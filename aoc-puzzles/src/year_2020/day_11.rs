//! Seating System

use crate::utils::grid::{Grid, Pos};
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use std::collections::HashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 11, tags = ["grid", "simulation"])]
pub struct Solver;

impl AocParser for Solver {
    /// `true` for a seat, `false` for floor
    type SharedData<'a> = Grid<bool>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Grid::parse(input, |c| match c {
            'L' | '#' => Ok(true),
            '.' => Ok(false),
            other => Err(ParseError::invalid(format!("unexpected {other:?} in seat map"))),
        })
    }
}

/// Seats as indices, with the indices each one watches
struct Layout {
    watched: Vec<Vec<usize>>,
}

impl Layout {
    fn new(seats: &Grid<bool>, line_of_sight: bool) -> Self {
        let index: HashMap<Pos, usize> = seats
            .iter()
            .filter(|&(_, &seat)| seat)
            .enumerate()
            .map(|(i, (pos, _))| (pos, i))
            .collect();
        let directions: Vec<Pos> = Pos::default().neighbours8().collect();

        let mut watched = vec![Vec::new(); index.len()];
        for (&pos, &i) in &index {
            for &dir in &directions {
                let mut look = pos + dir;
                while line_of_sight && seats.get(look) == Some(&false) {
                    look = look + dir;
                }
                if let Some(&j) = index.get(&look) {
                    watched[i].push(j);
                }
            }
        }
        Self { watched }
    }

    /// Occupied seats once the room stops changing
    fn settle(&self, tolerance: usize) -> usize {
        let mut occupied = vec![false; self.watched.len()];
        loop {
            let next: Vec<bool> = self
                .watched
                .iter()
                .zip(&occupied)
                .map(|(watched, &taken)| {
                    let around = watched.iter().filter(|&&j| occupied[j]).count();
                    if taken { around < tolerance } else { around == 0 }
                })
                .collect();
            if next == occupied {
                return occupied.iter().filter(|&&taken| taken).count();
            }
            occupied = next;
        }
    }
}

impl PartSolver<1> for Solver {
    fn solve(seats: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(Layout::new(seats, false).settle(4).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(seats: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(Layout::new(seats, true).settle(5).to_string())
    }
}
