//! Lavaduct Lagoon

use crate::utils::grid::{Direction, Pos};
use crate::utils::text::{lines, parse_num};
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 18, tags = ["geometry"])]
pub struct Solver;

pub type Dig = (Direction, i64);

/// Both readings of one plan line: the plain one and the one hidden in the
/// colour code
pub struct Step {
    plain: Dig,
    hex: Dig,
}

/// `R 6 (#70c710)`
fn step(line: &str) -> Result<Step, ParseError> {
    let bad = || ParseError::invalid(format!("bad dig step {line:?}"));
    let mut parts = line.split_whitespace();
    let (Some(dir), Some(len), Some(colour), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(bad());
    };
    let dir = dir
        .chars()
        .next()
        .and_then(Direction::from_letter)
        .ok_or_else(bad)?;
    let code = colour
        .strip_prefix("(#")
        .and_then(|c| c.strip_suffix(')'))
        .filter(|c| c.len() == 6)
        .ok_or_else(bad)?;
    let (distance, turn) = code.split_at(5);
    let hex_dir = match turn {
        "0" => Direction::East,
        "1" => Direction::South,
        "2" => Direction::West,
        "3" => Direction::North,
        _ => return Err(bad()),
    };
    let distance = i64::from_str_radix(distance, 16).map_err(|_| bad())?;
    Ok(Step {
        plain: (dir, parse_num(len)?),
        hex: (hex_dir, distance),
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Step>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        lines(input).map(step).collect()
    }
}

/// Cubic metres held by the lagoon: interior from the shoelace formula and
/// Pick's theorem, plus the trench itself
fn lagoon(plan: impl Iterator<Item = Dig>) -> i64 {
    let (mut twice_area, mut perimeter) = (0, 0);
    let mut at = Pos::default();
    for (dir, len) in plan {
        let next = at.step_n(dir, len);
        twice_area += at.row * next.col - next.row * at.col;
        perimeter += len;
        at = next;
    }
    twice_area.abs() / 2 + perimeter / 2 + 1
}

impl PartSolver<1> for Solver {
    fn solve(plan: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(lagoon(plan.iter().map(|s| s.plain)).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(plan: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(lagoon(plan.iter().map(|s| s.hex)).to_string())
    }
}
