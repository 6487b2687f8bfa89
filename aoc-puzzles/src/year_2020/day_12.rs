//! Rain Risk

use crate::utils::grid::{Direction, Pos};
use crate::utils::text::{lines, parse_num};
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 12, tags = ["simulation"])]
pub struct Solver;

#[derive(Debug, Clone, Copy)]
pub enum Action {
    Move(Direction, i64),
    /// Quarter turns clockwise, 0..4
    Turn(u8),
    Forward(i64),
}

impl Action {
    fn parse(line: &str) -> Result<Self, ParseError> {
        let (code, value) = line.split_at_checked(1).ok_or_else(|| ParseError::missing("empty line"))?;
        let value: i64 = parse_num(value)?;
        let quarter_turns = |degrees: i64| {
            if degrees % 90 == 0 {
                Ok((degrees / 90).rem_euclid(4) as u8)
            } else {
                Err(ParseError::invalid(format!("{line:?} is not a multiple of 90 degrees")))
            }
        };
        match code {
            "N" | "E" | "S" | "W" => {
                let dir = code.chars().next().and_then(Direction::from_letter);
                dir.map(|d| Action::Move(d, value))
                    .ok_or_else(|| ParseError::invalid(line))
            }
            "R" => Ok(Action::Turn(quarter_turns(value)?)),
            "L" => Ok(Action::Turn((4 - quarter_turns(value)?) % 4)),
            "F" => Ok(Action::Forward(value)),
            _ => Err(ParseError::invalid(format!("unknown action {line:?}"))),
        }
    }
}

/// Quarter turn clockwise about the ship
fn rotate(offset: Pos) -> Pos {
    Pos::new(offset.col, -offset.row)
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Action>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        lines(input).map(Action::parse).collect()
    }
}

impl PartSolver<1> for Solver {
    fn solve(actions: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (mut ship, mut facing) = (Pos::default(), Direction::East);
        for &action in actions.iter() {
            match action {
                Action::Move(dir, n) => ship = ship.step_n(dir, n),
                Action::Turn(q) => (0..q).for_each(|_| facing = facing.turn_right()),
                Action::Forward(n) => ship = ship.step_n(facing, n),
            }
        }
        Ok(ship.manhattan(Pos::default()).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(actions: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut ship = Pos::default();
        // 10 east, 1 north
        let mut waypoint = Pos::new(-1, 10);
        for &action in actions.iter() {
            match action {
                Action::Move(dir, n) => waypoint = waypoint.step_n(dir, n),
                Action::Turn(q) => (0..q).for_each(|_| waypoint = rotate(waypoint)),
                Action::Forward(n) => ship = ship + waypoint * n,
            }
        }
        Ok(ship.manhattan(Pos::default()).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solve;

    const SAMPLE: &str = "F10\nN3\nF7\nR90\nF11\n";

    #[test]
    fn sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "25");
        assert_eq!(solve::<Solver>(SAMPLE, 2), "286");
    }

    #[test]
    fn left_turns_mirror_right_turns() {
        assert_eq!(solve::<Solver>("L270\nF5\n", 1), solve::<Solver>("R90\nF5\n", 1));
        assert_eq!(rotate(Pos::new(-1, 10)), Pos::new(10, 1));
    }

    #[test]
    fn odd_angles_are_rejected() {
        assert!(Solver::parse("R45\n").is_err());
        assert!(Solver::parse("X3\n").is_err());
    }
}
