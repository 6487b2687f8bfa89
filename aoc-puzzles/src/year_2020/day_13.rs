//! Shuttle Search

use crate::utils::math::crt;
use crate::utils::text::{lines, parse_num};
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 13, tags = ["math"])]
pub struct Solver;

pub struct Notes {
    earliest: u64,
    /// `(offset in the list, bus id)`; `x` entries are skipped
    buses: Vec<(u64, u64)>,
}

impl AocParser for Solver {
    type SharedData<'a> = Notes;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let mut lines = lines(input);
        let (Some(earliest), Some(schedule)) = (lines.next(), lines.next()) else {
            return Err(ParseError::missing("expected a timestamp line and a schedule line"));
        };

        let mut buses = Vec::new();
        for (offset, entry) in schedule.split(',').enumerate() {
            if entry == "x" {
                continue;
            }
            let id: u64 = parse_num(entry)?;
            if id == 0 {
                return Err(ParseError::invalid("bus id 0"));
            }
            buses.push((offset as u64, id));
        }

        Ok(Notes {
            earliest: parse_num(earliest)?,
            buses,
        })
    }
}

impl PartSolver<1> for Solver {
    fn solve(notes: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        notes
            .buses
            .iter()
            .map(|&(_, id)| (id, (id - notes.earliest % id) % id))
            .min_by_key(|&(_, wait)| wait)
            .map(|(id, wait)| (id * wait).to_string())
            .ok_or_else(|| SolveError::failed("no buses in service"))
    }
}

impl PartSolver<2> for Solver {
    /// Bus at offset `k` departs at `t + k`, so `t ≡ -k (mod id)`
    fn solve(notes: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let congruences: Vec<(i64, i64)> = notes
            .buses
            .iter()
            .map(|&(offset, id)| (-(offset as i64), id as i64))
            .collect();
        crt(&congruences)
            .map(|(t, _)| t.to_string())
            .ok_or_else(|| SolveError::failed("bus departures can never line up"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solve;

    #[test]
    fn sample() {
        let input = "939\n7,13,x,x,59,x,31,19\n";
        assert_eq!(solve::<Solver>(input, 1), "295");
        assert_eq!(solve::<Solver>(input, 2), "1068781");
    }

    #[test]
    fn other_schedules() {
        assert_eq!(solve::<Solver>("0\n17,x,13,19\n", 2), "3417");
        assert_eq!(solve::<Solver>("0\n67,7,59,61\n", 2), "754018");
        assert_eq!(solve::<Solver>("0\n1789,37,47,1889\n", 2), "1202161486");
    }

    #[test]
    fn missing_schedule() {
        assert!(Solver::parse("939\n").is_err());
        assert!(Solver::parse("939\n7,y\n").is_err());
    }
}
