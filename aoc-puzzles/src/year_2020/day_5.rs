//! Binary Boarding

use crate::utils::text::lines;
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 5, tags = ["parsing"])]
pub struct Solver;

/// `FBFBBFFRLR` read as binary with `B` and `R` as ones; row * 8 + column
/// falls out directly.
fn seat_id(pass: &str) -> Result<u16, ParseError> {
    if pass.len() != 10 {
        return Err(ParseError::invalid(format!("boarding pass {pass:?} is not 10 letters")));
    }
    pass.bytes().try_fold(0u16, |id, b| match b {
        b'F' | b'L' => Ok(id << 1),
        b'B' | b'R' => Ok(id << 1 | 1),
        _ => Err(ParseError::invalid(format!("unexpected {:?} in {pass:?}", b as char))),
    })
}

impl AocParser for Solver {
    /// Seat IDs, sorted
    type SharedData<'a> = Vec<u16>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let mut ids = lines(input).map(seat_id).collect::<Result<Vec<_>, _>>()?;
        ids.sort_unstable();
        Ok(ids)
    }
}

impl PartSolver<1> for Solver {
    fn solve(ids: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        ids.last()
            .map(u16::to_string)
            .ok_or_else(|| SolveError::failed("no boarding passes"))
    }
}

impl PartSolver<2> for Solver {
    fn solve(ids: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        ids.windows(2)
            .find(|pair| pair[1] == pair[0] + 2)
            .map(|pair| (pair[0] + 1).to_string())
            .ok_or_else(|| SolveError::failed("no single-seat gap"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solve;

    fn encode(id: u16) -> String {
        (0..10)
            .rev()
            .map(|bit| {
                let one = id >> bit & 1 == 1;
                match (bit >= 3, one) {
                    (true, false) => 'F',
                    (true, true) => 'B',
                    (false, false) => 'L',
                    (false, true) => 'R',
                }
            })
            .collect()
    }

    #[test]
    fn seat_ids() {
        assert_eq!(seat_id("FBFBBFFRLR").unwrap(), 357);
        assert_eq!(seat_id("BFFFBBFRRR").unwrap(), 567);
        assert_eq!(seat_id("FFFBBBFRRR").unwrap(), 119);
        assert_eq!(seat_id("BBFFBBFRLL").unwrap(), 820);
        assert_eq!(encode(357), "FBFBBFFRLR");
    }

    #[test]
    fn highest_and_missing_seat() {
        assert_eq!(
            solve::<Solver>("FBFBBFFRLR\nBFFFBBFRRR\nFFFBBBFRRR\nBBFFBBFRLL\n", 1),
            "820"
        );

        let passes: String = (100..=140)
            .filter(|&id| id != 117)
            .map(|id| encode(id) + "\n")
            .collect();
        assert_eq!(solve::<Solver>(&passes, 2), "117");
    }

    #[test]
    fn bad_pass() {
        assert!(Solver::parse("FBFBBFFRL\n").is_err());
        assert!(Solver::parse("FBFBBFFRLX\n").is_err());
    }
}
