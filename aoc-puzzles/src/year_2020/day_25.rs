//! Combo Breaker

use crate::utils::math::mod_pow;
use crate::utils::text::{lines, parse_num};
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 1)]
#[aoc(year = 2020, day = 25, tags = ["math"])]
pub struct Solver;

const MODULUS: u64 = 20201227;
const SUBJECT: u64 = 7;

impl AocParser for Solver {
    /// Card and door public keys
    type SharedData<'a> = (u64, u64);

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let keys = lines(input)
            .map(parse_num::<u64>)
            .collect::<Result<Vec<_>, _>>()?;
        match keys[..] {
            [card, door] if card < MODULUS && door < MODULUS => Ok((card, door)),
            [_, _] => Err(ParseError::invalid(format!("public keys must be below {MODULUS}"))),
            _ => Err(ParseError::invalid("expected two public keys")),
        }
    }
}

/// Loop size that turns the subject number into `key`
fn loop_size(key: u64) -> Option<u64> {
    let mut value = 1;
    for size in 0..MODULUS {
        if value == key {
            return Some(size);
        }
        value = value * SUBJECT % MODULUS;
    }
    None
}

impl PartSolver<1> for Solver {
    fn solve(keys: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (card, door) = *keys;
        let size = loop_size(card)
            .ok_or_else(|| SolveError::failed(format!("{card} is not a power of {SUBJECT}")))?;
        Ok(mod_pow(door, size, MODULUS).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{solve, try_solve};
    use aoc_core::SolverExt;

    #[test]
    fn sample() {
        assert_eq!(loop_size(5764801), Some(8));
        assert_eq!(loop_size(17807724), Some(11));
        assert_eq!(solve::<Solver>("5764801\n17807724\n", 1), "14897079");
    }

    #[test]
    fn only_one_part() {
        let mut keys = Solver::parse("5764801\n17807724\n").unwrap();
        assert!(matches!(
            Solver::solve_part_checked_range(&mut keys, 2),
            Err(SolveError::PartOutOfRange(2))
        ));
        assert!(try_solve::<Solver>("5764801\n17807724\n", 2).is_err());
    }

    #[test]
    fn key_outside_group() {
        assert!(Solver::parse("5764801\n").is_err());
        assert!(Solver::parse("20201227\n1\n").is_err());
        assert!(try_solve::<Solver>("0\n1\n", 1).is_err());
    }
}
