//! Wait For It

use crate::utils::text::{lines, numbers, parse_num};
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 6, tags = ["math"])]
pub struct Solver;

pub struct Races<'a> {
    time: &'a str,
    distance: &'a str,
}

impl AocParser for Solver {
    type SharedData<'a> = Races<'a>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let mut rows = lines(input);
        let mut field = |name: &str| {
            rows.next()
                .and_then(|line| line.strip_prefix(name))
                .ok_or_else(|| ParseError::invalid(format!("expected {name:?} line")))
        };
        Ok(Races {
            time: field("Time:")?,
            distance: field("Distance:")?,
        })
    }
}

/// Hold times that beat `record`. Distance `t * (time - t)` is symmetric
/// about `time / 2`, so the winners are `t0..=time - t0`.
fn ways(time: u64, record: u64) -> u64 {
    let wins = |t: u64| u128::from(t) * u128::from(time - t) > u128::from(record);
    let half = time / 2;
    let disc = (time as f64).powi(2) - 4.0 * record as f64;
    if disc < 0.0 {
        return 0;
    }
    // float estimate of the smaller root, corrected exactly
    let mut t = (((time as f64 - disc.sqrt()) / 2.0).max(0.0) as u64).min(half);
    while t > 0 && wins(t - 1) {
        t -= 1;
    }
    while t <= half && !wins(t) {
        t += 1;
    }
    if t > half { 0 } else { time - 2 * t + 1 }
}

impl PartSolver<1> for Solver {
    fn solve(races: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let times = numbers::<u64>(races.time)?;
        let records = numbers::<u64>(races.distance)?;
        if times.len() != records.len() {
            return Err(SolveError::failed("times and distances differ in count"));
        }
        let product: u64 = times.iter().zip(&records).map(|(&t, &d)| ways(t, d)).product();
        Ok(product.to_string())
    }
}

impl PartSolver<2> for Solver {
    /// One race, with the spaces between digits dropped
    fn solve(races: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let joined = |s: &str| s.split_whitespace().collect::<String>();
        let time: u64 = parse_num(&joined(races.time))?;
        let record: u64 = parse_num(&joined(races.distance))?;
        Ok(ways(time, record).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solve;
    use proptest::prelude::*;

    const SAMPLE: &str = "\
Time:      7  15   30
Distance:  9  40  200
";

    #[test]
    fn sample() {
        assert_eq!(ways(7, 9), 4);
        assert_eq!(ways(15, 40), 8);
        assert_eq!(ways(30, 200), 9);
        assert_eq!(solve::<Solver>(SAMPLE, 1), "288");
        assert_eq!(solve::<Solver>(SAMPLE, 2), "71503");
    }

    #[test]
    fn unbeatable_record() {
        assert_eq!(ways(4, 4), 0);
        assert_eq!(ways(0, 0), 0);
    }

    proptest! {
        #[test]
        fn matches_brute_force(time in 0u64..300, record in 0u64..25_000) {
            let brute = (0..=time).filter(|t| t * (time - t) > record).count() as u64;
            prop_assert_eq!(ways(time, record), brute);
        }
    }
}
