//! Advent of Code solvers for 2020 and 2023.
//!
//! Every day is a unit struct named `Solver` in `year_YYYY::day_D`, deriving
//! `AocSolver` for part dispatch and `AutoRegisterSolver` so that linking
//! this crate is enough for a runner to find it. Each year sits behind its
//! own feature.

pub mod utils;

#[cfg(feature = "year-2020")]
pub mod year_2020;

#[cfg(feature = "year-2023")]
pub mod year_2023;

#[cfg(test)]
pub(crate) mod test_support {
    use aoc_core::{SolveError, Solver};

    /// Parse `input` and solve `part`, panicking on any error
    pub fn solve<S: Solver>(input: &str, part: u8) -> String {
        try_solve::<S>(input, part).unwrap_or_else(|e| panic!("part {part} failed: {e}"))
    }

    pub fn try_solve<S: Solver>(input: &str, part: u8) -> Result<String, Box<dyn std::error::Error>> {
        let mut shared = S::parse(input)?;
        let answer: Result<String, SolveError> = S::solve_part(&mut shared, part);
        Ok(answer?)
    }
}
