//! Adapter Array

use crate::utils::dp::{DpCache, DpProblem};
use crate::utils::text::{lines, parse_num};
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 10, tags = ["math"])]
pub struct Solver;

impl AocParser for Solver {
    /// Joltages in order, including the outlet (0) and the device (max + 3)
    type SharedData<'a> = Vec<u64>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let mut chain = lines(input).map(parse_num).collect::<Result<Vec<u64>, _>>()?;
        chain.push(0);
        chain.sort_unstable();
        let device = chain.last().copied().unwrap_or_default() + 3;
        chain.push(device);
        Ok(chain)
    }
}

/// Ways to reach the device from each adapter index
struct Arrangements<'a> {
    chain: &'a [u64],
}

impl DpProblem<usize, u64> for Arrangements<'_> {
    fn deps(&self, &i: &usize) -> Vec<usize> {
        (i + 1..self.chain.len())
            .take_while(|&j| self.chain[j] - self.chain[i] <= 3)
            .collect()
    }

    fn compute(&self, &i: &usize, deps: Vec<u64>) -> u64 {
        if i + 1 == self.chain.len() {
            1
        } else {
            deps.iter().sum()
        }
    }
}

impl PartSolver<1> for Solver {
    fn solve(chain: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut counts = [0u64; 4];
        for pair in chain.windows(2) {
            let gap = pair[1] - pair[0];
            let slot = counts
                .get_mut(gap as usize)
                .ok_or_else(|| SolveError::failed(format!("gap of {gap} after {}", pair[0])))?;
            *slot += 1;
        }
        Ok((counts[1] * counts[3]).to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(chain: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let cache = DpCache::new(Arrangements {
            chain: chain.as_slice(),
        });
        Ok(cache.get(&0)?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{solve, try_solve};

    const SMALL: &str = "16\n10\n15\n5\n1\n11\n7\n19\n6\n12\n4\n";
    const LARGE: &str = "28\n33\n18\n42\n31\n14\n46\n20\n48\n47\n24\n23\n49\n45\n19\n38\n39\n11\n1\n32\n25\n35\n8\n17\n7\n9\n4\n2\n34\n10\n3\n";

    #[test]
    fn sample() {
        assert_eq!(solve::<Solver>(SMALL, 1), "35");
        assert_eq!(solve::<Solver>(SMALL, 2), "8");
        assert_eq!(solve::<Solver>(LARGE, 1), "220");
        assert_eq!(solve::<Solver>(LARGE, 2), "19208");
    }

    #[test]
    fn unbridgeable_gap() {
        assert!(try_solve::<Solver>("1\n2\n9\n", 1).is_err());
        assert_eq!(solve::<Solver>("1\n2\n9\n", 2), "0");
    }

    #[test]
    fn duplicate_adapters_count_separately() {
        // either copy alone, or both
        assert_eq!(solve::<Solver>("1\n1\n", 2), "3");
    }
}
