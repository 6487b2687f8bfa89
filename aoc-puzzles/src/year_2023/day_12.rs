//! Hot Springs

use crate::utils::dp::{DpCache, DpProblem};
use crate::utils::text::{lines, numbers, split_once_or};
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 12, tags = ["dp"])]
pub struct Solver;

/// Condition record: `.` operational, `#` damaged, `?` unknown
pub struct Record<'a> {
    springs: &'a [u8],
    groups: Vec<usize>,
}

fn record(line: &str) -> Result<Record<'_>, ParseError> {
    let (springs, groups) = split_once_or(line, " ")?;
    if let Some(bad) = springs.bytes().find(|b| !b"?.#".contains(b)) {
        return Err(ParseError::invalid(format!("unknown spring {:?}", bad as char)));
    }
    Ok(Record {
        springs: springs.as_bytes(),
        groups: numbers(groups)?,
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Record<'a>>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        lines(input).map(record).collect()
    }
}

/// Arrangements of `springs[i..]` matching `groups[j..]`
struct Arrangements<'a> {
    springs: &'a [u8],
    groups: &'a [usize],
}

impl DpProblem<(usize, usize), u64> for Arrangements<'_> {
    fn deps(&self, &(i, j): &(usize, usize)) -> Vec<(usize, usize)> {
        let Some(&c) = self.springs.get(i) else {
            return Vec::new();
        };
        let mut next = Vec::with_capacity(2);
        if c != b'#' {
            next.push((i + 1, j));
        }
        if c != b'.'
            && let Some(&len) = self.groups.get(j)
        {
            let end = i + len;
            let fits = end <= self.springs.len()
                && !self.springs[i..end].contains(&b'.')
                && self.springs.get(end) != Some(&b'#');
            if fits {
                // the separator after the group is consumed with it
                next.push(((end + 1).min(self.springs.len()), j + 1));
            }
        }
        next
    }

    fn compute(&self, &(i, j): &(usize, usize), deps: Vec<u64>) -> u64 {
        if i == self.springs.len() {
            u64::from(j == self.groups.len())
        } else {
            deps.iter().sum()
        }
    }
}

fn arrangements(springs: &[u8], groups: &[usize]) -> Result<u64, SolveError> {
    DpCache::new(Arrangements { springs, groups }).get(&(0, 0))
}

impl PartSolver<1> for Solver {
    fn solve(records: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum = records
            .iter()
            .map(|r| arrangements(r.springs, &r.groups))
            .sum::<Result<u64, _>>()?;
        Ok(sum.to_string())
    }
}

impl PartSolver<2> for Solver {
    /// Every record unfolds to five copies, springs joined by `?`
    fn solve(records: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum = records
            .iter()
            .map(|r| {
                let springs = vec![r.springs; 5].join(&b'?');
                let groups = r.groups.repeat(5);
                arrangements(&springs, &groups)
            })
            .sum::<Result<u64, _>>()?;
        Ok(sum.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solve;

    const SAMPLE: &str = "\
???.### 1,1,3
.??..??...?##. 1,1,3
?#?#?#?#?#?#?#? 1,3,1,6
????.#...#... 4,1,1
????.######..#####. 1,6,5
?###???????? 3,2,1
";

    #[test]
    fn sample() {
        let counts: Vec<u64> = Solver::parse(SAMPLE)
            .unwrap()
            .iter()
            .map(|r| arrangements(r.springs, &r.groups).unwrap())
            .collect();
        assert_eq!(counts, vec![1, 4, 1, 1, 4, 10]);
        assert_eq!(solve::<Solver>(SAMPLE, 1), "21");
        assert_eq!(solve::<Solver>(SAMPLE, 2), "525152");
    }

    #[test]
    fn impossible_record() {
        assert_eq!(arrangements(b"#.#", &[3]).unwrap(), 0);
        assert_eq!(arrangements(b"???", &[]).unwrap(), 1);
        assert_eq!(arrangements(b"", &[1]).unwrap(), 0);
    }
}
