//! Crab Cups

use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 23, tags = ["simulation", "slow"])]
pub struct Solver;

impl AocParser for Solver {
    /// Cup labels in clockwise order, starting with the current cup
    type SharedData<'a> = Vec<u32>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let labels: Vec<u32> = input
            .trim()
            .chars()
            .map(|c| {
                c.to_digit(10)
                    .filter(|&d| d > 0)
                    .ok_or_else(|| ParseError::invalid(format!("cup label {c:?}")))
            })
            .collect::<Result<_, _>>()?;

        let mut sorted = labels.clone();
        sorted.sort_unstable();
        if sorted.len() < 5 || !sorted.iter().copied().eq(1..=labels.len() as u32) {
            return Err(ParseError::invalid("cups must be labelled 1 to n, each once"));
        }
        Ok(labels)
    }
}

/// Ring of cups stored as `next[label]`; index 0 is unused
struct Circle {
    next: Vec<u32>,
    current: u32,
}

impl Circle {
    /// `labels` followed by every label up to `total`
    fn new(labels: &[u32], total: u32) -> Self {
        let mut next = vec![0; total as usize + 1];
        let order = labels.iter().copied().chain(labels.len() as u32 + 1..=total);
        let mut prev = None;
        let mut first = 0;
        for label in order {
            match prev {
                Some(p) => next[p as usize] = label,
                None => first = label,
            }
            prev = Some(label);
        }
        if let Some(last) = prev {
            next[last as usize] = first;
        }
        Self { next, current: first }
    }

    fn after(&self, label: u32) -> u32 {
        self.next[label as usize]
    }

    fn play(&mut self, moves: usize) {
        let max = self.next.len() as u32 - 1;
        for _ in 0..moves {
            let a = self.after(self.current);
            let b = self.after(a);
            let c = self.after(b);

            let mut dest = self.current;
            loop {
                dest = if dest == 1 { max } else { dest - 1 };
                if dest != a && dest != b && dest != c {
                    break;
                }
            }

            // lift a..=c out, splice them in after dest
            self.next[self.current as usize] = self.after(c);
            self.next[c as usize] = self.after(dest);
            self.next[dest as usize] = a;
            self.current = self.after(self.current);
        }
    }
}

fn labels_after_one(start: &[u32], moves: usize) -> String {
    let mut circle = Circle::new(start, start.len() as u32);
    circle.play(moves);
    std::iter::successors(Some(circle.after(1)), |&label| Some(circle.after(label)))
        .take_while(|&label| label != 1)
        .map(|label| label.to_string())
        .collect()
}

impl PartSolver<1> for Solver {
    fn solve(start: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(labels_after_one(start, 100))
    }
}

impl PartSolver<2> for Solver {
    fn solve(start: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut circle = Circle::new(start, 1_000_000);
        tracing::debug!("playing ten million moves");
        circle.play(10_000_000);
        let a = circle.after(1);
        let b = circle.after(a);
        Ok((u64::from(a) * u64::from(b)).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solve;

    #[test]
    fn sample() {
        let start = Solver::parse("389125467\n").unwrap();
        assert_eq!(labels_after_one(&start, 10), "92658374");
        assert_eq!(solve::<Solver>("389125467", 1), "67384529");
    }

    #[test]
    fn million_cups() {
        assert_eq!(solve::<Solver>("389125467", 2), "149245887792");
    }

    #[test]
    fn labels_must_be_a_permutation() {
        assert!(Solver::parse("3891254677\n").is_err());
        assert!(Solver::parse("38912546\n").is_err());
        assert!(Solver::parse("389x25467\n").is_err());
        assert!(Solver::parse("0123\n").is_err());
    }
}
