//! Sand Slabs

use crate::utils::text::{lines, numbers};
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use std::collections::HashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 22, tags = ["simulation", "graph"])]
pub struct Solver;

#[derive(Debug, Clone, Copy)]
struct Brick {
    min: [u32; 3],
    max: [u32; 3],
}

fn brick(line: &str) -> Result<Brick, ParseError> {
    match numbers::<u32>(line)?[..] {
        [x1, y1, z1, x2, y2, z2] if z1.min(z2) > 0 => Ok(Brick {
            min: [x1.min(x2), y1.min(y2), z1.min(z2)],
            max: [x1.max(x2), y1.max(y2), z1.max(z2)],
        }),
        _ => Err(ParseError::invalid(format!("bad brick {line:?}"))),
    }
}

/// Bricks after settling, each with the bricks directly beneath it
pub struct Stack {
    supporters: Vec<Vec<usize>>,
}

/// Drop every brick as far as it goes, lowest first
fn settle(mut bricks: Vec<Brick>) -> Stack {
    bricks.sort_by_key(|b| b.min[2]);
    // (x, y) -> (top z, brick)
    let mut tops: HashMap<(u32, u32), (u32, usize)> = HashMap::new();
    let mut supporters = Vec::with_capacity(bricks.len());
    for (id, b) in bricks.iter().enumerate() {
        let footprint: Vec<(u32, u32)> = (b.min[0]..=b.max[0])
            .flat_map(|x| (b.min[1]..=b.max[1]).map(move |y| (x, y)))
            .collect();
        let floor = footprint
            .iter()
            .filter_map(|cell| tops.get(cell))
            .map(|&(z, _)| z)
            .max()
            .unwrap_or(0);
        let mut below: Vec<usize> = footprint
            .iter()
            .filter_map(|cell| tops.get(cell))
            .filter(|&&(z, _)| floor > 0 && z == floor)
            .map(|&(_, other)| other)
            .collect();
        below.sort_unstable();
        below.dedup();
        supporters.push(below);

        let top = floor + 1 + (b.max[2] - b.min[2]);
        for cell in footprint {
            tops.insert(cell, (top, id));
        }
    }
    Stack { supporters }
}

impl AocParser for Solver {
    type SharedData<'a> = Stack;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let bricks = lines(input).map(brick).collect::<Result<Vec<_>, _>>()?;
        Ok(settle(bricks))
    }
}

impl PartSolver<1> for Solver {
    /// Bricks that are never the only support of another
    fn solve(stack: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let mut essential = vec![false; stack.supporters.len()];
        for below in &stack.supporters {
            if let [only] = below[..] {
                essential[only] = true;
            }
        }
        Ok(essential.iter().filter(|&&e| !e).count().to_string())
    }
}

impl PartSolver<2> for Solver {
    /// Sum over bricks of how many others fall when it is removed. Supporters
    /// always settle earlier, so one pass upwards finds the whole chain.
    fn solve(stack: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let n = stack.supporters.len();
        let mut total = 0;
        for removed in 0..n {
            let mut fallen = vec![false; n];
            fallen[removed] = true;
            for above in removed + 1..n {
                let below = &stack.supporters[above];
                if !below.is_empty() && below.iter().all(|&b| fallen[b]) {
                    fallen[above] = true;
                    total += 1;
                }
            }
        }
        Ok(total.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solve;

    const SAMPLE: &str = "\
1,0,1~1,2,1
0,0,2~2,0,2
0,2,3~2,2,3
0,0,4~0,2,4
2,0,5~2,2,5
0,1,6~2,1,6
1,1,8~1,1,9
";

    #[test]
    fn sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "5");
        assert_eq!(solve::<Solver>(SAMPLE, 2), "7");
    }

    #[test]
    fn tower_of_cubes() {
        let input = "0,0,5~0,0,5\n0,0,1~0,0,1\n0,0,9~0,0,9\n";
        let stack = Solver::parse(input).unwrap();
        assert_eq!(stack.supporters, vec![vec![], vec![0], vec![1]]);
        assert_eq!(solve::<Solver>(input, 1), "1");
        assert_eq!(solve::<Solver>(input, 2), "3");
    }

    #[test]
    fn brick_in_the_ground() {
        assert!(Solver::parse("0,0,0~0,0,1\n").is_err());
    }
}
