//! Clumsy Crucible
//!
//! Dijkstra over (block, axis of the last move). Every move turns and then
//! runs straight for an allowed number of blocks, so no run length needs
//! tracking.

use crate::utils::grid::{Direction, Grid, Pos};
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::ops::RangeInclusive;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 17, tags = ["grid", "dijkstra"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Grid<u32>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Grid::parse(input, |c| {
            c.to_digit(10)
                .ok_or_else(|| ParseError::invalid(format!("heat loss {c:?}")))
        })
    }
}

/// 0 for north/south moves, 1 for east/west
fn axis(dir: Direction) -> usize {
    match dir {
        Direction::North | Direction::South => 0,
        Direction::East | Direction::West => 1,
    }
}

fn least_heat_loss(city: &Grid<u32>, run: RangeInclusive<i64>) -> Option<u32> {
    let target = Pos::new(city.height() as i64 - 1, city.width() as i64 - 1);
    let mut best: Grid<[u32; 2]> = Grid::new(city.width(), city.height(), [u32::MAX; 2]);
    let mut queue = BinaryHeap::new();
    let start = Pos::default();
    for a in 0..2 {
        best[start][a] = 0;
        queue.push(Reverse((0, start, a)));
    }

    while let Some(Reverse((loss, pos, last))) = queue.pop() {
        if pos == target {
            return Some(loss);
        }
        if loss > best[pos][last] {
            continue;
        }
        for dir in Direction::ALL.into_iter().filter(|&d| axis(d) != last) {
            let mut total = loss;
            for n in 1..=*run.end() {
                let next = pos.step_n(dir, n);
                let Some(&cost) = city.get(next) else {
                    break;
                };
                total += cost;
                if n < *run.start() {
                    continue;
                }
                let slot = &mut best[next][axis(dir)];
                if total < *slot {
                    *slot = total;
                    queue.push(Reverse((total, next, axis(dir))));
                }
            }
        }
    }
    None
}

fn solve_with(city: &Grid<u32>, run: RangeInclusive<i64>) -> Result<String, SolveError> {
    least_heat_loss(city, run)
        .map(|loss| loss.to_string())
        .ok_or_else(|| SolveError::failed("the factory cannot be reached"))
}

impl PartSolver<1> for Solver {
    fn solve(city: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        solve_with(city, 1..=3)
    }
}

impl PartSolver<2> for Solver {
    /// Ultra crucibles move 4 to 10 blocks between turns
    fn solve(city: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        solve_with(city, 4..=10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{solve, try_solve};

    const SAMPLE: &str = "\
2413432311323
3215453535623
3255245654254
3446585845452
4546657867536
1438598798454
4457876987766
3637877979653
4654967986887
4564679986453
1224686865563
2546548887735
4322674655533
";

    #[test]
    fn sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "102");
        assert_eq!(solve::<Solver>(SAMPLE, 2), "94");
    }

    #[test]
    fn ultra_must_run_four() {
        let input = "\
111111111111
999999999991
999999999991
999999999991
999999999991
";
        assert_eq!(solve::<Solver>(input, 2), "71");
    }

    #[test]
    fn too_small_for_ultra() {
        assert!(try_solve::<Solver>("12\n34\n", 2).is_err());
        assert_eq!(solve::<Solver>("12\n34\n", 1), "6");
    }
}
