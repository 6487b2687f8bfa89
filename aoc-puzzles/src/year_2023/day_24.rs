//! Never Tell Me The Odds
//!
//! All arithmetic is exact in `i128`; positions reach the hundreds of
//! trillions, which is past what `f64` represents without rounding.

use crate::utils::text::{lines, numbers};
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use std::ops::RangeInclusive;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 24, tags = ["math", "geometry", "slow"])]
pub struct Solver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hailstone {
    pos: [i128; 3],
    vel: [i128; 3],
}

fn hailstone(line: &str) -> Result<Hailstone, ParseError> {
    match numbers::<i128>(line)?[..] {
        [px, py, pz, vx, vy, vz] => Ok(Hailstone {
            pos: [px, py, pz],
            vel: [vx, vy, vz],
        }),
        _ => Err(ParseError::invalid(format!("bad hailstone {line:?}"))),
    }
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Hailstone>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        lines(input).map(hailstone).collect()
    }
}

/// Where the XY paths of `a` and `b` cross, as `(t_a, t_b, det)` with the
/// crossing at time `t_a / det` for `a` and `t_b / det` for `b`. `None` for
/// parallel paths.
fn crossing(a: [i128; 2], va: [i128; 2], b: [i128; 2], vb: [i128; 2]) -> Option<(i128, i128, i128)> {
    let det = vb[0] * va[1] - va[0] * vb[1];
    if det == 0 {
        return None;
    }
    let (dx, dy) = (b[0] - a[0], b[1] - a[1]);
    Some((vb[0] * dy - vb[1] * dx, va[0] * dy - va[1] * dx, det))
}

fn xy(v: [i128; 3]) -> [i128; 2] {
    [v[0], v[1]]
}

/// Pairs whose future XY paths cross inside the square `area`
fn crossings(stones: &[Hailstone], area: RangeInclusive<i128>) -> usize {
    let (lo, hi) = (*area.start(), *area.end());
    let mut count = 0;
    for (i, a) in stones.iter().enumerate() {
        for b in &stones[i + 1..] {
            let Some((ta, tb, det)) = crossing(xy(a.pos), xy(a.vel), xy(b.pos), xy(b.vel)) else {
                continue;
            };
            // normalize so the denominator is positive
            let (ta, tb, det) = if det < 0 { (-ta, -tb, -det) } else { (ta, tb, det) };
            if ta < 0 || tb < 0 {
                continue;
            }
            let inside = (0..2).all(|k| {
                let at = a.pos[k] * det + ta * a.vel[k];
                lo * det <= at && at <= hi * det
            });
            if inside {
                count += 1;
            }
        }
    }
    count
}

impl PartSolver<1> for Solver {
    fn solve(stones: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(crossings(stones, 200_000_000_000_000..=400_000_000_000_000).to_string())
    }
}

/// Time at which `stone`, seen from a rock moving at `rock` in XY, sits at
/// `point`. `Ok(None)` when it sits still there in XY at every time.
fn arrival(stone: &Hailstone, rock: [i128; 2], point: [i128; 2]) -> Result<Option<i128>, ()> {
    let (ax, ay) = (stone.vel[0] - rock[0], stone.vel[1] - rock[1]);
    let (dx, dy) = (point[0] - stone.pos[0], point[1] - stone.pos[1]);
    if dx * ay != dy * ax {
        return Err(());
    }
    let (d, a) = match (ax, ay) {
        (0, 0) if (dx, dy) == (0, 0) => return Ok(None),
        (0, 0) => return Err(()),
        (0, _) => (dy, ay),
        _ => (dx, ax),
    };
    match (d % a, d / a) {
        (0, t) if t >= 0 => Ok(Some(t)),
        _ => Err(()),
    }
}

/// Rock start position if it can move at `(vx, vy)` in XY and hit every
/// stone at a whole nanosecond
fn throw(stones: &[Hailstone], rock: [i128; 2]) -> Option<[i128; 3]> {
    let (first, rest) = stones.split_first()?;
    let rel = |s: &Hailstone| [s.vel[0] - rock[0], s.vel[1] - rock[1]];

    // every stone's path passes through the rock's start; pin it with the
    // first stone that is not parallel to `first`
    let (t, _, det) = rest
        .iter()
        .find_map(|s| crossing(xy(first.pos), rel(first), xy(s.pos), rel(s)))?;
    if t % det != 0 {
        return None;
    }
    let t = t / det;
    let point = [0, 1].map(|k| first.pos[k] + t * rel(first)[k]);

    let times = stones
        .iter()
        .map(|s| arrival(s, rock, point))
        .collect::<Result<Vec<_>, ()>>()
        .ok()?;

    // two stones hit at different times fix the rock's z velocity
    let timed: Vec<(&Hailstone, i128)> = stones
        .iter()
        .zip(&times)
        .filter_map(|(s, t)| t.map(|t| (s, t)))
        .collect();
    let (&(a, ta), &(b, tb)) = timed
        .iter()
        .flat_map(|x| timed.iter().map(move |y| (x, y)))
        .find(|(x, y)| x.1 < y.1)?;
    let num = b.pos[2] + tb * b.vel[2] - a.pos[2] - ta * a.vel[2];
    if num % (tb - ta) != 0 {
        return None;
    }
    let vz = num / (tb - ta);
    let z = a.pos[2] + ta * (a.vel[2] - vz);

    let hits = stones.iter().zip(&times).all(|(s, t)| match t {
        Some(t) => s.pos[2] + t * (s.vel[2] - vz) == z,
        None => {
            let (gap, closing) = (z - s.pos[2], s.vel[2] - vz);
            if closing == 0 {
                gap == 0
            } else {
                gap % closing == 0 && gap / closing >= 0
            }
        }
    });
    hits.then_some([point[0], point[1], z])
}

/// Rock velocities tried on each axis
const SEARCH: RangeInclusive<i128> = -500..=500;

impl PartSolver<2> for Solver {
    /// Sum of the start coordinates of a rock thrown at an integer velocity
    /// that hits every hailstone
    fn solve(stones: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        for vx in SEARCH {
            for vy in SEARCH {
                if let Some(start) = throw(stones, [vx, vy]) {
                    tracing::debug!(vx, vy, ?start, "rock found");
                    return Ok(start.iter().sum::<i128>().to_string());
                }
            }
        }
        Err(SolveError::failed("no rock velocity hits every hailstone"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solve;

    const SAMPLE: &str = "\
19, 13, 30 @ -2,  1, -2
18, 19, 22 @ -1, -1, -2
20, 25, 34 @ -2, -2, -4
12, 31, 28 @ -1, -2, -1
20, 19, 15 @  1, -5, -3
";

    #[test]
    fn sample() {
        let stones = Solver::parse(SAMPLE).unwrap();
        assert_eq!(crossings(&stones, 7..=27), 2);
        assert_eq!(throw(&stones, [-3, 1]), Some([24, 13, 10]));
        assert_eq!(solve::<Solver>(SAMPLE, 2), "47");
    }

    #[test]
    fn parallel_paths_never_cross() {
        let stones = Solver::parse("0, 0, 0 @ 1, 1, 1\n1, 0, 0 @ 2, 2, 2\n").unwrap();
        assert_eq!(crossings(&stones, 0..=100), 0);
    }

    #[test]
    fn crossing_in_the_past() {
        let stones = Solver::parse("0, 0, 0 @ 1, 0, 0\n5, -5, 0 @ 0, -1, 0\n").unwrap();
        assert_eq!(crossings(&stones, -10..=10), 0);
        let stones = Solver::parse("0, 0, 0 @ 1, 0, 0\n5, -5, 0 @ 0, 1, 0\n").unwrap();
        assert_eq!(crossings(&stones, -10..=10), 1);
    }
}
