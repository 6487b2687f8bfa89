//! The Floor Will Be Lava

use crate::utils::grid::{Direction, Grid, Pos};
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 16, tags = ["grid", "bfs"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Grid<char>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        Grid::parse(input, |c| match c {
            '.' | '/' | '\\' | '|' | '-' => Ok(c),
            _ => Err(ParseError::invalid(format!("unexpected {c:?}"))),
        })
    }
}

/// Directions a beam leaves `tile` in after entering it heading `dir`
fn bounce(tile: char, dir: Direction) -> ([Direction; 2], usize) {
    use Direction::*;
    match (tile, dir) {
        ('/', North) | ('\\', South) => ([East, East], 1),
        ('/', East) | ('\\', West) => ([North, North], 1),
        ('/', South) | ('\\', North) => ([West, West], 1),
        ('/', West) | ('\\', East) => ([South, South], 1),
        ('|', East | West) => ([North, South], 2),
        ('-', North | South) => ([East, West], 2),
        _ => ([dir, dir], 1),
    }
}

/// Tiles crossed by a beam entering at `start` heading `dir`
fn energized(layout: &Grid<char>, start: Pos, dir: Direction) -> usize {
    let mut seen: Grid<u8> = Grid::new(layout.width(), layout.height(), 0);
    let mut beams = vec![(start, dir)];
    while let Some((pos, dir)) = beams.pop() {
        let Some(mask) = seen.get_mut(pos) else {
            continue;
        };
        let bit = 1 << dir as u8;
        if *mask & bit != 0 {
            continue;
        }
        *mask |= bit;
        let (out, n) = bounce(layout[pos], dir);
        beams.extend(out[..n].iter().map(|&d| (pos.step(d), d)));
    }
    seen.iter().filter(|&(_, &m)| m != 0).count()
}

impl PartSolver<1> for Solver {
    fn solve(layout: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(energized(layout, Pos::new(0, 0), Direction::East).to_string())
    }
}

impl PartSolver<2> for Solver {
    /// Best beam entering from any edge tile
    fn solve(layout: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (w, h) = (layout.width() as i64, layout.height() as i64);
        let rows = (0..h).flat_map(|r| {
            [
                (Pos::new(r, 0), Direction::East),
                (Pos::new(r, w - 1), Direction::West),
            ]
        });
        let cols = (0..w).flat_map(|c| {
            [
                (Pos::new(0, c), Direction::South),
                (Pos::new(h - 1, c), Direction::North),
            ]
        });
        let best = rows
            .chain(cols)
            .map(|(pos, dir)| energized(layout, pos, dir))
            .max()
            .unwrap_or_default();
        Ok(best.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::solve;

    const SAMPLE: &str = r".|...\....
|.-.\.....
.....|-...
........|.
..........
.........\
..../.\\..
.-.-/..|..
.|....-|.\
..//.|....
";

    #[test]
    fn sample() {
        assert_eq!(solve::<Solver>(SAMPLE, 1), "46");
        assert_eq!(solve::<Solver>(SAMPLE, 2), "51");
    }

    #[test]
    fn beam_loops_terminate() {
        let layout = Solver::parse("/-\\\n\\-/\n").unwrap();
        assert_eq!(energized(&layout, Pos::new(0, 0), Direction::East), 1);
        assert_eq!(energized(&layout, Pos::new(0, 1), Direction::East), 6);
    }
}
