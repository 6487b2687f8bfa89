//! Jurassic Jigsaw
//!
//! Every border is shared by at most two tiles, so each step of the
//! assembly has a single tile whose edge fits. Tiles are matched on an
//! orientation-free key of their edge pattern and then tried in all eight
//! orientations.

use crate::utils::grid::{Grid, Pos};
use crate::utils::text::{paragraphs, parse_num};
use aoc_core::{AocParser, AocSolver, AutoRegisterSolver, ParseError, PartSolver, SolveError};
use std::collections::HashMap;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2020, day = 20, tags = ["grid", "search"])]
pub struct Solver;

const MONSTER: [&str; 3] = [
    "                  # ",
    "#    ##    ##    ###",
    " #  #  #  #  #  #   ",
];

pub struct Tile {
    id: u64,
    image: Grid<bool>,
}

fn pixel(c: char) -> Result<bool, ParseError> {
    match c {
        '#' => Ok(true),
        '.' => Ok(false),
        other => Err(ParseError::invalid(format!("unexpected {other:?} in tile"))),
    }
}

/// `Tile 2311:` followed by its rows
fn tile(group: &[&str]) -> Result<Tile, ParseError> {
    let id = group[0]
        .strip_prefix("Tile ")
        .and_then(|rest| rest.strip_suffix(':'))
        .ok_or_else(|| ParseError::invalid(format!("bad tile header {:?}", group[0])))?;
    Ok(Tile {
        id: parse_num(id)?,
        image: Grid::parse(&group[1..].join("\n"), pixel)?,
    })
}

impl AocParser for Solver {
    type SharedData<'a> = Vec<Tile>;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let tiles = paragraphs(input)
            .iter()
            .map(|group| tile(group))
            .collect::<Result<Vec<_>, _>>()?;

        let size = tiles.first().map_or(0, |t| t.image.width());
        if let Some(odd) = tiles
            .iter()
            .find(|t| t.image.width() != size || t.image.height() != size || size < 3)
        {
            return Err(ParseError::invalid(format!(
                "tile {} is not a {size}x{size} square",
                odd.id
            )));
        }
        Ok(tiles)
    }
}

/// The four rotations of `grid` and of its mirror image
fn orientations<T: Clone>(grid: &Grid<T>) -> Vec<Grid<T>> {
    let mut all = Vec::with_capacity(8);
    for start in [grid.clone(), grid.flip_horizontal()] {
        let mut current = start;
        for _ in 0..4 {
            let next = current.rotate_clockwise();
            all.push(current);
            current = next;
        }
    }
    all
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

/// Border cells, top to bottom or left to right
fn edge(grid: &Grid<bool>, side: Side) -> Vec<bool> {
    match side {
        Side::Top => grid.row(0).to_vec(),
        Side::Bottom => grid.row(grid.height() - 1).to_vec(),
        Side::Left => grid.column(0).copied().collect(),
        Side::Right => grid.column(grid.width() - 1).copied().collect(),
    }
}

/// Same key whichever way round the edge is read
fn edge_key(cells: &[bool]) -> u64 {
    let forward = cells.iter().fold(0, |acc, &b| acc << 1 | u64::from(b));
    let backward = cells.iter().rev().fold(0, |acc, &b| acc << 1 | u64::from(b));
    forward.min(backward)
}

struct Jigsaw<'t> {
    tiles: &'t [Tile],
    /// Edge key to the tiles carrying it
    by_edge: HashMap<u64, Vec<usize>>,
}

impl<'t> Jigsaw<'t> {
    fn new(tiles: &'t [Tile]) -> Self {
        let mut by_edge: HashMap<u64, Vec<usize>> = HashMap::new();
        for (i, tile) in tiles.iter().enumerate() {
            for side in [Side::Top, Side::Right, Side::Bottom, Side::Left] {
                by_edge
                    .entry(edge_key(&edge(&tile.image, side)))
                    .or_default()
                    .push(i);
            }
        }
        Self { tiles, by_edge }
    }

    /// No other tile shares this edge
    fn is_outer(&self, cells: &[bool]) -> bool {
        self.by_edge.get(&edge_key(cells)).is_none_or(|owners| owners.len() == 1)
    }

    fn corners(&self) -> Result<Vec<usize>, SolveError> {
        let corners: Vec<usize> = self
            .tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| {
                [Side::Top, Side::Right, Side::Bottom, Side::Left]
                    .into_iter()
                    .filter(|&side| self.is_outer(&edge(&tile.image, side)))
                    .count()
                    == 2
            })
            .map(|(i, _)| i)
            .collect();
        if corners.len() != 4 {
            return Err(SolveError::failed(format!(
                "found {} corner tiles, expected 4",
                corners.len()
            )));
        }
        Ok(corners)
    }

    /// Oriented tiles in row-major order, `side` tiles per row
    fn assemble(&self) -> Result<(usize, Vec<Grid<bool>>), SolveError> {
        let count = self.tiles.len();
        let side = (1..=count)
            .find(|n| n * n >= count)
            .filter(|n| n * n == count)
            .ok_or_else(|| SolveError::failed(format!("{count} tiles do not form a square")))?;

        let corner = self.corners()?[0];
        let first = orientations(&self.tiles[corner].image)
            .into_iter()
            .find(|g| self.is_outer(&edge(g, Side::Top)) && self.is_outer(&edge(g, Side::Left)))
            .ok_or_else(|| SolveError::failed("corner tile cannot face outwards"))?;

        let mut used = vec![false; count];
        used[corner] = true;
        let mut placed = vec![first];

        for i in 1..count {
            let (row, col) = (i / side, i % side);
            let (want, facing) = if col > 0 {
                (edge(&placed[i - 1], Side::Right), Side::Left)
            } else {
                (edge(&placed[i - side], Side::Bottom), Side::Top)
            };
            let above = (col > 0 && row > 0).then(|| edge(&placed[i - side], Side::Bottom));

            let owners = self.by_edge.get(&edge_key(&want)).map_or(&[][..], Vec::as_slice);
            let (tile, oriented) = owners
                .iter()
                .filter(|&&t| !used[t])
                .find_map(|&t| {
                    orientations(&self.tiles[t].image)
                        .into_iter()
                        .find(|g| {
                            edge(g, facing) == want
                                && above.as_ref().is_none_or(|a| edge(g, Side::Top) == *a)
                        })
                        .map(|g| (t, g))
                })
                .ok_or_else(|| SolveError::failed(format!("no tile fits at row {row}, column {col}")))?;

            used[tile] = true;
            placed.push(oriented);
        }
        Ok((side, placed))
    }
}

/// Assembled picture with every tile border removed
fn stitch(side: usize, placed: &[Grid<bool>]) -> Grid<bool> {
    let size = placed[0].width() as i64;
    let inner = size - 2;
    let mut image = Grid::new(side * inner as usize, side * inner as usize, false);
    for (i, tile) in placed.iter().enumerate() {
        let origin = Pos::new((i / side) as i64 * inner, (i % side) as i64 * inner);
        for (pos, &set) in tile.iter() {
            let interior = (1..size - 1).contains(&pos.row) && (1..size - 1).contains(&pos.col);
            if interior {
                image[origin + pos - Pos::new(1, 1)] = set;
            }
        }
    }
    image
}

fn monster_shape() -> Vec<Pos> {
    MONSTER
        .iter()
        .enumerate()
        .flat_map(|(row, line)| {
            line.chars()
                .enumerate()
                .filter(|&(_, c)| c == '#')
                .map(move |(col, _)| Pos::new(row as i64, col as i64))
        })
        .collect()
}

/// Set pixels outside any sea monster, in the orientation that shows them
fn roughness(image: &Grid<bool>) -> Option<usize> {
    let shape = monster_shape();
    for view in orientations(image) {
        let mut marked = Grid::new(view.width(), view.height(), false);
        let mut found = 0;
        for origin in view.positions() {
            if shape.iter().all(|&d| view.get(origin + d) == Some(&true)) {
                found += 1;
                for &d in &shape {
                    marked[origin + d] = true;
                }
            }
        }
        if found > 0 {
            tracing::debug!(monsters = found, "sea monsters located");
            return Some(view.iter().filter(|&(p, &set)| set && !marked[p]).count());
        }
    }
    None
}

impl PartSolver<1> for Solver {
    fn solve(tiles: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let jigsaw = Jigsaw::new(tiles);
        let product: u64 = jigsaw.corners()?.iter().map(|&i| tiles[i].id).product();
        Ok(product.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(tiles: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let (side, placed) = Jigsaw::new(tiles).assemble()?;
        roughness(&stitch(side, &placed))
            .map(|n| n.to_string())
            .ok_or_else(|| SolveError::failed("no sea monsters in any orientation"))
    }
}
