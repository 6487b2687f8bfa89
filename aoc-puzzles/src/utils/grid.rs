//! Rectangular character grids

use aoc_core::ParseError;
use std::fmt;
use std::ops::{Add, Index, IndexMut, Mul, Sub};

/// Row/column position. Signed so that stepping off the edge is representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Pos {
    pub row: i64,
    pub col: i64,
}

impl Pos {
    pub const fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }

    pub fn step(self, dir: Direction) -> Self {
        self + dir.delta()
    }

    pub fn step_n(self, dir: Direction, n: i64) -> Self {
        self + dir.delta() * n
    }

    pub fn manhattan(self, other: Pos) -> i64 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    /// Orthogonal neighbours, in `Direction::ALL` order
    pub fn neighbours4(self) -> impl Iterator<Item = Pos> {
        Direction::ALL.into_iter().map(move |d| self.step(d))
    }

    /// Orthogonal and diagonal neighbours
    pub fn neighbours8(self) -> impl Iterator<Item = Pos> {
        (-1..=1)
            .flat_map(|dr| (-1..=1).map(move |dc| Pos::new(dr, dc)))
            .filter(|&d| d != Pos::default())
            .map(move |d| self + d)
    }
}

impl Add for Pos {
    type Output = Pos;

    fn add(self, rhs: Pos) -> Pos {
        Pos::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Pos {
    type Output = Pos;

    fn sub(self, rhs: Pos) -> Pos {
        Pos::new(self.row - rhs.row, self.col - rhs.col)
    }
}

impl Mul<i64> for Pos {
    type Output = Pos;

    fn mul(self, rhs: i64) -> Pos {
        Pos::new(self.row * rhs, self.col * rhs)
    }
}

/// Compass direction on a grid where north is row - 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Clockwise from north
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn delta(self) -> Pos {
        match self {
            Direction::North => Pos::new(-1, 0),
            Direction::East => Pos::new(0, 1),
            Direction::South => Pos::new(1, 0),
            Direction::West => Pos::new(0, -1),
        }
    }

    pub fn turn_right(self) -> Self {
        Self::ALL[(self as usize + 1) % 4]
    }

    pub fn turn_left(self) -> Self {
        Self::ALL[(self as usize + 3) % 4]
    }

    pub fn reverse(self) -> Self {
        Self::ALL[(self as usize + 2) % 4]
    }

    /// `N`/`E`/`S`/`W`, or `U`/`R`/`D`/`L`
    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            'N' | 'U' | '^' => Some(Direction::North),
            'E' | 'R' | '>' => Some(Direction::East),
            'S' | 'D' | 'v' => Some(Direction::South),
            'W' | 'L' | '<' => Some(Direction::West),
            _ => None,
        }
    }
}

/// Row-major rectangular grid
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T> Grid<T> {
    /// Grid filled with `value`
    pub fn new(width: usize, height: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self {
            width,
            height,
            cells: vec![value; width * height],
        }
    }

    /// Parse one cell per character; every non-blank line must have the
    /// same length.
    pub fn parse<F>(input: &str, mut cell: F) -> Result<Self, ParseError>
    where
        F: FnMut(char) -> Result<T, ParseError>,
    {
        let mut width = None;
        let mut height = 0;
        let mut cells = Vec::new();

        for line in super::text::lines(input) {
            let before = cells.len();
            for c in line.chars() {
                cells.push(cell(c)?);
            }
            let len = cells.len() - before;
            match width {
                None => width = Some(len),
                Some(w) if w != len => {
                    return Err(ParseError::invalid(format!(
                        "row {} has {len} cells, expected {w}",
                        height + 1
                    )));
                }
                Some(_) => {}
            }
            height += 1;
        }

        let width = width.ok_or_else(|| ParseError::missing("empty grid"))?;
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, pos: Pos) -> bool {
        (0..self.height as i64).contains(&pos.row) && (0..self.width as i64).contains(&pos.col)
    }

    fn offset(&self, pos: Pos) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.row as usize * self.width + pos.col as usize)
    }

    pub fn get(&self, pos: Pos) -> Option<&T> {
        self.offset(pos).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, pos: Pos) -> Option<&mut T> {
        self.offset(pos).map(|i| &mut self.cells[i])
    }

    /// Cell at `pos` wrapped onto an infinite tiling of this grid
    pub fn get_wrapped(&self, pos: Pos) -> &T {
        let row = pos.row.rem_euclid(self.height as i64);
        let col = pos.col.rem_euclid(self.width as i64);
        &self[Pos::new(row, col)]
    }

    /// Every position in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Pos> + use<T> {
        let width = self.width as i64;
        (0..self.height as i64).flat_map(move |row| (0..width).map(move |col| Pos::new(row, col)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Pos, &T)> {
        self.positions().zip(self.cells.iter())
    }

    pub fn find(&self, mut pred: impl FnMut(&T) -> bool) -> Option<Pos> {
        self.iter().find(|(_, v)| pred(v)).map(|(p, _)| p)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.width)
    }

    pub fn row(&self, row: usize) -> &[T] {
        &self.cells[row * self.width..(row + 1) * self.width]
    }

    pub fn column(&self, col: usize) -> impl Iterator<Item = &T> {
        self.cells.iter().skip(col).step_by(self.width)
    }

    /// In-bounds orthogonal neighbours
    pub fn neighbours4(&self, pos: Pos) -> impl Iterator<Item = Pos> + '_ {
        pos.neighbours4().filter(|&p| self.contains(p))
    }

    /// In-bounds orthogonal and diagonal neighbours
    pub fn neighbours8(&self, pos: Pos) -> impl Iterator<Item = Pos> + '_ {
        pos.neighbours8().filter(|&p| self.contains(p))
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(f).collect(),
        }
    }

    /// Rows become columns
    pub fn transpose(&self) -> Self
    where
        T: Clone,
    {
        let cells = (0..self.width)
            .flat_map(|col| self.column(col).cloned())
            .collect();
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }

    /// Quarter turn clockwise
    pub fn rotate_clockwise(&self) -> Self
    where
        T: Clone,
    {
        let cells = (0..self.width)
            .flat_map(|col| (0..self.height).rev().map(move |row| (row, col)))
            .map(|(row, col)| self.cells[row * self.width + col].clone())
            .collect();
        Self {
            width: self.height,
            height: self.width,
            cells,
        }
    }

    /// Mirror left to right
    pub fn flip_horizontal(&self) -> Self
    where
        T: Clone,
    {
        let cells = self
            .rows()
            .flat_map(|row| row.iter().rev().cloned())
            .collect();
        Self {
            width: self.width,
            height: self.height,
            cells,
        }
    }
}

impl Grid<char> {
    /// Plain character grid
    pub fn from_chars(input: &str) -> Result<Self, ParseError> {
        Self::parse(input, Ok)
    }
}

impl<T> Index<Pos> for Grid<T> {
    type Output = T;

    fn index(&self, pos: Pos) -> &T {
        match self.offset(pos) {
            Some(i) => &self.cells[i],
            None => panic!("{pos:?} outside {}x{} grid", self.width, self.height),
        }
    }
}

impl<T> IndexMut<Pos> for Grid<T> {
    fn index_mut(&mut self, pos: Pos) -> &mut T {
        match self.offset(pos) {
            Some(i) => &mut self.cells[i],
            None => panic!("{pos:?} outside {}x{} grid", self.width, self.height),
        }
    }
}

impl fmt::Display for Grid<char> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            writeln!(f, "{}", row.iter().collect::<String>())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample() -> Grid<char> {
        Grid::from_chars("abc\ndef\n").unwrap()
    }

    #[test]
    fn ragged_rows_are_rejected() {
        assert!(matches!(
            Grid::from_chars("abc\nde\n"),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(Grid::from_chars("\n"), Err(ParseError::MissingData(_))));
    }

    #[test]
    fn access_is_bounds_checked() {
        let grid = sample();
        assert_eq!((grid.width(), grid.height()), (3, 2));
        assert_eq!(grid.get(Pos::new(1, 2)), Some(&'f'));
        assert_eq!(grid.get(Pos::new(2, 0)), None);
        assert_eq!(grid.get(Pos::new(0, -1)), None);
        assert_eq!(*grid.get_wrapped(Pos::new(-1, 4)), 'e');
        assert_eq!(grid.neighbours4(Pos::new(0, 0)).count(), 2);
        assert_eq!(grid.neighbours8(Pos::new(0, 1)).count(), 5);
    }

    #[test]
    fn transpose_and_rotate() {
        let grid = sample();
        assert_eq!(grid.transpose().to_string(), "ad\nbe\ncf\n");
        assert_eq!(grid.rotate_clockwise().to_string(), "da\neb\nfc\n");
        assert_eq!(grid.flip_horizontal().to_string(), "cba\nfed\n");
        assert_eq!(grid.column(1).collect::<String>(), "be");
    }

    #[test]
    fn turns_cycle_through_all_directions() {
        let mut d = Direction::North;
        for expected in [Direction::East, Direction::South, Direction::West, Direction::North] {
            d = d.turn_right();
            assert_eq!(d, expected);
        }
        assert_eq!(Direction::East.turn_left(), Direction::North);
        assert_eq!(Direction::West.reverse(), Direction::East);
        assert_eq!(Pos::new(2, 2).step_n(Direction::West, 3), Pos::new(2, -1));
    }

    proptest! {
        #[test]
        fn four_rotations_are_identity(width in 1usize..6, height in 1usize..6, seed in any::<u32>()) {
            let text: String = (0..height)
                .map(|r| {
                    (0..width)
                        .map(|c| char::from(b'a' + ((seed as usize + r * 7 + c * 3) % 26) as u8))
                        .collect::<String>()
                        + "\n"
                })
                .collect();
            let grid = Grid::from_chars(&text).unwrap();
            let spun = grid
                .rotate_clockwise()
                .rotate_clockwise()
                .rotate_clockwise()
                .rotate_clockwise();
            prop_assert_eq!(&spun, &grid);
            prop_assert_eq!(&grid.transpose().transpose(), &grid);
        }
    }
}
