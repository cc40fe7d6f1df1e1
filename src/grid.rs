//! The grid shared by the generator and every solver.
//!
//! Cells and the walls between them live in the same grid. Carving moves two
//! cells at a time and opens the cell in between, solving moves one cell at a
//! time.

use derive_more::Display;
use smallvec::SmallVec;
use thiserror::Error;

pub(crate) const MAX_ELEMENTS_DISPLAYED: usize = 80;

pub type CoordIntrinsic = usize;

/// Uniform step cost, also used for heuristic values.
pub type Cost = u32;

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[display("({row},{col})")]
pub struct Coord {
    pub row: CoordIntrinsic,
    pub col: CoordIntrinsic,
}

impl Coord {
    #[inline(always)]
    pub const fn new(row: CoordIntrinsic, col: CoordIntrinsic) -> Self {
        Self { row, col }
    }

    /// Moves `distance` cells towards `direction`, failing on underflow.
    #[inline(always)]
    pub fn step(&self, direction: Direction, distance: usize) -> Option<Coord> {
        let (dr, dc) = direction.delta();
        let distance = distance as isize;
        Some(Coord {
            row: self.row.checked_add_signed(dr * distance)?,
            col: self.col.checked_add_signed(dc * distance)?,
        })
    }

    /// The distance of following straight lines
    #[inline(always)]
    pub fn manhattan_distance(&self, other: &Coord) -> Cost {
        (self.row.abs_diff(other.row) + self.col.abs_diff(other.col)) as Cost
    }

    /// Squared straight-line distance.
    ///
    /// Preserves the ordering of the Euclidean distance without going through
    /// floats.
    #[inline(always)]
    pub fn squared_distance(&self, other: &Coord) -> usize {
        let dr = self.row.abs_diff(other.row);
        let dc = self.col.abs_diff(other.col);
        dr * dr + dc * dc
    }

    #[inline(always)]
    pub fn is_adjacent(&self, other: &Coord) -> bool {
        self.manhattan_distance(other) == 1
    }
}

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
pub enum Direction {
    #[display("→")]
    Right, // col++
    #[display("↓")]
    Down, // row++
    #[display("←")]
    Left, // col--
    #[display("↑")]
    Up, // row--
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    #[inline(always)]
    pub const fn delta(&self) -> (isize, isize) {
        #[rustfmt::skip]
        let d = match self {
            Direction::Right => ( 0,  1),
            Direction::Down  => ( 1,  0),
            Direction::Left  => ( 0, -1),
            Direction::Up    => (-1,  0),
        };
        d
    }
}

#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
pub enum Cell {
    #[display(" ")]
    Open = 0,
    #[display("█")]
    Wall = 1,
    #[display("G")]
    Goal = 2,
    #[display("+")]
    Visited = 3,
}

impl Cell {
    /// Whether a solver may step on this cell.
    #[inline(always)]
    pub fn is_passable(&self) -> bool {
        !matches!(self, Cell::Wall)
    }

    /// Whether carving already reached this cell.
    #[inline(always)]
    pub fn is_carved(&self) -> bool {
        matches!(self, Cell::Open | Cell::Goal)
    }

    /// The integer used by persisted records.
    #[inline(always)]
    pub fn encode(&self) -> u8 {
        *self as u8
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CellParseError {
    #[error("Invalid character '{0}' found.")]
    InvalidCharacter(char),
    #[error("Invalid cell value {0}, expected 0..=3.")]
    InvalidValue(i64),
}

impl std::convert::TryFrom<char> for Cell {
    type Error = CellParseError;

    fn try_from(ch: char) -> Result<Self, Self::Error> {
        match ch {
            ' ' | '.' => Ok(Cell::Open),
            '#' | '█' => Ok(Cell::Wall),
            'G' => Ok(Cell::Goal),
            '+' => Ok(Cell::Visited),
            ch => Err(CellParseError::InvalidCharacter(ch)),
        }
    }
}

impl std::convert::TryFrom<i64> for Cell {
    type Error = CellParseError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Cell::Open),
            1 => Ok(Cell::Wall),
            2 => Ok(Cell::Goal),
            3 => Ok(Cell::Visited),
            v => Err(CellParseError::InvalidValue(v)),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    pub(crate) map: Vec<Vec<Cell>>,
}

impl Grid {
    /// Builds a grid from rows of cells.
    ///
    /// All rows are expected to have the same length.
    pub fn new_from_map(map: Vec<Vec<Cell>>) -> Self {
        debug_assert!(map.windows(2).all(|w| w[0].len() == w[1].len()));
        Self { map }
    }
    pub fn new_filled(rows: usize, cols: usize, cell: Cell) -> Self {
        Self {
            map: vec![vec![cell; cols]; rows],
        }
    }

    /// `(rows, cols)`
    pub fn dimensions(&self) -> (usize, usize) {
        if self.map.is_empty() {
            return (0, 0);
        }
        (self.map.len(), self.map[0].len())
    }

    #[inline(always)]
    pub fn in_bounds(&self, c: &Coord) -> bool {
        let (rows, cols) = self.dimensions();
        c.row < rows && c.col < cols
    }

    /// Reads a cell.
    ///
    /// Panics when out of bounds, use `get` otherwise.
    #[inline(always)]
    pub fn at(&self, c: &Coord) -> Cell {
        debug_assert!(self.in_bounds(c));
        self.map[c.row][c.col]
    }
    #[inline(always)]
    pub fn get(&self, c: &Coord) -> Option<Cell> {
        self.map.get(c.row)?.get(c.col).copied()
    }
    #[inline(always)]
    pub fn set(&mut self, c: &Coord, cell: Cell) {
        debug_assert!(self.in_bounds(c));
        self.map[c.row][c.col] = cell;
    }

    /// Moves from `c` towards `direction` staying within the grid.
    #[inline(always)]
    pub fn step(&self, c: &Coord, direction: Direction, distance: usize) -> Option<Coord> {
        c.step(direction, distance).filter(|n| self.in_bounds(n))
    }

    /// Gets the 4-adjacent in-bounds neighbours that are neither `Wall` nor
    /// `Visited`, in `Direction::ALL` order.
    pub fn neighbours(&self, c: &Coord) -> SmallVec<[(Coord, Direction); 4]> {
        let mut v = SmallVec::new();
        for direction in Direction::ALL {
            if let Some(n) = self.step(c, direction, 1) {
                match self.at(&n) {
                    Cell::Wall | Cell::Visited => {}
                    Cell::Open | Cell::Goal => v.push((n, direction)),
                }
            }
        }
        v
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        self.map.iter().enumerate().flat_map(|(row, line)| {
            line.iter()
                .enumerate()
                .map(move |(col, cell)| (Coord::new(row, col), *cell))
        })
    }

    /// Coordinates holding a given cell.
    pub fn find(&self, cell: Cell) -> impl Iterator<Item = Coord> + '_ {
        self.iter()
            .filter(move |(_, c)| *c == cell)
            .map(|(coord, _)| coord)
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let (rows, cols) = self.dimensions();
        writeln!(f, "Grid({rows}x{cols}):")?;
        for line in self.map.iter().take(MAX_ELEMENTS_DISPLAYED) {
            for cell in line.iter().take(MAX_ELEMENTS_DISPLAYED) {
                write!(f, "{cell}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Grid{:?}", self.dimensions())
    }
}
