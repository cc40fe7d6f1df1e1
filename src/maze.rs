use thiserror::Error;

use crate::grid::Cell;
use crate::grid::CellParseError;
use crate::grid::Coord;
use crate::grid::Grid;
use crate::grid::MAX_ELEMENTS_DISPLAYED;

/// A grid together with where to start and where to go.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    pub(crate) grid: Grid,
    pub(crate) start: Coord,
    pub(crate) goal: Coord,
}

impl Maze {
    pub fn new(grid: Grid, start: Coord, goal: Coord) -> Self {
        Self { grid, start, goal }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }
    pub fn start(&self) -> Coord {
        self.start
    }
    pub fn goal(&self) -> Coord {
        self.goal
    }

    pub fn dimensions(&self) -> (usize, usize) {
        self.grid.dimensions()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MazeParseError {
    #[error("Empty input")]
    EmptyInput,
    #[error("Invalid cell {e} found at ({row},{col})")]
    InvalidCell {
        e: CellParseError,
        row: usize,
        col: usize,
    },
    #[error("Line {row} has {found} cells, expected {expected}")]
    RaggedLine {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("No start ('S' or '!') found")]
    MissingStart,
    #[error("No goal ('G' or '!') found")]
    MissingGoal,
    #[error("More than one {what} found, the second one at {at}")]
    Duplicated { what: &'static str, at: Coord },
}

impl std::convert::TryFrom<&str> for Maze {
    type Error = MazeParseError;

    /// Parses ASCII art.
    ///
    /// `#` walls, ` `/`.` open cells, `S` the start, `G` the goal, `!` a start
    /// sitting on the goal and `+` visited cells.
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let lines: Vec<&str> = s.lines().collect();

        if lines.is_empty() || lines[0].is_empty() {
            return Err(MazeParseError::EmptyInput);
        }

        let cols = lines[0].chars().count();
        let mut map = Vec::with_capacity(lines.len());
        let mut start: Option<Coord> = None;
        let mut goal: Option<Coord> = None;

        let place = |slot: &mut Option<Coord>, what: &'static str, at: Coord| {
            if slot.is_some() {
                return Err(MazeParseError::Duplicated { what, at });
            }
            *slot = Some(at);
            Ok(())
        };

        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(MazeParseError::RaggedLine {
                    row,
                    expected: cols,
                    found,
                });
            }

            let mut cells = Vec::with_capacity(cols);
            for (col, ch) in line.chars().enumerate() {
                let at = Coord::new(row, col);
                let cell = match ch {
                    'S' => {
                        place(&mut start, "start", at)?;
                        Cell::Open
                    }
                    'G' => {
                        place(&mut goal, "goal", at)?;
                        Cell::Goal
                    }
                    '!' => {
                        place(&mut start, "start", at)?;
                        place(&mut goal, "goal", at)?;
                        Cell::Goal
                    }
                    ch => Cell::try_from(ch)
                        .map_err(|e| MazeParseError::InvalidCell { e, row, col })?,
                };
                cells.push(cell);
            }
            map.push(cells);
        }

        let start = start.ok_or(MazeParseError::MissingStart)?;
        let goal = goal.ok_or(MazeParseError::MissingGoal)?;

        Ok(Maze::new(Grid::new_from_map(map), start, goal))
    }
}

impl std::fmt::Display for Maze {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let (rows, cols) = self.grid.dimensions();
        writeln!(
            f,
            "Maze({}x{}) (s:{}, g:{}):",
            rows, cols, self.start, self.goal
        )?;
        for (row, line) in self.grid.map.iter().enumerate().take(MAX_ELEMENTS_DISPLAYED) {
            for (col, cell) in line.iter().enumerate().take(MAX_ELEMENTS_DISPLAYED) {
                let c = Coord::new(row, col);
                let is_start = c == self.start;
                let is_goal = c == self.goal;

                match (is_start, is_goal) {
                    (true, true) => {
                        write!(f, "!")?;
                    }
                    (true, false) => {
                        write!(f, "S")?;
                    }
                    (false, true) => {
                        write!(f, "G")?;
                    }
                    (false, false) => {
                        write!(f, "{cell}")?;
                    }
                }
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;

    #[test]
    fn parse_ascii() {
        let maze = Maze::try_from(indoc! {"
            S.#
            #.#
            #.G
        "})
        .unwrap();

        assert_eq!(maze.dimensions(), (3, 3));
        assert_eq!(maze.start(), Coord::new(0, 0));
        assert_eq!(maze.goal(), Coord::new(2, 2));
        assert_eq!(maze.grid().at(&Coord::new(0, 0)), Cell::Open);
        assert_eq!(maze.grid().at(&Coord::new(0, 2)), Cell::Wall);
        assert_eq!(maze.grid().at(&Coord::new(2, 2)), Cell::Goal);
    }

    #[test]
    fn start_on_goal() {
        let maze = Maze::try_from("#!#").unwrap();
        assert_eq!(maze.start(), maze.goal());
        assert_eq!(maze.grid().at(&maze.goal()), Cell::Goal);
    }

    #[test]
    fn parse_errors() {
        assert_eq!(Maze::try_from(""), Err(MazeParseError::EmptyInput));
        assert_eq!(
            Maze::try_from("S.\nG"),
            Err(MazeParseError::RaggedLine {
                row: 1,
                expected: 2,
                found: 1
            })
        );
        assert_eq!(Maze::try_from("..G"), Err(MazeParseError::MissingStart));
        assert_eq!(Maze::try_from("S.."), Err(MazeParseError::MissingGoal));
        assert_eq!(
            Maze::try_from("SGS"),
            Err(MazeParseError::Duplicated {
                what: "start",
                at: Coord::new(0, 2)
            })
        );
        assert_eq!(
            Maze::try_from("SxG"),
            Err(MazeParseError::InvalidCell {
                e: CellParseError::InvalidCharacter('x'),
                row: 0,
                col: 1
            })
        );
    }

    #[test]
    fn display_marks_endpoints() {
        let maze = Maze::try_from("S#G").unwrap();
        let rendered = maze.to_string();
        assert!(rendered.starts_with("Maze(1x3) (s:(0,0), g:(0,2)):"));
        assert!(rendered.ends_with("S█G\n"));
    }
}
