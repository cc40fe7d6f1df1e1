//! The single-line, comma separated maze record.
//!
//! ```text
//! start_row,start_col,goal_row,goal_col,n,<row 0 cells>,n,<row 1 cells>,n,...,n
//! ```
//!
//! `n` ends the header and every row. Cells are written as integers
//! (`Open=0`, `Wall=1`, `Goal=2`, `Visited=3`).

use std::path::Path;

use thiserror::Error;

use crate::grid::Cell;
use crate::grid::CellParseError;
use crate::grid::Coord;
use crate::grid::Grid;
use crate::maze::Maze;

/// Ends the header and every row.
pub const ROW_SEPARATOR: &str = "n";
const HEADER_LEN: usize = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MalformedRecord {
    #[error("Empty record")]
    Empty,
    #[error("Header has {found} values, expected 4")]
    TruncatedHeader { found: usize },
    #[error("Invalid integer '{token}' at position {position}")]
    InvalidInteger { token: String, position: usize },
    #[error("Missing 'n' after the header")]
    MissingHeaderSeparator,
    #[error("Missing 'n' after row {row}")]
    MissingRowSeparator { row: usize },
    #[error("Row {row} is empty")]
    EmptyRow { row: usize },
    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("No rows")]
    EmptyGrid,
    #[error("Invalid cell at ({row},{col}): {e}")]
    InvalidCell {
        e: CellParseError,
        row: usize,
        col: usize,
    },
    #[error("The {what} {at} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        what: &'static str,
        at: Coord,
        rows: usize,
        cols: usize,
    },
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Malformed record in '{p}': {e}")]
    MalformedFile {
        p: std::path::PathBuf,
        e: MalformedRecord,
    },
    #[error("I/O error when accessing '{p}': {e}")]
    IOError {
        p: std::path::PathBuf,
        e: std::io::Error,
    },
}

/// Writes a maze as a record.
pub fn encode(maze: &Maze) -> String {
    let (start, goal) = (maze.start(), maze.goal());
    let mut tokens: Vec<String> = vec![
        start.row.to_string(),
        start.col.to_string(),
        goal.row.to_string(),
        goal.col.to_string(),
        ROW_SEPARATOR.to_string(),
    ];
    for line in &maze.grid().map {
        tokens.extend(line.iter().map(|cell| cell.encode().to_string()));
        tokens.push(ROW_SEPARATOR.to_string());
    }
    tokens.join(",")
}

fn parse_usize(token: &str, position: usize) -> Result<usize, MalformedRecord> {
    token
        .parse::<usize>()
        .map_err(|_| MalformedRecord::InvalidInteger {
            token: token.to_string(),
            position,
        })
}

/// Reads a record.
///
/// Surrounding whitespace and a trailing comma are accepted.
pub fn decode(s: &str) -> Result<Maze, MalformedRecord> {
    let s = s.trim();
    if s.is_empty() {
        return Err(MalformedRecord::Empty);
    }

    let mut tokens: Vec<&str> = s.split(',').map(str::trim).collect();
    if tokens.last() == Some(&"") {
        tokens.pop();
    }

    let header: Vec<&str> = tokens
        .iter()
        .take(HEADER_LEN)
        .take_while(|t| **t != ROW_SEPARATOR)
        .copied()
        .collect();
    if header.len() < HEADER_LEN {
        return Err(MalformedRecord::TruncatedHeader {
            found: header.len(),
        });
    }
    let mut header_values = [0usize; HEADER_LEN];
    for (position, token) in header.iter().enumerate() {
        header_values[position] = parse_usize(token, position)?;
    }
    let [start_row, start_col, goal_row, goal_col] = header_values;

    if tokens.get(HEADER_LEN) != Some(&ROW_SEPARATOR) {
        return Err(MalformedRecord::MissingHeaderSeparator);
    }

    let mut map: Vec<Vec<Cell>> = vec![];
    let mut line: Vec<Cell> = vec![];
    for (position, token) in tokens.iter().enumerate().skip(HEADER_LEN + 1) {
        let row = map.len();
        if *token == ROW_SEPARATOR {
            if line.is_empty() {
                return Err(MalformedRecord::EmptyRow { row });
            }
            if let Some(first) = map.first() {
                if first.len() != line.len() {
                    return Err(MalformedRecord::RaggedRow {
                        row,
                        expected: first.len(),
                        found: line.len(),
                    });
                }
            }
            map.push(std::mem::take(&mut line));
            continue;
        }

        let col = line.len();
        let value = token
            .parse::<i64>()
            .map_err(|_| MalformedRecord::InvalidInteger {
                token: token.to_string(),
                position,
            })?;
        let cell =
            Cell::try_from(value).map_err(|e| MalformedRecord::InvalidCell { e, row, col })?;
        line.push(cell);
    }
    if !line.is_empty() {
        return Err(MalformedRecord::MissingRowSeparator { row: map.len() });
    }
    if map.is_empty() {
        return Err(MalformedRecord::EmptyGrid);
    }

    let grid = Grid::new_from_map(map);
    let (rows, cols) = grid.dimensions();
    let start = Coord::new(start_row, start_col);
    let goal = Coord::new(goal_row, goal_col);
    for (what, at) in [("start", start), ("goal", goal)] {
        if !grid.in_bounds(&at) {
            return Err(MalformedRecord::OutOfBounds {
                what,
                at,
                rows,
                cols,
            });
        }
    }

    Ok(Maze::new(grid, start, goal))
}

/// Saves a maze record to a file.
pub fn save(p: &Path, maze: &Maze) -> Result<(), RecordError> {
    std::fs::write(p, encode(maze) + "\n").map_err(|e| RecordError::IOError {
        p: p.to_path_buf(),
        e,
    })?;
    log::debug!("Saved {:?} maze to {p:?}", maze.dimensions());
    Ok(())
}

/// Loads a maze record from a file.
pub fn load(p: &Path) -> Result<Maze, RecordError> {
    let s = std::fs::read_to_string(p).map_err(|e| RecordError::IOError {
        p: p.to_path_buf(),
        e,
    })?;
    let maze = decode(&s).map_err(|e| RecordError::MalformedFile {
        p: p.to_path_buf(),
        e,
    })?;
    log::debug!("Loaded {:?} maze from {p:?}", maze.dimensions());
    Ok(maze)
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    use super::*;
    use crate::generator::generate;

    fn small_maze() -> Maze {
        Maze::try_from(indoc! {"
            S.#
            #.G
        "})
        .unwrap()
    }

    #[test]
    fn encodes() {
        assert_eq!(encode(&small_maze()), "0,0,1,2,n,0,0,1,n,1,0,2,n");
    }

    #[test]
    fn decodes() {
        assert_eq!(decode("0,0,1,2,n,0,0,1,n,1,0,2,n"), Ok(small_maze()));
        // As written by older tools, with a trailing comma.
        assert_eq!(decode("0,0,1,2,n,0,0,1,n,1,0,2,n,\n"), Ok(small_maze()));
    }

    #[test]
    fn generated_mazes_round_trip() {
        for seed in 0..32u64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let rows = 3 + 2 * (seed as usize % 6);
            let cols = 2 + seed as usize % 13;
            let maze = generate(rows, cols, &mut rng).unwrap();
            assert_eq!(decode(&encode(&maze)), Ok(maze));
        }
    }

    #[test]
    fn missing_row_separator() {
        assert_eq!(
            decode("0,0,1,2,n,0,0,1,n,1,0,2"),
            Err(MalformedRecord::MissingRowSeparator { row: 1 })
        );
    }

    #[test]
    fn malformed_records() {
        assert_eq!(decode("  "), Err(MalformedRecord::Empty));
        assert_eq!(
            decode("0,0,1,n,0,n"),
            Err(MalformedRecord::TruncatedHeader { found: 3 })
        );
        assert_eq!(
            decode("0,x,1,2,n,0,n"),
            Err(MalformedRecord::InvalidInteger {
                token: "x".to_string(),
                position: 1
            })
        );
        assert_eq!(
            decode("0,-1,0,0,n,2,n"),
            Err(MalformedRecord::InvalidInteger {
                token: "-1".to_string(),
                position: 1
            })
        );
        assert_eq!(
            decode("0,0,0,0,2,n"),
            Err(MalformedRecord::MissingHeaderSeparator)
        );
        assert_eq!(decode("0,0,0,0,n"), Err(MalformedRecord::EmptyGrid));
        assert_eq!(
            decode("0,0,0,0,n,2,n,n"),
            Err(MalformedRecord::EmptyRow { row: 1 })
        );
        assert_eq!(
            decode("0,0,0,0,n,2,0,n,1,n"),
            Err(MalformedRecord::RaggedRow {
                row: 1,
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            decode("0,0,0,0,n,2,7,n"),
            Err(MalformedRecord::InvalidCell {
                e: CellParseError::InvalidValue(7),
                row: 0,
                col: 1
            })
        );
        assert_eq!(
            decode("0,0,0,5,n,2,0,n"),
            Err(MalformedRecord::OutOfBounds {
                what: "goal",
                at: Coord::new(0, 5),
                rows: 1,
                cols: 2
            })
        );
    }

    #[test]
    fn files_round_trip() {
        let p = std::env::temp_dir().join(format!("maze-record-{}.csv", std::process::id()));
        let maze = small_maze();
        save(&p, &maze).unwrap();
        let loaded = load(&p).unwrap();
        std::fs::remove_file(&p).unwrap();
        assert_eq!(loaded, maze);

        match load(&p) {
            Err(RecordError::IOError { p: missing, .. }) => assert_eq!(missing, p),
            other => panic!("Expected an I/O error, got {other:?}"),
        }
    }

    #[test]
    fn file_errors_name_the_file() {
        let p = std::env::temp_dir().join(format!("maze-bad-{}.csv", std::process::id()));
        std::fs::write(&p, "0,0,0,0,n,2").unwrap();
        let err = load(&p).unwrap_err();
        std::fs::remove_file(&p).unwrap();

        match err {
            RecordError::MalformedFile { e, .. } => {
                assert_eq!(e, MalformedRecord::MissingRowSeparator { row: 0 })
            }
            other => panic!("Expected a malformed record, got {other:?}"),
        }
    }
}
