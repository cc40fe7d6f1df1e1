//! Randomized depth-first maze carving.
//!
//! Even coordinates (counted from the seed) are cells, everything in between
//! starts as a wall. Carving walks two cells at a time and opens the wall it
//! jumps over, so the carved cells form a spanning tree.

use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;

use crate::grid::Cell;
use crate::grid::Coord;
use crate::grid::Direction;
use crate::grid::Grid;
use crate::maze::Maze;

/// Maximum resampling attempts per axis when looking for an even seed.
pub const SEED_MAX_TRIES: usize = 10_000;

/// Distance between two carved cells.
const CARVE_STEP: usize = 2;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerateError {
    #[error("Invalid dimensions {rows}x{cols}: need at least two cells at even coordinates")]
    InvalidDimensions { rows: usize, cols: usize },
    #[error("No even seed coordinate found after {tries} tries")]
    SeedNotFound { tries: usize },
}

/// Number of coordinates in `0..n` that are even.
#[inline(always)]
fn even_coordinates(n: usize) -> usize {
    n.div_ceil(2)
}

/// Picks a uniformly random even coordinate in `0..n` by resampling.
fn sample_even<R: Rng>(r: &mut R, n: usize) -> Result<usize, GenerateError> {
    for _tries in 0..SEED_MAX_TRIES {
        let x = r.random_range(0..n);
        if x % 2 == 0 {
            return Ok(x);
        }
    }
    Err(GenerateError::SeedNotFound {
        tries: SEED_MAX_TRIES,
    })
}

/// Carves a `rows`x`cols` maze.
///
/// The goal is the random seed of the carving, the start is the carved cell
/// farthest away from it in a straight line (first found wins ties).
pub fn generate<R: Rng>(rows: usize, cols: usize, r: &mut R) -> Result<Maze, GenerateError> {
    if rows == 0 || cols == 0 || even_coordinates(rows) * even_coordinates(cols) < 2 {
        return Err(GenerateError::InvalidDimensions { rows, cols });
    }

    let mut grid = Grid::new_filled(rows, cols, Cell::Wall);

    let goal = Coord::new(sample_even(r, rows)?, sample_even(r, cols)?);
    log::debug!("Carving {rows}x{cols} maze from seed {goal}");

    grid.set(&goal, Cell::Goal);
    let mut frontier: Vec<Coord> = vec![goal];

    let mut start = goal;
    let mut start_distance = 0usize;
    let mut carved = 1usize;

    let mut directions = Direction::ALL;
    while let Some(current) = frontier.pop() {
        directions.shuffle(r);

        // Take the first unvisited neighbour, if any. Dead ends are dropped.
        for direction in directions {
            let Some(next) = grid.step(&current, direction, CARVE_STEP) else {
                continue;
            };
            if grid.at(&next).is_carved() {
                continue;
            }

            // Halfway between both cells.
            let wall = Coord::new(
                current.row.midpoint(next.row),
                current.col.midpoint(next.col),
            );
            grid.set(&wall, Cell::Open);
            grid.set(&next, Cell::Open);
            carved += 1;

            frontier.push(current);
            frontier.push(next);

            let distance = goal.squared_distance(&next);
            if distance > start_distance {
                start = next;
                start_distance = distance;
            }
            break;
        }
    }

    log::debug!("Carved {carved} cells");
    log::info!("start: {start}, goal: {goal}");

    let maze = Maze::new(grid, start, goal);
    verify_maze(&maze);
    Ok(maze)
}

#[inline(always)]
#[cfg(not(feature = "verify"))]
fn verify_maze(_maze: &Maze) {
    // All good... (hopefully)
}
#[inline(always)]
#[cfg(feature = "verify")]
fn verify_maze(maze: &Maze) {
    use crate::analysis;

    let grid = maze.grid();
    assert!(analysis::is_connected(grid, &maze.goal()));
    assert!(!analysis::has_cycle(grid));
    assert_eq!(grid.find(Cell::Goal).collect::<Vec<_>>(), vec![maze.goal()]);
    assert!(grid.find(Cell::Visited).next().is_none());
}
