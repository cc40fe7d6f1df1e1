//! Backtracking depth-first search.
//!
//! Returns the first route found, which is not necessarily the shortest one.
//! The goal is recognised by its `Goal` cell, not by its coordinate.

use crate::grid::Cell;
use crate::grid::Coord;
use crate::grid::Direction;
use crate::grid::Grid;
use crate::maze::Maze;
use crate::path::Path;

/// A cell on the current route and the next direction to try from it.
#[derive(Copy, Clone, Debug)]
struct Frame {
    coord: Coord,
    next_direction: usize,
}

#[derive(Debug)]
pub struct DepthFirstSearch {
    /// Private copy of the grid. Cells get marked `Visited` as they are
    /// entered and stay that way after backtracking.
    grid: Grid,
    start: Coord,
    goal: Coord,
    visited: usize,
}

impl DepthFirstSearch {
    #[must_use]
    pub fn new(maze: &Maze) -> Self {
        Self::new_from_parts(maze.grid(), maze.start(), maze.goal())
    }

    #[must_use]
    pub fn new_from_parts(grid: &Grid, start: Coord, goal: Coord) -> Self {
        Self {
            grid: grid.clone(),
            start,
            goal,
            visited: 0,
        }
    }

    /// Number of cells entered so far.
    pub fn visited(&self) -> usize {
        self.visited
    }

    /// Searches for a `Goal` cell reachable from the start.
    ///
    /// Neighbours are tried in `Direction::ALL` order. Returns an empty Path if
    /// no `Goal` cell can be reached.
    #[must_use]
    pub fn find_path(&mut self) -> Path {
        let Some(cell) = self.grid.get(&self.start) else {
            log::warn!("DFS start {} is outside the grid", self.start);
            return Path::empty();
        };
        self.visited += 1;
        if cell == Cell::Goal {
            return Path::new_from_start(self.start);
        }
        self.grid.set(&self.start, Cell::Visited);

        // The route so far is the stack of frames.
        let mut frames = vec![Frame {
            coord: self.start,
            next_direction: 0,
        }];

        while let Some(frame) = frames.last_mut() {
            let Some(&direction) = Direction::ALL.get(frame.next_direction) else {
                // Dead end, backtrack.
                frames.pop();
                continue;
            };
            frame.next_direction += 1;

            let Some(next) = self.grid.step(&frame.coord, direction, 1) else {
                continue;
            };
            match self.grid.at(&next) {
                Cell::Wall | Cell::Visited => {}
                Cell::Goal => {
                    self.visited += 1;
                    let mut path = Path::from(frames.iter().map(|f| f.coord).collect::<Vec<_>>());
                    path.append(next);
                    log::debug!(
                        "DFS from {} reached {} (goal {}) after visiting {} cells",
                        self.start,
                        next,
                        self.goal,
                        self.visited
                    );
                    return path;
                }
                Cell::Open => {
                    self.visited += 1;
                    self.grid.set(&next, Cell::Visited);
                    frames.push(Frame {
                        coord: next,
                        next_direction: 0,
                    });
                }
            }
        }

        log::debug!(
            "DFS from {} exhausted {} cells without reaching a goal",
            self.start,
            self.visited
        );
        Path::empty()
    }
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;

    fn solve(maze_str: &str) -> Path {
        let maze = Maze::try_from(maze_str).unwrap();
        let path = DepthFirstSearch::new(&maze).find_path();
        if !path.is_empty() {
            assert_eq!(path.start(), Some(maze.start()));
            assert_eq!(path.end(), Some(maze.goal()));
            assert!(path.is_valid_on(maze.grid()));
        }
        path
    }

    #[test]
    fn open_three_by_three() {
        let path = solve(indoc! {"
            S..
            ...
            ..G
        "});
        assert!(path.steps() >= 4);
        // Right first, then down.
        assert_eq!(
            path.coords(),
            &[
                Coord::new(0, 0),
                Coord::new(0, 1),
                Coord::new(0, 2),
                Coord::new(1, 2),
                Coord::new(2, 2),
            ]
        );
    }

    #[test]
    fn backtracks_out_of_dead_ends() {
        let path = solve(indoc! {"
            S...#
            .##.#
            .#..#
            .####
            ....G
        "});
        assert_eq!(path.steps(), 8);
        assert_eq!(path.coords()[1], Coord::new(1, 0));
    }

    #[test]
    fn unreachable_goal() {
        let path = solve(indoc! {"
            S.#..
            ..#.G
        "});
        assert!(path.is_empty());
    }

    #[test]
    fn start_is_goal() {
        let path = solve("#!#");
        assert_eq!(path.coords(), &[Coord::new(0, 1)]);
    }

    #[test]
    fn finds_goal_cell_regardless_of_goal_coordinate() {
        let maze = Maze::try_from("S.G").unwrap();
        let mut search =
            DepthFirstSearch::new_from_parts(maze.grid(), maze.start(), Coord::new(0, 1));
        assert_eq!(search.find_path().end(), Some(Coord::new(0, 2)));
        assert_eq!(search.visited(), 3);
    }

    #[test]
    fn start_outside_grid() {
        let maze = Maze::try_from("S.G").unwrap();
        let mut search =
            DepthFirstSearch::new_from_parts(maze.grid(), Coord::new(1, 0), maze.goal());
        assert!(search.find_path().is_empty());
    }

    #[test]
    fn does_not_touch_the_source_grid() {
        let maze = Maze::try_from("S..G").unwrap();
        let before = maze.clone();
        let _ = DepthFirstSearch::new(&maze).find_path();
        assert_eq!(maze, before);
    }
}
