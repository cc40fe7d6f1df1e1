//! Structural checks over grids.
//!
//! These don't take part in generation or solving. They back the `verify`
//! feature, tests and benchmarks with answers computed independently from the
//! solvers.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use rustc_hash::FxHashSet;

use crate::grid::Coord;
use crate::grid::Direction;
use crate::grid::Grid;

/// Passable 4-adjacent cells, regardless of them being visited.
fn passable_neighbours(grid: &Grid, c: &Coord) -> impl Iterator<Item = Coord> {
    Direction::ALL
        .into_iter()
        .filter_map(move |d| grid.step(c, d, 1))
        .filter(|n| grid.at(n).is_passable())
}

/// Flood-fills passable cells starting from `from`.
///
/// Returns an empty set if `from` is not passable.
pub fn reachable_from(grid: &Grid, from: &Coord) -> FxHashSet<Coord> {
    let mut seen = FxHashSet::default();
    if !grid.get(from).is_some_and(|c| c.is_passable()) {
        return seen;
    }

    let mut stack = vec![*from];
    seen.insert(*from);
    while let Some(c) = stack.pop() {
        for n in passable_neighbours(grid, &c) {
            if seen.insert(n) {
                stack.push(n);
            }
        }
    }
    seen
}

/// Checks that every passable cell can be reached from `root`.
pub fn is_connected(grid: &Grid, root: &Coord) -> bool {
    let reachable = reachable_from(grid, root);
    grid.iter()
        .filter(|(_, cell)| cell.is_passable())
        .all(|(c, _)| reachable.contains(&c))
}

/// Checks whether passable cells form any cycle.
///
/// An undirected graph is a forest iff `|E| = |V| - components`.
pub fn has_cycle(grid: &Grid) -> bool {
    let mut vertices = 0usize;
    let mut edges = 0usize;
    for (c, cell) in grid.iter() {
        if !cell.is_passable() {
            continue;
        }
        vertices += 1;
        // Count each edge once, from its top/left end.
        for d in [Direction::Right, Direction::Down] {
            if grid
                .step(&c, d, 1)
                .is_some_and(|n| grid.at(&n).is_passable())
            {
                edges += 1;
            }
        }
    }

    let mut components = 0usize;
    let mut seen = FxHashSet::<Coord>::default();
    for (c, cell) in grid.iter() {
        if cell.is_passable() && !seen.contains(&c) {
            components += 1;
            seen.extend(reachable_from(grid, &c));
        }
    }

    edges + components != vertices
}

/// Breadth-first distances over passable cells.
pub fn bfs_distances(grid: &Grid, from: &Coord) -> FxHashMap<Coord, usize> {
    let mut distances = FxHashMap::default();
    if !grid.get(from).is_some_and(|c| c.is_passable()) {
        return distances;
    }

    let mut queue = VecDeque::new();
    distances.insert(*from, 0usize);
    queue.push_back(*from);

    while let Some(c) = queue.pop_front() {
        let d = distances[&c];
        for n in passable_neighbours(grid, &c) {
            if distances.contains_key(&n) {
                continue;
            }
            distances.insert(n, d + 1);
            queue.push_back(n);
        }
    }
    distances
}

/// Number of steps of a shortest path, if any.
pub fn bfs_shortest_path_len(grid: &Grid, start: &Coord, goal: &Coord) -> Option<usize> {
    bfs_distances(grid, start).get(goal).copied()
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;
    use crate::maze::Maze;

    #[test]
    fn tree_has_no_cycle() {
        let maze = Maze::try_from(indoc! {"
            S...#
            ##.##
            G...#
        "})
        .unwrap();
        assert!(!has_cycle(maze.grid()));
        assert!(is_connected(maze.grid(), &maze.goal()));
        assert_eq!(
            bfs_shortest_path_len(maze.grid(), &maze.start(), &maze.goal()),
            Some(6)
        );
    }

    #[test]
    fn square_is_a_cycle() {
        let maze = Maze::try_from(indoc! {"
            S.
            .G
        "})
        .unwrap();
        assert!(has_cycle(maze.grid()));
    }

    #[test]
    fn split_grid() {
        let maze = Maze::try_from(indoc! {"
            S.#.#
            ###.G
        "})
        .unwrap();
        assert!(!is_connected(maze.grid(), &maze.goal()));
        assert!(!has_cycle(maze.grid()));
        assert_eq!(
            bfs_shortest_path_len(maze.grid(), &maze.start(), &maze.goal()),
            None
        );
        assert_eq!(reachable_from(maze.grid(), &maze.start()).len(), 2);
        assert!(reachable_from(maze.grid(), &Coord::new(0, 2)).is_empty());
    }
}
