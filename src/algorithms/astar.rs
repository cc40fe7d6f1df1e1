//! Best-first search ranked by `f = g + h` with a Manhattan heuristic.

use rustc_hash::FxHashMap;

use crate::grid::Cell;
use crate::grid::Coord;
use crate::grid::Cost;
use crate::grid::Grid;
use crate::maze::Maze;
use crate::open_list::OpenList;
use crate::path::Path;

/// The ranking tuple for A*
///
/// We prefer better f-values, and tie break for lower h.
///
/// Keeping the raw h value helps to avoid recomputing it later.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct AStarRank {
    f: Cost,
    h: Cost,
}
impl AStarRank {
    pub fn new(g: Cost, h: Cost) -> Self {
        Self {
            f: g.saturating_add(h),
            h,
        }
    }
    pub fn f(&self) -> Cost {
        self.f
    }
    pub fn h(&self) -> Cost {
        self.h
    }
}

/// A search node, stored by value in the open or the closed table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchNode {
    pub coord: Coord,
    /// Cost from the start.
    pub g: Cost,
    /// `g + h`
    pub f: Cost,
    /// Where we came from. `None` only for the start.
    pub parent: Option<Coord>,
}

/// Heap nodes carry just ranking information and the key of the actual search
/// node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct AStarHeapNode {
    pub rank: AStarRank,
    pub coord: Coord,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AStarStats {
    pub expanded: usize,
    pub closed: usize,
    pub open: usize,
    pub open_capacity: usize,
}

#[derive(Debug)]
pub struct AStarSearch {
    /// Private copy of the grid. Cells get marked `Visited` as they enter the
    /// open list.
    grid: Grid,
    start: Coord,
    goal: Coord,

    open: OpenList<AStarHeapNode>,
    /// Best known node for each coordinate in the open list.
    open_nodes: FxHashMap<Coord, SearchNode>,
    /// Best known node for each closed coordinate.
    closed_nodes: FxHashMap<Coord, SearchNode>,
    /// Closed coordinates, in closing order.
    closed: Vec<Coord>,

    expanded: usize,
}

impl AStarSearch {
    #[must_use]
    pub fn new(maze: &Maze) -> Self {
        Self::new_from_parts(maze.grid(), maze.start(), maze.goal())
    }

    #[must_use]
    pub fn new_from_parts(grid: &Grid, start: Coord, goal: Coord) -> Self {
        let mut search = Self {
            grid: grid.clone(),
            start,
            goal,
            open: OpenList::with_capacity(256),
            open_nodes: FxHashMap::default(),
            closed_nodes: FxHashMap::default(),
            closed: vec![],
            expanded: 0,
        };

        if search.grid.in_bounds(&start) {
            search.grid.set(&start, Cell::Visited);
            let h = search.h(&start);
            search.push(SearchNode {
                coord: start,
                g: 0,
                f: h,
                parent: None,
            });
        } else {
            log::warn!("A* start {start} is outside the grid");
        }

        search
    }

    /// Manhattan distance to the goal.
    #[inline(always)]
    #[must_use]
    pub fn h(&self, c: &Coord) -> Cost {
        c.manhattan_distance(&self.goal)
    }

    /// Runs the search until the open list runs out.
    ///
    /// Succeeds only if the goal was the last coordinate closed, otherwise
    /// returns an empty Path.
    #[must_use]
    pub fn find_path(&mut self) -> Path {
        while let Some(heap_node) = self.open.pop() {
            let coord = heap_node.coord;
            // Skip keys whose node got replaced or discarded.
            let Some(node) = self.open_nodes.remove(&coord) else {
                continue;
            };
            debug_assert_eq!(node.f, heap_node.rank.f());

            if self.h(&coord) != 0 {
                self.expand(&node);
            }

            self.closed_nodes.insert(coord, node);
            self.closed.push(coord);
        }

        log::debug!(
            "A* from {} to {}: expanded {}, closed {}",
            self.start,
            self.goal,
            self.expanded,
            self.closed.len()
        );

        if self.closed.last() != Some(&self.goal) {
            return Path::empty();
        }
        self.path()
    }

    fn expand(&mut self, node: &SearchNode) {
        self.expanded += 1;

        for (s, _direction) in self.grid.neighbours(&node.coord) {
            let g = node.g + 1;
            let successor = SearchNode {
                coord: s,
                g,
                f: g.saturating_add(self.h(&s)),
                parent: Some(node.coord),
            };

            if self.grid.at(&s) == Cell::Goal {
                // Abandon the rest of the frontier, the goal is next.
                self.open.clear();
                self.open_nodes.clear();
                self.push(successor);
                break;
            }

            // A cheaper or equal path is already known
            if self
                .open_nodes
                .get(&s)
                .is_some_and(|open| open.g <= successor.g)
            {
                continue;
            }
            if self
                .closed_nodes
                .get(&s)
                .is_some_and(|closed| closed.f <= successor.f)
            {
                continue;
            }

            self.push(successor);
            self.grid.set(&s, Cell::Visited);
        }
    }

    #[inline(always)]
    fn push(&mut self, node: SearchNode) {
        let h = node.f - node.g;
        self.open.push(AStarHeapNode {
            rank: AStarRank::new(node.g, h),
            coord: node.coord,
        });
        self.open_nodes.insert(node.coord, node);
    }

    /// Follows parents back from the goal.
    fn path(&self) -> Path {
        let mut c = self.goal;
        let mut path = Path::new_from_start(c);

        while let Some(parent) = self.closed_nodes.get(&c).and_then(|n| n.parent) {
            debug_assert!(c != parent);
            path.append(parent);
            c = parent;
        }

        path.reverse();
        path
    }

    pub fn stats(&self) -> AStarStats {
        AStarStats {
            expanded: self.expanded,
            closed: self.closed.len(),
            open: self.open.len(),
            open_capacity: self.open.capacity(),
        }
    }

    pub fn write_stats<W: std::io::Write>(&self, mut out: W) -> std::io::Result<()> {
        use thousands::Separable;

        let stats = self.stats();
        writeln!(out, "AStarSearch Stats:")?;
        writeln!(out, "  - |Open|:   {}", stats.open.separate_with_commas())?;
        writeln!(
            out,
            "  - |Open|*:  {}",
            stats.open_capacity.separate_with_commas()
        )?;
        writeln!(out, "  - |Closed|: {}", stats.closed.separate_with_commas())?;
        writeln!(
            out,
            "  - Expanded nodes: {}",
            stats.expanded.separate_with_commas()
        )?;

        Ok(())
    }
}
