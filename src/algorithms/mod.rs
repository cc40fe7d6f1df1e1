//! Implementation of search algorithms.
//!
//! Both algorithms work on their own copy of the grid and return an empty
//! Path when there's no route.

pub mod astar;
pub mod dfs;

use derive_more::Display;
use thiserror::Error;

use crate::maze::Maze;
use crate::path::Path;
use astar::AStarSearch;
use dfs::DepthFirstSearch;

/// The available solvers, selectable by name.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Algorithm {
    /// Depth-first backtracking, finds some route.
    #[display("dfs")]
    #[value(name = "dfs")]
    Dfs,
    /// A* with a Manhattan heuristic, finds a shortest route.
    #[display("a*")]
    #[value(name = "a*")]
    AStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::Dfs, Algorithm::AStar];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Dfs => "dfs",
            Algorithm::AStar => "a*",
        }
    }

    #[must_use]
    pub fn solve(&self, maze: &Maze) -> Path {
        match self {
            Algorithm::Dfs => DepthFirstSearch::new(maze).find_path(),
            Algorithm::AStar => AStarSearch::new(maze).find_path(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown algorithm '{0}'")]
pub struct UnknownAlgorithm(pub String);

impl std::str::FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name() == s.trim())
            .ok_or_else(|| UnknownAlgorithm(s.trim().to_string()))
    }
}
