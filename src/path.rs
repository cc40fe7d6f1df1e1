use crate::grid::Coord;
use crate::grid::Grid;

const MAX_ELEMENTS_DISPLAYED: usize = 20;

/// A route through a grid, from start to goal inclusive.
///
/// An empty Path means that no route was found.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path {
    coords: Vec<Coord>,
}

impl Path {
    #[inline(always)]
    pub fn empty() -> Self {
        Self { coords: vec![] }
    }

    #[inline(always)]
    pub fn new_from_start(start: Coord) -> Self {
        Self {
            coords: vec![start],
        }
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Number of coordinates, including start and goal.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Number of moves, one less than the number of coordinates.
    #[inline(always)]
    pub fn steps(&self) -> usize {
        self.coords.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<Coord> {
        self.coords.first().copied()
    }
    pub fn end(&self) -> Option<Coord> {
        self.coords.last().copied()
    }

    pub fn coords(&self) -> &[Coord] {
        &self.coords
    }

    #[inline(always)]
    pub fn append(&mut self, c: Coord) {
        debug_assert!(self.end().is_none_or(|e| e.is_adjacent(&c)));
        self.coords.push(c);
    }

    /// Reverses the Path.
    ///
    /// Useful when naturally reconstructing paths in reverse.
    pub fn reverse(&mut self) {
        self.coords.reverse();
    }

    /// Checks that every step moves to a 4-adjacent, passable cell of `grid`.
    pub fn is_valid_on(&self, grid: &Grid) -> bool {
        let passable = self
            .coords
            .iter()
            .all(|c| grid.get(c).is_some_and(|cell| cell.is_passable()));

        passable && self.coords.windows(2).all(|w| w[0].is_adjacent(&w[1]))
    }
}

impl From<Vec<Coord>> for Path {
    fn from(coords: Vec<Coord>) -> Self {
        Self { coords }
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match (self.start(), self.end()) {
            (Some(start), Some(end)) => {
                write!(
                    f,
                    "Path({}, {}:{:?}:{})",
                    self.steps(),
                    start,
                    self.coords
                        .iter()
                        .take(MAX_ELEMENTS_DISPLAYED)
                        .map(|c| (c.row, c.col))
                        .collect::<Vec<_>>(),
                    end
                )
            }
            _ => write!(f, "Path()"),
        }
    }
}

/// Writes the whole Path as a bracketed coordinate list.
///
/// `[(0,0), (0,1), (1,1)]`
pub struct Listing<'a>(pub &'a Path);

impl std::fmt::Display for Listing<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, c) in self.0.coords.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;

    #[test]
    fn empty_path() {
        let p = Path::empty();
        assert!(p.is_empty());
        assert_eq!(p.steps(), 0);
        assert_eq!(p.start(), None);
        assert_eq!(p.to_string(), "Path()");
        assert_eq!(Listing(&p).to_string(), "[]");
    }

    #[test]
    fn listing() {
        let mut p = Path::new_from_start(Coord::new(0, 0));
        p.append(Coord::new(0, 1));
        p.append(Coord::new(1, 1));
        assert_eq!(p.steps(), 2);
        assert_eq!(Listing(&p).to_string(), "[(0,0), (0,1), (1,1)]");
    }

    #[test]
    fn validity() {
        let mut grid = Grid::new_filled(2, 2, Cell::Open);
        grid.set(&Coord::new(1, 0), Cell::Wall);

        let ok = Path::from(vec![Coord::new(0, 0), Coord::new(0, 1), Coord::new(1, 1)]);
        assert!(ok.is_valid_on(&grid));

        let through_wall = Path::from(vec![Coord::new(0, 0), Coord::new(1, 0)]);
        assert!(!through_wall.is_valid_on(&grid));

        let jump = Path::from(vec![Coord::new(0, 0), Coord::new(1, 1)]);
        assert!(!jump.is_valid_on(&grid));

        let outside = Path::from(vec![Coord::new(0, 1), Coord::new(0, 2)]);
        assert!(!outside.is_valid_on(&grid));
    }
}
