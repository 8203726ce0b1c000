use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Traversal cost assigned to waypoint cells.
pub const WAYPOINT_COST: f64 = 1.0;

/// A grid coordinate as a `(column, row)` pair.
///
/// `Ord` is lexicographic on `(x, y)`, which gives the search a total order
/// for deterministic priority-queue tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Minimal rectangle covering a set of cells, both endpoints inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min: Cell,
    pub max: Cell,
}

impl Bounds {
    /// Compute the bounds of an arbitrary cell collection.
    ///
    /// Returns `None` when the iterator yields no cells.
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Option<Self> {
        let mut cells = cells.into_iter();
        let first = cells.next()?;
        let mut bounds = Bounds {
            min: first,
            max: first,
        };
        for cell in cells {
            bounds.min.x = bounds.min.x.min(cell.x);
            bounds.min.y = bounds.min.y.min(cell.y);
            bounds.max.x = bounds.max.x.max(cell.x);
            bounds.max.y = bounds.max.y.max(cell.y);
        }
        Some(bounds)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= self.min.x && cell.x <= self.max.x && cell.y >= self.min.y && cell.y <= self.max.y
    }

    /// Iterate every cell inside the rectangle in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (self.min.y..=self.max.y)
            .flat_map(move |y| (self.min.x..=self.max.x).map(move |x| Cell::new(x, y)))
    }
}

/// In-memory representation of a maze.
///
/// A coordinate belongs to at most one of `walls`, the keys of `spaces`, or
/// the values of `waypoints`; a coordinate in none of them is impassable.
/// The grid is read-only for the duration of any search.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    /// Blocked coordinates.
    pub walls: HashSet<Cell>,
    /// Open coordinates and their non-negative traversal costs.
    pub spaces: HashMap<Cell, f64>,
    /// Labelled coordinates of interest, implicit cost [`WAYPOINT_COST`].
    pub waypoints: HashMap<char, Cell>,
}

impl Grid {
    /// Traversal cost of a cell: its `spaces` entry, [`WAYPOINT_COST`] for a
    /// waypoint, or `None` for a wall or a coordinate outside the grid.
    pub fn cell_cost(&self, cell: Cell) -> Option<f64> {
        if let Some(&cost) = self.spaces.get(&cell) {
            return Some(cost);
        }
        if self.waypoints.values().any(|&waypoint| waypoint == cell) {
            return Some(WAYPOINT_COST);
        }
        None
    }

    /// Lookup a waypoint coordinate by its label.
    pub fn waypoint(&self, label: char) -> Option<Cell> {
        self.waypoints.get(&label).copied()
    }

    /// Sorted list of the labels defined in this grid.
    pub fn waypoint_labels(&self) -> Vec<char> {
        let mut labels: Vec<char> = self.waypoints.keys().copied().collect();
        labels.sort_unstable();
        labels
    }

    pub fn is_wall(&self, cell: Cell) -> bool {
        self.walls.contains(&cell)
    }

    /// Minimal rectangle covering every coordinate in `spaces` or `walls`.
    ///
    /// Returns `None` for a grid that defines neither.
    pub fn bounding_box(&self) -> Option<Bounds> {
        Bounds::from_cells(
            self.spaces
                .keys()
                .copied()
                .chain(self.walls.iter().copied()),
        )
    }
}
