use thiserror::Error;

use crate::grid::Cell;

/// Convenient result alias for the gridroute library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a maze description contains a character outside the tile alphabet.
    #[error("unexpected tile '{tile}' at line {line}, column {column}")]
    InvalidTile {
        tile: char,
        line: usize,
        column: usize,
    },

    /// Raised when the same waypoint label appears more than once in a maze.
    #[error("duplicate waypoint label '{label}'")]
    DuplicateWaypoint { label: char },

    /// Raised when a maze description defines no walls, spaces, or waypoints.
    #[error("maze defines no cells")]
    EmptyMaze,

    /// Raised when a waypoint label could not be found in the grid.
    #[error("unknown waypoint '{label}'{}", format_known(.known))]
    UnknownWaypoint { label: char, known: Vec<char> },

    /// Raised when no route could be found between two waypoints.
    #[error("no route found between {start} and {goal}")]
    RouteNotFound { start: String, goal: String },

    /// Raised when a route endpoint is a wall or lies outside the defined grid.
    #[error("cell {cell} is not traversable")]
    CellNotTraversable { cell: Cell },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for CSV writer errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

fn format_known(known: &[char]) -> String {
    if known.is_empty() {
        String::new()
    } else {
        format!(
            ". Known waypoints: {}",
            known
                .iter()
                .map(|label| format!("'{}'", label))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
