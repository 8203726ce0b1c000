//! Textual maze parsing.
//!
//! The maze format is line-oriented: `X` marks a wall, digits `1`-`9` mark
//! open cells with that traversal cost, lowercase letters mark waypoints
//! (implicit cost 1), and blanks leave the coordinate undefined. Columns map
//! to `x`, lines to `y`.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::grid::{Cell, Grid};

/// Read and parse a maze description from a file.
pub fn load_maze(path: &Path) -> Result<Grid> {
    let text = fs::read_to_string(path)?;
    parse_maze(&text)
}

/// Parse a maze description into a [`Grid`].
///
/// Characters outside the tile alphabet, duplicate waypoint labels, and
/// descriptions that define no cells at all are hard errors.
pub fn parse_maze(text: &str) -> Result<Grid> {
    let mut grid = Grid::default();

    for (row, line) in text.lines().enumerate() {
        for (column, tile) in line.chars().enumerate() {
            let cell = Cell::new(column as i32, row as i32);
            match tile {
                'X' => {
                    grid.walls.insert(cell);
                }
                '1'..='9' => {
                    grid.spaces.insert(cell, f64::from(tile as u8 - b'0'));
                }
                'a'..='z' => {
                    if grid.waypoints.insert(tile, cell).is_some() {
                        return Err(Error::DuplicateWaypoint { label: tile });
                    }
                }
                ' ' => {}
                _ => {
                    return Err(Error::InvalidTile {
                        tile,
                        line: row + 1,
                        column: column + 1,
                    });
                }
            }
        }
    }

    if grid.walls.is_empty() && grid.spaces.is_empty() && grid.waypoints.is_empty() {
        return Err(Error::EmptyMaze);
    }

    tracing::debug!(
        walls = grid.walls.len(),
        spaces = grid.spaces.len(),
        waypoints = grid.waypoints.len(),
        "maze parsed"
    );

    Ok(grid)
}
