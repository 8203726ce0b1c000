//! Presentation helpers: textual grid rendering and tabular cost export.
//!
//! Both functions produce plain data for the caller to print or persist;
//! nothing here touches stdout.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt::Write as _;
use std::io;

use crate::error::Result;
use crate::grid::{Bounds, Cell, Grid};

/// Render a grid as text, optionally overlaying a path.
///
/// Walls render as `X`, waypoints as their labels, open cells as their cost
/// digit (blank when the cost has no single-digit form), undefined
/// coordinates as blanks. Path cells are overlaid with `*`; waypoint labels
/// win over the overlay.
pub fn render_grid(grid: &Grid, path: Option<&[Cell]>) -> String {
    let Some(bounds) = display_bounds(grid) else {
        return String::new();
    };

    let labels: HashMap<Cell, char> = grid
        .waypoints
        .iter()
        .map(|(&label, &cell)| (cell, label))
        .collect();
    let overlay: HashSet<Cell> = path.unwrap_or_default().iter().copied().collect();

    let mut out = String::new();
    for y in bounds.min.y..=bounds.max.y {
        for x in bounds.min.x..=bounds.max.x {
            let cell = Cell::new(x, y);
            out.push(tile(grid, &labels, &overlay, cell));
        }
        let _ = writeln!(out);
    }
    out
}

/// Write an all-destinations cost map as CSV, one record per grid row of the
/// bounding box. Unreachable cells are written as `inf`.
pub fn write_costs_csv<W: io::Write>(
    grid: &Grid,
    costs: &BTreeMap<Cell, Option<f64>>,
    writer: W,
) -> Result<()> {
    let Some(bounds) = grid.bounding_box() else {
        return Ok(());
    };

    let mut writer = csv::Writer::from_writer(writer);
    for y in bounds.min.y..=bounds.max.y {
        let record: Vec<String> = (bounds.min.x..=bounds.max.x)
            .map(|x| match costs.get(&Cell::new(x, y)).copied().flatten() {
                Some(cost) => format!("{cost}"),
                None => "inf".to_string(),
            })
            .collect();
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Rendering covers waypoints as well, unlike the search bounding box.
fn display_bounds(grid: &Grid) -> Option<Bounds> {
    Bounds::from_cells(
        grid.spaces
            .keys()
            .copied()
            .chain(grid.walls.iter().copied())
            .chain(grid.waypoints.values().copied()),
    )
}

fn tile(grid: &Grid, labels: &HashMap<Cell, char>, overlay: &HashSet<Cell>, cell: Cell) -> char {
    if let Some(&label) = labels.get(&cell) {
        return label;
    }
    if overlay.contains(&cell) {
        return '*';
    }
    if grid.is_wall(cell) {
        return 'X';
    }
    match grid.spaces.get(&cell) {
        Some(&cost) => cost_digit(cost).unwrap_or(' '),
        None => ' ',
    }
}

fn cost_digit(cost: f64) -> Option<char> {
    if cost.fract() == 0.0 && (1.0..=9.0).contains(&cost) {
        char::from_digit(cost as u32, 10)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_maze;

    const MAZE: &str = "XXXX\nXa1X\nX2bX\nXXXX\n";

    #[test]
    fn render_round_trips_the_parsed_maze() {
        let grid = parse_maze(MAZE).expect("valid maze");
        assert_eq!(render_grid(&grid, None), MAZE);
    }

    #[test]
    fn path_overlay_marks_cells_but_not_waypoints() {
        let grid = parse_maze(MAZE).expect("valid maze");
        let path = [Cell::new(1, 1), Cell::new(2, 1), Cell::new(2, 2)];
        let rendered = render_grid(&grid, Some(&path));
        assert_eq!(rendered, "XXXX\nXa*X\nX2bX\nXXXX\n");
    }

    #[test]
    fn empty_grid_renders_to_nothing() {
        assert_eq!(render_grid(&Grid::default(), None), "");
    }

    #[test]
    fn csv_rows_cover_the_bounding_box() {
        let grid = parse_maze("X1\n2X\n").expect("valid maze");
        let mut costs = BTreeMap::new();
        for cell in grid.bounding_box().expect("bounded").cells() {
            costs.insert(cell, None);
        }
        costs.insert(Cell::new(1, 0), Some(1.5));

        let mut buffer = Vec::new();
        write_costs_csv(&grid, &costs, &mut buffer).expect("csv written");
        let text = String::from_utf8(buffer).expect("utf8");
        assert_eq!(text, "inf,1.5\ninf,inf\n");
    }
}
