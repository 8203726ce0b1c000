//! Waypoint-level route planning on top of the search primitives.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::grid::{Cell, Grid};
use crate::path::{costs_to_all, path_cost, shortest_path};

/// Planned route returned by the library.
#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan {
    pub start: Cell,
    pub goal: Cell,
    /// Every cell on the route, start and goal inclusive.
    pub steps: Vec<Cell>,
    /// Sum of the edge weights along `steps`.
    pub total_cost: f64,
}

impl RoutePlan {
    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Compute a route between two waypoint labels.
///
/// Resolves both labels, then delegates to [`plan_route_between`]. Unknown
/// labels report the labels the grid does define.
pub fn plan_route(grid: &Grid, from: char, to: char) -> Result<RoutePlan> {
    let start = resolve_waypoint(grid, from)?;
    let goal = resolve_waypoint(grid, to)?;
    plan_route_between(grid, start, goal)
}

/// Compute a route between two coordinates.
///
/// Both endpoints must carry a cell cost; an untraversable endpoint is
/// rejected up front so the search can never start from (or aim at) a wall
/// silently. An exhausted search becomes [`Error::RouteNotFound`].
pub fn plan_route_between(grid: &Grid, start: Cell, goal: Cell) -> Result<RoutePlan> {
    ensure_traversable(grid, start)?;
    ensure_traversable(grid, goal)?;

    let steps = shortest_path(start, goal, grid).ok_or_else(|| Error::RouteNotFound {
        start: start.to_string(),
        goal: goal.to_string(),
    })?;

    // The steps came out of the search, so every edge along them is defined.
    let total_cost = path_cost(grid, &steps).unwrap_or(f64::INFINITY);
    tracing::debug!(
        hops = steps.len().saturating_sub(1),
        total_cost,
        "route planned"
    );

    Ok(RoutePlan {
        start,
        goal,
        steps,
        total_cost,
    })
}

/// Compute the cost from a waypoint to every cell in the bounding box.
///
/// Resolution failures are hard errors; unreachable cells stay `None` in
/// the returned map.
pub fn sweep_from(grid: &Grid, from: char) -> Result<BTreeMap<Cell, Option<f64>>> {
    let source = resolve_waypoint(grid, from)?;
    ensure_traversable(grid, source)?;
    Ok(costs_to_all(source, grid))
}

fn resolve_waypoint(grid: &Grid, label: char) -> Result<Cell> {
    grid.waypoint(label).ok_or_else(|| Error::UnknownWaypoint {
        label,
        known: grid.waypoint_labels(),
    })
}

fn ensure_traversable(grid: &Grid, cell: Cell) -> Result<()> {
    if grid.cell_cost(cell).is_none() {
        return Err(Error::CellNotTraversable { cell });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_maze;

    fn sample_grid() -> Grid {
        parse_maze("XXXX\nXa1X\nX1bX\nXXXX\n").expect("valid maze")
    }

    #[test]
    fn plan_route_resolves_labels() {
        let grid = sample_grid();
        let plan = plan_route(&grid, 'a', 'b').expect("route exists");
        assert_eq!(plan.start, Cell::new(1, 1));
        assert_eq!(plan.goal, Cell::new(2, 2));
        assert_eq!(plan.steps.first(), Some(&plan.start));
        assert_eq!(plan.steps.last(), Some(&plan.goal));
        assert!(plan.total_cost > 0.0);
    }

    #[test]
    fn unknown_waypoint_suggests_known_labels() {
        let grid = sample_grid();
        let error = plan_route(&grid, 'q', 'b').expect_err("unknown label");
        match error {
            Error::UnknownWaypoint { label, known } => {
                assert_eq!(label, 'q');
                assert_eq!(known, vec!['a', 'b']);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn wall_endpoint_is_rejected_loudly() {
        let grid = sample_grid();
        let wall = Cell::new(0, 0);
        let error = plan_route_between(&grid, wall, Cell::new(2, 2)).expect_err("wall source");
        assert!(matches!(error, Error::CellNotTraversable { cell } if cell == wall));
    }

    #[test]
    fn hop_count_ignores_the_starting_cell() {
        let plan = RoutePlan {
            start: Cell::new(0, 0),
            goal: Cell::new(2, 0),
            steps: vec![Cell::new(0, 0), Cell::new(1, 0), Cell::new(2, 0)],
            total_cost: 2.0,
        };
        assert_eq!(plan.hop_count(), 2);
    }

    #[test]
    fn trivial_route_has_zero_hops() {
        let grid = sample_grid();
        let plan = plan_route(&grid, 'a', 'a').expect("route exists");
        assert_eq!(plan.hop_count(), 0);
        assert_eq!(plan.total_cost, 0.0);
    }

    #[test]
    fn route_plan_serializes() {
        let grid = sample_grid();
        let plan = plan_route(&grid, 'a', 'b').expect("route exists");
        let json = serde_json::to_string(&plan).expect("serializable");
        assert!(json.contains("\"steps\""));
        assert!(json.contains("\"total_cost\""));
    }
}
