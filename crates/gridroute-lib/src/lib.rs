//! Gridroute library entry points.
//!
//! This crate models weighted 2D mazes (walls, cost-bearing open cells,
//! labelled waypoints) and computes minimum-cost routes across them with
//! Dijkstra's algorithm over 8-directional movement. Higher-level consumers
//! (the CLI) should only depend on the functions exported here instead of
//! reimplementing behavior.

#![deny(warnings)]

pub mod error;
pub mod grid;
pub mod loader;
pub mod path;
pub mod render;
pub mod route;

pub use error::{Error, Result};
pub use grid::{Bounds, Cell, Grid, WAYPOINT_COST};
pub use loader::{load_maze, parse_maze};
pub use path::{costs_to_all, edge_cost, neighbors, path_cost, shortest_cost, shortest_path};
pub use render::{render_grid, write_costs_csv};
pub use route::{plan_route, plan_route_between, sweep_from, RoutePlan};
