use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap, HashMap};
use std::f64::consts::SQRT_2;

use crate::grid::{Cell, Grid};

/// Neighbor offsets in fixed enumeration order: W, NW, N, NE, E, SE, S, SW.
/// The third component marks diagonal steps.
const OFFSETS: [(i32, i32, bool); 8] = [
    (-1, 0, false),
    (-1, -1, true),
    (0, -1, false),
    (1, -1, true),
    (1, 0, false),
    (1, 1, true),
    (0, 1, false),
    (-1, 1, true),
];

/// Weight of the edge into `target`, or `None` when `target` is a wall or
/// lies outside the defined grid.
///
/// The weight is the average of the two endpoint costs scaled by the step
/// length: orthogonal steps pay `0.5 * source + 0.5 * target`, diagonal
/// steps pay the same average times `sqrt(2)`.
pub fn edge_cost(grid: &Grid, target: Cell, diagonal: bool, source_cost: f64) -> Option<f64> {
    let target_cost = grid.cell_cost(target)?;
    let weight = 0.5 * source_cost + 0.5 * target_cost;
    Some(if diagonal { weight * SQRT_2 } else { weight })
}

/// Enumerate the traversable neighbors of `cell` with their edge weights.
///
/// Offsets are examined in the fixed W, NW, N, NE, E, SE, S, SW order;
/// neighbors whose [`edge_cost`] is `None` are omitted. A cell that itself
/// carries no cost has no outgoing edges.
pub fn neighbors(grid: &Grid, cell: Cell) -> Vec<(Cell, f64)> {
    let Some(source_cost) = grid.cell_cost(cell) else {
        return Vec::new();
    };

    let mut edges = Vec::with_capacity(OFFSETS.len());
    for &(dx, dy, diagonal) in &OFFSETS {
        let target = Cell::new(cell.x + dx, cell.y + dy);
        if let Some(weight) = edge_cost(grid, target, diagonal, source_cost) {
            edges.push((target, weight));
        }
    }
    edges
}

/// Run Dijkstra's algorithm and return the full path from `source` to
/// `destination`, both inclusive, or `None` when the destination is
/// unreachable.
///
/// A `source` without a cell cost (a wall, or a coordinate outside the grid)
/// cannot seed the search and yields `None`. The total path cost is emitted
/// as a debug event; it is not part of the return contract.
pub fn shortest_path(source: Cell, destination: Cell, grid: &Grid) -> Option<Vec<Cell>> {
    grid.cell_cost(source)?;

    let mut distances: HashMap<Cell, f64> = HashMap::new();
    let mut parents: HashMap<Cell, Option<Cell>> = HashMap::new();
    let mut queue = BinaryHeap::new();

    distances.insert(source, 0.0);
    parents.insert(source, None);
    queue.push(QueueEntry::new(source, 0.0));

    while let Some(entry) = queue.pop() {
        let cost = entry.cost.0;
        if is_stale(&distances, entry.cell, cost) {
            continue;
        }

        if entry.cell == destination {
            tracing::debug!(total_cost = cost, "destination reached");
            return Some(reconstruct_path(&parents, source, destination));
        }

        for (next, weight) in neighbors(grid, entry.cell) {
            let candidate = cost + weight;
            if candidate < *distances.get(&next).unwrap_or(&f64::INFINITY) {
                distances.insert(next, candidate);
                parents.insert(next, Some(entry.cell));
                queue.push(QueueEntry::new(next, candidate));
            }
        }
    }

    None
}

/// Run Dijkstra's algorithm and return only the total cost from `source` to
/// `destination`, or `None` when the destination is unreachable.
///
/// Same precondition as [`shortest_path`]: an untraversable `source` yields
/// `None`.
pub fn shortest_cost(source: Cell, destination: Cell, grid: &Grid) -> Option<f64> {
    grid.cell_cost(source)?;

    let mut distances: HashMap<Cell, f64> = HashMap::new();
    let mut queue = BinaryHeap::new();

    distances.insert(source, 0.0);
    queue.push(QueueEntry::new(source, 0.0));

    while let Some(entry) = queue.pop() {
        let cost = entry.cost.0;
        if is_stale(&distances, entry.cell, cost) {
            continue;
        }

        if entry.cell == destination {
            return Some(cost);
        }

        for (next, weight) in neighbors(grid, entry.cell) {
            let candidate = cost + weight;
            if candidate < *distances.get(&next).unwrap_or(&f64::INFINITY) {
                distances.insert(next, candidate);
                queue.push(QueueEntry::new(next, candidate));
            }
        }
    }

    None
}

/// Compute the cost from `source` to every cell in the grid's bounding box.
///
/// Unreachable cells, walls included, are recorded as `None`. The whole map
/// is produced by a single relaxation pass that exhausts the queue instead
/// of one search per destination; the per-cell results are identical to
/// repeated [`shortest_cost`] calls. An untraversable `source` marks every
/// cell unreachable.
pub fn costs_to_all(source: Cell, grid: &Grid) -> BTreeMap<Cell, Option<f64>> {
    let mut costs = BTreeMap::new();
    let Some(bounds) = grid.bounding_box() else {
        return costs;
    };
    for cell in bounds.cells() {
        costs.insert(cell, None);
    }
    if grid.cell_cost(source).is_none() {
        return costs;
    }

    let mut distances: HashMap<Cell, f64> = HashMap::new();
    let mut queue = BinaryHeap::new();

    distances.insert(source, 0.0);
    queue.push(QueueEntry::new(source, 0.0));

    while let Some(entry) = queue.pop() {
        let cost = entry.cost.0;
        if is_stale(&distances, entry.cell, cost) {
            continue;
        }

        for (next, weight) in neighbors(grid, entry.cell) {
            let candidate = cost + weight;
            if candidate < *distances.get(&next).unwrap_or(&f64::INFINITY) {
                distances.insert(next, candidate);
                queue.push(QueueEntry::new(next, candidate));
            }
        }
    }

    for (cell, distance) in distances {
        if bounds.contains(cell) {
            costs.insert(cell, Some(distance));
        }
    }
    costs
}

/// Sum the edge weights along an explicit path.
///
/// Returns `None` when any step is not a valid edge (an endpoint without a
/// cell cost). An empty or single-cell path costs zero.
pub fn path_cost(grid: &Grid, steps: &[Cell]) -> Option<f64> {
    let mut total = 0.0;
    for pair in steps.windows(2) {
        let source_cost = grid.cell_cost(pair[0])?;
        let diagonal = pair[0].x != pair[1].x && pair[0].y != pair[1].y;
        total += edge_cost(grid, pair[1], diagonal, source_cost)?;
    }
    Some(total)
}

/// A queue entry whose recorded distance has since been improved carries no
/// work; popping it is skipped.
fn is_stale(distances: &HashMap<Cell, f64>, cell: Cell, cost: f64) -> bool {
    distances.get(&cell).is_some_and(|&best| best < cost)
}

fn reconstruct_path(parents: &HashMap<Cell, Option<Cell>>, source: Cell, goal: Cell) -> Vec<Cell> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(cell) = current {
        path.push(cell);
        if cell == source {
            break;
        }
        current = parents.get(&cell).copied().flatten();
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    cell: Cell,
    cost: FloatOrd,
}

impl QueueEntry {
    fn new(cell: Cell, cost: f64) -> Self {
        Self {
            cell,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost, with
        // ties broken by cell order for deterministic expansion.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.cell.cmp(&self.cell))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_grid(width: i32, height: i32, cost: f64) -> Grid {
        let mut grid = Grid::default();
        for y in 0..height {
            for x in 0..width {
                grid.spaces.insert(Cell::new(x, y), cost);
            }
        }
        grid
    }

    #[test]
    fn neighbors_follow_fixed_order() {
        let grid = open_grid(3, 3, 1.0);
        let cells: Vec<Cell> = neighbors(&grid, Cell::new(1, 1))
            .into_iter()
            .map(|(cell, _)| cell)
            .collect();
        assert_eq!(
            cells,
            vec![
                Cell::new(0, 1), // W
                Cell::new(0, 0), // NW
                Cell::new(1, 0), // N
                Cell::new(2, 0), // NE
                Cell::new(2, 1), // E
                Cell::new(2, 2), // SE
                Cell::new(1, 2), // S
                Cell::new(0, 2), // SW
            ]
        );
    }

    #[test]
    fn neighbors_of_costless_cell_are_empty() {
        let grid = open_grid(2, 2, 1.0);
        assert!(neighbors(&grid, Cell::new(10, 10)).is_empty());
    }

    #[test]
    fn edge_cost_is_average_of_endpoints() {
        let mut grid = Grid::default();
        grid.spaces.insert(Cell::new(1, 0), 3.0);
        let weight = edge_cost(&grid, Cell::new(1, 0), false, 1.0).expect("edge exists");
        assert!((weight - 2.0).abs() < 1e-9);
    }

    #[test]
    fn diagonal_edge_scales_by_sqrt_two() {
        let grid = open_grid(2, 2, 2.0);
        let straight = edge_cost(&grid, Cell::new(1, 0), false, 2.0).expect("edge exists");
        let diagonal = edge_cost(&grid, Cell::new(1, 1), true, 2.0).expect("edge exists");
        assert!((diagonal / straight - SQRT_2).abs() < 1e-9);
    }

    #[test]
    fn zero_cost_cells_yield_zero_weight_edges() {
        let grid = open_grid(2, 1, 0.0);
        let weight = edge_cost(&grid, Cell::new(1, 0), false, 0.0).expect("edge exists");
        assert_eq!(weight, 0.0);
    }

    #[test]
    fn trivial_path_is_the_source_itself() {
        let grid = open_grid(2, 2, 1.0);
        let source = Cell::new(0, 0);
        assert_eq!(shortest_path(source, source, &grid), Some(vec![source]));
        assert_eq!(shortest_cost(source, source, &grid), Some(0.0));
    }

    #[test]
    fn untraversable_source_finds_nothing() {
        let mut grid = open_grid(2, 2, 1.0);
        let wall = Cell::new(0, 0);
        grid.spaces.remove(&wall);
        grid.walls.insert(wall);

        assert_eq!(shortest_path(wall, Cell::new(1, 1), &grid), None);
        assert_eq!(shortest_cost(wall, Cell::new(1, 1), &grid), None);
        assert!(costs_to_all(wall, &grid).values().all(Option::is_none));
    }

    #[test]
    fn min_heap_pops_cheapest_entry_first() {
        let mut queue = BinaryHeap::new();
        queue.push(QueueEntry::new(Cell::new(0, 0), 2.5));
        queue.push(QueueEntry::new(Cell::new(1, 0), 0.5));
        queue.push(QueueEntry::new(Cell::new(2, 0), 1.5));

        let popped: Vec<f64> = std::iter::from_fn(|| queue.pop().map(|entry| entry.cost.0))
            .collect();
        assert_eq!(popped, vec![0.5, 1.5, 2.5]);
    }

    #[test]
    fn equal_costs_pop_in_cell_order() {
        let mut queue = BinaryHeap::new();
        queue.push(QueueEntry::new(Cell::new(5, 0), 1.0));
        queue.push(QueueEntry::new(Cell::new(1, 3), 1.0));
        queue.push(QueueEntry::new(Cell::new(1, 1), 1.0));

        let popped: Vec<Cell> = std::iter::from_fn(|| queue.pop().map(|entry| entry.cell))
            .collect();
        assert_eq!(
            popped,
            vec![Cell::new(1, 1), Cell::new(1, 3), Cell::new(5, 0)]
        );
    }
}
