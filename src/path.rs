use std::ops::Deref;

use grid_util::point::Point;
use itertools::Itertools;

use crate::cell::Cell;
use crate::grid::Grid;

/// A route from the start to the target, both inclusive. An empty path means no route exists.
/// The terminal cell carries the total cost in its `g_cost`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path {
    cells: Vec<Cell>,
}

impl Path {
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }
    pub fn points(&self) -> Vec<Point> {
        self.cells.iter().map(Cell::pos).collect()
    }
    /// The accumulated cost stored on the terminal cell, [None] for an empty path.
    pub fn total_cost(&self) -> Option<u32> {
        self.cells.last().map(|c| c.g_cost)
    }
    /// Whether every consecutive pair of cells is exactly one orthogonal step apart.
    pub fn is_contiguous(&self) -> bool {
        self.cells
            .iter()
            .tuple_windows()
            .all(|(a, b)| a.pos().manhattan_distance(&b.pos()) == 1)
    }
}

impl Deref for Path {
    type Target = [Cell];

    fn deref(&self) -> &[Cell] {
        &self.cells
    }
}

/// Walks the parent links from `terminal` back to a cell without a parent and returns the
/// cells in forward order, marking them as path cells in `grid`. The result is only accepted
/// when it begins at the start cell; otherwise the path is empty. The walk is bounded by the
/// cell count so a cyclic chain is rejected instead of looped over.
pub fn reconstruct(grid: &mut Grid, terminal: Point) -> Path {
    let mut points: Vec<Point> =
        std::iter::successors(Some(terminal), |p| grid[*p].parent)
            .take(grid.len() + 1)
            .collect();
    points.reverse();
    let valid = points.len() <= grid.len() && points.first().is_some_and(|p| grid[*p].is_start);
    if !valid {
        return Path::default();
    }
    let cells = points
        .into_iter()
        .map(|p| {
            grid[p].path = true;
            grid[p].clone()
        })
        .collect();
    Path { cells }
}
