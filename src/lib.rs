//! # grid_explorer
//!
//! Step-by-step route search on a 2-D grid of cells with walls and per-cell weights. Four
//! interchangeable strategies are provided:
//! [breadth-first search](https://en.wikipedia.org/wiki/Breadth-first_search),
//! [depth-first search](https://en.wikipedia.org/wiki/Depth-first_search),
//! [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm) and
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) with a Manhattan heuristic.
//! Movement is 4-directional.
//!
//! Every search works on a private copy of the caller's [Grid] and reports each visited cell
//! and each cell of the final route to a [ProgressSink], waiting for the sink before taking
//! the next step. This makes it possible to reveal the exploration one cell at a time.
//!
//! Note that the cost models differ: BFS, DFS and Dijkstra count every step as 1, while A*
//! charges the weight of each entered cell.
mod cell;
mod error;
mod grid;
mod path;
pub mod progress;
pub mod solver;

pub use grid_util::point::Point;

pub use crate::cell::Cell;
pub use crate::error::{Error, Result};
pub use crate::grid::Grid;
pub use crate::path::{reconstruct, Path};
pub use crate::progress::{ChannelSink, NoProgress, ProgressSink, Step, StepKind, StepRecorder};
pub use crate::solver::{
    AstarSolver, BfsSolver, DfsSolver, DijkstraSolver, GridSolver, Strategy,
};

/// Number of rows of the default grid.
pub const ROWS: usize = 20;
/// Number of columns of the default grid.
pub const COLS: usize = 40;
/// Traversal cost of a plain cell.
pub const DEFAULT_WEIGHT: u32 = 1;
/// Weight applied by [Grid::toggle_weight].
pub const HEAVY_WEIGHT: u32 = 5;
/// Heaviest weight a cell can carry; layouts print weights as a single digit.
pub const MAX_WEIGHT: u32 = 9;
/// Default A* heuristic factor. Values above 1 make the heuristic inadmissible.
pub const HEURISTIC_FACTOR: f32 = 1.0;
/// Cost of a cell that has not been reached (the infinite distance).
pub const UNREACHABLE: u32 = u32::MAX;

/// Runs the selected strategy from `start` to `target`, reporting progress to `sink`. Returns
/// an empty [Path] if no route exists.
pub fn run_strategy<S: ProgressSink>(
    strategy: Strategy,
    grid: &Grid,
    start: Point,
    target: Point,
    sink: &mut S,
) -> Result<Path> {
    strategy.search(grid, start, target, sink)
}
