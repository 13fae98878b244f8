use core::fmt;
use std::ops::ControlFlow;
use std::str::FromStr;

use fxhash::FxBuildHasher;
use grid_util::point::Point;
use indexmap::IndexSet;
use log::{debug, warn};

use crate::cell::Cell;
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::path::{reconstruct, Path};
use crate::progress::{ProgressSink, StepKind};

pub mod astar;
pub mod bfs;
pub mod dfs;
pub mod dijkstra;

pub use astar::AstarSolver;
pub use bfs::BfsSolver;
pub use dfs::DfsSolver;
pub use dijkstra::DijkstraSolver;

/// Insertion-ordered set used as the frontier of the priority-driven searches. Its stable
/// sort keeps container order among equal keys.
pub(crate) type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

pub trait GridSolver {
    /// Short name used in log messages.
    fn name(&self) -> &'static str;

    /// Runs the algorithm on `scratch`, a private grid copy with cleared search state whose
    /// endpoints have already been validated. Prefer [search](Self::search), which prepares
    /// the copy.
    fn explore<S: ProgressSink>(
        &self,
        scratch: &mut Grid,
        start: Point,
        target: Point,
        sink: &mut S,
    ) -> Result<Path>;

    /// Searches for a route from `start` to `target`, reporting every step to `sink`. The
    /// caller's grid is never modified. An empty path means the target is unreachable.
    fn search<S: ProgressSink>(
        &self,
        grid: &Grid,
        start: Point,
        target: Point,
        sink: &mut S,
    ) -> Result<Path> {
        grid.check_endpoints(start, target)?;
        debug!("{}: searching from {} to {}", self.name(), start, target);
        let mut scratch = grid.reset_search_state();
        let result = self.explore(&mut scratch, start, target, sink);
        if matches!(result, Err(Error::Cancelled)) {
            warn!("{}: cancelled by the progress sink", self.name());
        }
        result
    }
}

/// Reports a step, turning a request to stop into [Error::Cancelled].
pub(crate) fn announce<S: ProgressSink>(sink: &mut S, cell: &Cell, kind: StepKind) -> Result<()> {
    match sink.on_step(cell, kind) {
        ControlFlow::Continue(()) => Ok(()),
        ControlFlow::Break(()) => Err(Error::Cancelled),
    }
}

/// Reports a visited cell unless it is the start or the target.
pub(crate) fn announce_visited<S: ProgressSink>(sink: &mut S, cell: &Cell) -> Result<()> {
    if cell.is_endpoint() {
        Ok(())
    } else {
        announce(sink, cell, StepKind::Visited)
    }
}

/// Reconstructs the route ending at `target` and reports its inner cells in path order.
pub(crate) fn finish<S: ProgressSink>(
    scratch: &mut Grid,
    target: Point,
    sink: &mut S,
) -> Result<Path> {
    let path = reconstruct(scratch, target);
    for cell in path.iter().filter(|c| !c.is_endpoint()) {
        announce(sink, cell, StepKind::Path)?;
    }
    Ok(path)
}

/// Tag selecting one of the four traversal strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    Bfs,
    Dfs,
    Dijkstra,
    AStar,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Bfs,
        Strategy::Dfs,
        Strategy::Dijkstra,
        Strategy::AStar,
    ];

    /// Canonical name: `bfs`, `dfs`, `dijkstra` or `aStar`.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Bfs => "bfs",
            Strategy::Dfs => "dfs",
            Strategy::Dijkstra => "dijkstra",
            Strategy::AStar => "aStar",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Strategy::Bfs => "BFS finds the shortest path on unweighted grids (every step costs 1).",
            Strategy::Dfs => {
                "DFS finds *a* path, not necessarily the shortest or cheapest one. \
                 It explores deeply before backtracking."
            }
            Strategy::Dijkstra => {
                "Dijkstra finds the lowest-cost path, exploring outwards in a wave pattern."
            }
            Strategy::AStar => {
                "A* finds the lowest-cost path on weighted grids more efficiently than Dijkstra, \
                 using a heuristic to steer towards the target."
            }
        }
    }

    /// Whether the strategy reads cell weights. Only A* does; Dijkstra counts every step as 1.
    pub fn uses_weights(&self) -> bool {
        matches!(self, Strategy::AStar)
    }

    pub fn search<S: ProgressSink>(
        &self,
        grid: &Grid,
        start: Point,
        target: Point,
        sink: &mut S,
    ) -> Result<Path> {
        match self {
            Strategy::Bfs => BfsSolver.search(grid, start, target, sink),
            Strategy::Dfs => DfsSolver.search(grid, start, target, sink),
            Strategy::Dijkstra => DijkstraSolver.search(grid, start, target, sink),
            Strategy::AStar => AstarSolver::new().search(grid, start, target, sink),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Strategy> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" => Ok(Strategy::Bfs),
            "dfs" => Ok(Strategy::Dfs),
            "dijkstra" => Ok(Strategy::Dijkstra),
            "astar" | "a*" => Ok(Strategy::AStar),
            _ => Err(Error::UnknownStrategy(s.to_owned())),
        }
    }
}
