use grid_util::point::Point;
use log::info;

use crate::error::Result;
use crate::grid::Grid;
use crate::path::Path;
use crate::progress::ProgressSink;
use crate::solver::{announce_visited, finish, FxIndexSet, GridSolver};
use crate::UNREACHABLE;

/// Uniform-cost search over every open cell.
///
/// Each relaxation adds a step cost of 1 and does not read cell weights, so the result is the
/// minimum-cost path under unit step costs. [AstarSolver](crate::AstarSolver) is the strategy
/// that honours weights.
#[derive(Clone, Copy, Debug, Default)]
pub struct DijkstraSolver;

impl GridSolver for DijkstraSolver {
    fn name(&self) -> &'static str {
        "dijkstra"
    }

    fn explore<S: ProgressSink>(
        &self,
        scratch: &mut Grid,
        start: Point,
        target: Point,
        sink: &mut S,
    ) -> Result<Path> {
        scratch[start].g_cost = 0;
        // Open cells in row-major order; the stable sort keeps that order among equal costs.
        let mut unvisited: FxIndexSet<Point> = scratch
            .cells()
            .filter(|c| !c.is_wall())
            .map(|c| c.pos())
            .collect();

        let mut expanded = 0;
        while !unvisited.is_empty() {
            unvisited.sort_by(|a, b| scratch[*a].g_cost.cmp(&scratch[*b].g_cost));
            let Some(current) = unvisited.shift_remove_index(0) else {
                break;
            };
            if scratch[current].g_cost == UNREACHABLE {
                break;
            }
            scratch[current].visited = true;
            announce_visited(sink, &scratch[current])?;
            if current == target {
                info!("dijkstra: reached {} after expanding {} cells", target, expanded);
                return finish(scratch, target, sink);
            }
            expanded += 1;

            let cost = scratch[current].g_cost + 1;
            for n in scratch.neighbors(current) {
                let cell = &mut scratch[n];
                if cell.visited || cell.is_wall() {
                    continue;
                }
                if cost < cell.g_cost {
                    cell.g_cost = cost;
                    cell.parent = Some(current);
                }
            }
        }
        info!("dijkstra: {} unreachable after expanding {} cells", target, expanded);
        Ok(Path::default())
    }
}
