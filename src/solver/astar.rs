use grid_util::point::Point;
use log::info;

use crate::error::Result;
use crate::grid::Grid;
use crate::path::Path;
use crate::progress::ProgressSink;
use crate::solver::{announce_visited, finish, FxIndexSet, GridSolver};
use crate::{HEURISTIC_FACTOR, UNREACHABLE};

/// A* over cell weights: entering a cell costs its weight. With the default heuristic factor
/// of 1.0 the Manhattan heuristic is consistent and the returned path has minimum cost.
#[derive(Clone, Debug)]
pub struct AstarSolver {
    pub heuristic_factor: f32,
}

impl Default for AstarSolver {
    fn default() -> AstarSolver {
        AstarSolver::new()
    }
}

impl AstarSolver {
    pub fn new() -> AstarSolver {
        AstarSolver {
            heuristic_factor: HEURISTIC_FACTOR,
        }
    }

    /// Just the Manhattan distance times the heuristic factor.
    pub fn heuristic(&self, p1: &Point, p2: &Point) -> u32 {
        (p1.manhattan_distance(p2) as f32 * self.heuristic_factor) as u32
    }
}

impl GridSolver for AstarSolver {
    fn name(&self) -> &'static str {
        "aStar"
    }

    fn explore<S: ProgressSink>(
        &self,
        scratch: &mut Grid,
        start: Point,
        target: Point,
        sink: &mut S,
    ) -> Result<Path> {
        let h = self.heuristic(&start, &target);
        let origin = &mut scratch[start];
        origin.g_cost = 0;
        origin.h_cost = h;
        origin.f_cost = h;

        let mut open: FxIndexSet<Point> = FxIndexSet::default();
        open.insert(start);
        let mut expanded = 0;
        while !open.is_empty() {
            open.sort_by(|a, b| scratch[*a].f_cost.cmp(&scratch[*b].f_cost));
            let Some(current) = open.shift_remove_index(0) else {
                break;
            };
            if scratch[current].g_cost == UNREACHABLE {
                break;
            }
            scratch[current].visited = true;
            announce_visited(sink, &scratch[current])?;
            if current == target {
                info!("aStar: reached {} after expanding {} cells", target, expanded);
                return finish(scratch, target, sink);
            }
            expanded += 1;

            let g = scratch[current].g_cost;
            for n in scratch.neighbors(current) {
                let cell = &mut scratch[n];
                if cell.visited || cell.is_wall() {
                    continue;
                }
                let cost = g.saturating_add(cell.weight());
                if cost < cell.g_cost {
                    let h = self.heuristic(&n, &target);
                    cell.parent = Some(current);
                    cell.g_cost = cost;
                    cell.h_cost = h;
                    cell.f_cost = cost.saturating_add(h);
                    // Already open cells are re-ranked by the next sort.
                    if open.insert(n) {
                        announce_visited(sink, cell)?;
                    }
                }
            }
        }
        info!("aStar: open set exhausted after {} cells, {} unreachable", expanded, target);
        Ok(Path::default())
    }
}
