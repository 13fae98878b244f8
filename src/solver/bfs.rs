use std::collections::VecDeque;

use grid_util::point::Point;
use log::info;

use crate::error::Result;
use crate::grid::Grid;
use crate::path::Path;
use crate::progress::{ProgressSink, StepKind};
use crate::solver::{announce, finish, GridSolver};

/// Breadth-first search. Ignores weights; every step costs 1, so the returned path is the
/// shortest by hop count.
#[derive(Clone, Copy, Debug, Default)]
pub struct BfsSolver;

impl GridSolver for BfsSolver {
    fn name(&self) -> &'static str {
        "bfs"
    }

    fn explore<S: ProgressSink>(
        &self,
        scratch: &mut Grid,
        start: Point,
        target: Point,
        sink: &mut S,
    ) -> Result<Path> {
        scratch[start].g_cost = 0;
        scratch[start].visited = true;
        announce(sink, &scratch[start], StepKind::Visited)?;

        let mut queue = VecDeque::from([start]);
        let mut expanded = 0;
        while let Some(current) = queue.pop_front() {
            if current == target {
                info!("bfs: reached {} after expanding {} cells", target, expanded);
                return finish(scratch, target, sink);
            }
            expanded += 1;
            let cost = scratch[current].g_cost + 1;
            for n in scratch.neighbors(current) {
                let cell = &mut scratch[n];
                if cell.visited || cell.is_wall() {
                    continue;
                }
                cell.visited = true;
                cell.parent = Some(current);
                cell.g_cost = cost;
                queue.push_back(n);
                if !cell.is_target() {
                    announce(sink, cell, StepKind::Visited)?;
                }
            }
        }
        info!("bfs: frontier exhausted after {} cells, {} unreachable", expanded, target);
        Ok(Path::default())
    }
}
