use grid_util::point::Point;
use log::info;

use crate::error::Result;
use crate::grid::Grid;
use crate::path::Path;
use crate::progress::{ProgressSink, StepKind};
use crate::solver::{announce, finish, GridSolver};

/// Depth-first search. Returns the first route it stumbles on, with no optimality guarantee.
#[derive(Clone, Copy, Debug, Default)]
pub struct DfsSolver;

impl GridSolver for DfsSolver {
    fn name(&self) -> &'static str {
        "dfs"
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

        let mut stack = vec![start];
        let mut expanded = 0;
        while let Some(current) = stack.pop() {
            if current == target {
                info!("dfs: reached {} after expanding {} cells", target, expanded);
                return finish(scratch, target, sink);
            }
            expanded += 1;
            let cost = scratch[current].g_cost + 1;
            // Pushed in reverse so the stack pops them up, down, left, right.
            for n in scratch.neighbors(current).into_iter().rev() {
                let cell = &mut scratch[n];
                if cell.visited || cell.is_wall() {
                    continue;
                }
                cell.visited = true;
                cell.parent = Some(current);
                cell.g_cost = cost;
                stack.push(n);
                if !cell.is_target() {
                    announce(sink, cell, StepKind::Visited)?;
                }
            }
        }
        info!("dfs: stack exhausted after {} cells, {} unreachable", expanded, target);
        Ok(Path::default())
    }
}
