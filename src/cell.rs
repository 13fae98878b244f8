use grid_util::point::Point;

use crate::{DEFAULT_WEIGHT, UNREACHABLE};

/// A single grid position. The role flags (start, target, wall) and the weight are only
/// changed through the edit operations on [Grid](crate::Grid), which keep them mutually
/// exclusive. The remaining public fields are search state, cleared before every run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pos: Point,
    pub(crate) is_start: bool,
    pub(crate) is_target: bool,
    pub(crate) is_wall: bool,
    pub(crate) weight: u32,
    /// Set once the cell has been discovered (BFS/DFS) or finalized (Dijkstra/A*).
    pub visited: bool,
    /// Set on the cells of the reported route.
    pub path: bool,
    /// Accumulated cost from the start, [UNREACHABLE] until discovered.
    pub g_cost: u32,
    /// Manhattan estimate to the target, only filled in by A*.
    pub h_cost: u32,
    /// `g_cost + h_cost`, the A* ranking key.
    pub f_cost: u32,
    /// Predecessor on the discovered route.
    pub parent: Option<Point>,
}

impl Cell {
    pub(crate) fn new(pos: Point) -> Cell {
        Cell {
            pos,
            is_start: false,
            is_target: false,
            is_wall: false,
            weight: DEFAULT_WEIGHT,
            visited: false,
            path: false,
            g_cost: UNREACHABLE,
            h_cost: UNREACHABLE,
            f_cost: UNREACHABLE,
            parent: None,
        }
    }

    /// Position with `x` as column and `y` as row.
    pub fn pos(&self) -> Point {
        self.pos
    }
    pub fn row(&self) -> usize {
        self.pos.y as usize
    }
    pub fn col(&self) -> usize {
        self.pos.x as usize
    }
    pub fn is_start(&self) -> bool {
        self.is_start
    }
    pub fn is_target(&self) -> bool {
        self.is_target
    }
    pub fn is_wall(&self) -> bool {
        self.is_wall
    }
    /// Either the start or the target. These are never announced as visited by the
    /// priority-driven searches.
    pub fn is_endpoint(&self) -> bool {
        self.is_start || self.is_target
    }
    pub fn weight(&self) -> u32 {
        self.weight
    }

    pub(crate) fn reset_search_state(&mut self) {
        self.visited = false;
        self.path = false;
        self.g_cost = UNREACHABLE;
        self.h_cost = UNREACHABLE;
        self.f_cost = UNREACHABLE;
        self.parent = None;
    }

    pub(crate) fn clear_roles(&mut self) {
        self.is_start = false;
        self.is_target = false;
        self.is_wall = false;
        self.weight = DEFAULT_WEIGHT;
    }
}
