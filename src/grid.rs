use core::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use grid_util::point::Point;
use log::info;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::cell::Cell;
use crate::error::{Error, Result};
use crate::{COLS, DEFAULT_WEIGHT, HEAVY_WEIGHT, MAX_WEIGHT, ROWS};

/// Orthogonal offsets in the fixed exploration order: up, down, left, right.
const NEIGHBOUR_OFFSETS: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// A fixed-size, row-major grid of [Cell]s. Points use `x` for the column and `y` for the row.
///
/// The edit operations (`set_start`, `toggle_wall`, ...) maintain the role invariants: at most
/// one start, at most one target, and walls never carry either role. They index the grid
/// directly and panic on points outside of it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Default for Grid {
    fn default() -> Grid {
        Grid::new(ROWS, COLS)
    }
}

impl Grid {
    /// Creates a grid of default cells: no roles, no walls, weight 1, search state cleared.
    pub fn new(rows: usize, cols: usize) -> Grid {
        let cells = (0..rows)
            .flat_map(|y| (0..cols).map(move |x| Cell::new(Point::new(x as i32, y as i32))))
            .collect();
        Grid { rows, cols, cells }
    }
    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.cols && (p.y as usize) < self.rows
    }
    pub(crate) fn ix(&self, p: Point) -> usize {
        assert!(self.in_bounds(p), "{} lies outside the {}x{} grid", p, self.rows, self.cols);
        p.y as usize * self.cols + p.x as usize
    }
    pub fn get(&self, p: Point) -> Option<&Cell> {
        if self.in_bounds(p) {
            Some(&self.cells[self.ix(p)])
        } else {
            None
        }
    }
    /// Cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Up to four orthogonal in-bounds neighbours, always in the order up, down, left, right.
    /// Walls are included; the searches filter them out.
    pub fn neighbors(&self, p: Point) -> SmallVec<[Point; 4]> {
        NEIGHBOUR_OFFSETS
            .iter()
            .map(|&(dx, dy)| Point::new(p.x + dx, p.y + dy))
            .filter(|n| self.in_bounds(*n))
            .collect()
    }

    /// Returns a copy of the grid with all search state cleared and roles, walls and weights
    /// untouched. Every search runs on such a copy.
    pub fn reset_search_state(&self) -> Grid {
        let mut copy = self.clone();
        copy.clear_search_state();
        copy
    }
    /// In-place variant of [reset_search_state](Self::reset_search_state).
    pub fn clear_search_state(&mut self) {
        self.cells.iter_mut().for_each(Cell::reset_search_state);
    }

    pub fn start(&self) -> Option<Point> {
        self.cells.iter().find(|c| c.is_start).map(Cell::pos)
    }
    pub fn target(&self) -> Option<Point> {
        self.cells.iter().find(|c| c.is_target).map(Cell::pos)
    }
    /// The placed start and target, failing fast if either is missing.
    pub fn endpoints(&self) -> Result<(Point, Point)> {
        let start = self.start().ok_or(Error::MissingStart)?;
        let target = self.target().ok_or(Error::MissingTarget)?;
        Ok((start, target))
    }
    /// Checks the search preconditions: both points are on the grid and carry the start and
    /// target roles. Role exclusivity then guarantees they are distinct and not walls.
    pub fn check_endpoints(&self, start: Point, target: Point) -> Result<()> {
        for p in [start, target] {
            if !self.in_bounds(p) {
                return Err(Error::OutOfBounds {
                    point: p,
                    rows: self.rows,
                    cols: self.cols,
                });
            }
        }
        if !self[start].is_start {
            return Err(Error::NotStart(start));
        }
        if !self[target].is_target {
            return Err(Error::NotTarget(target));
        }
        Ok(())
    }

    /// Moves the start role to `p`. The previous start reverts to a plain cell; `p` loses any
    /// wall or target role and gets the default weight.
    pub fn set_start(&mut self, p: Point) {
        if let Some(old) = self.start() {
            let ix = self.ix(old);
            self.cells[ix].is_start = false;
            self.cells[ix].weight = DEFAULT_WEIGHT;
        }
        let ix = self.ix(p);
        let cell = &mut self.cells[ix];
        cell.clear_roles();
        cell.is_start = true;
    }
    /// Moves the target role to `p`, mirroring [set_start](Self::set_start).
    pub fn set_target(&mut self, p: Point) {
        if let Some(old) = self.target() {
            let ix = self.ix(old);
            self.cells[ix].is_target = false;
            self.cells[ix].weight = DEFAULT_WEIGHT;
        }
        let ix = self.ix(p);
        let cell = &mut self.cells[ix];
        cell.clear_roles();
        cell.is_target = true;
    }
    /// Flips the wall flag of a plain cell. Start and target cells are left alone.
    pub fn toggle_wall(&mut self, p: Point) {
        let ix = self.ix(p);
        let cell = &mut self.cells[ix];
        if !cell.is_endpoint() {
            cell.is_wall = !cell.is_wall;
            cell.weight = DEFAULT_WEIGHT;
        }
    }
    /// Toggles a plain cell between the default weight and [HEAVY_WEIGHT].
    pub fn toggle_weight(&mut self, p: Point) {
        let ix = self.ix(p);
        let cell = &mut self.cells[ix];
        if !cell.is_endpoint() && !cell.is_wall {
            cell.weight = if cell.weight == DEFAULT_WEIGHT {
                HEAVY_WEIGHT
            } else {
                DEFAULT_WEIGHT
            };
        }
    }
    /// Sets an explicit traversal cost in `1..=MAX_WEIGHT` on a plain cell. Returns whether the
    /// weight was applied.
    pub fn set_weight(&mut self, p: Point, weight: u32) -> Result<bool> {
        if weight == 0 {
            return Err(Error::ZeroWeight(p));
        }
        if weight > MAX_WEIGHT {
            return Err(Error::WeightTooHeavy {
                point: p,
                weight,
                max: MAX_WEIGHT,
            });
        }
        let ix = self.ix(p);
        let cell = &mut self.cells[ix];
        if cell.is_endpoint() || cell.is_wall {
            return Ok(false);
        }
        cell.weight = weight;
        Ok(true)
    }
    /// Restores `p` to a default cell.
    pub fn erase(&mut self, p: Point) {
        let ix = self.ix(p);
        self.cells[ix].clear_roles();
    }
    /// Restores every cell to its default state.
    pub fn reset(&mut self) {
        *self = Grid::new(self.rows, self.cols);
    }

    /// Generates a [UnionFind] structure linking every open cell to its open 4-neighbours.
    pub fn components(&self) -> UnionFind<usize> {
        let mut components = UnionFind::new(self.cells.len());
        for cell in self.cells.iter().filter(|c| !c.is_wall) {
            let p = cell.pos();
            let parent_ix = self.ix(p);
            [Point::new(p.x + 1, p.y), Point::new(p.x, p.y + 1)]
                .into_iter()
                .filter(|n| self.in_bounds(*n) && !self[*n].is_wall)
                .for_each(|n| {
                    components.union(parent_ix, self.ix(n));
                });
        }
        components
    }
    /// Checks if `a` and `b` are open cells on the same connected component. A search between
    /// two points for which this is false is guaranteed to exhaust.
    pub fn reachable(&self, a: Point, b: Point) -> bool {
        if !self.in_bounds(a) || !self.in_bounds(b) || self[a].is_wall || self[b].is_wall {
            return false;
        }
        let reachable = self.components().equiv(self.ix(a), self.ix(b));
        if !reachable {
            info!("{} and {} are on different components", a, b);
        }
        reachable
    }
}

impl Index<Point> for Grid {
    type Output = Cell;

    fn index(&self, p: Point) -> &Cell {
        &self.cells[self.ix(p)]
    }
}

impl IndexMut<Point> for Grid {
    fn index_mut(&mut self, p: Point) -> &mut Cell {
        let ix = self.ix(p);
        &mut self.cells[ix]
    }
}

fn tile(cell: &Cell) -> char {
    if cell.is_start {
        'S'
    } else if cell.is_target {
        'T'
    } else if cell.is_wall {
        '#'
    } else if cell.weight == DEFAULT_WEIGHT {
        '.'
    } else {
        char::from_digit(cell.weight, 10).unwrap_or('9')
    }
}

/// Prints one line per row using the tiles accepted by [FromStr]: `.` open, `#` wall,
/// `S` start, `T` target and `2`-`9` for weighted cells.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.chunks(self.cols.max(1)) {
            let line: String = row.iter().map(tile).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl FromStr for Grid {
    type Err = Error;

    /// Parses a layout with one line per row. Blank lines and surrounding whitespace are
    /// ignored so layouts can be written as indented string literals.
    fn from_str(s: &str) -> Result<Grid> {
        let lines: Vec<&str> = s.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        let cols = lines.first().ok_or(Error::EmptyLayout)?.chars().count();
        let mut grid = Grid::new(lines.len(), cols);
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != cols {
                return Err(Error::RaggedRow {
                    row,
                    expected: cols,
                    found,
                });
            }
            for (col, tile) in line.chars().enumerate() {
                let p = Point::new(col as i32, row as i32);
                match tile {
                    '.' => {}
                    '#' => grid.toggle_wall(p),
                    'S' => {
                        if grid.start().is_some() {
                            return Err(Error::DuplicateStart(p));
                        }
                        grid.set_start(p);
                    }
                    'T' => {
                        if grid.target().is_some() {
                            return Err(Error::DuplicateTarget(p));
                        }
                        grid.set_target(p);
                    }
                    '1'..='9' => {
                        let weight = tile.to_digit(10).unwrap_or(DEFAULT_WEIGHT);
                        grid.set_weight(p, weight)?;
                    }
                    _ => return Err(Error::UnknownTile { tile, row, col }),
                }
            }
        }
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbours_in_fixed_order() {
        let grid = Grid::new(3, 3);
        let centre = grid.neighbors(Point::new(1, 1));
        assert_eq!(
            centre.as_slice(),
            &[
                Point::new(1, 0),
                Point::new(1, 2),
                Point::new(0, 1),
                Point::new(2, 1)
            ]
        );
        // Corners only keep the in-bounds down and right neighbours.
        let corner = grid.neighbors(Point::new(0, 0));
        assert_eq!(corner.as_slice(), &[Point::new(0, 1), Point::new(1, 0)]);
    }

    #[test]
    fn default_grid_dimensions() {
        let grid = Grid::default();
        assert_eq!((grid.rows(), grid.cols()), (ROWS, COLS));
        assert_eq!(grid.len(), ROWS * COLS);
        assert!(grid.cells().all(|c| c.weight() == DEFAULT_WEIGHT && !c.is_wall()));
    }

    #[test]
    fn start_and_target_are_unique_and_exclusive() {
        let mut grid = Grid::new(2, 3);
        let a = Point::new(0, 0);
        let b = Point::new(2, 1);
        grid.toggle_wall(a);
        grid.set_start(a);
        assert!(grid[a].is_start() && !grid[a].is_wall());
        grid.set_start(b);
        assert_eq!(grid.start(), Some(b));
        assert!(!grid[a].is_start());
        grid.set_target(b);
        assert_eq!(grid.target(), Some(b));
        assert_eq!(grid.start(), None);
        assert_eq!(grid.endpoints(), Err(Error::MissingStart));
    }

    #[test]
    fn walls_and_weights_skip_endpoints() {
        let mut grid = Grid::new(1, 3);
        let s = Point::new(0, 0);
        let p = Point::new(1, 0);
        grid.set_start(s);
        grid.toggle_wall(s);
        grid.toggle_weight(s);
        assert!(!grid[s].is_wall());
        assert_eq!(grid[s].weight(), DEFAULT_WEIGHT);

        grid.toggle_weight(p);
        assert_eq!(grid[p].weight(), HEAVY_WEIGHT);
        grid.toggle_wall(p);
        assert!(grid[p].is_wall());
        assert_eq!(grid[p].weight(), DEFAULT_WEIGHT);
        grid.toggle_weight(p);
        assert_eq!(grid[p].weight(), DEFAULT_WEIGHT);
        assert_eq!(grid.set_weight(p, 3), Ok(false));
        grid.erase(p);
        assert_eq!(grid.set_weight(p, 3), Ok(true));
        assert_eq!(grid.set_weight(p, 0), Err(Error::ZeroWeight(p)));
    }

    #[test]
    fn multi_digit_weights_are_rejected() {
        let mut grid = Grid::new(1, 3);
        let p = Point::new(1, 0);
        assert_eq!(
            grid.set_weight(p, 12),
            Err(Error::WeightTooHeavy {
                point: p,
                weight: 12,
                max: MAX_WEIGHT
            })
        );
        assert_eq!(grid[p].weight(), DEFAULT_WEIGHT);
        assert_eq!(grid.set_weight(p, MAX_WEIGHT), Ok(true));
        let printed = grid.to_string();
        assert_eq!(printed, ".9.\n");
        assert_eq!(printed.parse::<Grid>(), Ok(grid));
    }

    #[test]
    fn reset_search_state_is_idempotent() {
        let mut grid: Grid = "S.#\n.5T".parse().unwrap();
        for cell in grid.cells.iter_mut() {
            cell.visited = true;
            cell.g_cost = 7;
            cell.parent = Some(Point::new(0, 0));
        }
        let once = grid.reset_search_state();
        let twice = once.reset_search_state();
        assert_eq!(once, twice);
        assert!(once.cells().all(|c| !c.visited && c.parent.is_none()));
        assert_eq!(once.to_string(), grid.to_string());
    }

    #[test]
    fn layout_round_trip() {
        let layout = "S..#\n.#5.\n...T\n";
        let grid: Grid = layout.parse().unwrap();
        assert_eq!((grid.rows(), grid.cols()), (3, 4));
        assert_eq!(grid.start(), Some(Point::new(0, 0)));
        assert_eq!(grid.target(), Some(Point::new(3, 2)));
        assert_eq!(grid[Point::new(2, 1)].weight(), 5);
        assert_eq!(grid.to_string(), layout);
    }

    #[test]
    fn layout_errors() {
        assert_eq!("".parse::<Grid>(), Err(Error::EmptyLayout));
        assert_eq!(
            "...\n..".parse::<Grid>(),
            Err(Error::RaggedRow {
                row: 1,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            "S.x".parse::<Grid>(),
            Err(Error::UnknownTile {
                tile: 'x',
                row: 0,
                col: 2
            })
        );
        assert_eq!(
            "S.S".parse::<Grid>(),
            Err(Error::DuplicateStart(Point::new(2, 0)))
        );
    }

    #[test]
    fn endpoint_preconditions() {
        let grid: Grid = "S..\n..T".parse().unwrap();
        let s = Point::new(0, 0);
        let t = Point::new(2, 1);
        assert_eq!(grid.check_endpoints(s, t), Ok(()));
        assert_eq!(grid.check_endpoints(t, s), Err(Error::NotStart(t)));
        assert_eq!(
            grid.check_endpoints(s, Point::new(3, 0)),
            Err(Error::OutOfBounds {
                point: Point::new(3, 0),
                rows: 2,
                cols: 3
            })
        );
    }

    /// Tests whether open cells are correctly mapped to different connected components.
    #[test]
    fn component_generation() {
        // S#.
        // .#.
        // .#T
        let grid: Grid = "S#.\n.#.\n.#T".parse().unwrap();
        assert!(grid.reachable(Point::new(0, 0), Point::new(0, 2)));
        assert!(!grid.reachable(Point::new(0, 0), Point::new(2, 2)));
        assert!(!grid.reachable(Point::new(0, 0), Point::new(1, 1)));
        let mut open = grid.clone();
        open.toggle_wall(Point::new(1, 2));
        assert!(open.reachable(Point::new(0, 0), Point::new(2, 2)));
    }
}
