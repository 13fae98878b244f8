use grid_util::point::Point;
use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong before or during a search. Not finding a route is not an
/// error: searches report it with an empty [Path](crate::Path).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("no start cell has been placed on the grid")]
    MissingStart,
    #[error("no target cell has been placed on the grid")]
    MissingTarget,
    #[error("{point} lies outside the {rows}x{cols} grid")]
    OutOfBounds { point: Point, rows: usize, cols: usize },
    #[error("{0} is not marked as the start cell")]
    NotStart(Point),
    #[error("{0} is not marked as the target cell")]
    NotTarget(Point),
    #[error("cell weight at {0} must be positive")]
    ZeroWeight(Point),
    #[error("cell weight {weight} at {point} exceeds the maximum of {max}")]
    WeightTooHeavy { point: Point, weight: u32, max: u32 },
    #[error("unknown strategy `{0}`, expected one of bfs, dfs, dijkstra, aStar")]
    UnknownStrategy(String),

    #[error("grid layout is empty")]
    EmptyLayout,
    #[error("row {row} has {found} tiles, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown tile {tile:?} at row {row}, column {col}")]
    UnknownTile { tile: char, row: usize, col: usize },
    #[error("layout places more than one start cell (second at {0})")]
    DuplicateStart(Point),
    #[error("layout places more than one target cell (second at {0})")]
    DuplicateTarget(Point),

    /// The progress sink asked the search to stop.
    #[error("search cancelled by the progress sink")]
    Cancelled,
}
