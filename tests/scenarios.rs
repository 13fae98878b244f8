use std::ops::ControlFlow;
use std::sync::mpsc::sync_channel;
use std::thread;

use grid_explorer::{
    run_strategy, Cell, ChannelSink, Error, Grid, NoProgress, Point, StepKind, StepRecorder,
    Strategy, COLS, ROWS,
};

/// Builds an open grid; points are given as (row, col).
fn open_grid(rows: usize, cols: usize, start: (i32, i32), target: (i32, i32)) -> (Grid, Point, Point) {
    let mut grid = Grid::new(rows, cols);
    let start = Point::new(start.1, start.0);
    let target = Point::new(target.1, target.0);
    grid.set_start(start);
    grid.set_target(target);
    (grid, start, target)
}

#[test]
fn open_five_by_five() {
    let (grid, start, target) = open_grid(5, 5, (0, 0), (4, 4));
    for strategy in Strategy::ALL {
        let path = run_strategy(strategy, &grid, start, target, &mut NoProgress).unwrap();
        assert!(path.is_contiguous());
        match strategy {
            Strategy::Dfs => assert!(path.len() >= 9),
            _ => assert_eq!(path.len(), 9),
        }
    }
    let astar = run_strategy(Strategy::AStar, &grid, start, target, &mut NoProgress).unwrap();
    assert_eq!(astar.total_cost(), Some(8));
}

#[test]
fn wall_row_with_gap() {
    let (mut grid, start, target) = open_grid(ROWS, COLS, (0, 0), (4, 0));
    for col in 0..COLS as i32 - 1 {
        grid.toggle_wall(Point::new(col, 2));
    }
    let gap = Point::new(COLS as i32 - 1, 2);
    // Across to the last column, down through the gap and back again.
    let hops = 2 * (COLS - 1) + 4;
    for strategy in Strategy::ALL {
        let path = run_strategy(strategy, &grid, start, target, &mut NoProgress).unwrap();
        assert!(path.points().contains(&gap), "{strategy} did not use the gap");
        match strategy {
            Strategy::Dfs => assert!(path.len() > hops),
            _ => assert_eq!(path.len(), hops + 1),
        }
    }

    grid.toggle_wall(gap);
    assert!(!grid.reachable(start, target));
    for strategy in Strategy::ALL {
        let path = run_strategy(strategy, &grid, start, target, &mut NoProgress).unwrap();
        assert!(path.is_empty());
    }
}

#[test]
fn enclosed_target_yields_no_path() {
    let grid: Grid = "
        S....
        ..#..
        .#T#.
        ..#..
    "
    .parse()
    .unwrap();
    let (start, target) = grid.endpoints().unwrap();
    for strategy in Strategy::ALL {
        let mut recorder = StepRecorder::new();
        let path = run_strategy(strategy, &grid, start, target, &mut recorder).unwrap();
        assert!(path.is_empty());
        assert!(recorder.points(StepKind::Path).is_empty());
        assert!(!recorder.points(StepKind::Visited).contains(&target));
    }
}

#[test]
fn repeated_runs_are_identical() {
    let mut grid = Grid::default();
    grid.set_start(Point::new(3, 10));
    grid.set_target(Point::new(35, 4));
    for y in 2..18 {
        grid.toggle_wall(Point::new(20, y));
    }
    grid.toggle_weight(Point::new(21, 5));
    for strategy in Strategy::ALL {
        let (start, target) = grid.endpoints().unwrap();
        let mut first = StepRecorder::new();
        let mut second = StepRecorder::new();
        let a = run_strategy(strategy, &grid, start, target, &mut first).unwrap();
        let b = run_strategy(strategy, &grid, start, target, &mut second).unwrap();
        assert_eq!(first.steps, second.steps);
        assert_eq!(a, b);
        assert!(!a.is_empty());
    }
}

#[test]
fn channel_sink_paces_search_from_another_thread() {
    let (grid, start, target) = open_grid(6, 6, (1, 1), (4, 5));
    let mut recorder = StepRecorder::new();
    let expected = Strategy::AStar
        .search(&grid, start, target, &mut recorder)
        .unwrap();

    let (sender, receiver) = sync_channel(0);
    let worker = thread::spawn(move || {
        let mut sink = ChannelSink::new(sender);
        Strategy::AStar.search(&grid, start, target, &mut sink)
    });
    let received: Vec<_> = receiver.iter().collect();
    let path = worker.join().unwrap().unwrap();
    assert_eq!(received, recorder.steps);
    assert_eq!(path, expected);
}

#[test]
fn hanging_up_cancels_search() {
    let (grid, start, target) = open_grid(6, 6, (0, 0), (5, 5));
    let (sender, receiver) = sync_channel(0);
    let worker = thread::spawn(move || {
        let mut sink = ChannelSink::new(sender);
        Strategy::Bfs.search(&grid, start, target, &mut sink)
    });
    let first = receiver.recv().unwrap();
    assert_eq!(first.point, start);
    drop(receiver);
    assert_eq!(worker.join().unwrap(), Err(Error::Cancelled));
}

#[test]
fn closure_sink_sees_live_costs() {
    let (grid, start, target) = open_grid(3, 4, (0, 0), (2, 3));
    let mut path_costs = Vec::new();
    let mut sink = |cell: &Cell, kind: StepKind| {
        if kind == StepKind::Path {
            path_costs.push(cell.g_cost);
        }
        ControlFlow::Continue(())
    };
    let path = run_strategy(Strategy::Dijkstra, &grid, start, target, &mut sink).unwrap();
    assert_eq!(path_costs, vec![1, 2, 3, 4]);
    assert_eq!(path.total_cost(), Some(5));
}
