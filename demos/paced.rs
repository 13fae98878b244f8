use std::sync::mpsc::sync_channel;
use std::thread;
use std::time::Duration;

use grid_explorer::{ChannelSink, Grid, Point, StepKind, Strategy};

// Runs A* on a worker thread and reveals its progress one step at a time. The zero-capacity
// channel means the search only advances after the loop below has taken the previous step,
// so the sleep durations pace the whole exploration. Pass a strategy name (bfs, dfs, dijkstra
// or aStar) as the first argument to pick another strategy.

fn main() {
    let strategy: Strategy = std::env::args()
        .nth(1)
        .map(|s| s.parse().expect("unknown strategy"))
        .unwrap_or(Strategy::AStar);

    let mut grid = Grid::new(8, 16);
    grid.set_start(Point::new(1, 4));
    grid.set_target(Point::new(14, 3));
    for y in 1..7 {
        grid.toggle_wall(Point::new(7, y));
    }
    for x in 9..13 {
        grid.toggle_weight(Point::new(x, 3));
    }
    println!("{}", grid);

    let (start, target) = grid.endpoints().expect("start and target are placed");
    let (sender, receiver) = sync_channel(0);
    let worker = thread::spawn(move || {
        let mut sink = ChannelSink::new(sender);
        strategy.search(&grid, start, target, &mut sink)
    });

    for step in receiver {
        let delay = match step.kind {
            StepKind::Visited => 30,
            StepKind::Path => 80,
        };
        println!("{:?} {} (cost {})", step.kind, step.point, step.g_cost);
        thread::sleep(Duration::from_millis(delay));
    }

    match worker.join().expect("search thread panicked") {
        Ok(path) if path.is_empty() => println!("No path found"),
        Ok(path) => println!(
            "{}: {} cells, total cost {:?}",
            strategy,
            path.len(),
            path.total_cost()
        ),
        Err(e) => println!("{}: {}", strategy, e),
    }
}
