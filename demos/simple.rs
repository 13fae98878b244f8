use grid_explorer::{run_strategy, Grid, StepKind, StepRecorder, Strategy};

// In this example every strategy searches the same 5x7 grid
//  _______
// |S..#...|
// |.#.#.#.|
// |.#...#.|
// |.####5.|
// |......T|
//  _______
// where
// - # marks a wall
// - 5 marks a cell that costs 5 to enter (only A* reads weights)
// - S marks the start
// - T marks the target

fn main() {
    let grid: Grid = "
        S..#...
        .#.#.#.
        .#...#.
        .####5.
        ......T
    "
    .parse()
    .expect("valid layout");
    println!("{}", grid);
    let (start, target) = grid.endpoints().expect("start and target are placed");
    for strategy in Strategy::ALL {
        let mut recorder = StepRecorder::new();
        let path = run_strategy(strategy, &grid, start, target, &mut recorder)
            .expect("endpoints are valid");
        println!("{}: {}", strategy, strategy.description());
        println!(
            "  visited {} cells, path of {} cells, cost {:?}",
            recorder.points(StepKind::Visited).len(),
            path.len(),
            path.total_cost()
        );
        println!("  {:?}", path.points());
    }
}
