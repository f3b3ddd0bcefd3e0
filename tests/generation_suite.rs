use pcb_traces::board::{GridModel, map_obstacles};
use pcb_traces::{
    Board, Cell, CellRect, CornerPolicy, Direction, DrawCommand, GeneratorConfig, LineStyle, PixelRect, Theme,
    generate_with, render_svg,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn config(seed: u64) -> GeneratorConfig {
    GeneratorConfig {
        seed: Some(seed),
        ..GeneratorConfig::default()
    }
}

fn obstacle_sets() -> Vec<Vec<PixelRect>> {
    vec![
        Vec::new(),
        vec![PixelRect::new(200.0, 150.0, 520.0, 330.0)],
        vec![
            PixelRect::new(0.0, 0.0, 180.0, 90.0),
            PixelRect::new(300.0, 300.0, 420.0, 460.0),
            PixelRect::new(560.0, 40.0, 900.0, 120.0),
        ],
    ]
}

#[test]
fn primitives_stay_on_grid_and_off_obstacles() {
    for obstacles in obstacle_sets() {
        for seed in 0..8 {
            for margin in [0, 2] {
                let cfg = GeneratorConfig {
                    obstacle_margin: margin,
                    ..config(seed)
                };
                let board = Board::regenerate(800.0, 480.0, &obstacles, &cfg).unwrap();
                for command in &board.commands {
                    for cell in command.cells() {
                        assert!(board.grid.contains(cell), "seed {seed}: {cell:?} off grid");
                        assert!(!board.grid.is_obstacle(cell), "seed {seed}: {cell:?} inside obstacle");
                        assert!(board.grid.is_occupied(cell), "seed {seed}: {cell:?} drawn but unclaimed");
                    }
                }
            }
        }
    }
}

#[test]
fn same_seed_same_board() {
    for obstacles in obstacle_sets() {
        let a = Board::regenerate(1024.0, 600.0, &obstacles, &config(2024)).unwrap();
        let b = Board::regenerate(1024.0, 600.0, &obstacles, &config(2024)).unwrap();
        assert_eq!(a.commands, b.commands);
        assert_eq!(a.anchors, b.anchors);
        assert_eq!(a.grid, b.grid);
    }
}

#[test]
fn different_seeds_differ() {
    let a = Board::regenerate(1024.0, 600.0, &[], &config(1)).unwrap();
    let b = Board::regenerate(1024.0, 600.0, &[], &config(2)).unwrap();
    assert_ne!(a.commands, b.commands);
}

#[test]
fn pre_claimed_cells_stay_claimed() {
    let mut grid = GridModel::new(40, 30);
    let claimed = [Cell::new(5, 5), Cell::new(20, 15), Cell::new(39, 29)];
    for cell in claimed {
        grid.mark_occupied(cell);
    }
    let before = grid.clone();
    let mut rng = StdRng::seed_from_u64(77);
    let mut commands: Vec<DrawCommand> = Vec::new();
    let footprints = [CellRect::new(Cell::new(10, 10), Cell::new(14, 13))];
    generate_with(&mut grid, &footprints, &mut rng, &mut commands, &config(77));

    for cell in before.cells() {
        if before.is_occupied(cell) {
            assert!(grid.is_occupied(cell));
        }
        if before.is_obstacle(cell) {
            assert!(grid.is_obstacle(cell));
        }
    }
    assert!(grid.occupied_count() > before.occupied_count());
}

#[test]
fn connectors_are_straight_and_short() {
    let obstacles = [
        PixelRect::new(150.0, 100.0, 450.0, 300.0),
        PixelRect::new(600.0, 350.0, 700.0, 420.0),
    ];
    for seed in 0..6 {
        let board = Board::regenerate(900.0, 500.0, &obstacles, &config(seed)).unwrap();
        let mut connectors = 0;
        for command in &board.commands {
            if let DrawCommand::Line {
                from,
                to,
                style: LineStyle::Connector,
            } = command
            {
                let dx = (to.x - from.x).abs();
                let dy = (to.y - from.y).abs();
                assert!(dx == 0 || dy == 0, "connector not axis aligned");
                assert!(dx + dy >= 1 && dx + dy <= 20, "connector spans {}", dx + dy);
                assert!(board.anchors.iter().any(|a| a.cell == *from));
                connectors += 1;
            }
        }
        assert_eq!(connectors, board.stats.connected_anchors);
    }
}

#[test]
fn obstacle_scenario_labels_directions() {
    let mut grid = GridModel::new(10, 10);
    let mut sink: Vec<DrawCommand> = Vec::new();
    let footprint = PixelRect::new(20.0, 20.0, 59.0, 59.0).to_cells(10.0);
    let anchors = map_obstacles(&mut grid, &[footprint], 0, CornerPolicy::Include, &mut sink);

    assert_eq!(anchors.len(), 16);
    for anchor in &anchors {
        let inward = match anchor.direction {
            Direction::Up => anchor.cell.step(Direction::Down, 1),
            Direction::Down => anchor.cell.step(Direction::Up, 1),
            Direction::Left => anchor.cell.step(Direction::Right, 1),
            Direction::Right => anchor.cell.step(Direction::Left, 1),
        };
        assert!(grid.is_obstacle(inward), "{anchor:?} does not face away from the obstacle");
    }
}

#[test]
fn svg_contains_every_primitive() {
    let obstacles = [PixelRect::new(100.0, 100.0, 300.0, 200.0)];
    let board = Board::regenerate(400.0, 300.0, &obstacles, &config(8)).unwrap();
    let svg = render_svg(&board, &Theme::classic());
    assert!(svg.starts_with("<svg"));
    assert!(svg.ends_with("</svg>"));
    assert!(svg.contains("width=\"400\" height=\"300\""));
    let primitives = svg.matches("<line").count() + svg.matches("<circle").count();
    assert_eq!(primitives, board.commands.len());
    assert!(svg.contains("pcb-border-pad"));
}
