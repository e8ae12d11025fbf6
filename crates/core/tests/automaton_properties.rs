//! Behavioral properties of the forest fire automaton
//!
//! Covers count conservation, cumulative burn bookkeeping, seed determinism,
//! the neighbor scan tie-break, boundary handling and the empirical spread
//! probabilities.

use approx::assert_abs_diff_eq;
use forest_fire_core::{AutomatonConfig, Cell, CellGrid, FireAutomaton, StatisticsRecord};

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// All-tree grid with fires at the given coordinates.
fn forest_with_fire(width: usize, height: usize, fires: &[(usize, usize)]) -> CellGrid {
    let mut grid = CellGrid::filled(width, height, Cell::Tree).unwrap();
    for &(x, y) in fires {
        grid.set(x, y, Cell::Fire).unwrap();
    }
    grid
}

fn certain_spread(width: usize, height: usize) -> AutomatonConfig {
    AutomatonConfig::default()
        .with_dimensions(width, height)
        .with_spread(1.0, 1.0)
}

fn assert_burned_is_running_sum(history: &[StatisticsRecord]) {
    let mut sum = 0_u64;
    let mut previous = 0_u64;
    for (i, record) in history.iter().enumerate() {
        assert_eq!(record.frame, i as u64, "frames must be consecutive from 0");
        sum += record.burning as u64;
        assert_eq!(record.burned, sum, "frame {}", record.frame);
        assert!(record.burned >= previous, "burned decreased at frame {}", record.frame);
        previous = record.burned;
    }
}

#[test]
fn test_counts_conserved_every_frame() {
    let configs = [
        AutomatonConfig::default().with_dimensions(40, 25),
        AutomatonConfig {
            width: 17,
            height: 31,
            forest_density: 0.9,
            ignition_density: 0.05,
            spontaneous_ignition_probability: 0.01,
            regrowth_probability: 0.05,
            seed: 3,
            ..Default::default()
        },
        AutomatonConfig::default().with_dimensions(1, 1),
    ];

    for config in configs {
        let cells = config.width * config.height;
        let mut automaton = FireAutomaton::new(config).unwrap();
        for _ in 0..60 {
            automaton.step();
        }
        for record in automaton.history() {
            assert_eq!(record.trees + record.burning + record.empty, cells);
        }
    }
}

#[test]
fn test_cumulative_burned_is_running_sum() {
    let config = AutomatonConfig {
        width: 60,
        height: 60,
        ignition_density: 0.01,
        regrowth_probability: 0.02,
        seed: 8,
        ..Default::default()
    };
    let mut automaton = FireAutomaton::new(config).unwrap();
    automaton.run(80);
    assert_burned_is_running_sum(automaton.history());
}

#[test]
fn test_no_ignition_sources_means_no_fire() {
    let config = AutomatonConfig {
        width: 50,
        height: 50,
        forest_density: 0.7,
        ignition_density: 0.0,
        spontaneous_ignition_probability: 0.0,
        regrowth_probability: 0.0,
        seed: 21,
        ..Default::default()
    };
    let mut automaton = FireAutomaton::new(config).unwrap();
    let initial = automaton.current_statistics();
    assert_eq!(initial.burning, 0);
    let initial_grid = automaton.grid().clone();

    for _ in 0..100 {
        let record = automaton.step();
        assert_eq!(record.burning, 0);
        assert_eq!(record.trees, initial.trees);
        assert_eq!(record.empty, initial.empty);
        assert_eq!(record.burned, 0);
    }
    assert_eq!(automaton.grid(), &initial_grid);
}

#[test]
fn test_single_interior_fire_ignites_all_eight_neighbors() {
    let mut automaton =
        FireAutomaton::from_grid(certain_spread(7, 7), forest_with_fire(7, 7, &[(3, 3)])).unwrap();

    let record = automaton.step();

    assert_eq!(automaton.cell_state(3, 3), Ok(Cell::Empty));
    for y in 0..7_usize {
        for x in 0..7_usize {
            let is_neighbor = x.abs_diff(3) <= 1 && y.abs_diff(3) <= 1 && (x, y) != (3, 3);
            let expected = if is_neighbor {
                Cell::Fire
            } else if (x, y) == (3, 3) {
                Cell::Empty
            } else {
                Cell::Tree
            };
            assert_eq!(automaton.cell_state(x, y), Ok(expected), "cell ({x}, {y})");
        }
    }
    assert_eq!((record.trees, record.burning, record.empty), (40, 8, 1));
    assert_eq!(record.burned, 9);
}

#[test]
fn test_same_seed_reproduces_grids_and_statistics() {
    let config = AutomatonConfig {
        width: 45,
        height: 30,
        ignition_density: 0.01,
        spontaneous_ignition_probability: 0.001,
        regrowth_probability: 0.01,
        seed: 1234,
        ..Default::default()
    };
    let mut a = FireAutomaton::new(config.clone()).unwrap();
    let mut b = FireAutomaton::new(config).unwrap();
    assert_eq!(a.grid(), b.grid());

    for _ in 0..40 {
        assert_eq!(a.step(), b.step());
        assert_eq!(a.grid(), b.grid());
    }
    assert_eq!(a.history(), b.history());
}

#[test]
fn test_different_seeds_diverge() {
    let config = AutomatonConfig::default().with_dimensions(60, 60);
    let a = FireAutomaton::new(config.clone().with_seed(1)).unwrap();
    let b = FireAutomaton::new(config.with_seed(2)).unwrap();
    assert_ne!(a.grid(), b.grid());
}

#[test]
fn test_scan_order_tie_break() {
    // Fire at up-left (diagonal) and left (direct) of the center tree. The
    // diagonal draw fails with probability 0, the direct one succeeds with 1.
    let config = AutomatonConfig::default()
        .with_dimensions(3, 3)
        .with_spread(1.0, 0.0);

    for seed in 0..50 {
        let grid = forest_with_fire(3, 3, &[(0, 0), (0, 1)]);
        let mut automaton = FireAutomaton::from_grid(config.clone().with_seed(seed), grid).unwrap();
        automaton.step();
        assert_eq!(automaton.cell_state(1, 1), Ok(Cell::Fire), "seed {seed}");
    }
}

#[test]
fn test_diagonal_only_fire_never_spreads_with_zero_probability() {
    let config = AutomatonConfig::default()
        .with_dimensions(3, 3)
        .with_spread(1.0, 0.0);
    let mut grid = CellGrid::filled(3, 3, Cell::Empty).unwrap();
    grid.set(0, 0, Cell::Fire).unwrap();
    grid.set(1, 1, Cell::Tree).unwrap();

    let mut automaton = FireAutomaton::from_grid(config, grid).unwrap();
    automaton.step();
    assert_eq!(automaton.cell_state(1, 1), Ok(Cell::Tree));
}

#[test]
fn test_boundaries_never_fail() {
    for (width, height) in [(1, 1), (1, 9), (9, 1), (2, 2), (3, 5)] {
        let config = AutomatonConfig {
            width,
            height,
            forest_density: 1.0,
            ignition_density: 0.5,
            spontaneous_ignition_probability: 0.2,
            regrowth_probability: 0.5,
            seed: 77,
            ..Default::default()
        };
        let mut automaton = FireAutomaton::new(config).unwrap();
        automaton.run(25);
        assert_eq!(automaton.current_statistics().total_cells(), width * height);
        assert!(automaton.cell_state(width - 1, height - 1).is_ok());
        assert!(automaton.cell_state(width, 0).is_err());
        assert!(automaton.cell_state(0, height).is_err());
    }
}

#[test]
fn test_single_cell_grid() {
    let mut fire = FireAutomaton::from_grid(
        certain_spread(1, 1),
        CellGrid::filled(1, 1, Cell::Fire).unwrap(),
    )
    .unwrap();
    let record = fire.step();
    assert_eq!(fire.cell_state(0, 0), Ok(Cell::Empty));
    assert_eq!(record.burned, 1);

    let mut tree = FireAutomaton::from_grid(
        certain_spread(1, 1),
        CellGrid::filled(1, 1, Cell::Tree).unwrap(),
    )
    .unwrap();
    tree.run(10);
    assert_eq!(tree.cell_state(0, 0), Ok(Cell::Tree));
}

#[test]
fn test_corner_fire_spreads_inward_only() {
    let mut automaton =
        FireAutomaton::from_grid(certain_spread(4, 4), forest_with_fire(4, 4, &[(0, 0)])).unwrap();
    let record = automaton.step();
    assert_eq!(record.burning, 3);
    for (x, y) in [(1, 0), (0, 1), (1, 1)] {
        assert_eq!(automaton.cell_state(x, y), Ok(Cell::Fire));
    }
    assert_eq!(automaton.cell_state(3, 3), Ok(Cell::Tree));
}

/// Fraction of `trials` two-cell setups in which the tree caught fire.
fn ignition_rate(width: usize, height: usize, fire: (usize, usize), tree: (usize, usize)) -> f64 {
    let trials = 4_000_u64;
    let mut caught = 0_u32;
    for seed in 0..trials {
        let mut grid = CellGrid::filled(width, height, Cell::Empty).unwrap();
        grid.set(fire.0, fire.1, Cell::Fire).unwrap();
        grid.set(tree.0, tree.1, Cell::Tree).unwrap();
        let config = AutomatonConfig::default()
            .with_dimensions(width, height)
            .with_seed(seed);
        let mut automaton = FireAutomaton::from_grid(config, grid).unwrap();
        automaton.step();
        if automaton.cell_state(tree.0, tree.1) == Ok(Cell::Fire) {
            caught += 1;
        }
    }
    f64::from(caught) / trials as f64
}

#[test]
fn test_direct_spread_frequency() {
    let rate = ignition_rate(2, 1, (0, 0), (1, 0));
    assert_abs_diff_eq!(rate, 0.92, epsilon = 0.02);
}

#[test]
fn test_diagonal_spread_frequency() {
    let rate = ignition_rate(2, 2, (0, 0), (1, 1));
    assert_abs_diff_eq!(rate, 0.82, epsilon = 0.02);
}

#[test]
fn test_spontaneous_ignition_and_regrowth_frequency() {
    let config = AutomatonConfig {
        width: 100,
        height: 100,
        spontaneous_ignition_probability: 0.1,
        regrowth_probability: 0.3,
        ..Default::default()
    };

    let mut forest =
        FireAutomaton::from_grid(config.clone(), CellGrid::filled(100, 100, Cell::Tree).unwrap())
            .unwrap();
    let record = forest.step();
    assert_abs_diff_eq!(record.burning as f64 / 10_000.0, 0.1, epsilon = 0.02);

    let mut bare =
        FireAutomaton::from_grid(config, CellGrid::filled(100, 100, Cell::Empty).unwrap()).unwrap();
    let record = bare.step();
    assert_abs_diff_eq!(record.trees as f64 / 10_000.0, 0.3, epsilon = 0.02);
}

#[test]
fn test_history_is_restartable() {
    let mut automaton = FireAutomaton::new(AutomatonConfig::default().with_dimensions(20, 20)).unwrap();
    automaton.run(5);
    let first: Vec<_> = automaton.history().iter().copied().collect();
    let second: Vec<_> = automaton.history().iter().copied().collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 6);
    assert_eq!(automaton.current_statistics(), first[5]);
}
