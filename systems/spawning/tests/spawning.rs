use std::collections::BTreeSet;

use snake_battle_core::{CellCoord, Grid, PowerUpKind};
use snake_battle_system_spawning::{Config, Occupancy, SpawnError, SpawnPlanner};

fn interior_cells(grid: Grid) -> Vec<CellCoord> {
    let (low, high) = grid.interior();
    (low..=high)
        .flat_map(|row| (low..=high).map(move |column| CellCoord::new(column, row)))
        .collect()
}

#[test]
fn food_avoids_snakes_turrets_and_power_up() {
    let grid = Grid::new(12);
    let cells = interior_cells(grid);
    let (left_free, blocked) = cells.split_at(3);
    let power_up = left_free[0];

    let mut occupancy = Occupancy::new();
    occupancy.block(blocked.iter().copied());

    let mut planner = SpawnPlanner::new(Config::new(0x5eed, 64));
    for _ in 0..200 {
        let food = planner
            .spawn_food(grid, &occupancy, Some(power_up))
            .expect("two cells remain free");
        assert!(food == left_free[1] || food == left_free[2], "{food:?}");
    }
}

#[test]
fn power_up_avoids_food_and_draws_every_kind() {
    let grid = Grid::new(20);
    let food = CellCoord::new(3, 3);
    let mut occupancy = Occupancy::new();
    occupancy.block([CellCoord::new(5, 10), CellCoord::new(6, 10), CellCoord::new(10, 10)]);

    let mut planner = SpawnPlanner::new(Config::new(42, 4096));
    let mut kinds = BTreeSet::new();
    for _ in 0..400 {
        let (cell, kind) = planner
            .spawn_power_up(grid, &occupancy, Some(food))
            .expect("grid is mostly free");
        assert_ne!(cell, food);
        assert!(!occupancy.is_blocked(cell));
        assert!(grid.is_interior(cell));
        let _ = kinds.insert(kind);
    }
    assert_eq!(kinds.into_iter().collect::<Vec<_>>(), PowerUpKind::ALL.to_vec());
}

#[test]
fn saturated_interior_reports_exhaustion() {
    let grid = Grid::new(12);
    let mut occupancy = Occupancy::new();
    occupancy.block(interior_cells(grid));

    let mut planner = SpawnPlanner::new(Config::new(1, 16));
    assert_eq!(
        planner.spawn_food(grid, &occupancy, None),
        Err(SpawnError::Exhausted { grid_count: 12 })
    );
    assert!(planner.spawn_power_up(grid, &occupancy, None).is_err());
}

#[test]
fn random_interior_cells_stay_off_the_wall_ring() {
    let grid = Grid::new(40);
    let mut planner = SpawnPlanner::new(Config::new(3, 1));
    for _ in 0..1_000 {
        assert!(grid.is_interior(planner.random_interior_cell(grid)));
    }
}

#[test]
fn same_seed_replays_same_placements() {
    let grid = Grid::new(40);
    let occupancy = Occupancy::new();
    let mut first = SpawnPlanner::new(Config::new(0xdead_beef, 4096));
    let mut second = SpawnPlanner::new(Config::new(0xdead_beef, 4096));

    for _ in 0..50 {
        assert_eq!(
            first.spawn_food(grid, &occupancy, None),
            second.spawn_food(grid, &occupancy, None)
        );
        assert_eq!(
            first.spawn_power_up(grid, &occupancy, None),
            second.spawn_power_up(grid, &occupancy, None)
        );
    }
}
