#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Greedy steering system that drives snakes toward the apple.

use std::collections::BTreeSet;

use snake_battle_core::{
    CellCoord, CellPoint, Command, Direction, Event, Grid, PlayerId, SnakeSnapshot, TurretView,
};

/// Pure system that reacts to world ticks and emits steering commands.
#[derive(Debug)]
pub struct Autopilot {
    players: Vec<PlayerId>,
}

impl Autopilot {
    /// Creates an autopilot controlling the provided players.
    #[must_use]
    pub fn new(players: &[PlayerId]) -> Self {
        Self {
            players: players.to_vec(),
        }
    }

    /// Players steered by this autopilot.
    #[must_use]
    pub fn players(&self) -> &[PlayerId] {
        &self.players
    }

    /// Consumes world events and immutable views to emit steering commands.
    ///
    /// Commands are only produced in response to a tick, so replaying the
    /// same events against the same views always yields the same steering.
    pub fn handle(
        &mut self,
        events: &[Event],
        grid: Grid,
        snakes: &[SnakeSnapshot],
        turrets: &TurretView,
        food: Option<CellCoord>,
        out: &mut Vec<Command>,
    ) {
        if !events
            .iter()
            .any(|event| matches!(event, Event::TickAdvanced { .. }))
        {
            return;
        }

        let hazards = Hazards::gather(snakes, turrets);
        for player in &self.players {
            let Some(snake) = snakes.iter().find(|snake| snake.player == *player) else {
                continue;
            };
            let direction = choose_direction(grid, snake, &hazards, food);
            if direction != snake.direction {
                out.push(Command::Steer {
                    player: *player,
                    direction,
                });
            }
        }
    }
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(&PlayerId::ALL)
    }
}

/// Cells a snake must not enter on its next move.
#[derive(Debug, Default)]
struct Hazards {
    cells: BTreeSet<CellCoord>,
}

impl Hazards {
    fn gather(snakes: &[SnakeSnapshot], turrets: &TurretView) -> Self {
        let mut cells = BTreeSet::new();
        for snake in snakes {
            cells.extend(snake.body.iter().copied());
            cells.extend(snake.poop_spots.iter().map(|spot| spot.cell));
        }
        for turret in turrets.iter() {
            let _ = cells.insert(turret.cell);
            cells.extend(turret.bullets.iter().map(|bullet| {
                CellPoint::new(
                    bullet.position.column + bullet.velocity.column,
                    bullet.position.row + bullet.velocity.row,
                )
                .truncate()
            }));
        }
        Self { cells }
    }

    fn contains(&self, cell: CellCoord) -> bool {
        self.cells.contains(&cell)
    }
}

/// Picks the safe heading closest to the apple, preferring the current one.
fn choose_direction(
    grid: Grid,
    snake: &SnakeSnapshot,
    hazards: &Hazards,
    food: Option<CellCoord>,
) -> Direction {
    let current = snake.direction;
    let candidates = std::iter::once(current).chain(
        Direction::ALL
            .into_iter()
            .filter(|direction| *direction != current && *direction != current.opposite()),
    );

    let mut best: Option<(u32, Direction)> = None;
    for direction in candidates {
        let Some(next) = next_cell(grid, snake, direction) else {
            continue;
        };
        if hazards.contains(next) {
            continue;
        }
        let distance = food.map_or(0, |food| next.manhattan_distance(food));
        if best.map_or(true, |(closest, _)| distance < closest) {
            best = Some((distance, direction));
        }
    }

    best.map_or(current, |(_, direction)| direction)
}

fn next_cell(grid: Grid, snake: &SnakeSnapshot, direction: Direction) -> Option<CellCoord> {
    let next = snake.head().step(direction);
    if grid.contains(next) {
        Some(next)
    } else if snake.god_mode {
        Some(grid.wrap(next))
    } else {
        None
    }
}
