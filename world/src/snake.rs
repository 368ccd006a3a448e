//! Snake bodies, movement and timed buffs.

use std::collections::VecDeque;

use snake_battle_core::{
    CellCoord, Direction, Grid, PlayerId, PoopSpotSnapshot, SnakeSnapshot, TurretId,
};

/// Lethal-unless-countered hazard left behind by a snake.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PoopSpot {
    pub(crate) cell: CellCoord,
    /// Cosmetic countdown; never consulted for lethality.
    pub(crate) stink_timer: u32,
}

/// Result of advancing a snake by one cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MoveOutcome {
    /// The head would have left the grid; the body was left untouched.
    HitWall,
    /// The snake moved, possibly dropping poop at its new tail.
    Moved { dropped_poop: Option<CellCoord> },
}

/// Authoritative state of a single player's snake.
#[derive(Clone, Debug)]
pub(crate) struct Snake {
    pub(crate) player: PlayerId,
    /// Head first; never empty.
    pub(crate) body: VecDeque<CellCoord>,
    pub(crate) direction: Direction,
    pub(crate) grow: bool,
    pub(crate) score: u32,
    pub(crate) apples_eaten: u32,
    pub(crate) god_mode: bool,
    pub(crate) shield: u32,
    pub(crate) speed_boost: u32,
    pub(crate) poop_eater: u32,
    pub(crate) poop_spots: Vec<PoopSpot>,
    pub(crate) extra_turret: Option<TurretId>,
}

impl Snake {
    pub(crate) fn spawn(player: PlayerId, cell: CellCoord, direction: Direction, score: u32) -> Self {
        Self {
            player,
            body: VecDeque::from([cell]),
            direction,
            grow: false,
            score,
            apples_eaten: 0,
            god_mode: false,
            shield: 0,
            speed_boost: 0,
            poop_eater: 0,
            poop_spots: Vec::new(),
            extra_turret: None,
        }
    }

    pub(crate) fn head(&self) -> CellCoord {
        self.body[0]
    }

    pub(crate) fn tail(&self) -> CellCoord {
        self.body[self.body.len() - 1]
    }

    pub(crate) fn length(&self) -> usize {
        self.body.len()
    }

    pub(crate) fn occupies(&self, cell: CellCoord) -> bool {
        self.body.contains(&cell)
    }

    /// Moves the head one cell along the committed direction.
    ///
    /// Off-grid steps wrap under god mode and are fatal otherwise. Once the
    /// snake has eaten `apples_per_poop` apples, a poop spot is dropped on
    /// the post-move tail.
    pub(crate) fn advance(
        &mut self,
        grid: Grid,
        apples_per_poop: u32,
        stink_duration: u32,
    ) -> MoveOutcome {
        let mut next = self.head().step(self.direction);
        if !grid.contains(next) {
            if !self.god_mode {
                return MoveOutcome::HitWall;
            }
            next = grid.wrap(next);
        }

        self.body.push_front(next);
        if !self.grow {
            let _ = self.body.pop_back();
        }
        self.grow = false;

        if self.apples_eaten < apples_per_poop {
            return MoveOutcome::Moved { dropped_poop: None };
        }

        let cell = self.tail();
        self.poop_spots.push(PoopSpot {
            cell,
            stink_timer: stink_duration,
        });
        self.apples_eaten = 0;
        MoveOutcome::Moved {
            dropped_poop: Some(cell),
        }
    }

    /// Records an apple; the next move keeps the tail.
    pub(crate) fn eat(&mut self, award_score: bool) {
        self.grow = true;
        self.apples_eaten += 1;
        if award_score {
            self.score += 1;
        }
    }

    pub(crate) fn tick_timers(&mut self) {
        self.shield = self.shield.saturating_sub(1);
        self.speed_boost = self.speed_boost.saturating_sub(1);
        self.poop_eater = self.poop_eater.saturating_sub(1);
        for spot in &mut self.poop_spots {
            spot.stink_timer = spot.stink_timer.saturating_sub(1);
        }
    }

    pub(crate) fn snapshot(&self) -> SnakeSnapshot {
        SnakeSnapshot {
            player: self.player,
            body: self.body.iter().copied().collect(),
            direction: self.direction,
            grow: self.grow,
            score: self.score,
            apples_eaten: self.apples_eaten,
            god_mode: self.god_mode,
            shield: self.shield,
            speed_boost: self.speed_boost,
            poop_eater: self.poop_eater,
            poop_spots: self
                .poop_spots
                .iter()
                .map(|spot| PoopSpotSnapshot {
                    cell: spot.cell,
                    stink_timer: spot.stink_timer,
                })
                .collect(),
            extra_turret: self.extra_turret,
        }
    }
}

#[cfg(test)]
pub(crate) fn snake_with_body(player: PlayerId, cells: &[(i32, i32)], direction: Direction) -> Snake {
    let mut snake = Snake::spawn(player, CellCoord::new(cells[0].0, cells[0].1), direction, 0);
    snake.body = cells
        .iter()
        .map(|&(column, row)| CellCoord::new(column, row))
        .collect();
    snake
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRID: Grid = Grid::new(40);

    #[test]
    fn god_mode_wraps_across_the_east_edge() {
        let mut snake = snake_with_body(PlayerId::ONE, &[(39, 10)], Direction::East);
        snake.god_mode = true;

        let outcome = snake.advance(GRID, 2, 20);

        assert_eq!(outcome, MoveOutcome::Moved { dropped_poop: None });
        assert_eq!(snake.head(), CellCoord::new(0, 10));
    }

    #[test]
    fn leaving_the_grid_without_god_mode_is_fatal_and_inert() {
        let mut snake = snake_with_body(PlayerId::ONE, &[(0, 4), (1, 4)], Direction::West);

        assert_eq!(snake.advance(GRID, 2, 20), MoveOutcome::HitWall);
        assert_eq!(
            snake.body,
            VecDeque::from([CellCoord::new(0, 4), CellCoord::new(1, 4)])
        );
    }

    #[test]
    fn god_mode_wraps_north_edge() {
        let mut snake = snake_with_body(PlayerId::TWO, &[(7, 0)], Direction::North);
        snake.god_mode = true;

        let _ = snake.advance(GRID, 2, 20);

        assert_eq!(snake.head(), CellCoord::new(7, 39));
    }

    #[test]
    fn growth_keeps_the_tail_exactly_once() {
        let mut snake = snake_with_body(PlayerId::ONE, &[(5, 5), (4, 5)], Direction::East);
        snake.eat(true);

        let _ = snake.advance(GRID, 2, 20);
        assert_eq!(snake.length(), 3);
        assert_eq!(snake.head(), CellCoord::new(6, 5));
        assert_eq!(snake.tail(), CellCoord::new(4, 5));
        assert!(!snake.grow);

        let _ = snake.advance(GRID, 2, 20);
        assert_eq!(snake.length(), 3);
        assert_eq!(snake.tail(), CellCoord::new(5, 5));
    }

    #[test]
    fn second_apple_drops_poop_on_post_move_tail() {
        let mut snake = snake_with_body(PlayerId::ONE, &[(5, 5), (4, 5)], Direction::East);
        snake.eat(true);
        let first = snake.advance(GRID, 2, 20);
        assert_eq!(first, MoveOutcome::Moved { dropped_poop: None });
        assert_eq!(snake.apples_eaten, 1);

        snake.eat(true);
        let second = snake.advance(GRID, 2, 20);

        assert_eq!(
            second,
            MoveOutcome::Moved {
                dropped_poop: Some(CellCoord::new(4, 5))
            }
        );
        assert_eq!(snake.apples_eaten, 0);
        assert_eq!(
            snake.poop_spots,
            vec![PoopSpot {
                cell: CellCoord::new(4, 5),
                stink_timer: 20
            }]
        );
        assert_eq!(snake.score, 2);
    }

    #[test]
    fn timers_count_down_and_clamp_at_zero() {
        let mut snake = snake_with_body(PlayerId::ONE, &[(5, 5)], Direction::East);
        snake.shield = 2;
        snake.speed_boost = 1;
        snake.poop_eater = 0;

        snake.tick_timers();
        snake.tick_timers();
        snake.tick_timers();

        assert_eq!((snake.shield, snake.speed_boost, snake.poop_eater), (0, 0, 0));
    }

    #[test]
    fn eating_after_a_fatal_move_does_not_score() {
        let mut snake = snake_with_body(PlayerId::TWO, &[(5, 5)], Direction::East);
        snake.eat(false);
        assert_eq!(snake.score, 0);
        assert_eq!(snake.apples_eaten, 1);
        assert!(snake.grow);
    }
}
