#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Snake Battle.
//!
//! The [`World`] owns every entity of a round. Adapters mutate it only through
//! [`apply`] (or [`step`] for the passage of time) and observe it through the
//! [`query`] module. One tick runs, in order: queued headings are committed,
//! turrets cool down and fire, snakes move, buffs tick, the power-up and the
//! apple are collected, the level quota is checked, monsters move, and finally
//! every lethal condition is resolved.

mod collision;
mod level;
mod monster;
mod snake;
mod turret;

use snake_battle_core::{
    CellCoord, Command, ConfigError, Direction, Event, Fatality, GameConfig, GameOverCause, Grid,
    MonsterId, Phase, PlayerId, PowerUpKind, SpawnItem, PLAYER_COUNT, WELCOME_BANNER,
};
use snake_battle_system_spawning::{Config as SpawnConfig, Occupancy, SpawnPlanner};
use tracing::{debug, info, warn};

use crate::{
    level::LevelDirector,
    monster::PoopMonster,
    snake::{MoveOutcome, Snake},
    turret::TurretRegistry,
};

const DEFAULT_SEED: u64 = 0x5a4b_e0b7_71c3_2d19;
const SPAWN_COLUMN_OFFSET: i32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PowerUp {
    cell: CellCoord,
    kind: PowerUpKind,
}

/// Represents the authoritative Snake Battle world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    config: GameConfig,
    grid: Grid,
    phase: Phase,
    paused: bool,
    countdown: u32,
    tick_index: u64,
    director: LevelDirector,
    snakes: [Snake; PLAYER_COUNT],
    pending_directions: [Option<Direction>; PLAYER_COUNT],
    turrets: TurretRegistry,
    monsters: Vec<PoopMonster>,
    next_monster_id: MonsterId,
    food: Option<CellCoord>,
    power_up: Option<PowerUp>,
    planner: SpawnPlanner,
    fatalities: Vec<Fatality>,
}

impl World {
    /// Creates a new world using the reference ruleset and a fixed seed.
    #[must_use]
    pub fn new() -> Self {
        Self::build(GameConfig::default(), DEFAULT_SEED)
    }

    /// Creates a new world from a custom ruleset and random seed.
    pub fn with_config(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, seed))
    }

    fn build(config: GameConfig, seed: u64) -> Self {
        let grid = config.grid();
        let mut world = Self {
            banner: WELCOME_BANNER,
            grid,
            phase: Phase::Countdown,
            paused: false,
            countdown: config.countdown_ticks,
            tick_index: 0,
            director: LevelDirector::new(config.apples_per_level),
            snakes: starting_snakes(grid, [0; PLAYER_COUNT]),
            pending_directions: [None; PLAYER_COUNT],
            turrets: TurretRegistry::new(),
            monsters: Vec::new(),
            next_monster_id: MonsterId::new(0),
            food: None,
            power_up: None,
            planner: SpawnPlanner::new(SpawnConfig::new(seed, config.spawn_attempts)),
            fatalities: Vec::new(),
            config,
        };
        let mut scratch = Vec::new();
        world.start_round([0; PLAYER_COUNT], &mut scratch);
        world
    }

    fn start_round(&mut self, scores: [u32; PLAYER_COUNT], out_events: &mut Vec<Event>) {
        self.snakes = starting_snakes(self.grid, scores);
        self.pending_directions = [None; PLAYER_COUNT];
        self.turrets.clear();
        let _ = self.turrets.place(self.grid.center(), None);
        self.monsters.clear();
        self.next_monster_id = MonsterId::new(0);
        self.director.reset();
        self.fatalities.clear();
        self.countdown = self.config.countdown_ticks;
        self.phase = if self.countdown == 0 {
            Phase::Playing
        } else {
            Phase::Countdown
        };
        self.food = None;
        self.power_up = None;
        self.respawn_food(out_events);
        self.respawn_power_up(out_events);
    }

    fn reset(&mut self, out_events: &mut Vec<Event>) {
        let scores = [self.snakes[0].score, self.snakes[1].score];
        self.start_round(scores, out_events);
        info!(
            player_one = scores[0],
            player_two = scores[1],
            "round reset"
        );
        out_events.push(Event::GameReset);
        out_events.push(Event::PhaseChanged { phase: self.phase });
    }

    fn queue_direction(
        &mut self,
        player: PlayerId,
        direction: Direction,
        out_events: &mut Vec<Event>,
    ) {
        let current = self.snakes[player.index()].direction;
        if direction == current.opposite() {
            return;
        }
        self.pending_directions[player.index()] = Some(direction);
        out_events.push(Event::DirectionQueued { player, direction });
    }

    fn tick(&mut self, out_events: &mut Vec<Event>) {
        self.tick_index = self.tick_index.saturating_add(1);
        out_events.push(Event::TickAdvanced {
            tick: self.tick_index,
        });

        match self.phase {
            Phase::Countdown => {
                self.countdown = self.countdown.saturating_sub(1);
                if self.countdown == 0 {
                    self.phase = Phase::Playing;
                    out_events.push(Event::PhaseChanged {
                        phase: Phase::Playing,
                    });
                }
            }
            Phase::Playing if !self.paused => self.simulate(out_events),
            Phase::Playing | Phase::GameOver => {}
        }
    }

    fn simulate(&mut self, out_events: &mut Vec<Event>) {
        self.fatalities.clear();
        self.commit_directions();
        self.advance_turrets(out_events);
        self.advance_snakes(out_events);
        for snake in &mut self.snakes {
            snake.tick_timers();
        }
        self.collect_power_up(out_events);
        self.collect_food(out_events);
        if self.director.quota_met() {
            self.advance_level(out_events);
        }
        self.advance_monsters();
        self.resolve_collisions();

        if !self.fatalities.is_empty() {
            self.end_game(out_events);
        }
    }

    fn commit_directions(&mut self) {
        for (snake, pending) in self.snakes.iter_mut().zip(&mut self.pending_directions) {
            if let Some(direction) = pending.take() {
                snake.direction = direction;
            }
        }
    }

    fn advance_turrets(&mut self, out_events: &mut Vec<Event>) {
        let heads = [self.snakes[0].head(), self.snakes[1].head()];
        for turret in self.turrets.iter_mut() {
            turret.update(self.grid);
            if let Some(bullets) = turret.shoot(&heads, self.config.turret_cooldown) {
                out_events.push(Event::TurretFired {
                    turret: turret.id,
                    bullets,
                });
            }
        }
    }

    fn advance_snakes(&mut self, out_events: &mut Vec<Event>) {
        for player in PlayerId::ALL {
            let outcome = self.snakes[player.index()].advance(
                self.grid,
                self.config.apples_per_poop,
                self.config.stink_duration,
            );
            match outcome {
                MoveOutcome::HitWall => self.record_fatality(player, GameOverCause::Wall),
                MoveOutcome::Moved {
                    dropped_poop: Some(cell),
                } => {
                    out_events.push(Event::PoopDropped { player, cell });
                    self.retarget_monsters(player, out_events);
                }
                MoveOutcome::Moved { dropped_poop: None } => {}
            }
        }

        for player in PlayerId::ALL {
            let snake = &self.snakes[player.index()];
            let other = &self.snakes[player.opponent().index()];
            if let Some(cause) = collision::body_collision(snake, other) {
                self.record_fatality(player, cause);
            }
        }
    }

    /// Sends every monster not already hunting the opponent after `player`.
    fn retarget_monsters(&mut self, player: PlayerId, out_events: &mut Vec<Event>) {
        let opponent = player.opponent();
        let mut count = 0;
        for monster in &mut self.monsters {
            if monster.target != Some(opponent) && monster.target != Some(player) {
                monster.target = Some(player);
                count += 1;
            }
        }
        if count > 0 {
            out_events.push(Event::MonstersRetargeted { player, count });
        }
    }

    fn collect_power_up(&mut self, out_events: &mut Vec<Event>) {
        for player in PlayerId::ALL {
            let Some(power_up) = self.power_up else {
                return;
            };
            if self.snakes[player.index()].head() != power_up.cell {
                continue;
            }

            debug!(player = player.number(), kind = ?power_up.kind, "power-up collected");
            out_events.push(Event::PowerUpCollected {
                player,
                kind: power_up.kind,
                cell: power_up.cell,
            });
            self.apply_power_up(player, power_up, out_events);
            self.respawn_power_up(out_events);
        }
    }

    fn apply_power_up(&mut self, player: PlayerId, power_up: PowerUp, out_events: &mut Vec<Event>) {
        let duration = self.config.buff_duration;
        let snake = &mut self.snakes[player.index()];
        match power_up.kind {
            PowerUpKind::Shield => snake.shield = duration,
            PowerUpKind::Speed => snake.speed_boost = duration,
            PowerUpKind::PoopEater => snake.poop_eater = duration,
            PowerUpKind::Turret => {
                let has_live_turret = snake
                    .extra_turret
                    .is_some_and(|turret| self.turrets.contains(turret));
                if has_live_turret {
                    return;
                }
                let turret = self.turrets.place(power_up.cell, Some(player));
                snake.extra_turret = Some(turret);
                out_events.push(Event::TurretDeployed {
                    player,
                    turret,
                    cell: power_up.cell,
                });
            }
        }
    }

    fn collect_food(&mut self, out_events: &mut Vec<Event>) {
        let Some(food) = self.food else {
            return;
        };
        let award_score = self.fatalities.is_empty();

        let mut eaten = false;
        for snake in &mut self.snakes {
            if snake.head() != food {
                continue;
            }
            snake.eat(award_score);
            self.director.record_apple();
            out_events.push(Event::FoodEaten {
                player: snake.player,
                cell: food,
            });
            eaten = true;
        }

        if eaten {
            self.food = None;
            self.respawn_food(out_events);
        }
    }

    fn advance_level(&mut self, out_events: &mut Vec<Event>) {
        let level = self.director.advance();
        for snake in &mut self.snakes {
            snake.poop_spots.clear();
        }
        info!(level, "level advanced");
        out_events.push(Event::LevelAdvanced { level });

        if level > 1 {
            let cell = self.planner.random_interior_cell(self.grid);
            let monster = self.next_monster_id;
            self.next_monster_id = MonsterId::new(monster.get() + 1);
            self.monsters.push(PoopMonster::new(monster, cell));
            out_events.push(Event::MonsterSpawned { monster, cell });
        }

        self.respawn_food(out_events);
        self.respawn_power_up(out_events);
    }

    fn advance_monsters(&mut self) {
        for monster in &mut self.monsters {
            let quarry = monster.target.map(|player| &self.snakes[player.index()]);
            monster.advance(
                quarry,
                self.config.monster_speed,
                self.config.monster_head_avoidance,
            );
        }

        let anyone_mortal = self.snakes.iter().any(|snake| !snake.god_mode);
        if anyone_mortal && collision::monster_contact(&self.monsters, &self.snakes) {
            for player in PlayerId::ALL {
                self.record_fatality(player, GameOverCause::Monster);
            }
        }
    }

    fn resolve_collisions(&mut self) {
        for player in PlayerId::ALL {
            let snake = &self.snakes[player.index()];
            let other = &self.snakes[player.opponent().index()];
            let hostile = self.turrets.hostile_to(snake.extra_turret);
            if let Some(cause) = collision::snake_collision(snake, other, hostile) {
                self.record_fatality(player, cause);
            }
        }
    }

    /// Keeps only the first lethal cause reported for each player in a tick.
    fn record_fatality(&mut self, player: PlayerId, cause: GameOverCause) {
        if self.fatalities.iter().any(|fatality| fatality.player == player) {
            return;
        }
        self.fatalities.push(Fatality { player, cause });
    }

    fn end_game(&mut self, out_events: &mut Vec<Event>) {
        self.phase = Phase::GameOver;
        for fatality in &self.fatalities {
            info!(
                player = fatality.player.number(),
                cause = ?fatality.cause,
                tick = self.tick_index,
                "snake died"
            );
            out_events.push(Event::PlayerKilled {
                player: fatality.player,
                cause: fatality.cause,
            });
        }
        out_events.push(Event::PhaseChanged {
            phase: Phase::GameOver,
        });
    }

    fn occupancy(&self) -> Occupancy {
        let mut occupancy = Occupancy::new();
        for snake in &self.snakes {
            occupancy.block(snake.body.iter().copied());
        }
        occupancy.block(self.turrets.iter().map(|turret| turret.cell));
        occupancy
    }

    fn respawn_food(&mut self, out_events: &mut Vec<Event>) {
        let occupancy = self.occupancy();
        let power_up = self.power_up.map(|power_up| power_up.cell);
        match self.planner.spawn_food(self.grid, &occupancy, power_up) {
            Ok(cell) => {
                self.food = Some(cell);
                out_events.push(Event::FoodSpawned { cell });
            }
            Err(error) => {
                warn!(%error, "could not place food");
                self.food = None;
                out_events.push(Event::SpawnFailed {
                    item: SpawnItem::Food,
                });
            }
        }
    }

    fn respawn_power_up(&mut self, out_events: &mut Vec<Event>) {
        let occupancy = self.occupancy();
        match self.planner.spawn_power_up(self.grid, &occupancy, self.food) {
            Ok((cell, kind)) => {
                self.power_up = Some(PowerUp { cell, kind });
                out_events.push(Event::PowerUpSpawned { kind, cell });
            }
            Err(error) => {
                warn!(%error, "could not place power-up");
                self.power_up = None;
                out_events.push(Event::SpawnFailed {
                    item: SpawnItem::PowerUp,
                });
            }
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

fn starting_snakes(grid: Grid, scores: [u32; PLAYER_COUNT]) -> [Snake; PLAYER_COUNT] {
    let row = grid.count() / 2;
    [
        Snake::spawn(
            PlayerId::ONE,
            CellCoord::new(SPAWN_COLUMN_OFFSET, row),
            Direction::East,
            scores[0],
        ),
        Snake::spawn(
            PlayerId::TWO,
            CellCoord::new(grid.count() - 1 - SPAWN_COLUMN_OFFSET, row),
            Direction::East,
            scores[1],
        ),
    ]
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick => world.tick(out_events),
        Command::Steer { player, direction } => {
            world.queue_direction(player, direction, out_events);
        }
        Command::Fart { player } => {
            let snake = &world.snakes[player.index()];
            if snake.length() > 1 {
                out_events.push(Event::Farted {
                    player,
                    cell: snake.tail(),
                });
            }
        }
        Command::ToggleGodMode => {
            for snake in &mut world.snakes {
                snake.god_mode = !snake.god_mode;
            }
            let enabled = world.snakes[0].god_mode;
            info!(enabled, "god mode toggled");
            out_events.push(Event::GodModeToggled { enabled });
        }
        Command::TogglePause => {
            world.paused = !world.paused;
            out_events.push(Event::PauseToggled {
                paused: world.paused,
            });
        }
        Command::Reset => {
            if world.phase == Phase::GameOver {
                world.reset(out_events);
            }
        }
    }
}

/// Advances the world by a single tick.
pub fn step(world: &mut World, out_events: &mut Vec<Event>) {
    apply(world, Command::Tick, out_events);
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use snake_battle_core::{
        CellCoord, Fatality, GameConfig, Grid, MonsterSnapshot, Phase, PlayerId, PowerUpSnapshot,
        SnakeSnapshot, TurretView, PLAYER_COUNT,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Ruleset the world was built with.
    #[must_use]
    pub fn config(world: &World) -> &GameConfig {
        &world.config
    }

    /// Grid bounds of the arena.
    #[must_use]
    pub fn grid(world: &World) -> Grid {
        world.grid
    }

    /// Current phase of the round.
    #[must_use]
    pub fn phase(world: &World) -> Phase {
        world.phase
    }

    /// Whether the simulation is paused.
    #[must_use]
    pub fn is_paused(world: &World) -> bool {
        world.paused
    }

    /// Ticks left before the round starts.
    #[must_use]
    pub fn countdown(world: &World) -> u32 {
        world.countdown
    }

    /// Number of ticks processed since the world was created.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Current level, starting at 1.
    #[must_use]
    pub fn level(world: &World) -> u32 {
        world.director.level()
    }

    /// Apples eaten by both snakes since the level started.
    #[must_use]
    pub fn apples_eaten_this_level(world: &World) -> u32 {
        world.director.apples_this_level()
    }

    /// Snapshot of one player's snake.
    #[must_use]
    pub fn snake(world: &World, player: PlayerId) -> SnakeSnapshot {
        world.snakes[player.index()].snapshot()
    }

    /// Snapshots of both snakes in player order.
    #[must_use]
    pub fn snakes(world: &World) -> Vec<SnakeSnapshot> {
        world.snakes.iter().map(|snake| snake.snapshot()).collect()
    }

    /// Cumulative scores in player order.
    #[must_use]
    pub fn scores(world: &World) -> [u32; PLAYER_COUNT] {
        [world.snakes[0].score, world.snakes[1].score]
    }

    /// Whether god mode is active.
    #[must_use]
    pub fn god_mode(world: &World) -> bool {
        world.snakes.iter().any(|snake| snake.god_mode)
    }

    /// Captures a read-only view of every turret and its bullets.
    #[must_use]
    pub fn turrets(world: &World) -> TurretView {
        TurretView::from_snapshots(world.turrets.iter().map(|turret| turret.snapshot()).collect())
    }

    /// Snapshots of every poop monster in spawn order.
    #[must_use]
    pub fn monsters(world: &World) -> Vec<MonsterSnapshot> {
        world
            .monsters
            .iter()
            .map(|monster| monster.snapshot())
            .collect()
    }

    /// Cell of the live apple, if one could be placed.
    #[must_use]
    pub fn food(world: &World) -> Option<CellCoord> {
        world.food
    }

    /// The live power-up, if one could be placed.
    #[must_use]
    pub fn power_up(world: &World) -> Option<PowerUpSnapshot> {
        world.power_up.map(|power_up| PowerUpSnapshot {
            kind: power_up.kind,
            cell: power_up.cell,
        })
    }

    /// Lethal conditions that ended the round, empty while it is running.
    #[must_use]
    pub fn fatalities(world: &World) -> &[Fatality] {
        &world.fatalities
    }
}
