#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Snake Battle engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing player input or the passage of time, the world executes those
//! commands via its `apply` entry point, and then reports [`Event`] values
//! describing what happened. Renderers and systems read immutable snapshots
//! and respond exclusively with new command batches.

mod config;

pub use config::{ConfigError, GameConfig};

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Snake Battle.";

/// Number of players taking part in every match.
pub const PLAYER_COUNT: usize = 2;

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Advances the simulation by exactly one fixed-length tick.
    Tick,
    /// Queues a heading change for a player, committed on the next tick.
    Steer {
        /// Player whose snake should turn.
        player: PlayerId,
        /// Requested heading.
        direction: Direction,
    },
    /// Requests the purely cosmetic fart effect at the snake's tail.
    Fart {
        /// Player whose snake should fart.
        player: PlayerId,
    },
    /// Flips god mode on both snakes at once.
    ToggleGodMode,
    /// Freezes or resumes the simulation without losing state.
    TogglePause,
    /// Starts a fresh round after the game ended, keeping scores.
    Reset,
}

/// Events reported by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Indicates that the simulation clock advanced by one tick.
    TickAdvanced {
        /// Index of the tick that just completed.
        tick: u64,
    },
    /// Announces that the round entered a new phase.
    PhaseChanged {
        /// Phase that became active.
        phase: Phase,
    },
    /// Reports the new pause state.
    PauseToggled {
        /// Whether the simulation is now paused.
        paused: bool,
    },
    /// Reports the new god mode state of both snakes.
    GodModeToggled {
        /// Whether god mode is now enabled.
        enabled: bool,
    },
    /// Confirms that a heading change was accepted for the next tick.
    DirectionQueued {
        /// Player that steered.
        player: PlayerId,
        /// Heading that will be committed.
        direction: Direction,
    },
    /// Cosmetic fart triggered at a snake's tail.
    Farted {
        /// Player whose snake farted.
        player: PlayerId,
        /// Tail cell the effect originates from.
        cell: CellCoord,
    },
    /// Confirms that a new apple was placed.
    FoodSpawned {
        /// Cell occupied by the apple.
        cell: CellCoord,
    },
    /// Confirms that a snake ate the apple.
    FoodEaten {
        /// Player whose snake ate.
        player: PlayerId,
        /// Cell the apple occupied.
        cell: CellCoord,
    },
    /// Confirms that a new power-up was placed.
    PowerUpSpawned {
        /// Kind of the new power-up.
        kind: PowerUpKind,
        /// Cell occupied by the power-up.
        cell: CellCoord,
    },
    /// Confirms that a snake picked up the live power-up.
    PowerUpCollected {
        /// Player whose snake collected the power-up.
        player: PlayerId,
        /// Kind of power-up collected.
        kind: PowerUpKind,
        /// Cell the power-up occupied.
        cell: CellCoord,
    },
    /// Confirms that a player deployed a personal turret.
    TurretDeployed {
        /// Player owning the turret.
        player: PlayerId,
        /// Identifier allocated to the turret.
        turret: TurretId,
        /// Cell occupied by the turret.
        cell: CellCoord,
    },
    /// Reports that a turret fired a volley.
    TurretFired {
        /// Turret that fired.
        turret: TurretId,
        /// Number of bullets appended by the volley.
        bullets: u32,
    },
    /// Confirms that a snake dropped a poop spot.
    PoopDropped {
        /// Player whose snake pooped.
        player: PlayerId,
        /// Cell of the new poop spot.
        cell: CellCoord,
    },
    /// Confirms that a poop monster entered the arena.
    MonsterSpawned {
        /// Identifier allocated to the monster.
        monster: MonsterId,
        /// Cell the monster spawned on.
        cell: CellCoord,
    },
    /// Reports that monsters switched their pursuit to a snake.
    MonstersRetargeted {
        /// Player whose snake is now hunted.
        player: PlayerId,
        /// Number of monsters that changed target.
        count: u32,
    },
    /// Announces that the shared apple quota was met.
    LevelAdvanced {
        /// Level that became active.
        level: u32,
    },
    /// Reports a lethal condition for a snake.
    PlayerKilled {
        /// Player that died.
        player: PlayerId,
        /// What killed the snake.
        cause: GameOverCause,
    },
    /// Reports that no free cell could be found for an item.
    SpawnFailed {
        /// Item that could not be placed.
        item: SpawnItem,
    },
    /// Confirms that a new round was set up.
    GameReset,
}

/// Items placed by the spawn planner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpawnItem {
    /// The single apple.
    Food,
    /// The single power-up.
    PowerUp,
}

/// Lifecycle phase of a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Pre-round freeze while the countdown runs.
    Countdown,
    /// Active simulation.
    Playing,
    /// Terminal phase; only a reset leaves it.
    GameOver,
}

/// Reasons a snake may die.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOverCause {
    /// The head left the grid without god mode.
    Wall,
    /// The head ran into the snake's own body.
    SelfCollision,
    /// The head ran into the opponent's body.
    OpponentCollision,
    /// A turret bullet hit the head.
    Bullet,
    /// The head landed on an unprotected poop spot.
    Poop,
    /// A poop monster touched a snake body.
    Monster,
}

/// Lethal outcome recorded for a single player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fatality {
    /// Player that died.
    pub player: PlayerId,
    /// What killed the snake.
    pub cause: GameOverCause,
}

/// Types of power-ups that may appear on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Grants the shield buff.
    Shield,
    /// Grants the speed buff.
    Speed,
    /// Makes the collector's poop harmless while active.
    PoopEater,
    /// Deploys a personal turret that never harms its owner.
    Turret,
}

impl PowerUpKind {
    /// Every power-up kind, in draw order.
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Shield,
        PowerUpKind::Speed,
        PowerUpKind::PoopEater,
        PowerUpKind::Turret,
    ];
}

/// Identifies one of the two players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(u8);

impl PlayerId {
    /// Player one (green).
    pub const ONE: PlayerId = PlayerId(0);
    /// Player two (blue).
    pub const TWO: PlayerId = PlayerId(1);
    /// Both players in turn order.
    pub const ALL: [PlayerId; PLAYER_COUNT] = [PlayerId::ONE, PlayerId::TWO];

    /// Zero-based slot of the player inside fixed-size collections.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other player.
    #[must_use]
    pub const fn opponent(self) -> PlayerId {
        PlayerId(1 - self.0)
    }

    /// One-based number shown to humans.
    #[must_use]
    pub const fn number(self) -> u8 {
        self.0 + 1
    }
}

/// Cardinal headings available to snakes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// All headings in clockwise order starting north.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Unit step `(column, row)` associated with the heading.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    /// Heading pointing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }
}

/// Unique identifier assigned to a turret.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TurretId(u32);

impl TurretId {
    /// Creates a new turret identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a poop monster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonsterId(u32);

impl MonsterId {
    /// Creates a new monster identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
///
/// Coordinates are signed so a step off the grid can be represented before
/// the bounds policy decides between wrapping and death.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: i32,
    row: i32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Neighbouring cell one step along the heading, without bounds handling.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dc, dr) = direction.delta();
        Self::new(self.column + dc, self.row + dr)
    }

    /// Computes the Manhattan distance between two cell coordinates.
    #[must_use]
    pub fn manhattan_distance(self, other: CellCoord) -> u32 {
        self.column.abs_diff(other.column) + self.row.abs_diff(other.row)
    }

    /// Converts the cell into a floating point position at its origin.
    #[must_use]
    pub fn to_point(self) -> CellPoint {
        CellPoint::new(self.column as f32, self.row as f32)
    }
}

/// Continuous position or vector measured in cell units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CellPoint {
    /// Horizontal component.
    pub column: f32,
    /// Vertical component.
    pub row: f32,
}

impl CellPoint {
    /// Creates a new point.
    #[must_use]
    pub const fn new(column: f32, row: f32) -> Self {
        Self { column, row }
    }

    /// Euclidean length of the point treated as a vector.
    #[must_use]
    pub fn length(self) -> f32 {
        self.column.hypot(self.row)
    }

    /// Cell containing the point, truncating each component toward zero.
    #[must_use]
    pub fn truncate(self) -> CellCoord {
        CellCoord::new(self.column as i32, self.row as i32)
    }
}

/// Square playing field and its bounds/wrap policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    count: i32,
}

impl Grid {
    /// Creates a grid with `count` cells along each axis.
    #[must_use]
    pub const fn new(count: i32) -> Self {
        Self { count }
    }

    /// Number of cells along each axis.
    #[must_use]
    pub const fn count(&self) -> i32 {
        self.count
    }

    /// Reports whether the cell lies inside `[0, count)` on both axes.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column >= 0 && cell.column < self.count && cell.row >= 0 && cell.row < self.count
    }

    /// Reports whether the point lies inside `[0, count)` on both axes.
    #[must_use]
    pub fn contains_point(&self, point: CellPoint) -> bool {
        let limit = self.count as f32;
        (0.0..limit).contains(&point.column) && (0.0..limit).contains(&point.row)
    }

    /// Wraps each out-of-range axis of a single-step move to the opposite edge.
    #[must_use]
    pub const fn wrap(&self, cell: CellCoord) -> CellCoord {
        CellCoord::new(wrap_axis(cell.column, self.count), wrap_axis(cell.row, self.count))
    }

    /// Inclusive range of interior indices, excluding the outer wall ring.
    #[must_use]
    pub const fn interior(&self) -> (i32, i32) {
        (1, self.count - 2)
    }

    /// Reports whether the cell lies on the interior, off the wall ring.
    #[must_use]
    pub const fn is_interior(&self, cell: CellCoord) -> bool {
        let (low, high) = self.interior();
        cell.column >= low && cell.column <= high && cell.row >= low && cell.row <= high
    }

    /// Centre cell of the grid.
    #[must_use]
    pub const fn center(&self) -> CellCoord {
        CellCoord::new(self.count / 2, self.count / 2)
    }
}

const fn wrap_axis(value: i32, count: i32) -> i32 {
    if value < 0 {
        count - 1
    } else if value >= count {
        0
    } else {
        value
    }
}

/// Immutable representation of a poop spot used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoopSpotSnapshot {
    /// Cell covered by the poop.
    pub cell: CellCoord,
    /// Remaining ticks of the cosmetic stink animation.
    pub stink_timer: u32,
}

/// Immutable representation of a single snake used for queries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnakeSnapshot {
    /// Player controlling the snake.
    pub player: PlayerId,
    /// Body cells, head first.
    pub body: Vec<CellCoord>,
    /// Committed heading.
    pub direction: Direction,
    /// Whether the next move keeps the tail.
    pub grow: bool,
    /// Cumulative score, preserved across resets.
    pub score: u32,
    /// Apples eaten since the last poop.
    pub apples_eaten: u32,
    /// Whether god mode is active.
    pub god_mode: bool,
    /// Remaining shield ticks.
    pub shield: u32,
    /// Remaining speed boost ticks.
    pub speed_boost: u32,
    /// Remaining poop eater ticks.
    pub poop_eater: u32,
    /// Poop spots deposited during the current level.
    pub poop_spots: Vec<PoopSpotSnapshot>,
    /// Personal turret deployed by this snake, if any.
    pub extra_turret: Option<TurretId>,
}

impl SnakeSnapshot {
    /// Cell occupied by the head.
    #[must_use]
    pub fn head(&self) -> CellCoord {
        self.body[0]
    }

    /// Cell occupied by the last body segment.
    #[must_use]
    pub fn tail(&self) -> CellCoord {
        self.body[self.body.len() - 1]
    }
}

/// Immutable representation of a bullet in flight.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BulletSnapshot {
    /// Current position.
    pub position: CellPoint,
    /// Unit velocity applied each tick.
    pub velocity: CellPoint,
}

/// Immutable representation of a turret used for queries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurretSnapshot {
    /// Identifier allocated by the world.
    pub id: TurretId,
    /// Cell occupied by the turret.
    pub cell: CellCoord,
    /// Player that deployed the turret, `None` for the neutral one.
    pub owner: Option<PlayerId>,
    /// Ticks until the next volley; negative while idle.
    pub shoot_timer: i32,
    /// Bullets currently in flight.
    pub bullets: Vec<BulletSnapshot>,
}

/// Read-only snapshot describing all turrets on the grid.
#[derive(Clone, Debug, Default)]
pub struct TurretView {
    snapshots: Vec<TurretSnapshot>,
}

impl TurretView {
    /// Creates a new turret view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<TurretSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured turret snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &TurretSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<TurretSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a poop monster used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MonsterSnapshot {
    /// Identifier allocated by the world.
    pub id: MonsterId,
    /// Continuous position.
    pub position: CellPoint,
    /// Player being hunted, if any.
    pub target: Option<PlayerId>,
}

/// Immutable representation of the live power-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUpSnapshot {
    /// Kind of power-up.
    pub kind: PowerUpKind,
    /// Cell occupied by the power-up.
    pub cell: CellCoord,
}
