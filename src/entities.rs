//! All game entity types and play-field geometry — pure data, no logic.

use std::time::Duration;

// ── Play field geometry ───────────────────────────────────────────────────────

pub const CANVAS_WIDTH: f32 = 505.0;
pub const CANVAS_HEIGHT: f32 = 606.0;

/// Grid step: one column is 101px wide, one row 83px tall.
pub const COLUMN_WIDTH: i32 = 101;
pub const ROW_HEIGHT: i32 = 83;
pub const NUM_COLUMNS: i32 = 5;
pub const NUM_ROWS: i32 = 6;

/// Player start cell: centre column, bottom row.
pub const PLAYER_START_X: i32 = 202;
pub const PLAYER_START_Y: i32 = 380;
/// Topmost row the player can walk on without reaching the goal.
pub const PLAYER_TOP_Y: i32 = 48;
pub const PLAYER_MAX_X: i32 = COLUMN_WIDTH * (NUM_COLUMNS - 1);

/// The y coordinates enemies travel along.
pub const LANES: [f32; 3] = [60.0, 143.0, 226.0];
/// Enemies always (re)enter just left of the field.
pub const ENEMY_SPAWN_X: f32 = -101.0;
pub const ENEMY_EXIT_X: f32 = 500.0;

pub const GOAL_COLUMNS: [i32; 5] = [0, 101, 202, 303, 404];
pub const GOAL_Y: i32 = -25;

// ── Enums ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

// ── Entities ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    /// Always one of `LANES`.
    pub y: f32,
    /// Pixels per second.
    pub speed: f32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    pub has_key: bool,
    pub input_enabled: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            x: PLAYER_START_X,
            y: PLAYER_START_Y,
            has_key: false,
            input_enabled: true,
        }
    }
}

/// The rock the key sits on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Goal {
    pub x: i32,
    pub y: i32,
    pub key_present: bool,
}

// ── Rules & session ───────────────────────────────────────────────────────────

/// Gameplay tunables that stay fixed for a whole session.
#[derive(Clone, Debug, PartialEq)]
pub struct Rules {
    /// Enemy speeds are drawn uniformly from `speed_min..speed_max`.
    pub speed_min: f32,
    pub speed_max: f32,
    /// Divisor applied to every enemy's speed once the key is picked up.
    pub slow_factor: f32,
    /// Time between picking up the key and the next level starting.
    pub transition_delay: Duration,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            speed_min: 100.0,
            speed_max: 300.0,
            slow_factor: 4.0,
            transition_delay: Duration::from_millis(1000),
        }
    }
}

/// A level-up waiting for the session clock to reach `fires_at`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelTransition {
    pub fires_at: Duration,
}

/// The entire session state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct Session {
    pub player: Player,
    pub goal: Goal,
    /// Always holds exactly `level` enemies after a reset or level-up.
    pub enemies: Vec<Enemy>,
    pub level: u32,
    /// Highest level at which a game over happened.
    pub high_score: u32,
    pub status: GameStatus,
    pub pending_transition: Option<LevelTransition>,
    /// Simulation clock: the sum of every tick's delta time.
    pub elapsed: Duration,
    pub rules: Rules,
}
