//! Pure game-logic functions.
//!
//! Every public function takes an immutable reference to the current
//! entity or `Session` (and, where needed, an RNG handle) and returns a
//! brand-new value.  Side effects are limited to the injected RNG and
//! `tracing` events.

use std::time::Duration;

use rand::Rng;
use tracing::{debug, info};

use crate::entities::{
    Direction, Enemy, GameStatus, Goal, LevelTransition, Player, Rules, Session, COLUMN_WIDTH,
    ENEMY_EXIT_X, ENEMY_SPAWN_X, GOAL_COLUMNS, GOAL_Y, LANES, PLAYER_MAX_X, PLAYER_START_Y,
    PLAYER_TOP_Y, ROW_HEIGHT,
};

// ── Hit box ───────────────────────────────────────────────────────────────────

/// How far an enemy's box reaches to the right of its x.
pub const ENEMY_REACH: f32 = 65.0;
/// How far an enemy may sit right of the player and still hit.
pub const PLAYER_FRONT: f32 = 50.0;
/// Vertical band shared by both boxes.
pub const HIT_BAND: f32 = 20.0;

// ── Enemy ─────────────────────────────────────────────────────────────────────

fn random_lane(rng: &mut impl Rng) -> f32 {
    LANES[rng.gen_range(0..LANES.len())]
}

/// A fresh enemy just left of the field on a random lane.
pub fn spawn_enemy(rules: &Rules, rng: &mut impl Rng) -> Enemy {
    Enemy {
        x: ENEMY_SPAWN_X,
        y: random_lane(rng),
        speed: rng.gen_range(rules.speed_min..rules.speed_max),
    }
}

pub fn spawn_enemies(count: u32, rules: &Rules, rng: &mut impl Rng) -> Vec<Enemy> {
    (0..count).map(|_| spawn_enemy(rules, rng)).collect()
}

/// Move an enemy `dt` seconds to the right.  An enemy that has left the
/// field re-enters on a new lane instead of moving; its speed is kept so a
/// slowed enemy stays slow.
pub fn advance_enemy(enemy: &Enemy, dt: f32, rng: &mut impl Rng) -> Enemy {
    if enemy.x > ENEMY_EXIT_X {
        return Enemy {
            x: ENEMY_SPAWN_X,
            y: random_lane(rng),
            ..enemy.clone()
        };
    }
    Enemy {
        x: enemy.x + dt * enemy.speed,
        ..enemy.clone()
    }
}

pub fn slow_enemy(enemy: &Enemy, factor: f32) -> Enemy {
    Enemy {
        speed: enemy.speed / factor,
        ..enemy.clone()
    }
}

// ── Goal ──────────────────────────────────────────────────────────────────────

pub fn spawn_goal(rng: &mut impl Rng) -> Goal {
    Goal {
        x: GOAL_COLUMNS[rng.gen_range(0..GOAL_COLUMNS.len())],
        y: GOAL_Y,
        key_present: true,
    }
}

/// Take the key off the rock.  Calling it on an empty rock changes nothing.
pub fn consume_key(goal: &Goal) -> Goal {
    Goal {
        key_present: false,
        ..goal.clone()
    }
}

/// Re-roll the rock's column and put a key back on it.
pub fn reset_goal(rng: &mut impl Rng) -> Goal {
    spawn_goal(rng)
}

// ── Player ────────────────────────────────────────────────────────────────────

pub fn reset_player() -> Player {
    Player::default()
}

/// Apply one directional input.  Returns the new player and goal; the goal
/// only changes when the player steps onto the rock and takes the key.
pub fn move_player(player: &Player, goal: &Goal, direction: Direction) -> (Player, Goal) {
    if !player.input_enabled {
        return (player.clone(), goal.clone());
    }

    let stepped = |x: i32, y: i32| Player {
        x,
        y,
        ..player.clone()
    };

    match direction {
        Direction::Up if player.y > PLAYER_TOP_Y => {
            (stepped(player.x, player.y - ROW_HEIGHT), goal.clone())
        }
        // Standing right underneath the rock: hop onto it and grab the key
        Direction::Up if player.y == PLAYER_TOP_Y && player.x == goal.x => {
            debug!(x = player.x, "player reached the key");
            let on_rock = Player {
                has_key: true,
                ..stepped(player.x, player.y - ROW_HEIGHT)
            };
            (on_rock, consume_key(goal))
        }
        Direction::Down if player.y < PLAYER_START_Y => {
            (stepped(player.x, player.y + ROW_HEIGHT), goal.clone())
        }
        Direction::Left if player.x > 0 => {
            (stepped(player.x - COLUMN_WIDTH, player.y), goal.clone())
        }
        Direction::Right if player.x < PLAYER_MAX_X => {
            (stepped(player.x + COLUMN_WIDTH, player.y), goal.clone())
        }
        _ => (player.clone(), goal.clone()),
    }
}

// ── Collision & progress ──────────────────────────────────────────────────────

/// Axis-aligned overlap between an enemy's hit box and the player's.
pub fn overlaps(enemy: &Enemy, player: &Player) -> bool {
    let px = player.x as f32;
    let py = player.y as f32;
    enemy.x < px + PLAYER_FRONT
        && enemy.x + ENEMY_REACH > px
        && enemy.y < py + HIT_BAND
        && enemy.y + HIT_BAND > py
}

/// End the game if any enemy touches the player.  Records the high score
/// and cancels a pending level-up.
pub fn check_collisions(state: &Session) -> Session {
    if state.status == GameStatus::GameOver
        || !state.enemies.iter().any(|e| overlaps(e, &state.player))
    {
        return state.clone();
    }

    let high_score = state.high_score.max(state.level);
    info!(level = state.level, high_score, "player hit, game over");
    Session {
        status: GameStatus::GameOver,
        high_score,
        pending_transition: None,
        ..state.clone()
    }
}

/// Start the level-up sequence once the player holds the key: freeze input,
/// slow every enemy down and schedule the transition.  `has_key` is cleared
/// right away so the transition is scheduled exactly once.
pub fn check_progress(state: &Session) -> Session {
    if state.status == GameStatus::GameOver
        || !state.player.has_key
        || state.pending_transition.is_some()
    {
        return state.clone();
    }

    let fires_at = state.elapsed + state.rules.transition_delay;
    debug!(level = state.level, ?fires_at, "level cleared, transition scheduled");
    Session {
        player: Player {
            has_key: false,
            input_enabled: false,
            ..state.player.clone()
        },
        enemies: state
            .enemies
            .iter()
            .map(|e| slow_enemy(e, state.rules.slow_factor))
            .collect(),
        pending_transition: Some(LevelTransition { fires_at }),
        ..state.clone()
    }
}

/// Run the pending level-up if the session clock has reached its deadline.
pub fn fire_due_transition(state: &Session, rng: &mut impl Rng) -> Session {
    match state.pending_transition {
        Some(t) if state.elapsed >= t.fires_at => {
            let level = state.level + 1;
            info!(level, "level up");
            Session {
                enemies: spawn_enemies(level, &state.rules, rng),
                goal: reset_goal(rng),
                player: reset_player(),
                level,
                pending_transition: None,
                ..state.clone()
            }
        }
        _ => state.clone(),
    }
}

// ── Session lifecycle ─────────────────────────────────────────────────────────

/// Build a brand-new session with no high score yet.
pub fn init_state(rules: Rules, rng: &mut impl Rng) -> Session {
    let goal = spawn_goal(rng);
    let enemies = spawn_enemies(1, &rules, rng);
    Session {
        player: reset_player(),
        goal,
        enemies,
        level: 1,
        high_score: 0,
        status: GameStatus::Playing,
        pending_transition: None,
        elapsed: Duration::ZERO,
        rules,
    }
}

/// Back to level 1 with fresh entities.  The high score survives.
pub fn reset_session(state: &Session, rng: &mut impl Rng) -> Session {
    Session {
        player: reset_player(),
        goal: reset_goal(rng),
        enemies: spawn_enemies(1, &state.rules, rng),
        level: 1,
        status: GameStatus::Playing,
        pending_transition: None,
        ..state.clone()
    }
}

/// Leave the game-over screen.
pub fn restart(state: &Session, rng: &mut impl Rng) -> Session {
    info!(high_score = state.high_score, "restarting session");
    reset_session(state, rng)
}

// ── Per-frame tick (nearly pure — RNG is injected) ────────────────────────────

/// Advance the simulation by `dt`.  At most one direction is applied.  All
/// randomness comes through `rng` so callers control determinism (tests use
/// a seeded RNG).
pub fn tick(
    state: &Session,
    input: Option<Direction>,
    dt: Duration,
    rng: &mut impl Rng,
) -> Session {
    if state.status == GameStatus::GameOver {
        return state.clone();
    }

    // ── 1. Clock & timer ─────────────────────────────────────────────────────
    let clocked = Session {
        elapsed: state.elapsed + dt,
        ..state.clone()
    };
    let state = fire_due_transition(&clocked, rng);

    // ── 2. Update entities ───────────────────────────────────────────────────
    let secs = dt.as_secs_f32();
    let enemies: Vec<Enemy> = state
        .enemies
        .iter()
        .map(|e| advance_enemy(e, secs, rng))
        .collect();

    let (player, goal) = match input {
        Some(direction) => move_player(&state.player, &state.goal, direction),
        None => (state.player.clone(), state.goal.clone()),
    };

    let state = Session {
        enemies,
        player,
        goal,
        ..state
    };

    // ── 3. Collisions, then progress ─────────────────────────────────────────
    let state = check_collisions(&state);
    check_progress(&state)
}
