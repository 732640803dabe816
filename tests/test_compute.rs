use std::time::Duration;

use key_crossing::compute::*;
use key_crossing::entities::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_state() -> Session {
    Session {
        player: Player::default(),
        goal: Goal { x: 101, y: GOAL_Y, key_present: true },
        enemies: Vec::new(),
        level: 1,
        high_score: 0,
        status: GameStatus::Playing,
        pending_transition: None,
        elapsed: Duration::ZERO,
        rules: Rules::default(),
    }
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn enemy_at(x: f32, y: f32) -> Enemy {
    Enemy { x, y, speed: 200.0 }
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

// ── init / reset ──────────────────────────────────────────────────────────────

#[test]
fn init_state_starts_at_level_one() {
    let s = init_state(Rules::default(), &mut seeded_rng());
    assert_eq!(s.level, 1);
    assert_eq!(s.high_score, 0);
    assert_eq!(s.enemies.len(), 1);
    assert_eq!(s.status, GameStatus::Playing);
    assert_eq!(s.player, Player::default());
    assert!(s.goal.key_present);
    assert!(s.pending_transition.is_none());
}

#[test]
fn reset_session_keeps_high_score() {
    let mut s = make_state();
    s.level = 7;
    s.high_score = 6;
    s.status = GameStatus::GameOver;
    s.pending_transition = Some(LevelTransition { fires_at: ms(500) });
    let s2 = reset_session(&s, &mut seeded_rng());
    assert_eq!(s2.level, 1);
    assert_eq!(s2.enemies.len(), 1);
    assert_eq!(s2.high_score, 6);
    assert_eq!(s2.status, GameStatus::Playing);
    assert!(s2.pending_transition.is_none());
}

// ── enemies ───────────────────────────────────────────────────────────────────

#[test]
fn spawn_enemy_uses_lane_sentinel_and_speed_range() {
    let rules = Rules::default();
    let mut rng = seeded_rng();
    for _ in 0..200 {
        let e = spawn_enemy(&rules, &mut rng);
        assert_eq!(e.x, ENEMY_SPAWN_X);
        assert!(LANES.contains(&e.y));
        assert!(e.speed >= 100.0 && e.speed < 300.0);
    }
}

#[test]
fn spawn_enemies_makes_requested_count() {
    let enemies = spawn_enemies(5, &Rules::default(), &mut seeded_rng());
    assert_eq!(enemies.len(), 5);
}

#[test]
fn advance_enemy_moves_by_speed_times_dt() {
    let e = enemy_at(0.0, 60.0);
    let e2 = advance_enemy(&e, 0.5, &mut seeded_rng());
    assert_eq!(e2.x, 100.0);
    assert_eq!(e2.y, 60.0);
}

#[test]
fn advance_enemy_strictly_increases_until_exit() {
    let mut rng = seeded_rng();
    let mut e = enemy_at(ENEMY_SPAWN_X, 143.0);
    while e.x <= ENEMY_EXIT_X {
        let next = advance_enemy(&e, 0.016, &mut rng);
        assert!(next.x > e.x);
        e = next;
    }
    // Past the right boundary: the next advance re-enters from the left
    let wrapped = advance_enemy(&e, 0.016, &mut rng);
    assert_eq!(wrapped.x, ENEMY_SPAWN_X);
    assert!(LANES.contains(&wrapped.y));
    assert_eq!(wrapped.speed, e.speed);
}

#[test]
fn advance_enemy_at_exact_boundary_still_moves() {
    let e = enemy_at(ENEMY_EXIT_X, 60.0);
    let e2 = advance_enemy(&e, 0.5, &mut seeded_rng());
    assert_eq!(e2.x, 600.0);
}

#[test]
fn slow_enemy_divides_speed() {
    let e = slow_enemy(&enemy_at(0.0, 60.0), 4.0);
    assert_eq!(e.speed, 50.0);
}

// ── goal ──────────────────────────────────────────────────────────────────────

#[test]
fn spawn_goal_picks_a_column() {
    let mut rng = seeded_rng();
    for _ in 0..50 {
        let g = spawn_goal(&mut rng);
        assert!(GOAL_COLUMNS.contains(&g.x));
        assert_eq!(g.y, GOAL_Y);
        assert!(g.key_present);
    }
}

#[test]
fn consume_key_is_idempotent() {
    let g = Goal { x: 202, y: GOAL_Y, key_present: true };
    let once = consume_key(&g);
    let twice = consume_key(&once);
    assert!(!once.key_present);
    assert_eq!(once, twice);
}

#[test]
fn reset_goal_restores_key() {
    let g = reset_goal(&mut seeded_rng());
    assert!(g.key_present);
}

// ── move_player ───────────────────────────────────────────────────────────────

#[test]
fn move_changes_one_axis_by_one_step() {
    let goal = Goal { x: 0, y: GOAL_Y, key_present: true };
    let p = Player { x: 202, y: 214, ..Player::default() };

    let (up, _) = move_player(&p, &goal, Direction::Up);
    assert_eq!((up.x, up.y), (202, 131));
    let (down, _) = move_player(&p, &goal, Direction::Down);
    assert_eq!((down.x, down.y), (202, 297));
    let (left, _) = move_player(&p, &goal, Direction::Left);
    assert_eq!((left.x, left.y), (101, 214));
    let (right, _) = move_player(&p, &goal, Direction::Right);
    assert_eq!((right.x, right.y), (303, 214));
}

#[test]
fn move_stays_in_bounds_everywhere() {
    let goal = Goal { x: 0, y: GOAL_Y, key_present: true };
    let dirs = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];
    for col in 0..NUM_COLUMNS {
        for row in 0..5 {
            let p = Player {
                x: col * COLUMN_WIDTH,
                y: PLAYER_TOP_Y + row * ROW_HEIGHT,
                ..Player::default()
            };
            for dir in dirs {
                let (moved, _) = move_player(&p, &goal, dir);
                assert!(moved.x >= 0 && moved.x <= PLAYER_MAX_X);
                assert!(moved.y <= PLAYER_START_Y);
                if !moved.has_key {
                    assert!(moved.y >= PLAYER_TOP_Y);
                }
                let dx = (moved.x - p.x).abs();
                let dy = (moved.y - p.y).abs();
                assert!(dx == 0 || dy == 0);
                assert!(dx == 0 || dx == COLUMN_WIDTH);
                assert!(dy == 0 || dy == ROW_HEIGHT);
            }
        }
    }
}

#[test]
fn move_at_edges_is_noop() {
    let goal = Goal { x: 202, y: GOAL_Y, key_present: true };
    let corner = Player { x: 0, y: PLAYER_START_Y, ..Player::default() };
    assert_eq!(move_player(&corner, &goal, Direction::Left).0, corner);
    assert_eq!(move_player(&corner, &goal, Direction::Down).0, corner);

    let far = Player { x: PLAYER_MAX_X, y: PLAYER_TOP_Y, ..Player::default() };
    assert_eq!(move_player(&far, &goal, Direction::Right).0, far);
    // Top row but not under the rock
    assert_eq!(move_player(&far, &goal, Direction::Up).0, far);
}

#[test]
fn move_under_rock_takes_key() {
    let goal = Goal { x: 303, y: GOAL_Y, key_present: true };
    let p = Player { x: 303, y: PLAYER_TOP_Y, ..Player::default() };
    let (p2, g2) = move_player(&p, &goal, Direction::Up);
    assert!(p2.has_key);
    assert_eq!(p2.y, PLAYER_TOP_Y - ROW_HEIGHT); // exactly one row up
    assert_eq!(p2.x, 303);
    assert!(!g2.key_present);
    assert_eq!(g2.x, goal.x);
}

#[test]
fn move_ignored_when_input_disabled() {
    let goal = Goal { x: 202, y: GOAL_Y, key_present: true };
    let p = Player { input_enabled: false, ..Player::default() };
    for dir in [Direction::Up, Direction::Left, Direction::Right] {
        assert_eq!(move_player(&p, &goal, dir).0, p);
    }
}

#[test]
fn move_does_not_mutate_original() {
    let goal = Goal { x: 202, y: GOAL_Y, key_present: true };
    let p = Player::default();
    let _ = move_player(&p, &goal, Direction::Up);
    assert_eq!(p, Player::default());
}

// ── collisions ────────────────────────────────────────────────────────────────

#[test]
fn overlap_predicate() {
    let p = Player { x: 202, y: 380, ..Player::default() };
    assert!(overlaps(&enemy_at(180.0, 380.0), &p));
    assert!(!overlaps(&enemy_at(400.0, 380.0), &p));
    // Box edges are exclusive
    assert!(!overlaps(&enemy_at(252.0, 380.0), &p));
    assert!(!overlaps(&enemy_at(137.0, 380.0), &p));
    assert!(!overlaps(&enemy_at(202.0, 400.0), &p));
}

#[test]
fn lane_enemy_hits_player_on_nearby_row() {
    // Player row 214 and lane 226 share the vertical band
    let p = Player { x: 101, y: 214, ..Player::default() };
    assert!(overlaps(&enemy_at(90.0, 226.0), &p));
}

#[test]
fn collision_sets_game_over_and_high_score() {
    let mut s = make_state();
    s.level = 3;
    s.high_score = 2;
    s.enemies.push(enemy_at(180.0, 380.0));
    let s2 = check_collisions(&s);
    assert_eq!(s2.status, GameStatus::GameOver);
    assert_eq!(s2.high_score, 3);
}

#[test]
fn collision_never_lowers_high_score() {
    let mut s = make_state();
    s.level = 2;
    s.high_score = 9;
    s.enemies.push(enemy_at(180.0, 380.0));
    assert_eq!(check_collisions(&s).high_score, 9);
}

#[test]
fn simultaneous_hits_are_one_game_over() {
    let mut s = make_state();
    s.level = 4;
    s.enemies = vec![enemy_at(180.0, 380.0), enemy_at(200.0, 380.0)];
    let s2 = check_collisions(&s);
    assert_eq!(s2.status, GameStatus::GameOver);
    assert_eq!(s2.high_score, 4);
    assert_eq!(check_collisions(&s2).high_score, 4);
}

#[test]
fn collision_cancels_pending_transition() {
    let mut s = make_state();
    s.pending_transition = Some(LevelTransition { fires_at: ms(900) });
    s.enemies.push(enemy_at(180.0, 380.0));
    assert!(check_collisions(&s).pending_transition.is_none());
}

#[test]
fn no_collision_leaves_state_alone() {
    let mut s = make_state();
    s.enemies.push(enemy_at(400.0, 60.0));
    let s2 = check_collisions(&s);
    assert_eq!(s2.status, GameStatus::Playing);
    assert_eq!(s2.high_score, 0);
}

// ── progress ──────────────────────────────────────────────────────────────────

#[test]
fn progress_schedules_once_and_clears_key() {
    let mut s = make_state();
    s.elapsed = ms(250);
    s.player.has_key = true;
    s.enemies.push(enemy_at(0.0, 60.0));

    let s2 = check_progress(&s);
    assert!(!s2.player.has_key);
    assert!(!s2.player.input_enabled);
    assert_eq!(s2.enemies[0].speed, 50.0);
    assert_eq!(
        s2.pending_transition,
        Some(LevelTransition { fires_at: ms(1250) })
    );

    // A second evaluation has nothing to schedule
    let s3 = check_progress(&s2);
    assert_eq!(s3.pending_transition, s2.pending_transition);
    assert_eq!(s3.enemies[0].speed, 50.0);
}

#[test]
fn progress_ignored_after_game_over() {
    let mut s = make_state();
    s.player.has_key = true;
    s.status = GameStatus::GameOver;
    assert!(check_progress(&s).pending_transition.is_none());
}

#[test]
fn transition_waits_for_deadline() {
    let mut s = make_state();
    s.pending_transition = Some(LevelTransition { fires_at: ms(1000) });
    s.elapsed = ms(999);
    let s2 = fire_due_transition(&s, &mut seeded_rng());
    assert_eq!(s2.level, 1);
    assert!(s2.pending_transition.is_some());
}

// ── tick ──────────────────────────────────────────────────────────────────────

#[test]
fn tick_advances_clock_and_enemies() {
    let mut s = make_state();
    s.enemies.push(enemy_at(0.0, 60.0));
    let s2 = tick(&s, None, ms(100), &mut seeded_rng());
    assert_eq!(s2.elapsed, ms(100));
    assert!((s2.enemies[0].x - 20.0).abs() < 1e-3);
}

#[test]
fn tick_applies_input() {
    let s = make_state();
    let s2 = tick(&s, Some(Direction::Left), ms(16), &mut seeded_rng());
    assert_eq!(s2.player.x, 101);
}

#[test]
fn tick_frozen_after_game_over() {
    let mut s = make_state();
    s.status = GameStatus::GameOver;
    s.enemies.push(enemy_at(0.0, 60.0));
    let s2 = tick(&s, Some(Direction::Up), ms(100), &mut seeded_rng());
    assert_eq!(s2.enemies[0].x, 0.0);
    assert_eq!(s2.player, s.player);
    assert_eq!(s2.elapsed, Duration::ZERO);
}

#[test]
fn level_transition_fires_exactly_after_delay() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    s.goal = Goal { x: 202, y: GOAL_Y, key_present: true };
    s.player = Player { x: 202, y: PLAYER_TOP_Y, ..Player::default() };

    // Pick up the key
    let s = tick(&s, Some(Direction::Up), ms(16), &mut rng);
    assert!(!s.goal.key_present);
    assert!(!s.player.input_enabled);
    assert!(s.pending_transition.is_some());
    assert_eq!(s.level, 1);

    // Input during the grace period is ignored
    let s = tick(&s, Some(Direction::Down), ms(999), &mut rng);
    assert_eq!(s.level, 1);
    assert_eq!(s.player.y, PLAYER_TOP_Y - ROW_HEIGHT);

    let s = tick(&s, None, ms(1), &mut rng);
    assert_eq!(s.level, 2);
    assert_eq!(s.enemies.len(), 2);
    assert_eq!(s.player, Player::default());
    assert!(s.player.input_enabled);
    assert!(s.goal.key_present);
    assert!(s.pending_transition.is_none());
}

#[test]
fn enemy_count_tracks_level_across_transitions() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    for expected in 2..=5u32 {
        s.enemies.clear(); // keep the run collision-free
        s.player = Player { x: s.goal.x, y: PLAYER_TOP_Y, ..Player::default() };
        s = tick(&s, Some(Direction::Up), ms(10), &mut rng);
        s.enemies.clear();
        s = tick(&s, None, s.rules.transition_delay, &mut rng);
        assert_eq!(s.level, expected);
        assert_eq!(s.enemies.len(), expected as usize);
    }
}

#[test]
fn high_score_is_monotonic_over_game_overs() {
    let mut rng = seeded_rng();
    let mut s = make_state();
    for level in [2, 1, 5, 3] {
        s.level = level;
        s.enemies = vec![enemy_at(190.0, 380.0)];
        s.player = Player::default();
        s = tick(&s, None, Duration::ZERO, &mut rng);
        assert_eq!(s.status, GameStatus::GameOver);
        s = restart(&s, &mut rng);
    }
    assert_eq!(s.high_score, 5);
}

#[test]
fn restart_resets_level_and_keeps_high_score() {
    let mut s = make_state();
    s.level = 4;
    s.high_score = 4;
    s.status = GameStatus::GameOver;
    s.enemies = spawn_enemies(4, &s.rules, &mut seeded_rng());
    let s2 = restart(&s, &mut seeded_rng());
    assert_eq!(s2.level, 1);
    assert_eq!(s2.enemies.len(), 1);
    assert_eq!(s2.high_score, 4);
    assert_eq!(s2.status, GameStatus::Playing);
}
