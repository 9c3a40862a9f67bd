/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` plus the `GameConfig` it is played under, and returns a
/// brand-new `GameState`.  The only side effect is tracing output.

use tracing::{debug, info};

use crate::config::GameConfig;
use crate::entities::{
    Direction, Enemy, EnemyKind, GameState, GameStatus, Outcome, Player, Projectile,
};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the start state: player centred, full formation alive, nothing in
/// flight.
pub fn init_state(config: &GameConfig) -> GameState {
    let fm = &config.formation;
    let enemies = (0..fm.rows)
        .flat_map(|row| {
            (0..fm.cols).map(move |col| Enemy {
                x: fm.origin_x + col as i32 * fm.spacing,
                y: fm.origin_y + row as i32 * fm.spacing,
                alive: true,
                kind: EnemyKind::for_row(row),
            })
        })
        .collect();

    GameState {
        player: Player {
            x: config.field.width / 2,
        },
        enemies,
        projectiles: Vec::new(),
        formation: Direction::Right,
        score: 0,
        status: GameStatus::Playing,
        tick_count: 0,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Displace the player one step, clamped to the field margins.
pub fn move_player(state: &GameState, config: &GameConfig, direction: Direction) -> GameState {
    if state.is_game_over() {
        return state.clone();
    }
    let new_x = (state.player.x + direction.sign() * config.player.step)
        .max(config.player.margin)
        .min(config.player_max_x());
    GameState {
        player: Player { x: new_x },
        ..state.clone()
    }
}

/// Launch a projectile from the player's current x.  There is no cap on
/// projectiles in flight.
pub fn fire_bullet(state: &GameState, config: &GameConfig) -> GameState {
    if state.is_game_over() {
        return state.clone();
    }
    let mut projectiles = state.projectiles.clone();
    projectiles.push(Projectile {
        x: state.player.x,
        y: config.projectile.launch_y,
    });
    GameState {
        projectiles,
        ..state.clone()
    }
}

// ── Per-tick update ──────────────────────────────────────────────────────────

/// Advance the simulation by one tick: formation, then projectiles, then
/// the terminal check.  A finished game is returned unchanged.
pub fn tick(state: &GameState, config: &GameConfig) -> GameState {
    if state.is_game_over() {
        return state.clone();
    }
    let tick_count = state.tick_count + 1;

    // ── 1. Formation ─────────────────────────────────────────────────────────
    let (mut enemies, formation) = advance_formation(&state.enemies, state.formation, config);
    if formation != state.formation {
        debug!(tick = tick_count, heading = ?formation, "formation bounced");
    }

    // ── 2. Projectiles ↔ enemies ────────────────────────────────────────────
    let (projectiles, hits) = resolve_projectiles(&state.projectiles, &mut enemies, config);
    let score = state
        .score
        .saturating_add(hits.saturating_mul(config.projectile.award));

    // ── 3. Terminal check ────────────────────────────────────────────────────
    let breach_line = config.breach_line();
    let cleared = !enemies.iter().any(|e| e.alive);
    let breached = enemies.iter().any(|e| e.alive && e.y > breach_line);
    let status = if cleared || breached {
        info!(tick = tick_count, score, cleared, breached, "game over");
        GameStatus::GameOver
    } else {
        GameStatus::Playing
    };

    GameState {
        player: state.player.clone(),
        enemies,
        projectiles,
        formation,
        score,
        status,
        tick_count,
    }
}

/// Shift every enemy (dead ones too) one step along `heading`.  If any of
/// them ends up past the edge margin, the whole formation also drops by the
/// descent step and the heading flips for the next tick.  The horizontal
/// step of the bouncing tick is kept.
fn advance_formation(
    enemies: &[Enemy],
    heading: Direction,
    config: &GameConfig,
) -> (Vec<Enemy>, Direction) {
    let dx = heading.sign() * config.formation.speed;
    let mut moved: Vec<Enemy> = enemies
        .iter()
        .map(|e| Enemy { x: e.x + dx, ..e.clone() })
        .collect();

    let right_bound = config.formation_right_bound();
    let left_bound = config.formation.edge_margin;
    let crossed = moved.iter().any(|e| match heading {
        Direction::Right => e.x > right_bound,
        Direction::Left => e.x < left_bound,
    });
    if !crossed {
        return (moved, heading);
    }

    for enemy in &mut moved {
        enemy.y += config.formation.descent;
    }
    (moved, heading.flipped())
}

/// Move every projectile and hit-test it against the alive enemies, in
/// order; the first enemy inside the square hit box is killed.  Returns the
/// surviving projectiles and the number of hits.
fn resolve_projectiles(
    projectiles: &[Projectile],
    enemies: &mut [Enemy],
    config: &GameConfig,
) -> (Vec<Projectile>, u32) {
    let radius = config.projectile.hit_radius;
    let far_edge = config.projectile_far_edge();
    let mut kept = Vec::with_capacity(projectiles.len());
    let mut hits = 0;

    for projectile in projectiles {
        let moved = Projectile {
            x: projectile.x,
            y: projectile.y + config.projectile.speed,
        };

        let target = enemies.iter_mut().find(|e| {
            e.alive && (moved.x - e.x).abs() < radius && (moved.y - e.y).abs() < radius
        });
        if let Some(enemy) = target {
            enemy.alive = false;
            hits += 1;
            debug!(x = enemy.x, y = enemy.y, kind = ?enemy.kind, "enemy destroyed");
            continue;
        }

        if moved.y < far_edge {
            kept.push(moved);
        }
    }

    (kept, hits)
}

// ── Queries ──────────────────────────────────────────────────────────────────

/// Why the game ended, or `None` while it is still running.
pub fn outcome(state: &GameState) -> Option<Outcome> {
    if !state.is_game_over() {
        return None;
    }
    if state.alive_enemies().next().is_none() {
        Some(Outcome::Cleared)
    } else {
        Some(Outcome::Breached)
    }
}
