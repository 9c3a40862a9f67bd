/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// engine.  No game logic is performed; this module only translates field
/// coordinates into terminal cells and state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use formation_shooter::entities::{Enemy, EnemyKind, GameState, Outcome, Projectile};
use formation_shooter::Engine;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_TICK: Color = Color::DarkGrey;
const C_PLAYER: Color = Color::White;
const C_ENEMY_SPACECRAFT: Color = Color::Green;
const C_ENEMY_OCTOPUS: Color = Color::Red;
const C_PROJECTILE: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;

// ── Field → terminal mapping ──────────────────────────────────────────────────

/// Play area is everything inside the border: columns `1..width-1`, rows
/// `2..height-2` (row 0 is the HUD, the last row the controls hint).
struct Viewport {
    width: u16,
    height: u16,
    field_width: i32,
    field_height: i32,
}

impl Viewport {
    fn col(&self, x: i32) -> u16 {
        let inner = self.width.saturating_sub(2).max(1) as i64;
        let scaled = x as i64 * inner / self.field_width.max(1) as i64;
        (1 + scaled.clamp(0, inner - 1)) as u16
    }

    fn row(&self, y: i32) -> u16 {
        let inner = self.height.saturating_sub(4).max(1) as i64;
        let scaled = y as i64 * inner / self.field_height.max(1) as i64;
        (2 + scaled.clamp(0, inner - 1)) as u16
    }

    fn player_row(&self) -> u16 {
        self.height.saturating_sub(3).max(2)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame onto a terminal of `size` (columns, rows).
pub fn render<W: Write>(out: &mut W, engine: &Engine, size: (u16, u16)) -> std::io::Result<()> {
    let state = engine.snapshot();
    let view = Viewport {
        width: size.0,
        height: size.1,
        field_width: engine.config().field.width,
        field_height: engine.config().field.height,
    };

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, &view)?;
    draw_hud(out, state, &view)?;

    for enemy in state.alive_enemies() {
        draw_enemy(out, enemy, &view)?;
    }
    for projectile in &state.projectiles {
        draw_projectile(out, projectile, &view)?;
    }

    draw_player(out, state, &view)?;
    draw_controls_hint(out, &view)?;

    if let Some(outcome) = engine.outcome() {
        draw_game_over(out, state, outcome, &view)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let w = view.width as usize;
    let h = view.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2 — bottom bar
    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    // Score — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {:>8}", state.score)))?;

    // Remaining enemies and tick — right
    let right = format!(
        "Enemies: {}  Tick: {}",
        state.alive_enemies().count(),
        state.tick_count
    );
    let rx = view
        .width
        .saturating_sub(right.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_TICK))?;
    out.queue(Print(&right))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    // Sprite (1 row, 3 cols):  /▲\
    let col = view.col(state.player.x);
    out.queue(style::SetForegroundColor(C_PLAYER))?;
    out.queue(cursor::MoveTo(col.saturating_sub(1).max(1), view.player_row()))?;
    out.queue(Print("/▲\\"))?;
    Ok(())
}

fn draw_enemy<W: Write>(out: &mut W, enemy: &Enemy, view: &Viewport) -> std::io::Result<()> {
    let lx = view.col(enemy.x).saturating_sub(1).max(1);
    let row = view.row(enemy.y);
    let (sprite, color) = match enemy.kind {
        EnemyKind::Spacecraft => ("<▼>", C_ENEMY_SPACECRAFT),
        EnemyKind::Octopus => ("(◉)", C_ENEMY_OCTOPUS),
    };
    out.queue(style::SetForegroundColor(color))?;
    out.queue(cursor::MoveTo(lx, row))?;
    out.queue(Print(sprite))?;
    Ok(())
}

fn draw_projectile<W: Write>(
    out: &mut W,
    projectile: &Projectile,
    view: &Viewport,
) -> std::io::Result<()> {
    // Projectile y counts up from the player's edge, so draw it mirrored.
    let row = view.row(view.field_height - projectile.y);
    out.queue(cursor::MoveTo(view.col(projectile.x), row))?;
    out.queue(style::SetForegroundColor(C_PROJECTILE))?;
    out.queue(Print("║"))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    state: &GameState,
    outcome: Outcome,
    view: &Viewport,
) -> std::io::Result<()> {
    let (label, label_color) = match outcome {
        Outcome::Cleared => ("Formation destroyed!", Color::Green),
        Outcome::Breached => ("The line was breached", Color::Red),
    };
    let score_line = format!("Final Score: {}", state.score);
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", Color::Red),
        ("║    GAME  OVER    ║", Color::Red),
        ("╚══════════════════╝", Color::Red),
        (label, label_color),
        (&score_line, Color::Yellow),
        ("R - Play Again  Q - Quit", Color::White),
    ];

    let cx = view.width / 2;
    let start_row = (view.height / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    Ok(())
}
