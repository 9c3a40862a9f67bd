//! Input adapter: turns raw key events into engine intents.
//!
//! Direction keys are sampled once per frame by `poll` and move the player
//! at most once per move interval while held.  The fire key fires exactly
//! once per physical press.
//!
//! Two classes of terminal are handled:
//! * **Keyboard-enhancement capable** (kitty protocol etc.): proper
//!   `Press` / `Repeat` / `Release` events, so keys are dropped on release.
//! * **Classic terminals**: only `Press` events, with OS auto-repeat showing
//!   up as repeated presses.  A direction key counts as held while its last
//!   press is within the hold window, which is shorter than any OS repeat
//!   interval once repeating has started.  The fire key uses the longer
//!   re-arm window instead, which also covers the OS initial repeat delay,
//!   so a held fire key never produces a second shot.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use tracing::trace;

use crate::config::TimingConfig;
use crate::engine::Engine;
use crate::entities::Direction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Fire,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Press,
    Repeat,
    Release,
}

/// Map a terminal key event onto a game key.  Returns `None` for keys the
/// game does not bind.
pub fn translate(event: &KeyEvent) -> Option<(Key, KeyAction)> {
    let key = match event.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Key::Left,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Key::Right,
        KeyCode::Char(' ') => Key::Fire,
        _ => return None,
    };
    let action = match event.kind {
        KeyEventKind::Press => KeyAction::Press,
        KeyEventKind::Repeat => KeyAction::Repeat,
        KeyEventKind::Release => KeyAction::Release,
    };
    Some((key, action))
}

#[derive(Debug)]
pub struct InputAdapter {
    move_interval: Duration,
    hold_window: Duration,
    fire_rearm: Duration,
    // Last press/repeat per key; `None` once released.
    left_seen: Option<Instant>,
    right_seen: Option<Instant>,
    fire_seen: Option<Instant>,
    last_move: Option<Instant>,
}

impl InputAdapter {
    pub fn new(timing: &TimingConfig) -> Self {
        Self {
            move_interval: timing.move_interval(),
            hold_window: timing.hold_window(),
            fire_rearm: timing.fire_rearm(),
            left_seen: None,
            right_seen: None,
            fire_seen: None,
            last_move: None,
        }
    }

    /// Record one key event.  Fire presses reach the engine immediately;
    /// direction keys only update the held set.
    pub fn handle(&mut self, key: Key, action: KeyAction, now: Instant, engine: &mut Engine) {
        match (key, action) {
            (Key::Fire, KeyAction::Press) => {
                if within(self.fire_seen, now, self.fire_rearm) {
                    trace!("fire auto-repeat suppressed");
                } else {
                    engine.fire_bullet();
                }
                self.fire_seen = Some(now);
            }
            (Key::Fire, KeyAction::Repeat) => self.fire_seen = Some(now),
            (Key::Fire, KeyAction::Release) => self.fire_seen = None,
            (Key::Left, KeyAction::Release) => self.left_seen = None,
            (Key::Right, KeyAction::Release) => self.right_seen = None,
            (Key::Left, _) => self.left_seen = Some(now),
            (Key::Right, _) => self.right_seen = Some(now),
        }
    }

    /// Apply held direction keys.  Call once per scheduler frame.  Left
    /// wins when both directions are held.
    pub fn poll(&mut self, now: Instant, engine: &mut Engine) {
        let direction = if self.is_held(self.left_seen, now) {
            Direction::Left
        } else if self.is_held(self.right_seen, now) {
            Direction::Right
        } else {
            return;
        };

        if let Some(last) = self.last_move {
            if now.saturating_duration_since(last) < self.move_interval {
                return;
            }
        }
        engine.move_player(direction);
        self.last_move = Some(now);
    }

    fn is_held(&self, seen: Option<Instant>, now: Instant) -> bool {
        within(seen, now, self.hold_window)
    }
}

fn within(seen: Option<Instant>, now: Instant, window: Duration) -> bool {
    seen.map(|last| now.saturating_duration_since(last) <= window)
        .unwrap_or(false)
}
