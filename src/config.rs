//! Tunable game constants, loadable from TOML.
//!
//! Every section defaults to the classic layout: an 800×600 field with a
//! 2×4 formation, so an empty file (or no file at all) plays the standard
//! game.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// Largest distance any configured position or size may reach.
pub const MAX_COORD: i32 = 1_000_000;

/// Largest formation a config may describe.
pub const MAX_ENEMIES: usize = 10_000;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldConfig {
    pub width: i32,
    pub height: i32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerConfig {
    /// Displacement per `move_player` call.
    pub step: i32,
    /// Half the sprite width; the player stays this far from either edge.
    pub margin: i32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self { step: 8, margin: 40 }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormationConfig {
    pub rows: usize,
    pub cols: usize,
    /// Distance between neighbouring enemies, both axes.
    pub spacing: i32,
    pub origin_x: i32,
    pub origin_y: i32,
    /// Horizontal displacement per tick.
    pub speed: i32,
    /// The formation bounces once any enemy is closer than this to a side.
    pub edge_margin: i32,
    /// Downward shift applied on every bounce.
    pub descent: i32,
    /// An alive enemy with `y > height - breach_margin` ends the game.
    pub breach_margin: i32,
}

impl Default for FormationConfig {
    fn default() -> Self {
        Self {
            rows: 2,
            cols: 4,
            spacing: 100,
            origin_x: 150,
            origin_y: 100,
            speed: 2,
            edge_margin: 60,
            descent: 20,
            breach_margin: 100,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectileConfig {
    pub speed: i32,
    pub launch_y: i32,
    /// Projectiles are discarded once `y >= height - far_margin`.
    pub far_margin: i32,
    /// Half side of the square hit box.
    pub hit_radius: i32,
    pub award: u32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            speed: 8,
            launch_y: 0,
            far_margin: 20,
            hit_radius: 30,
            award: 100,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimingConfig {
    /// Scheduler cadence.
    pub tick_ms: u64,
    /// Minimum gap between two player displacements while a key is held.
    pub move_interval_ms: u64,
    /// A key without release events counts as held this long after its
    /// last press or repeat.
    pub hold_window_ms: u64,
    /// After a fire press, further presses without a release in between
    /// are treated as auto-repeat until the key has been quiet this long.
    /// Must outlast the OS initial repeat delay.
    pub fire_rearm_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tick_ms: 16,
            move_interval_ms: 16,
            hold_window_ms: 130,
            fire_rearm_ms: 600,
        }
    }
}

impl TimingConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn move_interval(&self) -> Duration {
        Duration::from_millis(self.move_interval_ms)
    }

    pub fn hold_window(&self) -> Duration {
        Duration::from_millis(self.hold_window_ms)
    }

    pub fn fire_rearm(&self) -> Duration {
        Duration::from_millis(self.fire_rearm_ms)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub field: FieldConfig,
    pub player: PlayerConfig,
    pub formation: FormationConfig,
    pub projectile: ProjectileConfig,
    pub timing: TimingConfig,
}

impl GameConfig {
    /// Parse and validate a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Reject layouts the engine cannot play sensibly.  Sizes, speeds and
    /// the formation's extent are bounded by `MAX_COORD`, so every position
    /// the engine derives stays a small multiple of it and its `i32` math
    /// never overflows.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let f = &self.field;
        let p = &self.player;
        let fm = &self.formation;
        let pr = &self.projectile;

        if !(1..=MAX_COORD).contains(&f.width) || !(1..=MAX_COORD).contains(&f.height) {
            return Err(invalid(format!(
                "field must be between 1 and {MAX_COORD} on each side, got {}x{}",
                f.width, f.height
            )));
        }
        if !(1..=MAX_COORD).contains(&p.step) {
            return Err(invalid(format!("player.step must be between 1 and {MAX_COORD}")));
        }
        if p.margin < 0 || 2 * i64::from(p.margin) > i64::from(f.width) {
            return Err(invalid(format!(
                "player.margin {} does not fit a field {} wide",
                p.margin, f.width
            )));
        }

        let enemies = fm.rows.checked_mul(fm.cols).unwrap_or(usize::MAX);
        if fm.rows == 0 || fm.cols == 0 || enemies > MAX_ENEMIES {
            return Err(invalid(format!(
                "formation must have between 1 and {MAX_ENEMIES} enemies, got {}x{}",
                fm.rows, fm.cols
            )));
        }
        if !(1..=MAX_COORD).contains(&fm.speed)
            || !(1..=MAX_COORD).contains(&fm.spacing)
            || !(0..=MAX_COORD).contains(&fm.descent)
        {
            return Err(invalid(format!(
                "formation.speed and formation.spacing must be between 1 and {MAX_COORD}, \
                 formation.descent between 0 and {MAX_COORD}"
            )));
        }
        let far_x = i64::from(fm.origin_x) + (fm.cols as i64 - 1) * i64::from(fm.spacing);
        let far_y = i64::from(fm.origin_y) + (fm.rows as i64 - 1) * i64::from(fm.spacing);
        let coord_range = -i64::from(MAX_COORD)..=i64::from(MAX_COORD);
        let corners = [i64::from(fm.origin_x), i64::from(fm.origin_y), far_x, far_y];
        if !corners.iter().all(|c| coord_range.contains(c)) {
            return Err(invalid(format!(
                "formation must lie within ±{MAX_COORD}, spans ({}, {}) to ({far_x}, {far_y})",
                fm.origin_x, fm.origin_y
            )));
        }
        if fm.edge_margin < 0 || 2 * i64::from(fm.edge_margin) >= i64::from(f.width) {
            return Err(invalid(format!(
                "formation.edge_margin {} leaves no room in a field {} wide",
                fm.edge_margin, f.width
            )));
        }
        if !(0..=f.height).contains(&fm.breach_margin) {
            return Err(invalid("formation.breach_margin must lie inside the field"));
        }

        if !(1..=MAX_COORD).contains(&pr.speed) || !(1..=MAX_COORD).contains(&pr.hit_radius) {
            return Err(invalid(format!(
                "projectile.speed and projectile.hit_radius must be between 1 and {MAX_COORD}"
            )));
        }
        if !(0..=f.height).contains(&pr.far_margin)
            || pr.launch_y < -MAX_COORD
            || pr.launch_y >= f.height - pr.far_margin
        {
            return Err(invalid("projectile.launch_y must lie before the far edge"));
        }
        if self.timing.tick_ms == 0 {
            return Err(invalid("timing.tick_ms must be positive"));
        }
        Ok(())
    }

    /// Right-most x the player may reach.
    pub fn player_max_x(&self) -> i32 {
        self.field.width - self.player.margin
    }

    /// Formation bounces when an enemy passes this x while heading right.
    pub fn formation_right_bound(&self) -> i32 {
        self.field.width - self.formation.edge_margin
    }

    pub fn breach_line(&self) -> i32 {
        self.field.height - self.formation.breach_margin
    }

    /// Projectiles at or past this y are discarded.
    pub fn projectile_far_edge(&self) -> i32 {
        self.field.height - self.projectile.far_margin
    }
}

fn invalid(msg: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(msg.into())
}
