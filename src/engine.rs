//! The engine owns the authoritative `GameState` and the config it is
//! played under.  Each operation computes a complete new snapshot with the
//! pure functions in `compute` and swaps it in, so a tick is never observed
//! half-applied.

use tracing::info;

use crate::compute;
use crate::config::GameConfig;
use crate::entities::{Direction, GameState, Outcome};

#[derive(Clone, Debug)]
pub struct Engine {
    config: GameConfig,
    state: GameState,
}

impl Engine {
    pub fn new(config: GameConfig) -> Self {
        let state = compute::init_state(&config);
        info!(
            enemies = state.enemies.len(),
            width = config.field.width,
            height = config.field.height,
            "new game"
        );
        Self { config, state }
    }

    /// Resume from an arbitrary state, e.g. a hand-built test position.
    pub fn with_state(config: GameConfig, state: GameState) -> Self {
        Self { config, state }
    }

    pub fn move_player(&mut self, direction: Direction) {
        self.state = compute::move_player(&self.state, &self.config, direction);
    }

    pub fn fire_bullet(&mut self) {
        self.state = compute::fire_bullet(&self.state, &self.config);
    }

    pub fn tick(&mut self) {
        self.state = compute::tick(&self.state, &self.config);
    }

    /// Read-only view for renderers.
    pub fn snapshot(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        compute::outcome(&self.state)
    }
}
