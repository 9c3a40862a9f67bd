/// All game entity types — pure data, no logic.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    Spacecraft,
    Octopus,
}

impl EnemyKind {
    /// Kinds alternate by formation row, starting with `Spacecraft`.
    pub fn for_row(row: usize) -> Self {
        if row % 2 == 0 {
            EnemyKind::Spacecraft
        } else {
            EnemyKind::Octopus
        }
    }
}

/// Horizontal direction, shared by player intents and the formation heading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// -1 for left, +1 for right.
    pub fn sign(self) -> i32 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// Label for a finished game. Derived from state, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Every enemy was destroyed.
    Cleared,
    /// An enemy crossed the breach line.
    Breached,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Projectile {
    pub x: i32,
    pub y: i32,
}

// ── Player & enemy ────────────────────────────────────────────────────────────

/// The player only moves horizontally.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub x: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enemy {
    pub x: i32,
    pub y: i32,
    /// Dead enemies stay in the formation; they keep moving but are never
    /// hit-tested, drawn or counted.
    pub alive: bool,
    pub kind: EnemyKind,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub player: Player,
    /// Created once at start, in row-major order.
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    /// Heading applied to every enemy on the next tick.
    pub formation: Direction,
    pub score: u32,
    pub status: GameStatus,
    pub tick_count: u64,
}

impl GameState {
    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn alive_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| e.alive)
    }
}
