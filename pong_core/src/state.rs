use glam::Vec2;

use crate::config::PlayerNames;

/// Court side. Also the paddle discriminator: the left paddle sits at
/// `x = 0`, the right at `x = 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Map an opaque network paddle to a side by its `x` coordinate.
    pub fn from_x(x: f32) -> Side {
        if x < 0.5 {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Paddle plane for this side.
    pub fn paddle_x(self) -> f32 {
        match self {
            Side::Left => 0.0,
            Side::Right => 1.0,
        }
    }

    /// Horizontal sign of travel toward this side.
    pub fn direction(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// Paddle movement direction. "No movement" is `Option::<MoveDir>::None` at
/// every sampling point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDir {
    Up,
    Down,
}

impl MoveDir {
    /// Wire encoding used by `pong_proto::C2S::Input`.
    pub fn to_wire(self) -> i8 {
        match self {
            MoveDir::Up => -1,
            MoveDir::Down => 1,
        }
    }

    /// Parse a wire direction. Junk values are logged and yield `None`.
    pub fn from_wire(dir: i8) -> Option<MoveDir> {
        match dir {
            -1 => Some(MoveDir::Up),
            1 => Some(MoveDir::Down),
            other => {
                log::warn!("ignoring unknown movement direction {other}");
                None
            }
        }
    }
}

/// Game mode, orthogonal to the pause/cooldown/game-over state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    LocalMultiplayer,
    LocalVsAi,
    Online,
}

/// The pong ball. Inactive balls do not integrate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub speed: f32,
    pub radius: f32,
    pub active: bool,
}

/// A paddle. `y` is the top edge; `x` is fixed per side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paddle {
    pub x: f32,
    pub y: f32,
    pub height: f32,
}

impl Paddle {
    pub fn new(side: Side, height: f32) -> Self {
        Self {
            x: side.paddle_x(),
            y: (1.0 - height) / 2.0,
            height,
        }
    }

    pub fn center(&self) -> f32 {
        self.y + self.height / 2.0
    }
}

/// Game score tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn set(&mut self, side: Side, value: u32) {
        match side {
            Side::Left => self.left = value,
            Side::Right => self.right = value,
        }
    }

    pub fn increment(&mut self, side: Side) {
        match side {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
    }

    pub fn leader(&self) -> Option<Side> {
        if self.left > self.right {
            Some(Side::Left)
        } else if self.right > self.left {
            Some(Side::Right)
        } else {
            None
        }
    }
}

/// Seedable random number generator, so serves and AI behavior are
/// reproducible under a fixed seed.
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

/// The single mutable game state record, exclusively owned by the game
/// manager. Controllers and the renderer only read from it; all mutation
/// happens synchronously inside `update`.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub ball: Ball,
    pub left_paddle: Paddle,
    pub right_paddle: Paddle,
    pub score: Score,
    pub game_over: bool,
    pub paused: bool,
    pub winner: Option<Side>,
    pub is_cooldown: bool,
    pub cooldown_timer_ms: f32,
    pub max_score: u32,
    pub player_names: PlayerNames,
}

impl GameState {
    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left_paddle,
            Side::Right => &self.right_paddle,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left_paddle,
            Side::Right => &mut self.right_paddle,
        }
    }
}
