use crate::input::Difficulty;
use crate::params::Params;
use crate::state::Side;

/// Physics tuning for one game instance.
///
/// A value object owned by each `GameManager`; independent instances never
/// share mutable configuration. Speeds are per tick (one nominal 60 Hz
/// frame), pre-divided from the per-second values in `Params`.
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsConfig {
    pub ball_speed: f32,
    pub ball_acceleration: f32,
    pub ball_max_speed: f32,
    pub ball_radius: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,
    pub max_bounce_angle_deg: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            ball_speed: Params::BALL_SPEED_PER_SEC / Params::NOMINAL_FRAME_RATE,
            ball_acceleration: Params::BALL_ACCELERATION,
            ball_max_speed: Params::BALL_MAX_SPEED_PER_SEC / Params::NOMINAL_FRAME_RATE,
            ball_radius: Params::BALL_RADIUS,
            paddle_height: Params::PADDLE_HEIGHT,
            paddle_speed: Params::PADDLE_SPEED_PER_SEC / Params::NOMINAL_FRAME_RATE,
            max_bounce_angle_deg: Params::MAX_BOUNCE_ANGLE_DEG,
        }
    }
}

impl PhysicsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply partial overrides, leaving unset fields untouched.
    pub fn apply(&mut self, overrides: &PhysicsOverrides) {
        if let Some(v) = overrides.ball_speed {
            self.ball_speed = v;
        }
        if let Some(v) = overrides.ball_acceleration {
            self.ball_acceleration = v;
        }
        if let Some(v) = overrides.ball_max_speed {
            self.ball_max_speed = v;
        }
        if let Some(v) = overrides.ball_radius {
            self.ball_radius = v;
        }
        if let Some(v) = overrides.paddle_height {
            self.paddle_height = v;
        }
        if let Some(v) = overrides.paddle_speed {
            self.paddle_speed = v;
        }
        if let Some(v) = overrides.max_bounce_angle_deg {
            self.max_bounce_angle_deg = v;
        }
    }
}

/// Partial physics overrides; `None` fields keep the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhysicsOverrides {
    pub ball_speed: Option<f32>,
    pub ball_acceleration: Option<f32>,
    pub ball_max_speed: Option<f32>,
    pub ball_radius: Option<f32>,
    pub paddle_height: Option<f32>,
    pub paddle_speed: Option<f32>,
    pub max_bounce_angle_deg: Option<f32>,
}

/// Display names for the two players.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerNames {
    pub left: String,
    pub right: String,
}

impl Default for PlayerNames {
    fn default() -> Self {
        Self {
            left: "Player 1".to_string(),
            right: "Player 2".to_string(),
        }
    }
}

/// Match-level options recognized by the game manager.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSettings {
    /// Goals needed to win.
    pub max_score: u32,
    pub ai_difficulty: Difficulty,
    /// Delay between a goal and ball reactivation.
    pub cooldown_ms: f32,
    /// Per-tick lerp factor for online display smoothing (0-1).
    pub interpolation_speed: f32,
    pub player_names: PlayerNames,
    /// Which side the local human plays in online mode.
    pub local_side: Side,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            max_score: Params::WIN_SCORE,
            ai_difficulty: Difficulty::Medium,
            cooldown_ms: Params::COOLDOWN_MS,
            interpolation_speed: 0.2,
            player_names: PlayerNames::default(),
            local_side: Side::Left,
        }
    }
}

impl GameSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge partial settings; `None` fields keep the current value.
    pub fn merge(&mut self, patch: SettingsPatch) {
        if let Some(v) = patch.max_score {
            self.max_score = v;
        }
        if let Some(v) = patch.ai_difficulty {
            self.ai_difficulty = v;
        }
        if let Some(v) = patch.cooldown_ms {
            self.cooldown_ms = v;
        }
        if let Some(v) = patch.interpolation_speed {
            self.interpolation_speed = v;
        }
        if let Some(v) = patch.player_names {
            self.player_names = v;
        }
        if let Some(v) = patch.local_side {
            self.local_side = v;
        }
    }
}

/// Partial match settings used when changing modes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsPatch {
    pub max_score: Option<u32>,
    pub ai_difficulty: Option<Difficulty>,
    pub cooldown_ms: Option<f32>,
    pub interpolation_speed: Option<f32>,
    pub player_names: Option<PlayerNames>,
    pub local_side: Option<Side>,
}
