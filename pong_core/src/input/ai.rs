use rand::Rng;

use super::Controller;
use crate::state::{GameRng, GameState, MoveDir, Side};

/// AI difficulty tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Impossible,
}

/// Per-tier behavior parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiParams {
    /// Maximum random offset applied to the predicted intercept, in court
    /// units.
    pub error_margin: f32,
    /// Probability that a decision tick actually results in movement.
    pub tracking_speed: f32,
    /// How far ahead the ball's trajectory is extrapolated (0 tracks the raw
    /// ball Y).
    pub prediction_depth: f32,
    /// Reserved reaction latency. Part of the tuning table but consumed by no
    /// algorithm.
    pub reaction_delay_ms: f32,
}

impl Difficulty {
    pub fn params(self) -> AiParams {
        match self {
            Difficulty::Easy => AiParams {
                error_margin: 0.15,
                tracking_speed: 0.5,
                prediction_depth: 0.0,
                reaction_delay_ms: 300.0,
            },
            Difficulty::Medium => AiParams {
                error_margin: 0.08,
                tracking_speed: 0.75,
                prediction_depth: 0.5,
                reaction_delay_ms: 150.0,
            },
            Difficulty::Hard => AiParams {
                error_margin: 0.04,
                tracking_speed: 0.9,
                prediction_depth: 0.85,
                reaction_delay_ms: 80.0,
            },
            Difficulty::Impossible => AiParams {
                error_margin: 0.0,
                tracking_speed: 1.0,
                prediction_depth: 1.0,
                reaction_delay_ms: 0.0,
            },
        }
    }
}

// Ball proximity at which the AI tracks even when the ball moves away.
const APPROACH_DISTANCE: f32 = 0.3;
// Tolerance while drifting back to the court center.
const CENTER_DEAD_ZONE: f32 = 0.02;
// Tolerance while tracking the predicted intercept.
const TRACK_DEAD_ZONE: f32 = 0.01;

/// Scripted opponent. Reads the shared game state each tick and decides a
/// movement for its side's paddle.
pub struct AiController {
    side: Side,
    params: AiParams,
    enabled: bool,
    rng: GameRng,
}

impl AiController {
    pub fn new(side: Side, difficulty: Difficulty, seed: u64) -> Self {
        Self {
            side,
            params: difficulty.params(),
            enabled: true,
            rng: GameRng::new(seed),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Predicted ball Y at this paddle's plane, folded back into the court by
    /// mirroring at each wall crossing.
    fn target_y(&self, state: &GameState) -> f32 {
        let ball = &state.ball;
        if self.params.prediction_depth <= 0.0 || ball.vel.x.abs() < f32::EPSILON {
            return ball.pos.y;
        }
        let paddle_x = state.paddle(self.side).x;
        let time_to_plane = (paddle_x - ball.pos.x) / ball.vel.x;
        let y = ball.pos.y + ball.vel.y * time_to_plane * self.params.prediction_depth;
        if (0.0..=1.0).contains(&y) {
            return y;
        }
        if !y.is_finite() {
            return ball.pos.y;
        }
        // Mirror the overshoot back into the court: reflections at the two
        // walls repeat with period 2
        let folded = y.rem_euclid(2.0);
        if folded > 1.0 {
            2.0 - folded
        } else {
            folded
        }
    }
}

impl Controller for AiController {
    fn movement(&mut self, state: &GameState) -> Option<MoveDir> {
        if !self.enabled {
            return None;
        }
        let ball = &state.ball;
        let paddle = state.paddle(self.side);

        let toward_us = match self.side {
            Side::Left => ball.vel.x < 0.0,
            Side::Right => ball.vel.x > 0.0,
        };
        let approaching = toward_us || (ball.pos.x - paddle.x).abs() < APPROACH_DISTANCE;

        let center = paddle.center();
        if !approaching {
            // Ball receding: drift back toward the court's vertical center
            let diff = 0.5 - center;
            if diff.abs() <= CENTER_DEAD_ZONE {
                return None;
            }
            return Some(if diff > 0.0 { MoveDir::Down } else { MoveDir::Up });
        }

        let mut target = self.target_y(state);
        if self.params.error_margin > 0.0 {
            target += (self.rng.0.gen::<f32>() - 0.5) * 2.0 * self.params.error_margin;
        }
        let target = target.clamp(0.0, 1.0);

        let diff = target - center;
        if diff.abs() <= TRACK_DEAD_ZONE {
            return None;
        }
        // Imperfect reaction: a decision tick may fail to move at all
        if self.params.tracking_speed < 1.0
            && self.rng.0.gen::<f32>() > self.params.tracking_speed
        {
            return None;
        }
        Some(if diff > 0.0 { MoveDir::Down } else { MoveDir::Up })
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn destroy(&mut self) {
        self.enabled = false;
    }
}
