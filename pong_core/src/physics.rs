//! Ball and paddle physics over the normalized unit court.
//!
//! All functions are side-effect free beyond their explicit arguments; the
//! game manager owns the state and decides when each step runs.

use glam::Vec2;
use rand::Rng;

use crate::config::{PhysicsConfig, PlayerNames};
use crate::state::{Ball, GameRng, GameState, MoveDir, Paddle, Score, Side};
use crate::params::Params;

/// Build a fresh game state: ball centered with a randomized serve, paddles
/// vertically centered, score zero. The ball starts inactive.
pub fn init_game_state(
    config: &PhysicsConfig,
    max_score: u32,
    player_names: PlayerNames,
    rng: &mut GameRng,
) -> GameState {
    let speed = config.ball_speed;
    GameState {
        ball: Ball {
            pos: Vec2::new(0.5, 0.5),
            vel: starting_velocity(speed, None, rng),
            speed,
            radius: config.ball_radius,
            active: false,
        },
        left_paddle: Paddle::new(Side::Left, config.paddle_height),
        right_paddle: Paddle::new(Side::Right, config.paddle_height),
        score: Score::new(),
        game_over: false,
        paused: true,
        winner: None,
        is_cooldown: false,
        cooldown_timer_ms: 0.0,
        max_score,
        player_names,
    }
}

/// Integrate the ball's position. No clamping: an out-of-range `x` is the
/// goal signal consumed by `check_goal`.
pub fn update_ball_position(ball: &mut Ball, dt: f32) {
    ball.pos += ball.vel * dt;
}

/// Step a paddle's top edge one tick in `dir`, clamped to the court.
pub fn move_paddle(y: f32, dir: MoveDir, config: &PhysicsConfig) -> f32 {
    match dir {
        MoveDir::Up => (y - config.paddle_speed).max(0.0),
        MoveDir::Down => (y + config.paddle_speed).min(1.0 - config.paddle_height),
    }
}

/// AABB-vs-circle test between the ball and a paddle. The X-overlap test
/// differs by side: the ball's near edge must reach the paddle's plane at
/// `x = 0` or `x = 1`.
pub fn check_paddle_collision(ball: &Ball, paddle: &Paddle) -> bool {
    let y_overlap = ball.pos.y + ball.radius >= paddle.y
        && ball.pos.y - ball.radius <= paddle.y + paddle.height;
    if !y_overlap {
        return false;
    }
    if paddle.x < 0.5 {
        ball.pos.x - ball.radius <= paddle.x
    } else {
        ball.pos.x + ball.radius >= paddle.x
    }
}

/// Resolve a paddle hit: accelerate the ball (capped), then recompute its
/// velocity from the hit offset. `direction` is the outgoing horizontal sign
/// (+1 away from the left paddle, -1 away from the right). The caller gates
/// this by velocity sign so a hit is resolved at most once per frame per
/// paddle.
pub fn elaborate_paddle_collision(
    ball: &mut Ball,
    paddle: &Paddle,
    direction: f32,
    config: &PhysicsConfig,
) {
    ball.speed = (ball.speed * config.ball_acceleration).min(config.ball_max_speed);
    // Hit offset from the paddle center, normalized to [-1, 1]
    let offset = ((ball.pos.y - paddle.center()) / (paddle.height / 2.0)).clamp(-1.0, 1.0);
    let angle = offset * config.max_bounce_angle_deg.to_radians();
    ball.vel = velocity_from_angle(ball.speed, angle, direction);
}

/// Bounce off the top or bottom wall. The position clamp keeps floating-point
/// overshoot from re-triggering the bounce on the next frame.
pub fn elaborate_wall_collision(ball: &mut Ball) {
    ball.vel.y = -ball.vel.y;
    ball.pos.y = ball.pos.y.clamp(ball.radius, 1.0 - ball.radius);
}

/// Whether the ball crossed a goal plane, and who scored if so.
pub fn check_goal(ball: &Ball) -> Option<Side> {
    if ball.pos.x < 0.0 {
        Some(Side::Right)
    } else if ball.pos.x > 1.0 {
        Some(Side::Left)
    } else {
        None
    }
}

/// Re-center the ball, restore its initial speed and serve it toward
/// `direction` (+1 right, -1 left).
pub fn reset_ball(ball: &mut Ball, direction: f32, config: &PhysicsConfig, rng: &mut GameRng) {
    ball.pos = Vec2::new(0.5, 0.5);
    ball.speed = config.ball_speed;
    ball.vel = starting_velocity(ball.speed, Some(direction), rng);
}

/// Serve velocity: angle sampled uniformly in the serve cone, horizontal
/// direction random unless forced.
pub fn starting_velocity(speed: f32, forced_direction: Option<f32>, rng: &mut GameRng) -> Vec2 {
    let max_angle = Params::SERVE_ANGLE_DEG.to_radians();
    let angle = rng.0.gen_range(-max_angle..=max_angle);
    let direction = forced_direction
        .unwrap_or_else(|| if rng.0.gen_bool(0.5) { 1.0 } else { -1.0 });
    velocity_from_angle(speed, angle, direction)
}

/// Decompose a speed/angle pair into velocity components. Shared by serves
/// and paddle bounces.
fn velocity_from_angle(speed: f32, angle: f32, direction: f32) -> Vec2 {
    Vec2::new(direction * speed * angle.cos(), speed * angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_ball(x: f32, y: f32, vx: f32, vy: f32) -> Ball {
        Ball {
            pos: Vec2::new(x, y),
            vel: Vec2::new(vx, vy),
            speed: (vx * vx + vy * vy).sqrt(),
            radius: 0.015,
            active: true,
        }
    }

    #[test]
    fn test_move_paddle_clamps_at_top() {
        let config = PhysicsConfig::new();
        let mut y = 0.02;
        for _ in 0..50 {
            y = move_paddle(y, MoveDir::Up, &config);
            assert!(y >= 0.0);
        }
        assert_eq!(y, 0.0);
    }

    #[test]
    fn test_move_paddle_clamps_at_bottom() {
        let config = PhysicsConfig::new();
        let mut y = 0.5;
        for _ in 0..100 {
            y = move_paddle(y, MoveDir::Down, &config);
            assert!(y <= 1.0 - config.paddle_height);
        }
        assert!((y - (1.0 - config.paddle_height)).abs() < 1e-6);
    }

    #[test]
    fn test_move_paddle_stays_in_range_under_mixed_input() {
        let config = PhysicsConfig::new();
        let mut y = 0.35;
        let dirs = [
            MoveDir::Up,
            MoveDir::Up,
            MoveDir::Down,
            MoveDir::Up,
            MoveDir::Down,
            MoveDir::Down,
            MoveDir::Down,
        ];
        for _ in 0..40 {
            for dir in dirs {
                y = move_paddle(y, dir, &config);
                assert!(y >= 0.0 && y <= 1.0 - config.paddle_height);
            }
        }
    }

    #[test]
    fn test_ball_integration() {
        let mut ball = test_ball(0.5, 0.5, 0.01, -0.005);
        update_ball_position(&mut ball, 2.0);
        assert!((ball.pos.x - 0.52).abs() < 1e-6);
        assert!((ball.pos.y - 0.49).abs() < 1e-6);
    }

    #[test]
    fn test_check_goal_is_total() {
        let mut ball = test_ball(0.5, 0.5, 0.0, 0.0);
        assert_eq!(check_goal(&ball), None);
        ball.pos.x = -0.001;
        assert_eq!(check_goal(&ball), Some(Side::Right));
        ball.pos.x = 1.001;
        assert_eq!(check_goal(&ball), Some(Side::Left));
        // The planes themselves are not goals
        ball.pos.x = 0.0;
        assert_eq!(check_goal(&ball), None);
        ball.pos.x = 1.0;
        assert_eq!(check_goal(&ball), None);
    }

    #[test]
    fn test_wall_collision_inverts_and_clamps() {
        let mut ball = test_ball(0.5, 0.002, 0.01, -0.008);
        elaborate_wall_collision(&mut ball);
        assert!(ball.vel.y > 0.0, "Vertical velocity inverted");
        assert!(ball.pos.y >= ball.radius, "Position clamped inside the court");

        let mut ball = test_ball(0.5, 0.999, 0.01, 0.008);
        elaborate_wall_collision(&mut ball);
        assert!(ball.vel.y < 0.0);
        assert!(ball.pos.y <= 1.0 - ball.radius);
    }

    #[test]
    fn test_left_paddle_collision_scenario() {
        // Left paddle at y=0.35 h=0.3, ball edge reaching the x=0 plane
        let config = PhysicsConfig::new();
        let paddle = Paddle {
            x: 0.0,
            y: 0.35,
            height: 0.3,
        };
        let mut ball = test_ball(0.01, 0.5, -0.01, 0.0);
        assert!(check_paddle_collision(&ball, &paddle));

        let speed_before = ball.speed;
        elaborate_paddle_collision(&mut ball, &paddle, 1.0, &config);
        assert!(ball.vel.x > 0.0, "Ball deflected away from the left paddle");
        let expected = (speed_before * config.ball_acceleration).min(config.ball_max_speed);
        assert!((ball.speed - expected).abs() < 1e-6);
    }

    #[test]
    fn test_paddle_collision_requires_reaching_the_plane() {
        let paddle = Paddle {
            x: 0.0,
            y: 0.35,
            height: 0.3,
        };
        // Ball edge short of the plane: 0.02 - 0.015 = 0.005 > 0
        let short = test_ball(0.02, 0.5, -0.01, 0.0);
        assert!(!check_paddle_collision(&short, &paddle));
        // Edge exactly on the plane counts
        let touching = test_ball(0.015, 0.5, -0.01, 0.0);
        assert!(check_paddle_collision(&touching, &paddle));
    }

    #[test]
    fn test_paddle_collision_misses_outside_y_band() {
        let paddle = Paddle {
            x: 0.0,
            y: 0.35,
            height: 0.3,
        };
        let ball = test_ball(0.01, 0.8, -0.01, 0.0);
        assert!(!check_paddle_collision(&ball, &paddle));
    }

    #[test]
    fn test_right_paddle_collision_x_test_mirrors() {
        let paddle = Paddle {
            x: 1.0,
            y: 0.35,
            height: 0.3,
        };
        let hit = test_ball(0.99, 0.5, 0.01, 0.0);
        assert!(check_paddle_collision(&hit, &paddle));
        let miss = test_ball(0.9, 0.5, 0.01, 0.0);
        assert!(!check_paddle_collision(&miss, &paddle));
    }

    #[test]
    fn test_speed_capped_over_repeated_hits() {
        let config = PhysicsConfig::new();
        let paddle = Paddle {
            x: 0.0,
            y: 0.35,
            height: 0.3,
        };
        let mut ball = test_ball(0.01, 0.5, -config.ball_speed, 0.0);
        ball.speed = config.ball_speed;
        for _ in 0..100 {
            elaborate_paddle_collision(&mut ball, &paddle, 1.0, &config);
            assert!(ball.speed <= config.ball_max_speed + 1e-6);
        }
        assert!((ball.speed - config.ball_max_speed).abs() < 1e-6);
    }

    #[test]
    fn test_bounce_angle_tracks_hit_offset() {
        let config = PhysicsConfig::new();
        let paddle = Paddle {
            x: 0.0,
            y: 0.35,
            height: 0.3,
        };
        // Hit at the paddle center: straight return
        let mut center_hit = test_ball(0.01, 0.5, -0.01, 0.004);
        elaborate_paddle_collision(&mut center_hit, &paddle, 1.0, &config);
        assert!(center_hit.vel.y.abs() < 1e-6);

        // Hit near the bottom edge: steep downward deflection
        let mut edge_hit = test_ball(0.01, 0.64, -0.01, 0.0);
        elaborate_paddle_collision(&mut edge_hit, &paddle, 1.0, &config);
        assert!(edge_hit.vel.y > 0.0);
        let max_vy = edge_hit.speed * config.max_bounce_angle_deg.to_radians().sin();
        assert!(edge_hit.vel.y <= max_vy + 1e-6);
    }

    #[test]
    fn test_reset_ball_postconditions() {
        let config = PhysicsConfig::new();
        let mut rng = GameRng::new(7);
        let mut ball = test_ball(1.2, 0.9, 0.02, 0.01);
        ball.speed = 0.02;

        reset_ball(&mut ball, -1.0, &config, &mut rng);
        assert_eq!(ball.pos, Vec2::new(0.5, 0.5));
        assert!((ball.speed - config.ball_speed).abs() < 1e-6);
        // Serve cone never exceeds 60 degrees, so cos > 0 and vx carries the sign
        assert!(ball.vel.x < 0.0);

        reset_ball(&mut ball, 1.0, &config, &mut rng);
        assert!(ball.vel.x > 0.0);
    }

    #[test]
    fn test_starting_velocity_within_serve_cone() {
        let mut rng = GameRng::new(99);
        let speed = 0.008;
        let max_vy = speed * Params::SERVE_ANGLE_DEG.to_radians().sin();
        for _ in 0..200 {
            let vel = starting_velocity(speed, None, &mut rng);
            assert!((vel.length() - speed).abs() < 1e-6, "Speed preserved");
            assert!(vel.y.abs() <= max_vy + 1e-6, "Angle within +/-60 degrees");
            assert!(vel.x != 0.0);
        }
    }

    #[test]
    fn test_init_game_state() {
        let config = PhysicsConfig::new();
        let mut rng = GameRng::new(1);
        let state = init_game_state(&config, 5, PlayerNames::default(), &mut rng);
        assert_eq!(state.ball.pos, Vec2::new(0.5, 0.5));
        assert!(!state.ball.active);
        assert!((state.left_paddle.center() - 0.5).abs() < 1e-6);
        assert!((state.right_paddle.center() - 0.5).abs() < 1e-6);
        assert_eq!(state.score, Score::new());
        assert!(!state.game_over && !state.is_cooldown);
        assert_eq!(state.max_score, 5);
    }
}
