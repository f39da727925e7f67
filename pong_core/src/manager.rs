//! Game manager: owns the game state, wires the input controllers for the
//! selected mode, and drives the per-tick update. Offline modes run local
//! physics; online mode applies authoritative server snapshots instead.

use std::collections::HashMap;

use glam::Vec2;
use pong_proto::ServerSnapshot;

use crate::config::{GameSettings, PhysicsConfig, PhysicsOverrides, PlayerNames, SettingsPatch};
use crate::input::{
    AiController, Controller, KeyBindings, KeyboardController, NetworkController, PlayerController,
};
use crate::params::Params;
use crate::physics;
use crate::state::{GameMode, GameRng, GameState, MoveDir, Score, Side};

/// Outbound movement hook supplied by the transport. Assumed non-blocking and
/// never awaited; delivery guarantees are the transport's concern.
pub type SendFn = Box<dyn FnMut(MoveDir)>;

/// Outward-facing hooks. All optional; absent hooks are skipped.
#[derive(Default)]
pub struct Hooks {
    pub on_goal: Option<Box<dyn FnMut(Side, Score)>>,
    pub on_game_over: Option<Box<dyn FnMut(Side)>>,
    /// Exposed for embedders but never invoked by the core itself; the
    /// system this models wires the hook without a call site.
    pub on_ball_activate: Option<Box<dyn FnMut()>>,
    pub send_fn: Option<SendFn>,
}

/// Rendered positions, exponentially smoothed toward the authoritative
/// targets. Never fed back into the game state.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DisplayState {
    ball: Vec2,
    left_y: f32,
    right_y: f32,
}

impl DisplayState {
    fn of(state: &GameState) -> Self {
        Self {
            ball: state.ball.pos,
            left_y: state.left_paddle.y,
            right_y: state.right_paddle.y,
        }
    }

    fn lerp_toward(&mut self, target: &DisplayState, alpha: f32) {
        self.ball += (target.ball - self.ball) * alpha;
        self.left_y += (target.left_y - self.left_y) * alpha;
        self.right_y += (target.right_y - self.right_y) * alpha;
    }
}

/// Renderer-ready projection of the court onto a world-coordinate box.
/// Components are `(x, z)`; paddles are projected at their vertical centers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldCoordinates {
    pub ball: Vec2,
    pub left_paddle: Vec2,
    pub right_paddle: Vec2,
}

fn find_network<'a>(
    left: &'a mut Option<PlayerController>,
    right: &'a mut Option<PlayerController>,
) -> Option<&'a mut NetworkController> {
    if let Some(net) = left.as_mut().and_then(PlayerController::as_network_mut) {
        return Some(net);
    }
    right.as_mut().and_then(PlayerController::as_network_mut)
}

pub struct GameManager {
    mode: GameMode,
    state: GameState,
    physics: PhysicsConfig,
    settings: GameSettings,
    hooks: Hooks,
    left: Option<PlayerController>,
    right: Option<PlayerController>,
    display: DisplayState,
    target: DisplayState,
    /// Opaque network player ids mapped to sides, learned from snapshot
    /// paddle positions.
    side_by_id: HashMap<String, Side>,
    rng: GameRng,
    seed: u64,
}

impl GameManager {
    pub fn new(mode: GameMode, settings: GameSettings, hooks: Hooks, seed: u64) -> Self {
        let physics = PhysicsConfig::default();
        let mut rng = GameRng::new(seed);
        let mut state = physics::init_game_state(
            &physics,
            settings.max_score,
            settings.player_names.clone(),
            &mut rng,
        );
        // Offline play waits for an explicit resume; the server is
        // time-authoritative online.
        state.paused = mode != GameMode::Online;
        let display = DisplayState::of(&state);

        let mut manager = Self {
            mode,
            state,
            physics,
            settings,
            hooks,
            left: None,
            right: None,
            display,
            target: display,
            side_by_id: HashMap::new(),
            rng,
            seed,
        };
        manager.init_controllers();
        manager
    }

    fn init_controllers(&mut self) {
        match self.mode {
            GameMode::LocalMultiplayer => {
                self.left = Some(PlayerController::Keyboard(KeyboardController::new(
                    KeyBindings::wasd(),
                )));
                self.right = Some(PlayerController::Keyboard(KeyboardController::new(
                    KeyBindings::arrows(),
                )));
            }
            GameMode::LocalVsAi => {
                self.left = Some(PlayerController::Keyboard(KeyboardController::new(
                    KeyBindings::combined(),
                )));
                self.right = Some(PlayerController::Ai(AiController::new(
                    Side::Right,
                    self.settings.ai_difficulty,
                    self.seed.wrapping_add(1),
                )));
            }
            GameMode::Online => {
                let local = PlayerController::Keyboard(KeyboardController::new(
                    KeyBindings::combined(),
                ));
                let remote = PlayerController::Network(NetworkController::new());
                match self.settings.local_side {
                    Side::Left => {
                        self.left = Some(local);
                        self.right = Some(remote);
                    }
                    Side::Right => {
                        self.left = Some(remote);
                        self.right = Some(local);
                    }
                }
            }
        }
    }

    fn destroy_controllers(&mut self) {
        if let Some(c) = self.left.as_mut() {
            c.destroy();
        }
        if let Some(c) = self.right.as_mut() {
            c.destroy();
        }
        self.left = None;
        self.right = None;
    }

    /// Advance the simulation by `dt` nominal frames (1.0 = one 60 Hz frame).
    pub fn update(&mut self, dt: f32) {
        let dt = dt.min(Params::MAX_DT_FRAMES);

        // 1. Hard gates
        if self.state.game_over || self.state.paused {
            return;
        }

        // 2. Cooldown between rallies: no physics until it elapses
        if self.state.is_cooldown {
            self.state.cooldown_timer_ms -= dt * Params::FRAME_MS;
            if self.state.cooldown_timer_ms <= 0.0 {
                self.state.cooldown_timer_ms = 0.0;
                self.state.is_cooldown = false;
                self.state.ball.active = true;
            }
            return;
        }

        // 3. Sample both controllers
        let left_mv = match self.left.as_mut() {
            Some(c) => c.movement(&self.state),
            None => None,
        };
        let right_mv = match self.right.as_mut() {
            Some(c) => c.movement(&self.state),
            None => None,
        };

        // 4. Online: broadcast local movement, then apply the latest server
        // snapshot. No local ball physics in this branch; without a fresh
        // snapshot the state is left exactly as it was.
        if self.mode == GameMode::Online {
            let local_mv = match self.settings.local_side {
                Side::Left => left_mv,
                Side::Right => right_mv,
            };
            let snap = match find_network(&mut self.left, &mut self.right) {
                Some(net) => {
                    if let Some(send) = self.hooks.send_fn.as_deref_mut() {
                        net.send_movement(local_mv, send);
                        net.advance(dt * Params::FRAME_MS, send);
                    }
                    net.take_fresh()
                }
                None => None,
            };
            if let Some(snap) = snap {
                self.apply_snapshot(&snap);
            }
            return;
        }

        // 5. Offline: paddle movement, integration, collisions, scoring
        let left_is_ai = self.left.as_ref().map(PlayerController::is_ai).unwrap_or(false);
        let right_is_ai = self.right.as_ref().map(PlayerController::is_ai).unwrap_or(false);

        if let Some(mv) = left_mv {
            self.state.left_paddle.y =
                physics::move_paddle(self.state.left_paddle.y, mv, &self.physics);
            // Only a human action starts the rally
            if !self.state.ball.active && !left_is_ai {
                self.state.ball.active = true;
            }
        }
        if let Some(mv) = right_mv {
            self.state.right_paddle.y =
                physics::move_paddle(self.state.right_paddle.y, mv, &self.physics);
            if !self.state.ball.active && !right_is_ai {
                self.state.ball.active = true;
            }
        }

        if self.state.ball.active {
            physics::update_ball_position(&mut self.state.ball, dt);

            let ball = &self.state.ball;
            if ball.pos.y - ball.radius <= 0.0 || ball.pos.y + ball.radius >= 1.0 {
                physics::elaborate_wall_collision(&mut self.state.ball);
            }

            // Sign-gating ensures a collision is resolved at most once: after
            // the bounce the velocity points away, so the same paddle cannot
            // re-trigger next frame.
            if self.state.ball.vel.x < 0.0
                && physics::check_paddle_collision(&self.state.ball, &self.state.left_paddle)
            {
                let paddle = self.state.left_paddle;
                physics::elaborate_paddle_collision(&mut self.state.ball, &paddle, 1.0, &self.physics);
            } else if self.state.ball.vel.x > 0.0
                && physics::check_paddle_collision(&self.state.ball, &self.state.right_paddle)
            {
                let paddle = self.state.right_paddle;
                physics::elaborate_paddle_collision(&mut self.state.ball, &paddle, -1.0, &self.physics);
            }

            if let Some(scorer) = physics::check_goal(&self.state.ball) {
                self.handle_goal(scorer);
            }
        }

        // Offline rendering follows the authoritative state directly
        self.sync_display();
    }

    /// Copy an authoritative snapshot into the state. Absent fields leave the
    /// corresponding local state untouched for this tick.
    fn apply_snapshot(&mut self, snap: &ServerSnapshot) {
        if let Some(ball) = snap.ball {
            self.state.ball.pos = Vec2::new(ball.x, ball.y);
            self.target.ball = self.state.ball.pos;
        }
        if let Some(paddles) = &snap.paddles {
            for (id, p) in paddles {
                let side = Side::from_x(p.x);
                self.side_by_id.insert(id.clone(), side);
                self.state.paddle_mut(side).y = p.y;
                match side {
                    Side::Left => self.target.left_y = p.y,
                    Side::Right => self.target.right_y = p.y,
                }
            }
        }
        if let Some(scores) = &snap.scores {
            for (id, &value) in scores {
                let Some(&side) = self.side_by_id.get(id) else {
                    log::debug!("snapshot score for unknown player id {id}");
                    continue;
                };
                let current = self.state.score.get(side);
                if value == current {
                    continue;
                }
                self.state.score.set(side, value);
                // Only a strictly increased score is a goal; corrective
                // snapshots never re-fire the callback
                if value > current {
                    if let Some(cb) = self.hooks.on_goal.as_mut() {
                        cb(side, self.state.score);
                    }
                }
            }
        }
    }

    fn handle_goal(&mut self, scorer: Side) {
        self.state.score.increment(scorer);

        // The next rally serves toward the side that conceded
        let conceded = scorer.opposite();
        physics::reset_ball(
            &mut self.state.ball,
            conceded.direction(),
            &self.physics,
            &mut self.rng,
        );
        self.state.ball.active = false;

        let centered = (1.0 - self.physics.paddle_height) / 2.0;
        self.state.left_paddle.y = centered;
        self.state.right_paddle.y = centered;
        self.sync_display();

        let score = self.state.score;
        if score.get(scorer) >= self.state.max_score {
            self.state.game_over = true;
            self.state.winner = Some(scorer);
            self.state.is_cooldown = false;
            if let Some(cb) = self.hooks.on_game_over.as_mut() {
                cb(scorer);
            }
        } else {
            self.state.is_cooldown = true;
            self.state.cooldown_timer_ms = self.settings.cooldown_ms;
        }
        if let Some(cb) = self.hooks.on_goal.as_mut() {
            cb(scorer, score);
        }
    }

    fn sync_display(&mut self) {
        self.target = DisplayState::of(&self.state);
        self.display = self.target;
    }

    /// Exponentially smooth the rendered positions toward their last-known
    /// targets. Display-only; the authoritative state is untouched.
    pub fn interpolate_positions(&mut self, dt: f32) {
        let alpha = (self.settings.interpolation_speed * dt).clamp(0.0, 1.0);
        let target = self.target;
        self.display.lerp_toward(&target, alpha);
    }

    /// Project the rendered positions onto a renderer-supplied coordinate
    /// box. The court's Y axis is inverted into Z: on-screen "down" is +Y
    /// while world depth decreases.
    pub fn get_world_coordinates(
        &self,
        min_x: f32,
        max_x: f32,
        min_z: f32,
        max_z: f32,
    ) -> WorldCoordinates {
        let project = |x: f32, y: f32| {
            Vec2::new(min_x + x * (max_x - min_x), max_z - y * (max_z - min_z))
        };
        WorldCoordinates {
            ball: project(self.display.ball.x, self.display.ball.y),
            left_paddle: project(
                self.state.left_paddle.x,
                self.display.left_y + self.state.left_paddle.height / 2.0,
            ),
            right_paddle: project(
                self.state.right_paddle.x,
                self.display.right_y + self.state.right_paddle.height / 2.0,
            ),
        }
    }

    /// The live game state. Do not retain across ticks.
    pub fn game_state(&self) -> &GameState {
        &self.state
    }

    pub fn game_state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn physics_config(&self) -> &PhysicsConfig {
        &self.physics
    }

    pub fn apply_physics_overrides(&mut self, overrides: &PhysicsOverrides) {
        self.physics.apply(overrides);
    }

    /// Overwrite both scores, used to sync authoritative values from outside.
    pub fn set_scores(&mut self, left: u32, right: u32) {
        self.state.score = Score { left, right };
    }

    pub fn set_player_names(&mut self, names: PlayerNames) {
        self.state.player_names = names.clone();
        self.settings.player_names = names;
    }

    /// Rebuild the state from scratch: fresh serve, zero score, re-seeded
    /// interpolation targets, cleared snapshot mailbox.
    pub fn reset(&mut self) {
        self.state = physics::init_game_state(
            &self.physics,
            self.settings.max_score,
            self.settings.player_names.clone(),
            &mut self.rng,
        );
        self.state.paused = self.mode != GameMode::Online;
        self.side_by_id.clear();
        if let Some(net) = find_network(&mut self.left, &mut self.right) {
            net.clear_snapshot();
        }
        self.sync_display();
    }

    /// Switch modes: tear down the current controllers, merge settings,
    /// rebuild the state and wire controllers for the new mode. Never leaves
    /// stale key sets or resend timers behind.
    pub fn change_mode(&mut self, mode: GameMode, patch: SettingsPatch) {
        self.destroy_controllers();
        self.settings.merge(patch);
        self.mode = mode;
        self.reset();
        self.init_controllers();
        log::debug!("game mode changed to {mode:?}");
    }

    pub fn pause_game(&mut self) {
        self.state.paused = true;
    }

    pub fn resume_game(&mut self) {
        self.state.paused = false;
    }

    /// Force-start the ball and unpause.
    pub fn activate_ball(&mut self) {
        self.state.ball.active = true;
        self.state.paused = false;
    }

    pub fn enable_offline_input(&mut self) {
        self.set_offline_input_enabled(true);
    }

    pub fn disable_offline_input(&mut self) {
        self.set_offline_input_enabled(false);
    }

    fn set_offline_input_enabled(&mut self, enabled: bool) {
        for slot in [&mut self.left, &mut self.right] {
            if let Some(c) = slot.as_mut() {
                // The network proxy has no offline input to toggle
                if !matches!(c, PlayerController::Network(_)) {
                    c.set_enabled(enabled);
                }
            }
        }
    }

    /// Forward a key-down event to whichever controllers bind it.
    pub fn key_down(&mut self, key: &str) {
        for slot in [&mut self.left, &mut self.right] {
            if let Some(kb) = slot.as_mut().and_then(PlayerController::as_keyboard_mut) {
                kb.press(key);
            }
        }
    }

    /// Forward a key-up event to whichever controllers bind it.
    pub fn key_up(&mut self, key: &str) {
        for slot in [&mut self.left, &mut self.right] {
            if let Some(kb) = slot.as_mut().and_then(PlayerController::as_keyboard_mut) {
                kb.release(key);
            }
        }
    }

    /// Buffer an authoritative snapshot for the next tick.
    pub fn set_server_state(&mut self, snapshot: ServerSnapshot) {
        match find_network(&mut self.left, &mut self.right) {
            Some(net) => net.set_server_state(snapshot),
            None => log::warn!("server snapshot received with no network controller attached"),
        }
    }

    /// Record the remote player's last reported movement.
    pub fn set_remote_movement(&mut self, dir: Option<MoveDir>) {
        if let Some(net) = find_network(&mut self.left, &mut self.right) {
            net.set_remote_movement(dir);
        }
    }

    /// Tear down all controllers. Idempotent.
    pub fn destroy(&mut self) {
        self.destroy_controllers();
    }
}
