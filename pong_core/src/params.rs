/// Game tuning parameters for the Pong client core.
///
/// The court is the unit square: positions, sizes and speeds are all in that
/// normalized space. Per-second speeds are divided by `NOMINAL_FRAME_RATE`
/// when building the default `PhysicsConfig`, so an `update` tick with
/// `dt = 1.0` advances one nominal 60 Hz frame.
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Timebase
    pub const NOMINAL_FRAME_RATE: f32 = 60.0;
    pub const FRAME_MS: f32 = 1000.0 / Self::NOMINAL_FRAME_RATE;
    pub const MAX_DT_FRAMES: f32 = 6.0; // Clamp to prevent large jumps

    // Ball
    pub const BALL_RADIUS: f32 = 0.015;
    pub const BALL_SPEED_PER_SEC: f32 = 0.48;
    pub const BALL_MAX_SPEED_PER_SEC: f32 = 1.2;
    pub const BALL_ACCELERATION: f32 = 1.05; // Multiply speed on paddle hit

    // Paddle
    pub const PADDLE_HEIGHT: f32 = 0.3;
    pub const PADDLE_SPEED_PER_SEC: f32 = 0.9;

    // Angles
    pub const MAX_BOUNCE_ANGLE_DEG: f32 = 60.0; // Deflection at the paddle edge
    pub const SERVE_ANGLE_DEG: f32 = 60.0; // Serve angle sampled in +/- this

    // Match
    pub const WIN_SCORE: u32 = 5;
    pub const COOLDOWN_MS: f32 = 1000.0; // Goal-to-next-rally delay

    // Network
    pub const RESEND_INTERVAL_MS: f32 = 50.0; // Held-direction resend cadence
}
