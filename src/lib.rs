//! Shuffleboard - a two-player touch Pong
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, match state machine)
//! - `input`: Pointer/touch events to simulation commands
//! - `ui`: Named button regions for hit-testing
//! - `snapshot`: Read-only view of the state for the renderer
//! - `settings`: Screen size and gameplay tuning

pub mod input;
pub mod settings;
pub mod sim;
pub mod snapshot;
pub mod ui;

pub use input::{InputMapper, PointerEvent, PointerId};
pub use settings::{Settings, SettingsError};
pub use snapshot::Snapshot;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default playfield (portrait phone, y axis up)
    pub const SCREEN_WIDTH: f32 = 390.0;
    pub const SCREEN_HEIGHT: f32 = 844.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 15.0;
    /// Serve speed (units per tick)
    pub const BALL_SERVE_SPEED: f32 = 12.0;
    /// Speed floor enforced every tick
    pub const BALL_MIN_SPEED: f32 = 5.0;
    /// Speed ceiling enforced every tick
    pub const BALL_MAX_SPEED: f32 = 10_000.0;

    /// Serve angle range from horizontal (degrees)
    pub const SERVE_MIN_ANGLE_DEG: f32 = 30.0;
    pub const SERVE_MAX_ANGLE_DEG: f32 = 60.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    pub const PADDLE_CORNER_RADIUS: f32 = 5.0;
    /// Gap between the paddle and its screen edge (centre sits at height + gap)
    pub const PADDLE_EDGE_GAP: f32 = 40.0;
    /// Width gained by a paddle each time its owner concedes
    pub const PADDLE_GROWTH: f32 = 30.0;
    /// Widest a paddle may grow, as a fraction of screen width
    pub const PADDLE_MAX_WIDTH_FRACTION: f32 = 0.6;

    /// Horizontal push per unit of normalized hit offset
    pub const PADDLE_ANGLE_INFLUENCE: f32 = 5.0;
    /// Speed boost when ball hits paddle (multiplicative)
    pub const PADDLE_BOOST: f32 = 1.2;
    /// Post-hit speed ceiling
    pub const PADDLE_HIT_MAX_SPEED: f32 = 2000.0;

    /// Obstacle placement
    pub const MAX_OBSTACLES: usize = 5;
    pub const OBSTACLE_MIN_SIZE: f32 = 20.0;
    pub const OBSTACLE_MAX_SIZE: f32 = 40.0;
    pub const OBSTACLE_PADDING: f32 = 10.0;
    pub const OBSTACLE_PLACEMENT_ATTEMPTS: u32 = 20;
    pub const OBSTACLE_BAND_MIN_Y: f32 = 0.3;
    pub const OBSTACLE_BAND_MAX_Y: f32 = 0.7;
    pub const OBSTACLE_BAND_WIDTH: f32 = 0.8;
    pub const OBSTACLE_SIDES: usize = 6;

    /// Winning score choices offered by the menu
    pub const TARGET_SCORE_OPTIONS: [u32; 3] = [3, 5, 10];

    /// Maximum sub-steps per tick to prevent a runaway loop at extreme speed
    pub const MAX_SUBSTEPS: u32 = 512;
}

/// Unit vector at `angle` radians from +x (counter-clockwise)
#[inline]
pub fn direction_from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Acute angle between a vector and the horizontal axis, in degrees [0, 90]
#[inline]
pub fn angle_from_horizontal(v: Vec2) -> f32 {
    v.y.abs().atan2(v.x.abs()).to_degrees()
}
