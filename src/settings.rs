//! Game settings and tuning
//!
//! Handed to the simulation by the host. Every field defaults to the value in
//! [`crate::consts`], so a partial JSON document is enough to override a few.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a settings value is rejected
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("screen size must be positive, got {width}x{height}")]
    InvalidScreen { width: f32, height: f32 },
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("minimum ball speed {min} exceeds maximum {max}")]
    SpeedRange { min: f32, max: f32 },
    #[error("obstacle size range {min}..{max} is invalid")]
    ObstacleSize { min: f32, max: f32 },
    #[error("target score options must be non-empty and non-zero")]
    TargetScores,
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Screen geometry and gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Ball ===
    pub ball_radius: f32,
    pub serve_speed: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    /// Frames the ball rests at centre between a point and the next serve
    pub serve_delay_ticks: u32,

    // === Paddles ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_corner_radius: f32,
    pub paddle_edge_gap: f32,
    pub paddle_growth: f32,
    pub paddle_max_width_fraction: f32,
    pub angle_influence: f32,
    pub paddle_boost: f32,
    pub paddle_hit_max_speed: f32,

    // === Obstacles ===
    pub max_obstacles: usize,
    pub obstacle_min_size: f32,
    pub obstacle_max_size: f32,
    pub obstacle_padding: f32,
    pub obstacle_attempts: u32,

    // === Menu ===
    pub target_score_options: Vec<u32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            ball_radius: BALL_RADIUS,
            serve_speed: BALL_SERVE_SPEED,
            min_speed: BALL_MIN_SPEED,
            max_speed: BALL_MAX_SPEED,
            serve_delay_ticks: 0,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_corner_radius: PADDLE_CORNER_RADIUS,
            paddle_edge_gap: PADDLE_EDGE_GAP,
            paddle_growth: PADDLE_GROWTH,
            paddle_max_width_fraction: PADDLE_MAX_WIDTH_FRACTION,
            angle_influence: PADDLE_ANGLE_INFLUENCE,
            paddle_boost: PADDLE_BOOST,
            paddle_hit_max_speed: PADDLE_HIT_MAX_SPEED,

            max_obstacles: MAX_OBSTACLES,
            obstacle_min_size: OBSTACLE_MIN_SIZE,
            obstacle_max_size: OBSTACLE_MAX_SIZE,
            obstacle_padding: OBSTACLE_PADDING,
            obstacle_attempts: OBSTACLE_PLACEMENT_ATTEMPTS,

            target_score_options: TARGET_SCORE_OPTIONS.to_vec(),
        }
    }
}

impl Settings {
    /// Default tuning on a custom screen
    pub fn with_screen(width: f32, height: f32) -> Self {
        Self {
            screen_width: width,
            screen_height: height,
            ..Self::default()
        }
    }

    /// Parse and validate settings from JSON (missing fields use defaults)
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.screen_width > 0.0 && self.screen_height > 0.0) {
            return Err(SettingsError::InvalidScreen {
                width: self.screen_width,
                height: self.screen_height,
            });
        }

        let positive = [
            ("ball_radius", self.ball_radius),
            ("serve_speed", self.serve_speed),
            ("min_speed", self.min_speed),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("paddle_max_width_fraction", self.paddle_max_width_fraction),
            ("paddle_boost", self.paddle_boost),
            ("paddle_hit_max_speed", self.paddle_hit_max_speed),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(SettingsError::NonPositive { name, value });
            }
        }

        if self.min_speed > self.max_speed {
            return Err(SettingsError::SpeedRange {
                min: self.min_speed,
                max: self.max_speed,
            });
        }

        if !(self.obstacle_min_size > 0.0 && self.obstacle_min_size <= self.obstacle_max_size) {
            return Err(SettingsError::ObstacleSize {
                min: self.obstacle_min_size,
                max: self.obstacle_max_size,
            });
        }

        if self.target_score_options.is_empty() || self.target_score_options.contains(&0) {
            return Err(SettingsError::TargetScores);
        }

        Ok(())
    }

    /// Widest a paddle may grow on this screen
    pub fn max_paddle_width(&self) -> f32 {
        self.screen_width * self.paddle_max_width_fraction
    }

    /// Y coordinate of the bottom paddle centre
    pub fn bottom_paddle_y(&self) -> f32 {
        self.paddle_height + self.paddle_edge_gap
    }

    /// Y coordinate of the top paddle centre
    pub fn top_paddle_y(&self) -> f32 {
        self.screen_height - self.paddle_height - self.paddle_edge_gap
    }

    /// Centre of the screen
    pub fn center(&self) -> glam::Vec2 {
        glam::Vec2::new(self.screen_width / 2.0, self.screen_height / 2.0)
    }
}
