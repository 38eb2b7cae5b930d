//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed update per frame
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod physics;
pub mod sdf;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, ball_body_collision, hit_offset, resolve_paddle_hit};
pub use geometry::{Body, BodyKind, Category, ObstacleBand, Shape, place_obstacle, static_bodies};
pub use physics::{Contact, clamp_speed, step_ball};
pub use state::{
    Ball, GameEvent, GamePhase, GameState, MatchError, MatchState, Obstacle, Paddle, PaddleSide,
    Player, TargetScore,
};
pub use tick::{Command, TickInput, serve, start_match, tick};
