//! Collision detection and response
//!
//! Walls and obstacles bounce the ball elastically (restitution 1, no
//! friction). Paddles replace the bounce with [`resolve_paddle_hit`], which
//! steers the ball by where it struck and speeds it up.

use glam::Vec2;

use super::geometry::{Body, Shape};
use super::sdf::{check_sdf_collision, sd_circle, sd_polygon, sd_rounded_box};
use super::state::{Paddle, PaddleSide};
use crate::settings::Settings;

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Closest surface point to the ball centre (if hit)
    pub point: Vec2,
    /// Surface normal at collision (pointing toward ball center, for reflection)
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }

    /// True if `vel` moves the ball further into the surface
    pub fn approaching(&self, vel: Vec2) -> bool {
        self.hit && vel.dot(self.normal) < 0.0
    }
}

/// Signed distance from `p` to a body's surface
pub fn body_distance(p: Vec2, body: &Body) -> f32 {
    match &body.shape {
        Shape::Circle { radius } => sd_circle(p, body.position, *radius),
        Shape::Rectangle {
            width,
            height,
            corner_radius,
        } => sd_rounded_box(
            p,
            body.position,
            Vec2::new(width / 2.0, height / 2.0),
            *corner_radius,
        ),
        Shape::Polygon { points } => sd_polygon(p, body.position, points),
    }
}

/// Check collision between a ball and any body
pub fn ball_body_collision(ball_pos: Vec2, ball_radius: f32, body: &Body) -> CollisionResult {
    let sdf = check_sdf_collision(ball_pos, ball_radius, |p| body_distance(p, body));
    if !sdf.hit {
        return CollisionResult::miss();
    }

    // Degenerate gradient (centre exactly on a symmetric ridge): push straight out
    let normal = if sdf.normal == Vec2::ZERO {
        (ball_pos - body.position).normalize_or_zero()
    } else {
        sdf.normal
    };

    CollisionResult {
        hit: true,
        point: ball_pos - normal * sdf.distance,
        normal,
        penetration: sdf.penetration,
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Elastic bounce off a static body; leaves a separating velocity alone
pub fn bounce_off_static(velocity: Vec2, normal: Vec2) -> Vec2 {
    if velocity.dot(normal) < 0.0 {
        reflect_velocity(velocity, normal)
    } else {
        velocity
    }
}

/// Horizontal contact offset from the paddle centre, scaled to [-1, 1]
pub fn hit_offset(contact_x: f32, paddle: &Paddle) -> f32 {
    let half = paddle.width * 0.5;
    if half <= f32::EPSILON {
        return 0.0;
    }
    ((contact_x - paddle.x) / half).clamp(-1.0, 1.0)
}

/// Velocity after the ball strikes a paddle
///
/// The hit offset nudges the horizontal component, the vertical component
/// always points away from the paddle, and speed grows by the paddle boost up
/// to the post-hit ceiling.
pub fn resolve_paddle_hit(vel: Vec2, offset: f32, side: PaddleSide, settings: &Settings) -> Vec2 {
    let speed = vel.length();

    let dx = vel.x + offset * settings.angle_influence;
    // Never zero, so the ball always leaves the paddle
    let dy = side.away_sign() * vel.y.abs().max(f32::MIN_POSITIVE);

    let dir = Vec2::new(dx, dy);
    let len = dir.length();
    let dir = if len > 0.0 && len.is_finite() {
        dir / len
    } else {
        Vec2::new(0.0, side.away_sign())
    };

    let new_speed = (speed * settings.paddle_boost).min(settings.paddle_hit_max_speed);
    dir * new_speed
}
