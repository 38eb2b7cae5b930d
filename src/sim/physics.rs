//! Per-frame ball integration
//!
//! One call per rendered frame: move the ball by its velocity (sub-stepped so
//! it cannot tunnel through a paddle or wall), resolve contacts, then clamp
//! the speed.

use glam::Vec2;

use super::collision::{
    CollisionResult, ball_body_collision, bounce_off_static, hit_offset, resolve_paddle_hit,
};
use super::geometry::{Body, BodyKind};
use super::state::{Ball, Paddle, PaddleSide};
use crate::consts::MAX_SUBSTEPS;
use crate::settings::Settings;

/// Something the ball touched during a step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    Paddle { side: PaddleSide, speed: f32 },
    Wall,
    Obstacle { id: u32 },
}

/// Rescale `vel` into `[min, max]` preserving direction
///
/// A zero vector has no direction; it is sent straight down.
pub fn clamp_speed(vel: Vec2, min: f32, max: f32) -> Vec2 {
    let speed = vel.length();
    if !speed.is_finite() {
        return Vec2::NEG_Y * max;
    }
    if speed < min {
        if speed > 0.0 {
            vel * (min / speed)
        } else {
            Vec2::NEG_Y * min
        }
    } else if speed > max {
        vel * (max / speed)
    } else {
        vel
    }
}

/// Number of sub-steps so no single move exceeds half the ball radius
fn substep_count(speed: f32, radius: f32) -> u32 {
    let max_move = (radius * 0.5).max(0.5);
    ((speed / max_move).ceil() as u32).clamp(1, MAX_SUBSTEPS)
}

/// Resolve one sub-step of ball-vs-paddle contact
///
/// The boost applies only when a contact begins. While the ball stays in
/// contact it is pushed out and slides along the surface at unchanged speed.
fn touch_paddle(
    ball: &mut Ball,
    hit: &CollisionResult,
    paddle: &Paddle,
    settings: &Settings,
) -> Option<Contact> {
    if !hit.hit {
        if ball.touching == Some(paddle.side) {
            ball.touching = None;
        }
        return None;
    }
    if !hit.approaching(ball.vel) {
        return None;
    }

    ball.pos += hit.normal * hit.penetration;

    if ball.touching == Some(paddle.side) {
        let speed = ball.vel.length();
        let slide = ball.vel - hit.normal * ball.vel.dot(hit.normal);
        let dir = slide.try_normalize().unwrap_or(Vec2::new(0.0, paddle.side.away_sign()));
        ball.vel = dir * speed;
        return None;
    }

    let offset = hit_offset(hit.point.x, paddle);
    ball.vel = resolve_paddle_hit(ball.vel, offset, paddle.side, settings);
    ball.touching = Some(paddle.side);
    Some(Contact::Paddle {
        side: paddle.side,
        speed: ball.vel.length(),
    })
}

/// Advance the ball one tick against the given static bodies
///
/// `bodies` should come from [`super::geometry::static_bodies`]; paddle
/// bodies are matched back to `paddles` by position to compute the hit
/// offset. Returns every contact in the order it happened.
pub fn step_ball(
    ball: &mut Ball,
    bodies: &[Body],
    paddles: &[Paddle; 2],
    settings: &Settings,
) -> Vec<Contact> {
    let mut contacts = Vec::new();
    if !ball.dynamic {
        return contacts;
    }

    let ball_body = Body::ball(ball);
    let steps = substep_count(ball.vel.length(), ball.radius);

    for _ in 0..steps {
        // Velocity may change mid-tick, so each sub-step covers its share of the current one
        ball.pos += ball.vel / steps as f32;

        for body in bodies {
            if !ball_body.collides_with(body) {
                continue;
            }
            let hit = ball_body_collision(ball.pos, ball.radius, body);

            if body.kind == BodyKind::Paddle {
                let Some(paddle) = paddles.iter().find(|p| p.center() == body.position) else {
                    continue;
                };
                if let Some(contact) = touch_paddle(ball, &hit, paddle, settings) {
                    contacts.push(contact);
                }
                continue;
            }

            if !hit.approaching(ball.vel) {
                continue;
            }

            // Push out of penetration along the normal
            ball.pos += hit.normal * hit.penetration;
            ball.vel = bounce_off_static(ball.vel, hit.normal);

            match body.kind {
                BodyKind::Obstacle => contacts.push(Contact::Obstacle {
                    id: body.id.unwrap_or_default(),
                }),
                _ => contacts.push(Contact::Wall),
            }
        }
    }

    ball.vel = clamp_speed(ball.vel, settings.min_speed, settings.max_speed);
    contacts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::{hexagon, side_walls};
    use crate::sim::state::Obstacle;

    fn setup() -> (Settings, [Paddle; 2], Ball) {
        let s = Settings::default();
        let paddles = [
            Paddle::new(PaddleSide::Bottom, &s),
            Paddle::new(PaddleSide::Top, &s),
        ];
        let mut ball = Ball::new(s.center(), s.ball_radius);
        ball.dynamic = true;
        (s, paddles, ball)
    }

    fn bodies(s: &Settings, paddles: &[Paddle; 2], obstacles: &[Obstacle]) -> Vec<Body> {
        let mut out: Vec<Body> = side_walls(s).into_iter().collect();
        out.extend(obstacles.iter().map(Body::obstacle));
        out.extend(paddles.iter().map(Body::paddle));
        out
    }

    #[test]
    fn test_clamp_speed() {
        let v = clamp_speed(Vec2::new(3.0, 0.0), 5.0, 100.0);
        assert!((v - Vec2::new(5.0, 0.0)).length() < 0.001);

        let v = clamp_speed(Vec2::new(0.0, 300.0), 5.0, 100.0);
        assert!((v - Vec2::new(0.0, 100.0)).length() < 0.001);

        let v = clamp_speed(Vec2::new(6.0, 8.0), 5.0, 100.0);
        assert_eq!(v, Vec2::new(6.0, 8.0));

        // Zero velocity defaults to straight down
        let v = clamp_speed(Vec2::ZERO, 5.0, 100.0);
        assert_eq!(v, Vec2::new(0.0, -5.0));
    }

    #[test]
    fn test_frozen_ball_does_not_move() {
        let (s, paddles, mut ball) = setup();
        ball.dynamic = false;
        ball.vel = Vec2::new(5.0, 5.0);
        let before = ball.pos;
        let contacts = step_ball(&mut ball, &bodies(&s, &paddles, &[]), &paddles, &s);
        assert!(contacts.is_empty());
        assert_eq!(ball.pos, before);
    }

    #[test]
    fn test_free_flight() {
        let (s, paddles, mut ball) = setup();
        ball.vel = Vec2::new(6.0, 8.0);
        let start = ball.pos;
        let contacts = step_ball(&mut ball, &bodies(&s, &paddles, &[]), &paddles, &s);
        assert!(contacts.is_empty());
        assert!((ball.pos - (start + Vec2::new(6.0, 8.0))).length() < 0.001);
    }

    #[test]
    fn test_side_wall_bounce() {
        let (s, paddles, mut ball) = setup();
        ball.pos = Vec2::new(s.screen_width - 16.0, 400.0);
        ball.vel = Vec2::new(8.0, 6.0);
        let contacts = step_ball(&mut ball, &bodies(&s, &paddles, &[]), &paddles, &s);
        assert_eq!(contacts, vec![Contact::Wall]);
        assert!(ball.vel.x < 0.0);
        assert!((ball.vel.length() - 10.0).abs() < 0.001);
        assert!(ball.pos.x + ball.radius <= s.screen_width + 0.01);
    }

    #[test]
    fn test_bottom_paddle_hit() {
        let (s, paddles, mut ball) = setup();
        let paddle = &paddles[0];
        ball.pos = Vec2::new(paddle.x, paddle.y + paddle.height / 2.0 + ball.radius + 4.0);
        ball.vel = Vec2::new(0.0, -12.0);
        let contacts = step_ball(&mut ball, &bodies(&s, &paddles, &[]), &paddles, &s);
        assert_eq!(contacts.len(), 1);
        assert!(matches!(contacts[0], Contact::Paddle { side: PaddleSide::Bottom, .. }));
        assert!(ball.vel.y > 0.0);
        assert!((ball.vel.length() - 14.4).abs() < 0.01);
    }

    #[test]
    fn test_end_face_hit_boosts_once() {
        let (s, paddles, mut ball) = setup();
        // Overlapping the bottom paddle's right end, drifting into it
        ball.pos = Vec2::new(259.0, 50.0);
        ball.vel = Vec2::new(-12.0, -4.0);
        let expected = ball.speed() * 1.2;
        let bodies = bodies(&s, &paddles, &[]);

        let mut paddle_hits = 0;
        for _ in 0..4 {
            let contacts = step_ball(&mut ball, &bodies, &paddles, &s);
            paddle_hits += contacts
                .iter()
                .filter(|c| matches!(c, Contact::Paddle { .. }))
                .count();
        }

        assert_eq!(paddle_hits, 1);
        assert!((ball.speed() - expected).abs() < 0.01, "speed {}", ball.speed());
        assert!(ball.vel.y > 0.0);
        assert_eq!(ball.touching, None);
    }

    #[test]
    fn test_new_contact_after_leaving_boosts_again() {
        let (s, paddles, mut ball) = setup();
        let paddle = &paddles[0];
        let bodies = bodies(&s, &paddles, &[]);

        for expected in [14.4, 17.28] {
            ball.pos = Vec2::new(paddle.x, paddle.y + paddle.height / 2.0 + ball.radius + 4.0);
            ball.vel = Vec2::new(0.0, -ball.speed().max(12.0));
            let contacts = step_ball(&mut ball, &bodies, &paddles, &s);
            assert_eq!(contacts.len(), 1);
            assert!((ball.speed() - expected).abs() < 0.01);

            // Fly clear so the contact ends
            ball.pos.y = 400.0;
            step_ball(&mut ball, &bodies, &paddles, &s);
            assert_eq!(ball.touching, None);
        }
    }

    #[test]
    fn test_fast_ball_does_not_tunnel_through_paddle() {
        let (s, paddles, mut ball) = setup();
        let paddle = &paddles[1];
        ball.pos = Vec2::new(paddle.x, paddle.y - 300.0);
        ball.vel = Vec2::new(0.0, 600.0);
        let contacts = step_ball(&mut ball, &bodies(&s, &paddles, &[]), &paddles, &s);
        assert!(matches!(contacts[0], Contact::Paddle { side: PaddleSide::Top, .. }));
        assert!(ball.vel.y < 0.0);
        assert!(ball.pos.y < paddle.y);
    }

    #[test]
    fn test_obstacle_bounce() {
        let (s, paddles, mut ball) = setup();
        let obstacle = Obstacle {
            id: 9,
            center: Vec2::new(195.0, 400.0),
            radius: 20.0,
            points: hexagon(20.0),
        };
        ball.pos = Vec2::new(195.0, 440.0);
        ball.vel = Vec2::new(0.0, -10.0);
        let contacts = step_ball(&mut ball, &bodies(&s, &paddles, &[obstacle]), &paddles, &s);
        assert_eq!(contacts, vec![Contact::Obstacle { id: 9 }]);
        assert!(ball.vel.y > 0.0);
        assert!((ball.vel.length() - 10.0).abs() < 0.01);
    }

    #[test]
    fn test_speed_floor_applied_after_move() {
        let (s, paddles, mut ball) = setup();
        ball.vel = Vec2::new(1.0, 0.0);
        step_ball(&mut ball, &bodies(&s, &paddles, &[]), &paddles, &s);
        assert!((ball.vel.length() - s.min_speed).abs() < 0.001);
    }
}
