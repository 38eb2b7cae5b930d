//! World geometry: collidable bodies and obstacle placement
//!
//! Bodies are not stored. They are derived from the current [`GameState`]
//! whenever physics or rendering asks for them, so a paddle that just grew is
//! immediately collided against at its new width.

use std::ops::BitOr;

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use super::state::{Ball, GameState, Obstacle, Paddle};
use crate::consts::OBSTACLE_SIDES;
use crate::direction_from_angle;
use crate::settings::Settings;

/// Bitset classifying a body for contact filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Category(u32);

impl Category {
    pub const BALL: Category = Category(1 << 0);
    pub const WALL: Category = Category(1 << 1);
    pub const PADDLE: Category = Category(1 << 2);

    /// True if any bit of `other` is set in `self`
    pub fn intersects(self, other: Category) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for Category {
    type Output = Category;

    fn bitor(self, rhs: Self) -> Self::Output {
        Category(self.0 | rhs.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BodyKind {
    Ball,
    Paddle,
    Wall,
    Obstacle,
}

/// Collision shape, positioned by the owning [`Body`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Shape {
    Circle {
        radius: f32,
    },
    Rectangle {
        width: f32,
        height: f32,
        corner_radius: f32,
    },
    /// Vertices relative to the body position
    Polygon { points: Vec<Vec2> },
}

/// A collidable body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Body {
    pub kind: BodyKind,
    pub shape: Shape,
    pub position: Vec2,
    pub category: Category,
    /// Categories this body collides with
    pub collision_mask: Category,
    /// Only the ball is dynamic
    pub dynamic: bool,
    /// Ball only
    pub velocity: Option<Vec2>,
    /// Obstacle id, if this body is one
    pub id: Option<u32>,
}

impl Body {
    pub fn ball(ball: &Ball) -> Self {
        Self {
            kind: BodyKind::Ball,
            shape: Shape::Circle {
                radius: ball.radius,
            },
            position: ball.pos,
            category: Category::BALL,
            collision_mask: Category::WALL | Category::PADDLE,
            dynamic: ball.dynamic,
            velocity: Some(ball.vel),
            id: None,
        }
    }

    pub fn paddle(paddle: &Paddle) -> Self {
        Self {
            kind: BodyKind::Paddle,
            shape: Shape::Rectangle {
                width: paddle.width,
                height: paddle.height,
                corner_radius: paddle.corner_radius,
            },
            position: paddle.center(),
            category: Category::PADDLE,
            collision_mask: Category::BALL,
            dynamic: false,
            velocity: None,
            id: None,
        }
    }

    pub fn obstacle(obstacle: &Obstacle) -> Self {
        Self {
            kind: BodyKind::Obstacle,
            shape: Shape::Polygon {
                points: obstacle.points.clone(),
            },
            position: obstacle.center,
            category: Category::WALL,
            collision_mask: Category::BALL,
            dynamic: false,
            velocity: None,
            id: Some(obstacle.id),
        }
    }

    /// Zero-thickness vertical edge spanning the screen height at `x`
    pub fn side_wall(x: f32, screen_height: f32) -> Self {
        Self {
            kind: BodyKind::Wall,
            shape: Shape::Rectangle {
                width: 0.0,
                height: screen_height,
                corner_radius: 0.0,
            },
            position: Vec2::new(x, screen_height / 2.0),
            category: Category::WALL,
            collision_mask: Category::BALL,
            dynamic: false,
            velocity: None,
            id: None,
        }
    }

    /// Whether contacts between these two bodies are resolved
    pub fn collides_with(&self, other: &Body) -> bool {
        self.collision_mask.intersects(other.category)
            && other.collision_mask.intersects(self.category)
    }
}

/// Left and right screen edges. Top and bottom stay open for scoring.
pub fn side_walls(settings: &Settings) -> [Body; 2] {
    [
        Body::side_wall(0.0, settings.screen_height),
        Body::side_wall(settings.screen_width, settings.screen_height),
    ]
}

/// Every static body the ball can touch: walls, obstacles, then paddles
pub fn static_bodies(state: &GameState) -> Vec<Body> {
    let mut bodies: Vec<Body> = side_walls(&state.settings).into_iter().collect();
    bodies.extend(state.obstacles.iter().map(Body::obstacle));
    bodies.extend(state.paddles.iter().map(Body::paddle));
    bodies
}

/// Regular polygon with its first vertex on +x
pub fn regular_polygon(sides: usize, radius: f32) -> Vec<Vec2> {
    let step = std::f32::consts::TAU / sides as f32;
    (0..sides)
        .map(|i| direction_from_angle(i as f32 * step) * radius)
        .collect()
}

pub fn hexagon(radius: f32) -> Vec<Vec2> {
    regular_polygon(OBSTACLE_SIDES, radius)
}

/// Region of the playfield obstacle centres may be drawn from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleBand {
    pub min: Vec2,
    pub max: Vec2,
}

impl ObstacleBand {
    /// Middle 40% of the height, central 80% of the width
    pub fn for_screen(settings: &Settings) -> Self {
        use crate::consts::{OBSTACLE_BAND_MAX_Y, OBSTACLE_BAND_MIN_Y, OBSTACLE_BAND_WIDTH};

        let width = settings.screen_width * OBSTACLE_BAND_WIDTH;
        let min_x = (settings.screen_width - width) / 2.0;
        Self {
            min: Vec2::new(min_x, settings.screen_height * OBSTACLE_BAND_MIN_Y),
            max: Vec2::new(min_x + width, settings.screen_height * OBSTACLE_BAND_MAX_Y),
        }
    }

    /// Uniform centre for an obstacle of `radius` fully inside the band
    fn sample<R: Rng>(&self, rng: &mut R, radius: f32) -> Vec2 {
        Vec2::new(
            sample_axis(rng, self.min.x + radius, self.max.x - radius),
            sample_axis(rng, self.min.y + radius, self.max.y - radius),
        )
    }
}

fn sample_axis<R: Rng>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.random_range(lo..=hi)
    } else {
        (lo + hi) / 2.0
    }
}

/// True if a new obstacle at `center` keeps its distance from all others
pub fn is_clear(center: Vec2, radius: f32, existing: &[Obstacle], padding: f32) -> bool {
    existing
        .iter()
        .all(|o| center.distance(o.center) >= radius + o.radius + padding)
}

/// Try to place one more obstacle by rejection sampling
///
/// Returns `None` when the set is already full or every attempt landed too
/// close to an existing obstacle.
pub fn place_obstacle<R: Rng>(
    rng: &mut R,
    existing: &[Obstacle],
    settings: &Settings,
    id: u32,
) -> Option<Obstacle> {
    if existing.len() >= settings.max_obstacles {
        return None;
    }

    let size = sample_axis(rng, settings.obstacle_min_size, settings.obstacle_max_size);
    let radius = size / 2.0;
    let band = ObstacleBand::for_screen(settings);

    for _ in 0..settings.obstacle_attempts {
        let center = band.sample(rng, radius);
        if is_clear(center, radius, existing, settings.obstacle_padding) {
            return Some(Obstacle {
                id,
                center,
                radius,
                points: hexagon(radius),
            });
        }
    }

    log::debug!(
        "No room for obstacle (r={:.1}) after {} attempts",
        radius,
        settings.obstacle_attempts
    );
    None
}
