//! SDF-based collision detection
//!
//! Every ball contact is a circle against a signed distance field: the ball
//! touches a body when the body's SDF at the ball centre drops below the ball
//! radius.

use glam::Vec2;

/// Signed distance to a circle
#[inline]
pub fn sd_circle(p: Vec2, center: Vec2, radius: f32) -> f32 {
    (p - center).length() - radius
}

/// Signed distance to an axis-aligned box with rounded corners
///
/// `half_extents` is the full half size; the corners are rounded inside it.
pub fn sd_rounded_box(p: Vec2, center: Vec2, half_extents: Vec2, corner_radius: f32) -> f32 {
    let r = corner_radius.min(half_extents.x).min(half_extents.y).max(0.0);
    let q = (p - center).abs() - half_extents + Vec2::splat(r);
    q.max(Vec2::ZERO).length() + q.x.max(q.y).min(0.0) - r
}

/// Signed distance to a closed polygon (vertices relative to `center`)
pub fn sd_polygon(p: Vec2, center: Vec2, points: &[Vec2]) -> f32 {
    if points.is_empty() {
        return f32::MAX;
    }
    let p = p - center;
    let mut d = (p - points[0]).length_squared();
    let mut sign = 1.0;

    let n = points.len();
    for i in 0..n {
        let vi = points[i];
        let vj = points[(i + n - 1) % n];
        let e = vj - vi;
        let w = p - vi;

        let len_sq = e.length_squared();
        let t = if len_sq > 0.0 {
            (w.dot(e) / len_sq).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let b = w - e * t;
        d = d.min(b.length_squared());

        // Winding test for inside/outside
        let c1 = p.y >= vi.y;
        let c2 = p.y < vj.y;
        let c3 = e.x * w.y > e.y * w.x;
        if (c1 && c2 && c3) || (!c1 && !c2 && !c3) {
            sign = -sign;
        }
    }

    sign * d.sqrt()
}

/// Compute SDF gradient (surface normal) using central differences
pub fn sdf_gradient<F>(p: Vec2, sdf: F) -> Vec2
where
    F: Fn(Vec2) -> f32,
{
    let eps = 0.5;
    let dx = sdf(p + Vec2::new(eps, 0.0)) - sdf(p - Vec2::new(eps, 0.0));
    let dy = sdf(p + Vec2::new(0.0, eps)) - sdf(p - Vec2::new(0.0, eps));
    Vec2::new(dx, dy).normalize_or_zero()
}

/// Result of SDF collision check
#[derive(Debug, Clone)]
pub struct SdfCollision {
    pub hit: bool,
    pub distance: f32,
    pub normal: Vec2,
    pub penetration: f32,
}

impl SdfCollision {
    pub fn miss() -> Self {
        Self {
            hit: false,
            distance: f32::MAX,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check collision between ball and an SDF shape
pub fn check_sdf_collision<F>(ball_pos: Vec2, ball_radius: f32, sdf: F) -> SdfCollision
where
    F: Fn(Vec2) -> f32,
{
    let dist = sdf(ball_pos);

    if dist < ball_radius {
        let normal = sdf_gradient(ball_pos, &sdf);
        SdfCollision {
            hit: true,
            distance: dist,
            normal,
            penetration: ball_radius - dist,
        }
    } else {
        SdfCollision::miss()
    }
}
