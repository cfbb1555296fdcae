//! Arc-sector vs axis-aligned rectangle intersection.

use std::f32::consts::PI;

use bevy::prelude::*;

use crate::core::math::wrap_angle;

/// A circular wedge: every point within `radius` of `origin` whose bearing
/// is within `half_arc` of `angle`. Bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sector {
    pub origin: Vec2,
    pub angle: f32,
    pub half_arc: f32,
    pub radius: f32,
}

impl Sector {
    pub fn new(origin: Vec2, angle: f32, half_arc: f32, radius: f32) -> Self {
        Self {
            origin,
            angle,
            half_arc,
            radius,
        }
    }

    fn is_full_circle(&self) -> bool {
        self.half_arc >= PI
    }

    fn bearing_in_wedge(&self, offset: Vec2) -> bool {
        if offset == Vec2::ZERO || self.is_full_circle() {
            return true;
        }
        wrap_angle(offset.to_angle() - self.angle).abs() <= self.half_arc
    }

    pub fn contains_point(&self, point: Vec2) -> bool {
        let offset = point - self.origin;
        offset.length_squared() <= self.radius * self.radius && self.bearing_in_wedge(offset)
    }

    pub fn intersects_rect(&self, rect: Rect) -> bool {
        if self.radius.is_nan() || self.radius <= 0.0 || self.half_arc < 0.0 {
            return false;
        }
        if rect.contains(self.origin) {
            return true;
        }

        let closest = self.origin.clamp(rect.min, rect.max);
        if closest.distance_squared(self.origin) > self.radius * self.radius {
            return false;
        }
        if self.is_full_circle() {
            return true;
        }

        let corners = rect_corners(rect);
        if corners.iter().any(|&corner| self.contains_point(corner)) {
            return true;
        }

        for edge_angle in [self.angle - self.half_arc, self.angle + self.half_arc] {
            let end = self.origin + Vec2::from_angle(edge_angle) * self.radius;
            if segment_intersects_rect(self.origin, end, rect) {
                return true;
            }
        }

        // The arc itself may cut an edge with no corner inside.
        (0..4).any(|i| {
            let (a, b) = (corners[i], corners[(i + 1) % 4]);
            circle_segment_points(self.origin, self.radius, a, b)
                .into_iter()
                .flatten()
                .any(|point| self.bearing_in_wedge(point - self.origin))
        })
    }
}

/// Does `rect` intersect the sector at `origin` facing `angle`?
///
/// False for a non-positive radius, true whenever the rectangle contains
/// the origin. A `half_arc` of PI or more degenerates to a circle test.
pub fn rect_intersects_arc(
    rect: Rect,
    origin: Vec2,
    angle: f32,
    half_arc: f32,
    radius: f32,
) -> bool {
    Sector::new(origin, angle, half_arc, radius).intersects_rect(rect)
}

fn rect_corners(rect: Rect) -> [Vec2; 4] {
    [
        rect.min,
        Vec2::new(rect.max.x, rect.min.y),
        rect.max,
        Vec2::new(rect.min.x, rect.max.y),
    ]
}

/// Liang-Barsky clip of the segment `start..end` against `rect`.
fn segment_intersects_rect(start: Vec2, end: Vec2, rect: Rect) -> bool {
    let delta = end - start;
    let mut t_enter = 0.0_f32;
    let mut t_exit = 1.0_f32;

    for (p, q) in [
        (-delta.x, start.x - rect.min.x),
        (delta.x, rect.max.x - start.x),
        (-delta.y, start.y - rect.min.y),
        (delta.y, rect.max.y - start.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return false;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t_exit {
                return false;
            }
            t_enter = t_enter.max(r);
        } else {
            if r < t_enter {
                return false;
            }
            t_exit = t_exit.min(r);
        }
    }
    true
}

/// Points where the segment `a..b` meets the circle outline.
fn circle_segment_points(center: Vec2, radius: f32, a: Vec2, b: Vec2) -> [Option<Vec2>; 2] {
    let d = b - a;
    let f = a - center;
    let qa = d.dot(d);
    let qb = 2.0 * f.dot(d);
    let qc = f.dot(f) - radius * radius;

    let discriminant = qb * qb - 4.0 * qa * qc;
    if qa == 0.0 || discriminant < 0.0 {
        return [None, None];
    }

    let root = discriminant.sqrt();
    [(-qb - root) / (2.0 * qa), (-qb + root) / (2.0 * qa)]
        .map(|t| (0.0..=1.0).contains(&t).then(|| a + d * t))
}
