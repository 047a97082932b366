//! Pure 2D geometry helpers
//!
//! Distances, circle overlap, toroidal wrapping, screen projection and the
//! two rejection samplers used by the spawner. No state lives here.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};
use crate::normalize_angle;

/// A position in world coordinates
pub type Point = Vec2;

/// A plain width/height size (world bounds, screen size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Anything with a circular hit box
pub trait Collidable {
    fn coords(&self) -> Point;
    fn hit_box_radius(&self) -> f32;
}

/// Center of a rectangle anchored at the origin
#[inline]
pub fn center_of(rect: Rect) -> Point {
    Vec2::new(rect.width / 2.0, rect.height / 2.0)
}

#[inline]
pub fn distance(a: Point, b: Point) -> f32 {
    a.distance(b)
}

/// Circle overlap test. Touching circles (centers exactly `r1 + r2` apart)
/// do not collide.
pub fn have_collided<A: Collidable + ?Sized, B: Collidable + ?Sized>(a: &A, b: &B) -> bool {
    distance(a.coords(), b.coords()) < a.hit_box_radius() + b.hit_box_radius()
}

/// Wrap a point back into the toroidal world, `[0, width) × [0, height)`
#[inline]
pub fn wrap_into(point: Point, world: Rect) -> Point {
    Vec2::new(wrap_axis(point.x, world.width), wrap_axis(point.y, world.height))
}

#[inline]
fn wrap_axis(value: f32, length: f32) -> f32 {
    let wrapped = value.rem_euclid(length);
    // Tiny negative values round up to `length` in f32
    if wrapped >= length { 0.0 } else { wrapped }
}

/// Uniform random point in `world` at least `min_distance` away from `center`.
///
/// Gives up with [`SimError::PlacementExhausted`] after `attempts` samples.
pub fn random_coords_far_from<R: Rng>(
    center: Point,
    min_distance: f32,
    world: Rect,
    rng: &mut R,
    attempts: u32,
) -> SimResult<Point> {
    for _ in 0..attempts {
        let coords = Vec2::new(
            rng.random::<f32>() * world.width,
            rng.random::<f32>() * world.height,
        );
        if distance(coords, center) >= min_distance {
            return Ok(coords);
        }
    }
    Err(SimError::PlacementExhausted {
        attempts,
        clearance: min_distance,
    })
}

/// Uniform random heading that stays outside a cone of full angle `cone`
/// centred on `direction`.
pub fn not_direction<R: Rng>(
    direction: f32,
    cone: f32,
    rng: &mut R,
    attempts: u32,
) -> SimResult<f32> {
    use std::f32::consts::PI;

    let half_cone = cone / 2.0;
    for _ in 0..attempts {
        let candidate = rng.random_range(-PI..PI);
        if normalize_angle(candidate - direction).abs() > half_cone {
            return Ok(candidate);
        }
    }
    Err(SimError::HeadingExhausted { attempts, cone })
}

/// Shift a coordinate by one world length when it falls outside `[min, max]`
fn try_putting_value_inside_range(value: f32, adjustment: f32, max: f32, min: f32) -> f32 {
    if value < min {
        value + adjustment
    } else if value > max {
        value - adjustment
    } else {
        value
    }
}

#[inline]
fn is_between(value: f32, max: f32, min: f32) -> bool {
    value >= min && value <= max
}

/// Project a world point onto a screen whose center shows `origin`.
///
/// Because the world wraps, a point just off one side of the screen may be
/// visible through the opposite edge; that copy is preferred. Returns `None`
/// when neither copy lands on screen, unless `show_always` is set.
pub fn drawable_coords(
    object: Point,
    origin: Point,
    screen: Rect,
    world: Rect,
    show_always: bool,
) -> Option<Point> {
    let screen_coords = center_of(screen) + (object - origin);
    if show_always {
        return Some(screen_coords);
    }

    let x = try_putting_value_inside_range(screen_coords.x, world.width, screen.width, 0.0);
    let y = try_putting_value_inside_range(screen_coords.y, world.height, screen.height, 0.0);

    if !is_between(x, screen.width, 0.0) || !is_between(y, screen.height, 0.0) {
        return None;
    }
    Some(Vec2::new(x, y))
}
