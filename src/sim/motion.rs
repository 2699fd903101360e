//! Elastic-bounce motion integrator
//!
//! Velocity is reflected after the move, so a point may sit up to one step
//! outside [-1, 1] before it turns around. Positions are never clamped.

use super::state::{Point, PointSet};
use crate::consts::WORLD_EXTENT;
use crate::within_extent;

/// Advance one point by one tick
#[inline]
pub fn step(point: &mut Point) {
    point.pos += point.vel;

    if !within_extent(point.pos.x, WORLD_EXTENT) {
        point.vel.x = -point.vel.x;
    }
    if !within_extent(point.pos.y, WORLD_EXTENT) {
        point.vel.y = -point.vel.y;
    }
}

/// Advance every point once, in set order
pub fn step_all(points: &mut PointSet) {
    for point in points.as_mut_slice() {
        step(point);
    }
}
