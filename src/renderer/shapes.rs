//! Shape generation for 2D line-list primitives
//!
//! Every function returns vertex pairs: each consecutive two vertices form
//! one line segment.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;
use crate::polar_offset;

/// Generate vertices for a line segment
pub fn segment(a: Vec2, b: Vec2, color: [f32; 4]) -> [Vertex; 2] {
    [Vertex::new(a.x, a.y, color), Vertex::new(b.x, b.y, color)]
}

/// Generate vertices for a cross-shaped point marker
pub fn marker(center: Vec2, size: f32, color: [f32; 4]) -> [Vertex; 4] {
    let [h0, h1] = segment(
        center - Vec2::new(size, 0.0),
        center + Vec2::new(size, 0.0),
        color,
    );
    let [v0, v1] = segment(
        center - Vec2::new(0.0, size),
        center + Vec2::new(0.0, size),
        color,
    );
    [h0, h1, v0, v1]
}

/// Generate vertices for a circle outline (closed loop of `segments` edges)
pub fn circle_outline(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity((segments * 2) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;

        vertices.extend(segment(
            polar_offset(center, radius, theta1),
            polar_offset(center, radius, theta2),
            color,
        ));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_arms() {
        let v = marker(Vec2::new(0.5, -0.5), 0.1, [1.0; 4]);
        let expected: [[f32; 2]; 4] = [[0.4, -0.5], [0.6, -0.5], [0.5, -0.6], [0.5, -0.4]];
        for (vertex, want) in v.iter().zip(expected) {
            assert!((Vec2::from(vertex.position) - Vec2::from(want)).length() < 1e-6);
        }
    }

    #[test]
    fn test_circle_outline_closed_and_on_radius() {
        let center = Vec2::new(0.2, 0.3);
        let v = circle_outline(center, 0.5, [1.0; 4], 720);
        assert_eq!(v.len(), 1440);

        for vertex in &v {
            let p = Vec2::from(vertex.position);
            assert!(((p - center).length() - 0.5).abs() < 1e-5);
        }
        // Last edge ends where the first began
        let first = Vec2::from(v[0].position);
        let last = Vec2::from(v[v.len() - 1].position);
        assert!((first - last).length() < 1e-5);
    }

    #[test]
    fn test_circle_outline_min_segments() {
        assert_eq!(circle_outline(Vec2::ZERO, 1.0, [1.0; 4], 1).len(), 6);
    }
}
