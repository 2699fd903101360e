//! Line-list batching renderer

use glam::Vec2;

use super::Renderer;
use super::shapes;
use super::vertex::Vertex;
use crate::consts::CIRCLE_SEGMENTS;
use crate::platform::Viewport;

/// Primitive counts for the last frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchCounts {
    pub markers: usize,
    pub circles: usize,
    pub lines: usize,
}

/// Collects a frame into one line-list vertex buffer
#[derive(Debug, Clone)]
pub struct LineBatch {
    vertices: Vec<Vertex>,
    circle_segments: u32,
    counts: BatchCounts,
    viewport: Option<Viewport>,
    frames: u64,
}

impl Default for LineBatch {
    fn default() -> Self {
        Self::new(CIRCLE_SEGMENTS)
    }
}

impl LineBatch {
    pub fn new(circle_segments: u32) -> Self {
        Self {
            vertices: Vec::new(),
            circle_segments,
            counts: BatchCounts::default(),
            viewport: None,
            frames: 0,
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Raw bytes ready for a vertex buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn counts(&self) -> BatchCounts {
        self.counts
    }

    /// Viewport of the current frame
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Completed frames
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for LineBatch {
    fn begin_frame(&mut self, viewport: &Viewport) {
        self.vertices.clear();
        self.counts = BatchCounts::default();
        self.viewport = Some(*viewport);
    }

    fn draw_marker(&mut self, center: Vec2, size: f32, color: [f32; 4]) {
        self.vertices.extend(shapes::marker(center, size, color));
        self.counts.markers += 1;
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]) {
        self.vertices.extend(shapes::circle_outline(
            center,
            radius,
            color,
            self.circle_segments,
        ));
        self.counts.circles += 1;
    }

    fn draw_line(&mut self, a: Vec2, b: Vec2, color: [f32; 4]) {
        self.vertices.extend(shapes::segment(a, b, color));
        self.counts.lines += 1;
    }

    fn end_frame(&mut self) {
        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::render_frame;
    use crate::sim::{Point, PointSet, nearest_k};

    #[test]
    fn test_batch_counts_and_vertices() {
        let points = PointSet::from_points(vec![
            Point::at(0.0, 0.0),
            Point::at(0.2, 0.0),
            Point::at(-0.5, 0.5),
        ]);
        let result = nearest_k(&points, Vec2::new(0.1, 0.0), 2);

        let mut batch = LineBatch::new(36);
        render_frame(&mut batch, &Viewport::new(640, 480), &points, Some(&result), 0.007);

        let counts = batch.counts();
        assert_eq!(
            counts,
            BatchCounts {
                markers: 5,
                circles: 1,
                lines: 2
            }
        );
        assert_eq!(batch.vertices().len(), 5 * 4 + 36 * 2 + 2 * 2);
        assert_eq!(batch.as_bytes().len(), batch.vertices().len() * Vertex::STRIDE);
        assert_eq!(batch.frames(), 1);
    }

    #[test]
    fn test_begin_frame_resets() {
        let points = PointSet::from_points(vec![Point::at(0.0, 0.0)]);
        let mut batch = LineBatch::default();
        let vp = Viewport::new(100, 100);
        render_frame(&mut batch, &vp, &points, None, 0.01);
        render_frame(&mut batch, &vp, &points, None, 0.01);

        assert_eq!(batch.vertices().len(), 4);
        assert_eq!(batch.counts().markers, 1);
        assert_eq!(batch.frames(), 2);
        assert_eq!(batch.viewport(), Some(vp));
    }
}
