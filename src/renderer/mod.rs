//! Rendering module
//!
//! The window and GPU live outside this crate. Each frame is described to a
//! `Renderer` as markers, circles and line segments; `LineBatch` turns those
//! into an uploadable line-list vertex buffer.

pub mod batch;
pub mod shapes;
pub mod vertex;

pub use batch::LineBatch;
pub use vertex::{Vertex, colors};

use glam::Vec2;

use crate::platform::Viewport;
use crate::sim::{PointSet, QueryResult};

/// Drawing collaborator, called once per frame
pub trait Renderer {
    /// Start a new frame; the default does nothing
    fn begin_frame(&mut self, _viewport: &Viewport) {}

    /// Cross-shaped marker with arms of half-length `size`
    fn draw_marker(&mut self, center: Vec2, size: f32, color: [f32; 4]);

    /// Circle outline
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]);

    fn draw_line(&mut self, a: Vec2, b: Vec2, color: [f32; 4]);

    /// Finish (present) the frame; the default does nothing
    fn end_frame(&mut self) {}
}

/// Draw one frame: the whole cloud, then the query overlay if any
///
/// Order: all points, neighbor highlights, enclosing circle, links from the
/// query location to each neighbor.
pub fn render_frame<R: Renderer + ?Sized>(
    renderer: &mut R,
    viewport: &Viewport,
    points: &PointSet,
    query: Option<&QueryResult>,
    point_size: f32,
) {
    renderer.begin_frame(viewport);

    for point in points {
        renderer.draw_marker(point.pos, point_size, colors::POINT);
    }

    if let Some(result) = query {
        for neighbor in &result.points {
            renderer.draw_marker(neighbor.pos, point_size, colors::NEIGHBOR);
        }

        renderer.draw_circle(result.location, result.max_dist, colors::CIRCLE);

        for neighbor in &result.points {
            renderer.draw_line(result.location, neighbor.pos, colors::LINK);
        }
    }

    renderer.end_frame();
}
