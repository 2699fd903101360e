//! Platform abstraction layer
//!
//! Handles the pieces that differ between a real window and a test harness:
//! - Time (monotonic clock)
//! - Window geometry and pointer-to-world mapping

use std::cell::Cell;
use std::time::Instant;

use glam::Vec2;

/// Monotonic time source in seconds
pub trait Clock {
    fn now(&self) -> f64;
}

/// Wall clock measured from construction
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Hand-driven clock for deterministic runs
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn set(&self, seconds: f64) {
        self.now.set(seconds);
    }

    pub fn advance(&self, seconds: f64) {
        self.now.set(self.now.get() + seconds);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}

/// Axis-aligned world rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub min: Vec2,
    pub max: Vec2,
}

/// Window size in pixels and the orthographic mapping it implies
///
/// The shorter window axis spans [-1, 1]; the longer one is stretched by the
/// aspect ratio so the unit square is never distorted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    /// Width over height
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Visible world rectangle (the orthographic projection box)
    pub fn world_bounds(&self) -> WorldBounds {
        let aspect = self.aspect_ratio();
        let half = if aspect >= 1.0 {
            Vec2::new(aspect, 1.0)
        } else {
            Vec2::new(1.0, 1.0 / aspect)
        };
        WorldBounds {
            min: -half,
            max: half,
        }
    }

    /// Map window pixel coordinates (origin top-left, y down) to world space
    pub fn screen_to_world(&self, x: f64, y: f64) -> Vec2 {
        let w = self.width as f64;
        let h = self.height as f64;
        let aspect = w / h;

        let (wx, wy) = if aspect > 1.0 {
            (x / w * aspect * 2.0 - aspect, 1.0 - y / h * 2.0)
        } else if aspect < 1.0 {
            (x / w * 2.0 - 1.0, 1.0 / aspect - y / h * 2.0 / aspect)
        } else {
            (x / w * 2.0 - 1.0, 1.0 - y / h * 2.0)
        };
        Vec2::new(wx as f32, wy as f32)
    }
}
