//! knn-cloud - An animated 2D point cloud with interactive k-NN queries
//!
//! Core modules:
//! - `sim`: Deterministic simulation (point set, bounce integrator, k-NN query)
//! - `renderer`: Renderer collaborator trait and line-list geometry
//! - `platform`: Clock and viewport abstractions
//! - `app`: Fixed-timestep simulate-and-render loop
//! - `settings`: JSON configuration

pub mod app;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use app::{App, FrameStats, InputSource};
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Default configuration constants
pub mod consts {
    /// Number of simulated points
    pub const NUM_POINTS: usize = 1000;
    /// Physics rate (ticks per second)
    pub const TICK_HZ: f64 = 50.0;
    /// Maximum ticks run in a single frame before the schedule is resynced
    pub const MAX_SUBSTEPS: u32 = 1;

    /// Initial neighbor count
    pub const INITIAL_K: usize = 2;

    /// Half-extent of the spawn square (positions in [-1, 1])
    pub const WORLD_EXTENT: f32 = 1.0;
    /// Maximum absolute velocity per axis, in world units per tick
    pub const MAX_SPEED: f32 = 0.005;

    /// Half-length of a point marker's arms
    pub const POINT_SIZE: f32 = 0.007;
    /// Closed-loop segments for the enclosing circle (half-degree steps)
    pub const CIRCLE_SEGMENTS: u32 = 720;

    /// Initial window size in pixels
    pub const WINDOW_WIDTH: u32 = 1280;
    pub const WINDOW_HEIGHT: u32 = 720;

    /// Default RNG seed
    pub const DEFAULT_SEED: u64 = 0x5EED_C10D;
}

/// Point on a circle of `radius` around `center` at angle `theta`
#[inline]
pub fn polar_offset(center: Vec2, radius: f32, theta: f32) -> Vec2 {
    center + Vec2::new(radius * theta.cos(), radius * theta.sin())
}

/// True if `value` lies in `[-extent, extent]`
#[inline]
pub fn within_extent(value: f32, extent: f32) -> bool {
    (-extent..=extent).contains(&value)
}
