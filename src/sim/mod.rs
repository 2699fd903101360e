//! Deterministic simulation module
//!
//! This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order of the point set)
//! - No rendering or platform dependencies beyond the viewport mapping

pub mod knn;
pub mod motion;
pub mod state;
pub mod tick;

pub use knn::{NearestNeighborQuery, QueryResult, distance, nearest_k};
pub use motion::{step, step_all};
pub use state::{Point, PointSet, QueryPointer, RngState, SimulationState};
pub use tick::{InputEvent, apply_event, tick};
