//! Simulation state and core types
//!
//! Everything the loop mutates lives in `SimulationState`; there are no globals.

use std::ops::Index;

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::platform::Viewport;
use crate::settings::Settings;

/// A simulated particle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
}

impl Point {
    pub const fn new(pos: Vec2, vel: Vec2) -> Self {
        Self { pos, vel }
    }

    /// A point that never moves
    pub const fn at(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
        }
    }
}

/// Fixed-cardinality, insertion-ordered collection of points
///
/// Iteration order is the tie-break order used by the neighbor query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSet {
    points: Vec<Point>,
}

impl PointSet {
    /// Build a set from explicit points (order preserved)
    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Create `n` random points
    pub fn generated<R: Rng>(n: usize, rng: &mut R) -> Self {
        let mut set = Self::default();
        set.generate(n, rng);
        set
    }

    /// Replace the contents with `n` points: position uniform in [-1, 1]^2,
    /// velocity uniform in [-0.005, 0.005]^2
    pub fn generate<R: Rng>(&mut self, n: usize, rng: &mut R) {
        self.points.clear();
        self.points.reserve_exact(n);
        for _ in 0..n {
            let pos = Vec2::new(
                rng.random_range(-WORLD_EXTENT..=WORLD_EXTENT),
                rng.random_range(-WORLD_EXTENT..=WORLD_EXTENT),
            );
            let vel = Vec2::new(
                rng.random_range(-MAX_SPEED..=MAX_SPEED),
                rng.random_range(-MAX_SPEED..=MAX_SPEED),
            );
            self.points.push(Point::new(pos, vel));
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    pub fn as_slice(&self) -> &[Point] {
        &self.points
    }

    /// Mutable view for the integrator; the length cannot change through it
    pub fn as_mut_slice(&mut self) -> &mut [Point] {
        &mut self.points
    }
}

impl Index<usize> for PointSet {
    type Output = Point;

    fn index(&self, index: usize) -> &Point {
        &self.points[index]
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Seed and stream of the generator behind the current cloud
#[derive(Debug, Clone)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::new(self.seed, self.stream)
    }

    /// Move to the next stream so a regenerated cloud differs from the last
    pub fn advance(&mut self) {
        self.stream = self.stream.wrapping_add(1);
    }
}

/// Query pointer state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct QueryPointer {
    /// Active query location; `None` means no query is drawn
    pub location: Option<Vec2>,
    /// Pointer button held: motion events move the query location
    pub tracking: bool,
}

/// Complete simulation state, owned by the loop
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// RNG state used to (re)generate the cloud
    pub rng_state: RngState,
    /// The simulated points
    pub points: PointSet,
    /// Requested neighbor count (never below 1)
    k: usize,
    /// Query location and pointer tracking
    pub query: QueryPointer,
    /// Window geometry used to map pointer pixels to world coordinates
    pub viewport: Viewport,
    /// Physics tick counter
    pub time_ticks: u64,
    /// Set once a close request has been seen
    pub close_requested: bool,
}

impl SimulationState {
    /// Create a new state from settings (seeded, deterministic)
    pub fn new(settings: &Settings) -> Self {
        let rng_state = RngState::new(settings.seed);
        let points = PointSet::generated(settings.num_points, &mut rng_state.to_rng());

        Self {
            rng_state,
            points,
            k: settings.initial_k.max(1),
            query: QueryPointer::default(),
            viewport: Viewport::new(settings.window_width, settings.window_height),
            time_ticks: 0,
            close_requested: false,
        }
    }

    /// Wrap an existing point set with default parameters
    pub fn with_points(points: PointSet) -> Self {
        Self {
            rng_state: RngState::new(DEFAULT_SEED),
            points,
            k: INITIAL_K,
            query: QueryPointer::default(),
            viewport: Viewport::new(WINDOW_WIDTH, WINDOW_HEIGHT),
            time_ticks: 0,
            close_requested: false,
        }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Set k, flooring at 1
    pub fn set_k(&mut self, k: usize) {
        self.k = k.max(1);
    }

    pub fn increment_k(&mut self) {
        self.k = self.k.saturating_add(1);
    }

    /// Decrement k; stays at 1 instead of failing
    pub fn decrement_k(&mut self) {
        self.k = self.k.saturating_sub(1).max(1);
    }

    /// Regenerate the cloud from the next RNG stream, keeping its size
    pub fn regenerate(&mut self) {
        self.rng_state.advance();
        let n = self.points.len();
        self.points.generate(n, &mut self.rng_state.to_rng());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_generate_overwrites_contents() {
        let mut rng = RngState::new(7).to_rng();
        let mut set = PointSet::generated(10, &mut rng);
        assert_eq!(set.len(), 10);
        set.generate(3, &mut rng);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_same_seed_same_cloud() {
        let settings = Settings::default();
        let a = SimulationState::new(&settings);
        let b = SimulationState::new(&settings);
        assert_eq!(a.points, b.points);
        assert_eq!(a.points.len(), NUM_POINTS);
    }

    #[test]
    fn test_regenerate_keeps_size_changes_points() {
        let mut state = SimulationState::new(&Settings::default());
        let before = state.points.clone();
        state.regenerate();
        assert_eq!(state.points.len(), before.len());
        assert_ne!(state.points, before);
    }

    #[test]
    fn test_k_never_below_one() {
        let mut state = SimulationState::with_points(PointSet::default());
        state.set_k(2);
        state.decrement_k();
        state.decrement_k();
        state.decrement_k();
        assert_eq!(state.k(), 1);

        state.set_k(0);
        assert_eq!(state.k(), 1);
        state.increment_k();
        assert_eq!(state.k(), 2);
    }

    proptest! {
        #[test]
        fn prop_generated_points_in_bounds(seed in any::<u64>(), n in 1usize..500) {
            let set = PointSet::generated(n, &mut RngState::new(seed).to_rng());
            prop_assert_eq!(set.len(), n);
            for p in &set {
                prop_assert!(crate::within_extent(p.pos.x, WORLD_EXTENT));
                prop_assert!(crate::within_extent(p.pos.y, WORLD_EXTENT));
                prop_assert!(crate::within_extent(p.vel.x, MAX_SPEED));
                prop_assert!(crate::within_extent(p.vel.y, MAX_SPEED));
            }
        }
    }
}
