//! k-nearest-neighbor selection over a point set
//!
//! Brute force partial selection: k passes over a distance buffer, each pass
//! taking the smallest distance not yet consumed. Equal distances resolve to
//! the lowest index, which decides which of several equidistant points is
//! drawn, so the scan keeps the first minimum it sees.

use glam::Vec2;

use super::state::{Point, PointSet};

/// Marks a distance slot as already selected
const CONSUMED: f32 = -1.0;

/// Euclidean distance between two locations
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Ordered k-NN answer for one query location
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    /// Where the query was made
    pub location: Vec2,
    /// Selected points, nearest first
    pub points: Vec<Point>,
    /// Index of each selected point in the set, parallel to `points`
    pub indices: Vec<usize>,
    /// Distance to the last (farthest) selected point; 0 when empty
    pub max_dist: f32,
}

impl QueryResult {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn clear(&mut self, location: Vec2) {
        self.location = location;
        self.points.clear();
        self.indices.clear();
        self.max_dist = 0.0;
    }
}

/// Reusable query with heap-backed scratch space
///
/// The distance buffer and the result vectors grow to fit the set and the
/// current k, and are reused across frames.
#[derive(Debug, Default)]
pub struct NearestNeighborQuery {
    distances: Vec<f32>,
    result: QueryResult,
}

impl NearestNeighborQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the `k` points of `set` closest to `location`
    ///
    /// `k` is clamped to `set.len()`, so asking for more neighbors than there
    /// are points returns the whole set in distance order.
    pub fn query(&mut self, set: &PointSet, location: Vec2, k: usize) -> &QueryResult {
        let k = k.min(set.len());
        self.result.clear(location);
        self.result.points.reserve(k);
        self.result.indices.reserve(k);

        self.distances.clear();
        self.distances.extend(set.iter().map(|p| distance(location, p.pos)));

        for _ in 0..k {
            let mut min_index: Option<usize> = None;
            for (j, &d) in self.distances.iter().enumerate() {
                // NaN fails `>= 0.0` and is never selected
                if d >= 0.0 && min_index.is_none_or(|m| d < self.distances[m]) {
                    min_index = Some(j);
                }
            }

            let Some(index) = min_index else {
                break;
            };
            self.result.points.push(set[index]);
            self.result.indices.push(index);
            self.result.max_dist = self.distances[index];
            self.distances[index] = CONSUMED;
        }

        &self.result
    }

    /// Last computed result
    pub fn result(&self) -> &QueryResult {
        &self.result
    }
}

/// One-shot convenience wrapper around `NearestNeighborQuery`
pub fn nearest_k(set: &PointSet, location: Vec2, k: usize) -> QueryResult {
    let mut query = NearestNeighborQuery::new();
    query.query(set, location, k);
    query.result
}
