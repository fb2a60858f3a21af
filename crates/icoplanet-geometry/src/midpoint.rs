//! Edge-midpoint deduplication for subdivision.

use glam::Vec3;
use rustc_hash::FxHashMap;

/// An undirected edge packed into one integer: `(min << 32) | max`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey(u64);

impl EdgeKey {
    /// Canonical key for the edge between `a` and `b`, independent of order.
    ///
    /// # Panics
    ///
    /// Panics if `a == b`. A self-edge never occurs in a valid triangle list.
    #[inline]
    #[must_use]
    pub fn new(a: u32, b: u32) -> Self {
        assert_ne!(a, b, "degenerate self-edge on vertex {a}");
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        Self((u64::from(lo) << 32) | u64::from(hi))
    }

    /// The two endpoints, smaller index first.
    #[inline]
    #[must_use]
    pub fn endpoints(self) -> (u32, u32) {
        ((self.0 >> 32) as u32, self.0 as u32)
    }

    #[inline]
    #[must_use]
    pub fn packed(self) -> u64 {
        self.0
    }
}

/// Maps each edge already split during a run to the vertex created at its midpoint.
///
/// Two triangles sharing an edge ask for the same midpoint and get the same
/// vertex back, which keeps the subdivided surface watertight.
#[derive(Debug, Default, Clone)]
pub struct MidpointCache {
    midpoints: FxHashMap<EdgeKey, u32>,
}

impl MidpointCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the midpoint vertex of edge `(a, b)`, creating it on first request.
    ///
    /// A new midpoint is the mean of the endpoints, pushed back onto the unit
    /// sphere and appended to `vertices`. The result does not depend on the
    /// order of `a` and `b`.
    ///
    /// # Panics
    ///
    /// Panics on a self-edge or if either index is outside `vertices`.
    pub fn get_or_insert(&mut self, vertices: &mut Vec<Vec3>, a: u32, b: u32) -> u32 {
        let key = EdgeKey::new(a, b);
        if let Some(&idx) = self.midpoints.get(&key) {
            return idx;
        }

        let (pa, pb) = (vertices[a as usize], vertices[b as usize]);
        let mid = ((pa + pb) * 0.5).normalize();
        // MAX_DEPTH keeps the vertex count well inside u32.
        let idx = vertices.len() as u32;
        vertices.push(mid);
        self.midpoints.insert(key, idx);
        idx
    }

    /// Look up an existing midpoint without creating one.
    #[must_use]
    pub fn get(&self, a: u32, b: u32) -> Option<u32> {
        self.midpoints.get(&EdgeKey::new(a, b)).copied()
    }

    /// Number of edges split so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.midpoints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.midpoints.is_empty()
    }

    pub fn clear(&mut self) {
        self.midpoints.clear();
    }
}
