//! Coarse, memoized elevation for the moisture search of bulk renders.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::terrain::ElevationSource;

/// Bilinear elevation over a square lattice of exact terrain samples.
///
/// Lattice nodes are evaluated once and cached, which makes the ray march of
/// a whole chunk affordable. One instance belongs to one worker; it is not
/// `Sync`, and its cache only lives as long as the chunk it serves.
pub struct LatticeElevation<'a, S: ?Sized> {
    source: &'a S,
    spacing_cm: f64,
    nodes: RefCell<HashMap<(i64, i64), f64>>,
}

impl<'a, S: ElevationSource + ?Sized> LatticeElevation<'a, S> {
    pub fn new(source: &'a S, spacing_cm: f64) -> Self {
        Self {
            source,
            spacing_cm,
            nodes: RefCell::new(HashMap::new()),
        }
    }

    /// Number of lattice nodes evaluated so far.
    pub fn cached_nodes(&self) -> usize {
        self.nodes.borrow().len()
    }

    fn node(&self, i: i64, j: i64) -> f64 {
        if let Some(&v) = self.nodes.borrow().get(&(i, j)) {
            return v;
        }
        let v = self
            .source
            .elevation_at(i as f64 * self.spacing_cm, j as f64 * self.spacing_cm);
        self.nodes.borrow_mut().insert((i, j), v);
        v
    }
}

impl<S: ElevationSource + ?Sized> ElevationSource for LatticeElevation<'_, S> {
    fn elevation_at(&self, x: f64, y: f64) -> f64 {
        let fx = x / self.spacing_cm;
        let fy = y / self.spacing_cm;
        let (i, j) = (fx.floor() as i64, fy.floor() as i64);
        let (tx, ty) = (fx - i as f64, fy - j as f64);

        let top = self.node(i, j) + (self.node(i + 1, j) - self.node(i, j)) * tx;
        let bottom = self.node(i, j + 1) + (self.node(i + 1, j + 1) - self.node(i, j + 1)) * tx;
        top + (bottom - top) * ty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nodes_are_exact_and_cached() {
        let plane = |x: f64, y: f64| 0.001 * x + 0.002 * y;
        let lattice = LatticeElevation::new(&plane, 10.0);
        assert_eq!(lattice.elevation_at(20.0, 30.0), plane(20.0, 30.0));
        let before = lattice.cached_nodes();
        lattice.elevation_at(20.0, 30.0);
        assert_eq!(lattice.cached_nodes(), before);
    }

    #[test]
    fn interpolates_planes_exactly() {
        let plane = |x: f64, y: f64| 0.001 * x - 0.003 * y + 0.5;
        let lattice = LatticeElevation::new(&plane, 10.0);
        for &(x, y) in &[(3.0, 4.0), (-17.5, 2.25), (99.0, -41.0)] {
            assert!((lattice.elevation_at(x, y) - plane(x, y)).abs() < 1e-9);
        }
    }
}
