//! Cellular (Voronoi) noise.

use crate::expr::{Expr, dot, less_than, select};
use crate::library::hash::{hash1, hash2};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Parameters for [`voronoi`].
pub struct VoronoiOptions {
    /// Cells per unit of input coordinate.
    pub scale: f64,
    /// How far feature points may wander from their cell center, as a fraction of the cell:
    /// `0` pins them to the center, `1` lets them reach the cell edges. Clamped to `[0, 1]`.
    pub jitter: f64,
}

impl Default for VoronoiOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            jitter: 1.0,
        }
    }
}

impl VoronoiOptions {
    /// Default jitter at `scale`.
    pub fn with_scale(scale: f64) -> Self {
        Self {
            scale,
            ..Self::default()
        }
    }

    /// Copy with a different jitter.
    pub fn jitter(self, jitter: f64) -> Self {
        Self { jitter, ..self }
    }
}

#[derive(Clone, Debug)]
/// Nearest-feature query result.
pub struct Voronoi {
    /// Euclidean distance to the nearest feature point, in cell units.
    pub distance: Expr,
    /// Integer lattice coordinate (vec2) of the winning cell.
    pub cell_id: Expr,
}

impl Voronoi {
    /// Stable per-cell random value in `[0, 1)`, handy for flat cell coloring.
    pub fn cell_hash(&self) -> Expr {
        hash1(&self.cell_id)
    }
}

/// 3x3 neighborhood search for the nearest jittered feature point.
///
/// Neighbors are scanned in raster order (row by row, bottom to top) and a candidate
/// replaces the current best only when strictly closer, so ties keep the first one scanned.
pub fn voronoi(uv: &Expr, opts: &VoronoiOptions) -> Voronoi {
    let jitter = if opts.jitter.is_finite() {
        opts.jitter.clamp(0.0, 1.0)
    } else {
        1.0
    };
    let scaled = uv * opts.scale;
    let i = scaled.floor();
    let f = scaled.fract();

    // squared distances inside a 3x3 block never exceed 8
    let mut best = Expr::from(8.0);
    let mut cell = Expr::from([0.0, 0.0]);
    for y in [-1.0, 0.0, 1.0] {
        for x in [-1.0, 0.0, 1.0] {
            let neighbor = [x, y];
            let lattice = &i + neighbor;
            let point = (hash2(&lattice) - 0.5) * jitter + 0.5;
            let diff = point + neighbor - &f;
            let d = dot(&diff, &diff);
            let closer = less_than(&d, &best);
            best = select(&closer, &d, &best);
            cell = select(&closer, &lattice, &cell);
        }
    }

    Voronoi {
        distance: best.sqrt(),
        cell_id: cell,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/library/cellular.rs"]
mod tests;
