//! World-space coordinate grids.
//!
//! Coordinates are in centimeters. `x` grows to the east and `y` grows to the
//! north; rows of a grid therefore run along `x` and columns along `y`.

use glam::DVec2;

use super::{Field, GridError};

/// Physical spacing between adjacent samples of an axis-aligned grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpacing {
    /// World x of column 0.
    pub origin_x: f64,
    /// World y of row 0.
    pub origin_y: f64,
    /// Step in x between adjacent columns (cm, may be negative).
    pub dx: f64,
    /// Step in y between adjacent rows (cm, may be negative).
    pub dy: f64,
}

/// Two same-shape arrays of world-space coordinates.
///
/// The shape invariant is enforced at construction, so any query taking only a
/// `CoordGrid` can assume `x` and `y` agree.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordGrid {
    x: Field<f64>,
    y: Field<f64>,
}

impl CoordGrid {
    /// Pairs two coordinate fields, failing if their shapes differ.
    pub fn new(x: Field<f64>, y: Field<f64>) -> Result<Self, GridError> {
        x.ensure_shape(y.shape(), "y coordinates")?;
        Ok(Self { x, y })
    }

    /// Builds a grid from flat row-major coordinate buffers.
    pub fn from_vecs(width: usize, height: usize, xs: Vec<f64>, ys: Vec<f64>) -> Result<Self, GridError> {
        let x = Field::from_vec(width, height, xs).map_err(|e| relabel(e, "x coordinates"))?;
        let y = Field::from_vec(width, height, ys).map_err(|e| relabel(e, "y coordinates"))?;
        Self::new(x, y)
    }

    /// An axis-aligned grid: column `c`, row `r` sits at `origin + (c * dx, r * dy)`.
    pub fn regular(origin: DVec2, spacing: DVec2, width: usize, height: usize) -> Self {
        let x = Field::from_fn(width, height, |c, _| origin.x + c as f64 * spacing.x);
        let y = Field::from_fn(width, height, |_, r| origin.y + r as f64 * spacing.y);
        Self { x, y }
    }

    /// A 1x1 grid holding a single world point.
    pub fn point(x: f64, y: f64) -> Self {
        Self {
            x: Field::filled(1, 1, x),
            y: Field::filled(1, 1, y),
        }
    }

    /// The sample grid for chunk `(cx, cy)`.
    ///
    /// `resolution` samples per side cover `chunk_size_cm`; `padding` adds
    /// whole samples on every side so edge stencils can read past the chunk.
    pub fn chunk(cx: i64, cy: i64, resolution: usize, chunk_size_cm: f64, padding: usize) -> Self {
        let step = chunk_size_cm / resolution.max(1) as f64;
        let origin = DVec2::new(
            cx as f64 * chunk_size_cm - padding as f64 * step,
            cy as f64 * chunk_size_cm - padding as f64 * step,
        );
        let side = resolution + 2 * padding;
        Self::regular(origin, DVec2::splat(step), side, side)
    }

    pub fn width(&self) -> usize {
        self.x.width()
    }

    pub fn height(&self) -> usize {
        self.x.height()
    }

    pub fn shape(&self) -> (usize, usize) {
        self.x.shape()
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn x(&self) -> &Field<f64> {
        &self.x
    }

    pub fn y(&self) -> &Field<f64> {
        &self.y
    }

    /// World position of a cell.
    pub fn position(&self, col: usize, row: usize) -> DVec2 {
        DVec2::new(self.x.get(col, row), self.y.get(col, row))
    }

    /// Iterates world positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = DVec2> + '_ {
        self.x
            .iter()
            .zip(self.y.iter())
            .map(|(&x, &y)| DVec2::new(x, y))
    }

    /// Evaluates `f` at every world position.
    pub fn map_points<T: Copy>(&self, mut f: impl FnMut(f64, f64) -> T) -> Field<T> {
        self.x
            .zip_map(&self.y, "y coordinates", |x, y| f(x, y))
            .expect("coordinate fields share a shape by construction")
    }

    /// Fails unless `field` has this grid's shape.
    pub fn ensure_matches<T: Copy>(&self, field: &Field<T>, what: &'static str) -> Result<(), GridError> {
        self.x.ensure_shape(field.shape(), what)
    }

    /// Detects an axis-aligned uniform grid.
    ///
    /// Returns `None` for irregular or rotated grids. Single-sample axes report
    /// a zero step on that axis.
    pub fn spacing(&self) -> Option<GridSpacing> {
        let (w, h) = self.shape();
        if w == 0 || h == 0 {
            return None;
        }
        let origin_x = self.x.get(0, 0);
        let origin_y = self.y.get(0, 0);
        let dx = if w > 1 { self.x.get(1, 0) - origin_x } else { 0.0 };
        let dy = if h > 1 { self.y.get(0, 1) - origin_y } else { 0.0 };

        let tol = 1e-9 * (dx.abs() + dy.abs()).max(1.0);
        for row in 0..h {
            for col in 0..w {
                let ex = origin_x + col as f64 * dx;
                let ey = origin_y + row as f64 * dy;
                if (self.x.get(col, row) - ex).abs() > tol * (1 + col) as f64
                    || (self.y.get(col, row) - ey).abs() > tol * (1 + row) as f64
                {
                    return None;
                }
            }
        }
        Some(GridSpacing { origin_x, origin_y, dx, dy })
    }
}

fn relabel(err: GridError, what: &'static str) -> GridError {
    match err {
        GridError::LengthMismatch { width, height, expected, found, .. } => GridError::LengthMismatch {
            what,
            width,
            height,
            expected,
            found,
        },
        other => other,
    }
}
