use nalgebra::DMatrix;

use crate::math::domain::rectangle::Rectangle;
use crate::math::surface::surface::Surface;
use crate::volumeerror::{
    VolumeError,
    VolumeResult
};

/// Meshgrid samples of a surface, laid out like `numpy.meshgrid`:
/// row i holds y_i, column j holds x_j.
#[derive(Clone, Debug)]
pub struct SurfaceGrid {
    xs: DMatrix<f64>,
    ys: DMatrix<f64>,
    zs: DMatrix<f64>
}

impl SurfaceGrid {
    pub fn evaluate(surface: &dyn Surface, domain: &Rectangle, resolution: usize) -> VolumeResult<SurfaceGrid> {
        if resolution < 2 {
            return Err(VolumeError::invalid_parameter("grid_resolution", "must be at least 2"));
        }
        let x_axis = linspace(domain.x_min(), domain.x_max(), resolution);
        let y_axis = linspace(domain.y_min(), domain.y_max(), resolution);
        let xs = DMatrix::from_fn(resolution, resolution, |_, j| x_axis[j]);
        let ys = DMatrix::from_fn(resolution, resolution, |i, _| y_axis[i]);
        let zs = surface.height_grid(&xs, &ys)?;
        Ok(SurfaceGrid { xs, ys, zs })
    }

    pub fn xs(&self) -> &DMatrix<f64> {
        &self.xs
    }

    pub fn ys(&self) -> &DMatrix<f64> {
        &self.ys
    }

    pub fn zs(&self) -> &DMatrix<f64> {
        &self.zs
    }

    pub fn shape(&self) -> (usize, usize) {
        self.zs.shape()
    }

    pub fn z_min(&self) -> f64 {
        self.zs.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn z_max(&self) -> f64 {
        self.zs.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// `count` evenly spaced contour heights strictly inside (z_min, z_max).
    pub fn contour_levels(&self, count: usize) -> Vec<f64> {
        let (lo, hi) = (self.z_min(), self.z_max());
        let step = (hi - lo) / (count + 1) as f64;
        (1..=count).map(|k| lo + k as f64 * step).collect()
    }
}

fn linspace(start: f64, end: f64, num: usize) -> Vec<f64> {
    let step = (end - start) / (num - 1) as f64;
    (0..num)
        .map(|k| if k == num - 1 { end } else { start + k as f64 * step })
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::math::surface::paraboloid::Paraboloid;

    #[test]
    fn test_meshgrid_layout() {
        let grid = SurfaceGrid::evaluate(&Paraboloid::new(), &Rectangle::unit_square(), 50).unwrap();
        assert_eq!(grid.shape(), (50, 50));
        assert_eq!(grid.xs()[(0, 49)], 1.0);
        assert_eq!(grid.ys()[(49, 0)], 1.0);
        assert_eq!(grid.xs()[(7, 0)], 0.0);
        assert_eq!(grid.zs()[(0, 0)], 0.0);
        assert_eq!(grid.zs()[(49, 49)], 2.0);
        assert_relative_eq!(grid.zs()[(3, 5)], (5.0_f64 / 49.0).powi(2) + (3.0_f64 / 49.0).powi(2), epsilon = 1e-15);
    }

    #[test]
    fn test_contour_levels() {
        let grid = SurfaceGrid::evaluate(&Paraboloid::new(), &Rectangle::unit_square(), 11).unwrap();
        let levels = grid.contour_levels(3);
        assert_eq!(levels.len(), 3);
        assert_relative_eq!(levels[0], 0.5, epsilon = 1e-15);
        assert_relative_eq!(levels[2], 1.5, epsilon = 1e-15);
    }

    #[test]
    fn test_resolution_too_small() {
        let result = SurfaceGrid::evaluate(&Paraboloid::new(), &Rectangle::unit_square(), 1);
        assert!(matches!(result, Err(VolumeError::InvalidParameter { parameter: "grid_resolution", .. })));
    }
}
