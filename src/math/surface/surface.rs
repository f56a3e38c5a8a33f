use nalgebra::{
    DMatrix,
    DVector
};

use crate::math::domain::rectangle::Rectangle;
use crate::volumeerror::{
    VolumeError,
    VolumeResult
};

/// A height field z = f(x, y).
///
/// Implementations must be pure: the same (x, y) always yields the same z.
pub trait Surface {
    fn height(&self, x: f64, y: f64) -> f64;

    /// Human readable formula, used in report headers.
    fn describe(&self) -> String;

    /// Closed-form volume over `domain`, if one is known.
    fn exact_volume(&self, domain: &Rectangle) -> Option<f64>;

    /// Element-wise heights over paired sample vectors.
    fn heights(&self, xs: &DVector<f64>, ys: &DVector<f64>) -> VolumeResult<DVector<f64>> {
        check_shapes(xs.shape(), ys.shape())?;
        Ok(xs.zip_map(ys, |x, y| self.height(x, y)))
    }

    /// Element-wise heights over a meshgrid.
    fn height_grid(&self, xs: &DMatrix<f64>, ys: &DMatrix<f64>) -> VolumeResult<DMatrix<f64>> {
        check_shapes(xs.shape(), ys.shape())?;
        Ok(xs.zip_map(ys, |x, y| self.height(x, y)))
    }
}

fn check_shapes(left: (usize, usize), right: (usize, usize)) -> VolumeResult<()> {
    if left != right {
        Err(VolumeError::ShapeMismatch { left, right })
    } else {
        Ok(())
    }
}
