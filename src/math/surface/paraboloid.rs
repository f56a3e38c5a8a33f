use crate::math::domain::rectangle::Rectangle;
use crate::math::surface::surface::Surface;

/// The paraboloid z = x² + y².
#[derive(Clone, Copy, Debug, Default)]
pub struct Paraboloid;

impl Paraboloid {
    pub fn new() -> Paraboloid {
        Paraboloid
    }
}

impl Surface for Paraboloid {
    fn height(&self, x: f64, y: f64) -> f64 {
        x * x + y * y
    }

    fn describe(&self) -> String {
        "z = x² + y²".to_owned()
    }

    // ∫∫ x² dy dx = (b³ - a³)/3 · (d - c), and symmetrically for y².
    // On the unit square this is 1/3 + 1/3 = 2/3.
    fn exact_volume(&self, domain: &Rectangle) -> Option<f64> {
        let (a, b) = (domain.x_min(), domain.x_max());
        let (c, d) = (domain.y_min(), domain.y_max());
        let x_part = (b.powi(3) - a.powi(3)) / 3.0 * (d - c);
        let y_part = (d.powi(3) - c.powi(3)) / 3.0 * (b - a);
        Some(x_part + y_part)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::{
        DMatrix,
        DVector
    };

    use super::*;
    use crate::volumeerror::VolumeError;

    #[test]
    fn test_scalar_heights() {
        let surface = Paraboloid::new();
        assert_eq!(surface.height(0.0, 0.0), 0.0);
        assert_eq!(surface.height(1.0, 1.0), 2.0);
        assert_eq!(surface.height(0.5, 0.5), 0.5);
    }

    #[test]
    fn test_vector_heights_are_element_wise() {
        let surface = Paraboloid::new();
        let xs = DVector::from_vec(vec![0.0, 1.0]);
        let ys = DVector::from_vec(vec![0.0, 1.0]);
        let zs = surface.heights(&xs, &ys).unwrap();
        assert_eq!(zs, DVector::from_vec(vec![0.0, 2.0]));
    }

    #[test]
    fn test_grid_heights_keep_shape() {
        let surface = Paraboloid::new();
        let xs = DMatrix::from_row_slice(2, 3, &[0.0, 0.5, 1.0, 0.0, 0.5, 1.0]);
        let ys = DMatrix::from_row_slice(2, 3, &[0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        let zs = surface.height_grid(&xs, &ys).unwrap();
        assert_eq!(zs.shape(), (2, 3));
        assert_eq!(zs[(1, 2)], 2.0);
        assert_eq!(zs[(0, 1)], 0.25);
    }

    #[test]
    fn test_mismatched_shapes_rejected() {
        let surface = Paraboloid::new();
        let xs = DVector::from_vec(vec![0.0, 1.0, 2.0]);
        let ys = DVector::from_vec(vec![0.0, 1.0]);
        let result = surface.heights(&xs, &ys);
        assert!(matches!(result, Err(VolumeError::ShapeMismatch { left: (3, 1), right: (2, 1) })));
    }

    #[test]
    fn test_exact_volume() {
        let surface = Paraboloid::new();
        let unit = surface.exact_volume(&Rectangle::unit_square()).unwrap();
        assert_relative_eq!(unit, 2.0 / 3.0, epsilon = 1e-15);

        // [0,2] × [0,1]: 8/3 + 2/3
        let rect = Rectangle::new(0.0, 2.0, 0.0, 1.0).unwrap();
        assert_relative_eq!(surface.exact_volume(&rect).unwrap(), 10.0 / 3.0, epsilon = 1e-14);
    }
}
