use tracing::debug;

use crate::estimator::estimate::Estimate;
use crate::estimator::estimator::VolumeEstimator;
use crate::math::domain::rectangle::Rectangle;
use crate::math::quadrature::adaptivequadrature::{
    QuadOptions,
    dblquad
};
use crate::math::surface::surface::Surface;
use crate::volumeerror::VolumeResult;

/// Adaptive Gauss-Kronrod double integration.
#[derive(Clone, Copy, Debug, Default)]
pub struct QuadratureEstimator {
    options: QuadOptions
}

impl QuadratureEstimator {
    pub fn new(options: QuadOptions) -> QuadratureEstimator {
        QuadratureEstimator { options }
    }

    pub fn options(&self) -> &QuadOptions {
        &self.options
    }
}

impl VolumeEstimator for QuadratureEstimator {
    fn label(&self) -> String {
        "Numerical Integration (adaptive Gauss-Kronrod)".to_owned()
    }

    fn estimate(&self, surface: &dyn Surface, domain: &Rectangle) -> VolumeResult<Estimate> {
        domain.validate()?;
        let (y_min, y_max) = (domain.y_min(), domain.y_max());
        let result = dblquad(
            |x, y| surface.height(x, y),
            domain.x_min(),
            domain.x_max(),
            |_| y_min,
            |_| y_max,
            &self.options,
        )?;
        debug!(value = result.integral(), error = result.error(), neval = result.neval(), "quadrature estimate");
        Ok(Estimate::new(self.label(), result.integral(), result.neval()).with_error_bound(result.error()))
    }
}
