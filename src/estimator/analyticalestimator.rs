use tracing::debug;

use crate::estimator::estimate::Estimate;
use crate::estimator::estimator::VolumeEstimator;
use crate::math::domain::rectangle::Rectangle;
use crate::math::surface::surface::Surface;
use crate::volumeerror::{
    VolumeError,
    VolumeResult
};

/// Ground truth taken from the surface's closed form.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnalyticalEstimator;

impl AnalyticalEstimator {
    pub fn new() -> AnalyticalEstimator {
        AnalyticalEstimator
    }
}

impl VolumeEstimator for AnalyticalEstimator {
    fn label(&self) -> String {
        "Analytical Solution".to_owned()
    }

    fn estimate(&self, surface: &dyn Surface, domain: &Rectangle) -> VolumeResult<Estimate> {
        let volume = surface
            .exact_volume(domain)
            .ok_or_else(|| VolumeError::NoClosedForm(format!("{} over {}", surface.describe(), domain)))?;
        debug!(volume, "analytical volume");
        Ok(Estimate::new(self.label(), volume, 0))
    }
}
