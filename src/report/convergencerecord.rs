use serde::Serialize;

use crate::estimator::estimator::VolumeEstimator;
use crate::estimator::riemannestimator::RiemannEstimator;
use crate::math::domain::rectangle::Rectangle;
use crate::math::surface::surface::Surface;
use crate::volumeerror::VolumeResult;

/// Riemann estimate at one grid resolution.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ConvergenceRecord {
    resolution: usize,
    estimate: f64,
    absolute_error: f64
}

impl ConvergenceRecord {
    pub fn new(resolution: usize, estimate: f64, absolute_error: f64) -> ConvergenceRecord {
        ConvergenceRecord { resolution, estimate, absolute_error }
    }

    /// Runs an independent Riemann sum at `resolution` and compares it to `reference`.
    pub fn measure(surface: &dyn Surface,
                   domain: &Rectangle,
                   resolution: usize,
                   reference: f64) -> VolumeResult<ConvergenceRecord> {
        let estimate = RiemannEstimator::new(resolution).estimate(surface, domain)?;
        Ok(ConvergenceRecord::new(resolution, estimate.value(), estimate.absolute_error(reference)))
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn estimate(&self) -> f64 {
        self.estimate
    }

    pub fn absolute_error(&self) -> f64 {
        self.absolute_error
    }
}
