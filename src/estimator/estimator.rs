use crate::estimator::estimate::Estimate;
use crate::math::domain::rectangle::Rectangle;
use crate::math::surface::surface::Surface;
use crate::volumeerror::VolumeResult;

/// A method for estimating the volume under `surface` over `domain`.
///
/// Surface and domain are passed on every call; estimators hold only their
/// own tuning parameters.
pub trait VolumeEstimator {
    fn label(&self) -> String;

    fn estimate(&self, surface: &dyn Surface, domain: &Rectangle) -> VolumeResult<Estimate>;
}
