use nalgebra::DVector;
use rand::distr::{
    Distribution,
    Uniform
};
use rand::rngs::StdRng;
use rand::{
    Rng,
    SeedableRng
};
use serde::{
    Deserialize,
    Serialize
};
use tracing::debug;

use crate::estimator::estimate::Estimate;
use crate::estimator::estimator::VolumeEstimator;
use crate::math::domain::rectangle::Rectangle;
use crate::math::surface::surface::Surface;
use crate::volumeerror::{
    VolumeError,
    VolumeResult
};

pub const DEFAULT_SAMPLES: usize = 1_000_000;

/// Where the generator for one Monte Carlo run gets its seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeedPolicy {
    /// Fresh OS entropy on every call.
    Entropy,
    /// Same seed, same samples.
    Fixed(u64)
}

impl SeedPolicy {
    pub fn from_option(seed: Option<u64>) -> SeedPolicy {
        seed.map_or(SeedPolicy::Entropy, SeedPolicy::Fixed)
    }

    pub fn rng(&self) -> StdRng {
        match self {
            SeedPolicy::Entropy => StdRng::from_os_rng(),
            SeedPolicy::Fixed(seed) => StdRng::seed_from_u64(*seed)
        }
    }
}

/// Uniform random sampling: volume = area × mean sampled height.
#[derive(Clone, Copy, Debug)]
pub struct MonteCarloEstimator {
    n_samples: usize,
    seed_policy: SeedPolicy
}

impl MonteCarloEstimator {
    pub fn new(n_samples: usize, seed_policy: SeedPolicy) -> MonteCarloEstimator {
        MonteCarloEstimator { n_samples, seed_policy }
    }

    pub fn with_seed(n_samples: usize, seed: u64) -> MonteCarloEstimator {
        MonteCarloEstimator::new(n_samples, SeedPolicy::Fixed(seed))
    }

    pub fn n_samples(&self) -> usize {
        self.n_samples
    }

    pub fn seed_policy(&self) -> SeedPolicy {
        self.seed_policy
    }

    /// Runs the estimate against a caller-supplied generator.
    ///
    /// All x-coordinates are drawn first, then all y-coordinates.
    pub fn estimate_with_rng<R>(&self, surface: &dyn Surface, domain: &Rectangle, rng: &mut R) -> VolumeResult<Estimate>
    where
        R: Rng + ?Sized,
    {
        if self.n_samples == 0 {
            return Err(VolumeError::invalid_parameter("n_samples", "must be at least 1"));
        }
        domain.validate()?;

        let n = self.n_samples;
        let x_dist = Uniform::new(domain.x_min(), domain.x_max())
            .map_err(|error| VolumeError::InvalidDomain(error.to_string()))?;
        let y_dist = Uniform::new(domain.y_min(), domain.y_max())
            .map_err(|error| VolumeError::InvalidDomain(error.to_string()))?;
        let xs = DVector::from_iterator(n, (0..n).map(|_| x_dist.sample(rng)));
        let ys = DVector::from_iterator(n, (0..n).map(|_| y_dist.sample(rng)));

        let zs = surface.heights(&xs, &ys)?;
        if let Some(i) = zs.iter().position(|z| !z.is_finite()) {
            return Err(VolumeError::NonFiniteIntegrand { x: xs[i], y: ys[i] });
        }

        let mean = zs.iter().sum::<f64>() / n as f64;
        let area = domain.area();
        let mut estimate = Estimate::new(self.label(), mean * area, n);
        if n > 1 {
            let sum_sq: f64 = zs.iter().map(|z| (z - mean).powi(2)).sum();
            let standard_error = (sum_sq / (n - 1) as f64).sqrt() / (n as f64).sqrt() * area;
            estimate = estimate.with_standard_error(standard_error);
        }
        debug!(n_samples = n, value = estimate.value(), standard_error = ?estimate.standard_error(), "monte carlo estimate");
        Ok(estimate)
    }
}

impl Default for MonteCarloEstimator {
    fn default() -> Self {
        MonteCarloEstimator::new(DEFAULT_SAMPLES, SeedPolicy::Entropy)
    }
}

impl VolumeEstimator for MonteCarloEstimator {
    fn label(&self) -> String {
        "Monte Carlo Integration".to_owned()
    }

    fn estimate(&self, surface: &dyn Surface, domain: &Rectangle) -> VolumeResult<Estimate> {
        let mut rng = self.seed_policy.rng();
        self.estimate_with_rng(surface, domain, &mut rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::surface::paraboloid::Paraboloid;

    const EXACT: f64 = 2.0 / 3.0;

    #[test]
    fn test_fixed_seed_million_samples() {
        let estimate = MonteCarloEstimator::with_seed(DEFAULT_SAMPLES, 42)
            .estimate(&Paraboloid::new(), &Rectangle::unit_square())
            .unwrap();
        assert!(estimate.absolute_error(EXACT) < 0.01, "estimate = {}", estimate.value());
        assert_eq!(estimate.evaluations(), DEFAULT_SAMPLES);
        assert!(estimate.error_bound().is_none());
    }

    #[test]
    fn test_fixed_seed_is_reproducible() {
        let estimator = MonteCarloEstimator::with_seed(10_000, 7);
        let surface = Paraboloid::new();
        let first = estimator.estimate(&surface, &Rectangle::unit_square()).unwrap();
        let second = estimator.estimate(&surface, &Rectangle::unit_square()).unwrap();
        assert_eq!(first.value().to_bits(), second.value().to_bits());

        let other = MonteCarloEstimator::with_seed(10_000, 8)
            .estimate(&surface, &Rectangle::unit_square())
            .unwrap();
        assert_ne!(first.value(), other.value());
    }

    #[test]
    fn test_explicit_rng_matches_seed_policy() {
        let estimator = MonteCarloEstimator::with_seed(1_000, 3);
        let surface = Paraboloid::new();
        let mut rng = StdRng::seed_from_u64(3);
        let threaded = estimator.estimate_with_rng(&surface, &Rectangle::unit_square(), &mut rng).unwrap();
        let seeded = estimator.estimate(&surface, &Rectangle::unit_square()).unwrap();
        assert_eq!(threaded, seeded);
    }

    #[test]
    fn test_standard_error_tracks_actual_error() {
        let estimate = MonteCarloEstimator::with_seed(100_000, 11)
            .estimate(&Paraboloid::new(), &Rectangle::unit_square())
            .unwrap();
        let standard_error = estimate.standard_error().unwrap();
        // σ(x² + y²) = √(8/45) on the unit square
        assert!((standard_error - (8.0_f64 / 45.0).sqrt() / 100_000_f64.sqrt()).abs() < 1e-4);
        assert!(estimate.absolute_error(EXACT) < 6.0 * standard_error);
    }

    #[test]
    fn test_samples_stay_inside_domain() {
        let rect = Rectangle::new(2.0, 3.0, -1.0, 0.0).unwrap();
        let estimate = MonteCarloEstimator::with_seed(50_000, 5)
            .estimate(&Paraboloid::new(), &rect)
            .unwrap();
        // heights lie in [4, 10]
        assert!(estimate.value() > 4.0 && estimate.value() < 10.0);
        let exact = Paraboloid::new().exact_volume(&rect).unwrap();
        assert!(estimate.absolute_error(exact) < 0.05);
    }

    #[test]
    fn test_zero_samples_rejected() {
        let result = MonteCarloEstimator::with_seed(0, 1).estimate(&Paraboloid::new(), &Rectangle::unit_square());
        assert!(matches!(result, Err(VolumeError::InvalidParameter { parameter: "n_samples", .. })));
    }

    #[test]
    fn test_single_sample_has_no_standard_error() {
        let estimate = MonteCarloEstimator::with_seed(1, 1)
            .estimate(&Paraboloid::new(), &Rectangle::unit_square())
            .unwrap();
        assert!(estimate.standard_error().is_none());
        assert!(estimate.value() >= 0.0 && estimate.value() <= 2.0);
    }
}
