use std::fs::File;
use std::io::{
    BufReader,
    Read
};
use std::path::Path;

use serde::{
    Deserialize,
    Serialize
};

use crate::estimator::montecarloestimator::{
    DEFAULT_SAMPLES,
    SeedPolicy
};
use crate::estimator::riemannestimator::DEFAULT_INTERVALS;
use crate::math::domain::rectangle::Rectangle;
use crate::math::quadrature::adaptivequadrature::QuadOptions;
use crate::volumeerror::{
    VolumeError,
    VolumeResult
};

pub const DEFAULT_CONVERGENCE_RESOLUTIONS: [usize; 5] = [10, 50, 100, 500, 1000];
pub const DEFAULT_GRID_RESOLUTION: usize = 50;

/// Parameters of one comparison run. Every field has a default, so a JSON
/// document only needs the keys it overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    domain: Rectangle,
    quadrature: QuadOptions,
    monte_carlo_samples: usize,
    monte_carlo_seed: Option<u64>,
    riemann_intervals: usize,
    convergence_resolutions: Vec<usize>,
    grid_resolution: usize
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            domain: Rectangle::unit_square(),
            quadrature: QuadOptions::default(),
            monte_carlo_samples: DEFAULT_SAMPLES,
            monte_carlo_seed: None,
            riemann_intervals: DEFAULT_INTERVALS,
            convergence_resolutions: DEFAULT_CONVERGENCE_RESOLUTIONS.to_vec(),
            grid_resolution: DEFAULT_GRID_RESOLUTION
        }
    }
}

impl Configuration {
    pub fn new() -> Configuration {
        Configuration::default()
    }

    pub fn from_reader<R: Read>(reader: R) -> VolumeResult<Configuration> {
        let configuration: Configuration = serde_json::from_reader(reader)?;
        configuration.validate()?;
        Ok(configuration)
    }

    pub fn from_file<P: AsRef<Path>>(file_path: P) -> VolumeResult<Configuration> {
        let file = File::open(file_path)?;
        Configuration::from_reader(BufReader::new(file))
    }

    pub fn from_json_str(json: &str) -> VolumeResult<Configuration> {
        Configuration::from_reader(json.as_bytes())
    }

    pub fn validate(&self) -> VolumeResult<()> {
        self.domain.validate()?;
        self.quadrature.validate()?;
        if self.monte_carlo_samples == 0 {
            return Err(VolumeError::invalid_parameter("monte_carlo_samples", "must be at least 1"));
        }
        if self.riemann_intervals == 0 {
            return Err(VolumeError::invalid_parameter("riemann_intervals", "must be at least 1"));
        }
        if self.convergence_resolutions.iter().any(|&n| n == 0) {
            return Err(VolumeError::invalid_parameter("convergence_resolutions", "every resolution must be at least 1"));
        }
        if self.convergence_resolutions.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(VolumeError::invalid_parameter("convergence_resolutions", "must be strictly increasing"));
        }
        if self.grid_resolution < 2 {
            return Err(VolumeError::invalid_parameter("grid_resolution", "must be at least 2"));
        }
        Ok(())
    }

    pub fn with_domain(mut self, domain: Rectangle) -> Configuration {
        self.domain = domain;
        self
    }

    pub fn with_monte_carlo_samples(mut self, n_samples: usize) -> Configuration {
        self.monte_carlo_samples = n_samples;
        self
    }

    pub fn with_monte_carlo_seed(mut self, seed: u64) -> Configuration {
        self.monte_carlo_seed = Some(seed);
        self
    }

    pub fn with_riemann_intervals(mut self, n_intervals: usize) -> Configuration {
        self.riemann_intervals = n_intervals;
        self
    }

    pub fn with_convergence_resolutions(mut self, resolutions: Vec<usize>) -> Configuration {
        self.convergence_resolutions = resolutions;
        self
    }

    pub fn domain(&self) -> &Rectangle {
        &self.domain
    }

    pub fn quadrature(&self) -> &QuadOptions {
        &self.quadrature
    }

    pub fn monte_carlo_samples(&self) -> usize {
        self.monte_carlo_samples
    }

    pub fn seed_policy(&self) -> SeedPolicy {
        SeedPolicy::from_option(self.monte_carlo_seed)
    }

    pub fn riemann_intervals(&self) -> usize {
        self.riemann_intervals
    }

    pub fn convergence_resolutions(&self) -> &[usize] {
        &self.convergence_resolutions
    }

    pub fn grid_resolution(&self) -> usize {
        self.grid_resolution
    }
}
