use std::io::Write;

use serde::Serialize;
use tracing::{
    error,
    info,
    warn
};

use crate::configuration::Configuration;
use crate::estimator::analyticalestimator::AnalyticalEstimator;
use crate::estimator::estimate::Estimate;
use crate::estimator::estimator::VolumeEstimator;
use crate::estimator::montecarloestimator::MonteCarloEstimator;
use crate::estimator::quadratureestimator::QuadratureEstimator;
use crate::estimator::riemannestimator::RiemannEstimator;
use crate::math::surface::surface::Surface;
use crate::report::convergencerecord::ConvergenceRecord;
use crate::report::reporterror::{
    ReportError,
    ReportStage
};
use crate::report::scientific::scientific;
use crate::report::surfacegrid::SurfaceGrid;
use crate::report::surfacerenderer::SurfaceRenderer;
use crate::volumeerror::VolumeResult;

const RULE_WIDTH: usize = 65;
const ERROR_DIGITS: usize = 2;

/// Everything a report run computed.
#[derive(Clone, Debug, Serialize)]
pub struct ComparisonSummary {
    analytical: Estimate,
    quadrature: Estimate,
    monte_carlo: Estimate,
    riemann: Estimate,
    convergence: Vec<ConvergenceRecord>,
    rendered: bool
}

impl ComparisonSummary {
    pub fn analytical(&self) -> &Estimate {
        &self.analytical
    }

    pub fn quadrature(&self) -> &Estimate {
        &self.quadrature
    }

    pub fn monte_carlo(&self) -> &Estimate {
        &self.monte_carlo
    }

    pub fn riemann(&self) -> &Estimate {
        &self.riemann
    }

    pub fn convergence(&self) -> &[ConvergenceRecord] {
        &self.convergence
    }

    /// Whether the renderer accepted the surface grid.
    pub fn rendered(&self) -> bool {
        self.rendered
    }
}

/// Runs every estimator against one surface and writes the comparison.
///
/// Lines are written as soon as their stage finishes, so a failing stage
/// leaves the earlier lines in place.
pub struct ComparisonReport<'a> {
    configuration: Configuration,
    surface: &'a dyn Surface,
    renderer: &'a dyn SurfaceRenderer
}

impl<'a> ComparisonReport<'a> {
    pub fn new(configuration: Configuration,
               surface: &'a dyn Surface,
               renderer: &'a dyn SurfaceRenderer) -> ComparisonReport<'a> {
        ComparisonReport { configuration, surface, renderer }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn run<W: Write>(&self, out: &mut W) -> Result<ComparisonSummary, ReportError> {
        let config = &self.configuration;
        let domain = config.domain();
        let surface = self.surface;
        staged(ReportStage::Configuration, config.validate())?;

        let title = format!("Volume Under Surface {} over {}", surface.describe(), domain.describe());
        write_lines(out, &[title, "=".repeat(RULE_WIDTH)])?;

        info!("running analytical estimator");
        let analytical = staged(ReportStage::Analytical, AnalyticalEstimator::new().estimate(surface, domain))?;
        let exact = analytical.value();
        write_lines(out, &[format!("1. {}: {:.10}", analytical.method(), exact)])?;

        info!("running quadrature estimator");
        let quadrature_estimator = QuadratureEstimator::new(*config.quadrature());
        let quadrature = staged(ReportStage::Quadrature, quadrature_estimator.estimate(surface, domain))?;
        write_lines(out, &[
            format!("2. {}: {:.10}", quadrature.method(), quadrature.value()),
            format!("   Estimated error: {}", scientific(quadrature.error_bound().unwrap_or(f64::NAN), ERROR_DIGITS)),
        ])?;

        info!(n_samples = config.monte_carlo_samples(), "running monte carlo estimator");
        let monte_carlo_estimator = MonteCarloEstimator::new(config.monte_carlo_samples(), config.seed_policy());
        let monte_carlo = staged(ReportStage::MonteCarlo, monte_carlo_estimator.estimate(surface, domain))?;
        write_lines(out, &[format!("3. {}: {:.10}", monte_carlo.method(), monte_carlo.value())])?;
        if let Some(standard_error) = monte_carlo.standard_error() {
            info!(standard_error, "monte carlo standard error");
        }

        info!(n_intervals = config.riemann_intervals(), "running riemann estimator");
        let riemann_estimator = RiemannEstimator::new(config.riemann_intervals());
        let riemann = staged(ReportStage::Riemann, riemann_estimator.estimate(surface, domain))?;
        write_lines(out, &[format!("4. {}: {:.10}", riemann.method(), riemann.value())])?;

        write_lines(out, &[
            String::new(),
            "Comparison with Analytical Solution:".to_owned(),
            format!("Numerical error: {}", scientific(quadrature.absolute_error(exact), ERROR_DIGITS)),
            format!("Monte Carlo error: {}", scientific(monte_carlo.absolute_error(exact), ERROR_DIGITS)),
            format!("Riemann sum error: {}", scientific(riemann.absolute_error(exact), ERROR_DIGITS)),
        ])?;

        write_lines(out, &[String::new(), "Riemann Sum Convergence:".to_owned()])?;
        info!(resolutions = ?config.convergence_resolutions(), "building convergence table");
        let mut convergence = Vec::with_capacity(config.convergence_resolutions().len());
        for &resolution in config.convergence_resolutions() {
            let record = staged(
                ReportStage::Convergence,
                ConvergenceRecord::measure(surface, domain, resolution, exact),
            )?;
            write_lines(out, &[format!(
                "n={:4}: Volume = {:.8}, Error = {}",
                record.resolution(),
                record.estimate(),
                scientific(record.absolute_error(), ERROR_DIGITS)
            )])?;
            convergence.push(record);
        }

        write_lines(out, &[String::new(), "Generating 3D visualization...".to_owned()])?;
        let rendered = match self.visualize() {
            Ok(()) => true,
            Err(error) => {
                warn!(%error, "visualization skipped");
                false
            }
        };

        Ok(ComparisonSummary { analytical, quadrature, monte_carlo, riemann, convergence, rendered })
    }

    fn visualize(&self) -> VolumeResult<()> {
        let grid = SurfaceGrid::evaluate(self.surface, self.configuration.domain(), self.configuration.grid_resolution())?;
        self.renderer.render(&grid)
    }
}

fn staged<T>(stage: ReportStage, result: VolumeResult<T>) -> Result<T, ReportError> {
    result.map_err(|source| {
        error!(%stage, error = %source, "report stage failed");
        ReportError::new(stage, source)
    })
}

fn write_lines<W: Write>(out: &mut W, lines: &[String]) -> Result<(), ReportError> {
    for line in lines {
        staged(ReportStage::Output, writeln!(out, "{}", line).map_err(Into::into))?;
    }
    staged(ReportStage::Output, out.flush().map_err(Into::into))
}
