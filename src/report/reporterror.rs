use std::fmt;

use thiserror::Error;

use crate::volumeerror::VolumeError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportStage {
    Configuration,
    Analytical,
    Quadrature,
    MonteCarlo,
    Riemann,
    Convergence,
    Output
}

impl fmt::Display for ReportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportStage::Configuration => "configuration",
            ReportStage::Analytical => "analytical",
            ReportStage::Quadrature => "quadrature",
            ReportStage::MonteCarlo => "monte carlo",
            ReportStage::Riemann => "riemann",
            ReportStage::Convergence => "convergence",
            ReportStage::Output => "output"
        };
        write!(f, "{}", name)
    }
}

/// A report failure: the stage that failed and its untouched cause.
#[derive(Debug, Error)]
#[error("{stage} stage failed: {source}")]
pub struct ReportError {
    stage: ReportStage,
    source: VolumeError
}

impl ReportError {
    pub fn new(stage: ReportStage, source: VolumeError) -> ReportError {
        ReportError { stage, source }
    }

    pub fn stage(&self) -> ReportStage {
        self.stage
    }

    pub fn cause(&self) -> &VolumeError {
        &self.source
    }
}
