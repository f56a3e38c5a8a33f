use serde::Serialize;

/// Outcome of one estimator invocation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Estimate {
    method: String,
    value: f64,
    error_bound: Option<f64>,
    standard_error: Option<f64>,
    evaluations: usize
}

impl Estimate {
    pub fn new(method: String, value: f64, evaluations: usize) -> Estimate {
        Estimate {
            method,
            value,
            error_bound: None,
            standard_error: None,
            evaluations
        }
    }

    pub fn with_error_bound(mut self, error_bound: f64) -> Estimate {
        self.error_bound = Some(error_bound);
        self
    }

    pub fn with_standard_error(mut self, standard_error: f64) -> Estimate {
        self.standard_error = Some(standard_error);
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// The method's own absolute-error bound (quadrature only).
    pub fn error_bound(&self) -> Option<f64> {
        self.error_bound
    }

    /// Sampling standard error (Monte Carlo only).
    pub fn standard_error(&self) -> Option<f64> {
        self.standard_error
    }

    /// Number of surface evaluations spent.
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    pub fn absolute_error(&self, reference: f64) -> f64 {
        (self.value - reference).abs()
    }
}
