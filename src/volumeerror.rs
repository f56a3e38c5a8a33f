use thiserror::Error;

pub type VolumeResult<T> = Result<T, VolumeError>;

/// Failures raised while evaluating a surface or estimating its volume.
#[derive(Debug, Error)]
pub enum VolumeError {
    /// The integrand produced NaN or an infinity.
    #[error("non-finite integrand value at (x = {x}, y = {y})")]
    NonFiniteIntegrand { x: f64, y: f64 },

    /// Adaptive quadrature ran out of subdivisions before reaching its tolerance.
    #[error("quadrature did not converge after {subdivisions} subdivisions (error {error:.2e} > tolerance {tolerance:.2e})")]
    ConvergenceFailure {
        subdivisions: usize,
        error: f64,
        tolerance: f64,
    },

    #[error("invalid parameter '{parameter}': {message}")]
    InvalidParameter {
        parameter: &'static str,
        message: String,
    },

    #[error("invalid domain: {0}")]
    InvalidDomain(String),

    #[error("shape mismatch: {left:?} vs {right:?}")]
    ShapeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },

    #[error("no closed-form volume for {0}")]
    NoClosedForm(String),

    #[error("render failed: {0}")]
    Render(String),

    #[error(transparent)]
    IOError(#[from] std::io::Error),

    #[error(transparent)]
    JsonParseError(#[from] serde_json::Error),
}

impl VolumeError {
    pub fn invalid_parameter(parameter: &'static str, message: &str) -> VolumeError {
        VolumeError::InvalidParameter {
            parameter,
            message: message.to_owned(),
        }
    }
}
