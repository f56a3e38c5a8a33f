//! Adaptive Gauss-Kronrod quadrature in one and two dimensions.
//!
//! The interval with the largest error estimate is bisected until the
//! accumulated error falls under `max(epsabs, epsrel · |integral|)` or the
//! subdivision limit is reached.

use std::cell::Cell;

use serde::{
    Deserialize,
    Serialize
};
use tracing::debug;

use crate::math::quadrature::gausskronrod::{
    NODES_PER_PANEL,
    Panel
};
use crate::volumeerror::{
    VolumeError,
    VolumeResult
};

/// Options for adaptive quadrature.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadOptions {
    /// Absolute tolerance (default: 1.49e-8)
    pub epsabs: f64,
    /// Relative tolerance (default: 1.49e-8)
    pub epsrel: f64,
    /// Maximum number of bisections per integral (default: 50)
    pub limit: usize,
}

impl Default for QuadOptions {
    fn default() -> Self {
        Self {
            epsabs: 1.49e-8,
            epsrel: 1.49e-8,
            limit: 50,
        }
    }
}

impl QuadOptions {
    pub fn validate(&self) -> VolumeResult<()> {
        if self.limit == 0 {
            return Err(VolumeError::invalid_parameter("limit", "must be at least 1"));
        }
        if !(self.epsabs >= 0.0) || !(self.epsrel >= 0.0) {
            return Err(VolumeError::invalid_parameter("epsabs/epsrel", "tolerances must be non-negative"));
        }
        if self.epsabs == 0.0 && self.epsrel == 0.0 {
            return Err(VolumeError::invalid_parameter("epsabs/epsrel", "at least one tolerance must be positive"));
        }
        Ok(())
    }
}

/// Result of adaptive quadrature.
#[derive(Clone, Copy, Debug)]
pub struct QuadResult {
    integral: f64,
    error: f64,
    neval: usize
}

impl QuadResult {
    pub fn integral(&self) -> f64 {
        self.integral
    }

    /// Estimated absolute error.
    pub fn error(&self) -> f64 {
        self.error
    }

    /// Number of integrand evaluations.
    pub fn neval(&self) -> usize {
        self.neval
    }
}

/// Integrates `f` from `a` to `b`.
///
/// The integrand reports its own failures through `VolumeResult`; they are
/// returned unchanged. Reversed bounds give the negated integral.
pub fn quad<F>(mut f: F, a: f64, b: f64, options: &QuadOptions) -> VolumeResult<QuadResult>
where
    F: FnMut(f64) -> VolumeResult<f64>,
{
    adaptive(|x| f(x).map(|value| (value, 0.0)), a, b, options)
}

/// Adaptive bisection over integrand values that may carry their own error.
///
/// Convergence is judged on the combined bound: panel estimates plus the
/// carried errors integrated over each panel.
fn adaptive<F>(mut f: F, a: f64, b: f64, options: &QuadOptions) -> VolumeResult<QuadResult>
where
    F: FnMut(f64) -> VolumeResult<(f64, f64)>,
{
    options.validate()?;
    if !a.is_finite() || !b.is_finite() {
        return Err(VolumeError::InvalidDomain(format!("integration bounds must be finite, got [{}, {}]", a, b)));
    }
    if a == b {
        return Ok(QuadResult { integral: 0.0, error: 0.0, neval: 0 });
    }
    if a > b {
        let reversed = adaptive(f, b, a, options)?;
        return Ok(QuadResult { integral: -reversed.integral, ..reversed });
    }

    let first = Panel::evaluate(&mut f, a, b)?;
    let mut neval = NODES_PER_PANEL;
    let mut total_integral = first.integral();
    let mut total_error = first.error();
    let mut panels = vec![first];
    let mut subdivisions = 0;

    loop {
        let tolerance = options.epsabs.max(options.epsrel * total_integral.abs());
        if total_error <= tolerance {
            return Ok(QuadResult { integral: total_integral, error: total_error, neval });
        }
        if subdivisions >= options.limit {
            return Err(VolumeError::ConvergenceFailure { subdivisions, error: total_error, tolerance });
        }

        let worst = panels
            .iter()
            .enumerate()
            .max_by(|lhs, rhs| lhs.1.error().total_cmp(&rhs.1.error()))
            .map(|(i, _)| i)
            .unwrap_or(0);
        let parent = panels.swap_remove(worst);
        let mid = 0.5 * (parent.lo() + parent.hi());

        let left = Panel::evaluate(&mut f, parent.lo(), mid)?;
        let right = Panel::evaluate(&mut f, mid, parent.hi())?;
        neval += 2 * NODES_PER_PANEL;

        total_integral += left.integral() + right.integral() - parent.integral();
        total_error += left.error() + right.error() - parent.error();
        panels.push(left);
        panels.push(right);
        subdivisions += 1;
    }
}

/// Integrates `f(x, y)` over { a ≤ x ≤ b, g(x) ≤ y ≤ h(x) }.
///
/// Each outer node runs an inner adaptive integral in y. Inner error
/// estimates are integrated over x with the outer weights, so the returned
/// error bounds the whole iterated integral and is held to the same
/// tolerance as the outer integral; a bound that cannot be met within
/// `limit` bisections is a `ConvergenceFailure`.
/// A non-finite `f(x, y)` aborts with `NonFiniteIntegrand`.
pub fn dblquad<F, G, H>(f: F, a: f64, b: f64, g: G, h: H, options: &QuadOptions) -> VolumeResult<QuadResult>
where
    F: Fn(f64, f64) -> f64,
    G: Fn(f64) -> f64,
    H: Fn(f64) -> f64,
{
    options.validate()?;
    // Inner integrals get half the budget, spread over the outer width.
    let inner_options = QuadOptions {
        epsabs: 0.5 * options.epsabs / (b - a).abs().max(1.0),
        epsrel: 0.5 * options.epsrel,
        limit: options.limit,
    };
    let inner_neval = Cell::new(0_usize);

    let outer = adaptive(
        |x| {
            let inner = quad(
                |y| {
                    let z = f(x, y);
                    if z.is_finite() {
                        Ok(z)
                    } else {
                        Err(VolumeError::NonFiniteIntegrand { x, y })
                    }
                },
                g(x),
                h(x),
                &inner_options,
            )?;
            inner_neval.set(inner_neval.get() + inner.neval());
            Ok((inner.integral(), inner.error()))
        },
        a,
        b,
        options,
    )?;

    debug!(error = outer.error(), neval = inner_neval.get(), "dblquad finished");
    Ok(QuadResult { integral: outer.integral(), error: outer.error(), neval: inner_neval.get() })
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{
        E,
        PI
    };

    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_quad_polynomial() {
        let result = quad(|x| Ok(x.powi(4)), 0.0, 1.0, &QuadOptions::default()).unwrap();
        assert_relative_eq!(result.integral(), 0.2, epsilon = 1e-12);
        assert_eq!(result.neval(), 15);
    }

    #[test]
    fn test_quad_trig_and_exp() {
        let result = quad(|x| Ok(x.sin()), 0.0, PI, &QuadOptions::default()).unwrap();
        assert_relative_eq!(result.integral(), 2.0, epsilon = 1e-10);

        let result = quad(|x| Ok(x.exp()), 0.0, 1.0, &QuadOptions::default()).unwrap();
        assert_relative_eq!(result.integral(), E - 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_quad_subdivides_around_kink() {
        let result = quad(|x| Ok((x - 0.3).abs()), 0.0, 1.0, &QuadOptions::default()).unwrap();
        // 0.3²/2 + 0.7²/2
        assert_relative_eq!(result.integral(), 0.29, epsilon = 1e-8);
        assert!(result.neval() > 15);
    }

    #[test]
    fn test_quad_reversed_bounds() {
        let result = quad(|x| Ok(x), 1.0, 0.0, &QuadOptions::default()).unwrap();
        assert_relative_eq!(result.integral(), -0.5, epsilon = 1e-14);
    }

    #[test]
    fn test_quad_convergence_failure_is_distinct() {
        let options = QuadOptions { limit: 2, ..QuadOptions::default() };
        let result = quad(|x| Ok(if x < 0.3 { 0.0 } else { 1.0 }), 0.0, 1.0, &options);
        assert!(matches!(result, Err(VolumeError::ConvergenceFailure { subdivisions: 2, .. })));
    }

    #[test]
    fn test_quad_rejects_zero_limit() {
        let options = QuadOptions { limit: 0, ..QuadOptions::default() };
        let result = quad(|x| Ok(x), 0.0, 1.0, &options);
        assert!(matches!(result, Err(VolumeError::InvalidParameter { parameter: "limit", .. })));
    }

    #[test]
    fn test_dblquad_unit_square() {
        let result = dblquad(|x, y| x * x + y * y, 0.0, 1.0, |_| 0.0, |_| 1.0, &QuadOptions::default()).unwrap();
        assert_relative_eq!(result.integral(), 2.0 / 3.0, epsilon = 1e-13);
        assert!(result.error() > 0.0);
        assert!((result.integral() - 2.0 / 3.0).abs() <= 10.0 * result.error());
    }

    #[test]
    fn test_dblquad_inner_bound_depends_on_outer_variable() {
        // ∫₀¹ ∫₀ˣ (x² + y²) dy dx = ∫₀¹ 4x³/3 dx = 1/3
        let result = dblquad(|x, y| x * x + y * y, 0.0, 1.0, |_| 0.0, |x| x, &QuadOptions::default()).unwrap();
        assert_relative_eq!(result.integral(), 1.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_dblquad_singular_corner_bound_is_honest() {
        // ∫₀¹ ∫₀¹ 1/√(xy) dy dx = 4; inner integrals blow up near x = 0.
        let options = QuadOptions::default();
        let result = dblquad(|x, y| 1.0 / (x * y).sqrt(), 0.0, 1.0, |_| 0.0, |_| 1.0, &options);
        match result {
            Ok(result) => {
                let tolerance = options.epsabs.max(options.epsrel * result.integral().abs());
                assert!(result.error() <= tolerance, "error {} above tolerance {}", result.error(), tolerance);
                assert!((result.integral() - 4.0).abs() <= 10.0 * result.error() + 1e-12);
            },
            Err(error) => assert!(matches!(error, VolumeError::ConvergenceFailure { .. }), "unexpected error: {}", error)
        }
    }

    #[test]
    fn test_dblquad_non_finite_integrand() {
        // x = 0.5 is the centre node of the first outer panel.
        let result = dblquad(|x, _y| 1.0 / (x - 0.5), 0.0, 1.0, |_| 0.0, |_| 1.0, &QuadOptions::default());
        assert!(matches!(result, Err(VolumeError::NonFiniteIntegrand { x, .. }) if x == 0.5));
    }
}
