use crate::volumeerror::VolumeResult;

// ─────────────────────────────────────────────────────────────────────────────
// Gauss-Kronrod G7-K15 panel
// ─────────────────────────────────────────────────────────────────────────────

// Kronrod nodes on [-1, 1]; the Gauss nodes sit at the odd indices.
const XGK: [f64; 15] = [
    -0.9914553711208126,
    -0.9491079123427585,
    -0.8648644233597691,
    -0.7415311855993944,
    -0.5860872354676911,
    -0.4058451513773972,
    -0.2077849550078985,
    0.0,
    0.2077849550078985,
    0.4058451513773972,
    0.5860872354676911,
    0.7415311855993944,
    0.8648644233597691,
    0.9491079123427585,
    0.9914553711208126,
];

const WGK: [f64; 15] = [
    0.022935322010529224,
    0.063_092_092_629_978_56,
    0.10479001032225018,
    0.14065325971552592,
    0.169_004_726_639_267_9,
    0.190_350_578_064_785_4,
    0.20443294007529889,
    0.20948214108472782,
    0.20443294007529889,
    0.190_350_578_064_785_4,
    0.169_004_726_639_267_9,
    0.14065325971552592,
    0.10479001032225018,
    0.063_092_092_629_978_56,
    0.022935322010529224,
];

const WG: [f64; 7] = [
    0.129_484_966_168_869_7,
    0.27970539148927664,
    0.381_830_050_505_118_9,
    0.417_959_183_673_469_4,
    0.381_830_050_505_118_9,
    0.27970539148927664,
    0.129_484_966_168_869_7,
];

pub const NODES_PER_PANEL: usize = 15;

/// One G7-K15 evaluation over [lo, hi].
#[derive(Clone, Copy, Debug)]
pub struct Panel {
    lo: f64,
    hi: f64,
    integral: f64,
    error: f64
}

impl Panel {
    /// Integrates `f` over [lo, hi].
    ///
    /// `f` returns a value and the absolute error already carried by that
    /// value (zero for a plain integrand, the inner estimate for an iterated
    /// integral). Carried errors are integrated with the Kronrod weights and
    /// added to the panel's own estimate.
    ///
    /// The panel's own estimate is |K15 - G7| rescaled against the panel's
    /// mean deviation and floored at 50·ε·∫|f|, so an exactly integrated
    /// polynomial still reports a round-off sized bound instead of zero.
    pub fn evaluate<F>(f: &mut F, lo: f64, hi: f64) -> VolumeResult<Panel>
    where
        F: FnMut(f64) -> VolumeResult<(f64, f64)>,
    {
        let mid = 0.5 * (lo + hi);
        let half_width = 0.5 * (hi - lo);
        let abs_half_width = half_width.abs();

        let mut fvals = [0.0; NODES_PER_PANEL];
        let mut carried = 0.0;
        for (i, &node) in XGK.iter().enumerate() {
            let (value, value_error) = f(mid + half_width * node)?;
            fvals[i] = value;
            carried += WGK[i] * value_error.abs();
        }
        carried *= abs_half_width;

        let mut kronrod = 0.0;
        let mut abs_kronrod = 0.0;
        for (&w, &fv) in WGK.iter().zip(fvals.iter()) {
            kronrod += w * fv;
            abs_kronrod += w * fv.abs();
        }

        let mut gauss = 0.0;
        for (i, &w) in WG.iter().enumerate() {
            gauss += w * fvals[2 * i + 1];
        }

        let mean = 0.5 * kronrod;
        let mut deviation = 0.0;
        for (&w, &fv) in WGK.iter().zip(fvals.iter()) {
            deviation += w * (fv - mean).abs();
        }
        deviation *= abs_half_width;
        abs_kronrod *= abs_half_width;

        let mut error = ((kronrod - gauss) * half_width).abs();
        if deviation != 0.0 && error != 0.0 {
            error = deviation * (200.0 * error / deviation).powf(1.5).min(1.0);
        }
        if abs_kronrod > f64::MIN_POSITIVE / (50.0 * f64::EPSILON) {
            error = error.max(50.0 * f64::EPSILON * abs_kronrod);
        }
        error += carried;

        Ok(Panel { lo, hi, integral: kronrod * half_width, error })
    }

    pub fn lo(&self) -> f64 {
        self.lo
    }

    pub fn hi(&self) -> f64 {
        self.hi
    }

    pub fn integral(&self) -> f64 {
        self.integral
    }

    pub fn error(&self) -> f64 {
        self.error
    }
}
