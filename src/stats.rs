//! Numeric helpers shared by the report generators.
//!
//! Besides means, quantiles, and the least-squares line fit, this module
//! carries the two hypothesis tests the reports need (Welch's two-sample
//! t-test and the chi-squared test of independence) together with the
//! special functions backing their p-values: a Lanczos ln-gamma and the
//! regularized incomplete beta / gamma functions.

const MAX_ITER: usize = 200;
const EPS: f64 = 1e-12;
const FPMIN: f64 = 1e-300;

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Unbiased sample variance (ddof = 1) given a pre-computed mean.
/// Returns 0.0 for fewer than two values.
pub fn sample_variance(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64
}

/// Rounds to the nearest multiple of 10, halves away from zero.
pub fn round10(value: f64) -> i64 {
    ((value / 10.0).round() * 10.0) as i64
}

/// Rounds to a fixed number of decimal digits.
pub fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}

/// Linear-interpolation quantile over an ascending-sorted slice.
/// `q` is clamped to [0, 1]. Returns `None` for empty input.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let q = q.clamp(0.0, 1.0);
    let h = (sorted.len() - 1) as f64 * q;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    if lo == hi {
        return Some(sorted[lo]);
    }
    Some(sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo]))
}

/// Degree-1 least-squares fit of `y` on `x`, returning `(slope, intercept)`.
/// `None` when fewer than two points or `x` has zero variance.
pub fn linear_fit(points: &[(f64, f64)]) -> Option<(f64, f64)> {
    if points.len() < 2 {
        return None;
    }
    let n = points.len() as f64;
    let mx = points.iter().map(|(x, _)| x).sum::<f64>() / n;
    let my = points.iter().map(|(_, y)| y).sum::<f64>() / n;

    let sxx: f64 = points.iter().map(|(x, _)| (x - mx).powi(2)).sum();
    if sxx == 0.0 {
        return None;
    }
    let sxy: f64 = points.iter().map(|(x, y)| (x - mx) * (y - my)).sum();

    let slope = sxy / sxx;
    Some((slope, my - slope * mx))
}

/// Welch's two-sample t-test (unequal variances), returning the two-tailed
/// p-value. `None` when either sample has fewer than two values or both
/// standard errors vanish.
pub fn welch_t_test(a: &[f64], b: &[f64]) -> Option<f64> {
    if a.len() < 2 || b.len() < 2 {
        return None;
    }
    let (na, nb) = (a.len() as f64, b.len() as f64);
    let (ma, mb) = (mean(a), mean(b));
    let sa = sample_variance(a, ma) / na;
    let sb = sample_variance(b, mb) / nb;
    let se_sq = sa + sb;
    if se_sq <= 0.0 {
        return None;
    }

    let t = (ma - mb) / se_sq.sqrt();
    // Welch–Satterthwaite degrees of freedom.
    let df = se_sq.powi(2) / (sa * sa / (na - 1.0) + sb * sb / (nb - 1.0));

    // Two-tailed p via the t-distribution survival function:
    // p = I_x(df/2, 1/2) with x = df / (df + t^2).
    let x = df / (df + t * t);
    Some(reg_inc_beta(df / 2.0, 0.5, x))
}

/// Chi-squared test of independence over a count matrix, returning the
/// p-value. Rows and columns with zero marginal totals are excluded before
/// computing expectations; `None` when fewer than two informative rows or
/// columns remain.
pub fn chi_squared_test(matrix: &[Vec<u64>]) -> Option<f64> {
    let n_cols = matrix.first()?.len();
    let row_totals: Vec<u64> = matrix.iter().map(|r| r.iter().sum()).collect();
    let col_totals: Vec<u64> = (0..n_cols)
        .map(|j| matrix.iter().map(|r| r[j]).sum())
        .collect();
    let grand: u64 = row_totals.iter().sum();
    if grand == 0 {
        return None;
    }

    let rows: Vec<usize> = (0..matrix.len()).filter(|&i| row_totals[i] > 0).collect();
    let cols: Vec<usize> = (0..n_cols).filter(|&j| col_totals[j] > 0).collect();
    if rows.len() < 2 || cols.len() < 2 {
        return None;
    }

    let grand = grand as f64;
    let mut chi2 = 0.0;
    for &i in &rows {
        for &j in &cols {
            let expected = row_totals[i] as f64 * col_totals[j] as f64 / grand;
            let observed = matrix[i][j] as f64;
            chi2 += (observed - expected).powi(2) / expected;
        }
    }

    let df = (rows.len() - 1) as f64 * (cols.len() - 1) as f64;
    Some(reg_gamma_q(df / 2.0, chi2 / 2.0))
}

/// Lanczos approximation of ln(Gamma(x)) (g = 7, n = 9 coefficients).
fn ln_gamma(x: f64) -> f64 {
    const COEFFS: [f64; 9] = [
        0.999_999_999_999_809_9,
        676.520_368_121_885_1,
        -1_259.139_216_722_402_8,
        771.323_428_777_653_1,
        -176.615_029_162_140_6,
        12.507_343_278_686_905,
        -0.138_571_095_265_720_12,
        9.984_369_578_019_572e-6,
        1.505_632_735_149_311_6e-7,
    ];
    const G: f64 = 7.0;

    if x <= 0.0 {
        return f64::INFINITY;
    }
    if x < 0.5 {
        // Reflection formula.
        let sin_val = (std::f64::consts::PI * x).sin();
        if sin_val.abs() < FPMIN {
            return f64::INFINITY;
        }
        return std::f64::consts::PI.ln() - sin_val.abs().ln() - ln_gamma(1.0 - x);
    }

    let z = x - 1.0;
    let mut sum = COEFFS[0];
    for (i, &c) in COEFFS[1..].iter().enumerate() {
        sum += c / (z + i as f64 + 1.0);
    }
    let t = z + G + 0.5;
    (z + 0.5) * t.ln() + 0.5 * (2.0 * std::f64::consts::PI).ln() - t + sum.ln()
}

/// Regularized incomplete beta function I_x(a, b).
fn reg_inc_beta(a: f64, b: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    let ln_front =
        ln_gamma(a + b) - ln_gamma(a) - ln_gamma(b) + a * x.ln() + b * (1.0 - x).ln();
    let front = ln_front.exp();

    // Continued fraction converges fastest below the symmetry point.
    if x < (a + 1.0) / (a + b + 2.0) {
        front * beta_cf(a, b, x) / a
    } else {
        1.0 - front * beta_cf(b, a, 1.0 - x) / b
    }
}

/// Continued fraction for the incomplete beta function (modified Lentz).
fn beta_cf(a: f64, b: f64, x: f64) -> f64 {
    let qab = a + b;
    let qap = a + 1.0;
    let qam = a - 1.0;

    let mut c = 1.0;
    let mut d = 1.0 - qab * x / qap;
    if d.abs() < FPMIN {
        d = FPMIN;
    }
    d = 1.0 / d;
    let mut h = d;

    for m in 1..=MAX_ITER {
        let m = m as f64;
        let m2 = 2.0 * m;

        let aa = m * (b - m) * x / ((qam + m2) * (a + m2));
        d = 1.0 + aa * d;
        if d.abs() < FPMIN {
            d = FPMIN;
        }
        c = 1.0 + aa / c;
        if c.abs() < FPMIN {
            c = FPMIN;
        }
        d = 1.0 / d;
        h *= d * c;

        let aa = -(a + m) * (qab + m) * x / ((a + m2) * (qap + m2));
        d = 1.0 + aa * d;
        if d.abs() < FPMIN {
            d = FPMIN;
        }
        c = 1.0 + aa / c;
        if c.abs() < FPMIN {
            c = FPMIN;
        }
        d = 1.0 / d;
        let del = d * c;
        h *= del;

        if (del - 1.0).abs() < EPS {
            break;
        }
    }
    h
}

/// Regularized upper incomplete gamma function Q(a, x).
fn reg_gamma_q(a: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 1.0;
    }
    if x < a + 1.0 {
        1.0 - gamma_p_series(a, x)
    } else {
        gamma_q_cf(a, x)
    }
}

/// Series expansion for the regularized lower incomplete gamma P(a, x).
fn gamma_p_series(a: f64, x: f64) -> f64 {
    let mut ap = a;
    let mut sum = 1.0 / a;
    let mut del = sum;
    for _ in 0..MAX_ITER {
        ap += 1.0;
        del *= x / ap;
        sum += del;
        if del.abs() < sum.abs() * EPS {
            break;
        }
    }
    sum * (-x + a * x.ln() - ln_gamma(a)).exp()
}

/// Continued fraction for the regularized upper incomplete gamma Q(a, x)
/// (modified Lentz).
fn gamma_q_cf(a: f64, x: f64) -> f64 {
    let mut b = x + 1.0 - a;
    let mut c = 1.0 / FPMIN;
    let mut d = 1.0 / b;
    let mut h = d;

    for i in 1..=MAX_ITER {
        let an = -(i as f64) * (i as f64 - a);
        b += 2.0;
        d = an * d + b;
        if d.abs() < FPMIN {
            d = FPMIN;
        }
        c = b + an / c;
        if c.abs() < FPMIN {
            c = FPMIN;
        }
        d = 1.0 / d;
        let del = d * c;
        h *= del;
        if (del - 1.0).abs() < EPS {
            break;
        }
    }
    (-x + a * x.ln() - ln_gamma(a)).exp() * h
}
