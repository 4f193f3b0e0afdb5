//! Standalone numeric functions for significance testing.
//!
//! The normal CDF is built on the Abramowitz and Stegun rational
//! approximation to the error function (formula 7.1.26), whose absolute
//! error is bounded by 1.5e-7. Everything that reports a p-value in this
//! workspace goes through [`normal_cdf`].

/// Error function approximation (Abramowitz and Stegun 7.1.26).
///
/// # Examples
/// ```
/// use lotto_stats_core::stats::erf;
///
/// assert!((erf(1.0) - 0.842_700_79).abs() < 2e-7);
/// assert!((erf(-1.0) + 0.842_700_79).abs() < 2e-7);
/// ```
#[must_use]
pub fn erf(x: f64) -> f64 {
    const A1: f64 = 0.254_829_592;
    const A2: f64 = -0.284_496_736;
    const A3: f64 = 1.421_413_741;
    const A4: f64 = -1.453_152_027;
    const A5: f64 = 1.061_405_429;
    const P: f64 = 0.327_591_1;

    if x == 0.0 {
        return 0.0;
    }

    let ax = x.abs();
    let t = 1.0 / (1.0 + P * ax);
    let poly = ((((A5 * t + A4) * t + A3) * t + A2) * t + A1) * t;
    let y = 1.0 - poly * (-ax * ax).exp();

    if x < 0.0 {
        -y
    } else {
        y
    }
}

/// Standard normal cumulative distribution function Φ(z).
///
/// # Examples
/// ```
/// use lotto_stats_core::stats::normal_cdf;
///
/// assert!((normal_cdf(0.0) - 0.5).abs() < 1e-12);
/// assert!((normal_cdf(1.96) - 0.975).abs() < 1e-4);
/// ```
#[must_use]
pub fn normal_cdf(z: f64) -> f64 {
    0.5 * (1.0 + erf(z / std::f64::consts::SQRT_2))
}

/// Two-sided p-value for a standard normal statistic: `2 * (1 - Φ(|z|))`.
#[must_use]
pub fn two_sided_p_value(z: f64) -> f64 {
    (2.0 * (1.0 - normal_cdf(z.abs()))).clamp(0.0, 1.0)
}

/// Calculates the Wilson score confidence interval for a proportion.
///
/// Preferred over the plain normal interval for proportions near 0 or 1,
/// which is where backtest hit rates on a 100-way outcome live.
///
/// # Formula
/// ```text
/// CI = (p + z^2/(2n) +/- z * sqrt(p(1-p)/n + z^2/(4n^2))) / (1 + z^2/n)
/// ```
///
/// # Examples
/// ```
/// use lotto_stats_core::stats::wilson_ci;
///
/// let (lower, upper) = wilson_ci(50, 100, 1.96);
/// assert!(lower > 0.39 && lower < 0.41);
/// assert!(upper > 0.59 && upper < 0.61);
/// ```
#[must_use]
pub fn wilson_ci(successes: usize, n: usize, z: f64) -> (f64, f64) {
    if n == 0 {
        return (0.0, 0.0);
    }

    let n_f = n as f64;
    let p = successes as f64 / n_f;
    let z_sq = z * z;

    let denominator = 1.0 + z_sq / n_f;
    let center = p + z_sq / (2.0 * n_f);

    let variance_term = p * (1.0 - p) / n_f;
    let correction_term = z_sq / (4.0 * n_f * n_f);
    let spread = z * (variance_term + correction_term).sqrt();

    let lower = (center - spread) / denominator;
    let upper = (center + spread) / denominator;

    (lower.max(0.0), upper.min(1.0))
}

/// Two-tailed binomial test of `successes` out of `n` against rate `p0`.
///
/// Uses the normal approximation with continuity correction. For the small
/// baseline rates of a 100-way outcome this is only indicative when
/// `n * p0` is well above 5.
///
/// # Examples
/// ```
/// use lotto_stats_core::stats::binomial_test;
///
/// assert!(binomial_test(55, 100, 0.5) > 0.05);
/// assert!(binomial_test(65, 100, 0.5) < 0.05);
/// ```
#[must_use]
pub fn binomial_test(successes: usize, n: usize, p0: f64) -> f64 {
    if n == 0 {
        return 1.0;
    }

    let n_f = n as f64;
    let k = successes as f64;

    let expected = n_f * p0;
    let std_dev = (n_f * p0 * (1.0 - p0)).sqrt();

    if std_dev < f64::EPSILON {
        if (p0 < f64::EPSILON && successes == 0) || (p0 > 1.0 - f64::EPSILON && successes == n) {
            return 1.0;
        }
        return 0.0;
    }

    let z = (k - expected).abs() - 0.5;
    if z < 0.0 {
        return 1.0;
    }

    two_sided_p_value(z / std_dev)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Reference values of Φ(z) from standard tables (double precision).
    const PHI_TABLE: [(f64, f64); 9] = [
        (-3.0, 0.001_349_898_031_630_094_6),
        (-1.96, 0.024_997_895_148_220_435),
        (-1.0, 0.158_655_253_931_457_05),
        (-0.5, 0.308_537_538_725_986_9),
        (0.0, 0.5),
        (0.5, 0.691_462_461_274_013_1),
        (1.0, 0.841_344_746_068_542_9),
        (1.96, 0.975_002_104_851_779_6),
        (3.0, 0.998_650_101_968_369_9),
    ];

    // ============================================
    // erf / normal_cdf Tests
    // ============================================

    #[test]
    fn normal_cdf_matches_reference_table() {
        for (z, expected) in PHI_TABLE {
            let got = normal_cdf(z);
            assert!(
                (got - expected).abs() < 2e-7,
                "Φ({z}) = {got}, expected {expected}"
            );
        }
    }

    #[test]
    fn normal_cdf_is_symmetric() {
        for z in [0.25, 0.8, 1.5, 2.33, 4.0] {
            let sum = normal_cdf(z) + normal_cdf(-z);
            assert!((sum - 1.0).abs() < 1e-12, "Φ({z}) + Φ(-{z}) = {sum}");
        }
    }

    #[test]
    fn normal_cdf_tails() {
        assert!(normal_cdf(8.0) > 1.0 - 1e-9);
        assert!(normal_cdf(-8.0) < 1e-9);
        assert!(normal_cdf(-8.0) >= 0.0);
    }

    #[test]
    fn erf_is_odd_and_zero_at_origin() {
        assert_eq!(erf(0.0), 0.0);
        for x in [0.1, 0.7, 1.3, 2.2] {
            assert!((erf(x) + erf(-x)).abs() < 1e-15);
        }
    }

    #[test]
    fn erf_matches_known_values() {
        let cases = [
            (0.5, 0.520_499_877_813_046_5),
            (1.0, 0.842_700_792_949_714_9),
            (2.0, 0.995_322_265_018_952_7),
        ];
        for (x, expected) in cases {
            let got = erf(x);
            assert!((got - expected).abs() < 2e-7, "erf({x}) = {got}");
        }
    }

    // ============================================
    // two_sided_p_value Tests
    // ============================================

    #[test]
    fn p_value_at_zero_is_one() {
        assert!((two_sided_p_value(0.0) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn p_value_at_196_is_about_005() {
        let p = two_sided_p_value(1.96);
        assert!((p - 0.05).abs() < 1e-4, "p was {p}");
        assert!((two_sided_p_value(-1.96) - p).abs() < 1e-15);
    }

    #[test]
    fn p_value_stays_in_unit_interval() {
        for z in [-40.0, -5.0, 0.0, 5.0, 40.0] {
            let p = two_sided_p_value(z);
            assert!((0.0..=1.0).contains(&p), "p({z}) = {p}");
        }
    }

    // ============================================
    // wilson_ci Tests
    // ============================================

    #[test]
    fn wilson_ci_zero_samples() {
        assert_eq!(wilson_ci(0, 0, 1.96), (0.0, 0.0));
    }

    #[test]
    fn wilson_ci_zero_successes_has_positive_upper() {
        let (lower, upper) = wilson_ci(0, 40, 1.96);
        assert!(lower.abs() < 1e-12, "lower was {lower}");
        assert!(upper > 0.0 && upper < 0.12, "upper was {upper}");
    }

    #[test]
    fn wilson_ci_brackets_proportion() {
        let (lower, upper) = wilson_ci(4, 40, 1.96);
        assert!(lower < 0.1 && upper > 0.1, "({lower}, {upper})");
    }

    // ============================================
    // binomial_test Tests
    // ============================================

    #[test]
    fn binomial_test_zero_samples() {
        assert!((binomial_test(0, 0, 0.5) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn binomial_test_at_expectation_not_significant() {
        let p = binomial_test(10, 1000, 0.01);
        assert!(p > 0.9, "p-value was {p}");
    }

    #[test]
    fn binomial_test_far_above_baseline_is_significant() {
        let p = binomial_test(40, 1000, 0.01);
        assert!(p < 0.001, "p-value was {p}");
    }
}
