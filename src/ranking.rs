//! Wilson score interval used to rank photos in the public stream.
//!
//! A photo with `n` votes of which `positives` are thumbs up gets the lower
//! and upper bounds of the Wilson confidence interval of its positive ratio.
//! The stream is ordered by the upper bound, so photos with few votes still
//! surface while they collect feedback.

/// Lower and upper bounds of the Wilson interval, `(0.0, 0.0)` without votes.
pub fn wilson_interval(n: i64, positives: i64, confidence: f64) -> (f64, f64) {
    if n <= 0 {
        return (0.0, 0.0);
    }
    let n = n as f64;
    let positives = positives.clamp(0, n as i64) as f64;

    let alpha = (1.0 - confidence) / 2.0;
    let z = normal_quantile(1.0 - alpha);
    let z2 = z * z;

    let mean = positives / n;
    let factor = 1.0 / (1.0 + z2 / n);
    let centre = mean + z2 / (2.0 * n);
    let spread = z * (mean * (1.0 - mean) / n + z2 / (4.0 * n * n)).sqrt();

    (factor * (centre - spread), factor * (centre + spread))
}

/// Inverse CDF of the standard normal distribution (Acklam's rational
/// approximation, relative error below 1.2e-9).
fn normal_quantile(p: f64) -> f64 {
    const A: [f64; 6] = [
        -3.969683028665376e+01,
        2.209460984245205e+02,
        -2.759285104469687e+02,
        1.383577518672690e+02,
        -3.066479806614716e+01,
        2.506628277459239e+00,
    ];
    const B: [f64; 5] = [
        -5.447609879822406e+01,
        1.615858368580409e+02,
        -1.556989798598866e+02,
        6.680131188771972e+01,
        -1.328068155288572e+01,
    ];
    const C: [f64; 6] = [
        -7.784894002430293e-03,
        -3.223964580411365e-01,
        -2.400758277161838e+00,
        -2.549732539343734e+00,
        4.374664141464968e+00,
        2.938163982698783e+00,
    ];
    const D: [f64; 4] = [
        7.784695709041462e-03,
        3.224671290700398e-01,
        2.445134137142996e+00,
        3.754408661907416e+00,
    ];
    const P_LOW: f64 = 0.02425;

    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }

    if p < P_LOW {
        let q = (-2.0 * p.ln()).sqrt();
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    } else if p <= 1.0 - P_LOW {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        -(((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    }
}
