//! Textbook renditions of the probed functions: plain series and Newton
//! steps, with just enough argument reduction to stay meaningful across the
//! sweep domains. They exist to be measured against the real thing, not to
//! compete with it.

use std::f64::consts::{LN_10, LN_2, SQRT_2, TAU};

// e^x as 2^n * e^r, splitting x = n ln2 + r with |r| <= ln2 / 2 and summing
// the Maclaurin series at r until terms stop contributing. The reduction
// uses the rounded ln2 directly, so accumulated error grows with |x|; the
// sweeps report exactly that.
pub fn exp_taylor(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x > 710.0 {
        return f64::INFINITY;
    }
    if x < -746.0 {
        return 0.0;
    }
    let n = (x / LN_2).round();
    let r = x - n * LN_2;
    let mut sum = 1.0;
    let mut term = 1.0;
    for k in 1..32 {
        term *= r / k as f64;
        sum += term;
        if term.abs() < sum * f64::EPSILON {
            break;
        }
    }
    sum * 2f64.powi(n as i32)
}

// Natural log by exponent extraction and the Gregory series on
// u = (m - 1) / (m + 1), with the mantissa folded into [sqrt2/2, sqrt2] so
// the series converges in a couple dozen terms.
pub fn ln_series(x: f64) -> f64 {
    if x.is_nan() || x < 0.0 {
        return f64::NAN;
    }
    if x == 0.0 {
        return f64::NEG_INFINITY;
    }
    if x == f64::INFINITY {
        return f64::INFINITY;
    }
    // Subnormals have no usable exponent field; renormalize first.
    let (x, offset) = if x < f64::MIN_POSITIVE {
        (x * 2f64.powi(52), -52)
    } else {
        (x, 0)
    };
    let bits = x.to_bits();
    let mut exponent = ((bits >> 52) & 0x7ff) as i32 - 1023 + offset;
    let mut m = f64::from_bits((bits & 0x000f_ffff_ffff_ffff) | (0x3ffu64 << 52));
    if m > SQRT_2 {
        m *= 0.5;
        exponent += 1;
    }
    let u = (m - 1.0) / (m + 1.0);
    let u2 = u * u;
    let mut sum = 0.0;
    let mut power = u;
    for k in 0..26 {
        let term = power / (2 * k + 1) as f64;
        sum += term;
        if term.abs() < sum.abs() * f64::EPSILON {
            break;
        }
        power *= u2;
    }
    exponent as f64 * LN_2 + 2.0 * sum
}

// log2 and log10 ride on ln_series; the closing division costs a little
// accuracy of its own.
pub fn log2_series(x: f64) -> f64 {
    ln_series(x) / LN_2
}

pub fn log10_series(x: f64) -> f64 {
    ln_series(x) / LN_10
}

// Square root by Newton iteration from a halved-exponent first guess.
pub fn sqrt_newton(x: f64) -> f64 {
    if x.is_nan() || x < 0.0 {
        return f64::NAN;
    }
    if x == 0.0 {
        // sqrt(-0) is -0.
        return x;
    }
    if x == f64::INFINITY {
        return f64::INFINITY;
    }
    let mut g = f64::from_bits((x.to_bits() >> 1) + (0x3ffu64 << 51));
    // The iteration either reaches a fixed point or flips between two
    // adjacent values; the cap covers the slow approach from a subnormal
    // input's poor first guess.
    for _ in 0..64 {
        let next = 0.5 * (g + x / g);
        if next == g {
            break;
        }
        g = next;
    }
    g
}

// Reduce an angle to [-pi, pi] by whole turns. The turn count picks up the
// rounding of tau, so reduction quality decays as |x| grows.
fn reduce_turn(x: f64) -> f64 {
    x - TAU * (x / TAU).round()
}

// sin by reduction to [-pi, pi] and the alternating Maclaurin series,
// summed until terms stop contributing.
pub fn sin_taylor(x: f64) -> f64 {
    if !x.is_finite() {
        return f64::NAN;
    }
    let r = reduce_turn(x);
    let r2 = r * r;
    let mut sum = r;
    let mut term = r;
    for k in 1..26 {
        let k = k as f64;
        term *= -r2 / ((2.0 * k) * (2.0 * k + 1.0));
        sum += term;
        if term.abs() < sum.abs() * f64::EPSILON {
            break;
        }
    }
    sum
}

// cos by the matching even series.
pub fn cos_taylor(x: f64) -> f64 {
    if !x.is_finite() {
        return f64::NAN;
    }
    let r = reduce_turn(x);
    let r2 = r * r;
    let mut sum = 1.0;
    let mut term = 1.0;
    for k in 1..26 {
        let k = k as f64;
        term *= -r2 / ((2.0 * k - 1.0) * (2.0 * k));
        sum += term;
        if term.abs() < sum.abs() * f64::EPSILON {
            break;
        }
    }
    sum
}

// tan as the ratio of the two series.
pub fn tan_ratio(x: f64) -> f64 {
    if !x.is_finite() {
        return f64::NAN;
    }
    sin_taylor(x) / cos_taylor(x)
}

#[cfg(test)]
mod tests {
    use super::{
        cos_taylor, exp_taylor, ln_series, log10_series, log2_series, sin_taylor, sqrt_newton,
        tan_ratio,
    };
    use crate::sweep::compare_sweep;
    use crate::ulp::ulp_distance;
    use crate::util::linspace;
    use float_cmp::approx_eq;
    use std::f64::consts::{E, FRAC_PI_2, FRAC_PI_6};

    #[test]
    fn series_land_near_known_values() {
        assert!(approx_eq!(f64, exp_taylor(1.0), E, ulps = 16));
        assert!(approx_eq!(f64, ln_series(E), 1.0, ulps = 16));
        assert!(approx_eq!(f64, sin_taylor(FRAC_PI_6), 0.5, ulps = 16));
        // cos at pi/2 is all cancellation; only an absolute margin makes sense.
        assert!(approx_eq!(f64, cos_taylor(FRAC_PI_2), 0.0, epsilon = 1e-14));
    }

    #[test]
    fn exp_taylor_specials() {
        assert!(exp_taylor(f64::NAN).is_nan());
        assert_eq!(exp_taylor(f64::INFINITY), f64::INFINITY);
        assert_eq!(exp_taylor(f64::NEG_INFINITY), 0.0);
        assert_eq!(exp_taylor(0.0), 1.0);
        assert_eq!(exp_taylor(800.0), f64::INFINITY);
        assert_eq!(exp_taylor(-800.0), 0.0);
    }

    #[test]
    fn exp_taylor_tracks_the_platform() {
        let inputs = linspace(-20.0, 20.0, 801);
        let summary = compare_sweep(exp_taylor, f64::exp, &inputs).unwrap();
        assert!(summary.max_ulp < 100.0, "max ulp {}", summary.max_ulp);
        // The grid crosses 0, where both sides give exactly 1.
        assert!(summary.exact_agreements > 0);
    }

    #[test]
    fn ln_series_specials() {
        assert!(ln_series(f64::NAN).is_nan());
        assert!(ln_series(-1.0).is_nan());
        assert_eq!(ln_series(0.0), f64::NEG_INFINITY);
        assert_eq!(ln_series(-0.0), f64::NEG_INFINITY);
        assert_eq!(ln_series(f64::INFINITY), f64::INFINITY);
        assert_eq!(ln_series(1.0), 0.0);
    }

    #[test]
    fn ln_series_handles_subnormals() {
        let d = ulp_distance(ln_series(5e-324), f64::ln(5e-324));
        assert!(d < 4.0, "ulp {}", d);
    }

    #[test]
    fn log_family_tracks_the_platform() {
        let inputs = linspace(0.001, 20.0, 400);
        let pairs: [(fn(f64) -> f64, fn(f64) -> f64); 3] = [
            (ln_series, f64::ln),
            (log2_series, f64::log2),
            (log10_series, f64::log10),
        ];
        for (mine, platform) in pairs {
            let summary = compare_sweep(mine, platform, &inputs).unwrap();
            assert!(summary.max_ulp < 1000.0, "max ulp {}", summary.max_ulp);
        }
    }

    #[test]
    fn sqrt_newton_specials() {
        assert!(sqrt_newton(f64::NAN).is_nan());
        assert!(sqrt_newton(-4.0).is_nan());
        assert_eq!(sqrt_newton(f64::INFINITY), f64::INFINITY);
        let negzero = sqrt_newton(-0.0);
        assert_eq!(negzero, 0.0);
        assert!(negzero.is_sign_negative());
        assert_eq!(sqrt_newton(4.0), 2.0);
        assert_eq!(sqrt_newton(1.0), 1.0);
    }

    #[test]
    fn sqrt_newton_converges_across_scales() {
        for &x in &[5e-324, 1e-300, 1e-10, 0.5, 2.0, 3.0, 1e10, 1e300, f64::MAX] {
            let d = ulp_distance(sqrt_newton(x), f64::sqrt(x));
            assert!(d <= 4.0, "x {:e} ulp {}", x, d);
        }
    }

    #[test]
    fn trig_specials() {
        assert!(sin_taylor(f64::NAN).is_nan());
        assert!(sin_taylor(f64::INFINITY).is_nan());
        assert!(cos_taylor(f64::NEG_INFINITY).is_nan());
        assert!(tan_ratio(f64::INFINITY).is_nan());
        assert_eq!(sin_taylor(0.0), 0.0);
        assert_eq!(cos_taylor(0.0), 1.0);
        assert_eq!(tan_ratio(0.0), 0.0);
    }

    #[test]
    fn trig_tracks_the_platform_in_the_core_range() {
        // Inside [-1.5, 1.5] no reduction happens, so the series itself is
        // what gets measured.
        let inputs = linspace(-1.5, 1.5, 301);
        let sin_summary = compare_sweep(sin_taylor, f64::sin, &inputs).unwrap();
        assert!(sin_summary.max_ulp < 50.0, "sin max ulp {}", sin_summary.max_ulp);
        let cos_summary = compare_sweep(cos_taylor, f64::cos, &inputs).unwrap();
        assert!(cos_summary.max_ulp < 50.0, "cos max ulp {}", cos_summary.max_ulp);
    }

    #[test]
    fn tan_matches_sin_over_cos() {
        assert_eq!(tan_ratio(0.5), sin_taylor(0.5) / cos_taylor(0.5));
    }
}
