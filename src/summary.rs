use serde::Serialize;
use std::fmt::Display;

use crate::histogram::UlpHistogram;
use crate::ulp;
use crate::util;

// Exponent buckets shown on the spread line of a report.
const SPREAD_BUCKETS: usize = 5;

// The sample achieving the largest finite divergence in a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WorstCase {
    pub input: f64,
    pub candidate: f64,
    pub reference: f64,
}

// Accumulated agreement statistics for one candidate/reference pair over
// one input sweep. Built once per sweep and read-only afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct SweepSummary {
    // Samples evaluated.
    pub points_tested: usize,

    // Value-equal results under IEEE comparison, signed zeros included.
    pub exact_agreements: usize,

    // Pairs agreeing as non-finite: both nan, or infinities of equal sign.
    // Reported as agreement but carrying no accuracy information, so they
    // stay out of total_comparable.
    pub nonfinite_agreements: usize,

    // Samples eligible for divergence scoring.
    pub total_comparable: usize,

    // Sum of the finite divergences, feeding avg_ulp.
    ulp_sum: f64,

    // Largest finite divergence seen.
    pub max_ulp: f64,

    // The sample behind max_ulp, present once any finite divergence is seen.
    pub worst: Option<WorstCase>,

    // Order-of-magnitude spread of divergences over comparable samples.
    pub histogram: UlpHistogram,
}

impl SweepSummary {
    pub(crate) fn new() -> Self {
        SweepSummary {
            points_tested: 0,
            exact_agreements: 0,
            nonfinite_agreements: 0,
            total_comparable: 0,
            ulp_sum: 0.0,
            max_ulp: 0.0,
            worst: None,
            histogram: UlpHistogram::new(SPREAD_BUCKETS),
        }
    }

    // Fold in one sample. Classification order matters: matched non-finite
    // pairs first (equal infinities would otherwise count as value-equal),
    // then value equality, then scored divergence. Only finite distances
    // enter the sum and the worst-case ranking; strict greater-than keeps
    // the first-encountered maximum on ties.
    pub(crate) fn record(&mut self, x: f64, cv: f64, rv: f64) {
        self.points_tested += 1;
        if cv.is_nan() && rv.is_nan() {
            self.nonfinite_agreements += 1;
            return;
        }
        if cv.is_infinite()
            && rv.is_infinite()
            && cv.is_sign_negative() == rv.is_sign_negative()
        {
            self.nonfinite_agreements += 1;
            return;
        }
        self.total_comparable += 1;
        if cv == rv {
            self.exact_agreements += 1;
            self.histogram.record(0.0);
            return;
        }
        let d = ulp::ulp_distance(cv, rv);
        self.histogram.record(d);
        if d.is_finite() {
            self.ulp_sum += d;
            if d > self.max_ulp {
                self.max_ulp = d;
                self.worst = Some(WorstCase {
                    input: x,
                    candidate: cv,
                    reference: rv,
                });
            }
        }
    }

    // Fold a later chunk's summary into this one. Counters and the maximum
    // merge exactly; on a tied maximum the earlier chunk keeps the worst
    // case, matching the first-encountered rule of sequential sweeps.
    pub(crate) fn merge(&mut self, other: SweepSummary) {
        self.points_tested += other.points_tested;
        self.exact_agreements += other.exact_agreements;
        self.nonfinite_agreements += other.nonfinite_agreements;
        self.total_comparable += other.total_comparable;
        self.ulp_sum += other.ulp_sum;
        if other.max_ulp > self.max_ulp {
            self.max_ulp = other.max_ulp;
            self.worst = other.worst;
        }
        self.histogram.merge(&other.histogram);
    }

    // Mean divergence over divergent-but-comparable samples. None when every
    // comparable sample agreed exactly, which reports as perfect agreement
    // rather than a zero-denominator average.
    pub fn avg_ulp(&self) -> Option<f64> {
        let divergent = self.total_comparable - self.exact_agreements;
        if divergent == 0 {
            None
        } else {
            Some(self.ulp_sum / divergent as f64)
        }
    }

    // True when every comparable sample agreed exactly.
    pub fn is_perfect(&self) -> bool {
        self.total_comparable == self.exact_agreements
    }
}

impl Display for SweepSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let agreed = self.exact_agreements + self.nonfinite_agreements;
        write!(
            f,
            "points {}, agreed {}%",
            self.points_tested,
            util::to_percent(agreed, self.points_tested)
        )?;
        if self.nonfinite_agreements > 0 {
            write!(f, " ({} as matched non-finite)", self.nonfinite_agreements)?;
        }
        if self.is_perfect() {
            return write!(f, ", perfect agreement");
        }
        if let Some(worst) = &self.worst {
            write!(
                f,
                ", max {:e} ulp at {}{:e} ({}{:e} vs {}{:e}, {:e} bit ulps)",
                self.max_ulp,
                util::help_sign(worst.input),
                worst.input,
                util::help_sign(worst.candidate),
                worst.candidate,
                util::help_sign(worst.reference),
                worst.reference,
                ulp::bit_ulps(worst.candidate, worst.reference),
            )?;
        } else {
            write!(f, ", no finite divergence to rank")?;
        }
        if let Some(avg) = self.avg_ulp() {
            write!(f, ", avg {:e} ulp", avg)?;
        }
        write!(f, ", spread {}", self.histogram)
    }
}
