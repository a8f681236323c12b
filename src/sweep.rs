use rayon::prelude::*;
use serde::Serialize;

use crate::error::ProbeError;
use crate::summary::SweepSummary;
use crate::ulp;

// Chunk length for the parallel driver. Fixed, so chunk boundaries and the
// merge order never depend on the thread count.
const PAR_CHUNK: usize = 4096;

// Drive candidate and reference over every input in order, folding each
// pair into a summary. An empty input sequence is a configuration error,
// and a panicking function propagates: a partial summary would misreport
// points_tested.
pub fn compare_sweep<C, R>(
    candidate: C,
    reference: R,
    inputs: &[f64],
) -> Result<SweepSummary, ProbeError>
where
    C: Fn(f64) -> f64,
    R: Fn(f64) -> f64,
{
    if inputs.is_empty() {
        return Err(ProbeError::EmptySweep);
    }
    let mut summary = SweepSummary::new();
    for &x in inputs {
        summary.record(x, candidate(x), reference(x));
    }
    Ok(summary)
}

// Chunked parallel variant. Chunks are aggregated independently and merged
// left to right in chunk order, so repeated runs are reproducible and the
// counters, maximum, and worst case match the sequential sweep. Only the
// divergence sum can differ from sequential, by summation order.
pub fn compare_sweep_parallel<C, R>(
    candidate: C,
    reference: R,
    inputs: &[f64],
) -> Result<SweepSummary, ProbeError>
where
    C: Fn(f64) -> f64 + Sync,
    R: Fn(f64) -> f64 + Sync,
{
    if inputs.is_empty() {
        return Err(ProbeError::EmptySweep);
    }
    let partials: Vec<SweepSummary> = inputs
        .par_chunks(PAR_CHUNK)
        .map(|chunk| {
            let mut part = SweepSummary::new();
            for &x in chunk {
                part.record(x, candidate(x), reference(x));
            }
            part
        })
        .collect();
    let mut merged = SweepSummary::new();
    for part in partials {
        merged.merge(part);
    }
    Ok(merged)
}

// One evaluated sweep point, for consumers that want the per-point series
// rather than the aggregate: a scatter of divergence against input, say.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Sample {
    pub x: f64,
    pub candidate: f64,
    pub reference: f64,
}

impl Sample {
    // True when the pair would not be scored as divergent: value equality,
    // or a matched non-finite result.
    pub fn agrees(&self) -> bool {
        if self.candidate.is_nan() && self.reference.is_nan() {
            return true;
        }
        if self.candidate.is_infinite()
            && self.reference.is_infinite()
            && self.candidate.is_sign_negative() == self.reference.is_sign_negative()
        {
            return true;
        }
        self.candidate == self.reference
    }

    // Divergence in ulps; zero for agreeing pairs, so exact points sit
    // distinctly on the axis when plotted.
    pub fn divergence(&self) -> f64 {
        if self.agrees() {
            0.0
        } else {
            ulp::ulp_distance(self.candidate, self.reference)
        }
    }
}

// Evaluate both functions at every input, keeping the per-point results.
pub fn sample_sweep<C, R>(candidate: C, reference: R, inputs: &[f64]) -> Vec<Sample>
where
    C: Fn(f64) -> f64,
    R: Fn(f64) -> f64,
{
    inputs
        .iter()
        .map(|&x| Sample {
            x,
            candidate: candidate(x),
            reference: reference(x),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{compare_sweep, compare_sweep_parallel, sample_sweep};
    use crate::error::ProbeError;
    use crate::naive;
    use crate::util::linspace;

    #[test]
    fn self_comparison_is_perfect() {
        let inputs = [-10.0, -5.0, 0.0, 5.0, 10.0];
        let summary = compare_sweep(f64::sin, f64::sin, &inputs).unwrap();
        assert_eq!(summary.points_tested, 5);
        assert_eq!(summary.exact_agreements, 5);
        assert_eq!(summary.total_comparable, 5);
        assert_eq!(summary.max_ulp, 0.0);
        assert!(summary.is_perfect());
        assert!(summary.to_string().contains("perfect agreement"));
    }

    #[test]
    fn small_absolute_offset_near_one() {
        let summary = compare_sweep(|x| x, |x| x + 1e-10, &[1.0]).unwrap();
        assert_eq!(summary.points_tested, 1);
        assert_eq!(summary.total_comparable, 1);
        assert_eq!(summary.exact_agreements, 0);
        assert!(
            summary.max_ulp > 4.4e5 && summary.max_ulp < 4.6e5,
            "max {}",
            summary.max_ulp
        );
        assert_eq!(summary.worst.unwrap().input, 1.0);
        assert_eq!(summary.avg_ulp(), Some(summary.max_ulp));
    }

    #[test]
    fn saturated_exponentials_agree_without_diluting() {
        // exp saturates to infinity past ~709.78; matched infinities agree
        // but carry no accuracy information, so they must not thin out the
        // average with zeros.
        let summary = compare_sweep(f64::exp, f64::exp, &[709.0, 710.0, 711.0]).unwrap();
        assert_eq!(summary.points_tested, 3);
        assert_eq!(summary.nonfinite_agreements, 2);
        assert_eq!(summary.total_comparable, 1);
        assert_eq!(summary.exact_agreements, 1);
        assert!(summary.is_perfect());
    }

    #[test]
    fn empty_inputs_are_rejected() {
        let err = compare_sweep(f64::sqrt, f64::sqrt, &[]).unwrap_err();
        assert_eq!(err, ProbeError::EmptySweep);
        let err = compare_sweep_parallel(f64::sqrt, f64::sqrt, &[]).unwrap_err();
        assert_eq!(err, ProbeError::EmptySweep);
    }

    #[test]
    #[should_panic]
    fn panicking_function_propagates() {
        let _ = compare_sweep(|_| panic!("no result"), |x| x, &[1.0]);
    }

    #[test]
    fn parallel_matches_sequential() {
        // Enough points for several chunks.
        let inputs = linspace(-6.0, 6.0, 10001);
        let seq = compare_sweep(naive::sin_taylor, f64::sin, &inputs).unwrap();
        let par = compare_sweep_parallel(naive::sin_taylor, f64::sin, &inputs).unwrap();
        assert_eq!(par.points_tested, seq.points_tested);
        assert_eq!(par.exact_agreements, seq.exact_agreements);
        assert_eq!(par.nonfinite_agreements, seq.nonfinite_agreements);
        assert_eq!(par.total_comparable, seq.total_comparable);
        assert_eq!(par.max_ulp, seq.max_ulp);
        assert_eq!(
            par.worst.map(|w| w.input),
            seq.worst.map(|w| w.input)
        );
        // The sum is merged in chunk order, so the average may differ from
        // sequential by summation rounding only.
        let (pa, sa) = (par.avg_ulp().unwrap(), seq.avg_ulp().unwrap());
        assert!((pa - sa).abs() <= sa * 1e-9, "par {} seq {}", pa, sa);
    }

    #[test]
    fn samples_flag_agreement() {
        let samples = sample_sweep(f64::sqrt, f64::sqrt, &[-1.0, 0.0, 4.0]);
        assert_eq!(samples.len(), 3);
        // sqrt(-1) is nan on both sides, still an agreeing pair.
        assert!(samples[0].candidate.is_nan());
        assert!(samples.iter().all(|s| s.agrees()));
        assert!(samples.iter().all(|s| s.divergence() == 0.0));

        let diverging = sample_sweep(|_| 1.0, |_| 2.0, &[7.0]);
        assert!(!diverging[0].agrees());
        assert_eq!(diverging[0].divergence(), 1.0 / f64::EPSILON);
    }
}
