//! Accuracy probes for elementary math functions. A sweep evaluates a
//! candidate and a reference implementation over the same inputs and
//! summarizes how far apart they land, measured in units in the last place.

mod error;
mod histogram;
mod summary;
mod util;

pub mod classify;
pub mod naive;
pub mod registry;
pub mod sweep;
pub mod ulp;

pub use crate::error::ProbeError;
pub use crate::histogram::UlpHistogram;
pub use crate::summary::{SweepSummary, WorstCase};
pub use crate::sweep::{compare_sweep, compare_sweep_parallel, sample_sweep, Sample};
pub use crate::util::{help_sign, linspace};

// PLEASE NOTE that this function is more likely than
// average to experience breaking changes or
// to be dropped in future releases.
// Run one sweep, log its summary, and assert the worst divergence stays
// inside an inclusive ulp allowance. A call to this function can be thought
// of as a sweep-shaped variation on the approx crate's:
// assert_approx_eq!(x, y, allow_diff)
pub fn assert_sweep_within<C, R>(
    name: &str,
    candidate: C,
    reference: R,
    inputs: &[f64],
    allow_ulps: f64,
) -> SweepSummary
where
    C: Fn(f64) -> f64,
    R: Fn(f64) -> f64,
{
    let summary = match sweep::compare_sweep(candidate, reference, inputs) {
        Ok(summary) => summary,
        Err(err) => panic!("assert failed {}: {}", name, err),
    };
    println!("{}: {}", name, summary);
    assert!(
        summary.max_ulp <= allow_ulps,
        "assert failed {}: max {:e} ulp outside inclusive {:e}",
        name,
        summary.max_ulp,
        allow_ulps
    );
    summary
}
