//! The probe catalogue: every function under test, with its library and
//! platform forms, a textbook rendition, a default sweep domain, and the
//! edge inputs worth singling out.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::classify::STANDARD_PROBES;
use crate::error::ProbeError;
use crate::naive;
use crate::util::linspace;

// One catalogue row. The three fn pointers take the same input so a sweep
// can pair any two of them.
#[derive(Debug, Clone, Copy)]
pub struct FnSpec {
    pub name: &'static str,
    pub description: &'static str,
    // Default sweep range; chosen to keep most outputs finite.
    pub domain: (f64, f64),
    pub library: fn(f64) -> f64,
    pub platform: fn(f64) -> f64,
    pub textbook: fn(f64) -> f64,
    pub edges: &'static [f64],
}

// Overflow sets in past ln(MAX) ~ 709.78, underflow to zero below ~ -745.13.
const EXP_EDGES: &[f64] = &[
    709.0,
    709.782712893384,
    710.0,
    -745.0,
    -745.1332191019411,
    -746.0,
];

const LOG_EDGES: &[f64] = &[
    f64::MIN_POSITIVE,
    0.9999999999999999,
    1.0 + f64::EPSILON,
    10.0,
    f64::MAX,
];

const SQRT_EDGES: &[f64] = &[0.25, 2.0, 4.0, 1e-308, 1e308];

// 9007199254740992 is 2^53, where consecutive doubles start skipping
// integers and argument reduction quality becomes the whole story.
const TRIG_EDGES: &[f64] = &[FRAC_PI_2, PI, -PI, TAU, 1e10, 9007199254740992.0];

pub const CATALOG: &[FnSpec] = &[
    FnSpec {
        name: "exp",
        description: "base-e exponential",
        domain: (-20.0, 20.0),
        library: libm::exp,
        platform: f64::exp,
        textbook: naive::exp_taylor,
        edges: EXP_EDGES,
    },
    FnSpec {
        name: "ln",
        description: "natural logarithm",
        domain: (0.001, 20.0),
        library: libm::log,
        platform: f64::ln,
        textbook: naive::ln_series,
        edges: LOG_EDGES,
    },
    FnSpec {
        name: "log2",
        description: "base-2 logarithm",
        domain: (0.001, 20.0),
        library: libm::log2,
        platform: f64::log2,
        textbook: naive::log2_series,
        edges: LOG_EDGES,
    },
    FnSpec {
        name: "log10",
        description: "base-10 logarithm",
        domain: (0.001, 20.0),
        library: libm::log10,
        platform: f64::log10,
        textbook: naive::log10_series,
        edges: LOG_EDGES,
    },
    FnSpec {
        name: "sqrt",
        description: "square root",
        domain: (0.0, 100.0),
        library: libm::sqrt,
        platform: f64::sqrt,
        textbook: naive::sqrt_newton,
        edges: SQRT_EDGES,
    },
    FnSpec {
        name: "sin",
        description: "sine",
        domain: (-TAU, TAU),
        library: libm::sin,
        platform: f64::sin,
        textbook: naive::sin_taylor,
        edges: TRIG_EDGES,
    },
    FnSpec {
        name: "cos",
        description: "cosine",
        domain: (-TAU, TAU),
        library: libm::cos,
        platform: f64::cos,
        textbook: naive::cos_taylor,
        edges: TRIG_EDGES,
    },
    FnSpec {
        name: "tan",
        description: "tangent",
        domain: (-TAU, TAU),
        library: libm::tan,
        platform: f64::tan,
        textbook: naive::tan_ratio,
        edges: TRIG_EDGES,
    },
];

pub fn lookup(name: &str) -> Result<&'static FnSpec, ProbeError> {
    CATALOG
        .iter()
        .find(|spec| spec.name == name)
        .ok_or_else(|| ProbeError::UnknownFunction(name.to_string()))
}

impl FnSpec {
    // The shared special probes first, then this function's own edges.
    pub fn edge_inputs(&self) -> Vec<f64> {
        let mut inputs = STANDARD_PROBES.to_vec();
        inputs.extend_from_slice(self.edges);
        inputs
    }

    pub fn default_inputs(&self, points: usize) -> Vec<f64> {
        linspace(self.domain.0, self.domain.1, points)
    }
}
