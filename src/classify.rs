use serde::Serialize;

// The smallest positive value a double can hold, 2^-1074.
pub const MIN_SUBNORMAL: f64 = f64::from_bits(1);

// Inputs every probed function is exercised at before its own boundary
// constants: the zeros, the units, the non-finite values, and the
// representation extremes.
pub const STANDARD_PROBES: [f64; 10] = [
    0.0,
    -0.0,
    1.0,
    -1.0,
    f64::NAN,
    f64::INFINITY,
    f64::NEG_INFINITY,
    MIN_SUBNORMAL,
    f64::MIN_POSITIVE,
    f64::MAX,
];

// The outcome of probing a function at one input, with special results
// flagged so report tables can call them out.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Classified {
    pub result: f64,
    pub special: bool,
}

// Evaluate f at x, flagging nan, infinite, and signed-zero results.
pub fn classify<F: Fn(f64) -> f64>(x: f64, f: F) -> Classified {
    let result = f(x);
    let special = result.is_nan() || result.is_infinite() || result == 0.0;
    Classified { result, special }
}
