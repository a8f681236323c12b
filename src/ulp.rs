// Epsilon-scaled divergence between two doubles, in units in the last place.
// Cases are checked in order:
//   equal values (IEEE ==, so +0 == -0 and never NAN == NAN): 0
//   either nan: nan (no defined distance)
//   either infinite: infinity (equal infinities were caught by the == case)
//   a == 0: |b| against half an epsilon step, since relative scaling is
//           undefined at zero
//   otherwise: |a - b| relative to a's magnitude, in epsilon steps
// The general case divides by |a| alone, so the measure is not symmetric in
// its arguments. That asymmetry is part of the contract; sweeps pass the
// candidate value first.
pub fn ulp_distance(a: f64, b: f64) -> f64 {
    if a == b {
        return 0.0;
    }
    if a.is_nan() || b.is_nan() {
        return f64::NAN;
    }
    if a.is_infinite() || b.is_infinite() {
        return f64::INFINITY;
    }
    if a == 0.0 {
        return b.abs() / (f64::EPSILON / 2.0);
    }
    (a - b).abs() / (a.abs() * f64::EPSILON)
}

// Map a double's bit pattern to a signed rank that increases monotonically
// along the real line, so subtracting two ranks counts the representable
// values between them. Negative patterns order backwards and get flipped;
// -0.0 lands on rank 0, next to +0.0.
fn bit_rank(x: f64) -> i64 {
    let bits = x.to_bits() as i64;
    if bits < 0 {
        i64::MIN - bits
    } else {
        bits
    }
}

// Count of representable doubles between two values, as f64 to leave room
// for the sentinel cases: a nan on one side only has no defined distance,
// two nans count as equal, and a finite value against an infinity is
// infinitely far. Ranks are subtracted in i128 since opposite-sign values
// can sit a full i64 range apart.
pub fn bit_ulps(a: f64, b: f64) -> f64 {
    if a.is_nan() != b.is_nan() {
        f64::NAN
    } else if a.is_nan() {
        0.0
    } else if a.is_finite() != b.is_finite() {
        f64::INFINITY
    } else {
        (bit_rank(a) as i128 - bit_rank(b) as i128).unsigned_abs() as f64
    }
}
