// Round a count ratio to a whole percentage for report display.
// Never round to 0 or 100; those only appear when the ratio is exactly that.
pub fn to_percent(num_part: usize, num_all: usize) -> usize {
    let percent = 100f64 * num_part as f64 / num_all as f64;
    if percent < 1.0 && num_part != 0 {
        1
    } else if percent > 99.0 && num_part != num_all {
        99
    } else {
        percent.round() as usize
    }
}

// Exponent formatting ({:e}) drops the sign of -NAN (it keeps -0.0's), so
// reports patch the sign back in by hand for that one case.
pub fn help_sign(x: f64) -> String {
    if x.is_nan() && x.is_sign_negative() {
        "-".to_string()
    } else {
        "".to_string()
    }
}

// Evenly spaced samples over [start, stop], endpoints included and exact.
// A single-point request yields exactly [start]; zero points yields an
// empty vector, which a sweep then rejects.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let last = (n - 1) as f64;
            (0..n)
                .map(|i| {
                    let t = i as f64 / last;
                    start * (1.0 - t) + stop * t
                })
                .collect()
        }
    }
}
