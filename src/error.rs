use std::fmt;

/// Failures that abort a probe run before any statistics are produced.
///
/// The comparison itself never fails: NaN and infinite results from the
/// functions under test are data, classified by the sweep. Everything here
/// is a configuration mistake on the caller's side.
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeError {
    /// A sweep was requested over an empty input sequence.
    EmptySweep,
    /// A function name with no catalogue entry.
    UnknownFunction(String),
    /// Sweep endpoints that cannot produce ordered samples.
    InvalidRange { start: f64, stop: f64 },
}

impl fmt::Display for ProbeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeError::EmptySweep => {
                write!(f, "sweep over an empty input sequence")
            }
            ProbeError::UnknownFunction(name) => {
                write!(f, "unknown function '{name}'")
            }
            ProbeError::InvalidRange { start, stop } => {
                write!(f, "invalid sweep range [{start}, {stop}]")
            }
        }
    }
}

impl std::error::Error for ProbeError {}

#[cfg(test)]
mod tests {
    use super::ProbeError;

    #[test]
    fn messages_name_the_problem() {
        assert_eq!(
            ProbeError::EmptySweep.to_string(),
            "sweep over an empty input sequence"
        );
        assert_eq!(
            ProbeError::UnknownFunction("cosh".to_string()).to_string(),
            "unknown function 'cosh'"
        );
        let err = ProbeError::InvalidRange {
            start: 2.0,
            stop: 1.0,
        };
        assert_eq!(err.to_string(), "invalid sweep range [2, 1]");
    }

    #[test]
    fn boxes_as_a_standard_error() {
        let boxed: Box<dyn std::error::Error> = Box::new(ProbeError::EmptySweep);
        assert!(boxed.to_string().contains("empty"));
    }
}
