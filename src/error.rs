use std::fmt;

/// Errors produced when building or driving a reservoir.
#[derive(Debug)]
pub enum ReservoirError {
    /// A configuration field or build argument is invalid.
    InvalidConfig(&'static str),

    /// The sampled recurrent matrix has zero spectral radius, so it cannot
    /// be rescaled to the configured one.
    DegenerateReservoir,

    /// A shape invariant was violated (e.g. mismatched feature dimensions).
    ShapeMismatch {
        /// Human-readable context for the mismatch (e.g. "input features").
        what: &'static str,
        /// Observed value.
        got: usize,
        /// Expected value.
        expected: usize,
    },
}

impl fmt::Display for ReservoirError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReservoirError::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
            ReservoirError::DegenerateReservoir => {
                write!(f, "recurrent matrix has zero spectral radius")
            }
            ReservoirError::ShapeMismatch { what, got, expected } => {
                write!(f, "shape mismatch for {what}: got {got}, expected {expected}")
            }
        }
    }
}

impl std::error::Error for ReservoirError {}
