use serde::{Deserialize, Serialize};

use crate::ReservoirError;

/// Seed used when neither the configuration nor the build call provides one.
pub const DEFAULT_SEED: u64 = 1234;

/// Hyperparameters of a multi-scale echo state reservoir.
///
/// The reservoir is fixed: none of the weights derived from this
/// configuration are ever trained. Heterogeneous leak rates give the
/// neuron groups different effective time scales, which is what makes the
/// reservoir "multi-scale".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservoirConfig {
    /// Number of reservoir neurons. Must be divisible by the number of
    /// leak-rate groups.
    pub units: usize,

    /// Target spectral radius of the recurrent weight matrix. Keeping it
    /// near or below 1 is what bounds the autonomous dynamics.
    pub spectral_radius: f32,

    /// Leak rate per neuron group, each in (0, 1]. Rates near 1 follow the
    /// input almost step by step, low rates integrate over long histories.
    pub leak_rates: Vec<f32>,

    /// Connection probability within the reservoir.
    pub sparsity: f32,

    /// Standard deviation of the input weight distribution.
    pub input_scale: f32,

    /// Optional seed for reproducible construction.
    pub seed: Option<u64>,
}

impl ReservoirConfig {
    /// Creates a configuration with `units` neurons and reference defaults
    /// for everything else.
    pub fn new(units: usize) -> Self {
        Self {
            units,
            spectral_radius: 1.2,
            leak_rates: vec![0.9, 1.0, 0.5, 0.1, 0.06],
            sparsity: 0.1,
            input_scale: 0.1,
            seed: None,
        }
    }

    /// Checks every field against its admissible range.
    ///
    /// Runs before any sampling, so a rejected configuration never consumes
    /// randomness.
    ///
    /// # Errors
    /// Returns `ReservoirError::InvalidConfig` for the first violated
    /// constraint.
    pub fn validate(&self) -> Result<(), ReservoirError> {
        if self.units == 0 {
            return Err(ReservoirError::InvalidConfig("units must be positive"));
        }
        if self.leak_rates.is_empty() {
            return Err(ReservoirError::InvalidConfig("leak_rates must not be empty"));
        }
        if self.units % self.leak_rates.len() != 0 {
            return Err(ReservoirError::InvalidConfig(
                "units must be divisible by the number of leak-rate groups",
            ));
        }
        if self.leak_rates.iter().any(|&l| !(l > 0.0 && l <= 1.0)) {
            return Err(ReservoirError::InvalidConfig("leak rates must lie in (0, 1]"));
        }
        if !(self.spectral_radius > 0.0 && self.spectral_radius.is_finite()) {
            return Err(ReservoirError::InvalidConfig(
                "spectral_radius must be positive and finite",
            ));
        }
        if !(self.sparsity > 0.0 && self.sparsity < 1.0) {
            return Err(ReservoirError::InvalidConfig("sparsity must lie in (0, 1)"));
        }
        if !(self.input_scale > 0.0 && self.input_scale.is_finite()) {
            return Err(ReservoirError::InvalidConfig(
                "input_scale must be positive and finite",
            ));
        }
        Ok(())
    }
}
