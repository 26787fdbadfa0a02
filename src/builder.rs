use log::debug;
use ndarray::{Array1, Array2};
use ndarray_rand::rand_distr::{Normal, StandardNormal};
use ndarray_rand::RandomExt;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{ReservoirConfig, DEFAULT_SEED};
use crate::spectral::spectral_radius;
use crate::ReservoirError;

/// The three fixed weight artifacts of a built reservoir.
///
/// Immutable after construction; a single instance can back any number of
/// concurrent forward passes without locking.
#[derive(Debug, Clone, PartialEq)]
pub struct ReservoirArtifacts {
    input_weights: Array2<f32>,
    recurrent_weights: Array2<f32>,
    leak: Array1<f32>,
}

impl ReservoirArtifacts {
    pub(crate) fn new(
        input_weights: Array2<f32>,
        recurrent_weights: Array2<f32>,
        leak: Array1<f32>,
    ) -> Self {
        Self {
            input_weights,
            recurrent_weights,
            leak,
        }
    }

    /// Dense input weight matrix of shape `(input_dim, units)`.
    pub fn input_weights(&self) -> &Array2<f32> {
        &self.input_weights
    }

    /// Sparse-by-construction recurrent weight matrix of shape
    /// `(units, units)`, rescaled to the configured spectral radius.
    pub fn recurrent_weights(&self) -> &Array2<f32> {
        &self.recurrent_weights
    }

    /// Per-neuron leak rates, length `units`.
    pub fn leak(&self) -> &Array1<f32> {
        &self.leak
    }

    /// Input feature dimension the reservoir was built for.
    pub fn input_dim(&self) -> usize {
        self.input_weights.nrows()
    }

    /// Number of reservoir neurons.
    pub fn units(&self) -> usize {
        self.leak.len()
    }
}

/// Builds the reservoir artifacts for `config` and an observed input
/// feature dimension.
///
/// A single seeded generator is consumed in a fixed order (input weights,
/// sparsity mask, raw recurrent values), so the same seed, configuration
/// and `input_dim` always reproduce the same artifacts bit for bit. An
/// explicit `seed` overrides `config.seed`; with neither, [`DEFAULT_SEED`]
/// keeps construction reproducible.
///
/// # Errors
/// - `InvalidConfig` if a configuration field or `input_dim` is out of
///   range. Validation runs before any sampling.
/// - `DegenerateReservoir` if the sparsity draw leaves the recurrent
///   matrix with zero spectral radius, which makes rescaling impossible.
pub fn build(
    config: &ReservoirConfig,
    input_dim: usize,
    seed: Option<u64>,
) -> Result<ReservoirArtifacts, ReservoirError> {
    config.validate()?;
    if input_dim == 0 {
        return Err(ReservoirError::InvalidConfig("input_dim must be positive"));
    }

    let units = config.units;
    let mut rng = StdRng::seed_from_u64(seed.or(config.seed).unwrap_or(DEFAULT_SEED));

    let input_dist = Normal::new(0.0, config.input_scale)
        .map_err(|_| ReservoirError::InvalidConfig("input_scale must be positive and finite"))?;
    let input_weights = Array2::random_using((input_dim, units), input_dist, &mut rng);

    // Bernoulli(p) mask from uniform draws, then a standard-normal fill of
    // the surviving connections.
    let mask = Array2::from_shape_fn((units, units), |_| {
        if rng.random::<f32>() < config.sparsity {
            1.0
        } else {
            0.0
        }
    });
    let noise: Array2<f32> = Array2::random_using((units, units), StandardNormal, &mut rng);
    let mut recurrent_weights = noise * &mask;

    let radius = spectral_radius(recurrent_weights.view());
    if !(radius > 0.0) {
        return Err(ReservoirError::DegenerateReservoir);
    }
    recurrent_weights *= config.spectral_radius / radius;

    debug!(
        "built {units}-unit reservoir: mask density {:.4}, raw spectral radius {radius:.6}",
        mask.sum() / (units * units) as f32
    );

    let repeats = units / config.leak_rates.len();
    let leak = Array1::from_iter(
        config
            .leak_rates
            .iter()
            .flat_map(|&l| std::iter::repeat_n(l, repeats)),
    );

    Ok(ReservoirArtifacts::new(input_weights, recurrent_weights, leak))
}
