//! Fixed multi-scale echo state reservoir: sparse random recurrent
//! weights rescaled to a target spectral radius, per-neuron leak rates,
//! and a batched leaky-integrator recurrence over input sequences.
//!
//! None of the weights are trained. [`build`] turns a [`ReservoirConfig`]
//! into three immutable weight artifacts; [`forward`] consumes a
//! `(batch, time, features)` input and returns the final hidden state per
//! sequence. A readout consuming that state lives outside this crate.

mod builder;
mod config;
mod error;
mod recurrence;
mod spectral;

pub use builder::{build, ReservoirArtifacts};
pub use config::{ReservoirConfig, DEFAULT_SEED};
pub use error::ReservoirError;
pub use recurrence::{forward, step};
