use log::trace;
use ndarray::{Array2, ArrayView2, ArrayView3, Axis, Zip};

use crate::builder::ReservoirArtifacts;
use crate::ReservoirError;

/// Advances the hidden state by one time step.
///
/// Pure leaky-integrator transition
/// `h' = (1 - leak) * h + leak * tanh(x_t . W_in + h . W_res)`,
/// with the leak vector broadcast across the batch dimension. `tanh`
/// bounds every pre-activation to (-1, 1), which together with the
/// spectral-radius rescaling keeps arbitrarily long runs stable.
pub fn step(
    artifacts: &ReservoirArtifacts,
    h: &Array2<f32>,
    x_t: ArrayView2<f32>,
) -> Array2<f32> {
    let mut pre = x_t.dot(artifacts.input_weights());
    pre += &h.dot(artifacts.recurrent_weights());

    let mut next = Array2::zeros(h.raw_dim());
    Zip::from(&mut next)
        .and(h)
        .and(&pre)
        .and_broadcast(artifacts.leak())
        .for_each(|next, &h, &pre, &leak| *next = (1.0 - leak) * h + leak * pre.tanh());
    next
}

/// Runs the recurrence over a batch of sequences and returns the final
/// hidden state per sequence.
///
/// `inputs` is shaped `(batch, time, features)`. The state starts at zero
/// and only its value after the last time step is returned; intermediate
/// states are not retained. `time == 0` yields the zero state and
/// `batch == 0` an empty one, neither is an error.
///
/// # Errors
/// Returns `ReservoirError::ShapeMismatch` when `features` differs from
/// the input dimension the artifacts were built for.
pub fn forward(
    artifacts: &ReservoirArtifacts,
    inputs: ArrayView3<f32>,
) -> Result<Array2<f32>, ReservoirError> {
    let (batch, time, features) = inputs.dim();
    if features != artifacts.input_dim() {
        return Err(ReservoirError::ShapeMismatch {
            what: "input features",
            got: features,
            expected: artifacts.input_dim(),
        });
    }

    trace!(
        "forward pass: batch {batch}, time {time}, units {}",
        artifacts.units()
    );

    // Step t consumes the state produced by step t-1; the time loop is an
    // irreducible serial dependency.
    let mut h = Array2::zeros((batch, artifacts.units()));
    for t in 0..time {
        h = step(artifacts, &h, inputs.index_axis(Axis(1), t));
    }
    Ok(h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array3};

    fn hand_built_artifacts() -> ReservoirArtifacts {
        ReservoirArtifacts::new(
            array![[0.5, -0.25]],
            array![[0.1, 0.0], [0.0, 0.2]],
            array![1.0, 0.5],
        )
    }

    #[test]
    fn step_matches_a_hand_computed_transition() {
        let artifacts = hand_built_artifacts();
        let h = array![[0.2_f32, -0.4]];
        let x_t = array![[2.0_f32]];

        let next = step(&artifacts, &h, x_t.view());

        // pre = [2*0.5 + 0.2*0.1, 2*(-0.25) + (-0.4)*0.2]
        let pre = [1.02_f32, -0.58];
        let expected = [pre[0].tanh(), 0.5 * -0.4 + 0.5 * pre[1].tanh()];
        assert!((next[[0, 0]] - expected[0]).abs() < 1e-6);
        assert!((next[[0, 1]] - expected[1]).abs() < 1e-6);
    }

    #[test]
    fn step_does_not_touch_the_previous_state() {
        let artifacts = hand_built_artifacts();
        let h = array![[0.2_f32, -0.4]];
        let _ = step(&artifacts, &h, array![[2.0_f32]].view());
        assert_eq!(h, array![[0.2_f32, -0.4]]);
    }

    #[test]
    fn forward_chains_single_steps() {
        let artifacts = hand_built_artifacts();
        let inputs = Array3::from_shape_vec((1, 3, 1), vec![0.3_f32, -1.0, 0.7]).unwrap();

        let mut h = Array2::zeros((1, 2));
        for t in 0..3 {
            h = step(&artifacts, &h, inputs.index_axis(Axis(1), t));
        }

        let out = forward(&artifacts, inputs.view()).unwrap();
        assert_eq!(out, h);
    }

    #[test]
    fn mismatched_features_are_rejected() {
        let artifacts = hand_built_artifacts();
        let inputs = Array3::<f32>::zeros((2, 4, 3));
        assert!(matches!(
            forward(&artifacts, inputs.view()),
            Err(ReservoirError::ShapeMismatch {
                got: 3,
                expected: 1,
                ..
            })
        ));
    }
}
