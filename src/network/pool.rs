//! Global max pooling across word positions.

use ndarray::{Array2, ArrayView3, Axis};

/// Per-channel maximum over all positions of `[batch, words, channels]`, squashed by `tanh`.
pub fn max_pool_tanh(conv: ArrayView3<f32>) -> Array2<f32> {
    conv.map_axis(Axis(1), |lane| {
        lane.fold(f32::NEG_INFINITY, |acc, &value| acc.max(value))
    })
    .mapv(f32::tanh)
}
