//! Linear scoring head, dropout and softmax cross-entropy.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis, Zip};
use rand::Rng;

use crate::error::{Error, Result};
use crate::network::Mode;

/// Affine map from pooled channels to class logits.
#[derive(Debug, Clone, PartialEq)]
pub struct Linear {
    /// `[channels_count, n_out]`
    weights: Array2<f32>,
    bias: Array1<f32>,
}

impl Linear {
    pub fn new(weights: Array2<f32>, bias: Array1<f32>) -> Result<Self> {
        if bias.len() != weights.ncols() {
            return Err(Error::shape("classifier bias", &[weights.ncols()], bias.shape()));
        }
        Ok(Self { weights, bias })
    }

    pub fn weights(&self) -> &Array2<f32> {
        &self.weights
    }

    pub fn bias(&self) -> &Array1<f32> {
        &self.bias
    }

    pub fn forward(&self, g: ArrayView2<f32>) -> Array2<f32> {
        g.dot(&self.weights) + &self.bias
    }
}

/// Inverted dropout driven by an injected random source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dropout {
    keep_prob: f32,
}

impl Dropout {
    pub fn new(keep_prob: f32) -> Result<Self> {
        if !(keep_prob > 0.0 && keep_prob <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "dropout keep probability {keep_prob} is outside (0, 1]"
            )));
        }
        Ok(Self { keep_prob })
    }

    pub fn keep_prob(&self) -> f32 {
        self.keep_prob
    }

    /// Zero each unit with probability `1 - keep_prob` and scale the kept ones by
    /// `1 / keep_prob`; inference passes values through.
    pub fn apply<R: Rng>(&self, x: &Array2<f32>, mode: Mode, rng: &mut R) -> Array2<f32> {
        match mode {
            Mode::Inference => x.clone(),
            Mode::Train => x.mapv(|value| {
                if rng.gen::<f32>() < self.keep_prob {
                    value / self.keep_prob
                } else {
                    0.0
                }
            }),
        }
    }
}

/// Row-wise softmax.
pub fn softmax(logits: ArrayView2<f32>) -> Array2<f32> {
    let mut probs = logits.to_owned();
    for mut row in probs.axis_iter_mut(Axis(0)) {
        let max = row.fold(f32::NEG_INFINITY, |acc, &v| acc.max(v));
        row.mapv_inplace(|v| (v - max).exp());
        let sum = row.sum();
        row.mapv_inplace(|v| v / sum);
    }
    probs
}

/// Index of the largest value per row, the first one on ties.
pub fn argmax(rows: ArrayView2<f32>) -> Array1<usize> {
    rows.map_axis(Axis(1), |row| {
        row.indexed_iter()
            .fold((0, f32::NEG_INFINITY), |(best, best_value), (i, &v)| {
                if v > best_value {
                    (i, v)
                } else {
                    (best, best_value)
                }
            })
            .0
    })
}

/// Cross-entropy of `softmax(logits)` against integer labels, one value per row.
pub fn sparse_softmax_cross_entropy(
    logits: ArrayView2<f32>,
    labels: ArrayView1<usize>,
) -> Result<Array1<f32>> {
    let (rows, n_out) = logits.dim();
    if labels.len() != rows {
        return Err(Error::shape("labels", &[rows], labels.shape()));
    }
    if let Some(&label) = labels.iter().find(|&&label| label >= n_out) {
        return Err(Error::LabelOutOfRange { label, n_out });
    }
    Ok(Zip::from(logits.rows())
        .and(&labels)
        .map_collect(|row, &label| {
            let max = row.fold(f32::NEG_INFINITY, |acc, &v| acc.max(v));
            let log_sum_exp = max + row.mapv(|v| (v - max).exp()).sum().ln();
            log_sum_exp - row[label]
        }))
}
