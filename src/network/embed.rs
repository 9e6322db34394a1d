//! Word embeddings augmented with the two entity distance channels.

use ndarray::{s, Array2, Array3, ArrayView2};
use rand::Rng;
use rand_distr::StandardNormal;

use crate::config::DISTANCE_CHANNELS;
use crate::error::{Error, Result};

/// Build the padded `[batch, left + words + right, embedding_size + 2]` tensor.
///
/// Channel `embedding_size` carries the distance to the first entity and
/// channel `embedding_size + 1` the distance to the second one. Padding rows are zero.
pub fn position_aware_embeddings(
    x: ArrayView2<usize>,
    p1: ArrayView2<f32>,
    p2: ArrayView2<f32>,
    embedding: ArrayView2<f32>,
    left_padding: usize,
    right_padding: usize,
) -> Result<Array3<f32>> {
    if p1.dim() != x.dim() || p2.dim() != x.dim() {
        return Err(Error::shape("distance arrays", x.shape(), p1.shape()));
    }
    let (batch_size, words) = x.dim();
    let (rows, embedding_size) = embedding.dim();
    let width = embedding_size + 2 * DISTANCE_CHANNELS;

    let mut e = Array3::<f32>::zeros((batch_size, left_padding + words + right_padding, width));
    for ((b, t), &index) in x.indexed_iter() {
        if index >= rows {
            return Err(Error::EmbeddingIndexOutOfRange { index, rows });
        }
        let mut token = e.slice_mut(s![b, left_padding + t, ..]);
        token
            .slice_mut(s![..embedding_size])
            .assign(&embedding.row(index));
        token[embedding_size] = p1[[b, t]];
        token[embedding_size + DISTANCE_CHANNELS] = p2[[b, t]];
    }
    Ok(e)
}

/// Standard-normal `[vocabulary_words, embedding_size]` table for runs without pretrained vectors.
pub fn random_table<R: Rng>(vocabulary_words: usize, embedding_size: usize, rng: &mut R) -> Array2<f32> {
    Array2::from_shape_simple_fn((vocabulary_words, embedding_size), || {
        rng.sample(StandardNormal)
    })
}
