//! Lexical-window convolution over padded token rows.

use ndarray::{s, Array1, Array2, Array3, ArrayView3};

use crate::error::{Error, Result};

/// One kernel spanning `window_size` consecutive tokens, flattened token by token.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowedConvolver {
    /// `[window_size * embedding_size_p, channels_count]`
    filter: Array2<f32>,
    window_size: usize,
    embedding_size_p: usize,
}

impl WindowedConvolver {
    pub fn new(filter: Array2<f32>, window_size: usize, embedding_size_p: usize) -> Result<Self> {
        let expected = window_size * embedding_size_p;
        if filter.nrows() != expected || window_size == 0 {
            return Err(Error::shape(
                "convolution filter",
                &[expected, filter.ncols()],
                filter.shape(),
            ));
        }
        Ok(Self {
            filter,
            window_size,
            embedding_size_p,
        })
    }

    pub fn channels(&self) -> usize {
        self.filter.ncols()
    }

    pub fn filter(&self) -> &Array2<f32> {
        &self.filter
    }

    /// Slide the kernel with a stride of one token: `[batch, padded, width]` becomes
    /// `[batch, padded - window_size + 1, channels]`.
    pub fn forward(&self, padded: ArrayView3<f32>) -> Result<Array3<f32>> {
        let (batch_size, padded_words, width) = padded.dim();
        if width != self.embedding_size_p || padded_words < self.window_size {
            return Err(Error::shape(
                "padded embeddings",
                &[batch_size, self.window_size, self.embedding_size_p],
                padded.shape(),
            ));
        }
        let positions = padded_words - self.window_size + 1;

        let mut out = Array3::<f32>::zeros((batch_size, positions, self.channels()));
        for b in 0..batch_size {
            for t in 0..positions {
                let line: Array1<f32> = padded
                    .slice(s![b, t..t + self.window_size, ..])
                    .iter()
                    .copied()
                    .collect();
                out.slice_mut(s![b, t, ..]).assign(&line.dot(&self.filter));
            }
        }
        Ok(out)
    }
}
