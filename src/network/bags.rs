//! Positional grouping of batch rows into bags and the bag-max reduction.

use std::ops::Range;

use ndarray::{s, Array1, ArrayView1};

use crate::config::ModelConfig;
use crate::error::{Error, Result};

/// Bag `k` owns batch rows `[k * bag_size, (k + 1) * bag_size)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BagLayout {
    bags_per_batch: usize,
    bag_size: usize,
}

impl BagLayout {
    pub fn new(bags_per_batch: usize, bag_size: usize) -> Self {
        Self {
            bags_per_batch,
            bag_size,
        }
    }

    /// Layout covering `samples` rows, which must split into whole bags.
    pub fn for_samples(samples: usize, bag_size: usize) -> Result<Self> {
        if bag_size == 0 || samples % bag_size != 0 {
            return Err(Error::RaggedBags { samples, bag_size });
        }
        Ok(Self::new(samples / bag_size, bag_size))
    }

    pub fn bags_per_batch(&self) -> usize {
        self.bags_per_batch
    }

    pub fn bag_size(&self) -> usize {
        self.bag_size
    }

    pub fn batch_size(&self) -> usize {
        self.bags_per_batch * self.bag_size
    }

    pub fn bag(&self, k: usize) -> Range<usize> {
        k * self.bag_size..(k + 1) * self.bag_size
    }

    pub fn bags(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        (0..self.bags_per_batch).map(|k| self.bag(k))
    }

    pub fn bag_of(&self, row: usize) -> usize {
        row / self.bag_size
    }

    /// Reduce per-sample losses to the hardest instance of each bag.
    pub fn reduce_max(&self, losses: ArrayView1<f32>) -> Result<Array1<f32>> {
        if losses.len() != self.batch_size() {
            return Err(Error::shape("instance losses", &[self.batch_size()], losses.shape()));
        }
        Ok(self
            .bags()
            .map(|rows| {
                losses
                    .slice(s![rows])
                    .fold(f32::NEG_INFINITY, |acc, &loss| acc.max(loss))
            })
            .collect())
    }
}

impl From<&ModelConfig> for BagLayout {
    fn from(config: &ModelConfig) -> Self {
        Self::new(config.bags_per_batch, config.bag_size)
    }
}
