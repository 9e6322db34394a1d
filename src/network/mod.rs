//! Position-aware convolutional scorer with bag-level max aggregation.
//!
//! Data flow per batch: embedding lookup with two distance channels, "same"-length
//! convolution over padded tokens, global max pooling with `tanh`, a linear
//! classifier, per-sample cross-entropy and finally one max per bag.

pub mod bags;
pub mod batch;
pub mod classifier;
pub mod conv;
pub mod embed;
pub mod model;
pub mod pool;

use serde::{Deserialize, Serialize};

pub use bags::BagLayout;
pub use batch::Batch;
pub use classifier::{Dropout, Linear};
pub use conv::WindowedConvolver;
pub use model::{ForwardOutput, VanillaCnn};

/// Whether dropout is active during a forward pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    Train,
    #[default]
    Inference,
}

/// Attitude classes of the default three-way output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Negative = 0,
    Neutral = 1,
    Positive = 2,
}

impl Label {
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Negative),
            1 => Some(Self::Neutral),
            2 => Some(Self::Positive),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}
