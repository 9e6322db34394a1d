//! Sample construction: windowing around an entity pair and per-token encodings.

pub mod collection;
pub mod distance;
pub mod features;
pub mod position;
pub mod sample;
pub mod window;

use rayon::prelude::*;
use tracing::debug;

use crate::error::Result;

pub use collection::{NewsCollection, NewsWords, NewsWordsCollection};
pub use distance::distance_vector;
pub use features::{normalize, FeatureVector};
pub use position::{NewsId, TextPosition};
pub use sample::{NetworkInput, Sample};
pub use window::{related_window_positions, WindowPositions};

/// Convert samples into network inputs in parallel, keeping the input order.
///
/// The first failing sample aborts the whole call.
pub fn build_inputs<C>(
    samples: &[Sample],
    collection: &C,
    window_size: usize,
    total_words_count: usize,
) -> Result<Vec<NetworkInput>>
where
    C: NewsCollection + Sync + ?Sized,
{
    let inputs = samples
        .par_iter()
        .map(|sample| sample.to_network_input(collection, window_size, total_words_count))
        .collect::<Result<Vec<_>>>()?;
    debug!(count = inputs.len(), window_size, "built network inputs");
    Ok(inputs)
}
