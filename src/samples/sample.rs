//! A single bag member and its conversion into network input.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{Error, Result};
use crate::samples::{
    distance_vector, related_window_positions, FeatureVector, NewsCollection, TextPosition,
};

/// Entity pair occurrence, optionally with a hand-crafted feature vector.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Sample {
    position: TextPosition,
    features: Option<FeatureVector>,
}

/// Fixed-shape record derived from a [`Sample`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkInput {
    /// Embedding rows of the window words.
    pub indices: Vec<usize>,
    /// Window-relative position of the left entity of the [`TextPosition`].
    pub subj_ind: usize,
    /// Window-relative position of the right entity of the [`TextPosition`].
    pub obj_ind: usize,
    pub dist_from_subj: Vec<usize>,
    pub dist_from_obj: Vec<usize>,
    pub pos_indices: Vec<usize>,
    /// Unit-length feature vector, if the sample has one.
    pub nlp_vector: Option<FeatureVector>,
}

impl Sample {
    pub fn new(position: TextPosition, features: Option<FeatureVector>) -> Self {
        Self { position, features }
    }

    pub fn position(&self) -> &TextPosition {
        &self.position
    }

    pub fn features(&self) -> Option<&FeatureVector> {
        self.features.as_ref()
    }

    /// Window the referenced news around both entities and encode it.
    ///
    /// `total_words_count` is the amount of words known to the embedding dictionary.
    pub fn to_network_input<C>(
        &self,
        collection: &C,
        window_size: usize,
        total_words_count: usize,
    ) -> Result<NetworkInput>
    where
        C: NewsCollection + ?Sized,
    {
        let news_id = self.position.news_id;
        let window = related_window_positions(
            window_size,
            self.position.left_entity_index,
            self.position.right_entity_index,
            collection.words_per_news(news_id)?,
        )?;
        let (subj_ind, obj_ind) = (window.left, window.right);

        if subj_ind == 0 || obj_ind + window.w_from >= window.w_to {
            return Err(Error::InvalidWindowLayout {
                subj_ind,
                obj_ind,
                w_from: window.w_from,
                w_to: window.w_to,
            });
        }

        let pos_indices = collection.pos_indices_in_window(news_id, window.w_from, window.w_to)?;
        let indices = collection.embedding_indices_in_window(
            news_id,
            total_words_count,
            window.w_from,
            window.w_to,
        )?;
        trace!(news_id, ?window, "windowed sample");

        Ok(NetworkInput {
            indices,
            subj_ind,
            obj_ind,
            dist_from_subj: distance_vector(subj_ind, window_size),
            dist_from_obj: distance_vector(obj_ind, window_size),
            pos_indices,
            nlp_vector: self.features.as_ref().map(FeatureVector::normalized),
        })
    }
}
