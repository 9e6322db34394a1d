//! Location of an entity pair inside a tokenized news document.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub type NewsId = u64;

/// Identifies a news document and the token offsets of both entity mentions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct TextPosition {
    pub news_id: NewsId,
    pub left_entity_index: usize,
    pub right_entity_index: usize,
}

impl TextPosition {
    pub fn new(news_id: NewsId, left_entity_index: usize, right_entity_index: usize) -> Result<Self> {
        if left_entity_index == right_entity_index {
            return Err(Error::SameEntityIndex(left_entity_index));
        }
        Ok(Self {
            news_id,
            left_entity_index,
            right_entity_index,
        })
    }
}
