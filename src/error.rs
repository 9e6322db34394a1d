//! Error taxonomy shared by sample construction and the network forward pass.

use thiserror::Error;

use crate::samples::NewsId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Entity indices must differ, both are {0}")]
    SameEntityIndex(usize),

    #[error("Entity index {index} is outside a document of {words} words")]
    EntityOutOfDocument { index: usize, words: usize },

    #[error("Entities {left} and {right} do not fit into a window of {window_size} words")]
    EntitySpanTooWide {
        left: usize,
        right: usize,
        window_size: usize,
    },

    #[error("Window of {window_size} words exceeds a document of {words} words")]
    WindowLargerThanDocument { window_size: usize, words: usize },

    #[error("Window [{w_from}, {w_to}) runs past the end of a document of {words} words")]
    WindowPastDocumentEnd {
        w_from: usize,
        w_to: usize,
        words: usize,
    },

    #[error("Invalid window/entity layout: subj={subj_ind}, obj={obj_ind}, window=[{w_from}, {w_to})")]
    InvalidWindowLayout {
        subj_ind: usize,
        obj_ind: usize,
        w_from: usize,
        w_to: usize,
    },

    #[error("Unknown news: {0}")]
    UnknownNews(NewsId),

    #[error("Shape mismatch for {what}: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        what: &'static str,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("Batch of {samples} samples is not divisible into bags of {bag_size}")]
    RaggedBags { samples: usize, bag_size: usize },

    #[error("Embedding index {index} is outside a table of {rows} rows")]
    EmbeddingIndexOutOfRange { index: usize, rows: usize },

    #[error("Label {label} is outside of {n_out} classes")]
    LabelOutOfRange { label: usize, n_out: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub(crate) fn shape(what: &'static str, expected: &[usize], actual: &[usize]) -> Self {
        Self::ShapeMismatch {
            what,
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        }
    }
}
