//! Windowed samples and a position-aware convolutional scorer with bag-max loss
//! for distantly supervised attitude extraction between entity pairs.

pub mod config;
pub mod error;
pub mod logging;
pub mod network;
pub mod samples;

pub use config::ModelConfig;
pub use error::{Error, Result};
