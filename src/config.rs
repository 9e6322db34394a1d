//! Network hyperparameters resolved from `.env`, environment and defaults.

use std::{env, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Width of the distance channel reserved per entity.
pub const DISTANCE_CHANNELS: usize = 1;

/// Construction-time options of the convolutional scorer.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Rows of the embedding table.
    pub vocabulary_words: usize,
    /// Word vector dimension.
    pub embedding_size: usize,
    /// Max amount of words per news, i.e. batch row length.
    pub words_per_news: usize,
    pub bags_per_batch: usize,
    pub bag_size: usize,
    /// Amount of convolution output channels.
    pub channels_count: usize,
    /// Convolution kernel width in tokens, also the sample window size.
    pub window_size: usize,
    /// Recorded for reference only, the network always uses [`DISTANCE_CHANNELS`].
    pub dp: usize,
    /// Amount of output classes.
    pub n_out: usize,
    /// Keep probability applied to logits during training.
    pub dropout: f32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            vocabulary_words: 0,
            embedding_size: 50,
            words_per_news: 50,
            bags_per_batch: 1,
            bag_size: 5,
            channels_count: 200,
            window_size: 7,
            dp: 5,
            n_out: 3,
            dropout: 0.5,
        }
    }
}

impl ModelConfig {
    /// Load configuration from environment with reasonable defaults.
    ///
    /// Every field may be overridden by `ATTITUDE_<FIELD>`, e.g. `ATTITUDE_WINDOW_SIZE=9`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let defaults = Self::default();
        Self {
            vocabulary_words: env_or("ATTITUDE_VOCABULARY_WORDS", defaults.vocabulary_words),
            embedding_size: env_or("ATTITUDE_EMBEDDING_SIZE", defaults.embedding_size),
            words_per_news: env_or("ATTITUDE_WORDS_PER_NEWS", defaults.words_per_news),
            bags_per_batch: env_or("ATTITUDE_BAGS_PER_BATCH", defaults.bags_per_batch),
            bag_size: env_or("ATTITUDE_BAG_SIZE", defaults.bag_size),
            channels_count: env_or("ATTITUDE_CHANNELS_COUNT", defaults.channels_count),
            window_size: env_or("ATTITUDE_WINDOW_SIZE", defaults.window_size),
            dp: env_or("ATTITUDE_DP", defaults.dp),
            n_out: env_or("ATTITUDE_N_OUT", defaults.n_out),
            dropout: env_or("ATTITUDE_DROPOUT", defaults.dropout),
        }
    }

    /// Reject configurations the forward pass cannot be shaped from.
    pub fn validate(&self) -> Result<()> {
        let sizes = [
            ("vocabulary_words", self.vocabulary_words),
            ("embedding_size", self.embedding_size),
            ("words_per_news", self.words_per_news),
            ("bags_per_batch", self.bags_per_batch),
            ("bag_size", self.bag_size),
            ("channels_count", self.channels_count),
            ("window_size", self.window_size),
        ];
        if let Some((name, _)) = sizes.iter().find(|(_, value)| *value == 0) {
            return Err(Error::InvalidConfig(format!("{name} must be positive")));
        }
        if self.window_size > self.words_per_news {
            return Err(Error::InvalidConfig(format!(
                "window_size {} exceeds words_per_news {}",
                self.window_size, self.words_per_news
            )));
        }
        if !(self.dropout > 0.0 && self.dropout <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "dropout keep probability {} is outside (0, 1]",
                self.dropout
            )));
        }
        if self.n_out < 2 {
            return Err(Error::InvalidConfig("n_out must be at least 2".into()));
        }
        Ok(())
    }

    pub fn batch_size(&self) -> usize {
        self.bags_per_batch * self.bag_size
    }

    /// Token width after appending both distance channels.
    pub fn embedding_size_p(&self) -> usize {
        self.embedding_size + 2 * DISTANCE_CHANNELS
    }

    pub fn left_padding(&self) -> usize {
        (self.window_size - 1) / 2
    }

    pub fn right_padding(&self) -> usize {
        (self.window_size - 1) - self.left_padding()
    }

    /// Row count of a padded sequence fed into the convolution.
    pub fn padded_words(&self) -> usize {
        self.words_per_news + self.window_size - 1
    }

    /// Hyperparameters as recorded alongside a trained model.
    pub fn parameters(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
