//! Vanilla position-aware CNN composed from the individual stages.

use ndarray::{Array, Array1, Array2, ArrayView2, Dimension, ShapeBuilder};
use rand::Rng;
use rand_distr::StandardNormal;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::config::ModelConfig;
use crate::error::{Error, Result};
use crate::network::{
    classifier, embed, pool, BagLayout, Batch, Dropout, Linear, Mode, WindowedConvolver,
};

/// Convolution and classifier parameters; the embedding table is supplied per call.
#[derive(Debug, Clone, PartialEq)]
pub struct VanillaCnn {
    config: ModelConfig,
    convolver: WindowedConvolver,
    classifier: Linear,
    dropout: Dropout,
}

/// Result of one forward pass over a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardOutput {
    /// Predicted class per sample, taken before dropout.
    pub labels: Array1<usize>,
    /// Cross-entropy per sample.
    pub instance_costs: Array1<f32>,
    /// Maximum instance cost per bag.
    pub bag_costs: Array1<f32>,
}

impl VanillaCnn {
    /// Draw every parameter from a standard normal distribution.
    pub fn init<R: Rng>(config: ModelConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let weights = random_normal((config.channels_count, config.n_out), rng);
        let bias = random_normal(config.n_out, rng);
        let conv_filter = random_normal(
            (
                config.window_size * config.embedding_size_p(),
                config.channels_count,
            ),
            rng,
        );
        Self::from_parts(config, conv_filter, weights, bias)
    }

    /// Assemble a model from explicit parameters, e.g. ones restored by a trainer.
    pub fn from_parts(
        config: ModelConfig,
        conv_filter: Array2<f32>,
        weights: Array2<f32>,
        bias: Array1<f32>,
    ) -> Result<Self> {
        config.validate()?;
        let expected = [config.channels_count, config.n_out];
        if weights.shape() != expected {
            return Err(Error::shape("classifier weights", &expected, weights.shape()));
        }
        if conv_filter.ncols() != config.channels_count {
            return Err(Error::shape(
                "convolution filter",
                &[config.window_size * config.embedding_size_p(), config.channels_count],
                conv_filter.shape(),
            ));
        }
        let convolver =
            WindowedConvolver::new(conv_filter, config.window_size, config.embedding_size_p())?;
        let classifier = Linear::new(weights, bias)?;
        let dropout = Dropout::new(config.dropout)?;
        Ok(Self {
            config,
            convolver,
            classifier,
            dropout,
        })
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn parameters(&self) -> Map<String, Value> {
        self.config.parameters()
    }

    pub fn convolver(&self) -> &WindowedConvolver {
        &self.convolver
    }

    pub fn classifier(&self) -> &Linear {
        &self.classifier
    }

    /// Score `batch` and reduce its instance costs to one cost per bag.
    #[instrument(skip_all, fields(samples = batch.len(), mode = ?mode))]
    pub fn forward<R: Rng>(
        &self,
        batch: &Batch,
        embedding: ArrayView2<f32>,
        mode: Mode,
        rng: &mut R,
    ) -> Result<ForwardOutput> {
        let config = &self.config;
        let table = [config.vocabulary_words, config.embedding_size];
        if embedding.shape() != table {
            return Err(Error::shape("embedding table", &table, embedding.shape()));
        }
        let rows = [config.batch_size(), config.words_per_news];
        if [batch.len(), batch.words()] != rows {
            return Err(Error::shape("batch", &rows, &[batch.len(), batch.words()]));
        }

        let padded = embed::position_aware_embeddings(
            batch.x(),
            batch.p1(),
            batch.p2(),
            embedding,
            config.left_padding(),
            config.right_padding(),
        )?;
        let conv = self.convolver.forward(padded.view())?;
        let g = pool::max_pool_tanh(conv.view());

        let logits = self.classifier.forward(g.view());
        let labels = classifier::argmax(classifier::softmax(logits.view()).view());
        let dropped = self.dropout.apply(&logits, mode, rng);

        let instance_costs = classifier::sparse_softmax_cross_entropy(dropped.view(), batch.y())?;
        let bag_costs = BagLayout::from(config).reduce_max(instance_costs.view())?;
        debug!(bags = bag_costs.len(), "forward pass finished");

        Ok(ForwardOutput {
            labels,
            instance_costs,
            bag_costs,
        })
    }
}

fn random_normal<Sh, D, R>(shape: Sh, rng: &mut R) -> Array<f32, D>
where
    Sh: ShapeBuilder<Dim = D>,
    D: Dimension,
    R: Rng,
{
    Array::from_shape_simple_fn(shape, || rng.sample(StandardNormal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn config() -> ModelConfig {
        ModelConfig {
            vocabulary_words: 6,
            embedding_size: 4,
            words_per_news: 8,
            bags_per_batch: 2,
            bag_size: 2,
            channels_count: 5,
            window_size: 3,
            ..ModelConfig::default()
        }
    }

    fn batch(config: &ModelConfig) -> Batch {
        let x = Array2::from_shape_fn((4, 8), |(b, t)| (b + t) % 6);
        let p1 = Array2::from_shape_fn((4, 8), |(_, t)| t as f32);
        let p2 = Array2::from_shape_fn((4, 8), |(_, t)| (8 - t) as f32);
        Batch::new(
            config,
            x,
            p1,
            p2,
            Array1::from(vec![1, 1, 2, 2]),
            Array1::from(vec![3, 4, 5, 6]),
            Array1::from(vec![0, 1, 2, 1]),
        )
        .unwrap()
    }

    #[test]
    fn initialises_parameter_shapes() {
        let mut rng = StdRng::seed_from_u64(1);
        let model = VanillaCnn::init(config(), &mut rng).unwrap();
        assert_eq!(model.convolver().filter().dim(), (18, 5));
        assert_eq!(model.classifier().weights().dim(), (5, 3));
        assert_eq!(model.classifier().bias().len(), 3);
    }

    #[test]
    fn bag_costs_are_instance_maxima() {
        let config = config();
        let mut rng = StdRng::seed_from_u64(3);
        let model = VanillaCnn::init(config.clone(), &mut rng).unwrap();
        let embedding = random_normal((6, 4), &mut rng);
        let out = model
            .forward(&batch(&config), embedding.view(), Mode::Inference, &mut rng)
            .unwrap();
        assert_eq!(out.labels.len(), 4);
        assert!(out.labels.iter().all(|&label| label < 3));
        assert_eq!(out.bag_costs.len(), 2);
        assert_eq!(out.bag_costs[0], out.instance_costs[0].max(out.instance_costs[1]));
        assert_eq!(out.bag_costs[1], out.instance_costs[2].max(out.instance_costs[3]));
    }

    #[test]
    fn inference_is_deterministic_and_training_is_seeded() {
        let config = config();
        let mut rng = StdRng::seed_from_u64(5);
        let model = VanillaCnn::init(config.clone(), &mut rng).unwrap();
        let embedding = random_normal((6, 4), &mut rng);
        let batch = batch(&config);

        let a = model
            .forward(&batch, embedding.view(), Mode::Inference, &mut StdRng::seed_from_u64(1))
            .unwrap();
        let b = model
            .forward(&batch, embedding.view(), Mode::Inference, &mut StdRng::seed_from_u64(2))
            .unwrap();
        assert_eq!(a, b);

        let c = model
            .forward(&batch, embedding.view(), Mode::Train, &mut StdRng::seed_from_u64(9))
            .unwrap();
        let d = model
            .forward(&batch, embedding.view(), Mode::Train, &mut StdRng::seed_from_u64(9))
            .unwrap();
        assert_eq!(c, d);
        assert_eq!(a.labels, c.labels);
    }

    #[test]
    fn rejects_mismatched_embedding_table() {
        let config = config();
        let mut rng = StdRng::seed_from_u64(0);
        let model = VanillaCnn::init(config.clone(), &mut rng).unwrap();
        let embedding = Array2::<f32>::zeros((6, 3));
        let err = model
            .forward(&batch(&config), embedding.view(), Mode::Inference, &mut rng)
            .unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { what: "embedding table", .. }));
    }
}
