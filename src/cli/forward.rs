//! CLI entry-point running one forward pass over a labelled corpus.

use std::path::PathBuf;

use anyhow::{Context, Result};
use attitude_cnn::{
    network::{embed, BagLayout, Batch, VanillaCnn},
    samples::{self, collection::oov_index, NewsId, NewsWords, NewsWordsCollection, Sample},
    ModelConfig,
};
use clap::Args as ClapArgs;
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, instrument};

use crate::cli::RunMode;

/// Args for the `forward` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// JSON corpus with vocabulary, news and labelled samples.
    #[arg(long)]
    pub input: PathBuf,
    /// Seed for weights, embeddings and dropout.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
    #[arg(long, default_value = "inference", value_enum)]
    pub mode: RunMode,
    /// Token index used to pad windows; defaults to the out-of-vocabulary row.
    #[arg(long)]
    pub pad_index: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct Corpus {
    vocabulary: Vec<String>,
    news: Vec<NewsEntry>,
    samples: Vec<LabelledSample>,
}

#[derive(Debug, Deserialize)]
struct NewsEntry {
    id: NewsId,
    #[serde(flatten)]
    words: NewsWords,
}

#[derive(Debug, Deserialize)]
struct LabelledSample {
    #[serde(flatten)]
    sample: Sample,
    label: usize,
}

#[derive(Debug, Serialize)]
struct ForwardReport {
    parameters: Map<String, Value>,
    labels: Vec<usize>,
    instance_costs: Vec<f32>,
    bag_costs: Vec<f32>,
}

#[instrument(skip(config))]
pub async fn run(args: Args, config: ModelConfig) -> Result<()> {
    let raw = tokio::fs::read_to_string(&args.input)
        .await
        .with_context(|| format!("reading corpus {}", args.input.display()))?;
    let corpus: Corpus = serde_json::from_str(&raw).context("parsing corpus")?;

    let total_words_count = corpus.vocabulary.len();
    let mut collection = NewsWordsCollection::with_vocabulary(corpus.vocabulary);
    for entry in corpus.news {
        collection.add_news(entry.id, entry.words)?;
    }

    let layout = BagLayout::for_samples(corpus.samples.len(), config.bag_size)?;
    let config = ModelConfig {
        vocabulary_words: total_words_count + 1,
        bags_per_batch: layout.bags_per_batch(),
        ..config
    };
    config.validate()?;

    let (bag_samples, labels): (Vec<Sample>, Vec<usize>) = corpus
        .samples
        .into_iter()
        .map(|labelled| (labelled.sample, labelled.label))
        .unzip();
    let inputs = samples::build_inputs(&bag_samples, &collection, config.window_size, total_words_count)?;
    let pad_index = args.pad_index.unwrap_or_else(|| oov_index(total_words_count));
    let batch = Batch::from_inputs(&config, &inputs, &labels, pad_index)?;

    let mut rng = StdRng::seed_from_u64(args.seed);
    let model = VanillaCnn::init(config.clone(), &mut rng)?;
    let embedding = embed::random_table(config.vocabulary_words, config.embedding_size, &mut rng);
    let output = model.forward(&batch, embedding.view(), args.mode.into(), &mut rng)?;
    info!(
        samples = batch.len(),
        bags = output.bag_costs.len(),
        "forward pass complete"
    );

    let report = ForwardReport {
        parameters: model.parameters(),
        labels: output.labels.to_vec(),
        instance_costs: output.instance_costs.to_vec(),
        bag_costs: output.bag_costs.to_vec(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
