//! CLI entry-point printing the window around an entity pair.

use anyhow::Result;
use attitude_cnn::{
    samples::{distance_vector, related_window_positions, WindowPositions},
    ModelConfig,
};
use clap::Args as ClapArgs;
use serde::Serialize;
use tracing::instrument;

/// Args for the `window` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Window size in words; defaults to the configured one.
    #[arg(long)]
    pub window_size: Option<usize>,
    /// Word offset of the first entity.
    #[arg(long)]
    pub left: usize,
    /// Word offset of the second entity.
    #[arg(long)]
    pub right: usize,
    /// Amount of words in the document.
    #[arg(long)]
    pub words_in_news: usize,
}

#[derive(Debug, Serialize)]
struct WindowReport {
    #[serde(flatten)]
    window: WindowPositions,
    dist_from_left: Vec<usize>,
    dist_from_right: Vec<usize>,
}

#[instrument(skip(config))]
pub async fn run(args: Args, config: ModelConfig) -> Result<()> {
    let window_size = args.window_size.unwrap_or(config.window_size);
    let window = related_window_positions(window_size, args.left, args.right, args.words_in_news)?;
    let report = WindowReport {
        window,
        dist_from_left: distance_vector(window.left, window_size),
        dist_from_right: distance_vector(window.right, window_size),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
