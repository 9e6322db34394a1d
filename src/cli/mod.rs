//! Command-line interface wiring for attitude-cnn.

use anyhow::Result;
use attitude_cnn::{network::Mode, ModelConfig};
use clap::{Parser, Subcommand, ValueEnum};

pub mod forward;
pub mod window;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Bag-level attitude scoring over entity windows", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, config: ModelConfig) -> Result<()> {
        match self.command {
            Commands::Window(args) => window::run(args, config).await,
            Commands::Forward(args) => forward::run(args, config).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the window and distance encodings for an entity pair.
    Window(window::Args),
    /// Run one forward pass over a labelled JSON corpus.
    Forward(forward::Args),
}

/// Whether the forward pass applies dropout.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum RunMode {
    /// Dropout active, as during a training step.
    Train,
    /// Dropout disabled.
    Inference,
}

impl From<RunMode> for Mode {
    fn from(mode: RunMode) -> Self {
        match mode {
            RunMode::Train => Mode::Train,
            RunMode::Inference => Mode::Inference,
        }
    }
}
