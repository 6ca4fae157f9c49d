//! Command line surface of the driver.
use clap::Parser;
use drover_core::{Algorithm, Device, RunConfig};
use std::str::FromStr;

/// Command line arguments of the training driver.
///
/// Every flag has a default; parsing an unknown algorithm name fails before
/// anything is constructed.
#[derive(Debug, Parser)]
#[command(
    name = "drover",
    about = "Train and evaluate RL agents in continuous-control environments"
)]
pub struct Cli {
    /// Environment name, e.g. HalfCheetah-v2, Ant-v2 or Humanoid-v2.
    #[arg(long, default_value = "Humanoid-v2")]
    pub env: String,

    /// Algorithm: vpg, npg, trpo, ppo, ddpg, td3, sac, asac, tac or atac.
    #[arg(long, default_value = "atac", value_parser = Algorithm::from_str)]
    pub algo: Algorithm,

    /// Seed for random number generators.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Iterations to run and train the agent.
    #[arg(long, default_value_t = 200)]
    pub iterations: usize,

    /// Steps of interaction between the agent and the environment in each
    /// iteration.
    #[arg(long, default_value_t = 5000)]
    pub steps_per_iter: usize,

    /// Max episode step.
    #[arg(long, default_value_t = 200)]
    pub max_step: usize,

    /// Write metrics as TFRecord files.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub tensorboard: bool,

    /// Index of the accelerator device.
    #[arg(long, default_value_t = 0)]
    pub gpu_index: usize,
}

impl Cli {
    /// Converts the parsed arguments into a run configuration.
    ///
    /// Whether the CUDA device is actually available is for the agent
    /// factory to decide; the configuration only carries the selection.
    pub fn into_config(self) -> RunConfig {
        RunConfig::default()
            .env(self.env)
            .algorithm(self.algo)
            .seed(self.seed)
            .iterations(self.iterations)
            .steps_per_iter(self.steps_per_iter)
            .max_step(self.max_step)
            .tensorboard(self.tensorboard)
            .device(Device::Cuda(self.gpu_index))
    }
}
