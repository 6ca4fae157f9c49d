//! Configuration of a training run.
use crate::error::DroverError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    fs::File,
    io::{BufReader, Write},
    path::Path,
    str::FromStr,
};

/// The closed set of supported algorithm variants.
///
/// Selecting an algorithm is a configuration-time decision; an unknown name
/// fails in [`FromStr`] before any resource is allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Algorithm {
    /// Vanilla policy gradient.
    Vpg,
    /// Natural policy gradient.
    Npg,
    /// Trust-region policy optimization.
    Trpo,
    /// Proximal policy optimization.
    Ppo,
    /// Deep deterministic policy gradient.
    Ddpg,
    /// Twin-delayed deep deterministic policy gradient.
    Td3,
    /// Soft actor-critic with a fixed entropy coefficient.
    Sac,
    /// Soft actor-critic with automatic entropy tuning.
    Asac,
    /// Tsallis actor-critic with a fixed entropy coefficient.
    Tac,
    /// Tsallis actor-critic with automatic entropy tuning.
    Atac,
}

impl Algorithm {
    /// Whether the variant tunes its entropy coefficient automatically.
    ///
    /// Agents of these variants expose the coefficient through
    /// [`Agent::alpha`](crate::Agent::alpha) and the runner logs it after
    /// every training rollout.
    pub fn tunes_entropy(&self) -> bool {
        matches!(self, Algorithm::Asac | Algorithm::Atac)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Algorithm::Vpg => "vpg",
            Algorithm::Npg => "npg",
            Algorithm::Trpo => "trpo",
            Algorithm::Ppo => "ppo",
            Algorithm::Ddpg => "ddpg",
            Algorithm::Td3 => "td3",
            Algorithm::Sac => "sac",
            Algorithm::Asac => "asac",
            Algorithm::Tac => "tac",
            Algorithm::Atac => "atac",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Algorithm {
    type Err = DroverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vpg" => Ok(Algorithm::Vpg),
            "npg" => Ok(Algorithm::Npg),
            "trpo" => Ok(Algorithm::Trpo),
            "ppo" => Ok(Algorithm::Ppo),
            "ddpg" => Ok(Algorithm::Ddpg),
            "td3" => Ok(Algorithm::Td3),
            "sac" => Ok(Algorithm::Sac),
            "asac" => Ok(Algorithm::Asac),
            "tac" => Ok(Algorithm::Tac),
            "atac" => Ok(Algorithm::Atac),
            _ => Err(DroverError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Accelerator selection, consumed by agent factories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Device {
    /// Run on the CPU.
    Cpu,

    /// Run on the CUDA device with the given index.
    Cuda(usize),
}

/// Configuration of a training run.
///
/// Built once before the run starts and never mutated; the runner and the
/// agent factory share it by reference.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct RunConfig {
    /// Environment name, e.g. `"HalfCheetah-v2"`.
    pub env: String,

    /// The algorithm variant to train.
    pub algorithm: Algorithm,

    /// Seed for the environment and the random number generators.
    pub seed: u64,

    /// Number of training/evaluation cycles to run.
    pub iterations: usize,

    /// Step budget of one iteration's training phase.
    pub steps_per_iter: usize,

    /// Max episode step.
    pub max_step: usize,

    /// Write metrics to the time-series log.
    pub tensorboard: bool,

    /// Accelerator to construct the agent on.
    pub device: Device,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            env: "Humanoid-v2".to_string(),
            algorithm: Algorithm::Atac,
            seed: 0,
            iterations: 200,
            steps_per_iter: 5000,
            max_step: 200,
            tensorboard: true,
            device: Device::Cpu,
        }
    }
}

impl RunConfig {
    /// Sets the environment name.
    pub fn env(mut self, env: impl Into<String>) -> Self {
        self.env = env.into();
        self
    }

    /// Sets the algorithm variant.
    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Sets the seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the number of iterations.
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the per-iteration training step budget.
    pub fn steps_per_iter(mut self, steps_per_iter: usize) -> Self {
        self.steps_per_iter = steps_per_iter;
        self
    }

    /// Sets the max episode step.
    pub fn max_step(mut self, max_step: usize) -> Self {
        self.max_step = max_step;
        self
    }

    /// Enables or disables metric logging.
    pub fn tensorboard(mut self, tensorboard: bool) -> Self {
        self.tensorboard = tensorboard;
        self
    }

    /// Sets the accelerator.
    pub fn device(mut self, device: Device) -> Self {
        self.device = device;
        self
    }

    /// Constructs [`RunConfig`] from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`RunConfig`] as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn algorithm_names_roundtrip() {
        let all = [
            Algorithm::Vpg,
            Algorithm::Npg,
            Algorithm::Trpo,
            Algorithm::Ppo,
            Algorithm::Ddpg,
            Algorithm::Td3,
            Algorithm::Sac,
            Algorithm::Asac,
            Algorithm::Tac,
            Algorithm::Atac,
        ];
        for algo in all.iter() {
            assert_eq!(Algorithm::from_str(&algo.to_string()).unwrap(), *algo);
        }
        assert!(Algorithm::from_str("dqn").is_err());
    }

    #[test]
    fn entropy_tuning_variants() {
        assert!(Algorithm::Asac.tunes_entropy());
        assert!(Algorithm::Atac.tunes_entropy());
        assert!(!Algorithm::Sac.tunes_entropy());
        assert!(!Algorithm::Tac.tunes_entropy());
        assert!(!Algorithm::Ppo.tunes_entropy());
    }

    #[test]
    fn yaml_roundtrip() -> Result<()> {
        let config = RunConfig::default()
            .env("Ant-v2")
            .algorithm(Algorithm::Sac)
            .seed(7)
            .iterations(40)
            .device(Device::Cuda(1));

        let dir = TempDir::new("run_config")?;
        let path = dir.path().join("run_config.yaml");
        config.save(&path)?;
        let config_ = RunConfig::load(&path)?;
        assert_eq!(config, config_);
        Ok(())
    }
}
