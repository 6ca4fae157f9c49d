//! Configuration of [`Runner`](super::Runner).
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`Runner`](super::Runner).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
pub struct RunnerConfig {
    /// Number of held-out episodes in each iteration's evaluation phase.
    pub eval_episodes: usize,

    /// Interval of saving agent parameters, in iterations.
    ///
    /// Zero disables checkpointing.
    pub save_interval: usize,

    /// Where to save the agent parameters.
    pub model_dir: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            eval_episodes: 10,
            save_interval: 20,
            model_dir: "./save_model".to_string(),
        }
    }
}

impl RunnerConfig {
    /// Sets the number of evaluation episodes per iteration.
    pub fn eval_episodes(mut self, v: usize) -> Self {
        self.eval_episodes = v;
        self
    }

    /// Sets the interval of saving in iterations.
    pub fn save_interval(mut self, v: usize) -> Self {
        self.save_interval = v;
        self
    }

    /// Sets the directory where agent parameters are saved.
    pub fn model_dir(mut self, model_dir: impl Into<String>) -> Self {
        self.model_dir = model_dir.into();
        self
    }

    /// Constructs [`RunnerConfig`] from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`RunnerConfig`].
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
    fn yaml_roundtrip() -> Result<()> {
        let config = RunnerConfig::default()
            .eval_episodes(5)
            .save_interval(10)
            .model_dir("some/directory");

        let dir = TempDir::new("runner_config")?;
        let path = dir.path().join("runner_config.yaml");
        config.save(&path)?;
        let config_ = RunnerConfig::load(&path)?;
        assert_eq!(config, config_);
        Ok(())
    }
}
