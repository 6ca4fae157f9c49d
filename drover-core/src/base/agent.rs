//! Agent.
use super::Env;
use crate::{record::Record, RunConfig};
use anyhow::Result;
use std::path::Path;

/// The outcome of one episode rollout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeResult {
    /// Number of environment steps taken in the episode.
    pub steps: usize,

    /// Sum of rewards collected over the episode.
    pub episode_return: f32,
}

/// Represents a trainable policy rolling out episodes on an environment.
///
/// The agent owns its environment and drives reset/step internally; the
/// runner only schedules rollouts and toggles the training/evaluation mode
/// at phase boundaries.
pub trait Agent {
    /// Executes exactly one episode, bounded by `max_step` environment steps.
    ///
    /// In training mode the agent updates its internal learning state as a
    /// side effect; in evaluation mode it must not.
    fn run(&mut self, max_step: usize) -> Result<EpisodeResult>;

    /// Set the agent to training mode.
    fn train(&mut self);

    /// Set the agent to evaluation mode.
    fn eval(&mut self);

    /// Return if it is in training mode.
    fn is_train(&self) -> bool;

    /// Current entropy coefficient, for variants that tune it automatically.
    ///
    /// Returns `None` for every other variant.
    fn alpha(&self) -> Option<f32> {
        None
    }

    /// Save the policy parameters in the given directory.
    fn save_params(&self, path: &Path) -> Result<()>;

    /// Algorithm-internal diagnostics, passed through to progress reports
    /// without interpretation.
    fn diagnostics(&self) -> Record {
        Record::empty()
    }
}

/// Constructs an [`Agent`] for the algorithm selected in the configuration.
///
/// The factory takes ownership of the environment; whatever hyperparameters
/// a variant needs beyond the run configuration are the factory's own
/// business, as is seeding its learning backend with the configured seed.
/// An unsupported variant is a construction-time error, before any rollout
/// has happened.
pub trait AgentFactory<E: Env> {
    /// Builds the agent.
    fn build(&self, env: E, config: &RunConfig) -> Result<Box<dyn Agent>>;
}
