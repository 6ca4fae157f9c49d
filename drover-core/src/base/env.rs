//! Environment.
use anyhow::Result;

/// The result of a single environment step.
#[derive(Debug, Clone)]
pub struct EnvStep {
    /// Observation after the step.
    pub obs: Vec<f32>,

    /// Reward of the step.
    pub reward: f32,

    /// The episode reached a terminal state.
    pub is_terminated: bool,

    /// The episode was cut off, e.g. by a step limit.
    pub is_truncated: bool,
}

impl EnvStep {
    /// Terminated or truncated.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.is_terminated || self.is_truncated
    }
}

/// A continuous-control environment.
///
/// The driver constructs the environment with a seed, reads its dimensions
/// and hands it over to the agent; after that, only the agent resets and
/// steps it, inside [`Agent::run`](super::Agent::run).
pub trait Env {
    /// Configuration of the environment.
    type Config: Clone;

    /// Builds an environment, seeding its random number generator.
    fn build(config: &Self::Config, seed: u64) -> Result<Self>
    where
        Self: Sized;

    /// Dimensionality of the observation space.
    fn obs_dim(&self) -> usize;

    /// Dimensionality of the action space.
    fn act_dim(&self) -> usize;

    /// Upper bound of the (symmetric) action range.
    fn act_limit(&self) -> f32;

    /// Resets the environment, returning the initial observation.
    fn reset(&mut self) -> Result<Vec<f32>>;

    /// Applies an action and advances the environment by one step.
    fn step(&mut self, act: &[f32]) -> Result<EnvStep>;
}
