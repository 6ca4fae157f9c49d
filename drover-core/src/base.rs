//! Capability traits of environments and agents.
mod agent;
mod env;

pub use agent::{Agent, AgentFactory, EpisodeResult};
pub use env::{Env, EnvStep};
