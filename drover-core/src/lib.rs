#![warn(missing_docs)]
//! Core abstractions of the drover reinforcement learning driver.
//!
//! This crate provides the capability traits for continuous-control
//! environments and trainable agents, a record system for metric logging,
//! run configuration, and the [`Runner`] that drives alternating training
//! and evaluation phases over a fixed number of iterations.
//!
//! Concrete learning algorithms and simulated environments are supplied by
//! downstream crates through the [`Agent`], [`Env`] and [`AgentFactory`]
//! traits; this crate never steps an environment or computes a gradient
//! itself.
pub mod error;
pub mod record;

mod base;
pub use base::{Agent, AgentFactory, Env, EnvStep, EpisodeResult};

mod config;
pub use config::{Algorithm, Device, RunConfig};

mod runner;
pub use runner::{ReturnStats, Runner, RunnerConfig};
