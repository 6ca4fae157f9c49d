#![warn(missing_docs)]
//! A driver for training and evaluating reinforcement learning agents in
//! continuous-control environments.
//!
//! Drover consists of the following crates:
//!
//! * [drover-core](../drover_core/index.html) provides the capability traits
//!   for environments and agents, the record system for metric logging, run
//!   configuration and the `Runner` driving alternating training and
//!   evaluation phases.
//! * [drover-tensorboard](../drover_tensorboard/index.html) has the
//!   `TensorboardRecorder` struct to write records which can be shown in
//!   Tensorboard. It is based on
//!   [tensorboard-rs](https://crates.io/crates/tensorboard-rs).
//! * `drover` is this crate: the command line surface and the glue wiring
//!   configuration, seeding, recorder selection and the runner together.
//!
//! Learning algorithms and simulated environments are not part of the
//! workspace; a downstream crate implements `Env` and `AgentFactory` for its
//! backend and drives everything from a `main` of a few lines:
//!
//! ```ignore
//! use clap::Parser;
//!
//! fn main() -> anyhow::Result<()> {
//!     drover::init_logging();
//!     let config = drover::Cli::parse().into_config();
//!     drover::run(config, my_env_config(), MyAgentFactory)
//! }
//! ```
//!
//! A non-zero exit code with an error trace on failure falls out of the
//! `anyhow::Result` return value.
mod cli;
mod run;

pub use cli::Cli;
pub use run::{init_logging, run, run_with};
