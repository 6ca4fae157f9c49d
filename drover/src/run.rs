//! Wires configuration, seeding, recorder selection and the runner together.
use anyhow::Result;
use chrono::Local;
use drover_core::{
    record::{NullRecorder, Recorder},
    AgentFactory, Env, RunConfig, Runner, RunnerConfig,
};
use drover_tensorboard::TensorboardRecorder;
use log::info;

/// Initializes logging to stderr, defaulting to the `info` level.
///
/// Call this once at the top of `main`; `RUST_LOG` overrides the filter.
pub fn init_logging() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .try_init()
        .ok();
}

/// Directory of the metric time series of this run.
fn run_dir(config: &RunConfig) -> String {
    format!(
        "runs/{}/{}/{}_{}",
        config.env,
        config.algorithm,
        config.seed,
        Local::now().format("%Y-%m-%d-%H-%M-%S"),
    )
}

/// Runs training and evaluation with the default runner configuration.
pub fn run<E, F>(config: RunConfig, env_config: E::Config, factory: F) -> Result<()>
where
    E: Env,
    F: AgentFactory<E>,
{
    run_with(config, RunnerConfig::default(), env_config, factory)
}

/// Runs training and evaluation.
///
/// Seeds the general-purpose random number generator and the environment
/// with the configured seed, builds the agent through the factory, then
/// drives the runner. Metrics go to a Tensorboard log directory namespaced
/// by environment, algorithm, seed and start time, or nowhere when metric
/// logging is disabled.
pub fn run_with<E, F>(
    config: RunConfig,
    runner_config: RunnerConfig,
    env_config: E::Config,
    factory: F,
) -> Result<()>
where
    E: Env,
    F: AgentFactory<E>,
{
    fastrand::seed(config.seed);

    let env = E::build(&env_config, config.seed)?;
    info!("State dimension: {}", env.obs_dim());
    info!("Action dimension: {}", env.act_dim());

    let mut agent = factory.build(env, &config)?;

    let mut recorder: Box<dyn Recorder> = match config.tensorboard {
        true => Box::new(TensorboardRecorder::new(run_dir(&config))),
        false => Box::new(NullRecorder {}),
    };

    let mut runner = Runner::build(config, runner_config)?;
    runner.run(agent.as_mut(), recorder.as_mut())
}
