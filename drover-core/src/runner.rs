//! Drive training and evaluation cycles of an [`Agent`].
mod config;
use std::{
    path::PathBuf,
    time::Instant,
};

use crate::{
    record::{Record, RecordValue::Scalar, Recorder},
    Agent, RunConfig,
};
use anyhow::Result;
pub use config::RunnerConfig;
use log::info;

/// Running sum and count of episode returns.
///
/// The runner keeps one cumulative instance for the whole training run and
/// a fresh instance per evaluation phase. The average of zero episodes is
/// defined as `0.0`.
#[derive(Debug, Default, Clone)]
pub struct ReturnStats {
    sum_returns: f64,
    num_episodes: usize,
}

impl ReturnStats {
    /// Creates empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one episode return into the statistics.
    pub fn push(&mut self, episode_return: f32) {
        self.sum_returns += episode_return as f64;
        self.num_episodes += 1;
    }

    /// Number of episodes recorded so far.
    pub fn num_episodes(&self) -> usize {
        self.num_episodes
    }

    /// Average return over the recorded episodes, `0.0` if there are none.
    pub fn average(&self) -> f32 {
        if self.num_episodes == 0 {
            0.0
        } else {
            (self.sum_returns / self.num_episodes as f64) as f32
        }
    }
}

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Manages the iteration loop and related objects.
///
/// # Iteration loop
///
/// Given an agent implementing [`Agent`] and a recorder implementing
/// [`Recorder`], [`Runner::run`] drives exactly `iterations` cycles:
///
/// 1. Training phase: put the agent in training mode, then roll out episodes
///    while the per-iteration step counter has not exceeded `steps_per_iter`.
///    The counter is checked before each rollout and episodes always complete
///    in full, so the budget is met or overshot by at most one episode
///    length. Every rollout adds to the cumulative training statistics and to
///    the global step counter, and emits the cumulative average return and
///    the episode's raw return, keyed by the global step count.
/// 2. Evaluation phase: put the agent in evaluation mode and roll out a fixed
///    number of episodes with fresh statistics. The average and the final
///    episode's raw return are emitted under the step count reached at the
///    end of the training phase; evaluation steps are never counted.
/// 3. Report progress: iteration index, step and episode totals, both average
///    returns, the agent's diagnostics and the elapsed wall-clock time.
/// 4. On every `save_interval`-th iteration, save the agent's policy
///    parameters under a directory named after the run and its statistics.
///
/// # Interaction of objects
///
/// ```mermaid
/// graph LR
///     A[Runner]-->|max_step|B[Agent]
///     B -->|EpisodeResult|A
///     A -->|Record|C[Recorder]
///     A -->|save_params|D[Model directory]
/// ```
pub struct Runner {
    /// Configuration of the run.
    config: RunConfig,

    /// Number of episodes in each evaluation phase.
    eval_episodes: usize,

    /// Interval of saving agent parameters, in iterations.
    save_interval: usize,

    /// Where to save the agent parameters.
    model_dir: PathBuf,

    /// Environment steps accumulated over all training phases.
    total_steps: usize,

    /// Cumulative training statistics, never reset.
    train_stats: ReturnStats,

    /// Wall-clock start of the run.
    started_at: Instant,
}

impl Runner {
    /// Constructs a runner.
    ///
    /// Creates the model directory once; an already existing directory is
    /// fine.
    pub fn build(config: RunConfig, runner_config: RunnerConfig) -> Result<Self> {
        let model_dir = PathBuf::from(&runner_config.model_dir);
        std::fs::create_dir_all(&model_dir)?;

        Ok(Self {
            config,
            eval_episodes: runner_config.eval_episodes,
            save_interval: runner_config.save_interval,
            model_dir,
            total_steps: 0,
            train_stats: ReturnStats::new(),
            started_at: Instant::now(),
        })
    }

    /// Environment steps accumulated over all training phases so far.
    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    /// Cumulative training statistics.
    pub fn train_stats(&self) -> &ReturnStats {
        &self.train_stats
    }

    /// Performs one training phase.
    ///
    /// Rolls out episodes while the per-iteration step counter is less than
    /// or equal to the step budget, so the counter at exit is in
    /// `[steps_per_iter, steps_per_iter + episode_len)`. Each rollout emits
    /// its metrics immediately.
    fn train_phase<A: Agent + ?Sized>(
        &mut self,
        agent: &mut A,
        recorder: &mut dyn Recorder,
    ) -> Result<()> {
        agent.train();

        let mut step_count = 0;
        while step_count <= self.config.steps_per_iter {
            let episode = agent.run(self.config.max_step)?;

            self.total_steps += episode.steps;
            step_count += episode.steps;
            self.train_stats.push(episode.episode_return);

            let mut record = Record::from_scalar("total_steps", self.total_steps as f32);
            record.insert("Train/AverageReturns", Scalar(self.train_stats.average()));
            record.insert("Train/EpisodeReturns", Scalar(episode.episode_return));
            if let Some(alpha) = agent.alpha() {
                record.insert("Train/Alpha", Scalar(alpha));
            }
            recorder.write(record);
        }

        Ok(())
    }

    /// Performs one evaluation phase and returns its statistics.
    ///
    /// Statistics start from zero every time; nothing carries over from the
    /// previous iteration's evaluation.
    fn eval_phase<A: Agent + ?Sized>(
        &mut self,
        agent: &mut A,
        recorder: &mut dyn Recorder,
    ) -> Result<ReturnStats> {
        agent.eval();

        let mut eval_stats = ReturnStats::new();
        let mut last_return = 0.0;
        for _ in 0..self.eval_episodes {
            let episode = agent.run(self.config.max_step)?;
            eval_stats.push(episode.episode_return);
            last_return = episode.episode_return;
        }

        let mut record = Record::from_scalar("total_steps", self.total_steps as f32);
        record.insert("Eval/AverageReturns", Scalar(eval_stats.average()));
        record.insert("Eval/EpisodeReturns", Scalar(last_return));
        recorder.write(record);

        Ok(eval_stats)
    }

    /// Name of the checkpoint artifact written at the given iteration.
    fn checkpoint_name(&self, iteration: usize, eval_average: f32) -> String {
        format!(
            "{}_{}_s_{}_i_{}_st_{}_tr_{:.2}_er_{:.2}",
            self.config.env,
            self.config.algorithm,
            self.config.seed,
            iteration,
            self.total_steps,
            self.train_stats.average(),
            eval_average,
        )
    }

    /// Saves the agent's policy parameters.
    fn save_agent<A: Agent + ?Sized>(
        &self,
        agent: &A,
        iteration: usize,
        eval_average: f32,
    ) -> Result<()> {
        let path = self.model_dir.join(self.checkpoint_name(iteration, eval_average));
        std::fs::create_dir_all(&path)?;
        agent.save_params(&path)?;
        info!("Saved agent parameters in {:?}", &path);
        Ok(())
    }

    fn report_progress<A: Agent + ?Sized>(
        &self,
        iteration: usize,
        agent: &A,
        eval_stats: &ReturnStats,
    ) {
        info!("---------------------------------------");
        info!("Iterations: {}", iteration);
        info!("Steps: {}", self.total_steps);
        info!("Episodes: {}", self.train_stats.num_episodes());
        info!("AverageReturn: {:.2}", self.train_stats.average());
        info!("EvalEpisodes: {}", eval_stats.num_episodes());
        info!("EvalAverageReturn: {:.2}", eval_stats.average());
        info!("OtherLogs: {:?}", agent.diagnostics());
        info!("Time: {}", self.started_at.elapsed().as_secs());
        info!("---------------------------------------");
    }

    /// Runs the configured number of iterations.
    ///
    /// Any error raised by the agent, the recorder backend or checkpoint I/O
    /// propagates and aborts the run; there is no retry and no
    /// partial-iteration recovery.
    pub fn run<A: Agent + ?Sized>(
        &mut self,
        agent: &mut A,
        recorder: &mut dyn Recorder,
    ) -> Result<()> {
        for i in 0..self.config.iterations {
            self.train_phase(agent, recorder)?;
            let eval_stats = self.eval_phase(agent, recorder)?;

            self.report_progress(i, agent, &eval_stats);

            if self.save_interval > 0 && (i + 1) % self.save_interval == 0 {
                self.save_agent(agent, i, eval_stats.average())?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{record::BufferedRecorder, EpisodeResult};
    use std::path::Path;
    use tempdir::TempDir;

    /// Rolls out fixed-length episodes with returns cycling over a list.
    struct SeqAgent {
        episode_len: usize,
        returns: Vec<f32>,
        cursor: usize,
        training: bool,
        alpha: Option<f32>,
    }

    impl SeqAgent {
        fn new(episode_len: usize, returns: Vec<f32>) -> Self {
            Self {
                episode_len,
                returns,
                cursor: 0,
                training: true,
                alpha: None,
            }
        }
    }

    impl Agent for SeqAgent {
        fn run(&mut self, max_step: usize) -> Result<EpisodeResult> {
            let episode_return = self.returns[self.cursor % self.returns.len()];
            self.cursor += 1;
            Ok(EpisodeResult {
                steps: self.episode_len.min(max_step),
                episode_return,
            })
        }

        fn train(&mut self) {
            self.training = true;
        }

        fn eval(&mut self) {
            self.training = false;
        }

        fn is_train(&self) -> bool {
            self.training
        }

        fn alpha(&self) -> Option<f32> {
            self.alpha
        }

        fn save_params(&self, path: &Path) -> Result<()> {
            std::fs::write(path.join("actor.yaml"), "")?;
            Ok(())
        }
    }

    fn runner(config: RunConfig, dir: &TempDir) -> Runner {
        let runner_config = RunnerConfig::default().model_dir(dir.path().to_str().unwrap());
        Runner::build(config, runner_config).unwrap()
    }

    #[test]
    fn zero_episode_average_is_zero() {
        assert_eq!(ReturnStats::new().average(), 0.0);
    }

    #[test]
    fn budget_is_met_or_overshot_by_one_episode() -> Result<()> {
        // 5000-step budget, 200-step episodes: the counter reaches the budget
        // exactly after 25 rollouts, the continuation test still holds at
        // equality, and the phase exits after a 26th rollout at 5200 steps.
        let dir = TempDir::new("runner")?;
        let config = RunConfig::default().steps_per_iter(5000).max_step(200);
        let mut runner = runner(config, &dir);
        let mut agent = SeqAgent::new(200, vec![0.0]);
        let mut recorder = BufferedRecorder::new();

        runner.train_phase(&mut agent, &mut recorder)?;

        assert_eq!(runner.total_steps(), 5200);
        assert_eq!(runner.train_stats().num_episodes(), 26);
        assert_eq!(recorder.len(), 26);
        Ok(())
    }

    #[test]
    fn first_episode_sets_the_average() -> Result<()> {
        let dir = TempDir::new("runner")?;
        let config = RunConfig::default().steps_per_iter(0).max_step(200);
        let mut runner = runner(config, &dir);
        let mut agent = SeqAgent::new(200, vec![150.0]);
        let mut recorder = BufferedRecorder::new();

        runner.train_phase(&mut agent, &mut recorder)?;

        assert_eq!(runner.train_stats().average(), 150.0);
        let record = recorder.iter().next().unwrap();
        assert_eq!(record.get_scalar("Train/AverageReturns")?, 150.0);
        assert_eq!(record.get_scalar("Train/EpisodeReturns")?, 150.0);
        assert_eq!(record.get_scalar("total_steps")?, 200.0);
        Ok(())
    }

    #[test]
    fn eval_statistics_reset_every_phase() -> Result<()> {
        let dir = TempDir::new("runner")?;
        let config = RunConfig::default().max_step(200);
        let mut runner = runner(config, &dir);
        let mut agent = SeqAgent::new(200, vec![10.0, 20.0]);
        let mut recorder = BufferedRecorder::new();

        let first = runner.eval_phase(&mut agent, &mut recorder)?;
        let second = runner.eval_phase(&mut agent, &mut recorder)?;

        assert_eq!(first.num_episodes(), 10);
        assert_eq!(first.average(), 15.0);
        assert_eq!(second.num_episodes(), 10);
        assert_eq!(second.average(), 15.0);

        // Evaluation rollouts never touch the global step counter.
        assert_eq!(runner.total_steps(), 0);

        let record = recorder.iter().next().unwrap();
        assert_eq!(record.get_scalar("Eval/AverageReturns")?, 15.0);
        assert_eq!(record.get_scalar("Eval/EpisodeReturns")?, 20.0);
        Ok(())
    }

    #[test]
    fn alpha_is_emitted_only_when_exposed() -> Result<()> {
        let dir = TempDir::new("runner")?;
        let config = RunConfig::default().steps_per_iter(0).max_step(200);

        let mut runner_ = runner(config.clone(), &dir);
        let mut agent = SeqAgent::new(200, vec![0.0]);
        let mut recorder = BufferedRecorder::new();
        runner_.train_phase(&mut agent, &mut recorder)?;
        assert!(recorder.iter().next().unwrap().get("Train/Alpha").is_none());

        let mut runner_ = runner(config, &dir);
        let mut agent = SeqAgent::new(200, vec![0.0]);
        agent.alpha = Some(0.2);
        let mut recorder = BufferedRecorder::new();
        runner_.train_phase(&mut agent, &mut recorder)?;
        assert_eq!(
            recorder.iter().next().unwrap().get_scalar("Train/Alpha")?,
            0.2
        );
        Ok(())
    }

    #[test]
    fn training_statistics_accumulate_across_iterations() -> Result<()> {
        let dir = TempDir::new("runner")?;
        let config = RunConfig::default()
            .iterations(3)
            .steps_per_iter(0)
            .max_step(200);
        let mut runner = runner(config, &dir);
        let mut agent = SeqAgent::new(200, vec![30.0]);
        let mut recorder = BufferedRecorder::new();

        runner.run(&mut agent, &mut recorder)?;

        // One training rollout per iteration with a zero budget; the
        // cumulative counters grow monotonically and are never reset.
        assert_eq!(runner.train_stats().num_episodes(), 3);
        assert_eq!(runner.total_steps(), 600);
        // 3 training records plus 3 evaluation records.
        assert_eq!(recorder.len(), 6);
        Ok(())
    }

    #[test]
    fn checkpoint_name_carries_the_run_key() -> Result<()> {
        let dir = TempDir::new("runner")?;
        let config = RunConfig::default()
            .env("Ant-v2")
            .algorithm(crate::Algorithm::Sac)
            .seed(3)
            .steps_per_iter(0)
            .max_step(200);
        let mut runner = runner(config, &dir);
        let mut agent = SeqAgent::new(200, vec![150.0]);
        let mut recorder = BufferedRecorder::new();
        runner.train_phase(&mut agent, &mut recorder)?;

        assert_eq!(
            runner.checkpoint_name(19, 12.5),
            "Ant-v2_sac_s_3_i_19_st_200_tr_150.00_er_12.50"
        );
        Ok(())
    }
}
