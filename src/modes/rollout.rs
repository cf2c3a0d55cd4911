//! Rollout mode: drive the environment with a controller
//!
//! Runs episodes in a simple synchronous loop, feeding every step to the
//! registered observers and recording finished episodes in [`EpisodeStats`].
//! [`RolloutMode::run_paced`] spaces ticks at the configured tick rate for
//! live presentation; game logic is identical in both loops.
//!
//! # Example
//!
//! ```rust
//! use grid_snake::game::GameConfig;
//! use grid_snake::modes::{GreedyController, RolloutConfig, RolloutMode};
//!
//! let rollout = RolloutConfig {
//!     episodes: 3,
//!     max_steps: Some(200),
//!     seed: Some(7),
//!     ..Default::default()
//! };
//! let mut mode = RolloutMode::new(GameConfig::default(), rollout, GreedyController).unwrap();
//! mode.run().unwrap();
//! assert_eq!(mode.stats().total_episodes(), 3);
//! ```

use anyhow::{Context, Result};
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};
use tracing::info;

use super::controller::Controller;
use super::observer::{EpisodeSummary, StepObserver};
use crate::game::GameConfig;
use crate::metrics::EpisodeStats;
use crate::rl::{Environment, Observation, SnakeEnvironment, TimeLimit};

/// Configuration for rollout mode
#[derive(Debug, Clone)]
pub struct RolloutConfig {
    /// Number of episodes to run
    pub episodes: usize,

    /// Truncate episodes after this many steps
    pub max_steps: Option<usize>,

    /// Base seed; episode `i` resets with `seed + i`
    pub seed: Option<u64>,

    /// Log a summary every N episodes
    pub log_frequency: usize,

    /// Rolling window for episode statistics
    pub stats_window: usize,
}

impl Default for RolloutConfig {
    fn default() -> Self {
        Self {
            episodes: 10,
            max_steps: None,
            seed: None,
            log_frequency: 1,
            stats_window: 100,
        }
    }
}

/// Progress of the episode currently being played
#[derive(Debug, Clone)]
struct EpisodeProgress {
    observation: Observation,
    reward: f32,
    length: usize,
}

pub struct RolloutMode<C: Controller> {
    env: TimeLimit<SnakeEnvironment>,
    controller: C,
    observers: Vec<Box<dyn StepObserver>>,
    stats: EpisodeStats,
    config: RolloutConfig,
    tick_interval: Duration,
    current: Option<EpisodeProgress>,
    episodes_done: usize,
}

impl<C: Controller> RolloutMode<C> {
    pub fn new(game_config: GameConfig, config: RolloutConfig, controller: C) -> Result<Self> {
        let tick_interval = Duration::from_secs_f64(1.0 / game_config.tick_rate.max(1) as f64);
        let env = match config.seed {
            Some(seed) => SnakeEnvironment::with_seed(game_config, seed),
            None => SnakeEnvironment::new(game_config),
        }
        .context("Failed to create environment")?;

        Ok(Self {
            env: TimeLimit::new(env, config.max_steps.unwrap_or(usize::MAX)),
            controller,
            observers: Vec::new(),
            stats: EpisodeStats::new(config.stats_window),
            config,
            tick_interval,
            current: None,
            episodes_done: 0,
        })
    }

    /// Register a read-only observer
    pub fn add_observer(&mut self, observer: Box<dyn StepObserver>) {
        self.observers.push(observer);
    }

    pub fn stats(&self) -> &EpisodeStats {
        &self.stats
    }

    pub fn environment(&self) -> &SnakeEnvironment {
        self.env.inner()
    }

    pub fn is_finished(&self) -> bool {
        self.episodes_done >= self.config.episodes
    }

    /// Run all episodes back to back
    pub fn run(&mut self) -> Result<&EpisodeStats> {
        self.log_start();
        while !self.is_finished() {
            self.tick()?;
        }
        info!("{}", self.stats.format_summary());
        Ok(&self.stats)
    }

    /// Run all episodes at the configured tick rate
    ///
    /// Ctrl+C stops after the current tick.
    pub async fn run_paced(&mut self) -> Result<&EpisodeStats> {
        self.log_start();
        let mut ticker = interval(self.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        while !self.is_finished() {
            tokio::select! {
                _ = ticker.tick() => {
                    self.tick()?;
                }

                _ = tokio::signal::ctrl_c() => {
                    info!("interrupted");
                    break;
                }
            }
        }

        info!("{}", self.stats.format_summary());
        Ok(&self.stats)
    }

    /// Advance the current episode by one step, starting one if needed
    ///
    /// Returns the summary when this step finished the episode.
    pub fn tick(&mut self) -> Result<Option<EpisodeSummary>> {
        let mut progress = match self.current.take() {
            Some(progress) => progress,
            None => self.start_episode(),
        };

        let action = self.controller.act(&progress.observation);
        let transition = self
            .env
            .step(action)
            .with_context(|| format!("Controller {} chose an invalid action", self.controller.name()))?;

        progress.reward += transition.reward;
        progress.length += 1;

        let state = self.env.inner().state();
        for observer in self.observers.iter_mut() {
            observer.on_step(state, &transition);
        }

        if !transition.is_done() {
            progress.observation = transition.observation;
            self.current = Some(progress);
            return Ok(None);
        }

        let summary = EpisodeSummary {
            episode: self.episodes_done,
            reward: progress.reward,
            length: progress.length,
            score: state.score,
            outcome: state.status,
        };
        self.finish_episode(&summary);
        Ok(Some(summary))
    }

    fn start_episode(&mut self) -> EpisodeProgress {
        let seed = self
            .config
            .seed
            .map(|seed| seed.wrapping_add(self.episodes_done as u64));
        let (observation, _info) = self.env.reset(seed);

        EpisodeProgress {
            observation,
            reward: 0.0,
            length: 0,
        }
    }

    fn finish_episode(&mut self, summary: &EpisodeSummary) {
        self.stats.record_episode(
            summary.reward,
            summary.length,
            summary.score,
            summary.outcome,
        );
        for observer in self.observers.iter_mut() {
            observer.on_episode_end(summary);
        }

        self.episodes_done += 1;
        if self.config.log_frequency > 0 && self.episodes_done % self.config.log_frequency == 0 {
            info!(
                episode = summary.episode,
                score = summary.score,
                length = summary.length,
                outcome = ?summary.outcome,
                "{}",
                self.stats.format_summary()
            );
        }
    }

    fn log_start(&self) {
        let config = self.env.inner().config();
        info!(
            controller = self.controller.name(),
            episodes = self.config.episodes,
            grid_size = config.grid_size,
            tick_rate = config.tick_rate,
            max_steps = ?self.config.max_steps,
            "starting rollout"
        );
    }
}
