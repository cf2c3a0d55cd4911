//! Read-only hooks called after each step
//!
//! Observers receive shared references only, so presenters and loggers
//! can never mutate the episode they watch.

use tracing::{debug, trace};

use crate::game::{EpisodeStatus, GameState};
use crate::rl::{Observation, Transition};

/// Totals of one finished episode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeSummary {
    pub episode: usize,
    pub reward: f32,
    pub length: usize,
    pub score: u32,
    /// `Active` when the episode was truncated rather than terminated
    pub outcome: EpisodeStatus,
}

pub trait StepObserver {
    fn on_step(&mut self, state: &GameState, transition: &Transition<Observation>);

    fn on_episode_end(&mut self, _summary: &EpisodeSummary) {}
}

/// Logs every transition at `trace` and every episode at `debug`
#[derive(Debug, Default)]
pub struct TracingObserver;

impl StepObserver for TracingObserver {
    fn on_step(&mut self, state: &GameState, transition: &Transition<Observation>) {
        trace!(
            step = state.steps,
            head = ?state.snake.head(),
            heading = ?state.snake.direction,
            food = ?state.food,
            reward = transition.reward,
            terminated = transition.terminated,
            obs = ?transition.observation.as_slice(),
            "step"
        );
    }

    fn on_episode_end(&mut self, summary: &EpisodeSummary) {
        debug!(
            episode = summary.episode,
            reward = summary.reward,
            length = summary.length,
            score = summary.score,
            outcome = ?summary.outcome,
            "episode finished"
        );
    }
}
