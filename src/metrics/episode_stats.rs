//! Rolling statistics over finished episodes
//!
//! Drivers record every finished episode here and print `format_summary()`
//! periodically.

use std::collections::VecDeque;

use crate::game::{CollisionType, EpisodeStatus};

/// Episode statistics tracker with rolling averages
///
/// # Example
///
/// ```rust
/// use grid_snake::game::{CollisionType, EpisodeStatus};
/// use grid_snake::metrics::EpisodeStats;
///
/// let mut stats = EpisodeStats::new(100);
/// stats.record_episode(2.0, 40, 3, EpisodeStatus::Collided(CollisionType::Wall));
///
/// assert_eq!(stats.total_episodes(), 1);
/// assert_eq!(stats.best_score(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct EpisodeStats {
    /// Episode rewards (rolling window)
    episode_rewards: VecDeque<f32>,

    /// Episode lengths in steps (rolling window)
    episode_lengths: VecDeque<usize>,

    /// Episode scores (food eaten) (rolling window)
    episode_scores: VecDeque<u32>,

    total_episodes: usize,
    total_steps: usize,
    best_score: u32,
    wall_collisions: usize,
    self_collisions: usize,
    wins: usize,

    /// Window size for rolling averages
    window_size: usize,
}

impl EpisodeStats {
    /// Create a tracker keeping the last `window_size` episodes for averages
    pub fn new(window_size: usize) -> Self {
        let window_size = window_size.max(1);
        Self {
            episode_rewards: VecDeque::with_capacity(window_size),
            episode_lengths: VecDeque::with_capacity(window_size),
            episode_scores: VecDeque::with_capacity(window_size),
            total_episodes: 0,
            total_steps: 0,
            best_score: 0,
            wall_collisions: 0,
            self_collisions: 0,
            wins: 0,
            window_size,
        }
    }

    /// Record the completion of an episode
    ///
    /// `outcome` is the final status; `Active` stands for an episode cut
    /// short by a step limit.
    pub fn record_episode(&mut self, reward: f32, length: usize, score: u32, outcome: EpisodeStatus) {
        Self::push_deque(&mut self.episode_rewards, reward, self.window_size);
        Self::push_deque(&mut self.episode_lengths, length, self.window_size);
        Self::push_deque(&mut self.episode_scores, score, self.window_size);
        self.total_episodes += 1;
        self.total_steps += length;
        self.best_score = self.best_score.max(score);

        match outcome {
            EpisodeStatus::Collided(CollisionType::Wall) => self.wall_collisions += 1,
            EpisodeStatus::Collided(CollisionType::SelfCollision) => self.self_collisions += 1,
            EpisodeStatus::Won => self.wins += 1,
            EpisodeStatus::Active => {}
        }
    }

    pub fn mean_episode_reward(&self) -> f32 {
        if self.episode_rewards.is_empty() {
            0.0
        } else {
            self.episode_rewards.iter().sum::<f32>() / self.episode_rewards.len() as f32
        }
    }

    pub fn mean_episode_length(&self) -> f32 {
        let sum: usize = self.episode_lengths.iter().sum();
        if self.episode_lengths.is_empty() {
            0.0
        } else {
            sum as f32 / self.episode_lengths.len() as f32
        }
    }

    pub fn mean_episode_score(&self) -> f32 {
        let sum: u32 = self.episode_scores.iter().sum();
        if self.episode_scores.is_empty() {
            0.0
        } else {
            sum as f32 / self.episode_scores.len() as f32
        }
    }

    pub fn total_episodes(&self) -> usize {
        self.total_episodes
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    /// Highest score over all recorded episodes, not just the window
    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn wall_collisions(&self) -> usize {
        self.wall_collisions
    }

    pub fn self_collisions(&self) -> usize {
        self.self_collisions
    }

    pub fn wins(&self) -> usize {
        self.wins
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Format a one-line summary of the current statistics
    pub fn format_summary(&self) -> String {
        format!(
            "Episodes: {} | Steps: {} | Reward: {:.2} | Score: {:.2} | Len: {:.1} | Best: {} | Wall: {} | Self: {} | Wins: {}",
            self.total_episodes,
            self.total_steps,
            self.mean_episode_reward(),
            self.mean_episode_score(),
            self.mean_episode_length(),
            self.best_score,
            self.wall_collisions,
            self.self_collisions,
            self.wins,
        )
    }

    /// Helper function to push to a deque with size limit
    fn push_deque<T>(deque: &mut VecDeque<T>, value: T, window_size: usize) {
        if deque.len() >= window_size {
            deque.pop_front();
        }
        deque.push_back(value);
    }
}
