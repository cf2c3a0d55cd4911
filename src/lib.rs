//! Grid Snake - a deterministic Snake environment for reinforcement learning
//!
//! This library provides:
//! - Core game logic (game module)
//! - The controller-facing reset/step/observe contract (rl module)
//! - Built-in controllers and a rollout driver (modes module)
//! - Episode statistics (metrics module)

pub mod game;
pub mod metrics;
pub mod modes;
pub mod rl;
