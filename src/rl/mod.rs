//! Reinforcement learning environment for Snake game
//!
//! Provides:
//! - 9-component feature observations (turn-relative danger, food direction, heading)
//! - The controller-facing `Environment` contract (reset, step)
//! - A `TimeLimit` wrapper for step-count truncation
//! - Burn tensor export of observations

pub mod backend;
pub mod environment;
pub mod info;
pub mod observation;
pub mod time_limit;

pub use backend::{InferenceBackend, default_device, observation_tensor, observations_tensor};
pub use environment::{Environment, SnakeEnvironment, Transition};
pub use info::Info;
pub use observation::{OBSERVATION_BOUNDS, OBSERVATION_SIZE, Observation, create_observation};
pub use time_limit::TimeLimit;
