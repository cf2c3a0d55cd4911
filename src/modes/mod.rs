//! External drivers that call reset/step on the environment

pub mod controller;
pub mod observer;
pub mod rollout;

pub use controller::{Controller, GreedyController, RandomController};
pub use observer::{EpisodeSummary, StepObserver, TracingObserver};
pub use rollout::{RolloutConfig, RolloutMode};
