//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! It is driven tick by tick through [`GameEngine::step`].

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod state;

// Re-export commonly used types
pub use action::{ACTION_SPACE_SIZE, Action, Direction, Turn};
pub use config::GameConfig;
pub use engine::{DEATH_REWARD, FOOD_REWARD, GameEngine, IDLE_REWARD, StepInfo, StepResult};
pub use error::EnvError;
pub use state::{CollisionType, EpisodeStatus, GameState, Position, Snake};
